//! Scene ledger: placed-object records and their registry.
//!
//! Retention is a host concern — the engine hands directives over and
//! forgets them. The agent records what it published here so reconnecting
//! hosts can request a full snapshot instead of replaying history.

use std::collections::HashMap;

use crate::types::{Hsv, ShapeKind, Vec3};

// ---------------------------------------------------------------------------
// Placed object
// ---------------------------------------------------------------------------

/// A single object the host has been told to realize.
#[derive(Debug, Clone)]
pub struct PlacedObject {
    /// Deterministic identifier: `obj.{batch}.{ordinal}`.
    pub id: String,
    /// Batch that produced the object; 0 for the initial population.
    pub batch: u64,
    pub shape: ShapeKind,
    pub color: Hsv,
    pub position: Vec3,
    pub scale: f32,
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Holds every object placed so far, keyed by id.
#[derive(Debug, Default)]
pub struct SceneRegistry {
    objects: HashMap<String, PlacedObject>,
}

impl SceneRegistry {
    pub fn new() -> Self {
        Self {
            objects: HashMap::new(),
        }
    }

    pub fn insert(&mut self, object: PlacedObject) {
        self.objects.insert(object.id.clone(), object);
    }

    pub fn get(&self, id: &str) -> Option<&PlacedObject> {
        self.objects.get(id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// All objects a given batch produced, in no particular order.
    pub fn by_batch(&self, batch: u64) -> Vec<&PlacedObject> {
        self.objects.values().filter(|o| o.batch == batch).collect()
    }

    /// Every placed object, ordered by batch then id — stable enough for
    /// snapshot payloads.
    pub fn ordered(&self) -> Vec<&PlacedObject> {
        let mut all: Vec<_> = self.objects.values().collect();
        all.sort_by(|a, b| a.batch.cmp(&b.batch).then_with(|| a.id.cmp(&b.id)));
        all
    }
}
