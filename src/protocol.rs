//! `scene.*` and `intent.*` wire protocol.
//!
//! This module owns **every message that crosses the boundary** between the
//! population engine and any scene host (AR runtime, game engine, headless
//! logger…).
//!
//! ## Subject namespaces
//!
//! | Namespace     | Direction          | Meaning                     |
//! |---------------|--------------------|------------------------------|
//! | `scene.*`     | engine → host      | placement stream, snapshots  |
//! | `intent.*`    | host/UI → engine   | spawn triggers               |
//! | `scene.cmd.*` | host/UI → engine   | request-reply commands       |
//!
//! ## Design rules
//!
//! 1. Every struct must be `Serialize + Deserialize` with snake_case JSON.
//! 2. No engine-internal state leaks out (`SpawnBatch`, sampler handles…).
//! 3. Positions and colors are flat f32 fields, never nested math types.
//! 4. Every outbound event includes `frame: u64` (the batch counter that
//!    produced it; 0 for the initial population) and `session: String`.

use serde::{Deserialize, Serialize};

use crate::types::ShapeKind;

// ---------------------------------------------------------------------------
// Common envelope
// ---------------------------------------------------------------------------

/// Every outbound message is wrapped in this envelope.
///
/// The `session` field lets multiplexed hosts distinguish scenes.
/// The `frame` field lets hosts order interleaved streams per batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneEvent<T> {
    pub session: String,
    pub frame: u64,
    pub payload: T,
}

impl<T> SceneEvent<T> {
    pub fn new(session: impl Into<String>, frame: u64, payload: T) -> Self {
        Self {
            session: session.into(),
            frame,
            payload,
        }
    }
}

// ---------------------------------------------------------------------------
// Placement events  (subjects: scene.object.*)
// ---------------------------------------------------------------------------

/// Engine instructs the host to realize one object.
///
/// `object_id` is deterministic (`obj.{batch}.{ordinal}`), so a host that
/// replays a snapshot after reconnecting never duplicates an object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectPlaced {
    pub object_id: String,
    /// Batch that produced the object; 0 for the initial population.
    pub batch: u64,
    pub shape: ShapeKind,
    /// Hue in degrees, `[0, 360)`.
    pub hue: f32,
    pub saturation: f32,
    pub value: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Render scale hint (sphere radius / cube edge).
    pub scale: f32,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

// ---------------------------------------------------------------------------
// Batch events  (subject: scene.batch.completed)
// ---------------------------------------------------------------------------

/// One accepted spawn request finished emitting all of its placements.
///
/// Also delivered verbatim as the exactly-once completion reply to whichever
/// context issued the spawn intent. A rejected request produces no
/// `BatchCompleted` at all — rejection is observable only as absence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchCompleted {
    pub batch: u64,
    /// Objects emitted by this batch.
    pub spawned: u32,
    /// Objects the host has retained in total, this batch included.
    pub total_objects: usize,
}

// ---------------------------------------------------------------------------
// Snapshot  (subject: scene.snapshot)
// ---------------------------------------------------------------------------

/// Full placement history sent to a host on initial connect or reconnect.
///
/// Hosts should hydrate their local scene from this before processing
/// incremental `scene.object.placed` events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub objects: Vec<ObjectPlaced>,
}

// ---------------------------------------------------------------------------
// Intent messages  (host/UI → engine, via intent.* subjects)
// ---------------------------------------------------------------------------

/// One press of the spawn trigger. Carries no payload: the engine decides
/// count, colors, and placement on its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentSpawn {}

/// Request the one-shot initial population.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentPopulate {
    pub count: u32,
}

// ---------------------------------------------------------------------------
// Command requests  (host/UI → engine, request-reply via scene.cmd.*)
// ---------------------------------------------------------------------------

/// Request an engine stats snapshot (reply: `EngineStats` JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CmdStats {}

/// Request a full scene snapshot (reply: `SceneSnapshot` JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CmdSnapshot {}

// ---------------------------------------------------------------------------
// Subject helpers
// ---------------------------------------------------------------------------

/// All subjects used by the scene protocol, as constants.
pub mod subjects {
    pub const OBJECT_PLACED: &str = "scene.object.placed";
    pub const BATCH_COMPLETED: &str = "scene.batch.completed";
    pub const SNAPSHOT: &str = "scene.snapshot";

    pub const INTENT_SPAWN: &str = "intent.spawn";
    pub const INTENT_POPULATE: &str = "intent.populate";

    pub const CMD_STATS: &str = "scene.cmd.stats";
    pub const CMD_SNAPSHOT: &str = "scene.cmd.snapshot";
}
