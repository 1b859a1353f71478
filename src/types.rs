//! Core population types shared across all modules.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Basic math
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

impl std::fmt::Display for Vec3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}

// ---------------------------------------------------------------------------
// Shapes
// ---------------------------------------------------------------------------

/// Primitive shapes a scene host knows how to realize.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Sphere,
    Cube,
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShapeKind::Sphere => write!(f, "sphere"),
            ShapeKind::Cube => write!(f, "cube"),
        }
    }
}

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// Hue/saturation/value color. Hue is in degrees, `[0, 360)`; saturation and
/// value are in `[0, 1]`.
///
/// Spawned objects always carry full saturation and value — bright, never
/// muted, never white, black, or gray. Only the hue varies.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Hsv {
    pub h: f32,
    pub s: f32,
    pub v: f32,
}

impl Hsv {
    pub fn new(h: f32, s: f32, v: f32) -> Self {
        Self { h, s, v }
    }

    /// Convert to RGB components in `[0, 1]`.
    pub fn to_rgb(self) -> [f32; 3] {
        let h = self.h.rem_euclid(360.0) / 60.0;
        let c = self.v * self.s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let m = self.v - c;

        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        [r + m, g + m, b + m]
    }
}

// ---------------------------------------------------------------------------
// Sampling volume
// ---------------------------------------------------------------------------

/// Axis-aligned box positions are drawn from. Each axis of `min` must be
/// less than or equal to the matching axis of `max`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SpawnVolume {
    pub min: Vec3,
    pub max: Vec3,
}

impl SpawnVolume {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, p: Vec3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }
}

// ---------------------------------------------------------------------------
// Stats & config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStats {
    pub batches_accepted: u64,
    pub batches_rejected: u64,
    pub objects_emitted: u64,
    pub next_batch_size: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationConfig {
    /// Objects placed by the one-shot initial population.
    pub initial_count: u32,
    /// Objects in the first accepted spawn batch.
    pub batch_seed_count: u32,
    /// How many more objects each successive batch carries.
    pub growth_increment: u32,
    /// Sampling volume for the initial population (never offset).
    pub initial_volume: SpawnVolume,
    /// Sampling volume for batch spawns, before the spiral offset is applied.
    pub batch_volume: SpawnVolume,
    /// Angular step between consecutive batches, in radians.
    pub angular_step: f32,
    /// Spiral radius gained per batch, in world units.
    pub radius_step: f32,
    /// Sphere radius hint forwarded to the scene host.
    pub sphere_radius: f32,
    /// Deterministic sampling seed.
    pub rng_seed: u64,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            initial_count: 2,
            batch_seed_count: 5,
            growth_increment: 1,
            initial_volume: SpawnVolume::new(
                Vec3::new(-5.0, 3.0, -5.0),
                Vec3::new(5.0, 10.0, 5.0),
            ),
            batch_volume: SpawnVolume::new(
                Vec3::new(-5.0, 3.0, -5.0),
                Vec3::new(5.0, 10.0, 5.0),
            ),
            angular_step: std::f32::consts::FRAC_PI_4,
            radius_step: 3.0,
            sphere_radius: 0.8,
            rng_seed: 42,
        }
    }
}
