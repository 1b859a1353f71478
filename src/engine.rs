//! PopulationEngine – batch sizing, spiral offsets, re-entrancy guard.

use log::debug;

use crate::sampler::{PlacementSampler, UniformSampler};
use crate::types::{EngineStats, Hsv, PopulationConfig, ShapeKind, SpawnVolume, Vec3};

// ---------------------------------------------------------------------------
// Directives & batches
// ---------------------------------------------------------------------------

/// One object for the scene host to realize. Produced, handed over, and
/// forgotten — the engine retains no placement history.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementDirective {
    pub shape: ShapeKind,
    pub color: Hsv,
    pub position: Vec3,
    /// Render scale hint (sphere radius / cube edge).
    pub scale: f32,
}

/// One accepted spawn request's full output.
///
/// Batch `k` sits on a spiral arm: angle `k · angular_step`, radius
/// `radius_step · k`. The offsets displace every directive on the horizontal
/// axes; height is never offset.
#[derive(Debug, Clone)]
pub struct SpawnBatch {
    /// 1-based, strictly monotonic per engine instance.
    pub index: u64,
    pub angle: f32,
    pub radius: f32,
    pub offset_x: f32,
    pub offset_z: f32,
    pub directives: Vec<PlacementDirective>,
}

/// Outcome of a spawn request.
///
/// Callers (typically [`SceneHostAgent`](crate::host::SceneHostAgent)) emit
/// the directives of an accepted batch, deliver the completion signal, and
/// only then call [`PopulationEngine::complete_batch`].
#[derive(Debug)]
pub enum SpawnOutcome {
    Accepted(SpawnBatch),
    /// A batch is still in flight; the request was dropped, not queued.
    InProgress,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

pub struct PopulationEngine {
    config: PopulationConfig,
    sampler: Box<dyn PlacementSampler>,
    spawn_in_progress: bool,
    batch_index: u64,
    next_batch_size: u32,
    batches_rejected: u64,
    objects_emitted: u64,
}

impl PopulationEngine {
    pub fn new(config: PopulationConfig, sampler: Box<dyn PlacementSampler>) -> Self {
        let next_batch_size = config.batch_seed_count;
        Self {
            config,
            sampler,
            spawn_in_progress: false,
            batch_index: 0,
            next_batch_size,
            batches_rejected: 0,
            objects_emitted: 0,
        }
    }

    /// Engine with the default [`UniformSampler`], seeded from the config.
    pub fn seeded(config: PopulationConfig) -> Self {
        let sampler = UniformSampler::seeded(config.rng_seed);
        Self::new(config, Box::new(sampler))
    }

    // -----------------------------------------------------------------------
    // Initial population
    // -----------------------------------------------------------------------

    /// Emit `count` directives inside the initial volume, with no offset.
    ///
    /// Intended to run exactly once at scene initialization. Consumes no
    /// batch index and ignores the re-entrancy guard.
    pub fn initial_population(&mut self, count: u32) -> Vec<PlacementDirective> {
        debug!("placing initial population of {}", count);
        let volume = self.config.initial_volume;
        let directives: Vec<_> = (0..count)
            .map(|_| self.sample_directive(volume, 0.0, 0.0))
            .collect();
        self.objects_emitted += directives.len() as u64;
        directives
    }

    // -----------------------------------------------------------------------
    // Spawn batches
    // -----------------------------------------------------------------------

    /// Accept or drop a spawn request.
    ///
    /// While a batch is in flight the request is a counted no-op — a rapid
    /// double-trigger produces one batch, not two. An accepted batch holds
    /// the guard until [`complete_batch`](Self::complete_batch).
    pub fn request_spawn_batch(&mut self) -> SpawnOutcome {
        if self.spawn_in_progress {
            self.batches_rejected += 1;
            debug!(
                "spawn request dropped: batch {} still in flight",
                self.batch_index
            );
            return SpawnOutcome::InProgress;
        }
        self.spawn_in_progress = true;
        self.batch_index += 1;

        let angle = self.batch_index as f32 * self.config.angular_step;
        let radius = self.config.radius_step * self.batch_index as f32;
        let offset_x = angle.cos() * radius;
        let offset_z = angle.sin() * radius;

        let size = self.next_batch_size;
        let volume = self.config.batch_volume;
        let directives: Vec<_> = (0..size)
            .map(|_| self.sample_directive(volume, offset_x, offset_z))
            .collect();

        // Each successive batch is one increment larger, never reset.
        self.next_batch_size += self.config.growth_increment;
        self.objects_emitted += directives.len() as u64;

        debug!(
            "accepted batch {} ({} objects, offset ({:.3}, {:.3}))",
            self.batch_index, size, offset_x, offset_z
        );

        SpawnOutcome::Accepted(SpawnBatch {
            index: self.batch_index,
            angle,
            radius,
            offset_x,
            offset_z,
            directives,
        })
    }

    /// Release the re-entrancy guard.
    ///
    /// Must be called exactly once per accepted batch, after every directive
    /// has been emitted and the completion signal delivered.
    pub fn complete_batch(&mut self) {
        self.spawn_in_progress = false;
    }

    pub fn spawn_in_progress(&self) -> bool {
        self.spawn_in_progress
    }

    // -----------------------------------------------------------------------
    // Stats
    // -----------------------------------------------------------------------

    pub fn stats(&self) -> EngineStats {
        EngineStats {
            batches_accepted: self.batch_index,
            batches_rejected: self.batches_rejected,
            objects_emitted: self.objects_emitted,
            next_batch_size: self.next_batch_size,
        }
    }

    pub fn config(&self) -> &PopulationConfig {
        &self.config
    }

    // -----------------------------------------------------------------------
    // Sampling
    // -----------------------------------------------------------------------

    fn sample_directive(
        &mut self,
        volume: SpawnVolume,
        offset_x: f32,
        offset_z: f32,
    ) -> PlacementDirective {
        let mut position = self.sampler.point_in(&volume);
        position.x += offset_x;
        position.z += offset_z;

        PlacementDirective {
            shape: ShapeKind::Sphere,
            color: self.sampler.bright_color(),
            position,
            scale: self.config.sphere_radius,
        }
    }
}
