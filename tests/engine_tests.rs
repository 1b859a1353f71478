//! PopulationEngine unit tests

#[cfg(test)]
mod tests {
    use scene_populator::engine::{PopulationEngine, SpawnBatch, SpawnOutcome};
    use scene_populator::types::{PopulationConfig, ShapeKind};

    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_4;

    fn make_config() -> PopulationConfig {
        PopulationConfig {
            rng_seed: 42,
            ..Default::default()
        }
    }

    fn make_engine() -> PopulationEngine {
        PopulationEngine::seeded(make_config())
    }

    fn accept(engine: &mut PopulationEngine) -> SpawnBatch {
        match engine.request_spawn_batch() {
            SpawnOutcome::Accepted(batch) => batch,
            SpawnOutcome::InProgress => panic!("expected the spawn request to be accepted"),
        }
    }

    /// Accept a batch and immediately acknowledge its completion.
    fn accept_completed(engine: &mut PopulationEngine) -> SpawnBatch {
        let batch = accept(engine);
        engine.complete_batch();
        batch
    }

    // -----------------------------------------------------------------------
    // Initial population
    // -----------------------------------------------------------------------

    #[test]
    fn initial_population_emits_exactly_n_directives() {
        let mut engine = make_engine();
        assert!(engine.initial_population(0).is_empty());

        let directives = engine.initial_population(4);
        assert_eq!(directives.len(), 4);

        let volume = engine.config().initial_volume;
        for d in &directives {
            assert_eq!(d.shape, ShapeKind::Sphere);
            // No batch offset: every position sits inside the raw volume.
            assert!(volume.contains(d.position), "unoffset position expected");
        }
    }

    #[test]
    fn initial_population_consumes_no_batch_index() {
        let mut engine = make_engine();
        engine.initial_population(2);

        let stats = engine.stats();
        assert_eq!(stats.batches_accepted, 0);
        assert_eq!(stats.objects_emitted, 2);
        assert_eq!(stats.next_batch_size, 5);
    }

    // -----------------------------------------------------------------------
    // Batch sizing & growth
    // -----------------------------------------------------------------------

    #[test]
    fn batch_sizes_grow_by_one_per_accepted_batch() {
        let mut engine = make_engine();
        for expected in [5usize, 6, 7, 8] {
            let batch = accept_completed(&mut engine);
            assert_eq!(batch.directives.len(), expected);
        }
    }

    #[test]
    fn growth_increment_is_configurable() {
        let mut engine = PopulationEngine::seeded(PopulationConfig {
            growth_increment: 2,
            ..make_config()
        });
        for expected in [5usize, 7, 9] {
            let batch = accept_completed(&mut engine);
            assert_eq!(batch.directives.len(), expected);
        }
    }

    #[test]
    fn batch_count_grows_monotonically() {
        let mut engine = make_engine();
        let mut previous = 0usize;
        for index in 1..=10u64 {
            let batch = accept_completed(&mut engine);
            assert_eq!(batch.index, index);
            assert!(batch.directives.len() > previous);
            previous = batch.directives.len();
        }
    }

    // -----------------------------------------------------------------------
    // Spiral offsets
    // -----------------------------------------------------------------------

    #[test]
    fn batches_sit_on_a_widening_spiral() {
        let mut engine = make_engine();
        let volume = engine.config().batch_volume;

        for k in 1..=8u32 {
            let batch = accept_completed(&mut engine);
            let angle = k as f32 * FRAC_PI_4;
            let radius = 3.0 * k as f32;

            assert_relative_eq!(batch.offset_x, angle.cos() * radius, epsilon = 1e-3);
            assert_relative_eq!(batch.offset_z, angle.sin() * radius, epsilon = 1e-3);

            for d in &batch.directives {
                let residual_x = d.position.x - batch.offset_x;
                let residual_z = d.position.z - batch.offset_z;
                assert!(residual_x >= volume.min.x - 1e-3 && residual_x <= volume.max.x + 1e-3);
                assert!(residual_z >= volume.min.z - 1e-3 && residual_z <= volume.max.z + 1e-3);
                // Height is never offset.
                assert!(d.position.y >= volume.min.y && d.position.y <= volume.max.y);
            }
        }
    }

    #[test]
    fn seeded_scenario_matches_the_expected_spiral() {
        let mut engine = make_engine();

        // First accepted batch: 5 directives at offset (cos 45° · 3, sin 45° · 3).
        let first = accept(&mut engine);
        assert_eq!(first.directives.len(), 5);
        assert_relative_eq!(first.offset_x, 2.1213, epsilon = 1e-3);
        assert_relative_eq!(first.offset_z, 2.1213, epsilon = 1e-3);

        // A rejected call while the first is still in flight changes nothing.
        assert!(matches!(
            engine.request_spawn_batch(),
            SpawnOutcome::InProgress
        ));
        assert_eq!(engine.stats().next_batch_size, 6);
        engine.complete_batch();

        // Second accepted batch: 6 directives at offset (cos 90° · 6, sin 90° · 6).
        let second = accept_completed(&mut engine);
        assert_eq!(second.directives.len(), 6);
        assert_relative_eq!(second.offset_x, 0.0, epsilon = 1e-3);
        assert_relative_eq!(second.offset_z, 6.0, epsilon = 1e-3);
    }

    // -----------------------------------------------------------------------
    // Re-entrancy guard
    // -----------------------------------------------------------------------

    #[test]
    fn second_request_before_completion_is_a_no_op() {
        let mut engine = make_engine();
        assert!(!engine.spawn_in_progress());

        let first = accept(&mut engine);
        assert!(engine.spawn_in_progress());

        // Rejected: no directives, no new batch index.
        assert!(matches!(
            engine.request_spawn_batch(),
            SpawnOutcome::InProgress
        ));
        let stats = engine.stats();
        assert_eq!(stats.batches_accepted, first.index);
        assert_eq!(stats.batches_rejected, 1);
        assert_eq!(stats.objects_emitted, 5);

        engine.complete_batch();
        assert!(!engine.spawn_in_progress());

        // The next accepted batch picks up where growth left off.
        let second = accept(&mut engine);
        assert_eq!(second.index, first.index + 1);
        assert_eq!(second.directives.len(), 6);
    }

    // -----------------------------------------------------------------------
    // Color policy
    // -----------------------------------------------------------------------

    #[test]
    fn every_directive_is_fully_saturated_and_bright() {
        let mut engine = make_engine();
        let mut directives = engine.initial_population(3);
        for _ in 0..4 {
            directives.extend(accept_completed(&mut engine).directives);
        }

        for d in &directives {
            assert_eq!(d.color.s, 1.0);
            assert_eq!(d.color.v, 1.0);
            assert!((0.0..360.0).contains(&d.color.h));
        }
    }

    // -----------------------------------------------------------------------
    // Determinism – equal seeds produce identical directive streams
    // -----------------------------------------------------------------------

    #[test]
    fn equal_seeds_produce_identical_batches() {
        let mut a = make_engine();
        let mut b = make_engine();

        assert_eq!(a.initial_population(2), b.initial_population(2));
        assert_eq!(
            accept_completed(&mut a).directives,
            accept_completed(&mut b).directives
        );
    }
}
