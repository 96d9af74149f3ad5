//! Integration test: sequencer invariants under random play
//!
//! Drives both experiments with seeded random click streams (including
//! locked, repeated and unknown ids) and checks the invariants after every
//! click.

use lab::{ExperimentId, SimulationFacade, StepDefinition, StepSequencer};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const SEEDS: u64 = 200;

fn ids(bench: &SimulationFacade) -> Vec<String> {
    bench.steps().iter().map(|s| s.id.clone()).collect()
}

#[test]
fn test_complete_iff_all_satisfied_under_random_clicks() {
    for experiment in [ExperimentId::Solubility, ExperimentId::ElectricCircuit] {
        for seed in 0..SEEDS {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut bench = SimulationFacade::open(experiment).unwrap();
            let mut pool = ids(&bench);
            pool.push("unknown".to_string());

            for _ in 0..40 {
                let id = pool.choose(&mut rng).unwrap().clone();
                let before_progress = bench.progress();
                let before_log = bench.observations().len();
                let allowed = bench.can_apply(&id);

                match bench.apply(&id) {
                    Ok(_) => {
                        assert!(allowed);
                        assert_eq!(bench.progress().satisfied, before_progress.satisfied + 1);
                    }
                    Err(_) => {
                        assert!(!allowed);
                        assert_eq!(bench.progress(), before_progress);
                        assert_eq!(bench.observations().len(), before_log);
                    }
                }

                let progress = bench.progress();
                assert_eq!(
                    bench.is_complete(),
                    progress.satisfied == progress.total,
                    "seed {} broke the completion invariant",
                    seed
                );
            }
        }
    }
}

#[test]
fn test_completion_is_order_independent() {
    for seed in 0..SEEDS {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut bench = SimulationFacade::open(ExperimentId::Solubility).unwrap();
        bench.apply("water").unwrap();

        let mut materials = vec!["sugar", "salt", "sand", "oil"];
        materials.shuffle(&mut rng);
        for (i, id) in materials.iter().enumerate() {
            let applied = bench.apply(id).unwrap();
            assert_eq!(applied.complete, i == materials.len() - 1);
        }
        assert!(bench.is_complete());

        let logged: Vec<&str> = bench
            .observations()
            .iter()
            .filter_map(|o| match &o.kind {
                lab::ObservationKind::Step(id) => Some(id.as_str()),
                lab::ObservationKind::Completion => None,
            })
            .collect();
        let mut expected = vec!["water"];
        expected.extend(materials.iter().copied());
        assert_eq!(logged, expected);
    }
}

#[test]
fn test_applying_twice_matches_applying_once() {
    let mut once = SimulationFacade::open(ExperimentId::ElectricCircuit).unwrap();
    let mut twice = SimulationFacade::open(ExperimentId::ElectricCircuit).unwrap();
    for id in ["battery", "wire1", "bulb"] {
        once.apply(id).unwrap();
        twice.apply(id).unwrap();
        let _ = twice.apply(id);
    }
    assert_eq!(once.observations(), twice.observations());
    assert_eq!(once.satisfied(), twice.satisfied());
}

#[test]
fn test_reset_restores_initial_state_after_any_history() {
    for seed in 0..50 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut bench = SimulationFacade::open(ExperimentId::Solubility).unwrap();
        let pool = ids(&bench);
        for _ in 0..rng.gen_range(0..20) {
            let _ = bench.apply(pool.choose(&mut rng).unwrap());
        }
        bench.reset();
        assert!(bench.satisfied().is_empty());
        assert!(bench.observations().is_empty());
        assert!(!bench.is_complete());
        assert_eq!(bench.progress().satisfied, 0);
    }
}

#[test]
fn test_random_dag_reaches_completion_in_any_topological_order() {
    // Each step may depend on any earlier one, so definition order is a valid order
    for seed in 0..SEEDS {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let count = rng.gen_range(1..10);
        let steps: Vec<StepDefinition> = (0..count)
            .map(|i| {
                let mut step = StepDefinition::new(format!("s{}", i), format!("step {}", i));
                for j in 0..i {
                    if rng.gen_bool(0.3) {
                        step = step.requires(format!("s{}", j));
                    }
                }
                step
            })
            .collect();
        let mut seq = StepSequencer::new(steps, None).unwrap();

        // Repeatedly apply a random available step
        while !seq.is_complete() {
            let available: Vec<String> = seq.available().map(str::to_string).collect();
            assert!(!available.is_empty(), "seed {} got stuck", seed);
            let pick = available.choose(&mut rng).unwrap().clone();
            seq.apply(&pick).unwrap();
        }
        assert_eq!(seq.progress().satisfied, count);
        assert_eq!(seq.observations().len(), count);
    }
}
