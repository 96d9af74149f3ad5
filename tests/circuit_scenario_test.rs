//! Integration test: electric circuit bench
//!
//! Walks the four-component circuit through the public bench API and checks
//! progress, gating, completion, and the completion observation.

use lab::experiments::circuit::{CircuitComponent, COMPLETION_MESSAGE};
use lab::{ExperimentId, Progress, SimulationFacade, StepStatus};

fn open_circuit() -> SimulationFacade {
    SimulationFacade::open(ExperimentId::ElectricCircuit).expect("circuit bench should open")
}

#[test]
fn test_connecting_in_order_completes_circuit() {
    let mut bench = open_circuit();

    let applied = bench.apply("battery").unwrap();
    assert_eq!(applied.progress, Progress::new(1, 4));
    assert!(!applied.complete);

    assert_eq!(bench.apply("wire1").unwrap().progress, Progress::new(2, 4));
    assert_eq!(bench.apply("bulb").unwrap().progress, Progress::new(3, 4));
    assert!(!bench.is_complete());

    let applied = bench.apply("wire2").unwrap();
    assert_eq!(applied.progress, Progress::new(4, 4));
    assert!(applied.complete);
    assert!(bench.is_complete());

    let last = bench.observations().last().unwrap();
    assert!(last.is_completion());
    assert_eq!(last.text, COMPLETION_MESSAGE);
}

#[test]
fn test_bulb_before_battery_is_rejected() {
    let mut bench = open_circuit();
    assert!(bench.apply("bulb").is_err());
    assert_eq!(bench.progress(), Progress::new(0, 4));
    assert!(bench.observations().is_empty());
    assert!(bench.satisfied().is_empty());
}

#[test]
fn test_each_component_unlocks_only_the_next() {
    let mut bench = open_circuit();
    for (i, component) in CircuitComponent::ALL.iter().enumerate() {
        for later in &CircuitComponent::ALL[i + 1..] {
            assert_eq!(
                bench.status(later.id()),
                Some(StepStatus::Locked),
                "{} should be locked before {}",
                later.id(),
                component.id()
            );
        }
        assert_eq!(bench.status(component.id()), Some(StepStatus::Available));
        bench.apply(component.id()).unwrap();
        assert_eq!(bench.status(component.id()), Some(StepStatus::Satisfied));
    }
}

#[test]
fn test_observations_follow_connection_order() {
    let mut bench = open_circuit();
    for component in CircuitComponent::ALL {
        bench.apply(component.id()).unwrap();
    }
    let texts = bench.observations().texts();
    assert_eq!(texts.len(), 5);
    for (text, component) in texts.iter().zip(CircuitComponent::ALL) {
        assert_eq!(*text, component.observation());
    }
}

#[test]
fn test_reconnecting_after_completion_changes_nothing() {
    let mut bench = open_circuit();
    for component in CircuitComponent::ALL {
        bench.apply(component.id()).unwrap();
    }
    let before = bench.observations().clone();
    for component in CircuitComponent::ALL {
        assert!(bench.apply(component.id()).is_err());
    }
    assert_eq!(bench.observations(), &before);
    assert!(bench.is_complete());
}

#[test]
fn test_reset_then_rebuild() {
    let mut bench = open_circuit();
    bench.apply("battery").unwrap();
    bench.apply("wire1").unwrap();
    bench.reset();

    assert_eq!(bench.progress(), Progress::new(0, 4));
    assert!(!bench.can_apply("bulb"));
    for component in CircuitComponent::ALL {
        bench.apply(component.id()).unwrap();
    }
    assert!(bench.is_complete());
    assert_eq!(bench.observations().len(), 5);
}
