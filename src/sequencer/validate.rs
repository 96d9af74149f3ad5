//! Load-time checks for step definition sets.

use super::types::StepDefinition;
use std::collections::HashMap;
use thiserror::Error;

/// A malformed experiment definition. These are programmer errors and are
/// raised when a sequencer is built, never while steps are being applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    #[error("experiment defines no steps")]
    Empty,
    #[error("step `{0}` is defined more than once")]
    DuplicateStep(String),
    #[error("step `{step}` requires unknown step `{prerequisite}`")]
    UnknownPrerequisite { step: String, prerequisite: String },
    #[error("step `{0}` lists itself as a prerequisite")]
    SelfPrerequisite(String),
    #[error("prerequisite cycle: {}", .0.join(" -> "))]
    Cycle(Vec<String>),
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Validate a definition set: non-empty, unique ids, prerequisites that
/// resolve within the set, and no cycles.
pub fn validate_definitions(steps: &[StepDefinition]) -> Result<(), DefinitionError> {
    if steps.is_empty() {
        return Err(DefinitionError::Empty);
    }

    let mut index: HashMap<&str, usize> = HashMap::with_capacity(steps.len());
    for (i, step) in steps.iter().enumerate() {
        if index.insert(step.id.as_str(), i).is_some() {
            return Err(DefinitionError::DuplicateStep(step.id.clone()));
        }
    }

    for step in steps {
        for prerequisite in &step.prerequisites {
            if *prerequisite == step.id {
                return Err(DefinitionError::SelfPrerequisite(step.id.clone()));
            }
            if !index.contains_key(prerequisite.as_str()) {
                return Err(DefinitionError::UnknownPrerequisite {
                    step: step.id.clone(),
                    prerequisite: prerequisite.clone(),
                });
            }
        }
    }

    let mut marks = vec![Mark::Unvisited; steps.len()];
    let mut path = Vec::new();
    for start in 0..steps.len() {
        if marks[start] == Mark::Unvisited {
            visit(start, steps, &index, &mut marks, &mut path)?;
        }
    }
    Ok(())
}

fn visit(
    node: usize,
    steps: &[StepDefinition],
    index: &HashMap<&str, usize>,
    marks: &mut [Mark],
    path: &mut Vec<usize>,
) -> Result<(), DefinitionError> {
    marks[node] = Mark::InProgress;
    path.push(node);

    for prerequisite in &steps[node].prerequisites {
        let next = index[prerequisite.as_str()];
        match marks[next] {
            Mark::Done => {}
            Mark::Unvisited => visit(next, steps, index, marks, path)?,
            Mark::InProgress => {
                // `next` is on the current path, so the loop starts there
                let start = path.iter().position(|&n| n == next).unwrap_or(0);
                let mut cycle: Vec<String> =
                    path[start..].iter().map(|&n| steps[n].id.clone()).collect();
                cycle.push(steps[next].id.clone());
                return Err(DefinitionError::Cycle(cycle));
            }
        }
    }

    path.pop();
    marks[node] = Mark::Done;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> Vec<StepDefinition> {
        vec![
            StepDefinition::new("a", "A"),
            StepDefinition::new("b", "B").requires("a"),
            StepDefinition::new("c", "C").requires("b"),
        ]
    }

    #[test]
    fn test_valid_chain_passes() {
        assert_eq!(validate_definitions(&chain()), Ok(()));
    }

    #[test]
    fn test_diamond_passes() {
        let steps = vec![
            StepDefinition::new("root", "r"),
            StepDefinition::new("left", "l").requires("root"),
            StepDefinition::new("right", "r").requires("root"),
            StepDefinition::new("cap", "c").requires("left").requires("right"),
        ];
        assert!(validate_definitions(&steps).is_ok());
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!(validate_definitions(&[]), Err(DefinitionError::Empty));
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut steps = chain();
        steps.push(StepDefinition::new("b", "again"));
        assert_eq!(
            validate_definitions(&steps),
            Err(DefinitionError::DuplicateStep("b".to_string()))
        );
    }

    #[test]
    fn test_dangling_prerequisite_rejected() {
        let steps = vec![StepDefinition::new("sugar", "s").requires("water")];
        assert_eq!(
            validate_definitions(&steps),
            Err(DefinitionError::UnknownPrerequisite {
                step: "sugar".to_string(),
                prerequisite: "water".to_string(),
            })
        );
    }

    #[test]
    fn test_self_prerequisite_rejected() {
        let steps = vec![StepDefinition::new("loop", "l").requires("loop")];
        assert_eq!(
            validate_definitions(&steps),
            Err(DefinitionError::SelfPrerequisite("loop".to_string()))
        );
    }

    #[test]
    fn test_cycle_reports_path() {
        let steps = vec![
            StepDefinition::new("a", "A").requires("c"),
            StepDefinition::new("b", "B").requires("a"),
            StepDefinition::new("c", "C").requires("b"),
        ];
        let err = validate_definitions(&steps).unwrap_err();
        assert_eq!(
            err,
            DefinitionError::Cycle(vec![
                "a".to_string(),
                "c".to_string(),
                "b".to_string(),
                "a".to_string()
            ])
        );
        assert_eq!(err.to_string(), "prerequisite cycle: a -> c -> b -> a");
    }
}
