//! Step definitions and the values the sequencer hands back to callers.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// One gated action in an experiment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepDefinition {
    /// Unique identifier within the experiment
    pub id: String,
    /// Steps that must be satisfied before this one is accepted
    #[serde(default)]
    pub prerequisites: Vec<String>,
    /// Feedback appended to the log when the step is applied
    pub observation: String,
}

impl StepDefinition {
    pub fn new(id: impl Into<String>, observation: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            prerequisites: Vec::new(),
            observation: observation.into(),
        }
    }

    /// Add a prerequisite (builder style).
    pub fn requires(mut self, id: impl Into<String>) -> Self {
        let id = id.into();
        if !self.prerequisites.contains(&id) {
            self.prerequisites.push(id);
        }
        self
    }
}

/// Where a step stands relative to the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// At least one prerequisite is still unsatisfied
    Locked,
    /// Can be applied right now
    Available,
    /// Already applied
    Satisfied,
}

/// Satisfied/total counter used by progress displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    pub satisfied: usize,
    pub total: usize,
}

impl Progress {
    pub fn new(satisfied: usize, total: usize) -> Self {
        Self { satisfied, total }
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.satisfied == self.total
    }

    /// Whole-number percentage, 0 for an empty experiment.
    pub fn percent(&self) -> u16 {
        if self.total == 0 {
            return 0;
        }
        ((self.satisfied * 100) / self.total) as u16
    }

    /// Fraction in 0.0..=1.0 for gauge widgets.
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.satisfied as f64 / self.total as f64
        }
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.satisfied, self.total)
    }
}

/// Successful application of a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    /// The step's observation text
    pub observation: String,
    /// Whether this application satisfied the last outstanding step
    pub complete: bool,
    pub progress: Progress,
}

/// Why a step was declined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    UnknownStep,
    AlreadySatisfied,
    MissingPrerequisite(String),
}

/// A step could not be applied; the sequencer state is untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("step `{step}` rejected: {reason}")]
pub struct Rejected {
    pub step: String,
    pub reason: RejectReason,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::UnknownStep => write!(f, "unknown step"),
            RejectReason::AlreadySatisfied => write!(f, "already satisfied"),
            RejectReason::MissingPrerequisite(id) => write!(f, "waiting on `{}`", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_ignores_duplicates() {
        let step = StepDefinition::new("sugar", "dissolved")
            .requires("water")
            .requires("water");
        assert_eq!(step.prerequisites, vec!["water".to_string()]);
    }

    #[test]
    fn test_progress_percent_and_display() {
        let progress = Progress::new(3, 4);
        assert_eq!(progress.percent(), 75);
        assert_eq!(progress.to_string(), "3/4");
        assert!(!progress.is_complete());
        assert!(Progress::new(4, 4).is_complete());
    }

    #[test]
    fn test_empty_progress_is_zero() {
        let progress = Progress::default();
        assert_eq!(progress.percent(), 0);
        assert_eq!(progress.ratio(), 0.0);
        assert!(!progress.is_complete());
    }

    #[test]
    fn test_rejected_message_names_missing_step() {
        let rejected = Rejected {
            step: "bulb".to_string(),
            reason: RejectReason::MissingPrerequisite("wire1".to_string()),
        };
        assert_eq!(
            rejected.to_string(),
            "step `bulb` rejected: waiting on `wire1`"
        );
    }

    #[test]
    fn test_definition_deserializes_without_prerequisites() {
        let json = r#"{"id":"water","observation":"Water poured."}"#;
        let step: StepDefinition = serde_json::from_str(json).unwrap();
        assert!(step.prerequisites.is_empty());
        assert_eq!(step.id, "water");
    }
}
