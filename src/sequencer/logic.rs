//! Prerequisite-gated step acceptance.

use super::types::{Applied, Progress, RejectReason, Rejected, StepDefinition, StepStatus};
use super::validate::{validate_definitions, DefinitionError};
use crate::observation::ObservationLog;
use tracing::{debug, info};

/// Tracks which steps of one experiment have been satisfied.
///
/// Completion is derived from `satisfied` and the definition count, so it
/// cannot drift from the satisfied set.
#[derive(Debug, Clone)]
pub struct StepSequencer {
    steps: Vec<StepDefinition>,
    completion: Option<String>,
    satisfied: Vec<String>,
    observations: ObservationLog,
}

impl StepSequencer {
    /// Build a sequencer over validated definitions. `completion` is an
    /// optional extra observation logged when the last step is satisfied.
    pub fn new(
        steps: Vec<StepDefinition>,
        completion: Option<String>,
    ) -> Result<Self, DefinitionError> {
        validate_definitions(&steps)?;
        Ok(Self {
            satisfied: Vec::with_capacity(steps.len()),
            steps,
            completion,
            observations: ObservationLog::new(),
        })
    }

    fn definition(&self, id: &str) -> Option<&StepDefinition> {
        self.steps.iter().find(|s| s.id == id)
    }

    pub fn definitions(&self) -> &[StepDefinition] {
        &self.steps
    }

    pub fn is_satisfied(&self, id: &str) -> bool {
        self.satisfied.iter().any(|s| s == id)
    }

    /// Check every rule `apply` enforces without touching state.
    fn check(&self, id: &str) -> Result<&StepDefinition, RejectReason> {
        let step = self.definition(id).ok_or(RejectReason::UnknownStep)?;
        if self.is_satisfied(id) {
            return Err(RejectReason::AlreadySatisfied);
        }
        if let Some(missing) = step.prerequisites.iter().find(|p| !self.is_satisfied(p)) {
            return Err(RejectReason::MissingPrerequisite(missing.clone()));
        }
        Ok(step)
    }

    pub fn can_apply(&self, id: &str) -> bool {
        self.check(id).is_ok()
    }

    /// Apply a step. On rejection nothing changes.
    pub fn apply(&mut self, id: &str) -> Result<Applied, Rejected> {
        let observation = match self.check(id) {
            Ok(step) => step.observation.clone(),
            Err(reason) => {
                debug!(step = id, %reason, "step rejected");
                return Err(Rejected {
                    step: id.to_string(),
                    reason,
                });
            }
        };

        self.satisfied.push(id.to_string());
        self.observations.push_step(id, &observation);

        let complete = self.is_complete();
        if complete {
            if let Some(text) = &self.completion {
                self.observations.push_completion(text);
            }
            info!(step = id, total = self.steps.len(), "all steps satisfied");
        } else {
            debug!(step = id, progress = %self.progress(), "step applied");
        }

        Ok(Applied {
            observation,
            complete,
            progress: self.progress(),
        })
    }

    /// Forget everything applied so far.
    pub fn reset(&mut self) {
        self.satisfied.clear();
        self.observations.clear();
    }

    pub fn progress(&self) -> Progress {
        Progress::new(self.satisfied.len(), self.steps.len())
    }

    pub fn is_complete(&self) -> bool {
        self.satisfied.len() == self.steps.len()
    }

    /// Satisfied ids in application order.
    pub fn satisfied(&self) -> &[String] {
        &self.satisfied
    }

    pub fn observations(&self) -> &ObservationLog {
        &self.observations
    }

    /// None for ids outside this experiment.
    pub fn status(&self, id: &str) -> Option<StepStatus> {
        let step = self.definition(id)?;
        if self.is_satisfied(id) {
            Some(StepStatus::Satisfied)
        } else if step.prerequisites.iter().all(|p| self.is_satisfied(p)) {
            Some(StepStatus::Available)
        } else {
            Some(StepStatus::Locked)
        }
    }

    /// Ids that can be applied right now, in definition order.
    pub fn available(&self) -> impl Iterator<Item = &str> + '_ {
        self.steps
            .iter()
            .map(|s| s.id.as_str())
            .filter(move |id| self.can_apply(id))
    }
}
