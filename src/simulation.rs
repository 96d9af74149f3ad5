//! The interactive bench: one sequencer bound to one experiment.

use crate::error::LabError;
use crate::experiments::ExperimentId;
use crate::observation::ObservationLog;
use crate::sequencer::{Applied, Progress, Rejected, StepDefinition, StepSequencer, StepStatus};
use std::fmt;

/// Reported to the host after every accepted step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepProgress {
    /// Running count of satisfied steps, experiment not yet finished
    Advanced(usize),
    /// Every step satisfied; carries the experiment's step total
    Finished(usize),
}

type ProgressCallback = Box<dyn FnMut(StepProgress)>;

pub struct SimulationFacade {
    experiment: ExperimentId,
    sequencer: StepSequencer,
    on_progress: Option<ProgressCallback>,
}

impl fmt::Debug for SimulationFacade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimulationFacade")
            .field("experiment", &self.experiment)
            .field("progress", &self.sequencer.progress())
            .field("has_callback", &self.on_progress.is_some())
            .finish()
    }
}

impl SimulationFacade {
    /// Open a fresh bench for an experiment.
    pub fn open(experiment: ExperimentId) -> Result<Self, LabError> {
        let definition = experiment
            .definition()
            .ok_or(LabError::NoSimulation(experiment))?;
        let sequencer = StepSequencer::new(definition.steps, definition.completion)?;
        tracing::debug!(%experiment, steps = sequencer.definitions().len(), "bench opened");
        Ok(Self {
            experiment,
            sequencer,
            on_progress: None,
        })
    }

    /// Open by catalog number, as typed on the command line.
    pub fn open_number(number: u32) -> Result<Self, LabError> {
        let experiment =
            ExperimentId::from_number(number).ok_or(LabError::UnknownExperiment(number))?;
        Self::open(experiment)
    }

    /// Register the host callback, replacing any previous one.
    pub fn on_progress(&mut self, callback: impl FnMut(StepProgress) + 'static) {
        self.on_progress = Some(Box::new(callback));
    }

    pub fn experiment(&self) -> ExperimentId {
        self.experiment
    }

    pub fn apply(&mut self, step: &str) -> Result<Applied, Rejected> {
        let applied = self.sequencer.apply(step)?;
        if let Some(callback) = self.on_progress.as_mut() {
            let event = if applied.complete {
                StepProgress::Finished(applied.progress.total)
            } else {
                StepProgress::Advanced(applied.progress.satisfied)
            };
            callback(event);
        }
        Ok(applied)
    }

    pub fn reset(&mut self) {
        tracing::debug!(experiment = %self.experiment, "bench reset");
        self.sequencer.reset();
    }

    pub fn can_apply(&self, step: &str) -> bool {
        self.sequencer.can_apply(step)
    }

    pub fn status(&self, step: &str) -> Option<StepStatus> {
        self.sequencer.status(step)
    }

    pub fn steps(&self) -> &[StepDefinition] {
        self.sequencer.definitions()
    }

    pub fn satisfied(&self) -> &[String] {
        self.sequencer.satisfied()
    }

    pub fn is_satisfied(&self, step: &str) -> bool {
        self.sequencer.is_satisfied(step)
    }

    pub fn observations(&self) -> &ObservationLog {
        self.sequencer.observations()
    }

    pub fn is_complete(&self) -> bool {
        self.sequencer.is_complete()
    }

    pub fn progress(&self) -> Progress {
        self.sequencer.progress()
    }
}
