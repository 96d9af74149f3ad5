//! Lab - Virtual Science Laboratory
//!
//! Scripted classroom experiments driven by a step-gate sequencer: each
//! step unlocks once its prerequisites are satisfied, emits an observation,
//! and the experiment completes when every step is done.

pub mod build_info;
pub mod config;
pub mod error;
pub mod experiments;
pub mod logging;
pub mod observation;
pub mod sequencer;
pub mod session;
pub mod simulation;
pub mod ui;

pub use error::LabError;
pub use experiments::ExperimentId;
pub use observation::{Observation, ObservationKind, ObservationLog};
pub use sequencer::{
    Applied, Progress, RejectReason, Rejected, StepDefinition, StepSequencer, StepStatus,
};
pub use simulation::{SimulationFacade, StepProgress};
