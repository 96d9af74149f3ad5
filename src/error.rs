//! Errors surfaced by the lab front-end plumbing.

use crate::experiments::ExperimentId;
use crate::sequencer::DefinitionError;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LabError {
    #[error("no simulation has been prepared for {0} yet")]
    NoSimulation(ExperimentId),
    #[error("unknown experiment number {0}")]
    UnknownExperiment(u32),
    #[error("invalid experiment definition: {0}")]
    Definition(#[from] DefinitionError),
    #[error("invalid config file: {0}")]
    Config(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}
