//! Step-gate sequencer: an ordered or partially ordered checklist where each
//! step unlocks once its prerequisites are satisfied.
//!
//! Both lab experiments are expressed as definition sets for this one type:
//! the circuit is a strict chain, solubility is a single gating step with
//! unordered dependents.

pub mod logic;
pub mod types;
pub mod validate;

pub use logic::StepSequencer;
pub use types::*;
pub use validate::{validate_definitions, DefinitionError};
