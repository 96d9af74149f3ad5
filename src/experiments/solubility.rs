//! Solubility in water: pour water, then add materials in any order.

use crate::sequencer::StepDefinition;

/// Step id of the gating step.
pub const WATER: &str = "water";

pub const WATER_OBSERVATION: &str = "Water poured into the beaker.";

pub const COMPLETION_MESSAGE: &str = "Every material has been tested.";

/// How a material behaves once it hits the water.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    /// Dissolves and disappears
    Dissolves,
    /// Does not dissolve, settles to the bottom
    Sinks,
    /// Does not dissolve, stays on top
    Floats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Material {
    Sugar,
    Salt,
    Sand,
    Oil,
}

impl Material {
    pub const ALL: [Material; 4] = [Material::Sugar, Material::Salt, Material::Sand, Material::Oil];

    pub fn id(&self) -> &'static str {
        match self {
            Material::Sugar => "sugar",
            Material::Salt => "salt",
            Material::Sand => "sand",
            Material::Oil => "oil",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.id() == id)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Material::Sugar => "Sugar",
            Material::Salt => "Salt",
            Material::Sand => "Sand",
            Material::Oil => "Oil",
        }
    }

    pub fn behavior(&self) -> Behavior {
        match self {
            Material::Sugar | Material::Salt => Behavior::Dissolves,
            Material::Sand => Behavior::Sinks,
            Material::Oil => Behavior::Floats,
        }
    }

    pub fn observation(&self) -> &'static str {
        match self {
            Material::Sugar => "Sugar dissolved in the water and disappeared!",
            Material::Salt => "Salt dissolved in the water and disappeared!",
            Material::Sand => "Sand did not dissolve and settled to the bottom.",
            Material::Oil => "Oil did not dissolve and stayed on top.",
        }
    }
}

/// Water first, then each material gated only on water.
pub fn steps() -> Vec<StepDefinition> {
    let mut steps = vec![StepDefinition::new(WATER, WATER_OBSERVATION)];
    steps.extend(
        Material::ALL
            .iter()
            .map(|m| StepDefinition::new(m.id(), m.observation()).requires(WATER)),
    );
    steps
}
