//! Experiment catalog.
//!
//! Each experiment has descriptive metadata and a guided walkthrough. Those
//! with an interactive bench also provide a step definition set for the
//! sequencer.

pub mod circuit;
pub mod solubility;
pub mod walkthrough;

use crate::sequencer::StepDefinition;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
}

impl Difficulty {
    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
        }
    }
}

/// One page of an experiment's guided walkthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuideStep {
    pub title: &'static str,
    pub description: &'static str,
    pub action: &'static str,
    pub question: &'static str,
}

/// Step definitions plus the optional message logged on completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperimentDefinition {
    pub steps: Vec<StepDefinition>,
    pub completion: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExperimentId {
    Solubility,
    AcidBase,
    ElectricCircuit,
}

const SOLUBILITY_GUIDE: [GuideStep; 4] = [
    GuideStep {
        title: "Prepare the materials",
        description: "Look over the bench: water, salt, sugar, sand, oil and the beakers are ready.",
        action: "Inspect the materials and take a beaker",
        question: "Which of these materials do you think will dissolve in water?",
    },
    GuideStep {
        title: "Pour the water",
        description: "Pour an equal amount of water into every beaker.",
        action: "Add 100ml of water to each of the 4 beakers",
        question: "Why do we put the same amount of water in each beaker?",
    },
    GuideStep {
        title: "Add the materials",
        description: "Add a different material to each beaker.",
        action: "Salt to beaker 1, sugar to beaker 2, sand to beaker 3, oil to beaker 4",
        question: "What do you notice while adding the materials?",
    },
    GuideStep {
        title: "Stir and observe",
        description: "Stir each beaker with the stirring rod.",
        action: "Stir every beaker separately and note the results",
        question: "Which materials dissolved and which did not? Why?",
    },
];

const ACID_BASE_GUIDE: [GuideStep; 2] = [
    GuideStep {
        title: "Prepare the cabbage juice",
        description: "Get the natural indicator made from red cabbage ready.",
        action: "Split the cabbage juice evenly between the test tubes",
        question: "Why is cabbage juice purple? How might that colour change?",
    },
    GuideStep {
        title: "Add the test liquids",
        description: "Add an acid and a base sample to different test tubes.",
        action: "Lemon juice to tube 1, soapy water to tube 2",
        question: "How can we tell whether these liquids are acids or bases?",
    },
];

const CIRCUIT_GUIDE: [GuideStep; 2] = [
    GuideStep {
        title: "Build the circuit",
        description: "Connect the battery, the first wire, the bulb and the second wire in order.",
        action: "Click each component in turn",
        question: "Why does the bulb stay dark until the last wire is connected?",
    },
    GuideStep {
        title: "Observe the bulb",
        description: "With the loop closed, current flows and the bulb lights up.",
        action: "Watch the wires and the bulb",
        question: "What would happen if one wire were removed?",
    },
];

impl ExperimentId {
    pub const ALL: [ExperimentId; 3] = [
        ExperimentId::Solubility,
        ExperimentId::AcidBase,
        ExperimentId::ElectricCircuit,
    ];

    /// Catalog number used in menus and on the command line
    pub fn number(&self) -> u32 {
        match self {
            ExperimentId::Solubility => 1,
            ExperimentId::AcidBase => 4,
            ExperimentId::ElectricCircuit => 6,
        }
    }

    pub fn from_number(number: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.number() == number)
    }

    pub fn title(&self) -> &'static str {
        match self {
            ExperimentId::Solubility => "Solubility in Water",
            ExperimentId::AcidBase => "Acid-Base Indicators",
            ExperimentId::ElectricCircuit => "Electric Circuit",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ExperimentId::Solubility => {
                "Discover how different materials behave when mixed with water"
            }
            ExperimentId::AcidBase => "Tell acids and bases apart with natural indicators",
            ExperimentId::ElectricCircuit => "Build a simple circuit and light a bulb",
        }
    }

    pub fn materials(&self) -> &'static [&'static str] {
        match self {
            ExperimentId::Solubility => &[
                "Water", "Salt", "Sugar", "Sand", "Oil", "Beaker", "Stirring rod",
            ],
            ExperimentId::AcidBase => &[
                "Cabbage juice",
                "Lemon juice",
                "Soapy water",
                "Water",
                "Test tubes",
            ],
            ExperimentId::ElectricCircuit => &["Battery", "Wires", "Bulb"],
        }
    }

    /// School grade the experiment is aimed at
    pub fn grade(&self) -> u8 {
        match self {
            ExperimentId::Solubility => 5,
            ExperimentId::AcidBase | ExperimentId::ElectricCircuit => 6,
        }
    }

    pub fn duration_minutes(&self) -> u32 {
        match self {
            ExperimentId::Solubility => 15,
            ExperimentId::AcidBase => 30,
            ExperimentId::ElectricCircuit => 25,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        match self {
            ExperimentId::Solubility => Difficulty::Easy,
            ExperimentId::AcidBase | ExperimentId::ElectricCircuit => Difficulty::Medium,
        }
    }

    pub fn guide(&self) -> &'static [GuideStep] {
        match self {
            ExperimentId::Solubility => &SOLUBILITY_GUIDE,
            ExperimentId::AcidBase => &ACID_BASE_GUIDE,
            ExperimentId::ElectricCircuit => &CIRCUIT_GUIDE,
        }
    }

    /// Step definitions for the interactive bench, if one has been built.
    pub fn definition(&self) -> Option<ExperimentDefinition> {
        match self {
            ExperimentId::Solubility => Some(ExperimentDefinition {
                steps: solubility::steps(),
                completion: Some(solubility::COMPLETION_MESSAGE.to_string()),
            }),
            ExperimentId::ElectricCircuit => Some(ExperimentDefinition {
                steps: circuit::steps(),
                completion: Some(circuit::COMPLETION_MESSAGE.to_string()),
            }),
            ExperimentId::AcidBase => None,
        }
    }

    pub fn has_simulation(&self) -> bool {
        self.definition().is_some()
    }
}

impl fmt::Display for ExperimentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.number(), self.title())
    }
}

/// Experiments for a school grade, in catalog order.
pub fn experiments_for_grade(grade: u8) -> Vec<ExperimentId> {
    ExperimentId::ALL
        .into_iter()
        .filter(|e| e.grade() == grade)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequencer::validate_definitions;

    #[test]
    fn test_catalog_numbers_round_trip() {
        for experiment in ExperimentId::ALL {
            assert_eq!(ExperimentId::from_number(experiment.number()), Some(experiment));
        }
        assert_eq!(ExperimentId::from_number(2), None);
    }

    #[test]
    fn test_all_definitions_validate() {
        for experiment in ExperimentId::ALL {
            if let Some(def) = experiment.definition() {
                assert!(
                    validate_definitions(&def.steps).is_ok(),
                    "{} has invalid steps",
                    experiment
                );
            }
        }
    }

    #[test]
    fn test_acid_base_has_no_simulation() {
        assert!(!ExperimentId::AcidBase.has_simulation());
        assert!(ExperimentId::Solubility.has_simulation());
        assert!(ExperimentId::ElectricCircuit.has_simulation());
    }

    #[test]
    fn test_every_experiment_has_a_guide() {
        for experiment in ExperimentId::ALL {
            assert!(!experiment.guide().is_empty());
            assert!(!experiment.materials().is_empty());
        }
    }

    #[test]
    fn test_experiments_for_grade() {
        assert_eq!(experiments_for_grade(5), vec![ExperimentId::Solubility]);
        assert_eq!(
            experiments_for_grade(6),
            vec![ExperimentId::AcidBase, ExperimentId::ElectricCircuit]
        );
        assert!(experiments_for_grade(8).is_empty());
    }

    #[test]
    fn test_display_includes_number() {
        assert_eq!(ExperimentId::ElectricCircuit.to_string(), "#6 Electric Circuit");
    }
}
