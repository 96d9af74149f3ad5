//! Electric circuit: battery, wire, bulb, wire, connected strictly in order.

use crate::sequencer::StepDefinition;

/// Logged after the last component closes the loop.
pub const COMPLETION_MESSAGE: &str = "Circuit complete! The bulb is lit!";

/// Visual family of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    Battery,
    Wire,
    Bulb,
}

impl ComponentKind {
    pub fn label(&self) -> &'static str {
        match self {
            ComponentKind::Battery => "Battery",
            ComponentKind::Wire => "Wire",
            ComponentKind::Bulb => "Bulb",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CircuitComponent {
    Battery,
    Wire1,
    Bulb,
    Wire2,
}

impl CircuitComponent {
    /// Connection order
    pub const ALL: [CircuitComponent; 4] = [
        CircuitComponent::Battery,
        CircuitComponent::Wire1,
        CircuitComponent::Bulb,
        CircuitComponent::Wire2,
    ];

    /// Step id shared by the controls and the drawn component
    pub fn id(&self) -> &'static str {
        match self {
            CircuitComponent::Battery => "battery",
            CircuitComponent::Wire1 => "wire1",
            CircuitComponent::Bulb => "bulb",
            CircuitComponent::Wire2 => "wire2",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }

    pub fn kind(&self) -> ComponentKind {
        match self {
            CircuitComponent::Battery => ComponentKind::Battery,
            CircuitComponent::Wire1 | CircuitComponent::Wire2 => ComponentKind::Wire,
            CircuitComponent::Bulb => ComponentKind::Bulb,
        }
    }

    /// Button label before the component is connected
    pub fn action_label(&self) -> &'static str {
        match self {
            CircuitComponent::Battery => "Connect the battery",
            CircuitComponent::Wire1 => "Connect wire 1",
            CircuitComponent::Bulb => "Connect the bulb",
            CircuitComponent::Wire2 => "Connect wire 2",
        }
    }

    /// Button label once connected
    pub fn connected_label(&self) -> &'static str {
        match self {
            CircuitComponent::Battery => "Battery connected",
            CircuitComponent::Wire1 => "Wire 1 connected",
            CircuitComponent::Bulb => "Bulb connected",
            CircuitComponent::Wire2 => "Wire 2 connected",
        }
    }

    pub fn observation(&self) -> &'static str {
        match self.kind() {
            ComponentKind::Battery => "The battery is connected. The power source is ready!",
            ComponentKind::Wire => "Wire connected. The path for the current is forming.",
            ComponentKind::Bulb => "The bulb is connected to the circuit.",
        }
    }

    /// The component that must be connected first.
    pub fn predecessor(&self) -> Option<CircuitComponent> {
        match self {
            CircuitComponent::Battery => None,
            CircuitComponent::Wire1 => Some(CircuitComponent::Battery),
            CircuitComponent::Bulb => Some(CircuitComponent::Wire1),
            CircuitComponent::Wire2 => Some(CircuitComponent::Bulb),
        }
    }
}

/// Linear chain: each component requires the one before it.
pub fn steps() -> Vec<StepDefinition> {
    CircuitComponent::ALL
        .iter()
        .map(|component| {
            let step = StepDefinition::new(component.id(), component.observation());
            match component.predecessor() {
                Some(prev) => step.requires(prev.id()),
                None => step,
            }
        })
        .collect()
}
