//! Append-only log of observations shown beside an experiment.

/// What produced an observation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObservationKind {
    /// Emitted when the named step was applied
    Step(String),
    /// Emitted once, right after the last step completes the experiment
    Completion,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub text: String,
    pub kind: ObservationKind,
}

impl Observation {
    /// Renderers mark the completion entry with a distinct icon.
    pub fn is_completion(&self) -> bool {
        self.kind == ObservationKind::Completion
    }
}

/// Observations in the order they were emitted. Entries are only ever
/// appended; the log is cleared as a whole when the experiment resets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservationLog {
    entries: Vec<Observation>,
}

impl ObservationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_step(&mut self, step: &str, text: &str) {
        self.entries.push(Observation {
            text: text.to_string(),
            kind: ObservationKind::Step(step.to_string()),
        });
    }

    pub fn push_completion(&mut self, text: &str) {
        self.entries.push(Observation {
            text: text.to_string(),
            kind: ObservationKind::Completion,
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Observation> {
        self.entries.iter()
    }

    /// Just the texts, oldest first.
    pub fn texts(&self) -> Vec<&str> {
        self.entries.iter().map(|o| o.text.as_str()).collect()
    }

    pub fn last(&self) -> Option<&Observation> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_keeps_emission_order() {
        let mut log = ObservationLog::new();
        log.push_step("water", "Water poured.");
        log.push_step("sand", "Sand sank.");
        assert_eq!(log.texts(), vec!["Water poured.", "Sand sank."]);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_completion_entry_is_marked() {
        let mut log = ObservationLog::new();
        log.push_step("wire2", "Wire connected.");
        log.push_completion("Circuit complete!");
        let last = log.last().unwrap();
        assert!(last.is_completion());
        assert!(!log.iter().next().unwrap().is_completion());
    }

    #[test]
    fn test_clear_empties_log() {
        let mut log = ObservationLog::new();
        log.push_step("battery", "Battery connected.");
        log.clear();
        assert!(log.is_empty());
        assert!(log.last().is_none());
    }
}
