//! Guided walkthrough pager shown next to an experiment.
//!
//! Purely presentational: starting, pausing or paging never touches the
//! bench's sequencer.

use super::{ExperimentId, GuideStep};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkthroughEvent {
    /// Moved to the page at this index
    Advanced(usize),
    /// Already on the last page; the walkthrough has stopped
    Finished,
}

#[derive(Debug, Clone)]
pub struct Walkthrough {
    pages: &'static [GuideStep],
    pub current: usize,
    pub running: bool,
}

impl Walkthrough {
    pub fn new(experiment: ExperimentId) -> Self {
        Self {
            pages: experiment.guide(),
            current: 0,
            running: false,
        }
    }

    pub fn page(&self) -> Option<&GuideStep> {
        self.pages.get(self.current)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn toggle(&mut self) {
        self.running = !self.running;
    }

    /// Move to the following page. The last page stays on screen once the
    /// walkthrough has finished.
    pub fn next_page(&mut self) -> WalkthroughEvent {
        if self.current + 1 < self.pages.len() {
            self.current += 1;
            WalkthroughEvent::Advanced(self.current)
        } else {
            self.running = false;
            WalkthroughEvent::Finished
        }
    }

    /// A running walkthrough counts the current page as underway.
    pub fn progress_percent(&self) -> u16 {
        if self.pages.is_empty() {
            return 0;
        }
        let done = (self.current + usize::from(self.running)).min(self.pages.len());
        ((done * 100) / self.pages.len()) as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_walkthrough_is_idle() {
        let walk = Walkthrough::new(ExperimentId::Solubility);
        assert_eq!(walk.current, 0);
        assert!(!walk.running);
        assert_eq!(walk.progress_percent(), 0);
        assert_eq!(walk.page().unwrap().title, "Prepare the materials");
    }

    #[test]
    fn test_progress_counts_running_page() {
        let mut walk = Walkthrough::new(ExperimentId::Solubility);
        walk.start();
        assert_eq!(walk.progress_percent(), 25);
        walk.next_page();
        assert_eq!(walk.progress_percent(), 50);
        walk.pause();
        assert_eq!(walk.progress_percent(), 25);
    }

    #[test]
    fn test_next_finishes_on_last_page() {
        let mut walk = Walkthrough::new(ExperimentId::AcidBase);
        walk.start();
        assert_eq!(walk.next_page(), WalkthroughEvent::Advanced(1));
        assert_eq!(walk.next_page(), WalkthroughEvent::Finished);
        assert!(!walk.running);
        assert_eq!(walk.current, 1);
        assert_eq!(walk.progress_percent(), 50);
    }

    #[test]
    fn test_page_stays_visible_after_finishing() {
        for experiment in ExperimentId::ALL {
            let mut walk = Walkthrough::new(experiment);
            for _ in 0..walk.len() + 2 {
                walk.next_page();
                assert!(walk.page().is_some(), "{} ran past its guide", experiment);
            }
            assert_eq!(walk.current, walk.len() - 1);
        }
    }

    #[test]
    fn test_toggle() {
        let mut walk = Walkthrough::new(ExperimentId::ElectricCircuit);
        walk.toggle();
        assert!(walk.running);
        walk.toggle();
        assert!(!walk.running);
    }
}
