//! Onboarding walkthrough shown on first visit.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, IntoStaticStr};

/// A step of the walkthrough, in display order.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(Serialize, Deserialize, AsRefStr, Display, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TutorialStep {
    /// Greeting.
    #[default]
    Welcome,
    /// What the map is for.
    What,
    /// Tour of the pickers.
    Ui,
    /// How to draw a route.
    Drawing,
    /// How to vote on overlapping routes.
    Rating,
    /// Finished or skipped.
    Done,
}

impl TutorialStep {
    const fn next(self) -> Self {
        match self {
            Self::Welcome => Self::What,
            Self::What => Self::Ui,
            Self::Ui => Self::Drawing,
            Self::Drawing => Self::Rating,
            Self::Rating | Self::Done => Self::Done,
        }
    }

    const fn previous(self) -> Self {
        match self {
            Self::Welcome | Self::What => Self::Welcome,
            Self::Ui => Self::What,
            Self::Drawing => Self::Ui,
            Self::Rating => Self::Drawing,
            Self::Done => Self::Done,
        }
    }
}

/// Input accepted by [`TutorialCoordinator::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TutorialEvent {
    /// Advances one step.
    Next,
    /// Goes back one step.
    Previous,
    /// Jumps to the end.
    Skip,
}

/// Linear walkthrough; [`TutorialStep::Done`] is final.
#[derive(Debug, Clone, Default)]
pub struct TutorialCoordinator {
    step: TutorialStep,
}

impl TutorialCoordinator {
    /// Starts at the welcome step.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current step.
    #[inline]
    pub fn step(&self) -> TutorialStep {
        self.step
    }

    /// Returns true once the walkthrough is over.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.step == TutorialStep::Done
    }

    /// Advances one step.
    pub fn advance(&mut self) -> TutorialStep {
        self.step = self.step.next();
        self.step
    }

    /// Goes back one step; stays put at the first and last step.
    pub fn previous(&mut self) -> TutorialStep {
        self.step = self.step.previous();
        self.step
    }

    /// Ends the walkthrough.
    pub fn skip(&mut self) -> TutorialStep {
        self.step = TutorialStep::Done;
        self.step
    }

    /// Applies an event.
    pub fn apply(&mut self, event: TutorialEvent) -> TutorialStep {
        match event {
            TutorialEvent::Next => self.advance(),
            TutorialEvent::Previous => self.previous(),
            TutorialEvent::Skip => self.skip(),
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn next_walks_every_step_in_order() {
        let mut tutorial = TutorialCoordinator::new();
        let visited: Vec<_> = std::iter::once(tutorial.step())
            .chain((0..5).map(|_| tutorial.advance()))
            .collect();
        assert_eq!(visited, TutorialStep::iter().collect::<Vec<_>>());
    }

    #[test]
    fn previous_is_a_no_op_at_welcome() {
        let mut tutorial = TutorialCoordinator::new();
        assert_eq!(tutorial.previous(), TutorialStep::Welcome);
        tutorial.advance();
        tutorial.advance();
        assert_eq!(tutorial.previous(), TutorialStep::What);
    }

    #[test]
    fn done_is_final() {
        let mut tutorial = TutorialCoordinator::new();
        tutorial.advance();
        assert_eq!(tutorial.apply(TutorialEvent::Skip), TutorialStep::Done);
        assert_eq!(tutorial.apply(TutorialEvent::Previous), TutorialStep::Done);
        assert_eq!(tutorial.apply(TutorialEvent::Next), TutorialStep::Done);
        assert!(tutorial.is_done());
    }
}
