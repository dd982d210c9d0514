pub mod manager;

pub use manager::*;

use serde::Serialize;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchState {
    KickoffPending,
    Live,
    GoalPause,
    FullTime,
}

impl MatchState {
    /// Only live play moves the clock and the bodies.
    pub fn is_live(&self) -> bool {
        *self == MatchState::Live
    }

    pub fn is_finished(&self) -> bool {
        *self == MatchState::FullTime
    }
}

impl Display for MatchState {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            MatchState::KickoffPending => write!(f, "Kickoff pending"),
            MatchState::Live => write!(f, "Live"),
            MatchState::GoalPause => write!(f, "Goal pause"),
            MatchState::FullTime => write!(f, "Full time"),
        }
    }
}
