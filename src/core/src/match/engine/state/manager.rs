use crate::r#match::MatchState;
use log::debug;

/// What happened on the pitch that may move the match to another state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateTrigger {
    KickOff,
    Goal,
    PauseExpired,
    ClockExpired,
}

pub struct StateManager {
    current_state: MatchState,
}

impl Default for StateManager {
    fn default() -> Self {
        Self::new()
    }
}

impl StateManager {
    pub fn new() -> Self {
        StateManager {
            current_state: MatchState::KickoffPending,
        }
    }

    pub fn current(&self) -> MatchState {
        self.current_state
    }

    /// Applies `trigger`, returning the new state when it changed.
    pub fn transition(&mut self, trigger: StateTrigger) -> Option<MatchState> {
        let next_state = Self::get_next_state(self.current_state, trigger);

        if next_state == self.current_state {
            return None;
        }

        debug!("Match state: {} -> {}", self.current_state, next_state);

        self.current_state = next_state;
        Some(next_state)
    }

    fn get_next_state(current_state: MatchState, trigger: StateTrigger) -> MatchState {
        match (current_state, trigger) {
            (MatchState::KickoffPending, StateTrigger::KickOff) => MatchState::Live,
            (MatchState::Live, StateTrigger::Goal) => MatchState::GoalPause,
            (MatchState::Live, StateTrigger::ClockExpired) => MatchState::FullTime,
            (MatchState::GoalPause, StateTrigger::PauseExpired) => MatchState::Live,
            (MatchState::FullTime, _) => MatchState::FullTime,
            (state, _) => state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_manager_new() {
        let state_manager = StateManager::new();
        assert_eq!(state_manager.current(), MatchState::KickoffPending);
    }

    #[test]
    fn test_state_manager_lifecycle() {
        let mut state_manager = StateManager::new();
        assert_eq!(state_manager.transition(StateTrigger::KickOff), Some(MatchState::Live));
        assert_eq!(state_manager.transition(StateTrigger::Goal), Some(MatchState::GoalPause));
        assert_eq!(state_manager.transition(StateTrigger::PauseExpired), Some(MatchState::Live));
        assert_eq!(state_manager.transition(StateTrigger::ClockExpired), Some(MatchState::FullTime));
    }

    #[test]
    fn test_full_time_is_terminal() {
        let mut state_manager = StateManager::new();
        state_manager.transition(StateTrigger::KickOff);
        state_manager.transition(StateTrigger::ClockExpired);

        for trigger in [
            StateTrigger::KickOff,
            StateTrigger::Goal,
            StateTrigger::PauseExpired,
            StateTrigger::ClockExpired,
        ] {
            assert_eq!(state_manager.transition(trigger), None);
            assert_eq!(state_manager.current(), MatchState::FullTime);
        }
    }

    #[test]
    fn test_irrelevant_triggers_are_ignored() {
        let mut state_manager = StateManager::new();
        assert_eq!(state_manager.transition(StateTrigger::Goal), None);
        assert_eq!(state_manager.transition(StateTrigger::ClockExpired), None);
        assert_eq!(state_manager.current(), MatchState::KickoffPending);

        state_manager.transition(StateTrigger::KickOff);
        assert_eq!(state_manager.transition(StateTrigger::PauseExpired), None);
        assert_eq!(state_manager.current(), MatchState::Live);
    }
}
