use crate::r#match::PlayerSide;
use log::debug;
use serde::Serialize;

/// Tick-local outcome the host may react to (sound, particles, shake).
/// Events never feed back into the simulation.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub enum MatchEvent {
    KickOff,
    GoalScored {
        side: PlayerSide,
        scorer_id: Option<u32>,
    },
    TackleSucceeded {
        tackler_id: u32,
        victim_id: u32,
    },
    ShotReleased {
        player_id: u32,
        charge_level: f32,
    },
    PassMade {
        from_player_id: u32,
        to_player_id: Option<u32>,
    },
    PlayResumed,
    FullTime,
}

#[derive(Debug, Default, Clone)]
pub struct EventCollection {
    events: Vec<MatchEvent>,
}

impl EventCollection {
    pub fn new() -> Self {
        EventCollection {
            events: Vec::with_capacity(4),
        }
    }

    pub fn add(&mut self, event: MatchEvent) {
        debug!("Match event: {:?}", event);
        self.events.push(event);
    }

    pub fn iter(&self) -> impl Iterator<Item = &MatchEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn into_vec(self) -> Vec<MatchEvent> {
        self.events
    }
}
