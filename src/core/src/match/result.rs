use crate::r#match::{MatchEvent, MatchPlayer, MatchState, PlayerSide, PlayerState};
use nalgebra::Vector2;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Score {
    pub left: u8,
    pub right: u8,
}

impl Score {
    pub fn new() -> Self {
        Score::default()
    }

    pub fn increment(&mut self, side: PlayerSide) {
        match side {
            PlayerSide::Left => self.left = self.left.saturating_add(1),
            PlayerSide::Right => self.right = self.right.saturating_add(1),
        }
    }

    pub fn get(&self, side: PlayerSide) -> u8 {
        match side {
            PlayerSide::Left => self.left,
            PlayerSide::Right => self.right,
        }
    }

    /// Result as seen from `side`.
    pub fn outcome(&self, side: PlayerSide) -> MatchOutcome {
        let own = self.get(side);
        let other = self.get(side.opponent());

        if own > other {
            MatchOutcome::Win
        } else if own < other {
            MatchOutcome::Loss
        } else {
            MatchOutcome::Draw
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchOutcome {
    Win,
    Draw,
    Loss,
}

/// Read-only copy of an agent handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSnapshot {
    pub id: u32,
    pub side: PlayerSide,
    pub is_user: bool,
    pub position: Vector2<f32>,
    pub velocity: Vector2<f32>,
    pub facing: f32,
    pub stamina: f32,
    pub max_stamina: f32,
    pub tackle_cooldown: u32,
    pub state: PlayerState,
    pub animation_frame: u8,
    pub charging: bool,
    pub charge_level: f32,
}

impl From<&MatchPlayer> for PlayerSnapshot {
    fn from(player: &MatchPlayer) -> Self {
        PlayerSnapshot {
            id: player.id,
            side: player.side,
            is_user: player.is_user,
            position: player.position,
            velocity: player.velocity,
            facing: player.facing,
            stamina: player.stamina,
            max_stamina: player.max_stamina,
            tackle_cooldown: player.tackle_cooldown,
            state: player.state,
            animation_frame: player.animation_frame,
            charging: player.charge.charging,
            charge_level: player.charge.level,
        }
    }
}

/// Everything the host needs after one call to `tick`.
#[derive(Debug, Clone, Serialize)]
pub struct TickResult {
    pub score: Score,
    pub clock_remaining_ticks: u32,
    pub clock_remaining_secs: f32,
    pub state: MatchState,
    pub events: Vec<MatchEvent>,
}

/// Final result handed to the reward layer once the match is over.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MatchSummary {
    pub score: Score,
    pub outcome: MatchOutcome,
    pub finished: bool,
}

impl MatchSummary {
    pub fn new(score: Score, finished: bool) -> Self {
        MatchSummary {
            score,
            outcome: score.outcome(PlayerSide::Left),
            finished,
        }
    }
}
