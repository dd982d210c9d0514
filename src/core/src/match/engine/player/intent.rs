use crate::utils::finite_or_zero;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Decoded input for the user-controlled player, supplied once per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerIntent {
    pub move_x: f32,
    pub move_y: f32,
    pub sprint: bool,
    pub pass_requested: bool,
    pub shoot_held: bool,
    pub tackle_requested: bool,
}

impl PlayerIntent {
    pub fn idle() -> Self {
        PlayerIntent::default()
    }

    pub fn moving(move_x: f32, move_y: f32) -> Self {
        PlayerIntent {
            move_x,
            move_y,
            ..PlayerIntent::default()
        }
    }

    /// Movement direction with non-finite components zeroed, each axis clamped
    /// to `[-1, 1]` and the vector rescaled to unit length when longer.
    pub fn movement(&self) -> Vector2<f32> {
        let raw = Vector2::new(
            finite_or_zero(self.move_x).clamp(-1.0, 1.0),
            finite_or_zero(self.move_y).clamp(-1.0, 1.0),
        );

        let length = raw.norm();
        if length > 1.0 { raw / length } else { raw }
    }
}
