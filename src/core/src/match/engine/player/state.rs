use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Kick power added on top of the base power at full charge.
pub const MAX_CHARGE_BONUS: f32 = 12.0;
/// Charge gained per tick, a full charge takes 50 ticks.
pub const DEFAULT_CHARGE_RATE: f32 = 0.02;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlayerState {
    Idle,
    Running,
    Shooting,
    Tackling,
}

impl PlayerState {
    /// Actions hold their animation for a few ticks before movement takes over again.
    pub fn is_action(&self) -> bool {
        matches!(self, PlayerState::Shooting | PlayerState::Tackling)
    }
}

impl Display for PlayerState {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            PlayerState::Idle => write!(f, "Idle"),
            PlayerState::Running => write!(f, "Running"),
            PlayerState::Shooting => write!(f, "Shooting"),
            PlayerState::Tackling => write!(f, "Tackling"),
        }
    }
}

/// Hold-to-charge shot accumulator. `level` stays in `[0, 1]` and drops to
/// zero on every tick the shot is not being held.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChargeShot {
    pub charging: bool,
    pub level: f32,
    pub rate: f32,
    ticks: u32,
}

impl Default for ChargeShot {
    fn default() -> Self {
        ChargeShot::new(DEFAULT_CHARGE_RATE)
    }
}

impl ChargeShot {
    pub fn new(rate: f32) -> Self {
        ChargeShot {
            charging: false,
            level: 0.0,
            rate,
            ticks: 0,
        }
    }

    pub fn start(&mut self) {
        self.charging = true;
    }

    pub fn advance(&mut self) {
        if !self.charging {
            self.ticks = 0;
            self.level = 0.0;
            return;
        }

        self.ticks = self.ticks.saturating_add(1);

        // derived from the tick count so the window lands on exactly 1.0
        self.level = if self.ticks >= self.window_ticks() {
            1.0
        } else {
            (self.ticks as f32 * self.rate).clamp(0.0, 1.0)
        };
    }

    /// Stops charging and hands back the accumulated level.
    pub fn release(&mut self) -> f32 {
        let level = self.level.clamp(0.0, 1.0);

        self.cancel();

        level
    }

    pub fn cancel(&mut self) {
        self.charging = false;
        self.level = 0.0;
        self.ticks = 0;
    }

    pub fn is_full(&self) -> bool {
        self.level >= 1.0
    }

    /// Ticks of continuous charging that are guaranteed to reach a full charge.
    pub fn window_ticks(&self) -> u32 {
        if self.rate <= 0.0 {
            return u32::MAX;
        }

        (1.0 / self.rate).ceil() as u32
    }

    pub fn power(base_power: f32, level: f32) -> f32 {
        base_power + level.clamp(0.0, 1.0) * MAX_CHARGE_BONUS
    }
}
