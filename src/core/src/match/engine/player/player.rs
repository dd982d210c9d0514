use crate::r#match::player::state::{ChargeShot, PlayerState};
use crate::r#match::{Ball, MatchField};
use crate::utils::distance;
use nalgebra::Vector2;
use serde::Serialize;
use std::fmt::*;

pub const PLAYER_FRICTION: f32 = 0.85;
pub const VELOCITY_SNAP_THRESHOLD: f32 = 0.1;
pub const RUNNING_THRESHOLD: f32 = 0.3;

pub const BASE_SPEED: f32 = 1.6;
pub const SPRINT_MULTIPLIER: f32 = 1.5;
pub const ACCELERATION: f32 = 0.5;
pub const DRIBBLE_SPEED_FACTOR: f32 = 0.65;
pub const CHARGING_SPEED_FACTOR: f32 = 0.4;

pub const BASE_STAMINA: f32 = 100.0;
pub const STAMINA_REGEN: f32 = 0.15;
pub const SPRINT_STAMINA_DRAIN: f32 = 0.5;

/// Extra reach on top of the touching distance when collecting a free ball.
pub const PICKUP_MAGNETISM: f32 = 12.0;
/// Ticks a dispossessed agent has to wait before it may collect the ball again.
pub const PICKUP_LOCKOUT_TICKS: u32 = 20;

const ANIMATION_FRAME_TICKS: u32 = 8;
const ANIMATION_FRAMES: u8 = 4;
const ACTION_HOLD_TICKS: u32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlayerSide {
    Left,
    Right,
}

impl PlayerSide {
    pub fn opponent(self) -> PlayerSide {
        match self {
            PlayerSide::Left => PlayerSide::Right,
            PlayerSide::Right => PlayerSide::Left,
        }
    }

    /// Facing of a player standing still at kickoff, towards the opponent goal.
    pub fn kickoff_facing(self) -> f32 {
        match self {
            PlayerSide::Left => 0.0,
            PlayerSide::Right => std::f32::consts::PI,
        }
    }
}

impl Display for PlayerSide {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            PlayerSide::Left => write!(f, "left"),
            PlayerSide::Right => write!(f, "right"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchPlayer {
    pub id: u32,
    pub side: PlayerSide,
    pub is_user: bool,

    pub position: Vector2<f32>,
    pub start_position: Vector2<f32>,
    pub velocity: Vector2<f32>,
    pub facing: f32,

    pub speed: f32,
    pub sprint_multiplier: f32,
    pub stamina: f32,
    pub max_stamina: f32,
    pub sprinting: bool,

    pub tackle_cooldown: u32,
    pub pickup_lockout: u32,

    pub state: PlayerState,
    pub charge: ChargeShot,

    pub animation_frame: u8,
    animation_timer: u32,
    action_ticks: u32,
}

impl MatchPlayer {
    pub fn new(id: u32, side: PlayerSide, is_user: bool, position: Vector2<f32>) -> Self {
        MatchPlayer {
            id,
            side,
            is_user,
            position,
            start_position: position,
            velocity: Vector2::zeros(),
            facing: side.kickoff_facing(),
            speed: BASE_SPEED,
            sprint_multiplier: SPRINT_MULTIPLIER,
            stamina: BASE_STAMINA,
            max_stamina: BASE_STAMINA,
            sprinting: false,
            tackle_cooldown: 0,
            pickup_lockout: 0,
            state: PlayerState::Idle,
            charge: ChargeShot::default(),
            animation_frame: 0,
            animation_timer: 0,
            action_ticks: 0,
        }
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        if speed.is_finite() && speed > 0.0 {
            self.speed = speed;
        }
        self
    }

    /// Sets the stamina ceiling and starts the player fully rested.
    pub fn with_max_stamina(mut self, max_stamina: f32) -> Self {
        if max_stamina.is_finite() && max_stamina > 0.0 {
            self.max_stamina = max_stamina;
        }
        self.stamina = self.max_stamina;
        self
    }

    pub fn update(&mut self, field: &MatchField, ball: &mut Ball) {
        if !self.sprinting {
            self.stamina = (self.stamina + STAMINA_REGEN).min(self.max_stamina);
        }
        self.sprinting = false;

        self.tackle_cooldown = self.tackle_cooldown.saturating_sub(1);
        self.pickup_lockout = self.pickup_lockout.saturating_sub(1);

        self.velocity *= PLAYER_FRICTION;
        if self.velocity.x.abs() < VELOCITY_SNAP_THRESHOLD {
            self.velocity.x = 0.0;
        }
        if self.velocity.y.abs() < VELOCITY_SNAP_THRESHOLD {
            self.velocity.y = 0.0;
        }

        self.move_to();
        self.charge.advance();

        self.position = field.clamp_player(self.position);

        self.update_state();
        self.update_animation();

        self.try_pickup(field, ball);
    }

    /// Applies one tick of acceleration towards `(dx, dy)`. The caller is
    /// expected to hand in a direction of length at most one.
    pub fn move_by(&mut self, dx: f32, dy: f32, sprint: bool, ball: &Ball) {
        let mut speed = self.speed;

        if self.has_ball(ball) {
            speed *= DRIBBLE_SPEED_FACTOR;
        }

        if self.charge.charging {
            speed *= CHARGING_SPEED_FACTOR;
        }

        self.sprinting = false;
        if sprint && self.stamina > 0.0 && !self.charge.charging {
            speed *= self.sprint_multiplier;
            self.stamina = (self.stamina - SPRINT_STAMINA_DRAIN).max(0.0);
            self.sprinting = true;
        }

        let dx = if dx.is_finite() { dx } else { 0.0 };
        let dy = if dy.is_finite() { dy } else { 0.0 };

        self.velocity += Vector2::new(dx, dy) * speed * ACCELERATION;
    }

    /// Moves towards `target` with `intensity` in `[0, 1]` of a full input.
    pub fn move_towards(&mut self, target: &Vector2<f32>, intensity: f32, sprint: bool, ball: &Ball) {
        let delta = target - self.position;
        let length = delta.norm();

        if length <= f32::EPSILON {
            return;
        }

        let direction = delta / length * intensity;
        self.move_by(direction.x, direction.y, sprint, ball);
    }

    /// Holds `state` for a short while, movement cannot overwrite it until the hold expires.
    pub fn set_action(&mut self, state: PlayerState) {
        self.state = state;
        self.action_ticks = if state.is_action() { ACTION_HOLD_TICKS } else { 0 };
    }

    pub fn reset_to(&mut self, position: Vector2<f32>) {
        self.position = position;
        self.start_position = position;
        self.velocity = Vector2::zeros();
        self.facing = self.side.kickoff_facing();
        self.sprinting = false;
        self.pickup_lockout = 0;
        self.state = PlayerState::Idle;
        self.action_ticks = 0;
        self.charge.cancel();
    }

    #[inline]
    pub fn has_ball(&self, ball: &Ball) -> bool {
        ball.owner_id() == Some(self.id)
    }

    pub fn distance_to(&self, point: &Vector2<f32>) -> f32 {
        distance(&self.position, point)
    }

    pub fn pickup_radius(field: &MatchField) -> f32 {
        field.player_radius + field.ball_radius + PICKUP_MAGNETISM
    }

    fn move_to(&mut self) {
        if !self.velocity.x.is_nan() {
            self.position.x += self.velocity.x;
        }

        if !self.velocity.y.is_nan() {
            self.position.y += self.velocity.y;
        }
    }

    fn update_state(&mut self) {
        let moving =
            self.velocity.x.abs() > RUNNING_THRESHOLD || self.velocity.y.abs() > RUNNING_THRESHOLD;

        if moving {
            self.facing = self.velocity.y.atan2(self.velocity.x);
        }

        if self.action_ticks > 0 {
            self.action_ticks -= 1;
            return;
        }

        self.state = if moving {
            PlayerState::Running
        } else {
            PlayerState::Idle
        };
    }

    fn update_animation(&mut self) {
        self.animation_timer += 1;

        if self.animation_timer >= ANIMATION_FRAME_TICKS {
            self.animation_timer = 0;
            self.animation_frame = (self.animation_frame + 1) % ANIMATION_FRAMES;
        }
    }

    fn try_pickup(&mut self, field: &MatchField, ball: &mut Ball) {
        if !ball.is_free() || self.pickup_lockout > 0 {
            return;
        }

        if self.distance_to(&ball.position) < Self::pickup_radius(field) {
            ball.attach(self.id);
        }
    }
}
