use crate::r#match::{MatchField, MatchPlayer};
use crate::utils::{direction, finite_or_zero};
use log::warn;
use nalgebra::Vector2;
use serde::Serialize;

/// Distance from the owner's centre to a held ball, along the owner's facing.
pub const HELD_BALL_OFFSET: f32 = 18.0;
/// Canonical rolling friction applied to a loose ball every tick.
pub const BALL_FRICTION: f32 = 0.98;
/// Below this speed on both axes a loose ball comes to rest.
pub const BALL_STOP_THRESHOLD: f32 = 0.1;
/// Fraction of the velocity kept when bouncing off a touchline or byline.
pub const WALL_RESTITUTION: f32 = 0.6;

#[derive(Debug, Clone, Serialize)]
pub struct Ball {
    pub start_position: Vector2<f32>,
    pub position: Vector2<f32>,
    pub velocity: Vector2<f32>,

    current_owner: Option<u32>,
    last_touch: Option<u32>,
    free: bool,
}

impl Ball {
    pub fn with_coord(start_position: Vector2<f32>) -> Self {
        Ball {
            start_position,
            position: start_position,
            velocity: Vector2::zeros(),
            current_owner: None,
            last_touch: None,
            free: true,
        }
    }

    pub fn reset(&mut self) {
        self.position = self.start_position;
        self.velocity = Vector2::zeros();
        self.current_owner = None;
        self.last_touch = None;
        self.free = true;
    }

    pub fn update(&mut self, field: &MatchField, players: &[MatchPlayer]) {
        match self.current_owner {
            Some(owner_id) => self.follow_owner(owner_id, players),
            None => {
                self.move_to();
                self.check_boundary_collision(field);
            }
        }
    }

    /// Releases the ball along `angle` with `power` units per tick.
    /// A kicked ball is neither owned nor free until it comes to rest.
    pub fn kick(&mut self, angle: f32, power: f32) {
        let angle = finite_or_zero(angle);
        let power = finite_or_zero(power).max(0.0);

        self.current_owner = None;
        self.free = false;
        self.velocity = direction(angle) * power;
    }

    pub fn attach(&mut self, player_id: u32) {
        self.current_owner = Some(player_id);
        self.last_touch = Some(player_id);
        self.free = false;
        self.velocity = Vector2::zeros();
    }

    /// Knocks the ball loose where it stands, e.g. after a tackle.
    pub fn drop_loose(&mut self) {
        self.current_owner = None;
        self.free = true;
        self.velocity = Vector2::zeros();
    }

    #[inline]
    pub fn owner_id(&self) -> Option<u32> {
        self.current_owner
    }

    /// Last player that had the ball at its feet, kept after a kick.
    #[inline]
    pub fn last_touch(&self) -> Option<u32> {
        self.last_touch
    }

    #[inline]
    pub fn is_owned(&self) -> bool {
        self.current_owner.is_some()
    }

    #[inline]
    pub fn is_free(&self) -> bool {
        self.free
    }

    pub fn speed(&self) -> f32 {
        self.velocity.norm()
    }

    fn follow_owner(&mut self, owner_id: u32, players: &[MatchPlayer]) {
        self.velocity = Vector2::zeros();

        match players.iter().find(|p| p.id == owner_id) {
            Some(owner) => {
                self.position = owner.position + direction(owner.facing) * HELD_BALL_OFFSET;
            }
            None => {
                warn!("ball owner {} is not on the pitch, dropping the ball", owner_id);
                self.drop_loose();
            }
        }
    }

    fn move_to(&mut self) {
        self.position += self.velocity;
        self.velocity *= BALL_FRICTION;

        if self.velocity.x.abs() < BALL_STOP_THRESHOLD && self.velocity.y.abs() < BALL_STOP_THRESHOLD {
            self.velocity = Vector2::zeros();
            self.free = true;
        }
    }

    fn check_boundary_collision(&mut self, field: &MatchField) {
        let r = field.ball_radius;

        if self.position.y < field.top + r {
            self.position.y = field.top + r;
            self.velocity.y *= -WALL_RESTITUTION;
        }

        if self.position.y > field.bottom() - r {
            self.position.y = field.bottom() - r;
            self.velocity.y *= -WALL_RESTITUTION;
        }

        // bylines only reflect outside the goal mouth
        if field.in_goal_mouth(self.position.y) {
            return;
        }

        if self.position.x < field.left + r {
            self.position.x = field.left + r;
            self.velocity.x *= -WALL_RESTITUTION;
        }

        if self.position.x > field.right() - r {
            self.position.x = field.right() - r;
            self.velocity.x *= -WALL_RESTITUTION;
        }
    }
}
