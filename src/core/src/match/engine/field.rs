use crate::r#match::PlayerSide;
use crate::utils::clamp;
use crate::MatchConfig;
use nalgebra::Vector2;
use serde::Serialize;

/// Distance from the goal line to the point the computer aims its dribble and shot at.
const ATTACK_TARGET_INSET: f32 = 30.0;

/// Goal line crossed by the ball.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum GoalSide {
    Left,
    Right,
}

impl GoalSide {
    /// The team credited when the ball crosses this goal line.
    pub fn scoring_side(self) -> PlayerSide {
        match self {
            GoalSide::Left => PlayerSide::Right,
            GoalSide::Right => PlayerSide::Left,
        }
    }
}

/// Static pitch geometry shared by every body in the match.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MatchField {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
    pub goal_height: f32,
    pub player_radius: f32,
    pub ball_radius: f32,
}

impl MatchField {
    pub fn from_config(config: &MatchConfig) -> Self {
        MatchField {
            left: config.pitch.x,
            top: config.pitch.y,
            width: config.pitch.width,
            height: config.pitch.height,
            goal_height: config.pitch.goal_height,
            player_radius: config.player_radius,
            ball_radius: config.ball_radius,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn center(&self) -> Vector2<f32> {
        Vector2::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    pub fn goal_top(&self) -> f32 {
        self.center().y - self.goal_height / 2.0
    }

    pub fn goal_bottom(&self) -> f32 {
        self.center().y + self.goal_height / 2.0
    }

    /// Open interval: a ball exactly on a post is outside the mouth.
    pub fn in_goal_mouth(&self, y: f32) -> bool {
        y > self.goal_top() && y < self.goal_bottom()
    }

    /// Left crossing is checked first so a single position never reports both goals.
    pub fn is_goal(&self, ball_position: &Vector2<f32>) -> Option<GoalSide> {
        if !self.in_goal_mouth(ball_position.y) {
            return None;
        }

        if ball_position.x < self.left {
            Some(GoalSide::Left)
        } else if ball_position.x > self.right() {
            Some(GoalSide::Right)
        } else {
            None
        }
    }

    /// Keeps an agent's whole body on the pitch.
    pub fn clamp_player(&self, position: Vector2<f32>) -> Vector2<f32> {
        let r = self.player_radius;

        Vector2::new(
            clamp(position.x, self.left + r, self.right() - r),
            clamp(position.y, self.top + r, self.bottom() - r),
        )
    }

    pub fn contains_player(&self, position: &Vector2<f32>) -> bool {
        let r = self.player_radius;

        position.x >= self.left + r
            && position.x <= self.right() - r
            && position.y >= self.top + r
            && position.y <= self.bottom() - r
    }

    /// Centre of the goal mouth `side` attacks.
    pub fn opponent_goal(&self, side: PlayerSide) -> Vector2<f32> {
        let x = match side {
            PlayerSide::Left => self.right(),
            PlayerSide::Right => self.left,
        };

        Vector2::new(x, self.center().y)
    }

    /// X coordinate the computer dribbles toward, slightly inside the goal line.
    pub fn attack_target_x(&self, side: PlayerSide) -> f32 {
        match side {
            PlayerSide::Left => self.right() - ATTACK_TARGET_INSET,
            PlayerSide::Right => self.left + ATTACK_TARGET_INSET,
        }
    }
}
