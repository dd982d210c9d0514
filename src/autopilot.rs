use kick_core::{FootballMatch, PlayerIntent, Vector2};

const SHOOTING_DISTANCE: f32 = 220.0;
const TACKLE_DISTANCE: f32 = 50.0;
const SPRINT_DISTANCE: f32 = 150.0;
const SPRINT_STAMINA_RESERVE: f32 = 0.3;

/// Scripted stand-in for the input layer: chases the ball, carries it
/// towards the opponent goal and fires a fully charged shot once in range.
#[derive(Debug, Default)]
pub struct Autopilot;

impl Autopilot {
    pub fn new() -> Self {
        Autopilot
    }

    pub fn intent(&self, football_match: &FootballMatch) -> PlayerIntent {
        if !football_match.state().is_live() {
            return PlayerIntent::idle();
        }

        let user = football_match.user_player();
        let ball = football_match.ball();
        let can_sprint = user.stamina > user.max_stamina * SPRINT_STAMINA_RESERVE;

        if user.has_ball(ball) {
            let to_goal = football_match.field().opponent_goal(user.side) - user.position;

            if to_goal.norm() < SHOOTING_DISTANCE {
                // hold until full, then let go on the following tick
                return PlayerIntent {
                    shoot_held: !user.charge.is_full(),
                    ..towards(to_goal)
                };
            }

            return PlayerIntent {
                sprint: can_sprint,
                ..towards(to_goal)
            };
        }

        let to_ball = ball.position - user.position;
        let opponent_carries = ball
            .owner_id()
            .and_then(|id| football_match.players().iter().find(|p| p.id == id))
            .is_some_and(|carrier| carrier.side != user.side);

        PlayerIntent {
            sprint: can_sprint && to_ball.norm() > SPRINT_DISTANCE,
            tackle_requested: opponent_carries && to_ball.norm() < TACKLE_DISTANCE,
            ..towards(to_ball)
        }
    }
}

fn towards(delta: Vector2<f32>) -> PlayerIntent {
    let length = delta.norm();

    if length <= f32::EPSILON {
        return PlayerIntent::idle();
    }

    PlayerIntent::moving(delta.x / length, delta.y / length)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kick_core::MatchConfig;

    fn started() -> FootballMatch {
        let mut football_match = FootballMatch::new(MatchConfig {
            seed: Some(5),
            ..MatchConfig::default()
        })
        .unwrap();
        football_match.tick(&PlayerIntent::idle());
        football_match
    }

    #[test]
    fn test_chases_loose_ball() {
        let football_match = started();
        let intent = Autopilot::new().intent(&football_match);

        // user kicks off right of the centre spot
        assert!(intent.move_x < 0.0);
        assert!(!intent.shoot_held);
        assert!(!intent.tackle_requested);
    }

    #[test]
    fn test_plays_whole_match() {
        let mut football_match = started();
        let autopilot = Autopilot::new();

        while !football_match.is_finished() {
            let intent = autopilot.intent(&football_match);
            football_match.tick(&intent);
        }

        assert!(football_match.summary().finished);
    }

    #[test]
    fn test_idle_before_kickoff() {
        let football_match = FootballMatch::new(MatchConfig::default()).unwrap();

        assert_eq!(Autopilot::new().intent(&football_match), PlayerIntent::idle());
    }

    #[test]
    fn test_towards_zero_is_idle() {
        assert_eq!(towards(Vector2::zeros()), PlayerIntent::idle());
        assert_eq!(towards(Vector2::new(3.0, 4.0)), PlayerIntent::moving(0.6, 0.8));
    }
}
