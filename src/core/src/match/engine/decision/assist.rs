use crate::r#match::{Ball, EventCollection, MatchEvent, MatchField, MatchPlayer, PlayerSide};
use crate::utils::{angle, roll};
use nalgebra::Vector2;
use rand::rngs::StdRng;

const RELEASE_CHANCE: f32 = 0.02;
const RELEASE_POWER: f32 = 6.0;
/// Clearances aim this far in front of the opponent goal line.
const CLEARANCE_INSET: f32 = 50.0;

const CHASE_RANGE: f32 = 200.0;
const CHASE_INTENSITY: f32 = 0.7;

const RETURN_TOLERANCE: f32 = 30.0;
const RETURN_INTENSITY: f32 = 0.5;

/// Light-touch policy for the user's computer-controlled teammates: they
/// release the ball quickly, collect loose balls nearby and otherwise drift
/// back to their kickoff slot.
#[derive(Debug, Clone)]
pub struct AssistController {
    side: PlayerSide,
}

impl AssistController {
    pub fn new(side: PlayerSide) -> Self {
        AssistController { side }
    }

    pub fn update(
        &self,
        players: &mut [MatchPlayer],
        ball: &mut Ball,
        field: &MatchField,
        rng: &mut StdRng,
        events: &mut EventCollection,
    ) {
        let user = players
            .iter()
            .find(|p| p.is_user && p.side == self.side)
            .map(|p| (p.id, p.position));

        for player in players
            .iter_mut()
            .filter(|p| p.side == self.side && !p.is_user)
        {
            if player.has_ball(ball) {
                if roll(rng, RELEASE_CHANCE) {
                    self.release(player, user, ball, field, rng, events);
                }
                continue;
            }

            if ball.is_free() && player.distance_to(&ball.position) < CHASE_RANGE {
                let target = ball.position;
                player.move_towards(&target, CHASE_INTENSITY, false, ball);
                continue;
            }

            let home = player.start_position;
            if player.distance_to(&home) > RETURN_TOLERANCE {
                player.move_towards(&home, RETURN_INTENSITY, false, ball);
            }
        }
    }

    /// Either lays the ball off to the user or clears it upfield, evenly.
    fn release(
        &self,
        player: &MatchPlayer,
        user: Option<(u32, Vector2<f32>)>,
        ball: &mut Ball,
        field: &MatchField,
        rng: &mut StdRng,
        events: &mut EventCollection,
    ) {
        let (target, to_player_id) = match user {
            Some((user_id, user_position)) if roll(rng, 0.5) => (user_position, Some(user_id)),
            _ => (self.clearance_target(field), None),
        };

        ball.kick(angle(&player.position, &target), RELEASE_POWER);

        events.add(MatchEvent::PassMade {
            from_player_id: player.id,
            to_player_id,
        });
    }

    fn clearance_target(&self, field: &MatchField) -> Vector2<f32> {
        let x = match self.side {
            PlayerSide::Left => field.right() - CLEARANCE_INSET,
            PlayerSide::Right => field.left + CLEARANCE_INSET,
        };

        Vector2::new(x, field.center().y)
    }
}
