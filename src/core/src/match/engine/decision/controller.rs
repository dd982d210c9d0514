use crate::config::{MAX_DIFFICULTY, MIN_DIFFICULTY};
use crate::r#match::{
    Ball, EventCollection, FormationSlots, MatchEvent, MatchField, MatchPlayer, PlayerSide,
    PlayerState, PICKUP_LOCKOUT_TICKS,
};
use crate::utils::{angle, clamp, distance, random_range, roll};
use log::debug;
use nalgebra::Vector2;
use rand::rngs::StdRng;

const BASE_REACTION_TICKS: f32 = 8.0;

const SHOOTING_RANGE: f32 = 200.0;
const SHOT_BASE_POWER: f32 = 8.0;
const SHOT_POWER_PER_DIFFICULTY: f32 = 2.0;
const SHOT_AIM_JITTER: f32 = 40.0;

const DRIBBLE_SPRINT_CHANCE_PER_DIFFICULTY: f32 = 0.3;
const CHASE_SPRINT_DISTANCE: f32 = 100.0;

const HOLD_TOLERANCE: f32 = 30.0;
const HOLD_INTENSITY: f32 = 0.5;

const TACKLE_REACH_RADII: f32 = 3.0;
const TACKLE_CHANCE_PER_DIFFICULTY: f32 = 0.15;
const MAX_TACKLE_CHANCE: f32 = 0.9;
pub const AI_TACKLE_COOLDOWN: u32 = 60;

/// What a computer-controlled agent settled on during a reaction tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decision {
    Shoot { angle: f32, power: f32 },
    Dribble { sprint: bool },
    Chase { sprint: bool },
    Hold { target: Vector2<f32> },
}

/// Drives every agent of one side. Persistent for the whole match, its only
/// memory between ticks is the reaction countdown.
#[derive(Debug, Clone)]
pub struct DecisionController {
    side: PlayerSide,
    difficulty: f32,
    reaction_interval: u32,
    reaction_countdown: u32,
}

impl DecisionController {
    pub fn new(side: PlayerSide, difficulty: f32) -> Self {
        let difficulty = if difficulty.is_finite() {
            clamp(difficulty, MIN_DIFFICULTY, MAX_DIFFICULTY)
        } else {
            MIN_DIFFICULTY
        };

        DecisionController {
            side,
            difficulty,
            reaction_interval: Self::reaction_interval_for(difficulty),
            reaction_countdown: 0,
        }
    }

    /// Ticks between two decisions: 8 at difficulty 1 halving per level down to 1.
    pub fn reaction_interval_for(difficulty: f32) -> u32 {
        let interval = (BASE_REACTION_TICKS / 2f32.powf(difficulty - 1.0)).ceil();

        if interval.is_finite() {
            interval.max(1.0) as u32
        } else {
            BASE_REACTION_TICKS as u32
        }
    }

    pub fn side(&self) -> PlayerSide {
        self.side
    }

    pub fn difficulty(&self) -> f32 {
        self.difficulty
    }

    pub fn reaction_interval(&self) -> u32 {
        self.reaction_interval
    }

    pub fn tackle_chance(&self) -> f32 {
        (TACKLE_CHANCE_PER_DIFFICULTY * self.difficulty).min(MAX_TACKLE_CHANCE)
    }

    pub fn update(
        &mut self,
        players: &mut [MatchPlayer],
        ball: &mut Ball,
        field: &MatchField,
        rng: &mut StdRng,
        events: &mut EventCollection,
    ) {
        if !self.ready() {
            return;
        }

        let squad: Vec<usize> = players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.side == self.side)
            .map(|(idx, _)| idx)
            .collect();

        let chaser = Self::nearest_to_ball(players, &squad, ball);

        for (slot, &idx) in squad.iter().enumerate() {
            let decision = self.decide(players, idx, slot, squad.len(), chaser, ball, field, rng);

            self.apply(&mut players[idx], decision, ball, field, events);

            self.try_tackle(players, idx, ball, field, rng, events);
        }
    }

    /// Counts down to the next reaction tick, acting on the tick the countdown hits zero.
    fn ready(&mut self) -> bool {
        if self.reaction_countdown > 0 {
            self.reaction_countdown -= 1;
            return false;
        }

        self.reaction_countdown = self.reaction_interval.saturating_sub(1);
        true
    }

    #[allow(clippy::too_many_arguments)]
    fn decide(
        &self,
        players: &[MatchPlayer],
        idx: usize,
        slot: usize,
        squad_size: usize,
        chaser: Option<usize>,
        ball: &Ball,
        field: &MatchField,
        rng: &mut StdRng,
    ) -> Decision {
        let player = &players[idx];

        if player.has_ball(ball) {
            let target_x = field.attack_target_x(self.side);

            if (player.position.x - target_x).abs() < SHOOTING_RANGE {
                let aim = Vector2::new(
                    target_x,
                    field.center().y + random_range(rng, -SHOT_AIM_JITTER, SHOT_AIM_JITTER),
                );

                return Decision::Shoot {
                    angle: angle(&player.position, &aim),
                    power: SHOT_BASE_POWER + self.difficulty * SHOT_POWER_PER_DIFFICULTY,
                };
            }

            return Decision::Dribble {
                sprint: roll(rng, DRIBBLE_SPRINT_CHANCE_PER_DIFFICULTY * self.difficulty),
            };
        }

        let opponent_has_ball = ball
            .owner_id()
            .and_then(|id| players.iter().find(|p| p.id == id))
            .is_some_and(|owner| owner.side != self.side);

        if (ball.is_free() || opponent_has_ball) && chaser == Some(idx) {
            return Decision::Chase {
                sprint: player.distance_to(&ball.position) > CHASE_SPRINT_DISTANCE,
            };
        }

        Decision::Hold {
            target: FormationSlots::holding(field, self.side, slot, squad_size),
        }
    }

    fn apply(
        &self,
        player: &mut MatchPlayer,
        decision: Decision,
        ball: &mut Ball,
        field: &MatchField,
        events: &mut EventCollection,
    ) {
        match decision {
            Decision::Shoot { angle, power } => {
                ball.kick(angle, power);
                player.set_action(PlayerState::Shooting);

                events.add(MatchEvent::ShotReleased {
                    player_id: player.id,
                    charge_level: 0.0,
                });
            }
            Decision::Dribble { sprint } => {
                let target = Vector2::new(field.attack_target_x(self.side), field.center().y);
                player.move_towards(&target, 1.0, sprint, ball);
            }
            Decision::Chase { sprint } => {
                let target = ball.position;
                player.move_towards(&target, 1.0, sprint, ball);
            }
            Decision::Hold { target } => {
                if player.distance_to(&target) > HOLD_TOLERANCE {
                    player.move_towards(&target, HOLD_INTENSITY, false, ball);
                }
            }
        }
    }

    fn try_tackle(
        &self,
        players: &mut [MatchPlayer],
        idx: usize,
        ball: &mut Ball,
        field: &MatchField,
        rng: &mut StdRng,
        events: &mut EventCollection,
    ) {
        if players[idx].tackle_cooldown > 0 {
            return;
        }

        let Some(victim_idx) = ball
            .owner_id()
            .and_then(|id| players.iter().position(|p| p.id == id))
        else {
            return;
        };

        if players[victim_idx].side == self.side {
            return;
        }

        let reach = field.player_radius * TACKLE_REACH_RADII;
        if distance(&players[idx].position, &players[victim_idx].position) >= reach {
            return;
        }

        players[idx].tackle_cooldown = AI_TACKLE_COOLDOWN;
        players[idx].set_action(PlayerState::Tackling);

        if !roll(rng, self.tackle_chance()) {
            return;
        }

        let tackler_id = players[idx].id;
        let victim_id = players[victim_idx].id;

        ball.drop_loose();
        players[victim_idx].pickup_lockout = PICKUP_LOCKOUT_TICKS;

        debug!("{} side player {} tackled player {}", self.side, tackler_id, victim_id);

        events.add(MatchEvent::TackleSucceeded {
            tackler_id,
            victim_id,
        });
    }

    fn nearest_to_ball(players: &[MatchPlayer], squad: &[usize], ball: &Ball) -> Option<usize> {
        squad
            .iter()
            .map(|&idx| (idx, players[idx].distance_to(&ball.position)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(idx, _)| idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MatchConfig;
    use rand::SeedableRng;

    fn field() -> MatchField {
        MatchField::from_config(&MatchConfig::default())
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn squad(positions: &[(PlayerSide, f32, f32)]) -> Vec<MatchPlayer> {
        positions
            .iter()
            .enumerate()
            .map(|(id, (side, x, y))| MatchPlayer::new(id as u32, *side, false, Vector2::new(*x, *y)))
            .collect()
    }

    #[test]
    fn test_reaction_interval() {
        assert_eq!(DecisionController::reaction_interval_for(1.0), 8);
        assert_eq!(DecisionController::reaction_interval_for(2.0), 4);
        assert_eq!(DecisionController::reaction_interval_for(3.0), 2);
        assert_eq!(DecisionController::reaction_interval_for(4.0), 1);
        assert_eq!(DecisionController::reaction_interval_for(2.5), 3);
    }

    #[test]
    fn test_difficulty_is_clamped() {
        assert_eq!(DecisionController::new(PlayerSide::Right, 9.0).difficulty(), 4.0);
        assert_eq!(DecisionController::new(PlayerSide::Right, 0.0).difficulty(), 1.0);
        assert_eq!(DecisionController::new(PlayerSide::Right, f32::NAN).difficulty(), 1.0);
    }

    #[test]
    fn test_reaction_cadence() {
        let mut slow = DecisionController::new(PlayerSide::Right, 1.0);
        let acted: Vec<bool> = (0..17).map(|_| slow.ready()).collect();
        let ticks: Vec<usize> = acted
            .iter()
            .enumerate()
            .filter(|(_, a)| **a)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(ticks, vec![0, 8, 16]);

        let mut fast = DecisionController::new(PlayerSide::Right, 4.0);
        assert!((0..10).all(|_| fast.ready()));
    }

    #[test]
    fn test_tackle_chance_scales_and_caps() {
        assert!((DecisionController::new(PlayerSide::Right, 1.0).tackle_chance() - 0.15).abs() < 1e-6);
        assert!((DecisionController::new(PlayerSide::Right, 4.0).tackle_chance() - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_carrier_shoots_in_range() {
        let field = field();
        let mut players = squad(&[(PlayerSide::Right, 200.0, 270.0)]);
        let mut ball = Ball::with_coord(field.center());
        ball.attach(0);

        let mut controller = DecisionController::new(PlayerSide::Right, 2.0);
        let mut events = EventCollection::new();
        controller.update(&mut players, &mut ball, &field, &mut rng(), &mut events);

        assert!(!ball.is_owned());
        assert!(ball.velocity.x < 0.0);
        assert!((ball.speed() - 12.0).abs() < 1e-4);
        assert_eq!(players[0].state, PlayerState::Shooting);
        assert!(matches!(
            events.iter().next(),
            Some(MatchEvent::ShotReleased { player_id: 0, .. })
        ));
    }

    #[test]
    fn test_carrier_dribbles_towards_goal() {
        let field = field();
        let mut players = squad(&[(PlayerSide::Right, 700.0, 150.0)]);
        let mut ball = Ball::with_coord(field.center());
        ball.attach(0);

        let mut controller = DecisionController::new(PlayerSide::Right, 1.0);
        controller.update(&mut players, &mut ball, &field, &mut rng(), &mut EventCollection::new());

        assert_eq!(ball.owner_id(), Some(0));
        assert!(players[0].velocity.x < 0.0);
        assert!(players[0].velocity.y > 0.0);
    }

    #[test]
    fn test_only_nearest_chases_free_ball() {
        let field = field();
        let mut players = squad(&[
            (PlayerSide::Right, 500.0, 270.0),
            (PlayerSide::Right, 800.0, 100.0),
            (PlayerSide::Left, 100.0, 100.0),
        ]);
        let mut ball = Ball::with_coord(Vector2::new(400.0, 270.0));

        let mut controller = DecisionController::new(PlayerSide::Right, 4.0);
        controller.update(&mut players, &mut ball, &field, &mut rng(), &mut EventCollection::new());

        // chaser heads straight for the ball
        assert!(players[0].velocity.x < 0.0);
        assert_eq!(players[0].velocity.y, 0.0);

        // the other one walks to its holding slot at (606, 408)
        assert!(players[1].velocity.x < 0.0);
        assert!(players[1].velocity.y > 0.0);

        assert_eq!(players[2].velocity, Vector2::zeros());
    }

    #[test]
    fn test_hold_when_teammate_has_ball() {
        let field = field();
        let slot = FormationSlots::holding(&field, PlayerSide::Right, 1, 2);
        let mut players = squad(&[
            (PlayerSide::Right, 700.0, 150.0),
            (PlayerSide::Right, slot.x, slot.y),
        ]);
        let mut ball = Ball::with_coord(field.center());
        ball.attach(0);

        let mut controller = DecisionController::new(PlayerSide::Right, 4.0);
        controller.update(&mut players, &mut ball, &field, &mut rng(), &mut EventCollection::new());

        assert_eq!(players[1].velocity, Vector2::zeros());
    }

    #[test]
    fn test_holds_slot_while_ball_in_flight() {
        let field = field();
        let slot = FormationSlots::holding(&field, PlayerSide::Right, 0, 1);
        let mut players = squad(&[(PlayerSide::Right, slot.x, slot.y)]);
        let mut ball = Ball::with_coord(Vector2::new(400.0, 270.0));
        ball.kick(0.0, 10.0);

        let mut controller = DecisionController::new(PlayerSide::Right, 4.0);
        controller.update(&mut players, &mut ball, &field, &mut rng(), &mut EventCollection::new());

        assert!(!ball.is_free());
        assert_eq!(players[0].velocity, Vector2::zeros());
    }

    #[test]
    fn test_chases_opponent_carrier() {
        let field = field();
        let mut players = squad(&[
            (PlayerSide::Left, 400.0, 270.0),
            (PlayerSide::Right, 600.0, 270.0),
        ]);
        let mut ball = Ball::with_coord(Vector2::new(418.0, 270.0));
        ball.attach(0);

        let mut controller = DecisionController::new(PlayerSide::Right, 4.0);
        controller.update(&mut players, &mut ball, &field, &mut rng(), &mut EventCollection::new());

        assert!(players[1].velocity.x < 0.0);
        assert_eq!(players[1].velocity.y, 0.0);
    }

    #[test]
    fn test_tackle_sets_cooldown_either_way() {
        let field = field();
        let mut successes = 0;

        for seed in 0..50 {
            let mut players = squad(&[
                (PlayerSide::Left, 400.0, 270.0),
                (PlayerSide::Right, 420.0, 270.0),
            ]);
            let mut ball = Ball::with_coord(field.center());
            ball.attach(0);

            let mut controller = DecisionController::new(PlayerSide::Right, 4.0);
            let mut events = EventCollection::new();
            let mut rng = StdRng::seed_from_u64(seed);
            controller.update(&mut players, &mut ball, &field, &mut rng, &mut events);

            assert_eq!(players[1].tackle_cooldown, AI_TACKLE_COOLDOWN);
            assert_eq!(players[1].state, PlayerState::Tackling);

            if ball.is_free() {
                successes += 1;
                assert_eq!(ball.owner_id(), None);
                assert_eq!(players[0].pickup_lockout, PICKUP_LOCKOUT_TICKS);
                assert!(events.iter().any(|e| *e
                    == MatchEvent::TackleSucceeded {
                        tackler_id: 1,
                        victim_id: 0
                    }));
            } else {
                assert_eq!(ball.owner_id(), Some(0));
            }
        }

        assert!(successes > 0 && successes < 50);
    }

    #[test]
    fn test_no_tackle_out_of_reach_or_on_cooldown() {
        let field = field();
        let mut players = squad(&[
            (PlayerSide::Left, 400.0, 270.0),
            (PlayerSide::Right, 460.0, 270.0),
            (PlayerSide::Right, 410.0, 270.0),
        ]);
        players[2].tackle_cooldown = 5;

        let mut ball = Ball::with_coord(field.center());
        ball.attach(0);

        let mut controller = DecisionController::new(PlayerSide::Right, 4.0);
        controller.update(&mut players, &mut ball, &field, &mut rng(), &mut EventCollection::new());

        assert_eq!(ball.owner_id(), Some(0));
        assert_eq!(players[1].tackle_cooldown, 0);
        assert_eq!(players[2].tackle_cooldown, 5);
    }
}
