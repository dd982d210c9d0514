use crate::config::{ConfigError, MatchConfig};
use crate::r#match::{
    AssistController, Ball, ChargeShot, DecisionController, EventCollection, FormationSlots,
    MatchEvent, MatchField, MatchPlayer, MatchState, MatchSummary, PlayerIntent, PlayerSide,
    PlayerSnapshot, PlayerState, Score, StateManager, StateTrigger, TickResult, BASE_SPEED,
    BASE_STAMINA, PICKUP_LOCKOUT_TICKS,
};
use crate::utils::{angle, clamp, random_range, roll};
use itertools::Itertools;
use log::{debug, info, warn};
use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::SeedableRng;

const PASS_BASE_POWER: f32 = 6.0;
const PASS_POWER_PER_PASSING: f32 = 0.3;

const SHOT_BASE_POWER: f32 = 7.0;
const SHOT_POWER_PER_RATING: f32 = 0.4;
const SHOT_AIM_JITTER: f32 = 30.0;
const SHOT_JITTER_REDUCTION_PER_TECHNIQUE: f32 = 0.03;

const TACKLE_REACH_RADII: f32 = 4.0;
const TACKLE_BASE_CHANCE: f32 = 0.5;
const TACKLE_CHANCE_PER_STRENGTH: f32 = 0.03;
pub const USER_TACKLE_COOLDOWN: u32 = 40;

const SPEED_PER_NATION_SPEED: f32 = 0.3;
const SPEED_PER_STAT_SPEED: f32 = 0.15;
const STAMINA_PER_NATION_STAMINA: f32 = 15.0;
const STAMINA_PER_STAT_STAMINA: f32 = 5.0;
const SPEED_PER_DIFFICULTY: f32 = 0.3;

/// One fixed-duration contest between the user's side (left) and the
/// computer's side (right). The host calls [`FootballMatch::tick`] once per
/// fixed step; nothing else mutates the simulation.
pub struct FootballMatch {
    config: MatchConfig,
    field: MatchField,
    ball: Ball,
    players: Vec<MatchPlayer>,

    opponent: DecisionController,
    assist: AssistController,
    state_manager: StateManager,

    score: Score,
    remaining_ticks: u32,
    goal_pause_remaining: u32,
    user_index: usize,

    rng: StdRng,
}

impl FootballMatch {
    pub fn new(config: MatchConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let field = MatchField::from_config(&config);
        let players = Self::create_players(&config, &field);

        let user_index = config.squad_size - 1;
        let seed = config.seed.unwrap_or_else(rand::random);

        info!(
            "Match created: {} a side, {} ticks, difficulty {}, seed {}",
            config.squad_size,
            config.duration_ticks(),
            config.difficulty,
            seed
        );

        Ok(FootballMatch {
            ball: Ball::with_coord(field.center()),
            opponent: DecisionController::new(PlayerSide::Right, config.difficulty),
            assist: AssistController::new(PlayerSide::Left),
            state_manager: StateManager::new(),
            score: Score::new(),
            remaining_ticks: config.duration_ticks(),
            goal_pause_remaining: 0,
            user_index,
            rng: StdRng::seed_from_u64(seed),
            players,
            field,
            config,
        })
    }

    fn create_players(config: &MatchConfig, field: &MatchField) -> Vec<MatchPlayer> {
        let squad_size = config.squad_size;

        let stats = &config.user_stats;
        let nation = &config.nation_bonus;

        let left_speed = BASE_SPEED
            + nation.speed * SPEED_PER_NATION_SPEED
            + stats.speed * SPEED_PER_STAT_SPEED;
        let left_stamina = BASE_STAMINA
            + nation.stamina * STAMINA_PER_NATION_STAMINA
            + stats.stamina * STAMINA_PER_STAT_STAMINA;
        let right_speed = BASE_SPEED + config.difficulty * SPEED_PER_DIFFICULTY;

        let usable = |value: f32| value.is_finite() && value > 0.0;
        if !usable(left_speed) || !usable(left_stamina) {
            warn!(
                "progression modifiers give speed {} and stamina {}, keeping base values",
                left_speed, left_stamina
            );
        }

        let left = FormationSlots::kickoff(field, PlayerSide::Left, squad_size)
            .into_iter()
            .enumerate()
            .map(|(idx, position)| {
                MatchPlayer::new(idx as u32, PlayerSide::Left, idx == squad_size - 1, position)
                    .with_speed(left_speed)
                    .with_max_stamina(left_stamina)
            });

        let right = FormationSlots::kickoff(field, PlayerSide::Right, squad_size)
            .into_iter()
            .enumerate()
            .map(|(idx, position)| {
                MatchPlayer::new((squad_size + idx) as u32, PlayerSide::Right, false, position)
                    .with_speed(right_speed)
            });

        left.chain(right).collect()
    }

    pub fn tick(&mut self, intent: &PlayerIntent) -> TickResult {
        let mut events = EventCollection::new();

        match self.state_manager.current() {
            MatchState::KickoffPending => {
                self.reset_positions();
                self.state_manager.transition(StateTrigger::KickOff);
                events.add(MatchEvent::KickOff);
            }
            MatchState::Live => self.game_tick(intent, &mut events),
            MatchState::GoalPause => {
                self.goal_pause_remaining = self.goal_pause_remaining.saturating_sub(1);

                if self.goal_pause_remaining == 0 {
                    self.reset_positions();
                    self.state_manager.transition(StateTrigger::PauseExpired);
                    events.add(MatchEvent::PlayResumed);
                }
            }
            MatchState::FullTime => {}
        }

        self.tick_result(events)
    }

    fn game_tick(&mut self, intent: &PlayerIntent, events: &mut EventCollection) {
        self.remaining_ticks = self.remaining_ticks.saturating_sub(1);

        if self.remaining_ticks == 0 {
            self.state_manager.transition(StateTrigger::ClockExpired);
            events.add(MatchEvent::FullTime);

            info!("Full time: {} - {}", self.score.left, self.score.right);
            return;
        }

        self.resolve_user_intent(intent, events);

        self.assist.update(
            &mut self.players,
            &mut self.ball,
            &self.field,
            &mut self.rng,
            events,
        );

        self.opponent.update(
            &mut self.players,
            &mut self.ball,
            &self.field,
            &mut self.rng,
            events,
        );

        for player in self.players.iter_mut() {
            player.update(&self.field, &mut self.ball);
        }

        self.ball.update(&self.field, &self.players);

        self.resolve_collisions();

        self.check_goal(events);
    }

    fn resolve_user_intent(&mut self, intent: &PlayerIntent, events: &mut EventCollection) {
        let movement = intent.movement();

        self.players[self.user_index].move_by(movement.x, movement.y, intent.sprint, &self.ball);

        if intent.pass_requested {
            self.user_pass(events);
        }

        self.user_shot(intent.shoot_held, events);

        if intent.tackle_requested {
            self.user_tackle(events);
        }
    }

    fn user_pass(&mut self, events: &mut EventCollection) {
        let user = &self.players[self.user_index];

        if !user.has_ball(&self.ball) {
            return;
        }

        let Some(receiver) = self
            .players
            .iter()
            .filter(|p| p.side == user.side && p.id != user.id)
            .min_by(|a, b| {
                user.distance_to(&a.position)
                    .total_cmp(&user.distance_to(&b.position))
            })
        else {
            return;
        };

        let power = PASS_BASE_POWER + self.config.user_stats.passing * PASS_POWER_PER_PASSING;

        self.ball
            .kick(angle(&user.position, &receiver.position), power);

        events.add(MatchEvent::PassMade {
            from_player_id: user.id,
            to_player_id: Some(receiver.id),
        });
    }

    fn user_shot(&mut self, shoot_held: bool, events: &mut EventCollection) {
        let has_ball = self.players[self.user_index].has_ball(&self.ball);
        let user = &mut self.players[self.user_index];

        if shoot_held && has_ball {
            user.charge.start();
            return;
        }

        if !user.charge.charging {
            return;
        }

        if !has_ball {
            debug!("user lost the ball while charging, shot dropped");
            user.charge.cancel();
            return;
        }

        let stats = &self.config.user_stats;

        let jitter = SHOT_AIM_JITTER
            * (1.0 - stats.technique * SHOT_JITTER_REDUCTION_PER_TECHNIQUE).max(0.0);
        let goal = self.field.opponent_goal(user.side);
        let aim = Vector2::new(goal.x, goal.y + random_range(&mut self.rng, -jitter, jitter));

        let charge_level = user.charge.release();
        let power = ChargeShot::power(
            SHOT_BASE_POWER + stats.shot_power * SHOT_POWER_PER_RATING,
            charge_level,
        );

        self.ball.kick(angle(&user.position, &aim), power);
        user.set_action(PlayerState::Shooting);

        events.add(MatchEvent::ShotReleased {
            player_id: user.id,
            charge_level,
        });
    }

    fn user_tackle(&mut self, events: &mut EventCollection) {
        let user = &self.players[self.user_index];

        if user.tackle_cooldown > 0 {
            return;
        }

        let Some(victim_index) = self
            .players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.side != user.side)
            .min_by(|(_, a), (_, b)| {
                user.distance_to(&a.position)
                    .total_cmp(&user.distance_to(&b.position))
            })
            .map(|(idx, _)| idx)
        else {
            return;
        };

        let victim = &self.players[victim_index];
        if user.distance_to(&victim.position) >= self.field.player_radius * TACKLE_REACH_RADII {
            return;
        }

        let victim_has_ball = victim.has_ball(&self.ball);
        let (user_id, victim_id) = (user.id, victim.id);

        let user = &mut self.players[self.user_index];
        user.tackle_cooldown = USER_TACKLE_COOLDOWN;
        user.set_action(PlayerState::Tackling);

        if !victim_has_ball {
            return;
        }

        let chance = clamp(
            TACKLE_BASE_CHANCE + self.config.user_stats.strength * TACKLE_CHANCE_PER_STRENGTH,
            0.0,
            1.0,
        );

        if roll(&mut self.rng, chance) {
            self.ball.drop_loose();
            self.players[victim_index].pickup_lockout = PICKUP_LOCKOUT_TICKS;

            events.add(MatchEvent::TackleSucceeded {
                tackler_id: user_id,
                victim_id,
            });
        }
    }

    /// Pushes overlapping agents apart by half the overlap each. Agents on the
    /// exact same spot are split along x by one radius each.
    fn resolve_collisions(&mut self) {
        let radius = self.field.player_radius;
        let min_distance = radius * 2.0;

        for (a, b) in (0..self.players.len()).tuple_combinations() {
            let delta = self.players[b].position - self.players[a].position;
            let distance = delta.norm();

            if distance >= min_distance {
                continue;
            }

            let push = if distance > f32::EPSILON {
                delta / distance * (min_distance - distance) * 0.5
            } else {
                Vector2::new(radius, 0.0)
            };

            let field = &self.field;

            let pa = field.clamp_player(self.players[a].position - push);
            self.players[a].position = pa;

            let pb = field.clamp_player(self.players[b].position + push);
            self.players[b].position = pb;
        }
    }

    fn check_goal(&mut self, events: &mut EventCollection) {
        let Some(goal_side) = self.field.is_goal(&self.ball.position) else {
            return;
        };

        let scoring_side = goal_side.scoring_side();

        self.score.increment(scoring_side);
        self.goal_pause_remaining = self.config.goal_pause_ticks;
        self.state_manager.transition(StateTrigger::Goal);

        info!(
            "Goal for the {} side, {} - {}",
            scoring_side, self.score.left, self.score.right
        );

        events.add(MatchEvent::GoalScored {
            side: scoring_side,
            scorer_id: self.ball.last_touch(),
        });
    }

    fn reset_positions(&mut self) {
        self.ball.reset();

        let squad_size = self.config.squad_size;
        let left = FormationSlots::kickoff(&self.field, PlayerSide::Left, squad_size);
        let right = FormationSlots::kickoff(&self.field, PlayerSide::Right, squad_size);

        for (player, position) in self.players.iter_mut().zip(left.into_iter().chain(right)) {
            player.reset_to(position);
        }
    }

    fn tick_result(&self, events: EventCollection) -> TickResult {
        TickResult {
            score: self.score,
            clock_remaining_ticks: self.remaining_ticks,
            clock_remaining_secs: self.remaining_ticks as f32 / self.config.tick_rate as f32,
            state: self.state_manager.current(),
            events: events.into_vec(),
        }
    }

    pub fn user_player(&self) -> &MatchPlayer {
        &self.players[self.user_index]
    }

    pub fn user_snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot::from(self.user_player())
    }

    pub fn players(&self) -> &[MatchPlayer] {
        &self.players
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn field(&self) -> &MatchField {
        &self.field
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn state(&self) -> MatchState {
        self.state_manager.current()
    }

    pub fn remaining_ticks(&self) -> u32 {
        self.remaining_ticks
    }

    pub fn is_finished(&self) -> bool {
        self.state().is_finished()
    }

    pub fn summary(&self) -> MatchSummary {
        MatchSummary::new(self.score, self.is_finished())
    }
}
