//! Round controller
//!
//! Drives one level play-through: launch on tap, latch coin contacts while
//! the balls fall, then resolve the round once both balls have left the
//! playfield. Called once per simulation tick.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::level::{LayoutTransform, ProgressionGate, is_valid_level};
use super::outcome::{OutcomeTuning, resolve_launch};
use super::state::{Coin, RoundEvent, RoundPhase, RoundState};
use super::world::{BodyId, Category, Competitor, Contact, PhysicsWorld};
use crate::consts::*;
use crate::tuning::GameConfig;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Tap on the board
    pub launch: bool,
    /// Pause toggle
    pub pause: bool,
    /// Restart the current level
    pub restart: bool,
    /// Leave for the menu
    pub home: bool,
    /// Dismiss the level-complete overlay
    pub next_level: bool,
    /// Jump to a level from the level map
    pub select_level: Option<u32>,
}

/// Owns the round state and every transition applied to it
#[derive(Debug, Clone)]
pub struct RoundController {
    seed: u64,
    rng: Pcg32,
    layout: LayoutTransform,
    gate: ProgressionGate,
    tuning: OutcomeTuning,
    starting_lives: u8,
    /// Absolute peg positions of the loaded level
    pegs: Vec<Vec2>,
    state: RoundState,
    events: Vec<RoundEvent>,
}

impl RoundController {
    /// Create a controller and load level 1 into `world`
    pub fn new<W: PhysicsWorld + ?Sized>(world: &mut W, config: &GameConfig, seed: u64) -> Self {
        let gate = ProgressionGate::new(config.max_level, config.coin_requirement);
        let mut controller = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            layout: config.layout(),
            gate,
            tuning: config.outcome,
            starting_lives: config.starting_lives,
            pegs: Vec::new(),
            state: RoundState::new(MIN_LEVEL, gate.required_coins(MIN_LEVEL), config.starting_lives),
            events: Vec::new(),
        };
        controller.load_level(world, MIN_LEVEL);
        controller
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn pegs(&self) -> &[Vec2] {
        &self.pegs
    }

    pub fn capsule(&self) -> Vec2 {
        self.layout.capsule_position()
    }

    pub fn gate(&self) -> &ProgressionGate {
        &self.gate
    }

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<RoundEvent> {
        std::mem::take(&mut self.events)
    }

    fn emit(&mut self, event: RoundEvent) {
        self.events.push(event);
    }

    /// Advance by one fixed timestep
    pub fn tick<W: PhysicsWorld + ?Sized>(&mut self, world: &mut W, input: &TickInput, dt: f32) {
        if input.home {
            self.go_home(world);
            return;
        }
        if input.restart {
            self.restart(world);
        }
        if let Some(level) = input.select_level {
            self.select_level(world, level);
        }
        if input.next_level {
            self.continue_to_next_level();
        }
        if input.pause {
            self.toggle_pause();
        }

        // Paused: the board is frozen and taps are ignored
        if self.state.paused {
            return;
        }

        if input.launch {
            self.launch(world);
        }

        let mut contacts = world.step(dt);
        // Stable sort: same-step contacts keep engine order within a priority
        contacts.sort_by_key(Contact::priority);
        for contact in contacts {
            self.handle_contact(world, contact);
        }

        self.update(world);
    }

    /// Tear down the board and start `level` with a fresh round state.
    /// Levels without a layout load level 1.
    pub fn load_level<W: PhysicsWorld + ?Sized>(&mut self, world: &mut W, level: u32) {
        let level = if is_valid_level(level) && level <= self.gate.max_level {
            level
        } else {
            MIN_LEVEL
        };

        world.clear();
        self.pegs = self.layout.pegs_for_level(level);
        for &peg in &self.pegs {
            world.spawn(Category::Pin, peg);
        }

        let required = self.gate.required_coins(level);
        self.state = RoundState::new(level, required, self.starting_lives);
        log::info!("Level {} loaded: {} pegs, {} coins required", level, self.pegs.len(), required);
        self.emit(RoundEvent::LevelLoaded {
            level,
            required_coins: required,
        });

        self.spawn_coin(world);
    }

    /// Replace the coin on a random peg. With no pegs the board stays
    /// coinless.
    fn spawn_coin<W: PhysicsWorld + ?Sized>(&mut self, world: &mut W) {
        if let Some(old) = self.state.coin.take() {
            world.remove(old.body);
        }
        if self.pegs.is_empty() {
            log::warn!("Level {} has no pegs, no coin placed", self.state.current_level);
            return;
        }

        let peg_index = self.rng.random_range(0..self.pegs.len());
        let pos = self.pegs[peg_index];
        let body = world.spawn(Category::Coin, pos);
        self.state.coin = Some(Coin {
            body,
            peg_index,
            pos,
        });
        self.emit(RoundEvent::CoinSpawned { pos });
    }

    /// Drop both balls from the capsule. A no-op unless idle.
    pub fn launch<W: PhysicsWorld + ?Sized>(&mut self, world: &mut W) -> bool {
        if !self.state.can_launch() {
            log::debug!("Launch ignored in {:?}", self.state.phase);
            return false;
        }

        let capsule = self.capsule();
        let coin = self.state.coin.map(|c| c.pos);
        let plan = resolve_launch(&mut self.rng, coin, capsule, &self.tuning);

        let player = world.spawn(Category::PlayerBall, capsule);
        let bot = world.spawn(Category::BotBall, capsule);
        world.apply_impulse(player, plan.player.impulse);
        world.apply_impulse(bot, plan.bot.impulse);

        self.state.player_ball = Some(player);
        self.state.bot_ball = Some(bot);
        self.state.ball_in_play = true;
        self.state.player_hit_coin = false;
        self.state.launches += 1;
        self.state.phase = RoundPhase::InFlight;

        log::debug!(
            "Launch #{}: player aimed={} bot aimed={}",
            self.state.launches,
            plan.player.aimed,
            plan.bot.aimed
        );
        self.emit(RoundEvent::BallsLaunched {
            player_aimed: plan.player.aimed,
            bot_aimed: plan.bot.aimed,
        });
        true
    }

    fn ball_of(&self, competitor: Competitor) -> Option<BodyId> {
        match competitor {
            Competitor::Player => self.state.player_ball,
            Competitor::Bot => self.state.bot_ball,
        }
    }

    /// Contact-begin callback. The first ball to reach the coin claims it.
    pub fn handle_contact<W: PhysicsWorld + ?Sized>(&mut self, world: &mut W, contact: Contact) {
        if self.state.phase != RoundPhase::InFlight {
            return;
        }
        let Some((competitor, ball, other)) = contact.ball() else {
            return;
        };
        if self.ball_of(competitor) != Some(ball.id) {
            return;
        }

        match other.category {
            Category::Pin => self.emit(RoundEvent::PegHit { by: competitor }),
            Category::Coin => {
                let Some(coin) = self.state.coin else {
                    return;
                };
                if coin.body != other.id {
                    return;
                }

                world.remove(coin.body);
                self.state.coin = None;
                log::debug!("{:?} claimed the coin", competitor);
                self.emit(RoundEvent::CoinClaimed { by: competitor });

                match competitor {
                    Competitor::Player => self.state.player_hit_coin = true,
                    Competitor::Bot => {
                        self.state.bot_score += 1;
                        self.emit_score();
                    }
                }
            }
            Category::PlayerBall | Category::BotBall => {}
        }
    }

    fn emit_score(&mut self) {
        self.emit(RoundEvent::ScoreChanged {
            player: self.state.player_score,
            bot: self.state.bot_score,
        });
    }

    /// Poll for both balls leaving the playfield and resolve the round
    pub fn update<W: PhysicsWorld + ?Sized>(&mut self, world: &mut W) {
        if self.state.phase != RoundPhase::InFlight || !self.state.ball_in_play {
            return;
        }

        let exited = |ball: Option<BodyId>| {
            ball.and_then(|b| world.position(b))
                .is_none_or(|pos| pos.y < EXIT_Y)
        };
        if !(exited(self.state.player_ball) && exited(self.state.bot_ball)) {
            return;
        }

        self.remove_balls(world);
        self.resolve(world);
    }

    fn remove_balls<W: PhysicsWorld + ?Sized>(&mut self, world: &mut W) {
        for ball in self.state.balls().collect::<Vec<_>>() {
            world.remove(ball);
        }
        self.state.player_ball = None;
        self.state.bot_ball = None;
        self.state.ball_in_play = false;
    }

    fn resolve<W: PhysicsWorld + ?Sized>(&mut self, world: &mut W) {
        self.state.phase = RoundPhase::Idle;

        if std::mem::take(&mut self.state.player_hit_coin) {
            self.state.collected_coins += 1;
            self.state.player_score += 1;
            self.emit_score();
            self.emit(RoundEvent::CoinCollected {
                collected: self.state.collected_coins,
                required: self.state.required_coins,
            });

            if self.state.collected_coins >= self.state.required_coins {
                self.win_level(world);
            } else {
                self.spawn_coin(world);
            }
        } else {
            self.state.player_lives = self.state.player_lives.saturating_sub(1);
            self.emit(RoundEvent::LifeLost {
                lives_left: self.state.player_lives,
            });

            if self.state.player_lives == 0 {
                self.state.phase = RoundPhase::GameOver;
                log::info!("Game over on level {}", self.state.current_level);
                self.emit(RoundEvent::GameOver {
                    level: self.state.current_level,
                });
            } else {
                self.spawn_coin(world);
            }
        }
    }

    fn win_level<W: PhysicsWorld + ?Sized>(&mut self, world: &mut W) {
        let level = self.state.current_level;
        let coins = self.state.collected_coins;
        let next_level = self.gate.advance(level);
        if next_level == level {
            log::info!("Level {} won with {} coins, all levels complete", level, coins);
        } else {
            log::info!("Level {} won with {} coins", level, coins);
        }
        self.emit(RoundEvent::LevelWon {
            level,
            coins,
            next_level,
        });

        self.load_level(world, next_level);
        self.state.phase = RoundPhase::LevelComplete;
    }

    /// Leave the level-complete overlay and start playing
    pub fn continue_to_next_level(&mut self) -> bool {
        if self.state.phase != RoundPhase::LevelComplete {
            return false;
        }
        self.state.phase = RoundPhase::Idle;
        true
    }

    /// Cancel any balls in flight without resolving the round
    fn abort_flight<W: PhysicsWorld + ?Sized>(&mut self, world: &mut W) {
        if !self.state.ball_in_play && self.state.balls().next().is_none() {
            return;
        }
        self.remove_balls(world);
        self.state.player_hit_coin = false;
        if self.state.phase == RoundPhase::InFlight {
            self.state.phase = RoundPhase::Idle;
        }
        log::debug!("Round aborted on level {}", self.state.current_level);
        self.emit(RoundEvent::RoundAborted);
    }

    /// Start the current level over: full lives, zero scores, new board
    pub fn restart<W: PhysicsWorld + ?Sized>(&mut self, world: &mut W) {
        self.abort_flight(world);
        let level = self.state.current_level;
        self.load_level(world, level);
    }

    /// Abandon the round for the menu
    pub fn go_home<W: PhysicsWorld + ?Sized>(&mut self, world: &mut W) {
        self.abort_flight(world);
        if self.state.coin.is_none() && self.state.phase == RoundPhase::Idle {
            self.spawn_coin(world);
        }
        self.state.paused = false;
        self.emit(RoundEvent::ExitRequested);
    }

    /// Load a level picked from the level map
    pub fn select_level<W: PhysicsWorld + ?Sized>(&mut self, world: &mut W, level: u32) {
        self.abort_flight(world);
        self.load_level(world, level);
    }

    pub fn toggle_pause(&mut self) {
        self.state.paused = !self.state.paused;
        self.emit(RoundEvent::PauseChanged {
            paused: self.state.paused,
        });
    }
}
