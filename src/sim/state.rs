//! Round state and events
//!
//! `RoundState` is owned by the round controller and rebuilt on every level
//! load, restart and retry. The presentation layer only reads it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::world::{BodyId, Competitor};

/// Current phase of a level play-through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// No ball in flight, waiting for a tap
    Idle,
    /// Both balls launched, physics settling
    InFlight,
    /// Level cleared, waiting for the player to continue
    LevelComplete,
    /// Out of lives, waiting for restart or home
    GameOver,
}

/// The single collectible on the board
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub body: BodyId,
    /// Index into the level's peg list the coin sits on
    pub peg_index: usize,
    pub pos: Vec2,
}

/// Mutable state of one level play-through
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundState {
    /// Level being played (1-based)
    pub current_level: u32,
    /// Coins needed to clear this level
    pub required_coins: u32,
    /// Coins the player has collected on this level
    pub collected_coins: u32,
    pub player_score: u32,
    pub bot_score: u32,
    pub player_lives: u8,
    /// A ball pair is in flight
    pub ball_in_play: bool,
    /// Latched by the contact callback, consumed on resolution
    pub player_hit_coin: bool,
    pub phase: RoundPhase,
    pub paused: bool,
    /// Launches made on this level
    pub launches: u32,
    pub coin: Option<Coin>,
    pub player_ball: Option<BodyId>,
    pub bot_ball: Option<BodyId>,
}

impl RoundState {
    pub fn new(level: u32, required_coins: u32, lives: u8) -> Self {
        Self {
            current_level: level,
            required_coins,
            collected_coins: 0,
            player_score: 0,
            bot_score: 0,
            player_lives: lives,
            ball_in_play: false,
            player_hit_coin: false,
            phase: RoundPhase::Idle,
            paused: false,
            launches: 0,
            coin: None,
            player_ball: None,
            bot_ball: None,
        }
    }

    /// Handles of the balls currently in the world
    pub fn balls(&self) -> impl Iterator<Item = BodyId> + '_ {
        self.player_ball.iter().chain(self.bot_ball.iter()).copied()
    }

    /// True if a tap would launch a ball pair right now
    pub fn can_launch(&self) -> bool {
        self.phase == RoundPhase::Idle && !self.ball_in_play && !self.paused
    }

    /// Coins still needed to clear the level
    pub fn coins_remaining(&self) -> u32 {
        self.required_coins.saturating_sub(self.collected_coins)
    }
}

/// Notifications for the presentation layer and meta-game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RoundEvent {
    /// A level's pegs were placed and a fresh round state created
    LevelLoaded { level: u32, required_coins: u32 },
    /// A coin appeared on the board
    CoinSpawned { pos: Vec2 },
    /// A ball pair left the capsule
    BallsLaunched { player_aimed: bool, bot_aimed: bool },
    /// A ball bounced off a pin
    PegHit { by: Competitor },
    /// A ball touched the coin first and took it off the board
    CoinClaimed { by: Competitor },
    /// Scoreboard changed
    ScoreChanged { player: u32, bot: u32 },
    /// The player's ball took the coin this round
    CoinCollected { collected: u32, required: u32 },
    /// The player's ball missed
    LifeLost { lives_left: u8 },
    /// Enough coins collected: level cleared
    LevelWon { level: u32, coins: u32, next_level: u32 },
    /// Last life lost
    GameOver { level: u32 },
    /// An in-flight round was cancelled
    RoundAborted,
    /// Pause toggled
    PauseChanged { paused: bool },
    /// The player asked to leave for the menu
    ExitRequested,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle() {
        let state = RoundState::new(3, 3, 3);
        assert_eq!(state.phase, RoundPhase::Idle);
        assert!(state.can_launch());
        assert_eq!(state.coins_remaining(), 3);
        assert_eq!(state.balls().count(), 0);
    }

    #[test]
    fn test_cannot_launch_while_paused_or_in_play() {
        let mut state = RoundState::new(1, 1, 3);
        state.paused = true;
        assert!(!state.can_launch());
        state.paused = false;
        state.ball_in_play = true;
        assert!(!state.can_launch());
    }

    #[test]
    fn test_balls_lists_present_handles() {
        let mut state = RoundState::new(1, 1, 3);
        state.bot_ball = Some(BodyId(7));
        assert_eq!(state.balls().collect::<Vec<_>>(), vec![BodyId(7)]);
    }

    #[test]
    fn test_events_serialize() {
        let event = RoundEvent::LevelWon {
            level: 2,
            coins: 2,
            next_level: 3,
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: RoundEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
