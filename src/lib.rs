//! Bounce Bot Duel - a Plinko duel against a bot
//!
//! Core modules:
//! - `sim`: Round engine (level catalog, outcome resolver, round controller)
//! - `meta`: Currency and achievement bookkeeping driven by round events
//! - `shop`: Cosmetic balls and backgrounds bought with collected coins
//! - `persistence`: Flat key-value preference store
//! - `settings`: Sound toggle and player profile
//! - `audio`: Sound cues behind an injected service
//! - `session`: Frame pacing and wiring of all of the above
//! - `platform`: Native/browser logging and storage selection
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod meta;
pub mod persistence;
pub mod platform;
pub mod session;
pub mod settings;
pub mod shop;
pub mod sim;
pub mod tuning;

pub use session::Session;
pub use settings::{PlayerProfile, Settings};
pub use tuning::GameConfig;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one rendered frame at 60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Level range
    pub const MIN_LEVEL: u32 = 1;
    pub const MAX_LEVEL: u32 = 10;

    /// Lives at the start of every level
    pub const STARTING_LIVES: u8 = 3;

    /// Board layout
    pub const MAX_PINS_IN_ROW: u32 = 5;
    pub const PIN_SPACING_Y_RATIO: f32 = 1.2;
    /// Screens shorter than this use the lower board origin
    pub const COMPACT_SCREEN_HEIGHT: f32 = 760.0;

    /// Balls count as out of the playfield once below this y
    pub const EXIT_Y: f32 = 0.0;

    /// Entity sizes (points)
    pub const BALL_RADIUS: f32 = 14.0;
    pub const PEG_RADIUS: f32 = 10.0;
    pub const COIN_RADIUS: f32 = 12.0;

    /// One-time currency bonus for unlocking an achievement
    pub const ACHIEVEMENT_BONUS: i64 = 15;
    /// Price of every shop item
    pub const SHOP_ITEM_PRICE: i64 = 15;
    /// Number of balls and backgrounds in the shop
    pub const SHOP_ITEM_COUNT: u32 = 10;
}
