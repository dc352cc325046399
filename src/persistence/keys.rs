//! Preference keys
//!
//! Names are part of the on-disk format: changing one orphans saved data.

/// Running total of banked coins
pub const TOTAL_COINS: &str = "totalCoins";
/// Ids of achievements already granted
pub const COMPLETED_ACHIEVEMENTS: &str = "completedAchievements";
/// Levels won against the bot, across all sessions
pub const MATCHES_WON: &str = "matchesWon";

pub const PLAYER_NAME: &str = "playerName";
pub const SELECTED_AVATAR: &str = "selectedAvatar";

pub const SELECTED_BALL: &str = "selectedBall";
pub const SELECTED_BACKGROUND: &str = "selectedBackground";

pub const SOUND_ON: &str = "soundOn";

/// Per-item purchase flag, e.g. `purchasedBalls_3`
pub fn purchased_ball(id: u32) -> String {
    format!("purchasedBalls_{id}")
}

pub fn purchased_background(id: u32) -> String {
    format!("purchasedBackgrounds_{id}")
}
