//! One-time achievements
//!
//! Completion is recorded as a list of ids under `completedAchievements`.
//! Unlocking is idempotent: the bonus is paid only on the first unlock.

use serde::{Deserialize, Serialize};

use super::wallet;
use crate::persistence::{PreferenceStore, keys};

/// Unique identifier for each achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AchievementId {
    /// First coin ever collected
    FirstCoin,
    /// First level won
    FirstWin,
    /// Five coins collected on a single level
    CollectFiveCoins,
    /// Ten levels won against the bot
    Win10,
    /// Fifty levels won against the bot
    Win50,
}

impl AchievementId {
    /// All achievements in display order.
    pub const ALL: [AchievementId; 5] = [
        AchievementId::FirstCoin,
        AchievementId::FirstWin,
        AchievementId::CollectFiveCoins,
        AchievementId::Win10,
        AchievementId::Win50,
    ];

    /// Stored id
    pub fn key(&self) -> &'static str {
        match self {
            AchievementId::FirstCoin => "first_coin",
            AchievementId::FirstWin => "first_win",
            AchievementId::CollectFiveCoins => "collect_5_coins",
            AchievementId::Win10 => "win_10",
            AchievementId::Win50 => "win_50",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.key() == key)
    }

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            AchievementId::FirstCoin => "First Coin",
            AchievementId::FirstWin => "First Victory",
            AchievementId::CollectFiveCoins => "Coin Collector",
            AchievementId::Win10 => "Bot Breaker",
            AchievementId::Win50 => "Bot Nemesis",
        }
    }
}

pub fn is_unlocked<S: PreferenceStore + ?Sized>(store: &S, id: AchievementId) -> bool {
    store
        .get_string_list(keys::COMPLETED_ACHIEVEMENTS)
        .iter()
        .any(|k| k == id.key())
}

/// Achievements already completed, in display order
pub fn unlocked<S: PreferenceStore + ?Sized>(store: &S) -> Vec<AchievementId> {
    let completed = store.get_string_list(keys::COMPLETED_ACHIEVEMENTS);
    AchievementId::ALL
        .into_iter()
        .filter(|id| completed.iter().any(|k| k == id.key()))
        .collect()
}

/// Record `id` as complete and pay `bonus` once. Returns true only for the
/// first unlock.
pub fn unlock<S: PreferenceStore + ?Sized>(store: &mut S, id: AchievementId, bonus: i64) -> bool {
    let mut completed = store.get_string_list(keys::COMPLETED_ACHIEVEMENTS);
    if completed.iter().any(|k| k == id.key()) {
        return false;
    }
    completed.push(id.key().to_string());
    store.set_string_list(keys::COMPLETED_ACHIEVEMENTS, &completed);
    wallet::deposit(store, bonus);
    log::info!("Achievement unlocked: {}", id.name());
    true
}
