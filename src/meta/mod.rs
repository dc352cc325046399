//! Meta-game bookkeeping
//!
//! Features:
//! - Coin wallet banked on level wins
//! - One-time achievements with a currency bonus
//! - Lifetime win counter for the win milestones
//!
//! Driven entirely by `RoundEvent`s after each tick; the round engine never
//! touches persistence itself.

pub mod achievements;
pub mod wallet;

pub use achievements::AchievementId;

use serde::{Deserialize, Serialize};

use crate::consts::ACHIEVEMENT_BONUS;
use crate::persistence::{PreferenceStore, keys};
use crate::sim::RoundEvent;

/// Lifetime wins needed for each win milestone
const WIN_MILESTONES: [(u32, AchievementId); 2] =
    [(10, AchievementId::Win10), (50, AchievementId::Win50)];

/// Coins collected on a single level for the collector achievement
const COLLECTOR_COINS: u32 = 5;

/// Something the meta-game changed, for toasts and sounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MetaEvent {
    /// Level coins moved into the wallet
    CoinsBanked { amount: i64, total: i64 },
    /// An achievement was completed for the first time
    AchievementUnlocked { id: AchievementId, bonus: i64 },
}

/// Applies round events to the persisted wallet and achievements
#[derive(Debug, Clone, Copy)]
pub struct MetaGame {
    /// Bonus paid for each newly unlocked achievement
    pub achievement_bonus: i64,
}

impl Default for MetaGame {
    fn default() -> Self {
        Self::new(ACHIEVEMENT_BONUS)
    }
}

impl MetaGame {
    pub fn new(achievement_bonus: i64) -> Self {
        Self {
            achievement_bonus: achievement_bonus.max(0),
        }
    }

    /// Levels won against the bot, across all sessions
    pub fn matches_won<S: PreferenceStore + ?Sized>(store: &S) -> u32 {
        u32::try_from(store.get_int(keys::MATCHES_WON)).unwrap_or(0)
    }

    /// Apply a batch of round events in order
    pub fn apply<S: PreferenceStore + ?Sized>(
        &self,
        store: &mut S,
        events: &[RoundEvent],
    ) -> Vec<MetaEvent> {
        let mut out = Vec::new();
        for event in events {
            self.apply_one(store, event, &mut out);
        }
        out
    }

    fn apply_one<S: PreferenceStore + ?Sized>(
        &self,
        store: &mut S,
        event: &RoundEvent,
        out: &mut Vec<MetaEvent>,
    ) {
        match *event {
            RoundEvent::CoinCollected { collected, .. } => {
                if collected >= 1 {
                    self.unlock(store, AchievementId::FirstCoin, out);
                }
                if collected >= COLLECTOR_COINS {
                    self.unlock(store, AchievementId::CollectFiveCoins, out);
                }
            }
            RoundEvent::LevelWon { level, coins, .. } => {
                let amount = i64::from(coins);
                let total = wallet::deposit(store, amount);
                log::info!("Banked {} coins from level {} (total {})", amount, level, total);
                out.push(MetaEvent::CoinsBanked { amount, total });

                let wins = Self::matches_won(store).saturating_add(1);
                store.set_int(keys::MATCHES_WON, i64::from(wins));

                self.unlock(store, AchievementId::FirstWin, out);
                for (needed, id) in WIN_MILESTONES {
                    if wins >= needed {
                        self.unlock(store, id, out);
                    }
                }
            }
            _ => {}
        }
    }

    fn unlock<S: PreferenceStore + ?Sized>(
        &self,
        store: &mut S,
        id: AchievementId,
        out: &mut Vec<MetaEvent>,
    ) {
        if achievements::unlock(store, id, self.achievement_bonus) {
            out.push(MetaEvent::AchievementUnlocked {
                id,
                bonus: self.achievement_bonus,
            });
        }
    }
}
