//! Launch outcome resolver
//!
//! Decides, per launch, whether each competitor's ball is aimed at the coin
//! or sent off undirected. The rolls encode the difficulty curve: the player
//! misses one launch in ten, the bot hits one launch in three.
//!
//! Pure function of the RNG and positions; never touches round state.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Balance values for launch rolls and impulses
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutcomeTuning {
    /// Player rolls 1..=sides and misses on the top face
    pub player_miss_sides: u32,
    /// Bot rolls 1..=sides and hits on the top face
    pub bot_hit_sides: u32,
    /// Proportional gain toward the coin for an aimed player ball
    pub player_gain: Vec2,
    /// Proportional gain toward the coin for an aimed bot ball
    pub bot_gain: Vec2,
    /// Lateral jitter drawn uniformly from [-range, range]
    pub lateral_range: f32,
    /// Vertical impulse of an undirected drop
    pub drop_impulse_y: f32,
}

impl Default for OutcomeTuning {
    fn default() -> Self {
        Self {
            player_miss_sides: 10,
            bot_hit_sides: 3,
            player_gain: Vec2::new(0.03, 0.03),
            bot_gain: Vec2::new(0.03, 0.02),
            lateral_range: 3.0,
            drop_impulse_y: -5.0,
        }
    }
}

/// What one competitor's ball was told to do
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallPlan {
    /// Ball is steered toward the coin
    pub aimed: bool,
    pub impulse: Vec2,
}

/// Impulses for both balls of one launch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaunchPlan {
    pub player: BallPlan,
    pub bot: BallPlan,
}

/// Impulse steering a ball from `ball` toward `coin`
pub fn aimed_impulse(coin: Vec2, ball: Vec2, gain: Vec2, lateral: f32) -> Vec2 {
    let to_coin = coin - ball;
    Vec2::new(to_coin.x * gain.x + lateral, to_coin.y * gain.y)
}

/// Impulse for a ball dropped without a target
pub fn undirected_impulse(lateral: f32, tuning: &OutcomeTuning) -> Vec2 {
    Vec2::new(lateral, tuning.drop_impulse_y)
}

fn lateral<R: Rng>(rng: &mut R, range: f32) -> f32 {
    if range > 0.0 {
        rng.random_range(-range..=range)
    } else {
        0.0
    }
}

/// Roll both competitors' outcomes for a launch from `capsule`.
///
/// With no coin on the board both balls are dropped undirected, but every
/// roll is still drawn so the RNG stream does not depend on coin presence.
pub fn resolve_launch<R: Rng>(
    rng: &mut R,
    coin: Option<Vec2>,
    capsule: Vec2,
    tuning: &OutcomeTuning,
) -> LaunchPlan {
    let player_lateral = lateral(rng, tuning.lateral_range);
    let bot_lateral = lateral(rng, tuning.lateral_range);

    let player_sides = tuning.player_miss_sides.max(1);
    let player_misses = rng.random_range(1..=player_sides) == player_sides;

    let bot_sides = tuning.bot_hit_sides.max(1);
    let bot_hits = rng.random_range(1..=bot_sides) == bot_sides;

    let player = match coin {
        Some(coin) if !player_misses => BallPlan {
            aimed: true,
            impulse: aimed_impulse(coin, capsule, tuning.player_gain, player_lateral),
        },
        _ => BallPlan {
            aimed: false,
            impulse: undirected_impulse(player_lateral, tuning),
        },
    };

    let bot = match coin {
        Some(coin) if bot_hits => BallPlan {
            aimed: true,
            impulse: aimed_impulse(coin, capsule, tuning.bot_gain, bot_lateral),
        },
        _ => BallPlan {
            aimed: false,
            impulse: undirected_impulse(bot_lateral, tuning),
        },
    };

    LaunchPlan { player, bot }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const CAPSULE: Vec2 = Vec2::new(195.0, 562.0);
    const COIN: Vec2 = Vec2::new(117.0, 328.0);

    #[test]
    fn test_aimed_impulse_is_proportional() {
        let impulse = aimed_impulse(COIN, CAPSULE, Vec2::new(0.03, 0.02), 1.5);
        assert!((impulse.x - (-78.0 * 0.03 + 1.5)).abs() < 1e-4);
        assert!((impulse.y - (-234.0 * 0.02)).abs() < 1e-4);
    }

    #[test]
    fn test_seeded_rolls_are_reproducible() {
        let tuning = OutcomeTuning::default();
        let mut a = Pcg32::seed_from_u64(7);
        let mut b = Pcg32::seed_from_u64(7);
        for _ in 0..50 {
            assert_eq!(
                resolve_launch(&mut a, Some(COIN), CAPSULE, &tuning),
                resolve_launch(&mut b, Some(COIN), CAPSULE, &tuning)
            );
        }
    }

    #[test]
    fn test_rates_match_balance() {
        let tuning = OutcomeTuning::default();
        let mut rng = Pcg32::seed_from_u64(2024);
        let trials = 30_000;
        let mut player_aimed = 0;
        let mut bot_aimed = 0;
        for _ in 0..trials {
            let plan = resolve_launch(&mut rng, Some(COIN), CAPSULE, &tuning);
            player_aimed += plan.player.aimed as u32;
            bot_aimed += plan.bot.aimed as u32;
        }
        let player_rate = player_aimed as f64 / trials as f64;
        let bot_rate = bot_aimed as f64 / trials as f64;
        assert!((player_rate - 0.9).abs() < 0.02, "player rate {player_rate}");
        assert!((bot_rate - 1.0 / 3.0).abs() < 0.02, "bot rate {bot_rate}");
    }

    #[test]
    fn test_miss_is_undirected_drop() {
        let tuning = OutcomeTuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..200 {
            let plan = resolve_launch(&mut rng, Some(COIN), CAPSULE, &tuning);
            for ball in [plan.player, plan.bot] {
                if !ball.aimed {
                    assert_eq!(ball.impulse.y, tuning.drop_impulse_y);
                    assert!(ball.impulse.x.abs() <= tuning.lateral_range);
                }
            }
        }
    }

    #[test]
    fn test_no_coin_means_no_aim() {
        let tuning = OutcomeTuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..100 {
            let plan = resolve_launch(&mut rng, None, CAPSULE, &tuning);
            assert!(!plan.player.aimed);
            assert!(!plan.bot.aimed);
        }
    }

    #[test]
    fn test_single_sided_dice_force_outcomes() {
        let tuning = OutcomeTuning {
            player_miss_sides: 1,
            bot_hit_sides: 1,
            lateral_range: 0.0,
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(9);
        let plan = resolve_launch(&mut rng, Some(COIN), CAPSULE, &tuning);
        // One face: the player always rolls a miss, the bot always a hit
        assert!(!plan.player.aimed);
        assert!(plan.bot.aimed);
        assert_eq!(plan.player.impulse, Vec2::new(0.0, -5.0));
    }
}
