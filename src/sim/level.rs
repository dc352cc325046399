//! Level catalog and progression
//!
//! Peg layouts are stored in relative board units: x in pin columns from the
//! board center, y in pin rows above the board origin. `LayoutTransform`
//! maps them to screen points.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

const fn p(x: f32, y: f32) -> Vec2 {
    Vec2::new(x, y)
}

const LEVEL_1: &[Vec2] = &[
    p(-2.0, 3.0), p(-1.0, 3.0), p(0.0, 3.0), p(1.0, 3.0), p(2.0, 3.0),
    p(-1.5, 2.5), p(-0.5, 2.5), p(0.5, 2.5), p(1.5, 2.5),
    p(-2.0, 2.0), p(-1.0, 2.0), p(0.0, 2.0), p(1.0, 2.0), p(2.0, 2.0),
    p(-1.5, 1.5), p(-0.5, 1.5), p(0.5, 1.5), p(1.5, 1.5),
    p(-2.0, 1.0), p(-1.0, 1.0), p(0.0, 1.0), p(1.0, 1.0), p(2.0, 1.0),
];

const LEVEL_2: &[Vec2] = &[
    p(-2.0, 3.0), p(-1.0, 3.0), p(0.0, 3.0), p(1.0, 3.0), p(2.0, 3.0),
    p(-1.5, 2.5), p(-0.5, 2.5), p(0.5, 2.5), p(1.5, 2.5),
    p(-1.0, 2.0), p(0.0, 2.0), p(1.0, 2.0),
    p(-1.5, 1.5), p(-0.5, 1.5), p(0.5, 1.5), p(1.5, 1.5),
];

const LEVEL_3: &[Vec2] = &[
    p(-2.0, 3.0), p(-1.0, 3.0), p(0.0, 3.0), p(1.0, 3.0),
    p(-1.5, 2.5), p(-0.5, 2.5), p(0.5, 2.5), p(1.5, 2.5),
    p(-2.0, 2.0), p(-1.0, 2.0), p(0.0, 2.0), p(1.0, 2.0),
    p(-1.5, 1.5), p(-0.5, 1.5), p(0.5, 1.5), p(1.5, 1.5),
    p(-2.0, 1.0), p(-1.0, 1.0), p(0.0, 1.0), p(1.0, 1.0),
];

const LEVEL_4: &[Vec2] = &[
    p(-2.0, 3.0), p(-1.0, 3.0), p(0.0, 3.0), p(1.0, 3.0), p(2.0, 3.0),
    p(-1.5, 2.5), p(-0.5, 2.5), p(0.5, 2.5), p(1.5, 2.5),
    p(-2.0, 2.0), p(-1.0, 2.0), p(0.0, 2.0), p(1.0, 2.0),
    p(-1.5, 1.5), p(-0.5, 1.5), p(0.5, 1.5),
    p(-1.0, 1.0), p(0.0, 1.0), p(1.0, 1.0),
];

const LEVEL_5: &[Vec2] = &[
    p(-2.0, 3.0), p(-1.0, 3.0), p(0.0, 3.0), p(1.0, 3.0),
    p(-2.0, 2.5), p(-1.0, 2.5), p(0.0, 2.5), p(1.0, 2.5),
    p(-1.5, 2.0), p(-0.5, 2.0), p(0.5, 2.0), p(1.5, 2.0),
    p(-2.0, 1.5), p(-1.0, 1.5), p(0.0, 1.5), p(1.0, 1.5),
];

const LEVEL_6: &[Vec2] = &[
    p(-2.0, 3.0), p(-1.0, 3.0), p(0.0, 3.0), p(1.0, 3.0),
    p(-1.5, 2.5), p(-0.5, 2.5), p(0.5, 2.5),
    p(-2.0, 2.0), p(-1.0, 2.0), p(0.0, 2.0), p(1.0, 2.0),
    p(-1.5, 1.5), p(-0.5, 1.5), p(0.5, 1.5), p(1.5, 1.5),
];

const LEVEL_7: &[Vec2] = &[
    p(-2.0, 3.0), p(-1.0, 3.0), p(0.0, 3.0), p(1.0, 3.0),
    p(-2.0, 2.5), p(-1.0, 2.5), p(0.0, 2.5), p(1.0, 2.5),
    p(-1.5, 2.0), p(-0.5, 2.0), p(0.5, 2.0),
    p(-2.0, 1.5), p(-1.0, 1.5), p(0.0, 1.5), p(1.0, 1.5),
];

const LEVEL_8: &[Vec2] = &[
    p(-2.0, 3.0), p(-1.0, 3.0), p(0.0, 3.0),
    p(-2.0, 2.5), p(-1.0, 2.5), p(0.0, 2.5),
    p(-1.5, 2.0), p(-0.5, 2.0), p(0.5, 2.0),
    p(-2.0, 1.5), p(-1.0, 1.5), p(0.0, 1.5),
    p(-1.5, 1.0), p(-0.5, 1.0), p(0.5, 1.0),
];

const LEVEL_9: &[Vec2] = &[
    p(-2.0, 3.0), p(-1.0, 3.0), p(0.0, 3.0), p(1.0, 3.0),
    p(-1.5, 2.5), p(-0.5, 2.5), p(0.5, 2.5),
    p(-2.0, 2.0), p(-1.0, 2.0), p(0.0, 2.0), p(1.0, 2.0),
    p(-1.5, 1.5), p(-0.5, 1.5), p(0.5, 1.5),
];

const LEVEL_10: &[Vec2] = &[
    p(-2.0, 3.0), p(-1.0, 3.0), p(0.0, 3.0), p(1.0, 3.0),
    p(-2.0, 2.5), p(-1.0, 2.5), p(0.0, 2.5),
    p(-1.5, 2.0), p(-0.5, 2.0), p(0.5, 2.0),
    p(-2.0, 1.5), p(-1.0, 1.5), p(0.0, 1.5), p(1.0, 1.5),
];

/// Layouts indexed by `level - 1`
static LAYOUTS: [&[Vec2]; MAX_LEVEL as usize] = [
    LEVEL_1, LEVEL_2, LEVEL_3, LEVEL_4, LEVEL_5, LEVEL_6, LEVEL_7, LEVEL_8, LEVEL_9, LEVEL_10,
];

/// Relative peg positions for a level. Unknown ids use level 1.
pub fn peg_layout(level: u32) -> &'static [Vec2] {
    level
        .checked_sub(1)
        .and_then(|i| LAYOUTS.get(i as usize))
        .copied()
        .unwrap_or(LEVEL_1)
}

/// Returns true if `level` has its own layout table
pub fn is_valid_level(level: u32) -> bool {
    (MIN_LEVEL..=MAX_LEVEL).contains(&level)
}

/// Maps relative board units to screen points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutTransform {
    pub screen_width: f32,
    pub screen_height: f32,
    pub max_pins_in_row: u32,
}

impl LayoutTransform {
    pub fn new(screen_width: f32, screen_height: f32) -> Self {
        Self {
            screen_width,
            screen_height,
            max_pins_in_row: MAX_PINS_IN_ROW,
        }
    }

    /// Horizontal distance between pin columns
    pub fn pin_spacing_x(&self) -> f32 {
        self.screen_width / self.max_pins_in_row.max(1) as f32
    }

    /// Vertical distance between pin rows
    pub fn pin_spacing_y(&self) -> f32 {
        self.pin_spacing_x() * PIN_SPACING_Y_RATIO
    }

    /// Board origin; short screens push the board further down
    pub fn origin(&self) -> Vec2 {
        let k = if self.screen_height < COMPACT_SCREEN_HEIGHT {
            1.0 / 10.0
        } else {
            1.0 / 6.0
        };
        Vec2::new(self.screen_width / 2.0, self.screen_height * k)
    }

    /// Convert one relative position to screen points
    pub fn to_screen(&self, relative: Vec2) -> Vec2 {
        let spacing = Vec2::new(self.pin_spacing_x(), self.pin_spacing_y());
        self.origin() + relative * spacing
    }

    /// Absolute peg positions for a level
    pub fn pegs_for_level(&self, level: u32) -> Vec<Vec2> {
        peg_layout(level).iter().map(|&rel| self.to_screen(rel)).collect()
    }

    /// Launch point both balls drop from
    pub fn capsule_position(&self) -> Vec2 {
        Vec2::new(self.screen_width / 2.0, self.screen_height / 1.5)
    }
}

/// How many coins a level requires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CoinRequirement {
    /// Level N needs N coins
    #[default]
    LevelScaled,
    /// Every level needs the same number of coins
    Fixed(u32),
}

/// Decides level advancement and coin thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressionGate {
    pub max_level: u32,
    pub requirement: CoinRequirement,
}

impl Default for ProgressionGate {
    fn default() -> Self {
        Self {
            max_level: MAX_LEVEL,
            requirement: CoinRequirement::LevelScaled,
        }
    }
}

impl ProgressionGate {
    pub fn new(max_level: u32, requirement: CoinRequirement) -> Self {
        Self {
            max_level: max_level.clamp(MIN_LEVEL, MAX_LEVEL),
            requirement,
        }
    }

    /// Level after a win, clamped at `max_level`
    pub fn advance(&self, level: u32) -> u32 {
        (level + 1).min(self.max_level)
    }

    /// Coins needed to win `level` (always at least one)
    pub fn required_coins(&self, level: u32) -> u32 {
        match self.requirement {
            CoinRequirement::LevelScaled => level.max(1),
            CoinRequirement::Fixed(n) => n.max(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_level_has_pegs() {
        for level in MIN_LEVEL..=MAX_LEVEL {
            assert!(!peg_layout(level).is_empty(), "level {level} has no pegs");
        }
    }

    #[test]
    fn test_layout_sizes() {
        let sizes: Vec<usize> = (1..=10).map(|l| peg_layout(l).len()).collect();
        assert_eq!(sizes, vec![23, 16, 20, 19, 16, 15, 15, 15, 14, 14]);
    }

    #[test]
    fn test_out_of_range_falls_back_to_level_one() {
        assert_eq!(peg_layout(0), peg_layout(1));
        assert_eq!(peg_layout(11), peg_layout(1));
        assert_eq!(peg_layout(u32::MAX), peg_layout(1));
        assert!(!is_valid_level(0));
        assert!(is_valid_level(10));
    }

    #[test]
    fn test_transform_tall_screen() {
        let t = LayoutTransform::new(390.0, 844.0);
        assert!((t.pin_spacing_x() - 78.0).abs() < 1e-4);
        assert!((t.pin_spacing_y() - 93.6).abs() < 1e-4);
        let origin = t.origin();
        assert!((origin.x - 195.0).abs() < 1e-4);
        assert!((origin.y - 844.0 / 6.0).abs() < 1e-4);

        let top_left = t.to_screen(Vec2::new(-2.0, 3.0));
        assert!((top_left.x - 39.0).abs() < 1e-3);
        assert!((top_left.y - (844.0 / 6.0 + 3.0 * 93.6)).abs() < 1e-3);
    }

    #[test]
    fn test_transform_compact_screen() {
        let t = LayoutTransform::new(375.0, 667.0);
        assert!((t.origin().y - 66.7).abs() < 1e-3);
    }

    #[test]
    fn test_capsule_sits_above_all_pegs() {
        let t = LayoutTransform::new(390.0, 844.0);
        let capsule = t.capsule_position();
        for level in 1..=10 {
            for peg in t.pegs_for_level(level) {
                assert!(peg.y < capsule.y);
                assert!(peg.y > EXIT_Y);
            }
        }
    }

    #[test]
    fn test_progression_clamps_at_max() {
        let gate = ProgressionGate::default();
        assert_eq!(gate.advance(1), 2);
        assert_eq!(gate.advance(9), 10);
        assert_eq!(gate.advance(10), 10);
    }

    #[test]
    fn test_required_coins_policies() {
        let scaled = ProgressionGate::default();
        assert_eq!(scaled.required_coins(1), 1);
        assert_eq!(scaled.required_coins(7), 7);

        let fixed = ProgressionGate::new(10, CoinRequirement::Fixed(1));
        assert_eq!(fixed.required_coins(7), 1);

        let zero = ProgressionGate::new(10, CoinRequirement::Fixed(0));
        assert_eq!(zero.required_coins(3), 1);
    }
}
