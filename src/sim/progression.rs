//! Score-driven power tiers

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tier implied by a score, ignoring history
pub fn tier_for_score(score: u64) -> u8 {
    if score >= TIER3_THRESHOLD {
        3
    } else if score >= TIER2_THRESHOLD {
        2
    } else {
        1
    }
}

/// Latched power tier plus the level-up flash timer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerLevel {
    pub tier: u8,
    pub flash_ticks: u32,
}

impl Default for PowerLevel {
    fn default() -> Self {
        Self {
            tier: 1,
            flash_ticks: 0,
        }
    }
}

impl PowerLevel {
    /// Re-evaluate against `score`. The tier only ever rises; a rise
    /// starts the flash and returns the new tier.
    pub fn observe(&mut self, score: u64) -> Option<u8> {
        let target = tier_for_score(score).min(MAX_TIER);
        if target <= self.tier {
            return None;
        }
        self.tier = target;
        self.flash_ticks = LEVEL_UP_FLASH_TICKS;
        log::info!("Power tier {} reached at score {}", target, score);
        Some(target)
    }

    pub fn tick_flash(&mut self) {
        self.flash_ticks = self.flash_ticks.saturating_sub(1);
    }

    pub fn flashing(&self) -> bool {
        self.flash_ticks > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(tier_for_score(0), 1);
        assert_eq!(tier_for_score(999), 1);
        assert_eq!(tier_for_score(1000), 2);
        assert_eq!(tier_for_score(2999), 2);
        assert_eq!(tier_for_score(3000), 3);
        assert_eq!(tier_for_score(u64::MAX), 3);
    }

    #[test]
    fn test_observe_latches_and_flashes() {
        let mut power = PowerLevel::default();
        assert_eq!(power.observe(500), None);
        assert_eq!(power.observe(1010), Some(2));
        assert_eq!(power.flash_ticks, LEVEL_UP_FLASH_TICKS);

        // Dropping below the threshold never lowers the tier
        assert_eq!(power.observe(980), None);
        assert_eq!(power.tier, 2);

        // Skipping straight past a boundary lands on the top tier
        let mut power = PowerLevel::default();
        assert_eq!(power.observe(3200), Some(3));
    }

    #[test]
    fn test_flash_counts_down() {
        let mut power = PowerLevel::default();
        power.observe(1000);
        for _ in 0..LEVEL_UP_FLASH_TICKS {
            assert!(power.flashing());
            power.tick_flash();
        }
        assert!(!power.flashing());
    }
}
