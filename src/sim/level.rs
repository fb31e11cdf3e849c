//! The four level variants and their static layout

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Terrain kind of one board row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    /// Row 0, covered by the HUD bar
    Hud,
    Goal,
    Water,
    Road,
    Grass,
    UglyGrass,
    Start,
    /// Unpainted row
    Blank,
}

/// Active level. All per-level behaviour dispatches on this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Level {
    #[default]
    RoadCrossing,
    CritterSurvival,
    TrafficGauntlet,
    RiverRun,
}

impl Level {
    /// 1-based number shown in the HUD
    pub fn number(self) -> u8 {
        match self {
            Level::RoadCrossing => 1,
            Level::CritterSurvival => 2,
            Level::TrafficGauntlet => 3,
            Level::RiverRun => 4,
        }
    }

    /// Level reached by winning (or skipping) this one
    pub fn next(self) -> Option<Level> {
        match self {
            Level::RoadCrossing => Some(Level::CritterSurvival),
            Level::CritterSurvival => Some(Level::TrafficGauntlet),
            Level::TrafficGauntlet => Some(Level::RiverRun),
            Level::RiverRun => None,
        }
    }

    /// Whether projectiles exist and hit anything here
    pub fn has_combat(self) -> bool {
        matches!(self, Level::CritterSurvival | Level::TrafficGauntlet)
    }

    /// Whether road vehicles get post-motion spacing
    pub fn resolves_gaps(self) -> bool {
        matches!(self, Level::RoadCrossing | Level::TrafficGauntlet)
    }

    /// Vertical span `[top, bottom)` where the avatar must be riding a log
    pub fn river_band(self) -> Option<(i32, i32)> {
        match self {
            Level::RoadCrossing => Some((2 * TILE, 5 * TILE)),
            Level::RiverRun => Some((3 * TILE, (ROWS - 2) * TILE)),
            Level::CritterSurvival | Level::TrafficGauntlet => None,
        }
    }

    /// Whether reaching the top row finishes this level
    pub fn has_goal(self) -> bool {
        !matches!(self, Level::CritterSurvival)
    }

    pub fn terrain(self, row: i32) -> Tile {
        if row == 0 {
            return Tile::Hud;
        }
        let border = row <= 2 || row >= ROWS - 2;
        match self {
            Level::RoadCrossing => match row {
                1 => Tile::Goal,
                2..=4 => Tile::Water,
                6..=11 => Tile::Road,
                14..=16 => Tile::Grass,
                r if r == ROWS - 1 => Tile::Start,
                _ => Tile::Blank,
            },
            Level::CritterSurvival if border => Tile::UglyGrass,
            Level::CritterSurvival => Tile::Grass,
            Level::TrafficGauntlet if border => Tile::Goal,
            Level::TrafficGauntlet => Tile::Road,
            Level::RiverRun if border => Tile::UglyGrass,
            Level::RiverRun => Tile::Water,
        }
    }

    pub fn help_lines(self) -> &'static [&'static str] {
        match self {
            Level::RoadCrossing => &[
                "Level 1: Why did the frog cross the road?",
                "WASD: move  |  Arrow keys: fire  |  1/2/3: fire mode",
                "P: pause  |  H: help  |  ESC: menu",
                "Reach the top or press Z to unlock Level 2",
            ],
            Level::CritterSurvival => &[
                "Level 2: Critter Survival",
                "KILL! KILL! KILL!  (30 critters to advance)",
                "WASD: move  |  Arrow keys: fire  |  1/2/3: fire mode",
                "H: help  |  ESC: menu",
            ],
            Level::TrafficGauntlet => &[
                "Level 3: Traffic Survival",
                "Reach the top to advance!",
                "WASD: move  |  Arrow keys: fire  |  1/2/3: fire mode",
                "H: help  |  ESC: menu",
            ],
            Level::RiverRun => &[
                "Level 4: River Run",
                "Ride logs across the water to the top.",
                "WASD: move  |  P: pause  |  H: help  |  ESC: menu",
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_chain() {
        let mut level = Level::default();
        let mut seen = vec![level.number()];
        while let Some(next) = level.next() {
            level = next;
            seen.push(level.number());
        }
        assert_eq!(seen, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_road_crossing_terrain() {
        let l = Level::RoadCrossing;
        assert_eq!(l.terrain(0), Tile::Hud);
        assert_eq!(l.terrain(1), Tile::Goal);
        assert_eq!(l.terrain(3), Tile::Water);
        assert_eq!(l.terrain(5), Tile::Blank);
        assert_eq!(l.terrain(9), Tile::Road);
        assert_eq!(l.terrain(13), Tile::Blank);
        assert_eq!(l.terrain(15), Tile::Grass);
        assert_eq!(l.terrain(17), Tile::Start);
    }

    #[test]
    fn test_bordered_levels() {
        assert_eq!(Level::TrafficGauntlet.terrain(2), Tile::Goal);
        assert_eq!(Level::TrafficGauntlet.terrain(3), Tile::Road);
        assert_eq!(Level::TrafficGauntlet.terrain(16), Tile::Goal);
        assert_eq!(Level::RiverRun.terrain(15), Tile::Water);
        assert_eq!(Level::RiverRun.terrain(17), Tile::UglyGrass);
        assert_eq!(Level::CritterSurvival.terrain(8), Tile::Grass);
    }

    #[test]
    fn test_level_traits() {
        assert!(!Level::RoadCrossing.has_combat());
        assert!(Level::CritterSurvival.has_combat());
        assert!(Level::TrafficGauntlet.has_combat());
        assert!(!Level::RiverRun.has_combat());
        assert!(!Level::CritterSurvival.has_goal());
        assert_eq!(Level::RoadCrossing.river_band(), Some((80, 200)));
        assert_eq!(Level::RiverRun.river_band(), Some((120, 640)));
        assert_eq!(Level::TrafficGauntlet.river_band(), None);
    }
}
