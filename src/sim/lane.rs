//! Horizontal spawn-and-motion tracks

use serde::{Deserialize, Serialize};

use crate::consts::TILE;

/// One row's motion and spawn cadence. Fixed for the lifetime of a level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lane {
    /// Top pixel of the lane row
    pub y: i32,
    /// Signed speed in px/tick (+ right, - left)
    pub speed: f32,
    /// Spawn attempt every N ticks
    pub spawn_every: u32,
}

impl Lane {
    pub fn new(row: i32, speed: f32, spawn_every: u32) -> Self {
        Self {
            y: row * TILE,
            speed,
            spawn_every: spawn_every.max(1),
        }
    }

    pub fn moves_right(&self) -> bool {
        self.speed > 0.0
    }

    pub fn row(&self) -> i32 {
        self.y / TILE
    }

    /// True on ticks where this lane may spawn
    pub fn due(&self, tick: u64) -> bool {
        tick % self.spawn_every as u64 == 0
    }

    /// X at which an actor of width `w` enters from the upstream edge,
    /// `margin` pixels outside the board
    pub fn entry_x(&self, w: i32, margin: i32) -> f32 {
        if self.moves_right() {
            (-w - margin) as f32
        } else {
            (crate::consts::BOARD_WIDTH + margin) as f32
        }
    }
}

/// All lanes of the active level, by kind
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LaneSet {
    pub road: Vec<Lane>,
    pub river: Vec<Lane>,
    pub critter: Vec<Lane>,
}

impl LaneSet {
    pub fn is_empty(&self) -> bool {
        self.road.is_empty() && self.river.is_empty() && self.critter.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::BOARD_WIDTH;

    #[test]
    fn test_lane_entry_side_follows_direction() {
        let right = Lane::new(6, 1.5, 51);
        assert_eq!(right.y, 240);
        assert_eq!(right.row(), 6);
        assert_eq!(right.entry_x(80, 12), -92.0);

        let left = Lane::new(7, -1.62, 48);
        assert_eq!(left.entry_x(80, 12), (BOARD_WIDTH + 12) as f32);
    }

    #[test]
    fn test_lane_due_on_cadence() {
        let lane = Lane::new(3, 2.0, 12);
        assert!(lane.due(0));
        assert!(!lane.due(5));
        assert!(lane.due(24));
    }
}
