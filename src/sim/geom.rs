//! Axis-aligned rectangle geometry
//!
//! Every collision in the game is a rectangle overlap in board pixels
//! (origin top-left, y grows downward).

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Integer pixel rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Strict overlap test; rectangles that only share an edge do not intersect,
    /// and empty rectangles never intersect anything.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.w <= 0 || self.h <= 0 || other.w <= 0 || other.h <= 0 {
            return false;
        }
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Grow horizontally by `gap` on both sides (height unchanged)
    pub fn expand_x(&self, gap: i32) -> Rect {
        Rect::new(self.x - gap, self.y, self.w + 2 * gap, self.h)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            self.x as f32 + self.w as f32 / 2.0,
            self.y as f32 + self.h as f32 / 2.0,
        )
    }
}
