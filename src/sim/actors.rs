//! Actor kinds: vehicles, logs, critters, projectiles, puffs and the avatar
//!
//! Actors are plain records with a stable integer id. Horizontal positions are
//! sub-pixel floats; collision always goes through the integer `bounds()`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use crate::consts::*;

/// Cardinal direction on the board (screen space, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    #[default]
    Up,
    Down,
}

impl Direction {
    /// Unit step in screen coordinates
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }
}

/// Anything that occupies a lane band
pub trait Body {
    fn bounds(&self) -> Rect;
    /// Top edge used for lane-band proximity checks
    fn top(&self) -> f32;
    /// Signed horizontal speed (px/tick)
    fn speed(&self) -> f32;
}

/// Car paint job (visual only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CarPaint {
    Normal,
    Red,
}

/// The two road vehicle kinds, handled uniformly by the gap resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleKind {
    Car(CarPaint),
    Truck,
}

impl VehicleKind {
    pub fn size(self) -> (i32, i32) {
        match self {
            VehicleKind::Car(_) => CAR_SIZE,
            VehicleKind::Truck => TRUCK_SIZE,
        }
    }
}

/// A car or truck on a road lane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: u32,
    pub kind: VehicleKind,
    pub x: f32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    pub speed: f32,
}

impl Vehicle {
    pub fn new(id: u32, kind: VehicleKind, x: f32, y: i32, speed: f32) -> Self {
        let (w, h) = kind.size();
        Self {
            id,
            kind,
            x,
            y,
            w,
            h,
            speed,
        }
    }

    pub fn advance(&mut self) {
        self.x += self.speed;
    }
}

impl Body for Vehicle {
    fn bounds(&self) -> Rect {
        Rect::new(self.x as i32, self.y, self.w, self.h)
    }

    fn top(&self) -> f32 {
        self.y as f32
    }

    fn speed(&self) -> f32 {
        self.speed
    }
}

/// A floating log on a river lane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Log {
    pub id: u32,
    pub x: f32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    pub speed: f32,
}

impl Log {
    pub fn new(id: u32, x: f32, y: i32, speed: f32) -> Self {
        Self {
            id,
            x,
            y,
            w: LOG_SIZE.0,
            h: LOG_SIZE.1,
            speed,
        }
    }

    pub fn advance(&mut self) {
        self.x += self.speed;
    }
}

impl Body for Log {
    fn bounds(&self) -> Rect {
        Rect::new(self.x as i32, self.y, self.w, self.h)
    }

    fn top(&self) -> f32 {
        self.y as f32
    }

    fn speed(&self) -> f32 {
        self.speed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CritterKind {
    Bird,
    Snake,
}

impl CritterKind {
    pub fn size(self) -> (i32, i32) {
        match self {
            CritterKind::Bird => BIRD_SIZE,
            CritterKind::Snake => SNAKE_SIZE,
        }
    }

    /// Offset of the critter's top edge inside its lane band
    pub fn lane_offset(self) -> i32 {
        match self {
            CritterKind::Bird => BIRD_LANE_OFFSET,
            CritterKind::Snake => SNAKE_LANE_OFFSET,
        }
    }

    /// Vertical wiggle speed in critter survival (px/tick)
    pub fn wiggle_speed(self) -> f32 {
        match self {
            CritterKind::Bird => 0.6,
            CritterKind::Snake => 0.6 * 0.9,
        }
    }
}

/// Vertical oscillation inside the spawning lane's band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wiggle {
    /// Top pixel of the lane the critter spawned in
    pub band_top: i32,
    /// +1.0 moving down, -1.0 moving up
    pub dir: f32,
}

/// A bird or snake
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Critter {
    pub id: u32,
    pub kind: CritterKind,
    pub x: f32,
    pub y: f32,
    pub w: i32,
    pub h: i32,
    pub speed: f32,
    /// Only set for critters spawned in critter survival
    pub wiggle: Option<Wiggle>,
}

impl Critter {
    pub fn new(id: u32, kind: CritterKind, x: f32, y: f32, speed: f32) -> Self {
        let (w, h) = kind.size();
        Self {
            id,
            kind,
            x,
            y,
            w,
            h,
            speed,
            wiggle: None,
        }
    }

    pub fn advance(&mut self) {
        self.x += self.speed;
    }

    /// Apply one tick of vertical wiggle, bouncing inside the lane band.
    /// `flip` reverses horizontal direction.
    pub fn wiggle_step(&mut self, flip: bool) {
        let Some(wiggle) = self.wiggle.as_mut() else {
            return;
        };
        self.y += wiggle.dir * self.kind.wiggle_speed();

        let min_y = (wiggle.band_top + 2) as f32;
        let max_y = (wiggle.band_top + TILE - self.h - 2) as f32;
        if self.y < min_y {
            self.y = min_y;
            wiggle.dir = 1.0;
        } else if self.y > max_y {
            self.y = max_y;
            wiggle.dir = -1.0;
        }

        if flip {
            self.speed = -self.speed;
        }
    }
}

impl Body for Critter {
    fn bounds(&self) -> Rect {
        Rect::new(self.x.round() as i32, self.y.round() as i32, self.w, self.h)
    }

    fn top(&self) -> f32 {
        self.y
    }

    fn speed(&self) -> f32 {
        self.speed
    }
}

/// A player shot (top-left position, per-tick velocity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Projectile {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self { pos, vel }
    }

    pub fn advance(&mut self) {
        self.pos += self.vel;
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.pos.x as i32,
            self.pos.y as i32,
            PROJECTILE_SIZE,
            PROJECTILE_SIZE,
        )
    }

    /// Off the board, including above the HUD strip
    pub fn is_offboard(&self) -> bool {
        let size = PROJECTILE_SIZE as f32;
        self.pos.x < -size
            || self.pos.y < (TILE - PROJECTILE_SIZE) as f32
            || self.pos.x > BOARD_WIDTH as f32 + size
            || self.pos.y > BOARD_HEIGHT as f32 + size
    }
}

/// Puff lifetime in ticks
pub const PUFF_LIFE_TICKS: u32 = 16;

/// Short-lived kill effect (visual only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Puff {
    pub center: Vec2,
    pub radius: f32,
    pub life: u32,
}

impl Puff {
    pub fn new(center: Vec2) -> Self {
        Self {
            center,
            radius: 2.0,
            life: PUFF_LIFE_TICKS,
        }
    }

    /// Grow and age; returns false once expired
    pub fn update(&mut self) -> bool {
        self.radius += 0.9;
        self.life = self.life.saturating_sub(1);
        self.life > 0
    }

    /// 0-255 alpha for the renderer
    pub fn alpha(&self) -> u8 {
        (self.life * 12).min(255) as u8
    }
}

/// Start tile of the avatar (bottom centre)
pub const AVATAR_START: (i32, i32) = (BOARD_WIDTH / 2 - TILE / 2, (ROWS - 1) * TILE + 4);

/// The player piece
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Avatar {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    pub alive: bool,
    pub facing: Direction,
    /// False until the first hop of the run; the spawn pose has its own art
    pub hopped: bool,
}

impl Default for Avatar {
    fn default() -> Self {
        Self {
            x: AVATAR_START.0,
            y: AVATAR_START.1,
            w: AVATAR_SIZE,
            h: AVATAR_SIZE,
            alive: true,
            facing: Direction::Up,
            hopped: false,
        }
    }
}

impl Avatar {
    /// Back to the start tile, alive. Facing and the hop flag are kept.
    pub fn respawn(&mut self) {
        self.x = AVATAR_START.0;
        self.y = AVATAR_START.1;
        self.alive = true;
    }

    /// One tile step; always ends clamped to the board
    pub fn step(&mut self, dir: Direction) {
        if !self.alive {
            return;
        }
        let (dx, dy) = dir.delta();
        self.x += dx * TILE;
        self.y += dy * TILE;
        self.facing = dir;
        self.hopped = true;
        self.clamp_to_board();
    }

    /// Horizontal carry from a log (sub-pixel speeds truncate toward zero)
    pub fn carry(&mut self, speed: f32) {
        self.x = (self.x as f32 + speed) as i32;
        self.clamp_to_board();
    }

    /// Keep inside the board and below the HUD row
    pub fn clamp_to_board(&mut self) {
        self.x = self.x.clamp(0, BOARD_WIDTH - self.w);
        self.y = self.y.clamp(TILE, BOARD_HEIGHT - self.h);
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }

    pub fn center(&self) -> Vec2 {
        self.bounds().center()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avatar_steps_are_tile_snapped_and_clamped() {
        let mut avatar = Avatar::default();
        assert_eq!(avatar.facing, Direction::Up);
        assert!(!avatar.hopped);

        avatar.step(Direction::Down);
        assert!(avatar.hopped);
        assert_eq!(avatar.y, BOARD_HEIGHT - AVATAR_SIZE);
        assert_eq!(avatar.facing, Direction::Down);

        for _ in 0..20 {
            avatar.step(Direction::Left);
        }
        assert_eq!(avatar.x, 0);
        assert_eq!(avatar.facing, Direction::Left);

        for _ in 0..30 {
            avatar.step(Direction::Up);
        }
        assert_eq!(avatar.y, TILE);
    }

    #[test]
    fn test_dead_avatar_ignores_steps() {
        let mut avatar = Avatar::default();
        avatar.alive = false;
        avatar.step(Direction::Left);
        assert_eq!(avatar.x, AVATAR_START.0);
    }

    #[test]
    fn test_carry_clamps_at_edge() {
        let mut avatar = Avatar::default();
        avatar.x = BOARD_WIDTH - AVATAR_SIZE - 1;
        avatar.carry(1.55);
        assert_eq!(avatar.x, BOARD_WIDTH - AVATAR_SIZE);
    }

    #[test]
    fn test_critter_wiggle_bounces_inside_band() {
        let mut bird = Critter::new(1, CritterKind::Bird, 0.0, 207.0, 2.0);
        bird.wiggle = Some(Wiggle {
            band_top: 200,
            dir: -1.0,
        });
        for _ in 0..100 {
            bird.wiggle_step(false);
            assert!(bird.y >= 202.0);
            assert!(bird.y <= (200 + TILE - BIRD_SIZE.1 - 2) as f32);
        }
        bird.wiggle_step(true);
        assert_eq!(bird.speed, -2.0);
    }

    #[test]
    fn test_projectile_above_hud_is_offboard() {
        let p = Projectile::new(Vec2::new(100.0, 29.0), Vec2::ZERO);
        assert!(p.is_offboard());
        let p = Projectile::new(Vec2::new(100.0, 31.0), Vec2::ZERO);
        assert!(!p.is_offboard());
    }

    #[test]
    fn test_puff_expires() {
        let mut puff = Puff::new(Vec2::ZERO);
        let mut ticks = 0;
        while puff.update() {
            ticks += 1;
        }
        assert_eq!(ticks, PUFF_LIFE_TICKS - 1);
    }
}
