//! Frogger's Revenge - a four-level tile arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (actors, lanes, levels, combat, scoring)
//! - `assets`: Sprite lookup with primitive-shape placeholders
//! - `platform`: Host input mapping
//! - `session`: Host-shell notifications around the simulation
//! - `highscores`: CSV scoreboard

pub mod assets;
pub mod error;
pub mod highscores;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::{ScoreStoreError, SettingsError};
pub use highscores::{ScoreBoard, ScoreRecord};
pub use session::{GameSession, HostShell, ScoreboardShell};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 60;

    /// Board geometry
    pub const TILE: i32 = 40;
    pub const COLS: i32 = 16;
    pub const ROWS: i32 = 18;
    pub const BOARD_WIDTH: i32 = COLS * TILE;
    pub const BOARD_HEIGHT: i32 = ROWS * TILE;

    /// Actor sizes (w, h)
    pub const CAR_SIZE: (i32, i32) = (TILE * 2, TILE - 10);
    pub const TRUCK_SIZE: (i32, i32) = (TILE * 3, TILE - 8);
    pub const LOG_SIZE: (i32, i32) = (TILE * 3, TILE - 12);
    pub const BIRD_SIZE: (i32, i32) = (TILE - 8, TILE - 14);
    pub const SNAKE_SIZE: (i32, i32) = (TILE * 8 / 5, TILE - 12);
    pub const AVATAR_SIZE: i32 = TILE - 4;
    pub const PROJECTILE_SIZE: i32 = 10;

    /// Vertical offsets of each actor kind inside its lane band
    pub const VEHICLE_LANE_OFFSET: i32 = 5;
    pub const LOG_LANE_OFFSET: i32 = 6;
    pub const BIRD_LANE_OFFSET: i32 = 7;
    pub const SNAKE_LANE_OFFSET: i32 = 6;

    /// Spacing
    pub const VEHICLE_MIN_GAP: i32 = TILE;
    pub const CRITTER_MIN_GAP: i32 = TILE / 2;
    pub const LOG_SEED_GAP: i32 = TILE / 2;
    pub const LOG_SPAWN_GAP: i32 = TILE / 3;
    /// Actors are dropped once this far past either board edge
    pub const OFFBOARD_MARGIN: f32 = 60.0;

    /// Scoring
    pub const STARTING_LIVES: u8 = 3;
    pub const KILL_SCORE: u64 = 25;
    pub const COMBO_STEP_SCORE: u64 = 5;
    pub const COMBO_CAP: u32 = 9;
    pub const COMBO_WINDOW_TICKS: u32 = 60;
    pub const DEATH_PENALTY: u64 = 25;
    pub const GOAL_BONUS: u64 = 100;
    pub const ROW_CLIMB_BONUS: u64 = 10;
    pub const FINAL_BONUS: u64 = 250;

    /// Power tiers
    pub const TIER2_THRESHOLD: u64 = 1000;
    pub const TIER3_THRESHOLD: u64 = 3000;
    pub const MAX_TIER: u8 = 3;
    pub const LEVEL_UP_FLASH_TICKS: u32 = 45;

    /// Level transition overlay (~1 second)
    pub const TRANSITION_TICKS: u32 = 60;

    /// Critter survival
    pub const KILL_TARGET: u32 = 30;
    pub const CRITTER_MIN_ONSCREEN: usize = 15;
    pub const CRITTER_MAX_ONSCREEN: usize = 20;
}
