//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one call to `tick` per frame)
//! - Seeded RNG only
//! - Pools iterated in insertion order
//! - No rendering, file or platform dependencies

pub mod actors;
pub mod collision;
pub mod combat;
pub mod gaps;
pub mod geom;
pub mod lane;
pub mod level;
pub mod progression;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use actors::{
    AVATAR_START, Avatar, Body, CarPaint, Critter, CritterKind, Direction, Log, Projectile, Puff,
    Vehicle, VehicleKind,
};
pub use combat::{Combat, FireMode};
pub use geom::Rect;
pub use lane::{Lane, LaneSet};
pub use level::{Level, Tile};
pub use progression::{PowerLevel, tier_for_score};
pub use snapshot::{ActorKind, ActorView, Hud, PuffView, Snapshot};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
