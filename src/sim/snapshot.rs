//! Read-only view of a tick for renderers
//!
//! Holds everything a frame needs (terrain, actors in draw order, HUD and
//! overlays) without exposing the live pools.

use glam::Vec2;
use serde::Serialize;

use super::actors::{Body, CarPaint, CritterKind, Direction, VehicleKind};
use super::geom::Rect;
use super::level::Tile;
use super::state::{GamePhase, GameState};
use crate::consts::*;

/// What an actor view depicts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ActorKind {
    Car(CarPaint),
    Truck,
    Log,
    Bird,
    Snake,
    Projectile,
    /// `hopped` is false for the spawn pose before the first hop of a run
    Avatar { facing: Direction, hopped: bool },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActorView {
    pub kind: ActorKind,
    pub rect: Rect,
    /// Mirror the art horizontally
    pub flip_x: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PuffView {
    pub center: Vec2,
    pub radius: f32,
    pub alpha: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub level: u8,
    pub lives: u8,
    pub score: u64,
    pub player_name: String,
    pub paused: bool,
}

impl Hud {
    /// The single HUD line
    pub fn line(&self) -> String {
        let mut line = format!(
            "Level: {} | Lives: {} | Score: {} | Player: {}",
            self.level, self.lives, self.score, self.player_name
        );
        if self.paused {
            line.push_str("   [PAUSED]");
        }
        line
    }
}

/// "Level Up!" flash after a tier rise
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LevelUpBanner {
    pub tier: u8,
    /// 1.0 when the flash starts, falling to 0
    pub intensity: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// One tile kind per board row, row 0 first
    pub terrain: Vec<Tile>,
    /// Dashed centre lines of road lanes
    pub road_marks: Vec<Rect>,
    /// Actors in draw order, avatar last
    pub actors: Vec<ActorView>,
    pub puffs: Vec<PuffView>,
    pub hud: Hud,
    pub level_up: Option<LevelUpBanner>,
    /// Number of the level being announced
    pub transition_to: Option<u8>,
    pub help: Option<Vec<&'static str>>,
}

const ROAD_MARK_SPACING: usize = 60;
const ROAD_MARK_SIZE: (i32, i32) = (30, 2);

fn vehicle_view(kind: VehicleKind, rect: Rect, speed: f32) -> ActorView {
    match kind {
        // Car art faces right
        VehicleKind::Car(paint) => ActorView {
            kind: ActorKind::Car(paint),
            rect,
            flip_x: speed < 0.0,
        },
        // Truck art faces left
        VehicleKind::Truck => ActorView {
            kind: ActorKind::Truck,
            rect,
            flip_x: speed > 0.0,
        },
    }
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let terrain = (0..ROWS).map(|row| state.level.terrain(row)).collect();

        let road_marks = state
            .lanes
            .road
            .iter()
            .flat_map(|lane| {
                (0..BOARD_WIDTH).step_by(ROAD_MARK_SPACING).map(move |x| {
                    Rect::new(
                        x,
                        lane.y + TILE / 2 - 1,
                        ROAD_MARK_SIZE.0,
                        ROAD_MARK_SIZE.1,
                    )
                })
            })
            .collect();

        let mut actors = Vec::with_capacity(
            state.logs.len()
                + state.vehicles.len()
                + state.critters.len()
                + state.combat.projectiles.len()
                + 1,
        );
        actors.extend(state.logs.iter().map(|l| ActorView {
            kind: ActorKind::Log,
            rect: l.bounds(),
            flip_x: false,
        }));
        // Trucks under cars
        let (trucks, cars): (Vec<_>, Vec<_>) = state
            .vehicles
            .iter()
            .partition(|v| v.kind == VehicleKind::Truck);
        actors.extend(
            trucks
                .into_iter()
                .chain(cars)
                .map(|v| vehicle_view(v.kind, v.bounds(), v.speed)),
        );
        actors.extend(state.critters.iter().map(|c| ActorView {
            kind: match c.kind {
                CritterKind::Bird => ActorKind::Bird,
                CritterKind::Snake => ActorKind::Snake,
            },
            rect: c.bounds(),
            flip_x: c.speed < 0.0,
        }));
        actors.extend(state.combat.projectiles.iter().map(|p| ActorView {
            kind: ActorKind::Projectile,
            rect: p.bounds(),
            flip_x: false,
        }));
        actors.push(ActorView {
            kind: ActorKind::Avatar {
                facing: state.avatar.facing,
                hopped: state.avatar.hopped,
            },
            rect: state.avatar.bounds(),
            flip_x: false,
        });

        let puffs = state
            .combat
            .puffs
            .iter()
            .map(|p| PuffView {
                center: p.center,
                radius: p.radius,
                alpha: p.alpha(),
            })
            .collect();

        let level_up = state.power.flashing().then(|| LevelUpBanner {
            tier: state.power.tier,
            intensity: state.power.flash_ticks as f32 / LEVEL_UP_FLASH_TICKS as f32,
        });

        let transition_to = match state.phase {
            GamePhase::Transition { next, .. } => Some(next.number()),
            _ => None,
        };

        Self {
            terrain,
            road_marks,
            actors,
            puffs,
            hud: Hud {
                level: state.level.number(),
                lives: state.lives,
                score: state.score,
                player_name: state.player_name.clone(),
                paused: state.phase == GamePhase::Paused,
            },
            level_up,
            transition_to,
            help: state.show_help.then(|| state.level.help_lines().to_vec()),
        }
    }
}
