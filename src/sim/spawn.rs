//! Lane layouts, initial seeding and per-tick edge spawns
//!
//! Every placement goes through the admission checks in `collision`, so a
//! spawn that would crowd an existing actor is simply skipped.

use rand::Rng;
use rand_pcg::Pcg32;

use super::actors::{CarPaint, Critter, CritterKind, Log, Vehicle, VehicleKind, Wiggle};
use super::collision::{critter_has_space, river_has_space, road_has_space};
use super::geom::Rect;
use super::lane::{Lane, LaneSet};
use super::level::Level;
use super::state::GameState;
use crate::consts::*;
use crate::settings::Settings;

/// Vehicles enter this far outside the board
pub const VEHICLE_EDGE_OFFSET: i32 = 12;
/// Logs and critters enter this far outside the board
pub const ACTOR_EDGE_OFFSET: i32 = 10;

const VEHICLE_SEED_ATTEMPTS: u32 = 40;
const LOG_SEED_ATTEMPTS: u32 = 20;
const CROSSING_CRITTER_SEED_ATTEMPTS: u32 = 2;

const CROSSING_LOG_CHANCE: f64 = 0.75;
const CROSSING_CRITTER_CHANCE: f64 = 0.65;
const SURVIVAL_SPEED: f32 = 2.0;
const SURVIVAL_CADENCE: u32 = 12;
const SURVIVAL_SPAWN_CHANCE: f64 = 0.98;
const SURVIVAL_DOUBLE_CHANCE: f64 = 0.20;
const GAUNTLET_SPAWN_CHANCE: f64 = 0.55;
const RIVER_SPAWN_CHANCE: f64 = 0.60;
const RIVER_CADENCE: u32 = 32;

/// Truck share and truck speed relative to the lane
#[derive(Debug, Clone, Copy)]
struct TrafficMix {
    truck_chance: f64,
    truck_speed: f32,
}

const CROSSING_TRAFFIC: TrafficMix = TrafficMix {
    truck_chance: 0.33,
    truck_speed: 0.85,
};
const GAUNTLET_SEED_TRAFFIC: TrafficMix = TrafficMix {
    truck_chance: 0.35,
    truck_speed: 0.9,
};
const GAUNTLET_TRAFFIC: TrafficMix = TrafficMix {
    truck_chance: 0.30,
    truck_speed: 0.9,
};

/// `base` scaled by a uniform factor in `[1 - f, 1 + f]`
fn vary(rng: &mut Pcg32, base: f32, factor: f32) -> f32 {
    base * (1.0 + (rng.random::<f32>() * 2.0 - 1.0) * factor)
}

fn scaled_cadence(base: i32, scale: f32) -> u32 {
    ((base as f32) * scale).round().max(1.0) as u32
}

fn signed(speed: f32, right: bool) -> f32 {
    if right { speed } else { -speed }
}

/// Lane layout of `level`. Road crossing cadences scale with the density settings.
pub fn lanes_for(level: Level, settings: &Settings) -> LaneSet {
    let mut lanes = LaneSet::default();
    match level {
        Level::RoadCrossing => {
            for (i, row) in [4, 3, 2].into_iter().enumerate() {
                let i = i as i32;
                let speed = signed(1.25 + 0.2 * i as f32, i % 2 == 0);
                let cadence = scaled_cadence((46 - 2 * i).max(18), settings.log_density);
                lanes.river.push(Lane::new(row, speed, cadence));
            }
            for (i, row) in (6..=11).enumerate() {
                let i = i as i32;
                let speed = signed(1.5 + 0.12 * i as f32, i % 2 == 0);
                let cadence = scaled_cadence((32 - 2 * i).max(14), settings.traffic_density);
                lanes.road.push(Lane::new(row, speed, cadence));
            }
            let critter_scale = settings.critter_density.clamp(0.8, 2.0);
            for (i, row) in [16, 15, 14].into_iter().enumerate() {
                let i = i as i32;
                let speed = signed(1.4 + 0.2 * i as f32, i % 2 == 0);
                let cadence = scaled_cadence((38 - i).max(16), critter_scale);
                lanes.critter.push(Lane::new(row, speed, cadence));
            }
        }
        Level::CritterSurvival => {
            for row in 3..=ROWS - 3 {
                let speed = signed(SURVIVAL_SPEED, row % 2 == 0);
                lanes.critter.push(Lane::new(row, speed, SURVIVAL_CADENCE));
            }
        }
        Level::TrafficGauntlet => {
            for row in 3..=ROWS - 3 {
                let step = row % 3;
                let speed = signed(1.65 + step as f32 * 0.12, row % 2 == 1);
                let cadence = (26 - step * 2).max(16) as u32;
                lanes.road.push(Lane::new(row, speed, cadence));
            }
        }
        Level::RiverRun => {
            for row in 3..=ROWS - 3 {
                let speed = signed(1.55 + (row % 3) as f32 * 0.10, row % 2 == 0);
                lanes.river.push(Lane::new(row, speed, RIVER_CADENCE));
            }
        }
    }
    lanes
}

fn roll_vehicle(rng: &mut Pcg32, lane: &Lane, mix: TrafficMix) -> (VehicleKind, f32) {
    if rng.random_bool(mix.truck_chance) {
        return (
            VehicleKind::Truck,
            vary(rng, lane.speed * mix.truck_speed, 0.25),
        );
    }
    let paint = if rng.random_bool(0.5) {
        CarPaint::Red
    } else {
        CarPaint::Normal
    };
    (VehicleKind::Car(paint), vary(rng, lane.speed, 0.25))
}

fn roll_critter(rng: &mut Pcg32) -> CritterKind {
    if rng.random_bool(0.5) {
        CritterKind::Bird
    } else {
        CritterKind::Snake
    }
}

/// Critter speed on road crossing grass rows
fn crossing_critter_speed(kind: CritterKind, lane: &Lane) -> f32 {
    match kind {
        CritterKind::Bird => lane.speed * 1.1,
        CritterKind::Snake => lane.speed * 0.9,
    }
}

fn try_place_vehicle(state: &mut GameState, kind: VehicleKind, x: f32, lane: &Lane, speed: f32) -> bool {
    let (w, h) = kind.size();
    let y = lane.y + VEHICLE_LANE_OFFSET;
    if !road_has_space(&state.vehicles, &Rect::new(x as i32, y, w, h), VEHICLE_MIN_GAP) {
        return false;
    }
    let id = state.next_entity_id();
    state.vehicles.push(Vehicle::new(id, kind, x, y, speed));
    true
}

fn try_place_log(state: &mut GameState, x: f32, lane: &Lane, gap: i32) -> bool {
    let y = lane.y + LOG_LANE_OFFSET;
    let cand = Rect::new(x as i32, y, LOG_SIZE.0, LOG_SIZE.1);
    if !river_has_space(&state.logs, lane, &cand, gap) {
        return false;
    }
    let id = state.next_entity_id();
    state.logs.push(Log::new(id, x, y, lane.speed));
    true
}

fn try_place_critter(
    state: &mut GameState,
    kind: CritterKind,
    x: f32,
    lane: &Lane,
    speed: f32,
    wiggle: Option<Wiggle>,
) -> bool {
    let (w, h) = kind.size();
    let y = lane.y + kind.lane_offset();
    if !critter_has_space(&state.critters, lane, &Rect::new(x as i32, y, w, h), CRITTER_MIN_GAP) {
        return false;
    }
    let id = state.next_entity_id();
    let mut critter = Critter::new(id, kind, x, y as f32, speed);
    critter.wiggle = wiggle;
    state.critters.push(critter);
    true
}

fn seed_vehicles(state: &mut GameState, lane: &Lane, target: usize, mix: TrafficMix) {
    let mut seeded = 0;
    for _ in 0..VEHICLE_SEED_ATTEMPTS {
        if seeded >= target {
            break;
        }
        let (kind, speed) = roll_vehicle(&mut state.rng, lane, mix);
        let x = state.rng.random_range(0..BOARD_WIDTH - kind.size().0) as f32;
        if try_place_vehicle(state, kind, x, lane, speed) {
            seeded += 1;
        }
    }
}

fn seed_logs(state: &mut GameState, lane: &Lane, target: usize) {
    let mut seeded = 0;
    for _ in 0..LOG_SEED_ATTEMPTS {
        if seeded >= target {
            break;
        }
        let x = state.rng.random_range(0..BOARD_WIDTH - LOG_SIZE.0) as f32;
        if try_place_log(state, x, lane, LOG_SEED_GAP) {
            seeded += 1;
        }
    }
}

/// Populate the freshly built lanes of the current level
pub fn seed_level(state: &mut GameState) {
    let lanes = state.lanes.clone();
    match state.level {
        Level::RoadCrossing => {
            for lane in &lanes.road {
                seed_vehicles(state, lane, 2, CROSSING_TRAFFIC);
            }
            for lane in &lanes.river {
                seed_logs(state, lane, 2);
            }
            // Two tries per lane whether or not they land
            for lane in &lanes.critter {
                for _ in 0..CROSSING_CRITTER_SEED_ATTEMPTS {
                    let kind = roll_critter(&mut state.rng);
                    let x = state.rng.random_range(0..BOARD_WIDTH - kind.size().0) as f32;
                    let speed = crossing_critter_speed(kind, lane);
                    try_place_critter(state, kind, x, lane, speed, None);
                }
            }
        }
        // Filled on the first tick by population upkeep
        Level::CritterSurvival => {}
        Level::TrafficGauntlet => {
            for lane in &lanes.road {
                let target = 1 + usize::from(state.rng.random_bool(0.6));
                seed_vehicles(state, lane, target, GAUNTLET_SEED_TRAFFIC);
            }
        }
        Level::RiverRun => {
            for lane in &lanes.river {
                let target = usize::from(state.rng.random_bool(0.5));
                seed_logs(state, lane, target);
            }
        }
    }
}

fn spawn_vehicle(state: &mut GameState, lane: &Lane, mix: TrafficMix) {
    let (kind, speed) = roll_vehicle(&mut state.rng, lane, mix);
    let x = lane.entry_x(kind.size().0, VEHICLE_EDGE_OFFSET);
    try_place_vehicle(state, kind, x, lane, speed);
}

fn spawn_log(state: &mut GameState, lane: &Lane) {
    let x = lane.entry_x(LOG_SIZE.0, ACTOR_EDGE_OFFSET);
    try_place_log(state, x, lane, LOG_SPAWN_GAP);
}

/// Keep critter survival's population inside its band. Below the minimum
/// every lane spawns (sometimes twice); otherwise lanes spawn on cadence.
fn maintain_critters(state: &mut GameState) {
    let mut alive = state.critters.len();
    let lanes = state.lanes.critter.clone();
    for lane in &lanes {
        if alive >= CRITTER_MAX_ONSCREEN {
            break;
        }
        let forced = alive < CRITTER_MIN_ONSCREEN;
        let due = lane.due(state.ticks) && state.rng.random_bool(SURVIVAL_SPAWN_CHANCE);
        if !forced && !due {
            continue;
        }
        let mut spawns = 1 + usize::from(forced && state.rng.random_bool(SURVIVAL_DOUBLE_CHANCE));
        while spawns > 0 && alive < CRITTER_MAX_ONSCREEN {
            spawns -= 1;
            let kind = roll_critter(&mut state.rng);
            let x = lane.entry_x(kind.size().0, ACTOR_EDGE_OFFSET);
            let wiggle = Wiggle {
                band_top: lane.y,
                dir: if state.rng.random_bool(0.5) { 1.0 } else { -1.0 },
            };
            if try_place_critter(state, kind, x, lane, lane.speed, Some(wiggle)) {
                alive += 1;
            }
        }
    }
}

/// Edge spawns for the current tick
pub fn spawn_tick(state: &mut GameState) {
    let lanes = state.lanes.clone();
    let tick = state.ticks;
    match state.level {
        Level::RoadCrossing => {
            for lane in lanes.road.iter().filter(|l| l.due(tick)) {
                spawn_vehicle(state, lane, CROSSING_TRAFFIC);
            }
            for lane in lanes.river.iter().filter(|l| l.due(tick)) {
                if state.rng.random_bool(CROSSING_LOG_CHANCE) {
                    spawn_log(state, lane);
                }
            }
            for lane in lanes.critter.iter().filter(|l| l.due(tick)) {
                if state.rng.random_bool(CROSSING_CRITTER_CHANCE) {
                    let kind = roll_critter(&mut state.rng);
                    let x = lane.entry_x(kind.size().0, ACTOR_EDGE_OFFSET);
                    let speed = crossing_critter_speed(kind, lane);
                    try_place_critter(state, kind, x, lane, speed, None);
                }
            }
        }
        Level::CritterSurvival => maintain_critters(state),
        Level::TrafficGauntlet => {
            for lane in lanes.road.iter().filter(|l| l.due(tick)) {
                if state.rng.random_bool(GAUNTLET_SPAWN_CHANCE) {
                    spawn_vehicle(state, lane, GAUNTLET_TRAFFIC);
                }
            }
        }
        Level::RiverRun => {
            for lane in lanes.river.iter().filter(|l| l.due(tick)) {
                if state.rng.random_bool(RIVER_SPAWN_CHANCE) {
                    spawn_log(state, lane);
                }
            }
        }
    }
}
