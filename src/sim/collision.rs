//! Collision queries and spawn admission control
//!
//! Lanes are not tracked per actor. "Same lane" is approximated by vertical
//! proximity of top edges, since several actor kinds share a lane band.

use super::actors::{Body, Critter, Log, Vehicle};
use super::geom::Rect;
use super::lane::Lane;
use crate::consts::TILE;

/// Vehicles within this many pixels of the candidate's top edge share its lane
pub const VEHICLE_BAND_TOLERANCE: f32 = 2.0;
/// Logs and critters within this many pixels of the lane's top share it
pub const LANE_BAND_TOLERANCE: f32 = (TILE / 2) as f32;

/// Check whether `candidate` keeps at least `gap` pixels of horizontal
/// clearance from every actor whose top edge lies within `tolerance` of `band_y`.
///
/// Each same-band actor is grown by `gap` on both sides and tested for
/// overlap with the candidate.
pub fn has_space_for<B: Body>(
    actors: &[B],
    band_y: f32,
    tolerance: f32,
    candidate: &Rect,
    gap: i32,
) -> bool {
    actors
        .iter()
        .filter(|a| (a.top() - band_y).abs() < tolerance)
        .all(|a| !a.bounds().expand_x(gap).intersects(candidate))
}

/// Admission for road lanes: vehicles sharing the candidate's row
pub fn road_has_space(vehicles: &[Vehicle], candidate: &Rect, gap: i32) -> bool {
    has_space_for(
        vehicles,
        candidate.y as f32,
        VEHICLE_BAND_TOLERANCE,
        candidate,
        gap,
    )
}

/// Admission for river lanes: logs within half a tile of the lane
pub fn river_has_space(logs: &[Log], lane: &Lane, candidate: &Rect, gap: i32) -> bool {
    has_space_for(logs, lane.y as f32, LANE_BAND_TOLERANCE, candidate, gap)
}

/// Admission for critter lanes: birds and snakes within half a tile of the lane
pub fn critter_has_space(critters: &[Critter], lane: &Lane, candidate: &Rect, gap: i32) -> bool {
    has_space_for(critters, lane.y as f32, LANE_BAND_TOLERANCE, candidate, gap)
}

/// Index of the first body overlapping `rect`, in pool order
pub fn first_overlap<B: Body>(bodies: &[B], rect: &Rect) -> Option<usize> {
    bodies.iter().position(|b| b.bounds().intersects(rect))
}

/// Speed of the first log under `rect`, if any
pub fn log_under(logs: &[Log], rect: &Rect) -> Option<f32> {
    first_overlap(logs, rect).map(|i| logs[i].speed)
}
