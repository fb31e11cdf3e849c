//! Post-motion spacing for road vehicles
//!
//! Vehicles on a road lane have slightly different speeds, so faster ones
//! catch up. Once per tick each road lane is swept and any adjacent pair
//! closer than the minimum gap is pushed apart.

use super::actors::{Body, Vehicle};
use super::lane::Lane;
use crate::consts::VEHICLE_LANE_OFFSET;

/// Vehicles within this many pixels of the lane's vehicle row belong to it
const LANE_ROW_TOLERANCE: i32 = 2;

/// Resolve spacing on every road lane
pub fn resolve_road_gaps(vehicles: &mut [Vehicle], lanes: &[Lane], min_gap: i32) {
    for lane in lanes {
        resolve_lane_gaps(vehicles, lane, min_gap);
    }
}

/// Single sweep over one lane.
///
/// Pairs are visited in the lane's direction of travel. When both vehicles of
/// a pair travel the same way, the one further downstream is pushed ahead by
/// the full shortfall, so a push never undoes a pair that was already fixed.
/// Opposite directions split the shortfall evenly.
pub fn resolve_lane_gaps(vehicles: &mut [Vehicle], lane: &Lane, min_gap: i32) {
    let row_y = lane.y + VEHICLE_LANE_OFFSET;
    let mut order: Vec<usize> = vehicles
        .iter()
        .enumerate()
        .filter(|(_, v)| (v.y - row_y).abs() <= LANE_ROW_TOLERANCE)
        .map(|(i, _)| i)
        .collect();
    if order.len() < 2 {
        return;
    }
    order.sort_by(|&a, &b| vehicles[a].x.total_cmp(&vehicles[b].x));

    let pairs = order.len() - 1;
    let forward = lane.speed >= 0.0;
    for step in 0..pairs {
        let i = if forward { step } else { pairs - 1 - step };
        let (a, b) = (order[i], order[i + 1]);
        let (ra, rb) = (vehicles[a].bounds(), vehicles[b].bounds());

        let needed = ra.right() + min_gap - rb.x;
        if needed <= 0 {
            continue;
        }
        let needed = needed as f32;

        let (sa, sb) = (vehicles[a].speed, vehicles[b].speed);
        if sa.signum() == sb.signum() {
            if sa > 0.0 {
                vehicles[b].x += needed;
            } else {
                vehicles[a].x -= needed;
            }
        } else {
            vehicles[a].x -= needed / 2.0;
            vehicles[b].x += needed / 2.0;
        }
    }
}
