//! Fixed timestep simulation tick
//!
//! Order within a tick: input, clocks, spawns, motion, road spacing, combat,
//! off-board trim, then the level's avatar rules (score, death, goal).

use rand::Rng;

use super::actors::{Body, Direction};
use super::collision::{first_overlap, log_under};
use super::combat::FireMode;
use super::gaps::resolve_road_gaps;
use super::level::Level;
use super::spawn;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Chance per tick that a wandering critter reverses
const CRITTER_FLIP_CHANCE: f64 = 0.01;

/// Discrete, edge-triggered commands for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// One tile step
    pub step: Option<Direction>,
    /// Fire in a direction (combat levels only)
    pub fire: Option<Direction>,
    /// Select a fire mode (tier-gated)
    pub select_mode: Option<FireMode>,
    /// Pause toggle
    pub pause: bool,
    /// Help box toggle
    pub toggle_help: bool,
    /// Skip to the next level (debug)
    pub skip_level: bool,
    /// Leave for the menu
    pub back_to_menu: bool,
}

impl TickInput {
    pub fn is_empty(&self) -> bool {
        *self == TickInput::default()
    }
}

/// Advance the game by one tick. Returns a notification for the host shell
/// when the run ends or the player leaves.
pub fn tick(state: &mut GameState, input: &TickInput) -> Option<GameEvent> {
    if state.is_finished() {
        return None;
    }

    if input.back_to_menu {
        log::info!("Back to menu from level {}", state.level.number());
        state.phase = GamePhase::Exited;
        return Some(GameEvent::BackToMenu);
    }

    // Transition overlay swallows every other input
    if let GamePhase::Transition { remaining, next } = state.phase {
        let remaining = remaining.saturating_sub(1);
        if remaining == 0 {
            state.level = next;
            state.phase = GamePhase::Playing;
            state.setup_level();
        } else {
            state.phase = GamePhase::Transition { remaining, next };
        }
        return None;
    }

    apply_input(state, input);
    if state.phase != GamePhase::Playing {
        return None;
    }

    state.ticks += 1;
    state.power.tick_flash();
    state.combat.tick_combo();

    spawn::spawn_tick(state);
    move_actors(state);

    if state.level.resolves_gaps() {
        resolve_road_gaps(&mut state.vehicles, &state.lanes.road, VEHICLE_MIN_GAP);
    }

    if state.level.has_combat() {
        if let Some(outcome) = run_combat(state) {
            return outcome;
        }
    }

    state.trim_offboard();

    match state.level {
        Level::RoadCrossing => road_crossing_rules(state),
        Level::CritterSurvival => None,
        Level::TrafficGauntlet => traffic_gauntlet_rules(state),
        Level::RiverRun => river_run_rules(state),
    }
}

fn apply_input(state: &mut GameState, input: &TickInput) {
    if input.pause {
        state.phase = match state.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            other => other,
        };
    }
    if input.toggle_help {
        state.show_help = !state.show_help;
    }
    if state.phase != GamePhase::Playing {
        return;
    }

    if input.skip_level {
        if let Some(next) = state.level.next() {
            state.start_transition(next);
            return;
        }
    }
    if let Some(mode) = input.select_mode {
        state.combat.select(mode, state.power.tier);
    }
    if let Some(dir) = input.step {
        state.avatar.step(dir);
    }
    if let Some(dir) = input.fire {
        if state.level.has_combat() {
            state.combat.fire(&state.avatar, dir, state.ticks);
        }
    }
}

fn move_actors(state: &mut GameState) {
    state.vehicles.iter_mut().for_each(|v| v.advance());
    state.logs.iter_mut().for_each(|l| l.advance());
    state.critters.iter_mut().for_each(|c| c.advance());

    if state.level == Level::CritterSurvival {
        for critter in state.critters.iter_mut().filter(|c| c.wiggle.is_some()) {
            let flip = state.rng.random_bool(CRITTER_FLIP_CHANCE);
            critter.wiggle_step(flip);
        }
    }
}

/// Projectiles against the level's hazards.
///
/// `Some(outcome)` means the tick stops here: either the kill target was
/// reached (transition started) or the avatar died.
fn run_combat(state: &mut GameState) -> Option<Option<GameEvent>> {
    state.combat.advance_projectiles();

    let mut i = 0;
    while i < state.combat.projectiles.len() {
        let shot = state.combat.projectiles[i].bounds();
        let center = match state.level {
            Level::CritterSurvival => {
                first_overlap(&state.critters, &shot).map(|j| state.critters.remove(j).bounds().center())
            }
            Level::TrafficGauntlet => {
                first_overlap(&state.vehicles, &shot).map(|j| state.vehicles.remove(j).bounds().center())
            }
            Level::RoadCrossing | Level::RiverRun => None,
        };
        let Some(center) = center else {
            i += 1;
            continue;
        };

        state.combat.projectiles.remove(i);
        let points = state.combat.register_kill(center);
        state.award(points);

        if state.level == Level::CritterSurvival {
            state.kills += 1;
            if state.kills >= KILL_TARGET && !state.is_transitioning() {
                log::info!("Kill target reached with score {}", state.score);
                state.start_transition(Level::TrafficGauntlet);
                return Some(None);
            }
        }
    }

    state.combat.drop_offboard();

    if state.level == Level::CritterSurvival
        && first_overlap(&state.critters, &state.avatar.bounds()).is_some()
    {
        return Some(state.die());
    }

    state.combat.update_puffs();
    None
}

/// Ride a log while inside the level's river band, or drown.
/// Returns true when the avatar drowned.
fn ride_river(state: &mut GameState) -> bool {
    let Some((top, bottom)) = state.level.river_band() else {
        return false;
    };
    if state.avatar.y < top || state.avatar.y >= bottom {
        return false;
    }
    match log_under(&state.logs, &state.avatar.bounds()) {
        Some(speed) => {
            state.avatar.carry(speed);
            false
        }
        None => true,
    }
}

fn reached_goal(state: &GameState) -> bool {
    state.avatar.y <= TILE
}

fn road_crossing_rules(state: &mut GameState) -> Option<GameEvent> {
    if state.avatar.y < state.best_row_y {
        let rows_up = (state.best_row_y - state.avatar.y) / TILE;
        if rows_up > 0 {
            state.best_row_y = state.avatar.y;
            state.award(rows_up as u64 * ROW_CLIMB_BONUS);
        }
    }

    let frog = state.avatar.bounds();
    if first_overlap(&state.vehicles, &frog).is_some()
        || first_overlap(&state.critters, &frog).is_some()
    {
        return state.die();
    }
    if ride_river(state) {
        return state.die();
    }

    if reached_goal(state) {
        state.award(GOAL_BONUS);
        state.start_transition(Level::CritterSurvival);
    }
    None
}

fn traffic_gauntlet_rules(state: &mut GameState) -> Option<GameEvent> {
    if first_overlap(&state.vehicles, &state.avatar.bounds()).is_some() {
        return state.die();
    }
    if reached_goal(state) {
        state.start_transition(Level::RiverRun);
    }
    None
}

fn river_run_rules(state: &mut GameState) -> Option<GameEvent> {
    if ride_river(state) {
        return state.die();
    }
    if reached_goal(state) {
        state.award(FINAL_BONUS);
        return Some(state.finish(state.score));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::actors::{AVATAR_START, Critter, CritterKind, Log, Projectile, Vehicle, VehicleKind};
    use glam::Vec2;
    use proptest::prelude::*;

    fn fresh(level: Level) -> GameState {
        let mut state = GameState::new(2024, "Tester", Settings::default());
        if level != Level::RoadCrossing {
            state.level = level;
            state.setup_level();
        }
        state
    }

    fn empty_board(level: Level) -> GameState {
        let mut state = fresh(level);
        state.vehicles.clear();
        state.logs.clear();
        state.critters.clear();
        state
    }

    fn idle() -> TickInput {
        TickInput::default()
    }

    #[test]
    fn test_goal_bonus_then_delayed_level_swap() {
        let mut state = empty_board(Level::RoadCrossing);
        state.avatar.y = TILE;
        state.best_row_y = TILE;

        assert_eq!(tick(&mut state, &idle()), None);
        assert_eq!(state.score, GOAL_BONUS);
        assert!(state.is_transitioning());

        for _ in 0..TRANSITION_TICKS - 1 {
            tick(&mut state, &idle());
            assert_eq!(state.level, Level::RoadCrossing);
        }
        tick(&mut state, &idle());
        assert_eq!(state.level, Level::CritterSurvival);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.avatar.y, AVATAR_START.1);
        assert_eq!(state.score, GOAL_BONUS);
    }

    #[test]
    fn test_row_climb_bonus() {
        let mut state = empty_board(Level::RoadCrossing);
        let step = TickInput {
            step: Some(Direction::Up),
            ..Default::default()
        };
        tick(&mut state, &step);
        assert_eq!(state.score, ROW_CLIMB_BONUS);
        // Stepping back down and up again earns nothing new
        tick(
            &mut state,
            &TickInput {
                step: Some(Direction::Down),
                ..Default::default()
            },
        );
        tick(&mut state, &step);
        assert_eq!(state.score, ROW_CLIMB_BONUS);
    }

    #[test]
    fn test_thirtieth_kill_halts_hit_processing() {
        let mut state = empty_board(Level::CritterSurvival);
        state.kills = KILL_TARGET - 1;

        let lane_y = 8 * TILE + 7;
        let first = Critter::new(9001, CritterKind::Bird, 100.0, lane_y as f32, 0.0);
        let second = Critter::new(9002, CritterKind::Bird, 400.0, lane_y as f32, 0.0);
        state.critters.push(first);
        state.critters.push(second);
        state.combat.projectiles.push(Projectile::new(
            Vec2::new(105.0, (lane_y + 5) as f32),
            Vec2::ZERO,
        ));
        state.combat.projectiles.push(Projectile::new(
            Vec2::new(405.0, (lane_y + 5) as f32),
            Vec2::ZERO,
        ));

        assert_eq!(tick(&mut state, &idle()), None);
        assert_eq!(state.kills, KILL_TARGET);
        assert!(state.is_transitioning());
        assert_eq!(state.score, KILL_SCORE + COMBO_STEP_SCORE);
        assert!(state.critters.iter().all(|c| c.id != 9001));
        assert!(state.critters.iter().any(|c| c.id == 9002));
        assert_eq!(state.combat.projectiles.len(), 1);
    }

    #[test]
    fn test_river_drowning() {
        let mut state = empty_board(Level::RoadCrossing);
        state.award(1010);
        assert_eq!(state.power.tier, 2);
        state.avatar.y = 3 * TILE + 4;
        state.best_row_y = state.avatar.y;

        assert_eq!(tick(&mut state, &idle()), None);
        assert_eq!(state.lives, STARTING_LIVES - 1);
        assert_eq!(state.score, 985);
        assert_eq!(state.power.tier, 2);
        assert_eq!(state.level, Level::RoadCrossing);
        assert_eq!(state.avatar.y, AVATAR_START.1);
        assert_eq!(state.combat.combo, 0);

        // A second drowning from a low score floors at zero
        state.score = 10;
        state.logs.clear();
        state.avatar.y = 3 * TILE + 4;
        state.best_row_y = state.avatar.y;
        tick(&mut state, &idle());
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, STARTING_LIVES - 2);
    }

    #[test]
    fn test_log_carries_avatar() {
        let mut state = empty_board(Level::RoadCrossing);
        state.avatar.y = 3 * TILE + 4;
        state.avatar.x = 300;
        state.best_row_y = state.avatar.y;
        state.logs.push(Log::new(7777, 290.0, 3 * TILE + LOG_LANE_OFFSET, 2.0));

        tick(&mut state, &idle());
        assert_eq!(state.lives, STARTING_LIVES);
        assert_eq!(state.avatar.x, 302);
    }

    #[test]
    fn test_spread_fire_in_gauntlet() {
        let mut state = empty_board(Level::TrafficGauntlet);
        state.award(TIER2_THRESHOLD);
        assert_eq!(state.combat.mode, FireMode::Spread);

        let fire = TickInput {
            fire: Some(Direction::Right),
            ..Default::default()
        };
        tick(&mut state, &fire);
        let vels: Vec<Vec2> = state.combat.projectiles.iter().map(|p| p.vel).collect();
        assert_eq!(
            vels,
            vec![
                Vec2::new(8.0, 0.0),
                Vec2::new(8.0, -2.0),
                Vec2::new(8.0, 2.0)
            ]
        );

        tick(&mut state, &fire);
        assert_eq!(state.combat.projectiles.len(), 3);
    }

    #[test]
    fn test_shot_kills_vehicle() {
        let mut state = empty_board(Level::TrafficGauntlet);
        let y = 10 * TILE + VEHICLE_LANE_OFFSET;
        state.vehicles.push(Vehicle::new(
            4242,
            VehicleKind::Truck,
            200.0,
            y,
            0.0,
        ));
        state.combat.projectiles.push(Projectile::new(
            Vec2::new(250.0, (y + 5) as f32),
            Vec2::ZERO,
        ));
        tick(&mut state, &idle());
        assert!(state.vehicles.iter().all(|v| v.id != 4242));
        assert_eq!(state.score, 30);
        assert_eq!(state.combat.puffs.len(), 3);
    }

    #[test]
    fn test_critter_contact_kills_in_survival() {
        let mut state = empty_board(Level::CritterSurvival);
        let avatar = state.avatar.bounds();
        state.critters.push(Critter::new(
            31,
            CritterKind::Snake,
            avatar.x as f32,
            avatar.y as f32,
            0.0,
        ));
        tick(&mut state, &idle());
        assert_eq!(state.lives, STARTING_LIVES - 1);
    }

    #[test]
    fn test_river_run_win_fires_game_over_once() {
        let mut state = empty_board(Level::RiverRun);
        state.score = 500;
        state.avatar.y = TILE;

        let event = tick(&mut state, &idle());
        assert_eq!(
            event,
            Some(GameEvent::GameOver {
                final_score: 500 + FINAL_BONUS,
                player_name: "Tester".into()
            })
        );
        assert_eq!(tick(&mut state, &idle()), None);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_transition_only_honours_menu_return() {
        let mut state = empty_board(Level::RoadCrossing);
        let skip = TickInput {
            skip_level: true,
            ..Default::default()
        };
        tick(&mut state, &skip);
        assert!(state.is_transitioning());

        let before = state.avatar.clone();
        tick(
            &mut state,
            &TickInput {
                step: Some(Direction::Up),
                pause: true,
                ..Default::default()
            },
        );
        assert_eq!(state.avatar, before);
        assert!(state.is_transitioning());

        let event = tick(
            &mut state,
            &TickInput {
                back_to_menu: true,
                ..Default::default()
            },
        );
        assert_eq!(event, Some(GameEvent::BackToMenu));
        assert_eq!(tick(&mut state, &idle()), None);
    }

    #[test]
    fn test_skip_is_noop_on_last_level() {
        let mut state = fresh(Level::RiverRun);
        tick(
            &mut state,
            &TickInput {
                skip_level: true,
                ..Default::default()
            },
        );
        assert!(!state.is_transitioning());
    }

    #[test]
    fn test_pause_freezes_simulation() {
        let mut state = fresh(Level::RoadCrossing);
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Paused);
        let ticks = state.ticks;
        let xs: Vec<f32> = state.vehicles.iter().map(|v| v.x).collect();

        tick(
            &mut state,
            &TickInput {
                step: Some(Direction::Left),
                ..Default::default()
            },
        );
        assert_eq!(state.ticks, ticks);
        assert_eq!(state.avatar.x, AVATAR_START.0);
        assert_eq!(xs, state.vehicles.iter().map(|v| v.x).collect::<Vec<_>>());

        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.ticks, ticks + 1);
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(99999, "A", Settings::default());
        let mut b = GameState::new(99999, "A", Settings::default());
        let inputs = [
            TickInput {
                step: Some(Direction::Up),
                ..Default::default()
            },
            TickInput::default(),
            TickInput {
                step: Some(Direction::Left),
                ..Default::default()
            },
        ];
        for t in 0..600 {
            let input = &inputs[t % inputs.len()];
            tick(&mut a, input);
            tick(&mut b, input);
        }
        assert_eq!(a.score, b.score);
        assert_eq!(a.lives, b.lives);
        assert_eq!(a.vehicles, b.vehicles);
        assert_eq!(a.logs, b.logs);
        assert_eq!(a.critters, b.critters);
    }

    fn arb_dir() -> impl Strategy<Value = Direction> {
        prop_oneof![
            Just(Direction::Left),
            Just(Direction::Right),
            Just(Direction::Up),
            Just(Direction::Down),
        ]
    }

    fn arb_input() -> impl Strategy<Value = TickInput> {
        (
            proptest::option::weighted(0.3, arb_dir()),
            proptest::option::weighted(0.2, arb_dir()),
            any::<bool>(),
        )
            .prop_map(|(step, fire, skip)| TickInput {
                step,
                fire,
                skip_level: skip && step.is_none() && fire.is_none(),
                ..Default::default()
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn prop_tier_monotonic_and_lives_never_grow(
            seed in any::<u64>(),
            inputs in proptest::collection::vec(arb_input(), 50..400),
        ) {
            let mut state = GameState::new(seed, "Prop", Settings::default());
            let mut tier = state.power.tier;
            let mut lives = state.lives;
            for input in &inputs {
                tick(&mut state, input);
                prop_assert!(state.power.tier >= tier);
                prop_assert!(state.lives <= lives);
                prop_assert!(state.avatar.x >= 0 && state.avatar.x <= BOARD_WIDTH - AVATAR_SIZE);
                prop_assert!(state.avatar.y >= TILE && state.avatar.y <= BOARD_HEIGHT - AVATAR_SIZE);
                tier = state.power.tier;
                lives = state.lives;
                if state.is_finished() {
                    break;
                }
            }
        }
    }
}
