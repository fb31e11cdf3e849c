//! Game state and core simulation types
//!
//! The frame driver owns every pool below exclusively. Renderers only ever
//! see a `Snapshot` built from it.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actors::{AVATAR_START, Avatar, Critter, Log, Vehicle};
use super::combat::{Combat, FireMode};
use super::lane::LaneSet;
use super::level::Level;
use super::progression::PowerLevel;
use super::spawn;
use crate::consts::*;
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Simulation frozen, HUD shows the paused tag
    Paused,
    /// Announcement overlay before `next` is set up
    Transition { remaining: u32, next: Level },
    /// Run ended, host shell notified
    GameOver,
    /// Player returned to the menu
    Exited,
}

/// Notification for the host shell, emitted at most once per session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    GameOver { final_score: u64, player_name: String },
    BackToMenu,
}

/// Complete run state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub player_name: String,
    pub settings: Settings,
    pub level: Level,
    pub phase: GamePhase,
    /// Simulation tick counter (frozen while paused or transitioning)
    pub ticks: u64,
    pub lives: u8,
    pub score: u64,
    /// Highest (smallest y) row reached this life, for the climb bonus
    pub best_row_y: i32,
    /// Kills this life in critter survival
    pub kills: u32,
    pub power: PowerLevel,
    pub combat: Combat,
    pub show_help: bool,
    pub avatar: Avatar,
    pub lanes: LaneSet,
    pub vehicles: Vec<Vehicle>,
    pub logs: Vec<Log>,
    pub critters: Vec<Critter>,
    next_id: u32,
}

impl GameState {
    /// Fresh run on the first level
    pub fn new(seed: u64, player_name: impl Into<String>, settings: Settings) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player_name: player_name.into(),
            level: Level::RoadCrossing,
            phase: GamePhase::Playing,
            ticks: 0,
            lives: settings.starting_lives.max(1),
            score: 0,
            best_row_y: AVATAR_START.1,
            kills: 0,
            power: PowerLevel::default(),
            combat: Combat::default(),
            show_help: settings.show_help,
            avatar: Avatar::default(),
            lanes: LaneSet::default(),
            vehicles: Vec::new(),
            logs: Vec::new(),
            critters: Vec::new(),
            settings,
            next_id: 1,
        };
        state.setup_level();
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Rebuild the current level from scratch. Score, lives, tier and fire
    /// mode carry over; everything tied to the board does not.
    pub fn setup_level(&mut self) {
        self.vehicles.clear();
        self.logs.clear();
        self.critters.clear();
        self.combat.reset();
        self.kills = 0;

        self.lanes = spawn::lanes_for(self.level, &self.settings);
        spawn::seed_level(self);

        self.avatar.respawn();
        self.best_row_y = AVATAR_START.1;
        log::info!(
            "Level {} set up: {} vehicles, {} logs, {} critters",
            self.level.number(),
            self.vehicles.len(),
            self.logs.len(),
            self.critters.len()
        );
    }

    /// Add points and re-evaluate the power tier, auto-selecting the newly
    /// unlocked fire mode
    pub fn award(&mut self, points: u64) {
        self.score += points;
        if let Some(tier) = self.power.observe(self.score) {
            self.combat.mode = FireMode::unlocked_by(tier);
        }
    }

    /// Lose a life. Returns the game-over event when none remain.
    pub fn die(&mut self) -> Option<GameEvent> {
        if !self.avatar.alive {
            return None;
        }
        self.avatar.alive = false;
        self.lives = self.lives.saturating_sub(1);
        self.score = self.score.saturating_sub(DEATH_PENALTY);
        self.combat.clear_combo();
        log::info!(
            "Died on level {}: {} lives left, score {}",
            self.level.number(),
            self.lives,
            self.score
        );

        if self.lives == 0 {
            return Some(self.finish(self.score));
        }
        self.setup_level();
        None
    }

    /// End the run with `final_score`
    pub fn finish(&mut self, final_score: u64) -> GameEvent {
        self.phase = GamePhase::GameOver;
        log::info!("Game over for {}: final score {}", self.player_name, final_score);
        GameEvent::GameOver {
            final_score,
            player_name: self.player_name.clone(),
        }
    }

    pub fn start_transition(&mut self, next: Level) {
        if matches!(self.phase, GamePhase::Transition { .. }) {
            return;
        }
        log::info!("Level {} -> {}", self.level.number(), next.number());
        self.phase = GamePhase::Transition {
            remaining: TRANSITION_TICKS,
            next,
        };
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.phase, GamePhase::Transition { .. })
    }

    /// True once the host shell has been (or is being) notified
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver | GamePhase::Exited)
    }

    /// Drop every actor more than the off-board margin past either edge
    pub fn trim_offboard(&mut self) {
        let right = BOARD_WIDTH as f32 + OFFBOARD_MARGIN;
        let inside = |x: f32, w: i32| x >= -(w as f32) - OFFBOARD_MARGIN && x <= right;
        self.vehicles.retain(|v| inside(v.x, v.w));
        self.logs.retain(|l| inside(l.x, l.w));
        self.critters.retain(|c| inside(c.x, c.w));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::actors::{CarPaint, VehicleKind};
    use glam::Vec2;

    #[test]
    fn test_new_state() {
        let state = GameState::new(1, "Ada", Settings::default());
        assert_eq!(state.level, Level::RoadCrossing);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.lives, STARTING_LIVES);
        assert_eq!(state.power.tier, 1);
        assert_eq!(state.avatar.x, AVATAR_START.0);
        assert!(!state.lanes.is_empty());
    }

    #[test]
    fn test_setup_twice_is_fresh() {
        let mut state = GameState::new(5, "Ada", Settings::default());
        state.level = Level::CritterSurvival;
        state.setup_level();
        state.combat.mode = FireMode::Spread;
        state.combat.fire(&state.avatar.clone(), crate::sim::Direction::Up, 0);
        state.combat.register_kill(Vec2::new(50.0, 50.0));
        state.kills = 12;
        state.avatar.y = 200;
        state.best_row_y = 200;

        state.setup_level();
        let lanes = state.lanes.clone();
        state.setup_level();

        assert!(state.combat.projectiles.is_empty());
        assert!(state.combat.puffs.is_empty());
        assert_eq!(state.combat.combo, 0);
        assert_eq!(state.combat.combo_timer, 0);
        assert_eq!(state.kills, 0);
        assert_eq!(state.avatar, Avatar::default());
        assert_eq!(state.best_row_y, AVATAR_START.1);
        assert_eq!(state.lanes.critter, lanes.critter);
        // Mode survives re-setup
        assert_eq!(state.combat.mode, FireMode::Spread);
    }

    #[test]
    fn test_death_penalty_floors_at_zero() {
        let mut state = GameState::new(9, "Ada", Settings::default());
        state.score = 10;
        assert_eq!(state.die(), None);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 2);
        assert!(state.avatar.alive);
    }

    #[test]
    fn test_last_life_ends_run() {
        let mut state = GameState::new(9, "Ada", Settings::default());
        state.lives = 1;
        state.score = 400;
        let event = state.die();
        assert_eq!(
            event,
            Some(GameEvent::GameOver {
                final_score: 375,
                player_name: "Ada".to_string()
            })
        );
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_award_auto_selects_unlocked_mode() {
        let mut state = GameState::new(2, "Ada", Settings::default());
        state.award(990);
        assert_eq!(state.combat.mode, FireMode::Single);
        state.award(10);
        assert_eq!(state.power.tier, 2);
        assert_eq!(state.combat.mode, FireMode::Spread);
        state.award(2000);
        assert_eq!(state.combat.mode, FireMode::Nova);
    }

    #[test]
    fn test_trim_offboard() {
        let mut state = GameState::new(2, "Ada", Settings::default());
        state.vehicles.clear();
        let car = VehicleKind::Car(CarPaint::Normal);
        state.vehicles.push(Vehicle::new(900, car, -140.0, 245, -1.5));
        state.vehicles.push(Vehicle::new(901, car, -141.0, 245, -1.5));
        state.vehicles.push(Vehicle::new(902, car, 700.0, 285, 1.5));
        state.vehicles.push(Vehicle::new(903, car, 700.5, 285, 1.5));
        state.trim_offboard();
        let ids: Vec<u32> = state.vehicles.iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![900, 902]);
    }
}
