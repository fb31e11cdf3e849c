//! Player fire modes, projectiles, combo scoring and kill puffs

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::actors::{Avatar, Direction, Projectile, Puff};
use crate::consts::*;

/// Single and Spread shot speed (px/tick)
pub const SHOT_SPEED: f32 = 8.0;
/// Nova shot speed (px/tick)
pub const NOVA_SPEED: f32 = 7.0;
/// Distance a directional shot spawns ahead of the avatar centre
pub const MUZZLE_OFFSET: f32 = 10.0;
/// Perpendicular velocity offset of the outer Spread shots
pub const SPREAD_OFFSET: f32 = 2.0;
/// Shots in one Nova burst
pub const NOVA_SHOTS: usize = 6;
/// Puffs spawned per kill
pub const PUFFS_PER_KILL: usize = 3;

/// Selectable fire pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FireMode {
    #[default]
    Single,
    Spread,
    Nova,
}

impl FireMode {
    /// Minimum ticks between two successful shots
    pub fn cooldown(self) -> i64 {
        match self {
            FireMode::Single => 10,
            FireMode::Spread => 16,
            FireMode::Nova => 23,
        }
    }

    /// Power tier needed to select this mode
    pub fn required_tier(self) -> u8 {
        match self {
            FireMode::Single => 1,
            FireMode::Spread => 2,
            FireMode::Nova => 3,
        }
    }

    /// Mode auto-selected when `tier` is first reached
    pub fn unlocked_by(tier: u8) -> FireMode {
        match tier {
            0 | 1 => FireMode::Single,
            2 => FireMode::Spread,
            _ => FireMode::Nova,
        }
    }
}

/// Everything the combat levels track per life
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Combat {
    pub mode: FireMode,
    /// Tick of the last successful shot
    pub last_shot_tick: i64,
    pub projectiles: Vec<Projectile>,
    pub puffs: Vec<Puff>,
    pub combo: u32,
    pub combo_timer: u32,
}

impl Default for Combat {
    fn default() -> Self {
        Self {
            mode: FireMode::Single,
            last_shot_tick: -1000,
            projectiles: Vec::new(),
            puffs: Vec::new(),
            combo: 0,
            combo_timer: 0,
        }
    }
}

impl Combat {
    /// Switch mode if `tier` allows it
    pub fn select(&mut self, mode: FireMode, tier: u8) -> bool {
        if tier < mode.required_tier() {
            return false;
        }
        self.mode = mode;
        true
    }

    /// Fire in `dir` using the current mode. Returns false while cooling down.
    pub fn fire(&mut self, avatar: &Avatar, dir: Direction, now: u64) -> bool {
        let now = now as i64;
        if now - self.last_shot_tick < self.mode.cooldown() {
            return false;
        }
        self.last_shot_tick = now;

        if self.mode == FireMode::Nova {
            let center = Vec2::new(
                (avatar.x + avatar.w / 2) as f32,
                (avatar.y + avatar.h / 2) as f32,
            );
            for i in 0..NOVA_SHOTS {
                let angle = std::f32::consts::TAU * i as f32 / NOVA_SHOTS as f32;
                let vel = Vec2::new(angle.cos(), angle.sin()) * NOVA_SPEED;
                self.projectiles.push(Projectile::new(center, vel));
            }
            return true;
        }

        let (dx, dy) = dir.delta();
        let aim = Vec2::new(dx as f32, dy as f32);
        let half = (PROJECTILE_SIZE / 2) as f32;
        let origin = Vec2::new(
            (avatar.x + avatar.w / 2) as f32 - half,
            (avatar.y + avatar.h / 2) as f32 - half,
        );
        let pos = origin + aim * MUZZLE_OFFSET;
        let vel = aim * SHOT_SPEED;

        self.projectiles.push(Projectile::new(pos, vel));
        if self.mode == FireMode::Spread {
            // Fan out along the axis perpendicular to the aim
            let side = Vec2::new(aim.y.abs(), aim.x.abs()) * SPREAD_OFFSET;
            self.projectiles.push(Projectile::new(pos, vel - side));
            self.projectiles.push(Projectile::new(pos, vel + side));
        }
        true
    }

    /// Book a kill at `center`: bump the combo, spawn puffs and return
    /// the points earned
    pub fn register_kill(&mut self, center: Vec2) -> u64 {
        self.combo = (self.combo + 1).min(COMBO_CAP);
        self.combo_timer = COMBO_WINDOW_TICKS;
        for _ in 0..PUFFS_PER_KILL {
            self.puffs.push(Puff::new(center));
        }
        KILL_SCORE + self.combo as u64 * COMBO_STEP_SCORE
    }

    /// Let the combo window run down by one tick
    pub fn tick_combo(&mut self) {
        if self.combo == 0 {
            return;
        }
        self.combo_timer = self.combo_timer.saturating_sub(1);
        if self.combo_timer == 0 {
            self.combo = 0;
        }
    }

    pub fn clear_combo(&mut self) {
        self.combo = 0;
        self.combo_timer = 0;
    }

    pub fn advance_projectiles(&mut self) {
        for p in &mut self.projectiles {
            p.advance();
        }
    }

    pub fn drop_offboard(&mut self) {
        self.projectiles.retain(|p| !p.is_offboard());
    }

    pub fn update_puffs(&mut self) {
        self.puffs.retain_mut(|p| p.update());
    }

    /// Per-life reset. Mode and shot clock carry over.
    pub fn reset(&mut self) {
        self.projectiles.clear();
        self.puffs.clear();
        self.clear_combo();
    }
}
