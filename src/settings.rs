//! Game settings and preferences
//!
//! Stored as JSON next to the scoreboard. A missing or broken file falls back
//! to the defaults so the game always starts.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::STARTING_LIVES;
use crate::error::SettingsError;

/// Default settings file name
pub const SETTINGS_FILE: &str = "settings.json";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Lives at the start of a run
    pub starting_lives: u8,

    // === Road crossing spawn cadence multipliers (higher = sparser) ===
    pub traffic_density: f32,
    pub log_density: f32,
    /// Clamped to [0.8, 2.0] when applied
    pub critter_density: f32,

    // === HUD ===
    /// Help box visible when a run starts
    pub show_help: bool,

    /// CSV scoreboard location
    pub scores_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            starting_lives: STARTING_LIVES,
            traffic_density: 1.6,
            log_density: 1.4,
            critter_density: 1.5,
            show_help: true,
            scores_path: PathBuf::from("scores.csv"),
        }
    }
}

impl Settings {
    /// Strict load, for callers that want to report the failure
    pub fn try_load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Load settings from `path`, using defaults when the file is missing
    /// or unreadable
    pub fn load_from(path: &Path) -> Self {
        match Self::try_load_from(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(SettingsError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load from the default location in the working directory
    pub fn load() -> Self {
        Self::load_from(Path::new(SETTINGS_FILE))
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
