//! Simulation settings
//!
//! Loaded from a JSON file on native, defaults in the browser.

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;

/// Scene used when no real page is available
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HeadlessScene {
    /// Container width (px)
    pub width: f32,
    /// Container height (px)
    pub height: f32,
    /// Number of bodies to place
    pub body_count: usize,
    /// Body diameter (px)
    pub body_diameter: f32,
    /// Frames the native demo runs before exiting
    pub frames: u64,
}

impl Default for HeadlessScene {
    fn default() -> Self {
        Self {
            width: HEADLESS_WIDTH,
            height: HEADLESS_HEIGHT,
            body_count: HEADLESS_BODY_COUNT,
            body_diameter: HEADLESS_BODY_DIAMETER,
            frames: HEADLESS_FRAMES,
        }
    }
}

/// Simulation settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    // === Page ===
    /// Selector for the container element
    pub container_selector: String,
    /// Selector matching every movable element
    pub body_selector: String,
    /// Compact mode applies at or below this viewport width (px)
    pub compact_max_width: f32,

    // === Motion ===
    /// Velocity given to each body at initialization (px/tick)
    pub initial_velocity: Vec2,
    /// Flip each axis of the initial velocity at random (seeded)
    pub randomize_directions: bool,
    /// Seed for direction randomization and headless layout
    pub seed: u64,

    // === Native demo ===
    pub headless: HeadlessScene,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            container_selector: CONTAINER_SELECTOR.to_string(),
            body_selector: BODY_SELECTOR.to_string(),
            compact_max_width: COMPACT_MAX_WIDTH,
            initial_velocity: Vec2::new(DEFAULT_VELOCITY.0, DEFAULT_VELOCITY.1),
            randomize_directions: false,
            seed: 0,
            headless: HeadlessScene::default(),
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a file. A missing file falls back to defaults.
    pub fn load(path: &std::path::Path) -> Result<Self, SettingsError> {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                let settings = Self::from_json(&json)?;
                log::info!("Loaded settings from {}", path.display());
                Ok(settings)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        let v = self.initial_velocity;
        if !v.is_finite() || v.x == 0.0 || v.y == 0.0 {
            return Err(SettingsError::Invalid(format!(
                "initial_velocity components must be finite and non-zero, got {v}"
            )));
        }
        if !(self.compact_max_width > 0.0) {
            return Err(SettingsError::Invalid(
                "compact_max_width must be positive".to_string(),
            ));
        }
        let scene = &self.headless;
        if !(scene.width > 0.0 && scene.height > 0.0 && scene.body_diameter > 0.0) {
            return Err(SettingsError::Invalid(
                "headless scene dimensions must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether a viewport of this width is in compact (small screen) mode
    pub fn is_compact(&self, viewport_width: f32) -> bool {
        viewport_width <= self.compact_max_width
    }

    /// Deterministic RNG for this run
    pub fn rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }

    /// Initial velocity for the next body, drawing direction flips from `rng`
    pub fn initial_velocity_for(&self, rng: &mut Pcg32) -> Vec2 {
        let mut v = self.initial_velocity;
        if self.randomize_directions {
            if rng.random_bool(0.5) {
                v.x = -v.x;
            }
            if rng.random_bool(0.5) {
                v.y = -v.y;
            }
        }
        v
    }
}
