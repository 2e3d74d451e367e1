//! Game settings
//!
//! Stored as JSON next to the binary; every field falls back to its default
//! so partial files are accepted.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{GameError, GameResult};
use crate::sim::TrailConfig;

/// Vertex/fragment source pair for one shader program
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShaderPaths {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderPaths {
    pub fn new(vertex: &str, fragment: &str) -> Self {
        Self {
            vertex: vertex.to_string(),
            fragment: fragment.to_string(),
        }
    }
}

/// Asset locations loaded during bootstrap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetPaths {
    pub sprite_shader: ShaderPaths,
    pub particle_shader: ShaderPaths,
    pub background: String,
    /// Ball sprite
    pub fire: String,
    pub paddle: String,
    pub particle: String,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            sprite_shader: ShaderPaths::new("shaders/sprite.vs", "shaders/sprite.frag"),
            particle_shader: ShaderPaths::new("shaders/particle.vs", "shaders/particle.frag"),
            background: "textures/background.png".to_string(),
            fire: "textures/fire.png".to_string(),
            paddle: "textures/paddle.png".to_string(),
            particle: "textures/particle.png".to_string(),
        }
    }
}

/// Game settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Viewport ===
    pub width: u32,
    pub height: u32,

    // === Gameplay ===
    /// Ball speed while steered by the keyboard (pixels/s)
    pub ball_speed: f32,
    /// Reset the player when the ball reaches the bottom edge
    pub reset_on_loss: bool,

    // === Visuals ===
    /// Draw the paddle sprite (hidden in the stock configuration)
    pub draw_paddle: bool,
    /// Particle trail behind the ball
    pub trails: bool,
    /// Emitter configuration, one emitter per entry
    pub trail_layers: Vec<TrailConfig>,
    /// Particles per emitter pool
    pub emitter_capacity: usize,
    /// Seed for emitter jitter; emitter `i` uses `seed + i`
    pub seed: u64,

    pub assets: AssetPaths,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            ball_speed: BALL_MOVE_SPEED,
            reset_on_loss: false,
            draw_paddle: false,
            trails: true,
            trail_layers: TrailConfig::flame_layers().to_vec(),
            emitter_capacity: EMITTER_CAPACITY,
            seed: 0x5eed,
            assets: AssetPaths::default(),
        }
    }
}

impl Settings {
    /// Settings for a specific viewport, everything else default
    pub fn with_viewport(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> GameResult<Self> {
        let settings: Self =
            serde_json::from_str(json).map_err(|e| GameError::Config(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> GameResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| GameError::Config(e.to_string()))
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> GameResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults if the file is missing or bad
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(settings) => settings,
            Err(e) => {
                log::info!("Using default settings ({e})");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> GameResult<()> {
        fs::write(path.as_ref(), self.to_json()?)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }

    pub fn validate(&self) -> GameResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(GameError::Config(format!(
                "viewport must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if !self.ball_speed.is_finite() || self.ball_speed < 0.0 {
            return Err(GameError::Config(format!(
                "ball_speed must be a finite non-negative number, got {}",
                self.ball_speed
            )));
        }
        if self.trails && self.trail_layers.is_empty() {
            return Err(GameError::Config(
                "trails enabled but no trail layers configured".to_string(),
            ));
        }
        if let Some(i) = self.trail_layers.iter().position(|l| !l.is_finite()) {
            return Err(GameError::Config(format!(
                "trail layer {i} has a non-finite offset or velocity"
            )));
        }
        if self.emitter_capacity == 0 {
            return Err(GameError::Config("emitter_capacity must be non-zero".to_string()));
        }
        Ok(())
    }
}
