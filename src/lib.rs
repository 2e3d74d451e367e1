//! Ember Breakout - frame-driven arcade core
//!
//! Core modules:
//! - `sim`: Play-state machine, game objects, particle trails, direction classifier
//! - `renderer`: Backend contract, resource cache, sprite renderer
//! - `settings`: JSON-backed configuration
//! - `error`: Crate error type

pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{GameError, GameResult};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Paddle defaults
    pub const PLAYER_SIZE: Vec2 = Vec2::new(100.0, 20.0);

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 80.0;
    pub const INITIAL_BALL_VELOCITY: Vec2 = Vec2::ZERO;
    /// Keyboard-driven ball speed (pixels/s)
    pub const BALL_MOVE_SPEED: f32 = 200.0;

    /// Particle pool size per trail emitter
    pub const EMITTER_CAPACITY: usize = 9000;
    /// New particles per emitter per frame
    pub const TRAIL_SPAWN_COUNT: u32 = 40;
    /// Vertical distance below the ball centre where the flame starts
    pub const TRAIL_DROP: f32 = 20.0;

    /// Default viewport
    pub const DEFAULT_WIDTH: u32 = 800;
    pub const DEFAULT_HEIGHT: u32 = 600;
}
