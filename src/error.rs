//! Crate-wide error type

use thiserror::Error;

/// Errors surfaced by the game core
#[derive(Error, Debug)]
pub enum GameError {
    /// Viewport with a zero extent on either axis
    #[error("invalid viewport {width}x{height}: both extents must be non-zero")]
    InvalidViewport { width: u32, height: u32 },

    /// A per-frame operation was called before `Game::init`
    #[error("game used before init()")]
    NotInitialized,

    /// Direction classification of a zero-length or non-finite vector
    #[error("cannot classify a zero-length or non-finite vector")]
    DegenerateVector,

    #[error("asset not found: {path}")]
    AssetNotFound { path: String },

    #[error("shader '{name}' failed to build: {reason}")]
    ShaderCompile { name: String, reason: String },

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type GameResult<T> = Result<T, GameError>;
