//! Cardinal direction classification
//!
//! Maps a continuous vector (usually a collision normal or a centre
//! difference) onto one of four compass directions.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};

/// The four possible (collision) directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Evaluation order; earlier entries win ties
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Unit reference vector (y up)
    pub fn unit(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::Y,
            Direction::Right => Vec2::X,
            Direction::Down => Vec2::NEG_Y,
            Direction::Left => Vec2::NEG_X,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }

    /// Direction whose reference vector best matches `target`.
    ///
    /// Ties (exact 45°) resolve to the earlier entry of [`Direction::ALL`].
    /// Zero-length and non-finite vectors have no direction and return
    /// [`GameError::DegenerateVector`].
    pub fn classify(target: Vec2) -> GameResult<Self> {
        if target == Vec2::ZERO || !target.is_finite() {
            return Err(GameError::DegenerateVector);
        }
        // Rescale so the largest component is 1; squaring can't overflow or vanish
        let norm = (target / target.abs().max_element()).normalize();

        let mut best = Direction::Up;
        let mut max = f32::NEG_INFINITY;
        for dir in Self::ALL {
            let dot = norm.dot(dir.unit());
            // Strict comparison keeps the first match on ties
            if dot > max {
                max = dot;
                best = dir;
            }
        }
        Ok(best)
    }
}
