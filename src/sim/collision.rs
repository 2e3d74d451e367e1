//! Ball vs. box collision detection
//!
//! Detection only: reports whether the ball overlaps a rectangle and from
//! which side. Resolving the hit (reflection, scoring) is left to the caller.

use glam::Vec2;

use super::direction::Direction;
use super::state::{BallObject, GameObject};

/// Result of a ball/box overlap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collision {
    /// Side of the contact, classified from `difference`
    pub direction: Direction,
    /// Closest point on the box minus the ball centre
    pub difference: Vec2,
}

/// Circle vs. axis-aligned box test.
///
/// Directions come from [`Direction::classify`], whose reference vectors are
/// y-up; in screen space (y down) `Up` and `Down` swap meaning.
pub fn ball_box_collision(ball: &BallObject, object: &GameObject) -> Option<Collision> {
    let center = ball.center();
    let half = object.size / 2.0;
    let box_center = object.center();

    let clamped = (center - box_center).clamp(-half, half);
    let closest = box_center + clamped;
    let difference = closest - center;

    if difference.length() >= ball.radius {
        return None;
    }

    // Centre inside the box: fall back to the centre-to-centre direction
    let direction = Direction::classify(difference)
        .or_else(|_| Direction::classify(center - box_center))
        .unwrap_or(Direction::Up);

    Some(Collision {
        direction,
        difference,
    })
}
