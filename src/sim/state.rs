//! Play state and game objects
//!
//! The paddle and the ball are plain data owned by [`Game`](super::Game);
//! the trail emitters only ever see a [`BallSnapshot`] copied from the ball.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::renderer::{GraphicsBackend, SpriteRenderer, TextureHandle};

/// Current mode of the game; only `Active` runs per-frame logic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayState {
    #[default]
    Active,
    Menu,
    Win,
}

impl PlayState {
    pub fn is_active(self) -> bool {
        self == PlayState::Active
    }
}

/// Rectangular textured object (the paddle)
#[derive(Debug, Clone, PartialEq)]
pub struct GameObject {
    /// Top-left corner
    pub position: Vec2,
    pub size: Vec2,
    pub velocity: Vec2,
    pub rotation: f32,
    pub sprite: TextureHandle,
}

impl GameObject {
    pub fn new(position: Vec2, size: Vec2, sprite: TextureHandle) -> Self {
        Self {
            position,
            size,
            velocity: Vec2::ZERO,
            rotation: 0.0,
            sprite,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.position + self.size / 2.0
    }

    pub fn draw(&self, renderer: &SpriteRenderer, backend: &mut dyn GraphicsBackend) {
        renderer.draw_sprite(backend, self.sprite, self.position, self.size, self.rotation);
    }
}

/// The ball: a circle drawn as a square sprite
#[derive(Debug, Clone, PartialEq)]
pub struct BallObject {
    /// Top-left corner of the bounding square
    pub position: Vec2,
    /// Always `2 * radius` on both axes
    pub size: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    /// Anchored to the paddle, not yet launched
    pub stuck: bool,
    pub sprite: TextureHandle,
}

impl BallObject {
    pub fn new(position: Vec2, radius: f32, velocity: Vec2, sprite: TextureHandle) -> Self {
        Self {
            position,
            size: Vec2::splat(radius * 2.0),
            velocity,
            radius,
            stuck: true,
            sprite,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.position + Vec2::splat(self.radius)
    }

    /// Re-seat the ball and anchor it again
    pub fn reset(&mut self, position: Vec2, velocity: Vec2) {
        self.position = position;
        self.velocity = velocity;
        self.stuck = true;
    }

    pub fn launch(&mut self) {
        self.stuck = false;
    }

    /// Copy of everything an emitter may read this frame
    pub fn snapshot(&self) -> BallSnapshot {
        BallSnapshot {
            position: self.position,
            velocity: self.velocity,
            size: self.size,
            radius: self.radius,
            stuck: self.stuck,
        }
    }

    pub fn draw(&self, renderer: &SpriteRenderer, backend: &mut dyn GraphicsBackend) {
        renderer.draw_sprite(backend, self.sprite, self.position, self.size, 0.0);
    }
}

/// Immutable per-frame view of the ball handed to every trail emitter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallSnapshot {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: Vec2,
    pub radius: f32,
    pub stuck: bool,
}
