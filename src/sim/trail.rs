//! Ball trail: a fixed set of emitters fed from one ball snapshot
//!
//! Every emitter in the set is updated against the same [`BallSnapshot`]
//! within a frame. The set never holds the ball itself; it receives a shared
//! borrow per call, so it cannot observe a ball that no longer exists.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::particles::ParticleEmitter;
use super::state::{BallObject, BallSnapshot};
use crate::consts::{TRAIL_DROP, TRAIL_SPAWN_COUNT};
use crate::renderer::{GraphicsBackend, ShaderHandle, TextureHandle};

/// Spawn parameters for one emitter of the trail
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailConfig {
    /// New particles per frame
    pub spawn_count: u32,
    /// Spawn offset, in multiples of the ball radius
    pub radius_scale: Vec2,
    /// Spawn offset added on top of the scaled part (pixels)
    pub fixed_offset: Vec2,
    /// Velocity added to every spawned particle
    pub velocity_bias: Vec2,
}

impl TrailConfig {
    /// Core, left and right flame layers
    pub fn flame_layers() -> [TrailConfig; 3] {
        let drop = Vec2::new(0.0, TRAIL_DROP);
        [
            TrailConfig {
                spawn_count: TRAIL_SPAWN_COUNT,
                radius_scale: Vec2::new(1.0, 1.0),
                fixed_offset: drop,
                velocity_bias: Vec2::new(0.0, -30.0),
            },
            TrailConfig {
                spawn_count: TRAIL_SPAWN_COUNT,
                radius_scale: Vec2::new(0.75, 1.0),
                fixed_offset: drop,
                velocity_bias: Vec2::new(5.0, -20.0),
            },
            TrailConfig {
                spawn_count: TRAIL_SPAWN_COUNT,
                radius_scale: Vec2::new(1.25, 1.0),
                fixed_offset: drop,
                velocity_bias: Vec2::new(-5.0, -20.0),
            },
        ]
    }

    pub fn is_finite(&self) -> bool {
        self.radius_scale.is_finite()
            && self.fixed_offset.is_finite()
            && self.velocity_bias.is_finite()
    }

    /// Spawn offset relative to the ball's top-left corner
    pub fn offset(&self, radius: f32) -> Vec2 {
        self.radius_scale * radius + self.fixed_offset
    }
}

struct TrailLayer<E> {
    config: TrailConfig,
    emitter: E,
}

/// Ordered group of emitters producing the ball trail
pub struct TrailSet<E: ParticleEmitter> {
    layers: Vec<TrailLayer<E>>,
}

impl<E: ParticleEmitter> TrailSet<E> {
    /// One emitter per config; emitter `i` is seeded with `seed + i`
    pub fn new(
        configs: &[TrailConfig],
        shader: ShaderHandle,
        texture: TextureHandle,
        capacity: usize,
        seed: u64,
    ) -> Self {
        let layers = configs
            .iter()
            .enumerate()
            .map(|(i, &config)| TrailLayer {
                config,
                emitter: E::create(shader, texture, capacity, seed.wrapping_add(i as u64)),
            })
            .collect();
        Self { layers }
    }

    /// Advance every emitter against one snapshot of `ball`
    pub fn update(&mut self, dt: f32, ball: &BallObject) {
        let snapshot = ball.snapshot();
        self.update_with(dt, &snapshot);
    }

    pub fn update_with(&mut self, dt: f32, snapshot: &BallSnapshot) {
        for layer in &mut self.layers {
            let c = layer.config;
            layer.emitter.update(
                dt,
                snapshot,
                c.spawn_count,
                c.offset(snapshot.radius),
                c.velocity_bias,
            );
        }
    }

    /// Draw every emitter in construction order, unless the ball is anchored
    pub fn draw(&self, ball: &BallObject, backend: &mut dyn GraphicsBackend) {
        if ball.stuck {
            return;
        }
        for layer in &self.layers {
            layer.emitter.draw(backend);
        }
    }

    /// Upper bound on particles spawned by one `update`
    pub fn max_spawn_per_frame(&self) -> u32 {
        self.layers.iter().map(|l| l.config.spawn_count).sum()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn emitters(&self) -> impl Iterator<Item = &E> {
        self.layers.iter().map(|l| &l.emitter)
    }

    pub fn live_count(&self) -> usize {
        self.emitters().map(|e| e.live_count()).sum()
    }
}
