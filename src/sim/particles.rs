//! Particle emitters
//!
//! An emitter owns a fixed pool of particles. Each update respawns a bounded
//! number of dead particles around the ball and ages the whole pool; drawing
//! uploads only the live ones.

use glam::{Vec2, Vec4};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::BallSnapshot;
use crate::renderer::{GraphicsBackend, ParticleInstance, ShaderHandle, TextureHandle};

/// Contract between the trail set and a single emitter
pub trait ParticleEmitter {
    fn create(shader: ShaderHandle, texture: TextureHandle, capacity: usize, seed: u64) -> Self
    where
        Self: Sized;

    /// Advance the pool by `dt` and respawn up to `spawn_count` particles at
    /// `ball.position + offset`, drifting by `velocity_bias`
    fn update(
        &mut self,
        dt: f32,
        ball: &BallSnapshot,
        spawn_count: u32,
        offset: Vec2,
        velocity_bias: Vec2,
    );

    fn draw(&self, backend: &mut dyn GraphicsBackend);

    fn live_count(&self) -> usize;

    fn capacity(&self) -> usize;
}

/// A single pooled particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub color: Vec4,
    /// Seconds left; dead at or below zero
    pub life: f32,
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            color: Vec4::ONE,
            life: 0.0,
        }
    }
}

impl Particle {
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

/// Lifetime of a freshly spawned particle (seconds)
pub const PARTICLE_LIFE: f32 = 1.0;
/// Alpha lost per second
pub const PARTICLE_FADE: f32 = 2.5;
/// Fraction of the ball velocity inherited at spawn
pub const VELOCITY_INHERIT: f32 = 0.1;

/// Default emitter: recycled pool with seeded jitter
#[derive(Debug, Clone)]
pub struct ParticleGenerator {
    shader: ShaderHandle,
    texture: TextureHandle,
    particles: Vec<Particle>,
    last_used: usize,
    rng: Pcg32,
}

impl ParticleGenerator {
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Index of a dead particle, scanning from the last one reused.
    /// With no dead particle left the first slot is overwritten.
    fn first_unused(&mut self) -> usize {
        let found = (self.last_used..self.particles.len())
            .chain(0..self.last_used)
            .find(|&i| !self.particles[i].is_alive());
        let index = found.unwrap_or(0);
        self.last_used = index;
        index
    }

    fn respawn(&mut self, index: usize, ball: &BallSnapshot, offset: Vec2, velocity_bias: Vec2) {
        let jitter = self.rng.random_range(-50..50) as f32 / 10.0;
        let shade = 0.5 + self.rng.random_range(0..100) as f32 / 100.0;
        self.particles[index] = Particle {
            position: ball.position + Vec2::splat(jitter) + offset,
            velocity: ball.velocity * VELOCITY_INHERIT + velocity_bias,
            color: Vec4::new(shade, shade, shade, 1.0),
            life: PARTICLE_LIFE,
        };
    }
}

impl ParticleEmitter for ParticleGenerator {
    fn create(shader: ShaderHandle, texture: TextureHandle, capacity: usize, seed: u64) -> Self {
        Self {
            shader,
            texture,
            particles: vec![Particle::default(); capacity],
            last_used: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    fn update(
        &mut self,
        dt: f32,
        ball: &BallSnapshot,
        spawn_count: u32,
        offset: Vec2,
        velocity_bias: Vec2,
    ) {
        if self.particles.is_empty() {
            return;
        }
        for _ in 0..spawn_count {
            let index = self.first_unused();
            self.respawn(index, ball, offset, velocity_bias);
        }
        for p in self.particles.iter_mut() {
            p.life -= dt;
            if p.is_alive() {
                p.position -= p.velocity * dt;
                p.color.w -= dt * PARTICLE_FADE;
            }
        }
    }

    fn draw(&self, backend: &mut dyn GraphicsBackend) {
        let instances: Vec<ParticleInstance> = self
            .particles
            .iter()
            .filter(|p| p.is_alive())
            .map(|p| ParticleInstance {
                offset: p.position.to_array(),
                color: p.color.to_array(),
            })
            .collect();
        if instances.is_empty() {
            return;
        }
        backend.draw_particles(self.shader, self.texture, &instances);
    }

    fn live_count(&self) -> usize {
        self.particles.iter().filter(|p| p.is_alive()).count()
    }

    fn capacity(&self) -> usize {
        self.particles.len()
    }
}
