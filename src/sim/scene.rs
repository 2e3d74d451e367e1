//! One-time scene construction
//!
//! Loads shaders and textures, wires the projection, builds the trail
//! emitters and seats the paddle and ball. Any failure aborts the whole
//! bootstrap; nothing is kept from a partial run.

use glam::Vec2;

use super::particles::ParticleEmitter;
use super::state::{BallObject, GameObject};
use super::trail::{TrailConfig, TrailSet};
use crate::consts::*;
use crate::error::GameResult;
use crate::renderer::{
    GraphicsBackend, ResourceManager, SpriteRenderer, TextureHandle, screen_projection,
};
use crate::settings::Settings;

/// Immutable viewport extent in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    width: u32,
    height: u32,
}

impl Viewport {
    /// Returns `None` for a zero extent on either axis
    pub fn new(width: u32, height: u32) -> Option<Self> {
        (width > 0 && height > 0).then_some(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// Paddle top-left: horizontally centred, resting on the bottom edge
    pub fn paddle_origin(&self) -> Vec2 {
        Vec2::new(
            (self.width / 2) as f32 - PLAYER_SIZE.x / 2.0,
            self.height as f32 - PLAYER_SIZE.y,
        )
    }
}

/// Ball top-left when seated on the paddle at `paddle_pos`
pub fn ball_seat(paddle_pos: Vec2) -> Vec2 {
    paddle_pos + Vec2::new(PLAYER_SIZE.x / 2.0 - BALL_RADIUS, -BALL_RADIUS * 2.0)
}

/// Everything `Game::init` builds
pub struct Scene<E: ParticleEmitter> {
    /// Name-keyed handles for later lookups (`shader`/`texture`) by the embedder
    pub resources: ResourceManager,
    pub renderer: SpriteRenderer,
    pub background: TextureHandle,
    pub player: GameObject,
    pub ball: BallObject,
    pub trails: TrailSet<E>,
}

impl<E: ParticleEmitter> Scene<E> {
    pub fn bootstrap(
        settings: &Settings,
        viewport: Viewport,
        backend: &mut dyn GraphicsBackend,
    ) -> GameResult<Self> {
        let assets = &settings.assets;
        let mut resources = ResourceManager::new();

        // Shaders
        let sprite_shader = resources.load_shader(backend, "sprite", &assets.sprite_shader)?;
        let particle_shader =
            resources.load_shader(backend, "particle", &assets.particle_shader)?;
        let projection = screen_projection(viewport.width(), viewport.height());
        backend.set_projection(sprite_shader, projection);
        backend.set_projection(particle_shader, projection);

        // Textures
        let background = resources.load_texture(backend, "background", &assets.background, false)?;
        let fire = resources.load_texture(backend, "fire", &assets.fire, true)?;
        let paddle = resources.load_texture(backend, "paddle", &assets.paddle, true)?;
        let particle = resources.load_texture(backend, "particle", &assets.particle, true)?;

        let renderer = SpriteRenderer::new(sprite_shader);
        let layers: &[TrailConfig] = if settings.trails {
            settings.trail_layers.as_slice()
        } else {
            &[]
        };
        let trails = TrailSet::new(
            layers,
            particle_shader,
            particle,
            settings.emitter_capacity,
            settings.seed,
        );

        let player_pos = viewport.paddle_origin();
        let player = GameObject::new(player_pos, PLAYER_SIZE, paddle);
        let ball = BallObject::new(
            ball_seat(player_pos),
            BALL_RADIUS,
            INITIAL_BALL_VELOCITY,
            fire,
        );

        log::info!(
            "Scene ready: {}x{} viewport, {} trail emitters x {} particles",
            viewport.width(),
            viewport.height(),
            trails.len(),
            settings.emitter_capacity
        );

        Ok(Self {
            resources,
            renderer,
            background,
            player,
            ball,
            trails,
        })
    }

    /// Put paddle and ball back in their starting places; emitters are kept
    pub fn reset_player(&mut self, viewport: Viewport) {
        self.player.size = PLAYER_SIZE;
        self.player.position = viewport.paddle_origin();
        self.ball.reset(ball_seat(self.player.position), INITIAL_BALL_VELOCITY);
    }
}
