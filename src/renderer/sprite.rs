//! Textured quad renderer

use glam::Vec2;

use super::{GraphicsBackend, ShaderHandle, TextureHandle};

/// Draws textured quads with the sprite shader
#[derive(Debug, Clone, Copy)]
pub struct SpriteRenderer {
    shader: ShaderHandle,
}

impl SpriteRenderer {
    pub fn new(shader: ShaderHandle) -> Self {
        Self { shader }
    }

    pub fn shader(&self) -> ShaderHandle {
        self.shader
    }

    pub fn draw_sprite(
        &self,
        backend: &mut dyn GraphicsBackend,
        texture: TextureHandle,
        position: Vec2,
        size: Vec2,
        rotation: f32,
    ) {
        backend.draw_sprite(self.shader, texture, position, size, rotation);
    }
}
