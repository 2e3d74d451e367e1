//! Rendering contract
//!
//! The game core never talks to a GPU API directly. It drives a
//! [`GraphicsBackend`], which owns shader compilation, texture upload and
//! the actual draw calls.

pub mod headless;
pub mod resources;
pub mod sprite;

pub use headless::{HeadlessBackend, ParticleBatch, SpriteDraw};
pub use resources::ResourceManager;
pub use sprite::SpriteRenderer;

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2};

use crate::error::GameResult;
use crate::settings::ShaderPaths;

/// Opaque handle to a compiled shader program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderHandle(pub u32);

/// Opaque handle to an uploaded texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Per-particle instance data (must match the particle shader)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct ParticleInstance {
    pub offset: [f32; 2],
    pub color: [f32; 4],
}

/// Graphics API seen by the game core
pub trait GraphicsBackend {
    fn compile_shader(&mut self, name: &str, paths: &ShaderPaths) -> GameResult<ShaderHandle>;

    fn load_texture(&mut self, name: &str, path: &str, alpha: bool) -> GameResult<TextureHandle>;

    /// Bind the sampler slot and projection matrix of a shader
    fn set_projection(&mut self, shader: ShaderHandle, projection: Mat4);

    fn draw_sprite(
        &mut self,
        shader: ShaderHandle,
        texture: TextureHandle,
        position: Vec2,
        size: Vec2,
        rotation: f32,
    );

    /// Draw a batch of particles with additive blending
    fn draw_particles(
        &mut self,
        shader: ShaderHandle,
        texture: TextureHandle,
        instances: &[ParticleInstance],
    );
}

/// Screen-space orthographic projection, origin top-left, y down
pub fn screen_projection(width: u32, height: u32) -> Mat4 {
    Mat4::orthographic_rh_gl(0.0, width as f32, height as f32, 0.0, -1.0, 1.0)
}
