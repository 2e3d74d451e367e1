//! Headless backend
//!
//! Issues handles without touching a GPU and records every draw call, so the
//! game can run in CI and tests can inspect what a frame produced.

use std::collections::HashSet;

use glam::{Mat4, Vec2};

use super::{GraphicsBackend, ParticleInstance, ShaderHandle, TextureHandle};
use crate::error::{GameError, GameResult};
use crate::settings::ShaderPaths;

/// One recorded `draw_sprite` call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteDraw {
    pub shader: ShaderHandle,
    pub texture: TextureHandle,
    pub position: Vec2,
    pub size: Vec2,
    pub rotation: f32,
}

/// One recorded `draw_particles` call
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleBatch {
    pub shader: ShaderHandle,
    pub texture: TextureHandle,
    pub count: usize,
    /// Size of the instance upload
    pub bytes: usize,
}

#[derive(Debug, Default)]
pub struct HeadlessBackend {
    next_handle: u32,
    missing: HashSet<String>,
    texture_uploads: usize,
    projections: Vec<(ShaderHandle, Mat4)>,
    pub sprites: Vec<SpriteDraw>,
    pub particle_batches: Vec<ParticleBatch>,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat `path` as absent so loading it fails
    pub fn without_asset(mut self, path: &str) -> Self {
        self.missing.insert(path.to_string());
        self
    }

    fn next(&mut self) -> u32 {
        self.next_handle += 1;
        self.next_handle
    }

    fn check(&self, path: &str) -> GameResult<()> {
        if self.missing.contains(path) {
            return Err(GameError::AssetNotFound {
                path: path.to_string(),
            });
        }
        Ok(())
    }

    pub fn texture_uploads(&self) -> usize {
        self.texture_uploads
    }

    pub fn projection(&self, shader: ShaderHandle) -> Option<Mat4> {
        self.projections
            .iter()
            .rev()
            .find(|(s, _)| *s == shader)
            .map(|(_, m)| *m)
    }

    /// Total particles drawn since the last `clear_draws`
    pub fn particles_drawn(&self) -> usize {
        self.particle_batches.iter().map(|b| b.count).sum()
    }

    pub fn clear_draws(&mut self) {
        self.sprites.clear();
        self.particle_batches.clear();
    }
}

impl GraphicsBackend for HeadlessBackend {
    fn compile_shader(&mut self, name: &str, paths: &ShaderPaths) -> GameResult<ShaderHandle> {
        for path in [&paths.vertex, &paths.fragment] {
            if self.missing.contains(path.as_str()) {
                return Err(GameError::ShaderCompile {
                    name: name.to_string(),
                    reason: format!("missing source {path}"),
                });
            }
        }
        Ok(ShaderHandle(self.next()))
    }

    fn load_texture(&mut self, _name: &str, path: &str, _alpha: bool) -> GameResult<TextureHandle> {
        self.check(path)?;
        self.texture_uploads += 1;
        Ok(TextureHandle(self.next()))
    }

    fn set_projection(&mut self, shader: ShaderHandle, projection: Mat4) {
        self.projections.push((shader, projection));
    }

    fn draw_sprite(
        &mut self,
        shader: ShaderHandle,
        texture: TextureHandle,
        position: Vec2,
        size: Vec2,
        rotation: f32,
    ) {
        self.sprites.push(SpriteDraw {
            shader,
            texture,
            position,
            size,
            rotation,
        });
    }

    fn draw_particles(
        &mut self,
        shader: ShaderHandle,
        texture: TextureHandle,
        instances: &[ParticleInstance],
    ) {
        let bytes: &[u8] = bytemuck::cast_slice(instances);
        self.particle_batches.push(ParticleBatch {
            shader,
            texture,
            count: instances.len(),
            bytes: bytes.len(),
        });
    }
}
