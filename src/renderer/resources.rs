//! Named shader/texture cache

use std::collections::HashMap;

use super::{GraphicsBackend, ShaderHandle, TextureHandle};
use crate::error::{GameError, GameResult};
use crate::settings::ShaderPaths;

/// Caches backend handles by name so repeated loads are free
#[derive(Debug, Default)]
pub struct ResourceManager {
    shaders: HashMap<String, ShaderHandle>,
    textures: HashMap<String, TextureHandle>,
}

impl ResourceManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile a shader once; later calls with the same name return the cached handle
    pub fn load_shader(
        &mut self,
        backend: &mut dyn GraphicsBackend,
        name: &str,
        paths: &ShaderPaths,
    ) -> GameResult<ShaderHandle> {
        if let Some(&handle) = self.shaders.get(name) {
            return Ok(handle);
        }
        let handle = backend.compile_shader(name, paths)?;
        log::debug!("Loaded shader '{name}' from {} + {}", paths.vertex, paths.fragment);
        self.shaders.insert(name.to_string(), handle);
        Ok(handle)
    }

    pub fn load_texture(
        &mut self,
        backend: &mut dyn GraphicsBackend,
        name: &str,
        path: &str,
        alpha: bool,
    ) -> GameResult<TextureHandle> {
        if let Some(&handle) = self.textures.get(name) {
            return Ok(handle);
        }
        let handle = backend.load_texture(name, path, alpha)?;
        log::debug!("Loaded texture '{name}' from {path}");
        self.textures.insert(name.to_string(), handle);
        Ok(handle)
    }

    pub fn shader(&self, name: &str) -> GameResult<ShaderHandle> {
        self.shaders.get(name).copied().ok_or_else(|| GameError::AssetNotFound {
            path: format!("shader:{name}"),
        })
    }

    pub fn texture(&self, name: &str) -> GameResult<TextureHandle> {
        self.textures.get(name).copied().ok_or_else(|| GameError::AssetNotFound {
            path: format!("texture:{name}"),
        })
    }

    pub fn len(&self) -> usize {
        self.shaders.len() + self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
