//! # Application Configuration
//!
//! All knobs the bootstrap exposes live here: window and context creation,
//! renderer behavior, shader sources and logging. Every struct has defaults
//! reproducing the classic fixed setup (800×600 "Test" window, OpenGL 3.3
//! core, black clear color, embedded triangle shaders), so running without a
//! config file behaves exactly like the hardcoded program.
//!
//! ## Configuration Categories
//!
//! - **Engine Config**: logging
//! - **Window Config**: title, size, GL context version
//! - **Renderer Config**: clear color, resize/error-check extensions, shaders

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::{Config, ConfigError};

/// Embedded default vertex stage source
pub const DEFAULT_VERTEX_SHADER: &str =
    include_str!("../../../../resources/shaders/triangle.vert");

/// Embedded default fragment stage source
pub const DEFAULT_FRAGMENT_SHADER: &str =
    include_str!("../../../../resources/shaders/triangle.frag");

/// Vertex and fragment GLSL text ready to be compiled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSources {
    /// Vertex stage source
    pub vertex: String,
    /// Fragment stage source
    pub fragment: String,
}

impl ShaderSources {
    /// Create sources from in-memory text
    pub fn new(vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }
}

impl Default for ShaderSources {
    fn default() -> Self {
        Self::new(DEFAULT_VERTEX_SHADER, DEFAULT_FRAGMENT_SHADER)
    }
}

/// # Shader Configuration
///
/// Optional paths to GLSL files overriding the embedded sources. A stage
/// without a path uses its embedded default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShaderConfig {
    /// Path to a vertex shader GLSL file
    pub vertex_shader_path: Option<String>,
    /// Path to a fragment shader GLSL file
    pub fragment_shader_path: Option<String>,
}

impl ShaderConfig {
    /// Create a shader configuration reading both stages from disk
    pub fn from_files(vertex_path: impl Into<String>, fragment_path: impl Into<String>) -> Self {
        Self {
            vertex_shader_path: Some(vertex_path.into()),
            fragment_shader_path: Some(fragment_path.into()),
        }
    }

    /// Resolve the configured sources, reading files where paths are set
    pub fn load_sources(&self) -> Result<ShaderSources, ConfigError> {
        let vertex = Self::read_or(self.vertex_shader_path.as_deref(), DEFAULT_VERTEX_SHADER)?;
        let fragment =
            Self::read_or(self.fragment_shader_path.as_deref(), DEFAULT_FRAGMENT_SHADER)?;
        Ok(ShaderSources { vertex, fragment })
    }

    fn read_or(path: Option<&str>, fallback: &str) -> Result<String, ConfigError> {
        match path {
            Some(path) => {
                log::debug!("Reading shader source from {path}");
                Ok(std::fs::read_to_string(path)?)
            }
            None => Ok(fallback.to_string()),
        }
    }

    /// Validate that configured shader files exist
    pub fn validate(&self) -> Result<(), String> {
        for (stage, path) in [
            ("Vertex", &self.vertex_shader_path),
            ("Fragment", &self.fragment_shader_path),
        ] {
            if let Some(path) = path {
                if !Path::new(path).exists() {
                    return Err(format!("{stage} shader not found: {path}"));
                }
            }
        }
        Ok(())
    }
}

/// # Window Configuration
///
/// Window and OpenGL context creation parameters. The context always uses
/// the core profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Client area width in screen coordinates
    pub width: u32,
    /// Client area height in screen coordinates
    pub height: u32,
    /// Requested OpenGL context version (major, minor)
    pub context_version: (u32, u32),
    /// Request a forward-compatible context
    pub forward_compatible: bool,
}

impl WindowConfig {
    /// Lowest context version the embedded shaders (`#version 330`) accept
    pub const MIN_CONTEXT_VERSION: (u32, u32) = (3, 3);

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.title.is_empty() {
            return Err("Window title cannot be empty".to_string());
        }
        if self.width == 0 || self.height == 0 {
            return Err(format!(
                "Window size must be non-zero, got {}x{}",
                self.width, self.height
            ));
        }
        if self.context_version < Self::MIN_CONTEXT_VERSION {
            let (major, minor) = self.context_version;
            return Err(format!("OpenGL {major}.{minor} is below the required 3.3"));
        }
        Ok(())
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Test".to_string(),
            width: 800,
            height: 600,
            context_version: Self::MIN_CONTEXT_VERSION,
            forward_compatible: true,
        }
    }
}

/// # Renderer Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// RGBA color the framebuffer is cleared to each frame
    pub clear_color: [f32; 4],
    /// Update the viewport when the framebuffer is resized
    pub viewport_tracks_resize: bool,
    /// Drain and log `glGetError` after each frame's draw
    pub check_gl_errors: bool,
    /// Shader sources
    pub shaders: ShaderConfig,
}

impl RendererConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if let Some(channel) = self
            .clear_color
            .iter()
            .find(|c| !(0.0..=1.0).contains(*c))
        {
            return Err(format!("Clear color channel {channel} is outside [0, 1]"));
        }
        self.shaders.validate()
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            clear_color: [0.0, 0.0, 0.0, 1.0],
            viewport_tracks_resize: false,
            check_gl_errors: false,
            shaders: ShaderConfig::default(),
        }
    }
}

/// # Engine Configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Log filter for the engine, in `env_logger` syntax
    pub log_level: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// # Complete Application Configuration
///
/// Top-level configuration handed to [`crate::Engine::run`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Engine core configuration
    pub engine: EngineConfig,
    /// Window and context configuration
    pub window: WindowConfig,
    /// Rendering configuration
    pub renderer: RendererConfig,
}

impl ApplicationConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), String> {
        self.window.validate()?;
        self.renderer.validate()?;
        Ok(())
    }
}

impl Config for ApplicationConfig {
    fn check(&self) -> Result<(), String> {
        self.validate()
    }
}
