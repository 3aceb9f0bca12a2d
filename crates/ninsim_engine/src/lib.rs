//! # NinSim Engine
//!
//! A minimal OpenGL bootstrap: it opens a GLFW window with a 3.3 core context,
//! uploads one triangle, builds a vertex/fragment shader program and redraws
//! the triangle every frame until the window is closed.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ninsim_engine::prelude::*;
//!
//! fn main() {
//!     let config = ApplicationConfig::default();
//!     let result = Engine::run(&config);
//!     std::process::exit(Engine::exit_code(&result));
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod core;

pub mod config;
pub mod foundation;
pub mod render;

mod engine;

pub use engine::{Engine, EngineError, RunSummary};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        Engine, EngineError, RunSummary,
        core::config::{
            ApplicationConfig, EngineConfig, RendererConfig, ShaderConfig, WindowConfig,
        },
        config::{Config, ConfigError},
        render::{
            GeometryBuffer, Renderer, Scene, ShaderProgram, ShaderSources, ShaderStage,
            ShaderError,
        },
    };
}
