//! # Core Engine Module
//!
//! Shared configuration types used by every other subsystem.

pub mod config;

pub use crate::foundation;

pub use config::{
    ApplicationConfig,
    EngineConfig,
    RendererConfig,
    ShaderConfig,
    ShaderSources,
    WindowConfig,
};
