//! Rendering: window, OpenGL objects and the per-frame draw

pub mod geometry;
pub mod opengl;
pub mod renderer;
pub mod scene;
pub mod window;

pub use crate::core::config::ShaderSources;
pub use geometry::{GeometryBuffer, TRIANGLE_VERTICES};
pub use opengl::{GlApi, GlContext, ShaderError, ShaderProgram, ShaderStage};
pub use renderer::{FrameReport, Renderer};
pub use scene::Scene;
pub use window::{GlfwWindow, WindowBackend, WindowError, WindowEvent};
