//! OpenGL backend
//!
//! - **`api`**: the [`GlApi`] trait and typed object handles
//! - **`context`**: [`GlContext`], the real implementation over the `gl` crate
//! - **`shader`**: stage compilation and program linking

pub mod api;
pub mod context;
pub mod shader;

#[cfg(test)]
pub(crate) mod fake;

pub use api::{Buffer, GlApi, Program, Shader, VertexArray, INFO_LOG_CAPACITY};
pub use context::GlContext;
pub use shader::{compile_stage, ShaderError, ShaderProgram, ShaderStage};
