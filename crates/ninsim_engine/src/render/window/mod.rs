//! Window management subsystem
//!
//! - **`backend`**: the [`WindowBackend`] trait the frame loop is written against
//! - **`glfw_window`**: the GLFW implementation with an OpenGL context

pub mod backend;
pub mod glfw_window;

pub use backend::{WindowBackend, WindowError, WindowEvent, WindowResult};
pub use glfw_window::GlfwWindow;
