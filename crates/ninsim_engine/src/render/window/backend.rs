//! Window system abstraction used by the frame loop
//!
//! The engine loop only needs a handful of operations from the window
//! system. They are collected in [`WindowBackend`] so the loop can be
//! driven by a scripted window in tests.

use thiserror::Error;

/// Window management errors
#[derive(Error, Debug)]
pub enum WindowError {
    /// The windowing library could not be initialized
    #[error("GLFW initialisation failed!")]
    InitializationFailed,

    /// The window or its GL context could not be created
    #[error("GLFW window creation failed!")]
    CreationFailed,

    /// OpenGL entry points could not be loaded for the new context
    #[error("GL loader initialisation failed!")]
    LoaderFailed,
}

/// Result alias for window operations
pub type WindowResult<T> = Result<T, WindowError>;

/// Window events the engine reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    /// The framebuffer changed size, in pixels
    FramebufferResized {
        /// New framebuffer width
        width: u32,
        /// New framebuffer height
        height: u32,
    },
    /// The user asked to close the window
    CloseRequested,
}

/// Operations the frame loop performs on its window
///
/// Window operations must happen on the thread that created the window.
pub trait WindowBackend {
    /// Whether the window has been asked to close
    fn should_close(&self) -> bool;

    /// Set or clear the close flag
    fn set_should_close(&mut self, should_close: bool);

    /// Process pending window system events without blocking
    fn poll_events(&mut self) -> Vec<WindowEvent>;

    /// Present the back buffer
    fn swap_buffers(&mut self);

    /// Current framebuffer size in pixels
    fn framebuffer_size(&self) -> (u32, u32);
}
