//! GLFW window with an OpenGL core-profile context

use glfw::Context;

use super::backend::{WindowBackend, WindowError, WindowEvent, WindowResult};
use crate::core::config::WindowConfig;
use crate::render::opengl::context::GlContext;

/// Error callback installed at GLFW initialization
///
/// GLFW reports the cause of a failed `glfwInit` or `glfwCreateWindow` here
/// before the call returns. This runs inside a C callback, so it must not
/// panic; the failure itself surfaces as a [`WindowError`] from
/// [`GlfwWindow::open`].
#[allow(clippy::needless_pass_by_value)]
pub(crate) fn log_glfw_error(error: glfw::Error, description: String) {
    log::error!("GLFW error ({error}): {description}");
}

/// GLFW window owning the current OpenGL context
///
/// Dropping it destroys the window; GLFW terminates when the last `Glfw`
/// handle goes away.
pub struct GlfwWindow {
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
    glfw: glfw::Glfw,
}

impl GlfwWindow {
    /// Create the window, make its context current and load OpenGL
    pub fn open(config: &WindowConfig) -> WindowResult<(Self, GlContext)> {
        let mut glfw = glfw::init(log_glfw_error).map_err(|_| WindowError::InitializationFailed)?;

        let (major, minor) = config.context_version;
        glfw.window_hint(glfw::WindowHint::ContextVersion(major, minor));
        glfw.window_hint(glfw::WindowHint::OpenGlProfile(
            glfw::OpenGlProfileHint::Core,
        ));
        glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(
            config.forward_compatible,
        ));

        let (mut window, events) = glfw
            .create_window(
                config.width,
                config.height,
                &config.title,
                glfw::WindowMode::Windowed,
            )
            .ok_or(WindowError::CreationFailed)?;

        window.make_current();
        window.set_close_polling(true);
        window.set_framebuffer_size_polling(true);

        let gl = GlContext::load(|name| window.get_proc_address(name) as *const _)
            .ok_or(WindowError::LoaderFailed)?;

        log::info!(
            "Created {}x{} window '{}' with OpenGL {major}.{minor} core context",
            config.width,
            config.height,
            config.title
        );

        Ok((Self { window, events, glfw }, gl))
    }

    fn translate(event: glfw::WindowEvent) -> Option<WindowEvent> {
        match event {
            glfw::WindowEvent::Close => Some(WindowEvent::CloseRequested),
            glfw::WindowEvent::FramebufferSize(width, height) => {
                Some(WindowEvent::FramebufferResized {
                    width: u32::try_from(width).unwrap_or(0),
                    height: u32::try_from(height).unwrap_or(0),
                })
            }
            _ => None,
        }
    }
}

impl WindowBackend for GlfwWindow {
    fn should_close(&self) -> bool {
        self.window.should_close()
    }

    fn set_should_close(&mut self, should_close: bool) {
        self.window.set_should_close(should_close);
    }

    fn poll_events(&mut self) -> Vec<WindowEvent> {
        self.glfw.poll_events();
        glfw::flush_messages(&self.events)
            .filter_map(|(_, event)| Self::translate(event))
            .collect()
    }

    fn swap_buffers(&mut self) {
        self.window.swap_buffers();
    }

    fn framebuffer_size(&self) -> (u32, u32) {
        let (width, height) = self.window.get_framebuffer_size();
        (
            u32::try_from(width).unwrap_or(0),
            u32::try_from(height).unwrap_or(0),
        )
    }
}
