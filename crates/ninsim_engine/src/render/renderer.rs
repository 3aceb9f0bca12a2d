//! Per-frame drawing

use super::opengl::api::GlApi;
use super::scene::Scene;
use crate::core::config::RendererConfig;

/// What a single frame did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    /// The triangle draw call was issued
    pub drew: bool,
    /// GL errors drained after the frame (0 unless error checking is on)
    pub gl_errors: usize,
}

/// Clears the framebuffer and draws the scene
#[derive(Debug, Clone)]
pub struct Renderer {
    clear_color: [f32; 4],
    check_gl_errors: bool,
}

impl Renderer {
    /// Create a renderer from its configuration
    pub const fn new(config: &RendererConfig) -> Self {
        Self {
            clear_color: config.clear_color,
            check_gl_errors: config.check_gl_errors,
        }
    }

    /// Set the viewport to cover a `width`×`height` framebuffer
    pub fn resize(&self, gl: &impl GlApi, width: u32, height: u32) {
        let width = i32::try_from(width).unwrap_or(i32::MAX);
        let height = i32::try_from(height).unwrap_or(i32::MAX);
        gl.viewport(0, 0, width, height);
        log::debug!("Viewport set to {width}x{height}");
    }

    /// Render one frame
    ///
    /// Scenes whose program failed to build are cleared but not drawn.
    pub fn draw_frame(&self, gl: &impl GlApi, scene: &Scene) -> FrameReport {
        gl.clear_color(self.clear_color);
        gl.clear_color_buffer();

        let drew = scene.program().map_or(false, |program| {
            let geometry = scene.geometry();
            gl.use_program(Some(program.handle()));
            gl.bind_vertex_array(Some(geometry.vertex_array()));
            gl.draw_triangles(0, geometry.vertex_count());
            gl.bind_vertex_array(None);
            gl.use_program(None);
            true
        });

        let gl_errors = if self.check_gl_errors {
            Self::drain_errors(gl)
        } else {
            0
        };

        FrameReport { drew, gl_errors }
    }

    fn drain_errors(gl: &impl GlApi) -> usize {
        // glGetError has one flag per error kind; a handful of reads empties it.
        const MAX_ERROR_READS: usize = 16;

        let mut count = 0;
        while let Some(code) = gl.get_error() {
            log::warn!("OpenGL error 0x{code:04X} after draw");
            count += 1;
            if count == MAX_ERROR_READS {
                break;
            }
        }
        count
    }
}
