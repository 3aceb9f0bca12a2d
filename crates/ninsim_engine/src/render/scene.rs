//! GPU objects owned for the lifetime of the window

use super::geometry::GeometryBuffer;
use super::opengl::api::GlApi;
use super::opengl::shader::{ShaderError, ShaderProgram};
use crate::core::config::ShaderSources;

/// Everything the frame loop draws with
///
/// The program is kept as the build result: a failed build is carried
/// forward so the renderer can skip drawing instead of binding a dead
/// program.
#[derive(Debug)]
pub struct Scene {
    geometry: GeometryBuffer,
    program: Result<ShaderProgram, ShaderError>,
}

impl Scene {
    /// Upload the triangle, then build the shader program
    pub fn build(gl: &impl GlApi, sources: &ShaderSources) -> Self {
        let geometry = GeometryBuffer::triangle(gl);
        let program = ShaderProgram::build(gl, sources);
        Self { geometry, program }
    }

    /// Assemble a scene from already-built parts
    pub const fn new(
        geometry: GeometryBuffer,
        program: Result<ShaderProgram, ShaderError>,
    ) -> Self {
        Self { geometry, program }
    }

    /// Uploaded vertex data
    pub const fn geometry(&self) -> &GeometryBuffer {
        &self.geometry
    }

    /// The program, if it built
    pub fn program(&self) -> Option<&ShaderProgram> {
        self.program.as_ref().ok()
    }

    /// Why the program is unusable, if it is
    pub fn program_error(&self) -> Option<&ShaderError> {
        self.program.as_ref().err()
    }

    /// Whether frames will issue the draw call
    pub const fn is_drawable(&self) -> bool {
        self.program.is_ok()
    }
}
