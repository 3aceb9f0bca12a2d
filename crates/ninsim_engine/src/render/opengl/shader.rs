//! Shader program building
//!
//! Compiles the vertex and fragment stages, links them into a program and
//! validates it. Every failure is logged with the driver's info log and
//! returned to the caller; a half-built program object never escapes.

use std::fmt;

use thiserror::Error;

use super::api::{bounded_log, GlApi, Program, Shader};
use crate::core::config::ShaderSources;

/// One programmable pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Vertex stage
    Vertex,
    /// Fragment stage
    Fragment,
}

impl ShaderStage {
    /// Stages in the order they are compiled
    pub const BUILD_ORDER: [Self; 2] = [Self::Vertex, Self::Fragment];

    /// GL shader type enum
    pub const fn gl_enum(self) -> u32 {
        match self {
            Self::Vertex => gl::VERTEX_SHADER,
            Self::Fragment => gl::FRAGMENT_SHADER,
        }
    }

    /// Source text for this stage
    pub fn source(self, sources: &ShaderSources) -> &str {
        match self {
            Self::Vertex => &sources.vertex,
            Self::Fragment => &sources.fragment,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Vertex => "vertex",
            Self::Fragment => "fragment",
        })
    }
}

/// Shader program build failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShaderError {
    /// `glCreateShader` returned 0
    #[error("Error creating the {0} shader")]
    ShaderCreateFailed(ShaderStage),

    /// A stage failed to compile
    #[error("Error compiling the {stage} shader: '{log}'")]
    StageCompileFailed {
        /// Stage that failed
        stage: ShaderStage,
        /// Driver info log
        log: String,
    },

    /// `glCreateProgram` returned 0
    #[error("Error creating shader program!")]
    ProgramCreateFailed,

    /// The program failed to link
    #[error("Error linking program: '{0}'")]
    LinkFailed(String),

    /// The program failed validation against the current GL state
    #[error("Error validate program: '{0}'")]
    ValidateFailed(String),
}

/// Compile `source` as `stage` and attach it to `program`
///
/// On failure the stage object is deleted and nothing is attached.
pub fn compile_stage(
    gl: &impl GlApi,
    program: Program,
    source: &str,
    stage: ShaderStage,
) -> Result<Shader, ShaderError> {
    let shader = gl.create_shader(stage).ok_or_else(|| {
        let err = ShaderError::ShaderCreateFailed(stage);
        log::error!("{err}");
        err
    })?;

    gl.shader_source(shader, source);
    gl.compile_shader(shader);

    if !gl.shader_compile_status(shader) {
        let log = bounded_log(&gl.shader_info_log(shader));
        gl.delete_shader(shader);
        let err = ShaderError::StageCompileFailed { stage, log };
        log::error!("{err}");
        return Err(err);
    }

    gl.attach_shader(program, shader);
    log::debug!("Compiled and attached {stage} shader {}", shader.raw());
    Ok(shader)
}

/// A linked and validated program object
#[derive(Debug, PartialEq, Eq)]
pub struct ShaderProgram {
    program: Program,
}

impl ShaderProgram {
    /// Build a program from a vertex/fragment source pair
    pub fn build(gl: &impl GlApi, sources: &ShaderSources) -> Result<Self, ShaderError> {
        let program = gl.create_program().ok_or_else(|| {
            log::error!("{}", ShaderError::ProgramCreateFailed);
            ShaderError::ProgramCreateFailed
        })?;

        match Self::compile_and_link(gl, program, sources) {
            Ok(()) => {
                log::info!("Shader program {} linked and validated", program.raw());
                Ok(Self { program })
            }
            Err(err) => {
                gl.delete_program(program);
                Err(err)
            }
        }
    }

    fn compile_and_link(
        gl: &impl GlApi,
        program: Program,
        sources: &ShaderSources,
    ) -> Result<(), ShaderError> {
        let mut attached = Vec::with_capacity(ShaderStage::BUILD_ORDER.len());
        let compiled = ShaderStage::BUILD_ORDER
            .iter()
            .try_for_each(|&stage| -> Result<(), ShaderError> {
                attached.push(compile_stage(gl, program, stage.source(sources), stage)?);
                Ok(())
            });

        if compiled.is_ok() {
            gl.link_program(program);
        }

        // The program keeps its linked binary; the stage objects can go.
        for shader in attached {
            gl.detach_shader(program, shader);
            gl.delete_shader(shader);
        }
        compiled?;

        if !gl.program_link_status(program) {
            let err = ShaderError::LinkFailed(bounded_log(&gl.program_info_log(program)));
            log::error!("{err}");
            return Err(err);
        }

        gl.validate_program(program);
        if !gl.program_validate_status(program) {
            let err = ShaderError::ValidateFailed(bounded_log(&gl.program_info_log(program)));
            log::error!("{err}");
            return Err(err);
        }

        Ok(())
    }

    /// Program object name
    pub const fn handle(&self) -> Program {
        self.program
    }
}
