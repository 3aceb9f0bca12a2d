//! The slice of OpenGL the engine talks to
//!
//! Everything above this trait is backend-agnostic plain Rust; everything
//! below it is raw GL. Keeping the seam this narrow lets geometry upload,
//! program building and the frame loop run against a recording fake in
//! tests.

use super::shader::ShaderStage;

/// Upper bound, in bytes, for shader and program info logs
pub const INFO_LOG_CAPACITY: usize = 1024;

macro_rules! gl_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(pub u32);

        impl $name {
            /// Raw GL object name
            pub const fn raw(self) -> u32 {
                self.0
            }
        }
    };
}

gl_handle!(
    /// Vertex array object name
    VertexArray
);
gl_handle!(
    /// Buffer object name
    Buffer
);
gl_handle!(
    /// Shader stage object name
    Shader
);
gl_handle!(
    /// Program object name
    Program
);

/// OpenGL entry points used by the engine
///
/// Methods mirror single GL calls. Bind methods take `None` to bind the
/// zero object. Creation methods return `None` where GL reports failure by
/// returning object name 0.
pub trait GlApi {
    /// `glViewport`
    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);

    /// `glGenVertexArrays` for a single array
    fn create_vertex_array(&self) -> VertexArray;
    /// `glBindVertexArray`
    fn bind_vertex_array(&self, vertex_array: Option<VertexArray>);
    /// Currently bound vertex array (`GL_VERTEX_ARRAY_BINDING`)
    fn bound_vertex_array(&self) -> Option<VertexArray>;

    /// `glGenBuffers` for a single buffer
    fn create_buffer(&self) -> Buffer;
    /// `glBindBuffer(GL_ARRAY_BUFFER, ..)`
    fn bind_array_buffer(&self, buffer: Option<Buffer>);
    /// Currently bound array buffer (`GL_ARRAY_BUFFER_BINDING`)
    fn bound_array_buffer(&self) -> Option<Buffer>;
    /// `glBufferData(GL_ARRAY_BUFFER, .., GL_STATIC_DRAW)`
    fn array_buffer_static_data(&self, data: &[u8]);
    /// `glVertexAttribPointer` with `GL_FLOAT`, not normalized
    fn vertex_attrib_pointer_f32(&self, index: u32, components: i32, stride: i32, offset: usize);
    /// `glEnableVertexAttribArray`
    fn enable_vertex_attrib_array(&self, index: u32);

    /// `glCreateShader`
    fn create_shader(&self, stage: ShaderStage) -> Option<Shader>;
    /// `glShaderSource` with a single string of explicit length
    fn shader_source(&self, shader: Shader, source: &str);
    /// `glCompileShader`
    fn compile_shader(&self, shader: Shader);
    /// `GL_COMPILE_STATUS`
    fn shader_compile_status(&self, shader: Shader) -> bool;
    /// `glGetShaderInfoLog`, at most [`INFO_LOG_CAPACITY`] bytes
    fn shader_info_log(&self, shader: Shader) -> String;
    /// `glDeleteShader`
    fn delete_shader(&self, shader: Shader);

    /// `glCreateProgram`
    fn create_program(&self) -> Option<Program>;
    /// `glAttachShader`
    fn attach_shader(&self, program: Program, shader: Shader);
    /// `glDetachShader`
    fn detach_shader(&self, program: Program, shader: Shader);
    /// `glLinkProgram`
    fn link_program(&self, program: Program);
    /// `GL_LINK_STATUS`
    fn program_link_status(&self, program: Program) -> bool;
    /// `glValidateProgram`
    fn validate_program(&self, program: Program);
    /// `GL_VALIDATE_STATUS`
    fn program_validate_status(&self, program: Program) -> bool;
    /// `glGetProgramInfoLog`, at most [`INFO_LOG_CAPACITY`] bytes
    fn program_info_log(&self, program: Program) -> String;
    /// `glDeleteProgram`
    fn delete_program(&self, program: Program);
    /// `glUseProgram`
    fn use_program(&self, program: Option<Program>);

    /// `glClearColor`
    fn clear_color(&self, rgba: [f32; 4]);
    /// `glClear(GL_COLOR_BUFFER_BIT)`
    fn clear_color_buffer(&self);
    /// `glDrawArrays(GL_TRIANGLES, ..)`
    fn draw_triangles(&self, first: i32, count: i32);

    /// `glGetError`, `None` for `GL_NO_ERROR`
    fn get_error(&self) -> Option<u32>;
}

/// Cut `log` down to [`INFO_LOG_CAPACITY`] bytes on a char boundary and
/// drop the trailing NULs/newlines drivers tend to append
pub fn bounded_log(log: &str) -> String {
    let mut end = log.len().min(INFO_LOG_CAPACITY);
    while !log.is_char_boundary(end) {
        end -= 1;
    }
    log[..end].trim_end_matches(['\0', '\n', '\r']).to_string()
}
