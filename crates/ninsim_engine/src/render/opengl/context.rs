//! [`GlApi`] over the `gl` crate's global function pointers
//!
//! Every call requires a successful [`GlContext::load`] on the thread whose
//! context is current; holding a `GlContext` guarantees both.

use std::ffi::c_void;
use std::marker::PhantomData;

use gl::types::{GLchar, GLenum, GLint, GLsizei, GLsizeiptr, GLuint};

use super::api::{Buffer, GlApi, Program, Shader, VertexArray, INFO_LOG_CAPACITY};
use super::shader::ShaderStage;

/// Loaded OpenGL function table for the current context
///
/// The `gl` crate stores entry points globally, so this type only proves that
/// loading happened. It is `!Send`: GL calls must stay on the thread owning
/// the current context.
pub struct GlContext {
    _current_thread_only: PhantomData<*const ()>,
}

impl GlContext {
    /// Load every entry point through `loader` (usually the window system's
    /// `get_proc_address`). Returns `None` if core entry points are missing.
    pub fn load<F>(loader: F) -> Option<Self>
    where
        F: FnMut(&'static str) -> *const c_void,
    {
        gl::load_with(loader);

        let loaded = gl::Viewport::is_loaded()
            && gl::GenVertexArrays::is_loaded()
            && gl::CreateShader::is_loaded()
            && gl::CreateProgram::is_loaded()
            && gl::DrawArrays::is_loaded();

        loaded.then_some(Self {
            _current_thread_only: PhantomData,
        })
    }

    fn integer(pname: GLenum) -> GLint {
        let mut value = 0;
        // SAFETY: `value` receives the single integer these queries return.
        unsafe { gl::GetIntegerv(pname, &mut value) };
        value
    }

    fn read_log(fill: impl FnOnce(GLsizei, *mut GLsizei, *mut GLchar)) -> String {
        let mut buffer = vec![0u8; INFO_LOG_CAPACITY];
        let mut written: GLsizei = 0;
        fill(
            INFO_LOG_CAPACITY as GLsizei,
            std::ptr::addr_of_mut!(written),
            buffer.as_mut_ptr().cast::<GLchar>(),
        );
        buffer.truncate(usize::try_from(written).unwrap_or(0));
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

const fn nonzero(name: GLint) -> Option<u32> {
    if name > 0 {
        Some(name as u32)
    } else {
        None
    }
}

impl GlApi for GlContext {
    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        // SAFETY: loaded entry point, value arguments only.
        unsafe { gl::Viewport(x, y, width, height) };
    }

    fn create_vertex_array(&self) -> VertexArray {
        let mut name: GLuint = 0;
        // SAFETY: `name` has room for the one name requested.
        unsafe { gl::GenVertexArrays(1, &mut name) };
        VertexArray(name)
    }

    fn bind_vertex_array(&self, vertex_array: Option<VertexArray>) {
        // SAFETY: loaded entry point, value arguments only.
        unsafe { gl::BindVertexArray(vertex_array.map_or(0, VertexArray::raw)) };
    }

    fn bound_vertex_array(&self) -> Option<VertexArray> {
        nonzero(Self::integer(gl::VERTEX_ARRAY_BINDING)).map(VertexArray)
    }

    fn create_buffer(&self) -> Buffer {
        let mut name: GLuint = 0;
        // SAFETY: `name` has room for the one name requested.
        unsafe { gl::GenBuffers(1, &mut name) };
        Buffer(name)
    }

    fn bind_array_buffer(&self, buffer: Option<Buffer>) {
        // SAFETY: loaded entry point, value arguments only.
        unsafe { gl::BindBuffer(gl::ARRAY_BUFFER, buffer.map_or(0, Buffer::raw)) };
    }

    fn bound_array_buffer(&self) -> Option<Buffer> {
        nonzero(Self::integer(gl::ARRAY_BUFFER_BINDING)).map(Buffer)
    }

    fn array_buffer_static_data(&self, data: &[u8]) {
        // SAFETY: pointer and length describe the same live slice.
        unsafe {
            gl::BufferData(
                gl::ARRAY_BUFFER,
                data.len() as GLsizeiptr,
                data.as_ptr().cast::<c_void>(),
                gl::STATIC_DRAW,
            );
        }
    }

    fn vertex_attrib_pointer_f32(&self, index: u32, components: i32, stride: i32, offset: usize) {
        // SAFETY: with a buffer bound, the pointer is a byte offset that GL
        // never dereferences on the CPU.
        unsafe {
            gl::VertexAttribPointer(
                index,
                components,
                gl::FLOAT,
                gl::FALSE,
                stride,
                offset as *const c_void,
            );
        }
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        // SAFETY: loaded entry point, value arguments only.
        unsafe { gl::EnableVertexAttribArray(index) };
    }

    fn create_shader(&self, stage: ShaderStage) -> Option<Shader> {
        // SAFETY: loaded entry point, value arguments only.
        let name = unsafe { gl::CreateShader(stage.gl_enum()) };
        (name != 0).then_some(Shader(name))
    }

    fn shader_source(&self, shader: Shader, source: &str) {
        let pointer = source.as_ptr().cast::<GLchar>();
        let length = source.len() as GLint;
        // SAFETY: one pointer/length pair for `source`, which outlives the call.
        unsafe { gl::ShaderSource(shader.raw(), 1, &pointer, &length) };
    }

    fn compile_shader(&self, shader: Shader) {
        // SAFETY: loaded entry point, value arguments only.
        unsafe { gl::CompileShader(shader.raw()) };
    }

    fn shader_compile_status(&self, shader: Shader) -> bool {
        let mut status: GLint = 0;
        // SAFETY: `status` receives a single integer.
        unsafe { gl::GetShaderiv(shader.raw(), gl::COMPILE_STATUS, &mut status) };
        status != 0
    }

    fn shader_info_log(&self, shader: Shader) -> String {
        // SAFETY: `read_log` passes a buffer of `capacity` bytes and a live `written`.
        Self::read_log(|capacity, written, buffer| unsafe {
            gl::GetShaderInfoLog(shader.raw(), capacity, written, buffer);
        })
    }

    fn delete_shader(&self, shader: Shader) {
        // SAFETY: loaded entry point, value arguments only.
        unsafe { gl::DeleteShader(shader.raw()) };
    }

    fn create_program(&self) -> Option<Program> {
        // SAFETY: loaded entry point, value arguments only.
        let name = unsafe { gl::CreateProgram() };
        (name != 0).then_some(Program(name))
    }

    fn attach_shader(&self, program: Program, shader: Shader) {
        // SAFETY: loaded entry point, value arguments only.
        unsafe { gl::AttachShader(program.raw(), shader.raw()) };
    }

    fn detach_shader(&self, program: Program, shader: Shader) {
        // SAFETY: loaded entry point, value arguments only.
        unsafe { gl::DetachShader(program.raw(), shader.raw()) };
    }

    fn link_program(&self, program: Program) {
        // SAFETY: loaded entry point, value arguments only.
        unsafe { gl::LinkProgram(program.raw()) };
    }

    fn program_link_status(&self, program: Program) -> bool {
        let mut status: GLint = 0;
        // SAFETY: `status` receives a single integer.
        unsafe { gl::GetProgramiv(program.raw(), gl::LINK_STATUS, &mut status) };
        status != 0
    }

    fn validate_program(&self, program: Program) {
        // SAFETY: loaded entry point, value arguments only.
        unsafe { gl::ValidateProgram(program.raw()) };
    }

    fn program_validate_status(&self, program: Program) -> bool {
        let mut status: GLint = 0;
        // SAFETY: `status` receives a single integer.
        unsafe { gl::GetProgramiv(program.raw(), gl::VALIDATE_STATUS, &mut status) };
        status != 0
    }

    fn program_info_log(&self, program: Program) -> String {
        // SAFETY: `read_log` passes a buffer of `capacity` bytes and a live `written`.
        Self::read_log(|capacity, written, buffer| unsafe {
            gl::GetProgramInfoLog(program.raw(), capacity, written, buffer);
        })
    }

    fn delete_program(&self, program: Program) {
        // SAFETY: loaded entry point, value arguments only.
        unsafe { gl::DeleteProgram(program.raw()) };
    }

    fn use_program(&self, program: Option<Program>) {
        // SAFETY: loaded entry point, value arguments only.
        unsafe { gl::UseProgram(program.map_or(0, Program::raw)) };
    }

    fn clear_color(&self, [r, g, b, a]: [f32; 4]) {
        // SAFETY: loaded entry point, value arguments only.
        unsafe { gl::ClearColor(r, g, b, a) };
    }

    fn clear_color_buffer(&self) {
        // SAFETY: loaded entry point, value arguments only.
        unsafe { gl::Clear(gl::COLOR_BUFFER_BIT) };
    }

    fn draw_triangles(&self, first: i32, count: i32) {
        // SAFETY: loaded entry point, value arguments only.
        unsafe { gl::DrawArrays(gl::TRIANGLES, first, count) };
    }

    fn get_error(&self) -> Option<u32> {
        // SAFETY: loaded entry point, value arguments only.
        let error = unsafe { gl::GetError() };
        (error != gl::NO_ERROR).then_some(error)
    }
}
