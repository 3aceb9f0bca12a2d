//! Recording [`GlApi`] used by the unit tests
//!
//! Tracks just enough GL object state to answer the queries the engine makes:
//! bindings, buffer contents, per-vertex-array attribute layout, shader and
//! program status. A stage "compiles" when its braces balance and it has no
//! `#error` directive; a program links when it has one compiled stage of
//! each kind attached.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

use super::api::{Buffer, GlApi, Program, Shader, VertexArray};
use super::shader::ShaderStage;

const GL_INVALID_OPERATION: u32 = 0x0502;

/// One recorded call, in issue order
#[derive(Debug, Clone, PartialEq)]
pub enum GlCall {
    Viewport(i32, i32, i32, i32),
    BindVertexArray(Option<VertexArray>),
    BindArrayBuffer(Option<Buffer>),
    BufferData(usize),
    CreateShader(ShaderStage),
    CompileShader(Shader),
    AttachShader(Program, Shader),
    CreateProgram,
    LinkProgram(Program),
    ValidateProgram(Program),
    UseProgram(Option<Program>),
    ClearColor([f32; 4]),
    Clear,
    DrawTriangles(i32, i32),
}

/// Attribute pointer captured into a vertex array
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttribPointer {
    pub buffer: Buffer,
    pub components: i32,
    pub stride: i32,
    pub offset: usize,
}

/// State captured when a draw call is issued
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawRecord {
    pub program: Option<Program>,
    pub vertex_array: Option<VertexArray>,
    pub first: i32,
    pub count: i32,
}

#[derive(Debug, Default)]
struct FakeShader {
    stage: Option<ShaderStage>,
    source: String,
    compiled: bool,
    deleted: bool,
}

#[derive(Debug, Default)]
struct FakeProgram {
    attached: BTreeSet<u32>,
    linked: bool,
    validated: bool,
    deleted: bool,
}

#[derive(Debug, Default)]
struct FakeVertexArray {
    attribs: BTreeMap<u32, AttribPointer>,
    enabled: BTreeSet<u32>,
}

#[derive(Debug, Default)]
struct State {
    next_name: u32,
    calls: Vec<GlCall>,
    bound_vertex_array: Option<VertexArray>,
    bound_array_buffer: Option<Buffer>,
    current_program: Option<Program>,
    vertex_arrays: BTreeMap<u32, FakeVertexArray>,
    buffers: BTreeMap<u32, Vec<u8>>,
    shaders: BTreeMap<u32, FakeShader>,
    programs: BTreeMap<u32, FakeProgram>,
    draws: Vec<DrawRecord>,
    pending_errors: Vec<u32>,
    fail_program_creation: bool,
    fail_shader_creation: bool,
    link_failure: Option<String>,
    validate_failure: Option<String>,
}

impl State {
    fn allocate(&mut self) -> u32 {
        self.next_name += 1;
        self.next_name
    }
}

/// Recording fake OpenGL
#[derive(Debug, Default)]
pub struct RecordingGl {
    state: RefCell<State>,
}

fn compiles(source: &str) -> bool {
    let opened = source.matches('{').count();
    let closed = source.matches('}').count();
    source.trim_start().starts_with("#version") && opened == closed && !source.contains("#error")
}

impl RecordingGl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_program_creation(&self) {
        self.state.borrow_mut().fail_program_creation = true;
    }

    pub fn fail_shader_creation(&self) {
        self.state.borrow_mut().fail_shader_creation = true;
    }

    pub fn fail_link(&self, log: &str) {
        self.state.borrow_mut().link_failure = Some(log.to_string());
    }

    pub fn fail_validation(&self, log: &str) {
        self.state.borrow_mut().validate_failure = Some(log.to_string());
    }

    /// Queue an error for `get_error` to report
    pub fn raise_error(&self, code: u32) {
        self.state.borrow_mut().pending_errors.push(code);
    }

    pub fn calls(&self) -> Vec<GlCall> {
        self.state.borrow().calls.clone()
    }

    pub fn draws(&self) -> Vec<DrawRecord> {
        self.state.borrow().draws.clone()
    }

    pub fn current_program(&self) -> Option<Program> {
        self.state.borrow().current_program
    }

    pub fn live_shaders(&self) -> Vec<Shader> {
        let state = self.state.borrow();
        state
            .shaders
            .iter()
            .filter(|(_, s)| !s.deleted)
            .map(|(name, _)| Shader(*name))
            .collect()
    }

    pub fn live_programs(&self) -> Vec<Program> {
        let state = self.state.borrow();
        state
            .programs
            .iter()
            .filter(|(_, p)| !p.deleted)
            .map(|(name, _)| Program(*name))
            .collect()
    }

    pub fn any_program_linked(&self) -> bool {
        self.state.borrow().programs.values().any(|p| p.linked)
    }

    pub fn attached_stages(&self, program: Program) -> Vec<ShaderStage> {
        let state = self.state.borrow();
        state.programs[&program.raw()]
            .attached
            .iter()
            .filter_map(|name| state.shaders[name].stage)
            .collect()
    }

    pub fn buffer_contents(&self, buffer: Buffer) -> Vec<u8> {
        self.state.borrow().buffers.get(&buffer.raw()).cloned().unwrap_or_default()
    }

    pub fn attrib_pointer(&self, vertex_array: VertexArray, index: u32) -> Option<AttribPointer> {
        let state = self.state.borrow();
        state.vertex_arrays.get(&vertex_array.raw())?.attribs.get(&index).copied()
    }

    pub fn attrib_enabled(&self, vertex_array: VertexArray, index: u32) -> bool {
        self.state
            .borrow()
            .vertex_arrays
            .get(&vertex_array.raw())
            .is_some_and(|vao| vao.enabled.contains(&index))
    }

    /// Positions attribute 0 feeds to the vertex stage for a recorded draw
    pub fn submitted_positions(&self, draw: &DrawRecord) -> Vec<[f32; 3]> {
        let vertex_array = draw.vertex_array.expect("draw without a vertex array");
        assert!(self.attrib_enabled(vertex_array, 0), "attribute 0 disabled");
        let pointer = self.attrib_pointer(vertex_array, 0).expect("attribute 0 unset");
        assert_eq!(pointer.components, 3);

        let floats: Vec<f32> = self
            .buffer_contents(pointer.buffer)
            .chunks_exact(4)
            .map(|bytes| f32::from_ne_bytes(bytes.try_into().unwrap()))
            .collect();
        let stride = if pointer.stride == 0 { 3 } else { pointer.stride as usize / 4 };
        let start = pointer.offset / 4;

        (draw.first..draw.first + draw.count)
            .map(|vertex| {
                let base = start + vertex as usize * stride;
                [floats[base], floats[base + 1], floats[base + 2]]
            })
            .collect()
    }

    fn record(&self, call: GlCall) {
        self.state.borrow_mut().calls.push(call);
    }
}

impl GlApi for RecordingGl {
    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.record(GlCall::Viewport(x, y, width, height));
    }

    fn create_vertex_array(&self) -> VertexArray {
        let mut state = self.state.borrow_mut();
        let name = state.allocate();
        state.vertex_arrays.insert(name, FakeVertexArray::default());
        VertexArray(name)
    }

    fn bind_vertex_array(&self, vertex_array: Option<VertexArray>) {
        self.record(GlCall::BindVertexArray(vertex_array));
        self.state.borrow_mut().bound_vertex_array = vertex_array;
    }

    fn bound_vertex_array(&self) -> Option<VertexArray> {
        self.state.borrow().bound_vertex_array
    }

    fn create_buffer(&self) -> Buffer {
        let mut state = self.state.borrow_mut();
        let name = state.allocate();
        state.buffers.insert(name, Vec::new());
        Buffer(name)
    }

    fn bind_array_buffer(&self, buffer: Option<Buffer>) {
        self.record(GlCall::BindArrayBuffer(buffer));
        self.state.borrow_mut().bound_array_buffer = buffer;
    }

    fn bound_array_buffer(&self) -> Option<Buffer> {
        self.state.borrow().bound_array_buffer
    }

    fn array_buffer_static_data(&self, data: &[u8]) {
        self.record(GlCall::BufferData(data.len()));
        let mut state = self.state.borrow_mut();
        let bound = state.bound_array_buffer;
        match bound {
            Some(buffer) => {
                state.buffers.insert(buffer.raw(), data.to_vec());
            }
            None => state.pending_errors.push(GL_INVALID_OPERATION),
        }
    }

    fn vertex_attrib_pointer_f32(&self, index: u32, components: i32, stride: i32, offset: usize) {
        let mut state = self.state.borrow_mut();
        match (state.bound_vertex_array, state.bound_array_buffer) {
            (Some(vao), Some(buffer)) => {
                let pointer = AttribPointer { buffer, components, stride, offset };
                state
                    .vertex_arrays
                    .entry(vao.raw())
                    .or_default()
                    .attribs
                    .insert(index, pointer);
            }
            _ => state.pending_errors.push(GL_INVALID_OPERATION),
        }
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        let mut state = self.state.borrow_mut();
        let bound = state.bound_vertex_array;
        match bound {
            Some(vao) => {
                state.vertex_arrays.entry(vao.raw()).or_default().enabled.insert(index);
            }
            None => state.pending_errors.push(GL_INVALID_OPERATION),
        }
    }

    fn create_shader(&self, stage: ShaderStage) -> Option<Shader> {
        self.record(GlCall::CreateShader(stage));
        let mut state = self.state.borrow_mut();
        if state.fail_shader_creation {
            return None;
        }
        let name = state.allocate();
        state.shaders.insert(name, FakeShader { stage: Some(stage), ..FakeShader::default() });
        Some(Shader(name))
    }

    fn shader_source(&self, shader: Shader, source: &str) {
        if let Some(s) = self.state.borrow_mut().shaders.get_mut(&shader.raw()) {
            s.source = source.to_string();
        }
    }

    fn compile_shader(&self, shader: Shader) {
        self.record(GlCall::CompileShader(shader));
        if let Some(s) = self.state.borrow_mut().shaders.get_mut(&shader.raw()) {
            s.compiled = compiles(&s.source);
        }
    }

    fn shader_compile_status(&self, shader: Shader) -> bool {
        self.state.borrow().shaders.get(&shader.raw()).is_some_and(|s| s.compiled)
    }

    fn shader_info_log(&self, shader: Shader) -> String {
        match self.state.borrow().shaders.get(&shader.raw()) {
            Some(s) if !s.compiled => {
                "0:1(1): error: syntax error, unexpected end of file\n".to_string()
            }
            _ => String::new(),
        }
    }

    fn delete_shader(&self, shader: Shader) {
        if let Some(s) = self.state.borrow_mut().shaders.get_mut(&shader.raw()) {
            s.deleted = true;
        }
    }

    fn create_program(&self) -> Option<Program> {
        self.record(GlCall::CreateProgram);
        let mut state = self.state.borrow_mut();
        if state.fail_program_creation {
            return None;
        }
        let name = state.allocate();
        state.programs.insert(name, FakeProgram::default());
        Some(Program(name))
    }

    fn attach_shader(&self, program: Program, shader: Shader) {
        self.record(GlCall::AttachShader(program, shader));
        if let Some(p) = self.state.borrow_mut().programs.get_mut(&program.raw()) {
            p.attached.insert(shader.raw());
        }
    }

    fn detach_shader(&self, program: Program, shader: Shader) {
        if let Some(p) = self.state.borrow_mut().programs.get_mut(&program.raw()) {
            p.attached.remove(&shader.raw());
        }
    }

    fn link_program(&self, program: Program) {
        self.record(GlCall::LinkProgram(program));
        let mut state = self.state.borrow_mut();
        let stages: Vec<ShaderStage> = state.programs[&program.raw()]
            .attached
            .iter()
            .filter_map(|name| state.shaders.get(name))
            .filter(|s| s.compiled)
            .filter_map(|s| s.stage)
            .collect();
        let linked = state.link_failure.is_none()
            && stages.contains(&ShaderStage::Vertex)
            && stages.contains(&ShaderStage::Fragment);
        if let Some(p) = state.programs.get_mut(&program.raw()) {
            p.linked = linked;
            p.validated = false;
        }
    }

    fn program_link_status(&self, program: Program) -> bool {
        self.state.borrow().programs.get(&program.raw()).is_some_and(|p| p.linked)
    }

    fn validate_program(&self, program: Program) {
        self.record(GlCall::ValidateProgram(program));
        let mut state = self.state.borrow_mut();
        let forced_failure = state.validate_failure.is_some();
        if let Some(p) = state.programs.get_mut(&program.raw()) {
            p.validated = p.linked && !forced_failure;
        }
    }

    fn program_validate_status(&self, program: Program) -> bool {
        self.state.borrow().programs.get(&program.raw()).is_some_and(|p| p.validated)
    }

    fn program_info_log(&self, program: Program) -> String {
        let state = self.state.borrow();
        match state.programs.get(&program.raw()) {
            Some(p) if !p.linked => state.link_failure.clone().unwrap_or_default(),
            Some(p) if !p.validated => state.validate_failure.clone().unwrap_or_default(),
            _ => String::new(),
        }
    }

    fn delete_program(&self, program: Program) {
        if let Some(p) = self.state.borrow_mut().programs.get_mut(&program.raw()) {
            p.deleted = true;
        }
    }

    fn use_program(&self, program: Option<Program>) {
        self.record(GlCall::UseProgram(program));
        self.state.borrow_mut().current_program = program;
    }

    fn clear_color(&self, rgba: [f32; 4]) {
        self.record(GlCall::ClearColor(rgba));
    }

    fn clear_color_buffer(&self) {
        self.record(GlCall::Clear);
    }

    fn draw_triangles(&self, first: i32, count: i32) {
        self.record(GlCall::DrawTriangles(first, count));
        let mut state = self.state.borrow_mut();
        let record = DrawRecord {
            program: state.current_program,
            vertex_array: state.bound_vertex_array,
            first,
            count,
        };
        state.draws.push(record);
    }

    fn get_error(&self) -> Option<u32> {
        let mut state = self.state.borrow_mut();
        if state.pending_errors.is_empty() {
            None
        } else {
            Some(state.pending_errors.remove(0))
        }
    }
}
