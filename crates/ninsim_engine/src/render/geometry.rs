//! Vertex geometry upload
//!
//! Copies a list of XYZ positions into a static GPU buffer and records the
//! attribute layout in a vertex array object.

use super::opengl::api::{Buffer, GlApi, VertexArray};

/// The triangle drawn every frame
pub const TRIANGLE_VERTICES: [[f32; 3]; 3] = [
    [-1.0, -1.0, 0.0],
    [1.0, -1.0, 0.0],
    [0.0, 1.0, 0.0],
];

/// Attribute location the vertex stage reads positions from
pub const POSITION_ATTRIBUTE: u32 = 0;

/// Components per position
const POSITION_COMPONENTS: i32 = 3;

/// A vertex array and the buffer it reads from
///
/// Both objects live until the GL context is destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeometryBuffer {
    vertex_array: VertexArray,
    vertex_buffer: Buffer,
    vertex_count: i32,
}

impl GeometryBuffer {
    /// Upload `vertices` and describe them as attribute 0, three tightly
    /// packed floats per vertex
    ///
    /// Array buffer and vertex array bindings are cleared before returning.
    pub fn upload(gl: &impl GlApi, vertices: &[[f32; 3]]) -> Self {
        let vertex_array = gl.create_vertex_array();
        gl.bind_vertex_array(Some(vertex_array));

        let vertex_buffer = gl.create_buffer();
        gl.bind_array_buffer(Some(vertex_buffer));

        gl.array_buffer_static_data(bytemuck::cast_slice(vertices));
        gl.vertex_attrib_pointer_f32(POSITION_ATTRIBUTE, POSITION_COMPONENTS, 0, 0);
        gl.enable_vertex_attrib_array(POSITION_ATTRIBUTE);

        gl.bind_array_buffer(None);
        gl.bind_vertex_array(None);

        let vertex_count = i32::try_from(vertices.len()).unwrap_or(i32::MAX);
        log::debug!(
            "Uploaded {vertex_count} vertices to buffer {} (vertex array {})",
            vertex_buffer.raw(),
            vertex_array.raw()
        );

        Self {
            vertex_array,
            vertex_buffer,
            vertex_count,
        }
    }

    /// Upload [`TRIANGLE_VERTICES`]
    pub fn triangle(gl: &impl GlApi) -> Self {
        Self::upload(gl, &TRIANGLE_VERTICES)
    }

    /// Vertex array describing the layout
    pub const fn vertex_array(&self) -> VertexArray {
        self.vertex_array
    }

    /// Buffer holding the positions
    pub const fn vertex_buffer(&self) -> Buffer {
        self.vertex_buffer
    }

    /// Number of vertices uploaded
    pub const fn vertex_count(&self) -> i32 {
        self.vertex_count
    }
}
