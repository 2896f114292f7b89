//! Mesh management module.
//!
//! This module defines the [`Mesh`] struct for managing mesh data on the GPU side.
//! Vertices should implement the [`Vertex`] trait.

use std::sync::Arc;

use glow::HasContext;

use crate::error::{Result, ViewerError};

/// One float vertex attribute inside an interleaved vertex.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Shader `layout(location = ...)`.
    pub location: u32,
    /// Number of `f32` components.
    pub components: i32,
    /// Byte offset from the start of the vertex.
    pub offset: usize,
}

/// Trait that defines the attribute layout of a vertex.
pub trait Vertex: Sized {
    /// Float attributes of the vertex, in location order.
    const ATTRIBUTES: &'static [VertexAttribute];

    /// Distance in bytes between two consecutive vertices.
    fn stride() -> i32 {
        size_of::<Self>() as i32
    }

    /// Sets up the vertex attribute pointers for the vertex.
    fn vertex_attribs(gl: &glow::Context) {
        let stride = Self::stride();
        for attribute in Self::ATTRIBUTES {
            unsafe {
                gl.enable_vertex_attrib_array(attribute.location);
                gl.vertex_attrib_pointer_f32(
                    attribute.location,
                    attribute.components,
                    glow::FLOAT,
                    false,
                    stride,
                    attribute.offset as i32,
                );
            }
        }
    }
}

/// Represents a non-indexed mesh stored on the GPU side.
///
/// The vertex data is uploaded once with `STATIC_DRAW` and never changes afterwards.
pub struct Mesh {
    gl: Arc<glow::Context>,
    draw_mode: u32,
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    vertex_count: usize,
}

impl Mesh {
    /// Creates a new mesh from the given vertex data.
    pub fn new<V: Vertex>(gl: &Arc<glow::Context>, vertices: &[V], draw_mode: u32) -> Result<Self> {
        unsafe {
            let vao = gl.create_vertex_array().map_err(ViewerError::Allocation)?;
            let vbo = gl.create_buffer().map_err(ViewerError::Allocation)?;

            gl.bind_vertex_array(Some(vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                std::slice::from_raw_parts(
                    vertices.as_ptr() as *const u8,
                    std::mem::size_of_val(vertices),
                ),
                glow::STATIC_DRAW,
            );

            V::vertex_attribs(gl);

            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);

            Ok(Self {
                gl: Arc::clone(gl),
                draw_mode,
                vao,
                vbo,
                vertex_count: vertices.len(),
            })
        }
    }

    /// Binds the vertex array and draws every vertex.
    pub fn draw(&self) {
        unsafe {
            self.gl.bind_vertex_array(Some(self.vao));
            self.gl
                .draw_arrays(self.draw_mode, 0, self.vertex_count as i32);
        }
    }

    /// Returns the amount of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }
}

impl Drop for Mesh {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_buffer(self.vbo);
            self.gl.delete_vertex_array(self.vao);
        }
    }
}
