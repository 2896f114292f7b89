//! Rendering.
//!
//! [`RenderBackend`] is the narrow set of GPU operations the viewer needs. [`GlBackend`]
//! implements it on top of `glow`; tests use a recording implementation instead.

use glam::Mat4;
use image::DynamicImage;

use crate::{asset::MeshData, error::Result};

pub mod gl;
#[cfg(test)]
pub(crate) mod recording;

pub use gl::GlBackend;

/// The matrix uniforms of the scene shader.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MatrixUniform {
    Model,
    View,
    Projection,
}

impl MatrixUniform {
    /// Uniform name in the GLSL source.
    pub fn name(self) -> &'static str {
        match self {
            MatrixUniform::Model => "u_model",
            MatrixUniform::View => "u_view",
            MatrixUniform::Projection => "u_projection",
        }
    }
}

/// GPU operations used by the viewer.
pub trait RenderBackend {
    /// GPU-resident vertex stream.
    type Mesh;
    /// GPU-resident 2D texture.
    type Texture;

    /// Uploads a vertex stream once; it is never modified afterwards.
    fn upload_mesh(&mut self, mesh: &MeshData) -> Result<Self::Mesh>;

    /// Uploads a decoded image as a 2D texture.
    fn upload_texture(&mut self, image: &DynamicImage) -> Result<Self::Texture>;

    fn set_viewport(&mut self, width: i32, height: i32);

    /// Clears colour and depth.
    fn clear(&mut self);

    fn set_matrix(&mut self, uniform: MatrixUniform, matrix: &Mat4);

    /// Binds `mesh` and `texture` (unit 0) and draws every vertex of `mesh` as triangles.
    fn draw(&mut self, mesh: &Self::Mesh, texture: &Self::Texture);
}
