//! A [`RenderBackend`] that records calls instead of touching a GPU.

use glam::Mat4;
use image::DynamicImage;

use crate::{
    asset::MeshData,
    error::Result,
    render::{MatrixUniform, RenderBackend},
};

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Viewport(i32, i32),
    Clear,
    Matrix(MatrixUniform, Mat4),
    Draw {
        mesh: usize,
        texture: usize,
        vertex_count: usize,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecordedMesh {
    pub id: usize,
    pub vertex_count: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecordedTexture {
    pub id: usize,
}

#[derive(Default)]
pub struct RecordingBackend {
    pub calls: Vec<Call>,
    meshes: usize,
    textures: usize,
}

impl RecordingBackend {
    pub fn draws(&self) -> Vec<(usize, usize, usize)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Draw {
                    mesh,
                    texture,
                    vertex_count,
                } => Some((*mesh, *texture, *vertex_count)),
                _ => None,
            })
            .collect()
    }

    pub fn matrices(&self, uniform: MatrixUniform) -> Vec<Mat4> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Matrix(u, m) if *u == uniform => Some(*m),
                _ => None,
            })
            .collect()
    }
}

impl RenderBackend for RecordingBackend {
    type Mesh = RecordedMesh;
    type Texture = RecordedTexture;

    fn upload_mesh(&mut self, mesh: &MeshData) -> Result<RecordedMesh> {
        self.meshes += 1;
        Ok(RecordedMesh {
            id: self.meshes - 1,
            vertex_count: mesh.vertex_count(),
        })
    }

    fn upload_texture(&mut self, _image: &DynamicImage) -> Result<RecordedTexture> {
        self.textures += 1;
        Ok(RecordedTexture {
            id: self.textures - 1,
        })
    }

    fn set_viewport(&mut self, width: i32, height: i32) {
        self.calls.push(Call::Viewport(width, height));
    }

    fn clear(&mut self) {
        self.calls.push(Call::Clear);
    }

    fn set_matrix(&mut self, uniform: MatrixUniform, matrix: &Mat4) {
        self.calls.push(Call::Matrix(uniform, *matrix));
    }

    fn draw(&mut self, mesh: &RecordedMesh, texture: &RecordedTexture) {
        self.calls.push(Call::Draw {
            mesh: mesh.id,
            texture: texture.id,
            vertex_count: mesh.vertex_count,
        });
    }
}
