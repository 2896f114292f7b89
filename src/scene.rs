//! Scene state: the fixed camera and the ordered list of renderable objects.

use glam::{Mat4, Vec3};
use image::DynamicImage;

use crate::{
    asset::{self, MeshData},
    config::{CameraConfig, ViewerConfig},
    error::Result,
    render::RenderBackend,
};

/// Fixed camera: a look-at view and a perspective projection that follows the aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// OpenGL-style perspective projection (clip depth in `[-1, 1]`).
    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_degrees.to_radians(), aspect, self.near, self.far)
    }
}

impl From<&CameraConfig> for Camera {
    fn from(config: &CameraConfig) -> Self {
        Self {
            eye: Vec3::from(config.eye),
            target: Vec3::from(config.target),
            up: Vec3::from(config.up),
            fov_degrees: config.fov_degrees,
            near: config.near,
            far: config.far,
        }
    }
}

/// Shared rotation about the Y axis at time `time` (seconds).
pub fn rotation_at(speed: f32, time: f32) -> Mat4 {
    Mat4::from_rotation_y(speed * time)
}

/// Spins the object about its own origin, then moves it to its placement.
///
/// In column-vector form this is `placement * rotation`, so the object's origin always lands
/// on the placement translation.
pub fn model_matrix(rotation: Mat4, placement: Mat4) -> Mat4 {
    placement * rotation
}

/// CPU-side assets for one object, loaded before any GPU work happens.
pub struct ObjectAssets {
    pub name: String,
    pub mesh: MeshData,
    pub image: DynamicImage,
    pub placement: Mat4,
}

impl ObjectAssets {
    /// Loads the mesh and texture of every configured object, in order.
    pub fn load_all(config: &ViewerConfig) -> Result<Vec<Self>> {
        config
            .objects
            .iter()
            .map(|object| {
                let mesh = asset::load_mesh(&config.mesh_path(object))?;
                let image = asset::load_image(&config.texture_path(object))?;
                log::info!(
                    "Loaded {}: {} vertices, {}x{} texture",
                    object.name,
                    mesh.vertex_count(),
                    image.width(),
                    image.height()
                );
                Ok(Self {
                    name: object.name.clone(),
                    mesh,
                    image,
                    placement: object.placement(),
                })
            })
            .collect()
    }
}

/// A mesh, the texture drawn on it and its static placement, kept together so they cannot
/// drift out of step.
pub struct RenderableObject<M, T> {
    pub name: String,
    pub mesh: M,
    pub texture: T,
    pub placement: Mat4,
}

/// Ordered collection of GPU-resident objects. Draw order is insertion order.
pub struct Scene<M, T> {
    objects: Vec<RenderableObject<M, T>>,
}

impl<M, T> Scene<M, T> {
    pub fn objects(&self) -> &[RenderableObject<M, T>] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Uploads every object's mesh and texture through `backend`.
    pub fn upload<B>(backend: &mut B, assets: &[ObjectAssets]) -> Result<Self>
    where
        B: RenderBackend<Mesh = M, Texture = T>,
    {
        let objects = assets
            .iter()
            .map(|asset| {
                Ok(RenderableObject {
                    name: asset.name.clone(),
                    mesh: backend.upload_mesh(&asset.mesh)?,
                    texture: backend.upload_texture(&asset.image)?,
                    placement: asset.placement,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { objects })
    }
}
