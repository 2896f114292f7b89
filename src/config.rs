//! Scene configuration.
//!
//! A scene revision is a JSON document listing window parameters, the fixed camera and the
//! ordered objects to draw. Two revisions ship inside the binary; the `STADIUM_SCENE`
//! environment variable picks one of them by name or points at a JSON file on disk.

use std::path::{Path, PathBuf};

use glam::{Mat4, Vec3, Vec4};
use serde::Deserialize;

use crate::error::{Result, ViewerError};

/// Environment variable selecting the scene revision.
pub const SCENE_ENV: &str = "STADIUM_SCENE";

/// Revision used when nothing is selected.
pub const DEFAULT_REVISION: &str = "stadium-v2";

const EMBEDDED: &[(&str, &str)] = &[
    ("stadium-v1", include_str!("scenes/stadium-v1.json")),
    ("stadium-v2", include_str!("scenes/stadium-v2.json")),
];

fn unknown_scene(name: &str) -> ViewerError {
    ViewerError::UnknownScene {
        name: name.to_string(),
        known: ViewerConfig::embedded_revisions().map(str::to_string).collect(),
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CameraConfig {
    pub eye: [f32; 3],
    pub target: [f32; 3],
    pub up: [f32; 3],
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

/// One drawable object: a mesh, its texture and a static placement.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ObjectConfig {
    pub name: String,
    pub mesh: PathBuf,
    pub texture: PathBuf,
    pub translation: [f32; 3],
}

impl ObjectConfig {
    /// Static placement matrix (translation only).
    pub fn placement(&self) -> Mat4 {
        Mat4::from_translation(Vec3::from(self.translation))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ViewerConfig {
    pub revision: String,
    pub window: WindowConfig,
    pub camera: CameraConfig,
    /// Radians per second around the Y axis.
    pub rotation_speed: f32,
    pub clear_color: [f32; 4],
    pub asset_dir: PathBuf,
    pub objects: Vec<ObjectConfig>,
}

impl ViewerConfig {
    /// Parses and validates a JSON scene description.
    pub fn from_json(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Returns one of the revisions compiled into the binary.
    pub fn embedded(revision: &str) -> Result<Self> {
        let (_, json) = EMBEDDED
            .iter()
            .find(|(name, _)| *name == revision)
            .ok_or_else(|| unknown_scene(revision))?;
        Self::from_json(json)
    }

    /// Reads a scene description from disk.
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| ViewerError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Resolves a selector: an embedded revision name, or a path to a JSON file.
    pub fn select(selector: Option<&str>) -> Result<Self> {
        let Some(selector) = selector else {
            return Self::embedded(DEFAULT_REVISION);
        };
        if EMBEDDED.iter().any(|(name, _)| *name == selector) {
            return Self::embedded(selector);
        }
        let path = Path::new(selector);
        if path.extension().is_some_and(|ext| ext == "json") || path.exists() {
            return Self::from_file(path);
        }
        Err(unknown_scene(selector))
    }

    /// Loads the scene chosen through [`SCENE_ENV`].
    pub fn from_env() -> Result<Self> {
        Self::select(std::env::var(SCENE_ENV).ok().as_deref())
    }

    /// Names of the revisions compiled into the binary.
    pub fn embedded_revisions() -> impl Iterator<Item = &'static str> {
        EMBEDDED.iter().map(|(name, _)| *name)
    }

    pub fn clear_color(&self) -> Vec4 {
        Vec4::from(self.clear_color)
    }

    pub fn mesh_path(&self, object: &ObjectConfig) -> PathBuf {
        self.asset_dir.join(&object.mesh)
    }

    pub fn texture_path(&self, object: &ObjectConfig) -> PathBuf {
        self.asset_dir.join(&object.texture)
    }

    fn validate(&self) -> Result<()> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ViewerError::InvalidConfig(format!(
                "window size {}x{} must be non-zero",
                self.window.width, self.window.height
            )));
        }
        let camera = &self.camera;
        if !(camera.near > 0.0 && camera.far > camera.near) {
            return Err(ViewerError::InvalidConfig(format!(
                "clip planes near={} far={} must satisfy 0 < near < far",
                camera.near, camera.far
            )));
        }
        if !(camera.fov_degrees > 0.0 && camera.fov_degrees < 180.0) {
            return Err(ViewerError::InvalidConfig(format!(
                "field of view {} must be within (0, 180) degrees",
                camera.fov_degrees
            )));
        }
        if self.objects.is_empty() {
            return Err(ViewerError::InvalidConfig("scene has no objects".to_string()));
        }
        Ok(())
    }
}
