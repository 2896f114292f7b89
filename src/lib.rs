//! A viewer for a static textured stadium model.
//!
//! OBJ meshes and their textures are uploaded once, then drawn every frame with a shared
//! rotation about the Y axis and a fixed camera.

pub mod abs;
pub mod asset;
pub mod config;
pub mod error;
pub mod logging;
pub mod render;
pub mod scene;
pub mod viewer;

pub use error::{Result, ViewerError};
