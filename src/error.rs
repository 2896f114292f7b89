//! Error type shared by every fallible step of the viewer.

use std::path::PathBuf;

/// Everything that can abort startup.
#[derive(thiserror::Error, Debug)]
pub enum ViewerError {
    #[error("SDL could not be initialized: {0}")]
    Platform(String),
    #[error("window could not be created: {0}")]
    Window(String),
    #[error("OpenGL context could not be created: {0}")]
    Context(String),
    #[error("GPU object allocation failed: {0}")]
    Allocation(String),
    #[error("shader compilation failed: {0}")]
    ShaderCompile(String),
    #[error("shader program link failed: {0}")]
    ShaderLink(String),
    #[error("failed to load mesh {path:?}: {source}")]
    Mesh {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },
    #[error("failed to load texture {path:?}: {source}")]
    Texture {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to read scene config {path:?}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid scene config: {0}")]
    ConfigParse(#[from] serde_json::Error),
    #[error("invalid scene config: {0}")]
    InvalidConfig(String),
    #[error("unknown scene revision {name:?} (known: {})", .known.join(", "))]
    UnknownScene { name: String, known: Vec<String> },
    #[error("logger setup failed: {0}")]
    Logging(#[from] log::SetLoggerError),
}

pub type Result<T, E = ViewerError> = std::result::Result<T, E>;
