//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Separates load and save failures of a volume from resampling failures
//! (unsupported shapes or orders, singular affines) and argument validation.
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to load volume {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: BoxedSource,
    },

    #[error("Failed to save volume {}: {source}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: BoxedSource,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported volume shape {shape:?}: expected a 2D or 3D volume")]
    UnsupportedShape { shape: Vec<usize> },

    #[error("Unsupported interpolation order {order}: expected 0 (nearest) or 1 (linear)")]
    UnsupportedOrder { order: u8 },

    #[error("Input affine is singular and cannot be inverted")]
    SingularAffine,

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub fn load<E>(path: impl Into<PathBuf>, e: E) -> Self
    where
        E: Into<BoxedSource>,
    {
        Error::Load {
            path: path.into(),
            source: e.into(),
        }
    }

    pub fn save<E>(path: impl Into<PathBuf>, e: E) -> Self
    where
        E: Into<BoxedSource>,
    {
        Error::Save {
            path: path.into(),
            source: e.into(),
        }
    }
}
