//! Error types for camera configuration and rendering.

use thiserror::Error;

/// Errors caught while validating render configuration.
///
/// All of these are reported before any pixel is traced.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("image width must be at least 1 pixel")]
    ZeroImageWidth,

    #[error("samples per pixel must be at least 1")]
    ZeroSamplesPerPixel,

    #[error("aspect ratio must be positive and finite, got {0}")]
    InvalidAspectRatio(f32),

    #[error("vertical field of view must be in (0, 180) degrees, got {0}")]
    InvalidFieldOfView(f32),

    #[error("focus distance must be positive and finite, got {0}")]
    InvalidFocusDistance(f32),

    #[error("defocus angle must be non-negative and finite, got {0}")]
    InvalidDefocusAngle(f32),

    #[error("look_from and look_at must be distinct points")]
    DegenerateView,

    #[error("up vector must not be parallel to the view direction")]
    DegenerateUpVector,

    #[error("tile size must be at least 1 pixel")]
    ZeroTileSize,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that abort a render. No partial image is returned.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("worker rendering tile {tile} panicked: {message}")]
    WorkerPanicked { tile: usize, message: String },

    #[error("tile {tile} produced {actual} pixels, expected {expected}")]
    TileSizeMismatch {
        tile: usize,
        expected: usize,
        actual: usize,
    },

    #[error("render was cancelled")]
    Cancelled,

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type RenderResult<T> = Result<T, RenderError>;
