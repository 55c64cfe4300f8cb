use thiserror::Error;

/// Errors raised while setting up a canvas.
///
/// Per-tick painting never fails; these only surface from construction and
/// asset/config loading.
#[derive(Error, Debug)]
pub enum CanvasError {
    #[error("No splash template configured; the Ball tool cannot paint without one")]
    MissingSplashTemplate,

    #[error("Splash template must be a non-empty square, got {width}x{height}")]
    InvalidSplashTemplate { width: u32, height: u32 },

    #[error("Invalid canvas dimensions {width}x{height}")]
    InvalidCanvasSize { width: u32, height: u32 },

    #[error("Surface extent must be finite with min < max, got [{min}, {max}]")]
    InvalidSurfaceExtent { min: f32, max: f32 },

    #[error("Failed to decode splash template: {0}")]
    TemplateDecode(#[from] image::ImageError),

    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for canvas setup operations
pub type CanvasResult<T> = Result<T, CanvasError>;
