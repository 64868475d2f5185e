use thiserror::Error;

/// Errors that can occur while turning raw bytes into an editable image
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    #[error("Failed to read image file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image decode was abandoned before it finished")]
    Cancelled,
}

/// Errors that can occur while serializing the canvas
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No image loaded")]
    NoImageLoaded,

    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Failed to write exported image: {0}")]
    Io(#[from] std::io::Error),
}

/// Reasons a drag gesture cannot start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GestureError {
    #[error("A gesture is already in progress")]
    AlreadyInFlight,

    #[error("Not in selection mode")]
    NotSelecting,

    #[error("Gesture input is disabled while an image is decoding")]
    DecodePending,
}

/// Errors that can occur while loading editor configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
}
