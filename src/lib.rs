#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod config;
pub mod editor;
pub mod error;
pub mod file_handler;
pub mod geometry;
pub mod loader;
pub mod mask;
pub mod panels;
pub mod registry;
pub mod selection;
pub mod surface;
pub mod texture_manager;
pub mod widgets;

pub use app::RedactApp;
pub use config::{EditorConfig, ExportFormat};
pub use editor::Editor;
pub use error::{ConfigError, ExportError, GestureError, LoadError};
pub use geometry::{DragMode, Rectangle, clamp_rect};
pub use loader::OriginalImage;
pub use mask::MaskEngine;
pub use registry::{MaskedRegion, ShapeId, ShapeRegistry};
pub use selection::{DragTarget, InteractionMode, SelectionController};
pub use surface::{PixelSurface, RasterSurface};
