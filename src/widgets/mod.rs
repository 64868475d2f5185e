pub mod resize_handle;
pub mod selection_overlay;

pub use resize_handle::ResizeHandle;
pub use selection_overlay::SelectionOverlay;
