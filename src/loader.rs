use futures::channel::oneshot;
use image::RgbaImage;

use crate::error::LoadError;

/// A decoded source bitmap at its intrinsic pixel size.
#[derive(Clone)]
pub struct OriginalImage {
    pixels: RgbaImage,
}

impl std::fmt::Debug for OriginalImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OriginalImage")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish_non_exhaustive()
    }
}

impl OriginalImage {
    pub fn new(pixels: RgbaImage) -> Result<Self, LoadError> {
        let (width, height) = pixels.dimensions();
        if width == 0 || height == 0 {
            return Err(LoadError::EmptyImage { width, height });
        }
        Ok(Self { pixels })
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }
}

/// Decodes any format the `image` crate understands into RGBA8.
pub fn decode(bytes: &[u8]) -> Result<OriginalImage, LoadError> {
    let decoded = image::load_from_memory(bytes)?;
    log::debug!("Decoded image: {}x{}", decoded.width(), decoded.height());
    OriginalImage::new(decoded.to_rgba8())
}

/// A decode running on a worker thread.
pub struct PendingDecode {
    receiver: oneshot::Receiver<Result<OriginalImage, LoadError>>,
}

impl PendingDecode {
    /// Returns the result once the worker is done, `None` while it is still running.
    pub fn poll_ready(&mut self) -> Option<Result<OriginalImage, LoadError>> {
        match self.receiver.try_recv() {
            Ok(Some(result)) => Some(result),
            Ok(None) => None,
            Err(oneshot::Canceled) => Some(Err(LoadError::Cancelled)),
        }
    }
}

/// Decodes `bytes` off the UI thread.
pub fn spawn_decode(bytes: Vec<u8>) -> PendingDecode {
    let (sender, receiver) = oneshot::channel();
    std::thread::spawn(move || {
        let result = decode(&bytes);
        if sender.send(result).is_err() {
            log::debug!("Decode finished after its receiver was dropped");
        }
    });
    PendingDecode { receiver }
}
