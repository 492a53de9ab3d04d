use image::RgbaImage;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

// Static counter for generating unique IDs
static NEXT_IMAGE_ID: AtomicU64 = AtomicU64::new(1);

/// Raster drawn underneath all strokes. Replaced wholesale, never edited.
#[derive(Clone)]
pub struct BackgroundImage {
    id: u64,
    pixels: Arc<RgbaImage>,
}

impl std::fmt::Debug for BackgroundImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackgroundImage")
            .field("id", &self.id)
            .field("size", &self.size())
            .finish()
    }
}

impl BackgroundImage {
    pub fn new(pixels: RgbaImage) -> Self {
        let id = NEXT_IMAGE_ID.fetch_add(1, Ordering::Relaxed);
        Self {
            id,
            pixels: Arc::new(pixels),
        }
    }

    /// Build from raw, non-premultiplied RGBA bytes. Returns `None` if the buffer
    /// length does not match the dimensions.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        RgbaImage::from_raw(width, height, data).map(Self::new)
    }

    /// Unique per loaded image; used by renderers to cache uploads
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn size(&self) -> [u32; 2] {
        [self.width(), self.height()]
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Raw RGBA bytes, row major
    pub fn data(&self) -> &[u8] {
        self.pixels.as_raw()
    }
}
