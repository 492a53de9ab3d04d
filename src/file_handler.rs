use image::imageops::FilterType;
use std::fs;
use std::path::{Path, PathBuf};

use crate::background::BackgroundImage;
use crate::document::Document;
use crate::error::{CanvasError, CanvasResult};
use crate::raster;
use crate::util::time;

/// File extensions accepted as background images
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp"];

/// Decode an encoded image (PNG, JPEG, ...) into a background raster.
///
/// When `canvas_size` is given and non-zero the image is stretched to exactly
/// that many pixels, otherwise it keeps its decoded size.
pub fn decode_background(bytes: &[u8], canvas_size: Option<[u32; 2]>) -> CanvasResult<BackgroundImage> {
    let decoded = image::load_from_memory(bytes)?;
    log::debug!("Decoded image: {}x{}", decoded.width(), decoded.height());

    let decoded = match canvas_size {
        Some([w, h]) if w > 0 && h > 0 && (w, h) != (decoded.width(), decoded.height()) => {
            log::debug!("Rescaling background to {}x{}", w, h);
            decoded.resize_exact(w, h, FilterType::Triangle)
        }
        _ => decoded,
    };

    Ok(BackgroundImage::new(decoded.to_rgba8()))
}

/// Read and decode a background image from disk
pub fn load_background(path: impl AsRef<Path>, canvas_size: Option<[u32; 2]>) -> CanvasResult<BackgroundImage> {
    let path = path.as_ref();
    log::info!("Loading background from {}", path.display());
    let bytes = fs::read(path)?;
    decode_background(&bytes, canvas_size)
}

/// Name used for exported drawings
pub fn export_file_name() -> String {
    format!("drawing_{}.png", time::timestamp_millis())
}

/// Rasterize the document's visible state at `size` pixels and write it as a PNG
/// to `path`. `scale` is the number of pixels per canvas point.
pub fn export_png(document: &Document, size: [u32; 2], scale: f32, path: impl AsRef<Path>) -> CanvasResult<()> {
    let path = path.as_ref();
    let image = raster::rasterize(&document.frame(), size[0], size[1], scale)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    image
        .save_with_format(path, image::ImageFormat::Png)
        .map_err(|err| match err {
            image::ImageError::IoError(io) => CanvasError::Io(io),
            other => CanvasError::Encode {
                path: path.to_path_buf(),
                reason: other.to_string(),
            },
        })?;

    log::info!("Exported {}x{} drawing to {}", size[0], size[1], path.display());
    Ok(())
}

/// Export into `dir` under a fresh timestamped name. Returns the written path.
pub fn export_to_dir(
    document: &Document,
    size: [u32; 2],
    scale: f32,
    dir: impl AsRef<Path>,
) -> CanvasResult<PathBuf> {
    let path = dir.as_ref().join(export_file_name());
    export_png(document, size, scale, &path)?;
    Ok(path)
}

/// Collects files dropped onto the window and turns images into backgrounds
#[derive(Debug, Default)]
pub struct FileHandler {
    dropped_files: Vec<egui::DroppedFile>,
}

impl FileHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick up newly dropped files from the UI context.
    /// Returns true if any new files arrived.
    pub fn check_for_dropped_files(&mut self, ctx: &egui::Context) -> bool {
        ctx.input(|i| {
            if i.raw.dropped_files.is_empty() {
                false
            } else {
                self.dropped_files = i.raw.dropped_files.clone();
                true
            }
        })
    }

    /// Decode the pending dropped image files. Non-image files are skipped with a warning.
    pub fn process_dropped_files(&mut self, canvas_size: Option<[u32; 2]>) -> Vec<CanvasResult<BackgroundImage>> {
        let mut results = Vec::new();

        for file in self.dropped_files.drain(..) {
            let file_name = if let Some(path) = &file.path {
                path.display().to_string()
            } else if !file.name.is_empty() {
                file.name.clone()
            } else {
                "unknown".to_owned()
            };

            if !is_image_file(&file) {
                log::warn!("Dropped file is not a supported type: {}", file_name);
                continue;
            }

            let result = if let Some(bytes) = &file.bytes {
                log::info!("Processing image from memory: {} ({} bytes)", file_name, bytes.len());
                decode_background(bytes, canvas_size)
            } else if let Some(path) = &file.path {
                load_background(path, canvas_size)
            } else {
                log::warn!("Dropped file has no accessible data: {}", file_name);
                continue;
            };

            if let Err(err) = &result {
                log::error!("Failed to load {}: {}", file_name, err);
            }
            results.push(result);
        }

        results
    }

    /// Dim the window and list the files being dragged over it
    pub fn preview_files_being_dropped(&self, ctx: &egui::Context) {
        use egui::{Align2, Color32, Id, LayerId, Order, TextStyle};

        let text = ctx.input(|i| {
            if i.raw.hovered_files.is_empty() {
                return None;
            }
            let mut text = "Drop an image to use it as background:\n".to_owned();
            for file in &i.raw.hovered_files {
                if let Some(path) = &file.path {
                    text += &format!("\n{}", path.display());
                } else if !file.mime.is_empty() {
                    text += &format!("\n{}", file.mime);
                }
            }
            Some(text)
        });

        let Some(text) = text else {
            return;
        };

        let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("file_drop_target")));
        let screen_rect = ctx.screen_rect();
        painter.rect_filled(screen_rect, 0.0, Color32::from_black_alpha(192));
        painter.text(
            screen_rect.center(),
            Align2::CENTER_CENTER,
            text,
            TextStyle::Heading.resolve(&ctx.style()),
            Color32::WHITE,
        );
    }
}

/// Check if a file is an image based on MIME type or extension
fn is_image_file(file: &egui::DroppedFile) -> bool {
    if !file.mime.is_empty() {
        file.mime.starts_with("image/")
    } else {
        file.path
            .as_deref()
            .or_else(|| Some(Path::new(&file.name)))
            .and_then(Path::extension)
            .map(|ext| {
                let ext = ext.to_string_lossy().to_lowercase();
                IMAGE_EXTENSIONS.contains(&ext.as_str())
            })
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32, color: [u8; 4]) -> Vec<u8> {
        let image = RgbaImage::from_pixel(width, height, Rgba(color));
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_decode_rescales_to_canvas() {
        let bytes = png_bytes(4, 2, [0, 0, 255, 255]);
        let background = decode_background(&bytes, Some([16, 8])).unwrap();
        assert_eq!(background.size(), [16, 8]);
        assert_eq!(background.pixels().get_pixel(8, 4).0, [0, 0, 255, 255]);
    }

    #[test]
    fn test_decode_keeps_size_without_canvas() {
        let bytes = png_bytes(4, 2, [0, 0, 255, 255]);
        assert_eq!(decode_background(&bytes, None).unwrap().size(), [4, 2]);
        assert_eq!(decode_background(&bytes, Some([0, 0])).unwrap().size(), [4, 2]);
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(matches!(
            decode_background(b"definitely not an image", None),
            Err(CanvasError::Decode(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_background(dir.path().join("missing.png"), None),
            Err(CanvasError::Io(_))
        ));
    }

    #[test]
    fn test_export_file_name() {
        let name = export_file_name();
        assert!(name.starts_with("drawing_"));
        assert!(name.ends_with(".png"));
    }

    #[test]
    fn test_image_detection() {
        let by_mime = egui::DroppedFile {
            mime: "image/png".to_owned(),
            ..Default::default()
        };
        let by_name = egui::DroppedFile {
            name: "photo.JPG".to_owned(),
            ..Default::default()
        };
        let text = egui::DroppedFile {
            name: "notes.txt".to_owned(),
            ..Default::default()
        };
        assert!(is_image_file(&by_mime));
        assert!(is_image_file(&by_name));
        assert!(!is_image_file(&text));
    }
}
