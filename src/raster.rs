//! CPU rasterization of a [`RenderFrame`] using tiny-skia.
//!
//! Produces the flattened image that export writes to disk.

use egui::Color32;
use image::RgbaImage;
use tiny_skia::{
    ColorU8, FilterQuality, IntSize, LineCap, LineJoin, Paint, PathBuilder, Pixmap, PixmapPaint,
    StrokeDash, Transform,
};

use crate::background::BackgroundImage;
use crate::document::RenderFrame;
use crate::error::{CanvasError, CanvasResult};
use crate::stroke::{Geometry, Stroke};
use crate::style::CapStyle;

/// Render `frame` into a `width` x `height` RGBA image.
///
/// Stroke coordinates are canvas points and are multiplied by `scale` (physical
/// pixels per point); the background image is stretched to the output size.
pub fn rasterize(frame: &RenderFrame<'_>, width: u32, height: u32, scale: f32) -> CanvasResult<RgbaImage> {
    let mut pixmap = Pixmap::new(width, height).ok_or(CanvasError::Raster { width, height })?;
    pixmap.fill(to_skia_color(frame.background_color));

    if let Some(background) = frame.background {
        draw_background(&mut pixmap, background)?;
    }

    for stroke in frame.strokes.iter().map(|s| &**s).chain(frame.in_progress.as_ref()) {
        draw_stroke(&mut pixmap, stroke, scale)?;
    }

    Ok(to_rgba_image(&pixmap))
}

fn to_skia_color(color: Color32) -> tiny_skia::Color {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    tiny_skia::Color::from_rgba8(r, g, b, a)
}

fn draw_background(pixmap: &mut Pixmap, background: &BackgroundImage) -> CanvasResult<()> {
    let (w, h) = (background.width(), background.height());
    let mut layer = Pixmap::new(w, h).ok_or(CanvasError::Raster { width: w, height: h })?;
    for (dst, src) in layer.pixels_mut().iter_mut().zip(background.pixels().pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }

    let transform = Transform::from_scale(
        pixmap.width() as f32 / w as f32,
        pixmap.height() as f32 / h as f32,
    );
    let paint = PixmapPaint {
        quality: FilterQuality::Bilinear,
        ..PixmapPaint::default()
    };
    pixmap.draw_pixmap(0, 0, layer.as_ref(), &paint, transform, None);
    Ok(())
}

fn build_path(geometry: &Geometry) -> Option<tiny_skia::Path> {
    match geometry {
        Geometry::Freehand(points) => {
            let (first, rest) = points.split_first()?;
            let mut pb = PathBuilder::new();
            pb.move_to(first.x, first.y);
            if rest.is_empty() {
                // A tap: zero length segment so round caps still leave a dot
                pb.line_to(first.x, first.y);
            }
            for p in rest {
                pb.line_to(p.x, p.y);
            }
            pb.finish()
        }
        Geometry::Rectangle(rect) => {
            let rect = tiny_skia::Rect::from_ltrb(rect.min.x, rect.min.y, rect.max.x, rect.max.y)?;
            Some(PathBuilder::from_rect(rect))
        }
        Geometry::Ellipse(rect) => {
            let rect = tiny_skia::Rect::from_ltrb(rect.min.x, rect.min.y, rect.max.x, rect.max.y)?;
            PathBuilder::from_oval(rect)
        }
        Geometry::Triangle([a, b, c]) => {
            let mut pb = PathBuilder::new();
            pb.move_to(a.x, a.y);
            pb.line_to(b.x, b.y);
            pb.line_to(c.x, c.y);
            pb.close();
            pb.finish()
        }
    }
}

fn skia_stroke(stroke: &Stroke) -> tiny_skia::Stroke {
    let style = stroke.style();
    tiny_skia::Stroke {
        width: style.width,
        line_cap: match style.cap {
            CapStyle::Butt => LineCap::Butt,
            CapStyle::Round => LineCap::Round,
            CapStyle::Square => LineCap::Square,
        },
        line_join: if style.cap == CapStyle::Round {
            LineJoin::Round
        } else {
            LineJoin::Miter
        },
        dash: style
            .dash
            .and_then(|dash| StrokeDash::new(dash.intervals().to_vec(), 0.0)),
        ..Default::default()
    }
}

fn draw_stroke(pixmap: &mut Pixmap, stroke: &Stroke, scale: f32) -> CanvasResult<()> {
    let Some(path) = build_path(stroke.geometry()) else {
        return Ok(());
    };

    let mut paint = Paint::default();
    paint.set_color(to_skia_color(stroke.style().color));
    paint.anti_alias = true;
    let skia_stroke = skia_stroke(stroke);
    let transform = Transform::from_scale(scale, scale);

    match stroke.style().blur_radius {
        Some(radius) if radius > 0.0 => {
            // Blurred strokes are drawn on their own layer, blurred, then composited
            let (w, h) = (pixmap.width(), pixmap.height());
            let mut layer = Pixmap::new(w, h).ok_or(CanvasError::Raster { width: w, height: h })?;
            layer.stroke_path(&path, &paint, &skia_stroke, transform, None);

            let premultiplied = RgbaImage::from_raw(w, h, layer.take())
                .ok_or(CanvasError::Raster { width: w, height: h })?;
            let blurred = image::imageops::blur(&premultiplied, blur_sigma(radius * scale));
            let size = IntSize::from_wh(w, h).ok_or(CanvasError::Raster { width: w, height: h })?;
            let layer = Pixmap::from_vec(blurred.into_raw(), size)
                .ok_or(CanvasError::Raster { width: w, height: h })?;

            pixmap.draw_pixmap(
                0,
                0,
                layer.as_ref(),
                &PixmapPaint::default(),
                Transform::identity(),
                None,
            );
        }
        _ => {
            pixmap.stroke_path(&path, &paint, &skia_stroke, transform, None);
        }
    }
    Ok(())
}

/// Gaussian sigma matching a blur mask radius
fn blur_sigma(radius: f32) -> f32 {
    0.57735 * radius + 0.5
}

fn to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let mut image = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in image.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = image::Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::style::{BrushStyle, PaintStyle};
    use crate::tools::Tool;
    use egui::pos2;

    fn pixel(image: &RgbaImage, x: u32, y: u32) -> [u8; 4] {
        image.get_pixel(x, y).0
    }

    #[test]
    fn test_empty_document_is_background_color() {
        let doc = Document::new();
        let image = rasterize(&doc.frame(), 8, 4, 1.0).unwrap();
        assert_eq!(image.dimensions(), (8, 4));
        assert!(image.pixels().all(|p| p.0 == [255, 255, 255, 255]));
    }

    #[test]
    fn test_zero_size_is_error() {
        let doc = Document::new();
        assert!(matches!(
            rasterize(&doc.frame(), 0, 10, 1.0),
            Err(CanvasError::Raster { width: 0, height: 10 })
        ));
    }

    #[test]
    fn test_freehand_line_is_drawn() {
        let mut doc = Document::new();
        doc.begin_gesture(pos2(0.0, 10.0));
        doc.end_gesture(pos2(40.0, 10.0));

        let image = rasterize(&doc.frame(), 50, 20, 1.0).unwrap();
        let on_line = pixel(&image, 20, 10);
        assert!(on_line[0] < 64 && on_line[1] < 64 && on_line[2] < 64);
        assert_eq!(pixel(&image, 20, 2), [255, 255, 255, 255]);
        assert_eq!(pixel(&image, 48, 10), [255, 255, 255, 255]);
    }

    #[test]
    fn test_scale_maps_points_to_pixels() {
        let mut doc = Document::new();
        doc.begin_gesture(pos2(0.0, 10.0));
        doc.end_gesture(pos2(40.0, 10.0));

        let image = rasterize(&doc.frame(), 100, 40, 2.0).unwrap();
        // Point (30, 10) lands on pixel (60, 20) with a 10 pixel wide line
        assert!(pixel(&image, 60, 20)[0] < 64);
        assert!(pixel(&image, 60, 16)[0] < 64);
        assert_eq!(pixel(&image, 60, 10), [255, 255, 255, 255]);
        assert_eq!(pixel(&image, 90, 20), [255, 255, 255, 255]);
    }

    #[test]
    fn test_eraser_paints_background_color() {
        let mut doc = Document::new();
        doc.set_paint_style(PaintStyle::default().with_width(10.0));
        doc.begin_gesture(pos2(0.0, 10.0));
        doc.end_gesture(pos2(40.0, 10.0));

        doc.set_tool(Tool::Eraser);
        doc.begin_gesture(pos2(20.0, 0.0));
        doc.extend_gesture(pos2(20.0, 20.0));
        doc.end_gesture(pos2(20.0, 20.0));

        let image = rasterize(&doc.frame(), 50, 20, 1.0).unwrap();
        assert_eq!(pixel(&image, 20, 10), [255, 255, 255, 255]);
        assert!(pixel(&image, 5, 10)[0] < 64);
    }

    #[test]
    fn test_rectangle_outline_only() {
        let mut doc = Document::new();
        doc.set_tool(Tool::Rectangle);
        doc.set_paint_style(PaintStyle::default().with_color(Color32::RED).with_width(2.0));
        doc.begin_gesture(pos2(5.0, 5.0));
        doc.end_gesture(pos2(25.0, 25.0));

        let image = rasterize(&doc.frame(), 30, 30, 1.0).unwrap();
        let edge = pixel(&image, 15, 5);
        assert!(edge[0] > 200 && edge[1] < 80);
        assert_eq!(pixel(&image, 15, 15), [255, 255, 255, 255]);
    }

    #[test]
    fn test_blurred_stroke_spreads() {
        let mut doc = Document::new();
        doc.set_paint_style(PaintStyle::default().with_brush(BrushStyle::Blurred).with_width(4.0));
        doc.begin_gesture(pos2(0.0, 20.0));
        doc.end_gesture(pos2(60.0, 20.0));

        let image = rasterize(&doc.frame(), 60, 40, 1.0).unwrap();
        // Outside the stroke width but within the blur
        let halo = pixel(&image, 30, 26);
        assert!(halo[0] < 255);
        assert_eq!(halo[3], 255);
    }

    #[test]
    fn test_background_is_stretched() {
        let mut doc = Document::new();
        let red = [255, 0, 0, 255].repeat(4);
        doc.set_background_image(BackgroundImage::from_rgba(2, 2, red));

        let image = rasterize(&doc.frame(), 10, 10, 1.0).unwrap();
        let [r, g, b, a] = pixel(&image, 5, 5);
        assert!(r > 250 && g < 5 && b < 5 && a == 255);
    }
}
