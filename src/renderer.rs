use egui::{Color32, Painter, Pos2, Rect, Shape, TextureHandle, TextureId, TextureOptions, Vec2};

use crate::background::BackgroundImage;
use crate::document::RenderFrame;
use crate::stroke::Stroke;
use crate::style::CapStyle;

/// Number of halo passes used to fake a blur mask on screen
const BLUR_PASSES: usize = 3;

/// Draws a [`RenderFrame`] onto an egui painter.
///
/// The renderer owns the GPU texture for the current background image and
/// re-uploads it only when a different image is shown.
#[derive(Default)]
pub struct Renderer {
    /// Background texture tagged with the id of the image it was made from
    background_texture: Option<(u64, TextureHandle)>,
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("background_texture", &self.background_texture.as_ref().map(|(id, _)| id))
            .finish()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the background image currently uploaded, if any
    pub fn cached_background(&self) -> Option<u64> {
        self.background_texture.as_ref().map(|(id, _)| *id)
    }

    /// Paint `frame` into `canvas_rect`. Stroke coordinates are relative to the
    /// canvas origin.
    pub fn render(&mut self, ctx: &egui::Context, painter: &Painter, canvas_rect: Rect, frame: &RenderFrame<'_>) {
        let painter = painter.with_clip_rect(canvas_rect);
        painter.rect_filled(canvas_rect, 0.0, frame.background_color);

        match frame.background {
            Some(background) => {
                let texture = self.background_texture(ctx, background);
                let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
                painter.image(texture, canvas_rect, uv, Color32::WHITE);
            }
            None => {
                if self.background_texture.take().is_some() {
                    log::debug!("Released background texture");
                }
            }
        }

        let offset = canvas_rect.min.to_vec2();
        let strokes = frame.strokes.iter().map(|s| &**s).chain(frame.in_progress.as_ref());
        for stroke in strokes.filter(|s| is_visible(s, canvas_rect, offset)) {
            painter.extend(stroke_shapes(stroke, offset));
        }
    }

    fn background_texture(&mut self, ctx: &egui::Context, background: &BackgroundImage) -> TextureId {
        if let Some((id, handle)) = &self.background_texture {
            if *id == background.id() {
                return handle.id();
            }
        }

        let size = [background.width() as usize, background.height() as usize];
        let image = egui::ColorImage::from_rgba_unmultiplied(size, background.data());
        let name = format!("background_{}", background.id());
        log::debug!("Uploading {} ({}x{})", name, size[0], size[1]);
        let handle = ctx.load_texture(name, image, TextureOptions::LINEAR);
        let texture_id = handle.id();
        self.background_texture = Some((background.id(), handle));
        texture_id
    }
}

/// Whether any part of `stroke` can land inside `clip` once moved by `offset`
pub fn is_visible(stroke: &Stroke, clip: Rect, offset: Vec2) -> bool {
    let style = stroke.style();
    // Square caps and blur halos reach past the half-width bounds
    let margin = style.width / 2.0 + style.blur_radius.unwrap_or(0.0);
    stroke.rect().expand(margin).translate(offset).intersects(clip)
}

/// Shapes for one stroke, translated by `offset` into screen space
pub fn stroke_shapes(stroke: &Stroke, offset: Vec2) -> Vec<Shape> {
    let style = stroke.style();
    let geometry = stroke.geometry();
    let closed = geometry.is_closed();

    let mut points: Vec<Pos2> = geometry.outline().into_iter().map(|p| p + offset).collect();
    if points.is_empty() {
        return Vec::new();
    }
    if style.cap == CapStyle::Square && !closed {
        extend_ends(&mut points, style.width / 2.0);
    }

    let mut shapes = Vec::new();

    if let Some(radius) = style.blur_radius.filter(|r| *r > 0.0) {
        for pass in (1..=BLUR_PASSES).rev() {
            let spread = radius * pass as f32 / BLUR_PASSES as f32;
            let alpha = (style.color.a() as f32 / (BLUR_PASSES as f32 + 1.0)) as u8;
            let [r, g, b, _] = style.color.to_srgba_unmultiplied();
            let halo = egui::Stroke::new(style.width + spread * 2.0, Color32::from_rgba_unmultiplied(r, g, b, alpha));
            push_path(&mut shapes, &points, closed, halo, None);
        }
    }

    let line = egui::Stroke::new(style.width, style.color);
    push_path(&mut shapes, &points, closed, line, style.dash.map(|d| d.intervals()));

    if style.cap == CapStyle::Round && !closed {
        let radius = style.width / 2.0;
        // A tap leaves a single point; only round caps give it a visible dot
        if let [only] = points.as_slice() {
            shapes.push(Shape::circle_filled(*only, radius, style.color));
        } else if let (Some(first), Some(last)) = (points.first(), points.last()) {
            shapes.push(Shape::circle_filled(*first, radius, style.color));
            shapes.push(Shape::circle_filled(*last, radius, style.color));
        }
    }

    shapes
}

fn push_path(shapes: &mut Vec<Shape>, points: &[Pos2], closed: bool, stroke: egui::Stroke, dash: Option<[f32; 2]>) {
    if points.len() < 2 {
        return;
    }
    match dash {
        Some([on, off]) => {
            let mut path = points.to_vec();
            if closed {
                path.push(points[0]);
            }
            shapes.extend(Shape::dashed_line(&path, stroke, on, off));
        }
        None if closed => shapes.push(Shape::closed_line(points.to_vec(), stroke)),
        None => shapes.push(Shape::line(points.to_vec(), stroke)),
    }
}

/// Push both ends of an open polyline outward by `amount` along its end directions
fn extend_ends(points: &mut [Pos2], amount: f32) {
    let n = points.len();
    if n < 2 {
        return;
    }
    let start_dir = (points[0] - points[1]).normalized();
    let end_dir = (points[n - 1] - points[n - 2]).normalized();
    if start_dir.is_finite() {
        points[0] += start_dir * amount;
    }
    if end_dir.is_finite() {
        points[n - 1] += end_dir * amount;
    }
}
