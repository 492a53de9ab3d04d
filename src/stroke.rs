use egui::{Pos2, Rect};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::geometry;
use crate::style::StrokeStyle;
use crate::tools::Tool;

/// The shape of a stroke
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    /// Ordered points of a freehand path
    Freehand(Vec<Pos2>),
    /// Axis-aligned rectangle, always normalized
    Rectangle(Rect),
    /// Ellipse inscribed in a normalized bounding box
    Ellipse(Rect),
    /// Closed triangle
    Triangle([Pos2; 3]),
}

impl Geometry {
    /// Rectangle spanned by two drag corners, in any order
    pub fn rectangle(a: Pos2, b: Pos2) -> Self {
        Geometry::Rectangle(geometry::normalized_rect(a, b))
    }

    /// Ellipse inside the box spanned by two drag corners, in any order
    pub fn ellipse(a: Pos2, b: Pos2) -> Self {
        Geometry::Ellipse(geometry::normalized_rect(a, b))
    }

    /// Triangle dragged from `start` to `end`
    pub fn triangle(start: Pos2, end: Pos2) -> Self {
        Geometry::Triangle(geometry::triangle_vertices(start, end))
    }

    /// Whether the outline returns to its first point
    pub fn is_closed(&self) -> bool {
        !matches!(self, Geometry::Freehand(_))
    }

    /// Polyline approximation of the outline. Closed shapes do not repeat their first point.
    pub fn outline(&self) -> Vec<Pos2> {
        match self {
            Geometry::Freehand(points) => points.clone(),
            Geometry::Rectangle(rect) => geometry::rect_outline(*rect),
            Geometry::Ellipse(rect) => geometry::ellipse_outline(*rect, geometry::ELLIPSE_SEGMENTS),
            Geometry::Triangle(vertices) => vertices.to_vec(),
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Geometry::Rectangle(rect) | Geometry::Ellipse(rect) => *rect,
            Geometry::Freehand(points) => geometry::calculate_bounds(points, 0.0),
            Geometry::Triangle(vertices) => geometry::calculate_bounds(vertices, 0.0),
        }
    }
}

/// One committed shape together with its paint style. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    geometry: Geometry,
    style: StrokeStyle,
}

/// Strokes are shared between the live list and history snapshots
pub type StrokeRef = Arc<Stroke>;

impl Stroke {
    pub fn new(geometry: Geometry, style: StrokeStyle) -> Self {
        Self { geometry, style }
    }

    pub fn new_ref(geometry: Geometry, style: StrokeStyle) -> StrokeRef {
        Arc::new(Self::new(geometry, style))
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    /// Bounding box including half the stroke width
    pub fn rect(&self) -> Rect {
        self.geometry.bounds().expand(self.style.width / 2.0)
    }
}

/// Accumulates pointer positions for the gesture in progress.
///
/// Freehand and eraser gestures record every point; shape tools only need the
/// press position and the latest position.
#[derive(Debug, Clone)]
pub struct StrokeBuilder {
    tool: Tool,
    style: StrokeStyle,
    points: Vec<Pos2>,
}

impl StrokeBuilder {
    /// Start a new stroke at `start`
    pub fn new(tool: Tool, style: StrokeStyle, start: Pos2) -> Self {
        Self {
            tool,
            style,
            points: vec![start],
        }
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn start(&self) -> Pos2 {
        self.points[0]
    }

    pub fn last(&self) -> Pos2 {
        self.points[self.points.len() - 1]
    }

    /// Record a new pointer position
    pub fn add_point(&mut self, point: Pos2) {
        if self.tool.is_shape() {
            // Only the corners matter for shapes
            self.points.truncate(1);
        }
        self.points.push(point);
    }

    /// Record the release position. Freehand paths skip a release point that
    /// repeats the last recorded position.
    pub fn finish_at(&mut self, point: Pos2) {
        if self.tool.is_shape() || self.last() != point {
            self.add_point(point);
        }
    }

    /// Build the stroke described by the points recorded so far
    pub fn to_stroke(&self) -> Stroke {
        let start = self.start();
        let end = self.last();
        let geometry = match self.tool {
            Tool::Freehand | Tool::Eraser => Geometry::Freehand(self.points.clone()),
            Tool::Rectangle => Geometry::rectangle(start, end),
            Tool::Ellipse => Geometry::ellipse(start, end),
            Tool::Triangle => Geometry::triangle(start, end),
        };
        Stroke::new(geometry, self.style)
    }

    pub fn to_stroke_ref(&self) -> StrokeRef {
        Arc::new(self.to_stroke())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::PaintStyle;
    use egui::pos2;

    fn style() -> StrokeStyle {
        PaintStyle::default().stroke_style()
    }

    #[test]
    fn test_freehand_collects_points() {
        let mut builder = StrokeBuilder::new(Tool::Freehand, style(), pos2(0.0, 0.0));
        builder.add_point(pos2(1.0, 1.0));
        builder.add_point(pos2(2.0, 3.0));
        builder.finish_at(pos2(2.0, 3.0));

        let stroke = builder.to_stroke();
        assert_eq!(
            stroke.geometry(),
            &Geometry::Freehand(vec![pos2(0.0, 0.0), pos2(1.0, 1.0), pos2(2.0, 3.0)])
        );
        assert!(!stroke.geometry().is_closed());
    }

    #[test]
    fn test_shape_keeps_only_corners() {
        let mut builder = StrokeBuilder::new(Tool::Rectangle, style(), pos2(50.0, 50.0));
        builder.add_point(pos2(30.0, 30.0));
        builder.add_point(pos2(20.0, 20.0));
        builder.finish_at(pos2(10.0, 10.0));
        assert_eq!(builder.points().len(), 2);

        let stroke = builder.to_stroke();
        assert_eq!(
            stroke.geometry(),
            &Geometry::Rectangle(Rect::from_min_max(pos2(10.0, 10.0), pos2(50.0, 50.0)))
        );
    }

    #[test]
    fn test_ellipse_bounds_normalized() {
        let geometry = Geometry::ellipse(pos2(50.0, 10.0), pos2(10.0, 50.0));
        assert_eq!(geometry.bounds(), Rect::from_min_max(pos2(10.0, 10.0), pos2(50.0, 50.0)));
        assert_eq!(geometry.outline().len(), crate::geometry::ELLIPSE_SEGMENTS);
    }

    #[test]
    fn test_stroke_rect_includes_width() {
        let stroke = Stroke::new(Geometry::rectangle(pos2(0.0, 0.0), pos2(10.0, 10.0)), style());
        let rect = stroke.rect();
        assert_eq!(rect.min, pos2(-2.5, -2.5));
        assert_eq!(rect.max, pos2(12.5, 12.5));
    }
}
