use egui::Color32;
use serde::{Deserialize, Serialize};

/// Default brush width for newly created documents
pub const DEFAULT_WIDTH: f32 = 5.0;
/// Fixed width of the eraser stroke
pub const ERASER_WIDTH: f32 = 20.0;

const DASHED_INTERVALS: [f32; 2] = [20.0, 10.0];
const DOTTED_INTERVALS: [f32; 2] = [5.0, 10.0];
const BLUR_RADIUS: f32 = 10.0;

/// How the ends of an open stroke are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CapStyle {
    #[default]
    Butt,
    Round,
    Square,
}

/// Alternating on/off lengths applied along a stroke, starting with "on"
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DashPattern {
    pub on: f32,
    pub off: f32,
}

impl DashPattern {
    pub const fn new(on: f32, off: f32) -> Self {
        Self { on, off }
    }

    pub fn intervals(&self) -> [f32; 2] {
        [self.on, self.off]
    }
}

/// Fully resolved paint attributes of a committed stroke.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: Color32,
    pub width: f32,
    pub cap: CapStyle,
    pub dash: Option<DashPattern>,
    pub blur_radius: Option<f32>,
}

impl StrokeStyle {
    /// Style used by eraser segments: a round-capped stroke in the canvas background color
    pub fn eraser(background: Color32, width: f32) -> Self {
        Self {
            color: background,
            width,
            cap: CapStyle::Round,
            dash: None,
            blur_radius: None,
        }
    }
}

/// Brush effect selected by the user; each choice replaces the previous effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BrushStyle {
    #[default]
    Normal,
    Dashed,
    Dotted,
    Blurred,
}

impl BrushStyle {
    pub const ALL: [BrushStyle; 4] = [
        BrushStyle::Normal,
        BrushStyle::Dashed,
        BrushStyle::Dotted,
        BrushStyle::Blurred,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BrushStyle::Normal => "Normal",
            BrushStyle::Dashed => "Dashed",
            BrushStyle::Dotted => "Dotted",
            BrushStyle::Blurred => "Blurred",
        }
    }

    fn dash(&self) -> Option<DashPattern> {
        match self {
            BrushStyle::Dashed => Some(DashPattern::new(DASHED_INTERVALS[0], DASHED_INTERVALS[1])),
            BrushStyle::Dotted => Some(DashPattern::new(DOTTED_INTERVALS[0], DOTTED_INTERVALS[1])),
            BrushStyle::Normal | BrushStyle::Blurred => None,
        }
    }

    fn blur_radius(&self) -> Option<f32> {
        match self {
            BrushStyle::Blurred => Some(BLUR_RADIUS),
            _ => None,
        }
    }
}

/// The user's current paint choice for non-eraser tools.
///
/// Committed strokes carry the [`StrokeStyle`] derived from this at the moment the
/// gesture began, so changing it never touches existing strokes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaintStyle {
    pub color: Color32,
    pub width: f32,
    pub brush: BrushStyle,
}

impl Default for PaintStyle {
    fn default() -> Self {
        Self {
            color: Color32::BLACK,
            width: DEFAULT_WIDTH,
            brush: BrushStyle::Normal,
        }
    }
}

impl PaintStyle {
    pub fn with_color(mut self, color: Color32) -> Self {
        self.color = color;
        self
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    pub fn with_brush(mut self, brush: BrushStyle) -> Self {
        self.brush = brush;
        self
    }

    pub fn stroke_style(&self) -> StrokeStyle {
        StrokeStyle {
            color: self.color,
            width: self.width,
            cap: CapStyle::Butt,
            dash: self.brush.dash(),
            blur_radius: self.brush.blur_radius(),
        }
    }
}

/// Colors offered by the palette, with their display names
pub const PALETTE: [(Color32, &str); 10] = [
    (Color32::RED, "Red"),
    (Color32::GREEN, "Green"),
    (Color32::BLUE, "Blue"),
    (Color32::YELLOW, "Yellow"),
    (Color32::from_rgb(0, 255, 255), "Cyan"),
    (Color32::from_rgb(255, 0, 255), "Magenta"),
    (Color32::BLACK, "Black"),
    (Color32::GRAY, "Gray"),
    (Color32::WHITE, "White"),
    (Color32::DARK_GRAY, "Dark gray"),
];

/// Human readable name for a palette color, `"Custom"` for anything else
pub fn color_name(color: Color32) -> &'static str {
    PALETTE
        .iter()
        .find(|(c, _)| *c == color)
        .map(|(_, name)| *name)
        .unwrap_or("Custom")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brush_styles_replace_effects() {
        let paint = PaintStyle::default();

        let dashed = paint.with_brush(BrushStyle::Dashed).stroke_style();
        assert_eq!(dashed.dash, Some(DashPattern::new(20.0, 10.0)));
        assert_eq!(dashed.blur_radius, None);

        let dotted = paint.with_brush(BrushStyle::Dotted).stroke_style();
        assert_eq!(dotted.dash.map(|d| d.intervals()), Some([5.0, 10.0]));

        let blurred = paint.with_brush(BrushStyle::Blurred).stroke_style();
        assert_eq!(blurred.dash, None);
        assert_eq!(blurred.blur_radius, Some(10.0));

        let normal = paint.with_brush(BrushStyle::Normal).stroke_style();
        assert_eq!(normal.dash, None);
        assert_eq!(normal.blur_radius, None);
        assert_eq!(normal.cap, CapStyle::Butt);
    }

    #[test]
    fn test_eraser_style() {
        let style = StrokeStyle::eraser(Color32::WHITE, ERASER_WIDTH);
        assert_eq!(style.color, Color32::WHITE);
        assert_eq!(style.width, 20.0);
        assert_eq!(style.cap, CapStyle::Round);
    }

    #[test]
    fn test_color_names() {
        assert_eq!(color_name(Color32::RED), "Red");
        assert_eq!(color_name(Color32::from_rgb(0, 255, 255)), "Cyan");
        assert_eq!(color_name(Color32::from_rgb(1, 2, 3)), "Custom");
    }
}
