use egui::{Color32, Response, Sense, Stroke, Ui, Vec2};

const SWATCH_SIZE: f32 = 24.0;
const HIGHLIGHT: Color32 = Color32::from_rgb(33, 150, 243);

/// A clickable square filled with one palette color
pub struct ColorSwatch {
    pub color: Color32,
    pub name: &'static str,
    pub selected: bool,
}

impl ColorSwatch {
    pub fn new(color: Color32, name: &'static str, selected: bool) -> Self {
        Self { color, name, selected }
    }

    pub fn show(&self, ui: &mut Ui) -> Response {
        let (rect, response) = ui.allocate_exact_size(Vec2::splat(SWATCH_SIZE), Sense::click());

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            painter.rect_filled(rect, 4.0, self.color);

            let border = if self.selected {
                Stroke::new(2.0, HIGHLIGHT)
            } else if response.hovered() {
                Stroke::new(1.0, Color32::from_gray(160))
            } else {
                Stroke::new(1.0, Color32::from_gray(60))
            };
            painter.rect_stroke(rect, 4.0, border);
        }

        response.on_hover_text(self.name)
    }
}
