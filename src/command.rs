use egui::Color32;

use crate::background::BackgroundImage;
use crate::document::Document;
use crate::style::{BrushStyle, PaintStyle};
use crate::tools::Tool;

/// Discrete UI choices, each mapped to one engine call
#[derive(Debug, Clone)]
pub enum Command {
    SetTool(Tool),
    SetPaintStyle(PaintStyle),
    SetBrushStyle(BrushStyle),
    SetBrushWidth(f32),
    /// Pick a color; leaves the eraser if it is active
    SetColor(Color32),
    SetBackground(Option<BackgroundImage>),
    Undo,
    Redo,
    Clear,
}

impl Command {
    /// Apply the command. Returns whether the document changed in a way the user
    /// can see or that alters what the next gesture will draw.
    pub fn execute(&self, document: &mut Document) -> bool {
        match self {
            Command::SetTool(tool) => {
                document.set_tool(*tool);
                true
            }
            Command::SetPaintStyle(style) => {
                document.set_paint_style(*style);
                true
            }
            Command::SetBrushStyle(brush) => {
                document.set_brush_style(*brush);
                true
            }
            Command::SetBrushWidth(width) => {
                document.set_brush_width(*width);
                true
            }
            Command::SetColor(color) => {
                document.set_color(*color);
                true
            }
            Command::SetBackground(image) => {
                document.set_background_image(image.clone());
                true
            }
            Command::Undo => document.undo(),
            Command::Redo => document.redo(),
            Command::Clear => {
                document.clear();
                true
            }
        }
    }

    /// Short message shown to the user after the command ran
    pub fn notification(&self) -> Option<String> {
        match self {
            Command::SetBrushStyle(brush) => Some(format!("Style: {}", brush.name())),
            Command::SetBrushWidth(width) => Some(format!("Brush width: {}", width.round())),
            Command::SetColor(color) => {
                Some(format!("Selected color: {}", crate::style::color_name(*color)))
            }
            Command::Clear => Some("Drawing cleared".to_owned()),
            Command::SetBackground(Some(_)) => Some("Image loaded".to_owned()),
            _ => None,
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::SetTool(tool) => write!(f, "Set tool {}", tool.name()),
            Command::SetPaintStyle(_) => write!(f, "Set paint style"),
            Command::SetBrushStyle(brush) => write!(f, "Set brush {}", brush.name()),
            Command::SetBrushWidth(width) => write!(f, "Set width {}", width),
            Command::SetColor(color) => write!(f, "Set color {:?}", color),
            Command::SetBackground(_) => write!(f, "Set background"),
            Command::Undo => write!(f, "Undo"),
            Command::Redo => write!(f, "Redo"),
            Command::Clear => write!(f, "Clear"),
        }
    }
}
