use serde::{Deserialize, Serialize};

use crate::style::{ERASER_WIDTH, PaintStyle};

/// Drawing tools available on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tool {
    #[default]
    Freehand,
    Rectangle,
    Ellipse,
    Triangle,
    Eraser,
}

impl Tool {
    pub const ALL: [Tool; 5] = [
        Tool::Freehand,
        Tool::Rectangle,
        Tool::Ellipse,
        Tool::Triangle,
        Tool::Eraser,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Tool::Freehand => "Freehand",
            Tool::Rectangle => "Rectangle",
            Tool::Ellipse => "Ellipse",
            Tool::Triangle => "Triangle",
            Tool::Eraser => "Eraser",
        }
    }

    /// Shape tools are defined by two drag corners rather than a path
    pub fn is_shape(&self) -> bool {
        matches!(self, Tool::Rectangle | Tool::Ellipse | Tool::Triangle)
    }
}

/// Active tool and paint settings. Persisted between sessions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolState {
    pub active: Tool,
    /// Last tool that was not the eraser; picking a color returns to it
    pub last_drawing_tool: Tool,
    pub paint: PaintStyle,
    pub eraser_width: f32,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            active: Tool::Freehand,
            last_drawing_tool: Tool::Freehand,
            paint: PaintStyle::default(),
            eraser_width: ERASER_WIDTH,
        }
    }
}

impl ToolState {
    pub fn with_eraser_width(mut self, width: f32) -> Self {
        self.eraser_width = width;
        self
    }

    pub fn set_active(&mut self, tool: Tool) {
        if tool != Tool::Eraser {
            self.last_drawing_tool = tool;
        }
        self.active = tool;
    }

    pub fn is_erasing(&self) -> bool {
        self.active == Tool::Eraser
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_drawing_tool_skips_eraser() {
        let mut state = ToolState::default();
        state.set_active(Tool::Ellipse);
        state.set_active(Tool::Eraser);
        assert!(state.is_erasing());
        assert_eq!(state.last_drawing_tool, Tool::Ellipse);
    }

    #[test]
    fn test_shape_tools() {
        assert!(Tool::Triangle.is_shape());
        assert!(!Tool::Freehand.is_shape());
        assert!(!Tool::Eraser.is_shape());
    }
}
