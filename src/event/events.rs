use crate::style::PaintStyle;
use crate::tools::Tool;

/// Notifications emitted by the [`Document`](crate::Document) after it changes
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentEvent {
    GestureStarted {
        tool: Tool,
    },
    /// An in-progress stroke was dropped without being committed
    GestureAbandoned,
    /// An eraser sub-stroke was appended to the live stroke list
    EraserSegmentAdded {
        stroke_count: usize,
    },
    /// A gesture finished and a new snapshot was committed
    StrokeCommitted {
        stroke_count: usize,
        history_len: usize,
    },
    /// Undo or redo moved the history index
    HistoryMoved {
        index: usize,
        len: usize,
    },
    Cleared,
    BackgroundChanged {
        size: Option<[u32; 2]>,
    },
    ToolChanged {
        old: Tool,
        new: Tool,
    },
    PaintStyleChanged(PaintStyle),
}
