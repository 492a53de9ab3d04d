use egui::{Color32, Pos2};

use crate::background::BackgroundImage;
use crate::config::CanvasConfig;
use crate::event::{DocumentEvent, EventBus, EventHandler};
use crate::history::{History, Snapshot};
use crate::stroke::{Stroke, StrokeBuilder, StrokeRef};
use crate::style::{BrushStyle, PaintStyle, StrokeStyle};
use crate::tools::{Tool, ToolState};

/// Everything a renderer needs to draw one frame. Read-only view of the document.
#[derive(Debug)]
pub struct RenderFrame<'a> {
    pub background_color: Color32,
    pub background: Option<&'a BackgroundImage>,
    pub strokes: &'a [StrokeRef],
    pub in_progress: Option<Stroke>,
}

/// The drawing document: committed strokes, the gesture being drawn, tool
/// settings, undo history and the background image.
///
/// All mutation goes through this type. Observers learn about changes through
/// the [`EventHandler`]s registered with [`Document::subscribe`].
#[derive(Debug)]
pub struct Document {
    strokes: Vec<StrokeRef>,
    in_progress: Option<StrokeBuilder>,
    tools: ToolState,
    history: History,
    background: Option<BackgroundImage>,
    background_color: Color32,
    events: EventBus,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            strokes: Vec::new(),
            in_progress: None,
            tools: ToolState::default(),
            history: History::new(),
            background: None,
            background_color: Color32::WHITE,
            events: EventBus::new(),
        }
    }

    pub fn with_config(config: &CanvasConfig) -> Self {
        Self {
            tools: config.initial_tool_state(),
            history: History::with_limit(config.history_limit),
            background_color: config.background_color,
            ..Self::new()
        }
    }

    /// Register an observer for document changes
    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.events.subscribe(handler);
    }

    // Gestures

    /// Start a new in-progress stroke at `point` using the active tool.
    /// Any stroke already in progress is replaced.
    pub fn begin_gesture(&mut self, point: Pos2) {
        let tool = self.tools.active;
        let style = self.active_stroke_style();
        if self.in_progress.is_some() {
            log::debug!("Gesture restarted before the previous one ended");
        }
        self.in_progress = Some(StrokeBuilder::new(tool, style, point));
        self.events.emit(DocumentEvent::GestureStarted { tool });
    }

    /// Add `point` to the in-progress stroke.
    ///
    /// For the eraser every call immediately appends the segment from the previous
    /// point to `point` to the live stroke list (not to history) and starts a new
    /// segment at `point`.
    pub fn extend_gesture(&mut self, point: Pos2) {
        let Some(builder) = self.in_progress.as_mut() else {
            log::debug!("Ignoring gesture move without an active gesture");
            return;
        };

        builder.add_point(point);

        if builder.tool() == Tool::Eraser {
            let segment = builder.to_stroke_ref();
            let style = *builder.style();
            self.strokes.push(segment);
            self.in_progress = Some(StrokeBuilder::new(Tool::Eraser, style, point));
            self.events.emit(DocumentEvent::EraserSegmentAdded {
                stroke_count: self.strokes.len(),
            });
        }
    }

    /// Finish the in-progress stroke and commit a new history snapshot.
    /// Does nothing when no gesture is active.
    pub fn end_gesture(&mut self, point: Pos2) {
        let Some(mut builder) = self.in_progress.take() else {
            log::debug!("Ignoring gesture end without an active gesture");
            return;
        };

        // Eraser segments were appended while moving
        if builder.tool() != Tool::Eraser {
            builder.finish_at(point);
            self.strokes.push(builder.to_stroke_ref());
        }

        self.commit();
    }

    fn commit(&mut self) {
        self.history.commit(Snapshot::new(&self.strokes));
        log::info!(
            "Committed snapshot {} ({} strokes)",
            self.history.index(),
            self.strokes.len()
        );
        self.events.emit(DocumentEvent::StrokeCommitted {
            stroke_count: self.strokes.len(),
            history_len: self.history.len(),
        });
    }

    fn abandon_gesture(&mut self) {
        let Some(builder) = self.in_progress.take() else {
            return;
        };
        if builder.tool() == Tool::Eraser {
            // Segments of an unfinished erase never reached history
            self.strokes = self.history.current().to_vec();
            log::debug!("Dropped uncommitted eraser segments");
        }
        self.events.emit(DocumentEvent::GestureAbandoned);
    }

    // Tool and style

    /// Switch tools. Any half-drawn stroke is abandoned.
    pub fn set_tool(&mut self, tool: Tool) {
        self.abandon_gesture();
        let old = self.tools.active;
        self.tools.set_active(tool);
        self.events.emit(DocumentEvent::ToolChanged { old, new: tool });
    }

    /// Replace the paint style used by future non-eraser strokes
    pub fn set_paint_style(&mut self, style: PaintStyle) {
        self.tools.paint = style;
        self.events.emit(DocumentEvent::PaintStyleChanged(style));
    }

    pub fn set_brush_style(&mut self, brush: BrushStyle) {
        self.set_paint_style(self.tools.paint.with_brush(brush));
    }

    pub fn set_brush_width(&mut self, width: f32) {
        self.set_paint_style(self.tools.paint.with_width(width));
    }

    /// Pick a paint color. Choosing a color while erasing returns to the last
    /// drawing tool.
    pub fn set_color(&mut self, color: Color32) {
        if self.tools.is_erasing() {
            self.set_tool(self.tools.last_drawing_tool);
        }
        self.set_paint_style(self.tools.paint.with_color(color));
    }

    /// Restore previously saved tool settings
    pub fn set_tool_state(&mut self, state: ToolState) {
        self.abandon_gesture();
        let old = self.tools.active;
        self.tools = state;
        self.events.emit(DocumentEvent::ToolChanged { old, new: state.active });
        self.events.emit(DocumentEvent::PaintStyleChanged(state.paint));
    }

    /// Style the next stroke will use: the eraser style or the derived paint style
    pub fn active_stroke_style(&self) -> StrokeStyle {
        if self.tools.is_erasing() {
            StrokeStyle::eraser(self.background_color, self.tools.eraser_width)
        } else {
            self.tools.paint.stroke_style()
        }
    }

    // Document-wide operations

    /// Remove all strokes, history and the background image
    pub fn clear(&mut self) {
        self.in_progress = None;
        self.strokes.clear();
        self.history.clear();
        self.background = None;
        log::info!("Document cleared");
        self.events.emit(DocumentEvent::Cleared);
    }

    /// Step back to the previous snapshot. Returns `false` if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => {
                self.strokes = snapshot.to_vec();
                self.after_history_move();
                true
            }
            None => false,
        }
    }

    /// Step forward to the next snapshot. Returns `false` if there was nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                self.strokes = snapshot.to_vec();
                self.after_history_move();
                true
            }
            None => false,
        }
    }

    fn after_history_move(&mut self) {
        self.abandon_gesture();
        log::debug!("History moved to {}/{}", self.history.index(), self.history.len());
        self.events.emit(DocumentEvent::HistoryMoved {
            index: self.history.index(),
            len: self.history.len(),
        });
    }

    /// Replace (or remove) the background image. Not recorded in history.
    pub fn set_background_image(&mut self, image: Option<BackgroundImage>) {
        let size = image.as_ref().map(BackgroundImage::size);
        self.background = image;
        match size {
            Some([w, h]) => log::info!("Background image set ({}x{})", w, h),
            None => log::info!("Background image removed"),
        }
        self.events.emit(DocumentEvent::BackgroundChanged { size });
    }

    // Accessors

    /// Committed strokes, oldest first, including eraser segments of the current gesture
    pub fn strokes(&self) -> &[StrokeRef] {
        &self.strokes
    }

    /// The stroke currently being drawn, if any
    pub fn in_progress_stroke(&self) -> Option<Stroke> {
        self.in_progress.as_ref().map(StrokeBuilder::to_stroke)
    }

    pub fn is_gesture_active(&self) -> bool {
        self.in_progress.is_some()
    }

    pub fn tool_state(&self) -> &ToolState {
        &self.tools
    }

    pub fn active_tool(&self) -> Tool {
        self.tools.active
    }

    pub fn paint_style(&self) -> PaintStyle {
        self.tools.paint
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn background(&self) -> Option<&BackgroundImage> {
        self.background.as_ref()
    }

    pub fn background_color(&self) -> Color32 {
        self.background_color
    }

    /// Snapshot of the visible state for renderers and export
    pub fn frame(&self) -> RenderFrame<'_> {
        RenderFrame {
            background_color: self.background_color,
            background: self.background.as_ref(),
            strokes: &self.strokes,
            in_progress: self.in_progress_stroke(),
        }
    }
}
