use egui::{Key, Modifiers, Painter, Rect};
use std::path::PathBuf;

use crate::command::Command;
use crate::config::CanvasConfig;
use crate::document::Document;
use crate::error::CanvasResult;
use crate::event::{DocumentEvent, EventHandler, LogEventHandler};
use crate::file_handler::{self, FileHandler};
use crate::input::{InputEvent, InputHandler, InputInterpreter};
use crate::notifications::Notifications;
use crate::panels::{central_panel, tools_panel};
use crate::renderer::Renderer;
use crate::tools::ToolState;

/// Storage key for the persisted tool and brush selection
const TOOL_STATE_KEY: &str = "sketch_canvas_tools";

/// Requests a repaint whenever the document changes
struct RepaintHandler {
    ctx: egui::Context,
}

impl EventHandler for RepaintHandler {
    fn handle_event(&mut self, _event: &DocumentEvent) {
        self.ctx.request_repaint();
    }
}

/// The drawing application: the document plus everything that connects it to
/// the window.
pub struct PaintApp {
    document: Document,
    config: CanvasConfig,
    interpreter: InputInterpreter,
    input_handler: InputHandler,
    renderer: Renderer,
    file_handler: FileHandler,
    notifications: Notifications,
    canvas_rect: Rect,
    /// Physical pixels per egui point for the canvas' screen
    pixels_per_point: f32,
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: CanvasConfig) -> Self {
        let mut app = Self::with_config(config);

        if let Some(storage) = cc.storage {
            if let Some(state) = eframe::get_value::<ToolState>(storage, TOOL_STATE_KEY) {
                app.restore_tool_state(state);
            }
        }

        app.document.subscribe(Box::new(RepaintHandler {
            ctx: cc.egui_ctx.clone(),
        }));
        app
    }

    /// App without a window, used by [`PaintApp::new`] and tests
    pub fn with_config(config: CanvasConfig) -> Self {
        let document = Document::with_config(&config);
        document.subscribe(Box::new(LogEventHandler));

        Self {
            document,
            config,
            interpreter: InputInterpreter::new(),
            input_handler: InputHandler::new(Rect::ZERO),
            renderer: Renderer::new(),
            file_handler: FileHandler::new(),
            notifications: Notifications::new(),
            canvas_rect: Rect::ZERO,
            pixels_per_point: 1.0,
        }
    }

    /// Apply tool settings saved by a previous run. The configured eraser width
    /// and width limits win over the saved values.
    pub fn restore_tool_state(&mut self, state: ToolState) {
        let mut state = state.with_eraser_width(self.config.eraser_width);
        state.paint.width = self.config.clamp_width(state.paint.width);
        log::info!("Restored tool state: {:?}", state.active);
        self.document.set_tool_state(state);
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn notifications_mut(&mut self) -> &mut Notifications {
        &mut self.notifications
    }

    /// Record where the canvas is on screen and how many physical pixels make up
    /// one point there
    pub fn set_canvas(&mut self, canvas_rect: Rect, pixels_per_point: f32) {
        self.canvas_rect = canvas_rect;
        self.pixels_per_point = pixels_per_point;
        self.input_handler.set_canvas_rect(canvas_rect);
    }

    pub fn pixels_per_point(&self) -> f32 {
        self.pixels_per_point
    }

    /// Canvas size in whole physical pixels
    pub fn canvas_size(&self) -> [u32; 2] {
        let size = self.canvas_rect.size() * self.pixels_per_point;
        [size.x.max(0.0).round() as u32, size.y.max(0.0).round() as u32]
    }

    /// Run a command against the document. Returns whether anything changed.
    pub fn execute_command(&mut self, command: Command, now: f64) -> bool {
        log::info!("Executing command: {}", command);
        let changed = command.execute(&mut self.document);

        // Undo, redo, clear and tool switches drop the gesture under the finger
        if !self.document.is_gesture_active() {
            self.interpreter.reset();
        }

        if changed {
            if let Some(message) = command.notification() {
                self.notifications.push(message, now);
            }
        }
        changed
    }

    /// Feed this frame's pointer and key input through the gesture interpreter
    pub fn handle_input(&mut self, ctx: &egui::Context, canvas_rect: Rect) {
        self.set_canvas(canvas_rect, ctx.pixels_per_point());
        let now = ctx.input(|i| i.time);

        for event in self.input_handler.process_input(ctx) {
            let response = self.interpreter.handle_event(&event, &mut self.document);
            if response.needs_redraw() {
                ctx.request_repaint();
            }
            if response.is_handled() {
                continue;
            }
            if let InputEvent::KeyDown { key, modifiers } = event {
                if let Some(command) = shortcut_command(key, modifiers) {
                    self.execute_command(command, now);
                }
            }
        }
    }

    /// Draw the document into the canvas area
    pub fn render(&mut self, ctx: &egui::Context, painter: &Painter, canvas_rect: Rect) {
        self.renderer.render(ctx, painter, canvas_rect, &self.document.frame());
    }

    /// Size exported images use: the configured size or the on-screen canvas
    pub fn export_size(&self) -> [u32; 2] {
        self.config.export_size.unwrap_or_else(|| self.canvas_size())
    }

    /// Write the drawing to the export directory as a PNG
    pub fn export(&mut self, now: f64) -> CanvasResult<PathBuf> {
        let result = file_handler::export_to_dir(
            &self.document,
            self.export_size(),
            self.pixels_per_point,
            self.config.export_dir(),
        );
        match &result {
            Ok(path) => self.notifications.push(format!("Saved to {}", path.display()), now),
            Err(err) => self.notifications.push(format!("Export failed: {}", err), now),
        }
        result
    }

    /// Ask the user for an image file and load it as the background.
    /// Does nothing if the dialog is cancelled.
    pub fn pick_background(&mut self, now: f64) {
        let picked = rfd::FileDialog::new()
            .set_title("Load background image")
            .add_filter("Images", file_handler::IMAGE_EXTENSIONS)
            .pick_file();

        match picked {
            Some(path) => {
                if let Err(err) = self.load_background(path, now) {
                    log::warn!("Background not loaded: {}", err);
                }
            }
            None => log::debug!("Background dialog cancelled"),
        }
    }

    /// Load a background image from disk, scaled to the canvas
    pub fn load_background(&mut self, path: impl Into<PathBuf>, now: f64) -> CanvasResult<()> {
        let path = path.into();
        let size = Some(self.canvas_size());
        match file_handler::load_background(&path, size) {
            Ok(image) => {
                self.execute_command(Command::SetBackground(Some(image)), now);
                Ok(())
            }
            Err(err) => {
                self.notifications.push(format!("Could not load {}: {}", path.display(), err), now);
                Err(err)
            }
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        if !self.file_handler.check_for_dropped_files(ctx) {
            return;
        }
        let now = ctx.input(|i| i.time);
        let size = Some(self.canvas_size());

        for result in self.file_handler.process_dropped_files(size) {
            match result {
                Ok(image) => {
                    self.execute_command(Command::SetBackground(Some(image)), now);
                }
                Err(err) => self.notifications.push(format!("Could not load image: {}", err), now),
            }
        }
    }
}

/// Keyboard shortcuts for history navigation
pub fn shortcut_command(key: Key, modifiers: Modifiers) -> Option<Command> {
    if !modifiers.command {
        return None;
    }
    match key {
        Key::Z if modifiers.shift => Some(Command::Redo),
        Key::Z => Some(Command::Undo),
        Key::Y => Some(Command::Redo),
        _ => None,
    }
}

impl eframe::App for PaintApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, TOOL_STATE_KEY, self.document.tool_state());
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);

        tools_panel(self, ctx);
        central_panel(self, ctx);

        self.file_handler.preview_files_being_dropped(ctx);
        self.notifications.show(ctx);
    }
}
