#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod background;
pub mod command;
pub mod components;
pub mod config;
pub mod document;
pub mod error;
pub mod event;
pub mod file_handler;
pub mod geometry;
pub mod history;
pub mod input;
pub mod notifications;
pub mod panels;
pub mod raster;
pub mod renderer;
pub mod stroke;
pub mod style;
pub mod tools;
pub mod util;

pub use app::PaintApp;
pub use background::BackgroundImage;
pub use command::Command;
pub use config::CanvasConfig;
pub use document::{Document, RenderFrame};
pub use error::{CanvasError, CanvasResult};
pub use event::{DocumentEvent, EventHandler};
pub use history::{History, Snapshot};
pub use input::{InputEvent, InputInterpreter, InputLocation, InputResponse, InputState};
pub use renderer::Renderer;
pub use stroke::{Geometry, Stroke, StrokeBuilder, StrokeRef};
pub use style::{BrushStyle, CapStyle, PaintStyle, StrokeStyle};
pub use tools::{Tool, ToolState};
