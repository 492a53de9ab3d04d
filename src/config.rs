use egui::Color32;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::CanvasResult;
use crate::style::{DEFAULT_WIDTH, ERASER_WIDTH, PaintStyle};
use crate::tools::ToolState;

/// Environment variable naming the JSON config file read by the app
pub const CONFIG_ENV_VAR: &str = "SKETCH_CANVAS_CONFIG";

/// Canvas settings loaded at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // missing fields fall back to their defaults
pub struct CanvasConfig {
    /// Canvas fill color; the eraser paints with it too
    pub background_color: Color32,
    pub default_color: Color32,
    pub default_width: f32,
    pub eraser_width: f32,
    pub min_width: f32,
    pub max_width: f32,
    /// Maximum number of history snapshots, unbounded when `None`
    pub history_limit: Option<usize>,
    /// Directory PNG exports are written to
    pub export_dir: Option<PathBuf>,
    /// Fixed export size; the current canvas size is used when `None`
    pub export_size: Option<[u32; 2]>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            background_color: Color32::WHITE,
            default_color: Color32::BLACK,
            default_width: DEFAULT_WIDTH,
            eraser_width: ERASER_WIDTH,
            min_width: 1.0,
            max_width: 100.0,
            history_limit: None,
            export_dir: None,
            export_size: None,
        }
    }
}

impl CanvasConfig {
    /// Read a config from a JSON file
    pub fn load(path: impl AsRef<Path>) -> CanvasResult<Self> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Load the file named by [`CONFIG_ENV_VAR`], falling back to defaults
    pub fn from_env() -> Self {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load(&path).unwrap_or_else(|err| {
                log::warn!(
                    "Could not load config from {}: {}; using defaults",
                    Path::new(&path).display(),
                    err
                );
                Self::default()
            }),
            None => Self::default(),
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> CanvasResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn export_dir(&self) -> PathBuf {
        self.export_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("pictures"))
    }

    /// Tool state a fresh session starts with
    pub fn initial_tool_state(&self) -> ToolState {
        let paint = PaintStyle::default()
            .with_color(self.default_color)
            .with_width(self.clamp_width(self.default_width));
        ToolState {
            paint,
            ..ToolState::default()
        }
        .with_eraser_width(self.eraser_width)
    }

    pub fn clamp_width(&self, width: f32) -> f32 {
        width.clamp(self.min_width, self.max_width)
    }
}
