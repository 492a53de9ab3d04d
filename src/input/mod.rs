//! Pointer input and the gesture state machine.
//!
//! ```text
//!   ┌──────┐  PointerDown   ┌─────────┐
//!   │      ├───────────────►│         ├──┐ PointerMove
//!   │ Idle │                │ Drawing │  │ (extend + redraw)
//!   │      │◄───────────────┤         │◄─┘
//!   └──────┘   PointerUp    └─────────┘
//! ```
//!
//! Any event that does not fit this cycle is reported as
//! [`InputResponse::Unhandled`] and leaves the document untouched.

mod handler;

pub use handler::InputHandler;

use egui::{Key, Modifiers, PointerButton, Pos2};

use crate::document::Document;

/// Represents the location where an input event occurred
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputLocation {
    /// The position in canvas coordinates
    pub position: Pos2,
    /// Whether this position is within the canvas bounds
    pub is_in_canvas: bool,
}

impl InputLocation {
    pub fn in_canvas(position: Pos2) -> Self {
        Self {
            position,
            is_in_canvas: true,
        }
    }
}

/// Input events fed to the [`InputInterpreter`]
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer button or touch was pressed
    PointerDown {
        location: InputLocation,
        button: PointerButton,
    },
    /// Pointer moved (with or without buttons pressed)
    PointerMove {
        location: InputLocation,
        /// Buttons that are currently held down
        held_buttons: Vec<PointerButton>,
    },
    /// Pointer button or touch was released
    PointerUp {
        location: InputLocation,
        button: PointerButton,
    },
    /// Key was pressed
    KeyDown { key: Key, modifiers: Modifiers },
}

/// Whether the interpreter is in the middle of a gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputState {
    #[default]
    Idle,
    Drawing,
}

/// Result of feeding one event to the interpreter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResponse {
    /// The event was not part of a gesture; the caller may handle it
    Unhandled,
    /// The event drove the gesture; `redraw` asks for a repaint
    Handled { redraw: bool },
}

impl InputResponse {
    pub fn is_handled(&self) -> bool {
        matches!(self, InputResponse::Handled { .. })
    }

    pub fn needs_redraw(&self) -> bool {
        matches!(self, InputResponse::Handled { redraw: true })
    }
}

/// Turns pointer events into gesture calls on a [`Document`]
#[derive(Debug, Clone, Default)]
pub struct InputInterpreter {
    state: InputState,
    /// Only the primary button draws
    button: Option<PointerButton>,
}

impl InputInterpreter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> InputState {
        self.state
    }

    pub fn is_drawing(&self) -> bool {
        self.state == InputState::Drawing
    }

    /// Drop back to idle without touching the document, e.g. when the document
    /// abandoned the gesture on its own
    pub fn reset(&mut self) {
        self.state = InputState::Idle;
        self.button = None;
    }

    pub fn handle_event(&mut self, event: &InputEvent, document: &mut Document) -> InputResponse {
        match (self.state, event) {
            (InputState::Idle, InputEvent::PointerDown { location, button })
                if *button == PointerButton::Primary && location.is_in_canvas =>
            {
                document.begin_gesture(location.position);
                self.state = InputState::Drawing;
                self.button = Some(*button);
                InputResponse::Handled { redraw: true }
            }
            (InputState::Drawing, InputEvent::PointerMove { location, .. }) => {
                document.extend_gesture(location.position);
                InputResponse::Handled { redraw: true }
            }
            (InputState::Drawing, InputEvent::PointerUp { location, button })
                if Some(*button) == self.button =>
            {
                document.end_gesture(location.position);
                self.reset();
                InputResponse::Handled { redraw: true }
            }
            _ => InputResponse::Unhandled,
        }
    }
}
