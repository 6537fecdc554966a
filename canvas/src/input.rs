//! Input model: tools, modifier keys, mouse buttons, and the gesture state machine.
//!
//! `Tool` and `Modifiers` capture the user's intent at the time of a pointer
//! event. `InteractionState` is the active gesture being tracked between
//! pointer-down and pointer-up (or text-input blur), carrying the context
//! needed to compute each pointer-move. It is never persisted.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::element::ElementId;
use crate::transform::Point;

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Pointer / selection tool (default).
    #[default]
    Selection,
    /// Drag to pan the canvas.
    Hand,
    /// Draw a rectangle.
    Rect,
    /// Draw a freehand stroke.
    Pencil,
    /// Place a text label.
    Text,
}

impl Tool {
    pub const ALL: [Tool; 5] = [Tool::Selection, Tool::Hand, Tool::Rect, Tool::Pencil, Tool::Text];

    /// Name used by the toolbar and the storage format.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Selection => "selection",
            Self::Hand => "hand",
            Self::Rect => "rect",
            Self::Pencil => "pencil",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a toolbar name doesn't match any tool.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tool: {0:?}")]
pub struct ParseToolError(pub String);

impl FromStr for Tool {
    type Err = ParseToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tool::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ParseToolError(s.to_string()))
    }
}

/// Keyboard modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl or Meta: browsers report trackpad pinch as a ctrl+wheel.
    #[must_use]
    pub fn is_pinch(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` code.
    #[must_use]
    pub fn from_dom(code: i16) -> Self {
        match code {
            1 => Self::Middle,
            2 => Self::Secondary,
            _ => Self::Primary,
        }
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy, Default)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// Persistent UI state visible to the renderer and the toolbar.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Currently active tool.
    pub tool: Tool,
}

/// Gesture state for the interaction state machine.
///
/// Each active variant carries the context needed to handle pointer-move.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InteractionState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// Dragging the view.
    Panning {
        /// Pointer screen position minus the offset at gesture start.
        anchor: Point,
    },
    /// Growing a new rectangle or extending a new stroke.
    Drawing {
        /// Id of the in-progress element; always the last element in the store.
        id: ElementId,
    },
    /// Dragging a selected rectangle.
    Moving {
        id: ElementId,
        /// Pointer world position minus element origin at gesture start.
        drag_offset: Point,
    },
    /// Waiting for the text overlay to lose focus.
    Writing {
        /// Where the overlay is shown, in screen pixels.
        screen: Point,
        /// Where the text element will be anchored.
        world: Point,
    },
}

/// Payload-free view of [`InteractionState`] for hosts and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Idle,
    Panning,
    Drawing,
    Moving,
    Writing,
}

impl Mode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Panning => "panning",
            Self::Drawing => "drawing",
            Self::Moving => "moving",
            Self::Writing => "writing",
        }
    }
}

impl InteractionState {
    #[must_use]
    pub fn mode(&self) -> Mode {
        match self {
            Self::Idle => Mode::Idle,
            Self::Panning { .. } => Mode::Panning,
            Self::Drawing { .. } => Mode::Drawing,
            Self::Moving { .. } => Mode::Moving,
            Self::Writing { .. } => Mode::Writing,
        }
    }

    #[must_use]
    pub fn is_writing(&self) -> bool {
        matches!(self, Self::Writing { .. })
    }
}
