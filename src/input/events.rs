use crate::core::geo::Point;
use crate::core::viewport::OverlayKind;
use serde::{Deserialize, Serialize};

/// Input events the viewer reacts to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Keyboard input
    KeyPress { key: KeyCode },
    /// Single click on the window, position relative to the window's top-left corner
    Click {
        position: Point,
        button: MouseButton,
    },
    /// Search text submitted from the search box
    Search { query: String },
    /// Overlay radio button chosen
    SelectOverlay { kind: OverlayKind },
    /// Reset button pressed
    ResetSearch,
    /// Postal code checkbox changed
    TogglePostalCode { enabled: bool },
}

/// Keyboard keys the viewer binds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    PageUp,
    PageDown,
    W,
    A,
    S,
    D,
    Other(u32),
}

/// Mouse button types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}
