//! Message types for an editing session
//!
//! A rendering layer translates its toolkit's input events into these and
//! feeds them to [`EditorSession::update`](super::EditorSession::update).

use crate::domain::InteractionMode;

/// Pointer input in display-space pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Primary button pressed at position
    Down(f32, f32),
    /// Pointer moved to position
    Move(f32, f32),
    /// Primary button released
    Up,
    /// Pointer left the drawing surface
    Leave,
}

/// Selection editing messages
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Msg {
    Pointer(PointerEvent),
    /// Switch tool; switching to erase clears the selection
    SetTool(InteractionMode),
    /// Undo last selection edit
    Undo,
    /// Redo undone selection edit
    Redo,
}

impl From<PointerEvent> for Msg {
    fn from(event: PointerEvent) -> Self {
        Msg::Pointer(event)
    }
}
