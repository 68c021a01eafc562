//! Selection editing session
//!
//! This module contains:
//! - Message types for selection interactions (messages.rs)
//! - The pointer-driven selection state machine (state.rs)
//! - The per-image session tying geometry, history and cropping together (editor.rs)

pub mod editor;
pub mod messages;
pub mod state;

pub use editor::{EditorSession, Extraction};
pub use messages::{Msg, PointerEvent};
pub use state::{Phase, SelectionState};
