//! Pointer-driven selection state machine

use crate::domain::{InteractionMode, Rect, SelectionHistory};

/// Where the selection interaction currently is
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Phase {
    #[default]
    Idle,
    /// Button held; the live rectangle spans from `anchor` to the pointer
    Drawing { anchor: (f32, f32) },
    /// An extraction is in flight; all edits are ignored
    Locked,
}

/// Tool mode, live rectangle and phase of the selection interaction
///
/// Every transition returns whether observable state changed, so callers
/// know when to repaint.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectionState {
    phase: Phase,
    mode: InteractionMode,
    current: Rect,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    /// Rectangle currently shown, possibly mid-drag
    pub fn current(&self) -> Rect {
        self.current
    }

    pub fn is_locked(&self) -> bool {
        self.phase == Phase::Locked
    }

    /// Start a drag in select mode
    pub fn pointer_down(&mut self, x: f32, y: f32) -> bool {
        if self.phase != Phase::Idle || self.mode != InteractionMode::Select {
            return false;
        }
        self.phase = Phase::Drawing { anchor: (x, y) };
        self.current = Rect::new(x, y, 0.0, 0.0);
        true
    }

    /// Recompute the live rectangle from the anchor and the pointer
    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        let Phase::Drawing { anchor } = self.phase else {
            return false;
        };
        let rect = Rect::from_points(anchor, (x, y));
        if rect == self.current {
            return false;
        }
        self.current = rect;
        true
    }

    /// Finish a drag, committing the rectangle if it has area
    ///
    /// Used for both button release and the pointer leaving the surface.
    pub fn pointer_up(&mut self, history: &mut SelectionHistory) -> bool {
        if !matches!(self.phase, Phase::Drawing { .. }) {
            return false;
        }
        self.phase = Phase::Idle;
        if !self.current.is_empty() {
            log::debug!("Committing selection {:?}", self.current);
            history.commit(self.current);
        }
        true
    }

    /// Change tool
    ///
    /// Switching to erase clears the selection and records the cleared state
    /// in history, so erasing can itself be undone.
    pub fn switch_tool(&mut self, mode: InteractionMode, history: &mut SelectionHistory) -> bool {
        if self.is_locked() {
            return false;
        }
        self.phase = Phase::Idle;
        self.mode = mode;
        if mode == InteractionMode::Erase {
            self.current = Rect::EMPTY;
            history.commit(Rect::EMPTY);
        }
        true
    }

    pub fn undo(&mut self, history: &mut SelectionHistory) -> bool {
        if self.is_locked() {
            return false;
        }
        self.phase = Phase::Idle;
        match history.undo() {
            Some(rect) => {
                self.current = rect;
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self, history: &mut SelectionHistory) -> bool {
        if self.is_locked() {
            return false;
        }
        self.phase = Phase::Idle;
        match history.redo() {
            Some(rect) => {
                self.current = rect;
                true
            }
            None => false,
        }
    }

    /// Enter the locked phase from any phase, abandoning a drag in progress
    pub fn begin_processing(&mut self) {
        self.phase = Phase::Locked;
    }

    /// Leave the locked phase; the selection is left as it was
    pub fn end_processing(&mut self) {
        if self.is_locked() {
            self.phase = Phase::Idle;
        }
    }
}
