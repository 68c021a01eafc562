//! Selection tool mode and the undo/redo log of selection edits

use super::geometry::Rect;

/// What a pointer drag produces
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionMode {
    /// Drag draws a selection rectangle
    #[default]
    Select,
    /// Selection is cleared; drags do nothing
    Erase,
}

/// Linear undo/redo history of selection rectangles
///
/// `index` points at the entry describing the current selection. `None`
/// means no selection is active. Committing after an undo drops every entry
/// past the current index.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectionHistory {
    entries: Vec<Rect>,
    index: Option<usize>,
}

impl SelectionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new selection state, truncating any redo tail
    pub fn commit(&mut self, rect: Rect) {
        let keep = self.index.map_or(0, |i| i + 1);
        self.entries.truncate(keep);
        self.entries.push(rect);
        self.index = Some(self.entries.len() - 1);
    }

    /// Step back one entry
    ///
    /// Returns the selection now current, or `None` if there was nothing to
    /// undo. Undoing the first entry yields the empty rectangle.
    pub fn undo(&mut self) -> Option<Rect> {
        match self.index? {
            0 => {
                self.index = None;
                Some(Rect::EMPTY)
            }
            i => {
                self.index = Some(i - 1);
                Some(self.entries[i - 1])
            }
        }
    }

    /// Step forward one entry, or `None` if already at the newest
    pub fn redo(&mut self) -> Option<Rect> {
        let next = self.index.map_or(0, |i| i + 1);
        let rect = *self.entries.get(next)?;
        self.index = Some(next);
        Some(rect)
    }

    pub fn can_undo(&self) -> bool {
        self.index.is_some()
    }

    pub fn can_redo(&self) -> bool {
        self.index.map_or(0, |i| i + 1) < self.entries.len()
    }

    /// Current position, `None` when no selection is active
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Selection described by the current position
    pub fn current(&self) -> Rect {
        self.index.map_or(Rect::EMPTY, |i| self.entries[i])
    }
}
