//! Drag handle that lets the user move the toolbar away from its anchor

use crate::domain::Position;

/// Pointer tracking for the toolbar drag handle
#[derive(Debug, Clone, Default)]
pub struct DragButton {
    enabled: bool,
    /// Pointer position and offset at the moment the drag started
    grab: Option<(Position, Position)>,
    /// Accumulated user displacement from the anchored position
    offset: Position,
}

impl DragButton {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_enable(&mut self, enable: bool) {
        self.enabled = enable;
        if !enable {
            self.grab = None;
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_dragging(&self) -> bool {
        self.grab.is_some()
    }

    pub fn offset(&self) -> Position {
        self.offset
    }

    /// Forget any user displacement, e.g. when a new capture starts
    pub fn reset(&mut self) {
        self.grab = None;
        self.offset = Position::default();
    }

    /// Start dragging. Returns `false` when the handle is disabled.
    pub fn pointer_down(&mut self, pointer: Position) -> bool {
        if !self.enabled {
            return false;
        }
        self.grab = Some((pointer, self.offset));
        true
    }

    /// Track the pointer. Returns the new offset while dragging.
    pub fn pointer_move(&mut self, pointer: Position) -> Option<Position> {
        let (start, start_offset) = self.grab?;
        self.offset = start_offset.offset(pointer.delta(start));
        Some(self.offset)
    }

    /// Stop dragging. Returns `true` if a drag was in progress.
    pub fn pointer_up(&mut self) -> bool {
        self.grab.take().is_some()
    }
}
