//! Event types for a capture session
//!
//! This module contains:
//! - SessionEvent enum with nested sub-enums grouped by source
//! - Convenience constructors for the common events

use crate::domain::{CaptureEvent, DrawState, ElementRect, ImageBuffer, Position, ScreenshotType, Size};
use crate::draw_toolbar::KeyEventKey;
use crate::session::shortcuts::KeyChord;

// ============================================================================
// Capture Lifecycle Types
// ============================================================================

/// Events reported by the capture host
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureMsg {
    /// Capture lifecycle notification
    Event(CaptureEvent),
    /// How the session was started
    ScreenshotType(ScreenshotType),
    /// Captured image metadata became available or went away
    ImageBuffer(Option<ImageBuffer>),
    /// Selection rectangle changed (monitor pixels)
    Selection(ElementRect),
}

// ============================================================================
// Toolbar Types
// ============================================================================

/// Drag handle pointer actions
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragAction {
    /// Pointer pressed on the handle
    Start(Position),
    /// Pointer moved while held
    Move(Position),
    /// Pointer released
    End,
}

/// Toolbar interaction messages
#[derive(Debug, Clone, PartialEq)]
pub enum ToolbarMsg {
    /// Enable or disable the whole toolbar
    Enable(bool),
    /// Select a tool directly, bypassing button enablement
    ToolClick(DrawState),
    /// Button pressed in the view
    Press(KeyEventKey),
    /// Keyboard chord pressed
    Key(KeyChord),
    /// Drag handle actions
    Drag(DragAction),
    /// Pointer entered (true) or left (false) the toolbar
    Hover(bool),
}

// ============================================================================
// Layout Types
// ============================================================================

/// Measurements reported back by the view
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayoutMsg {
    /// Size of the resize readout label after layout
    ReadoutLabel(Option<Size>),
    /// Logical size of the output the session covers
    Viewport(Option<Size>),
}

// ============================================================================
// Main Event Enum
// ============================================================================

/// Everything that can happen to a capture session
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Capture(CaptureMsg),
    Toolbar(ToolbarMsg),
    Layout(LayoutMsg),
}

// ============================================================================
// Convenience Constructors
// ============================================================================

impl SessionEvent {
    // Capture shortcuts
    pub fn ready() -> Self {
        Self::Capture(CaptureMsg::Event(CaptureEvent::Ready))
    }
    pub fn load() -> Self {
        Self::Capture(CaptureMsg::Event(CaptureEvent::Load))
    }
    pub fn finish() -> Self {
        Self::Capture(CaptureMsg::Event(CaptureEvent::Finish))
    }
    pub fn screenshot_type(screenshot_type: ScreenshotType) -> Self {
        Self::Capture(CaptureMsg::ScreenshotType(screenshot_type))
    }
    pub fn image_buffer(buffer: Option<ImageBuffer>) -> Self {
        Self::Capture(CaptureMsg::ImageBuffer(buffer))
    }
    pub fn selection(rect: ElementRect) -> Self {
        Self::Capture(CaptureMsg::Selection(rect))
    }

    // Toolbar shortcuts
    pub fn enable(enable: bool) -> Self {
        Self::Toolbar(ToolbarMsg::Enable(enable))
    }
    pub fn tool_click(state: DrawState) -> Self {
        Self::Toolbar(ToolbarMsg::ToolClick(state))
    }
    pub fn press(key: KeyEventKey) -> Self {
        Self::Toolbar(ToolbarMsg::Press(key))
    }
    pub fn key(chord: KeyChord) -> Self {
        Self::Toolbar(ToolbarMsg::Key(chord))
    }
    pub fn drag_start(x: f64, y: f64) -> Self {
        Self::Toolbar(ToolbarMsg::Drag(DragAction::Start(Position::new(x, y))))
    }
    pub fn drag_move(x: f64, y: f64) -> Self {
        Self::Toolbar(ToolbarMsg::Drag(DragAction::Move(Position::new(x, y))))
    }
    pub fn drag_end() -> Self {
        Self::Toolbar(ToolbarMsg::Drag(DragAction::End))
    }
    pub fn hover(is_hovered: bool) -> Self {
        Self::Toolbar(ToolbarMsg::Hover(is_hovered))
    }

    // Layout shortcuts
    pub fn readout_label(size: Option<Size>) -> Self {
        Self::Layout(LayoutMsg::ReadoutLabel(size))
    }
    pub fn viewport(size: Option<Size>) -> Self {
        Self::Layout(LayoutMsg::Viewport(size))
    }

    /// Whether the user asked for a tool or action, as opposed to pointer
    /// tracking and layout feedback
    pub fn is_command(&self) -> bool {
        matches!(
            self,
            Self::Toolbar(ToolbarMsg::ToolClick(_) | ToolbarMsg::Press(_) | ToolbarMsg::Key(_))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_are_tool_and_key_events() {
        assert!(SessionEvent::press(KeyEventKey::RectTool).is_command());
        assert!(SessionEvent::tool_click(DrawState::ScrollScreenshot).is_command());
        assert!(SessionEvent::key(KeyChord::new("z").ctrl()).is_command());
    }

    #[test]
    fn test_pointer_and_layout_events_are_not_commands() {
        assert!(!SessionEvent::hover(true).is_command());
        assert!(!SessionEvent::hover(false).is_command());
        assert!(!SessionEvent::drag_move(4.0, 2.0).is_command());
        assert!(!SessionEvent::enable(true).is_command());
        assert!(!SessionEvent::ready().is_command());
        assert!(!SessionEvent::viewport(None).is_command());
    }
}
