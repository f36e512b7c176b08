//! Draw state and capture session phase types

use serde::{Deserialize, Serialize};

/// The active annotation tool or mode of a capture session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DrawState {
    /// Nothing selected, the selection can be moved/resized
    #[default]
    Idle,
    /// Select and move existing annotations
    Select,
    Rect,
    Diamond,
    Ellipse,
    Arrow,
    Line,
    Pen,
    Text,
    Blur,
    Eraser,
    OcrDetect,
    /// Extra tools drawer (QR scanning lives here)
    ExtraTools,
    ScrollScreenshot,
    Fixed,
    Save,
    Cancel,
    Copy,
    ScanQrcode,
}

impl DrawState {
    /// Shape tools that are mutually exclusive with scroll-screenshot mode
    pub const SHAPE_TOOLS: [DrawState; 9] = [
        DrawState::Rect,
        DrawState::Diamond,
        DrawState::Ellipse,
        DrawState::Arrow,
        DrawState::Line,
        DrawState::Pen,
        DrawState::Text,
        DrawState::Blur,
        DrawState::Eraser,
    ];

    /// Coarse session phase implied by this draw state
    pub fn capture_step(self) -> CaptureStep {
        if self == DrawState::Idle {
            CaptureStep::Select
        } else {
            CaptureStep::Draw
        }
    }

    /// Canvas configuration for this state.
    ///
    /// Returns `(canvas_enabled, tool)`, or `None` when the state leaves the
    /// canvas untouched.
    pub fn canvas_tool(self) -> Option<(bool, ActiveTool)> {
        let shape = |kind| Some((true, ActiveTool::locked(kind)));
        match self {
            DrawState::Idle | DrawState::ExtraTools | DrawState::OcrDetect => {
                Some((false, ActiveTool::new(ToolKind::Hand)))
            }
            DrawState::Select => Some((true, ActiveTool::new(ToolKind::Selection))),
            DrawState::Rect => shape(ToolKind::Rectangle),
            DrawState::Diamond => shape(ToolKind::Diamond),
            DrawState::Ellipse => shape(ToolKind::Ellipse),
            DrawState::Arrow => shape(ToolKind::Arrow),
            DrawState::Line => shape(ToolKind::Line),
            DrawState::Pen => shape(ToolKind::Freedraw),
            DrawState::Text => shape(ToolKind::Text),
            DrawState::Blur => shape(ToolKind::Blur),
            DrawState::Eraser => shape(ToolKind::Eraser),
            DrawState::ScrollScreenshot
            | DrawState::Fixed
            | DrawState::Save
            | DrawState::Cancel
            | DrawState::Copy
            | DrawState::ScanQrcode => None,
        }
    }
}

/// Coarse capture session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureStep {
    /// Choosing the capture region
    #[default]
    Select,
    /// Annotating the captured region
    Draw,
}

/// How the capture session was started
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScreenshotType {
    #[default]
    Default,
    /// Pin the capture to the screen right away
    Fixed,
    /// Run text recognition right away
    OcrDetect,
    /// Capture the top-most window
    TopWindow,
}

/// Capture lifecycle notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureEvent {
    /// Capture surfaces are ready for interaction
    Ready,
    /// The captured image finished loading
    Load,
    /// The session is finishing
    Finish,
}

/// Canvas tool kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Hand,
    Selection,
    Rectangle,
    Diamond,
    Ellipse,
    Arrow,
    Line,
    Freedraw,
    Text,
    Blur,
    Eraser,
}

/// Tool descriptor handed to the drawing canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveTool {
    pub kind: ToolKind,
    /// Keep the tool selected after each finished shape
    pub locked: bool,
}

impl ActiveTool {
    pub fn new(kind: ToolKind) -> Self {
        Self {
            kind,
            locked: false,
        }
    }

    pub fn locked(kind: ToolKind) -> Self {
        Self { kind, locked: true }
    }
}

/// Captured image metadata
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    /// Display scale of the monitor the image was captured from
    pub monitor_scale_factor: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_step_from_state() {
        assert_eq!(DrawState::Idle.capture_step(), CaptureStep::Select);
        assert_eq!(DrawState::Select.capture_step(), CaptureStep::Draw);
        assert_eq!(DrawState::ScrollScreenshot.capture_step(), CaptureStep::Draw);
    }

    #[test]
    fn test_shape_tools_are_locked() {
        for state in DrawState::SHAPE_TOOLS {
            let (enabled, tool) = state.canvas_tool().unwrap();
            assert!(enabled);
            assert!(tool.locked, "{state:?} should lock its tool");
        }
    }

    #[test]
    fn test_pen_maps_to_freedraw() {
        assert_eq!(
            DrawState::Pen.canvas_tool(),
            Some((true, ActiveTool::locked(ToolKind::Freedraw)))
        );
    }

    #[test]
    fn test_hand_states_disable_canvas() {
        for state in [DrawState::Idle, DrawState::ExtraTools, DrawState::OcrDetect] {
            assert_eq!(
                state.canvas_tool(),
                Some((false, ActiveTool::new(ToolKind::Hand)))
            );
        }
        assert_eq!(DrawState::ScrollScreenshot.canvas_tool(), None);
        assert_eq!(DrawState::ScanQrcode.canvas_tool(), None);
    }
}
