//! Toolbar button identities, layout and per-frame button state

use serde::{Deserialize, Serialize};

use crate::domain::DrawState;
use crate::fl;

/// Identity of every toolbar button, also used as its shortcut binding key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum KeyEventKey {
    MoveTool,
    SelectTool,
    RectTool,
    DiamondTool,
    EllipseTool,
    ArrowTool,
    LineTool,
    PenTool,
    TextTool,
    BlurTool,
    EraserTool,
    Undo,
    Redo,
    ExtraToolsTool,
    FixedTool,
    OcrDetectTool,
    ScrollScreenshotTool,
    SaveTool,
    CancelTool,
    CopyTool,
}

/// What pressing a button does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    /// Route through the tool-click state machine
    Tool(DrawState),
    Undo,
    Redo,
    Fixed,
    Save,
    Cancel,
    Copy,
}

impl KeyEventKey {
    pub const ALL: [KeyEventKey; 20] = [
        KeyEventKey::MoveTool,
        KeyEventKey::SelectTool,
        KeyEventKey::RectTool,
        KeyEventKey::DiamondTool,
        KeyEventKey::EllipseTool,
        KeyEventKey::ArrowTool,
        KeyEventKey::LineTool,
        KeyEventKey::PenTool,
        KeyEventKey::TextTool,
        KeyEventKey::BlurTool,
        KeyEventKey::EraserTool,
        KeyEventKey::Undo,
        KeyEventKey::Redo,
        KeyEventKey::ExtraToolsTool,
        KeyEventKey::FixedTool,
        KeyEventKey::OcrDetectTool,
        KeyEventKey::ScrollScreenshotTool,
        KeyEventKey::SaveTool,
        KeyEventKey::CancelTool,
        KeyEventKey::CopyTool,
    ];

    pub fn action(self) -> ButtonAction {
        match self {
            KeyEventKey::MoveTool => ButtonAction::Tool(DrawState::Idle),
            KeyEventKey::SelectTool => ButtonAction::Tool(DrawState::Select),
            KeyEventKey::RectTool => ButtonAction::Tool(DrawState::Rect),
            KeyEventKey::DiamondTool => ButtonAction::Tool(DrawState::Diamond),
            KeyEventKey::EllipseTool => ButtonAction::Tool(DrawState::Ellipse),
            KeyEventKey::ArrowTool => ButtonAction::Tool(DrawState::Arrow),
            KeyEventKey::LineTool => ButtonAction::Tool(DrawState::Line),
            KeyEventKey::PenTool => ButtonAction::Tool(DrawState::Pen),
            KeyEventKey::TextTool => ButtonAction::Tool(DrawState::Text),
            KeyEventKey::BlurTool => ButtonAction::Tool(DrawState::Blur),
            KeyEventKey::EraserTool => ButtonAction::Tool(DrawState::Eraser),
            KeyEventKey::Undo => ButtonAction::Undo,
            KeyEventKey::Redo => ButtonAction::Redo,
            KeyEventKey::ExtraToolsTool => ButtonAction::Tool(DrawState::ExtraTools),
            KeyEventKey::FixedTool => ButtonAction::Fixed,
            KeyEventKey::OcrDetectTool => ButtonAction::Tool(DrawState::OcrDetect),
            KeyEventKey::ScrollScreenshotTool => ButtonAction::Tool(DrawState::ScrollScreenshot),
            KeyEventKey::SaveTool => ButtonAction::Save,
            KeyEventKey::CancelTool => ButtonAction::Cancel,
            KeyEventKey::CopyTool => ButtonAction::Copy,
        }
    }

    /// Draw state that highlights this button, if any
    pub fn draw_state(self) -> Option<DrawState> {
        match self.action() {
            ButtonAction::Tool(state) => Some(state),
            ButtonAction::Fixed => Some(DrawState::Fixed),
            ButtonAction::Save => Some(DrawState::Save),
            ButtonAction::Cancel => Some(DrawState::Cancel),
            ButtonAction::Copy => Some(DrawState::Copy),
            ButtonAction::Undo | ButtonAction::Redo => None,
        }
    }

    /// Sub-states that also highlight this button
    pub fn extra_draw_states(self) -> &'static [DrawState] {
        match self {
            KeyEventKey::ExtraToolsTool => &[DrawState::ScanQrcode],
            _ => &[],
        }
    }

    /// Whether scroll-screenshot mode disables this button
    pub fn disabled_by_scroll_screenshot(self) -> bool {
        !matches!(
            self,
            KeyEventKey::MoveTool
                | KeyEventKey::ScrollScreenshotTool
                | KeyEventKey::SaveTool
                | KeyEventKey::CancelTool
                | KeyEventKey::CopyTool
        )
    }

    pub fn default_chord(self) -> &'static str {
        match self {
            KeyEventKey::MoveTool => "m",
            KeyEventKey::SelectTool => "v",
            KeyEventKey::RectTool => "r",
            KeyEventKey::DiamondTool => "d",
            KeyEventKey::EllipseTool => "o",
            KeyEventKey::ArrowTool => "a",
            KeyEventKey::LineTool => "l",
            KeyEventKey::PenTool => "p",
            KeyEventKey::TextTool => "t",
            KeyEventKey::BlurTool => "b",
            KeyEventKey::EraserTool => "e",
            KeyEventKey::Undo => "ctrl+z",
            KeyEventKey::Redo => "ctrl+y",
            KeyEventKey::ExtraToolsTool => "x",
            KeyEventKey::FixedTool => "f",
            KeyEventKey::OcrDetectTool => "c",
            KeyEventKey::ScrollScreenshotTool => "s",
            KeyEventKey::SaveTool => "ctrl+s",
            KeyEventKey::CancelTool => "escape",
            KeyEventKey::CopyTool => "ctrl+c",
        }
    }

    pub fn icon_name(self) -> &'static str {
        match self {
            KeyEventKey::MoveTool => "object-move-symbolic",
            KeyEventKey::SelectTool => "edit-select-symbolic",
            KeyEventKey::RectTool => "square-symbolic",
            KeyEventKey::DiamondTool => "diamond-symbolic",
            KeyEventKey::EllipseTool => "circle-symbolic",
            KeyEventKey::ArrowTool => "arrow-symbolic",
            KeyEventKey::LineTool => "line-symbolic",
            KeyEventKey::PenTool => "pencil-symbolic",
            KeyEventKey::TextTool => "insert-text-symbolic",
            KeyEventKey::BlurTool => "pixelate-symbolic",
            KeyEventKey::EraserTool => "eraser-symbolic",
            KeyEventKey::Undo => "edit-undo-symbolic",
            KeyEventKey::Redo => "edit-redo-symbolic",
            KeyEventKey::ExtraToolsTool => "view-app-grid-symbolic",
            KeyEventKey::FixedTool => "view-pin-symbolic",
            KeyEventKey::OcrDetectTool => "ocr-symbolic",
            KeyEventKey::ScrollScreenshotTool => "scroll-screenshot-symbolic",
            KeyEventKey::SaveTool => "document-save-symbolic",
            KeyEventKey::CancelTool => "window-close-symbolic",
            KeyEventKey::CopyTool => "edit-copy-symbolic",
        }
    }

    pub fn tooltip(self) -> String {
        match self {
            KeyEventKey::MoveTool => fl!("tool-move"),
            KeyEventKey::SelectTool => fl!("tool-select"),
            KeyEventKey::RectTool => fl!("tool-rect"),
            KeyEventKey::DiamondTool => fl!("tool-diamond"),
            KeyEventKey::EllipseTool => fl!("tool-ellipse"),
            KeyEventKey::ArrowTool => fl!("tool-arrow"),
            KeyEventKey::LineTool => fl!("tool-line"),
            KeyEventKey::PenTool => fl!("tool-pen"),
            KeyEventKey::TextTool => fl!("tool-text"),
            KeyEventKey::BlurTool => fl!("tool-blur"),
            KeyEventKey::EraserTool => fl!("tool-eraser"),
            KeyEventKey::Undo => fl!("tool-undo"),
            KeyEventKey::Redo => fl!("tool-redo"),
            KeyEventKey::ExtraToolsTool => fl!("tool-extra"),
            KeyEventKey::FixedTool => fl!("tool-fixed"),
            KeyEventKey::OcrDetectTool => fl!("tool-ocr"),
            KeyEventKey::ScrollScreenshotTool => fl!("tool-scroll-screenshot"),
            KeyEventKey::SaveTool => fl!("tool-save"),
            KeyEventKey::CancelTool => fl!("tool-cancel"),
            KeyEventKey::CopyTool => fl!("tool-copy"),
        }
    }

    /// Confirmation hint shown next to destructive buttons
    pub fn confirm_tip(self) -> Option<String> {
        match self {
            KeyEventKey::CancelTool => Some(fl!("cancel-confirm-tip")),
            _ => None,
        }
    }

    /// Whether this button is highlighted for the given draw state
    pub fn is_active(self, state: DrawState) -> bool {
        self.draw_state() == Some(state) || self.extra_draw_states().contains(&state)
    }
}

/// One slot in the toolbar row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarItem {
    DragHandle,
    Button(KeyEventKey),
    Splitter,
}

/// Left-to-right toolbar layout
pub const TOOLBAR_LAYOUT: &[ToolbarItem] = &[
    ToolbarItem::DragHandle,
    ToolbarItem::Button(KeyEventKey::MoveTool),
    ToolbarItem::Button(KeyEventKey::SelectTool),
    ToolbarItem::Splitter,
    ToolbarItem::Button(KeyEventKey::RectTool),
    ToolbarItem::Button(KeyEventKey::DiamondTool),
    ToolbarItem::Button(KeyEventKey::EllipseTool),
    ToolbarItem::Button(KeyEventKey::ArrowTool),
    ToolbarItem::Button(KeyEventKey::LineTool),
    ToolbarItem::Button(KeyEventKey::PenTool),
    ToolbarItem::Button(KeyEventKey::TextTool),
    ToolbarItem::Button(KeyEventKey::BlurTool),
    ToolbarItem::Button(KeyEventKey::EraserTool),
    ToolbarItem::Splitter,
    ToolbarItem::Button(KeyEventKey::Undo),
    ToolbarItem::Button(KeyEventKey::Redo),
    ToolbarItem::Splitter,
    ToolbarItem::Button(KeyEventKey::ExtraToolsTool),
    ToolbarItem::Button(KeyEventKey::FixedTool),
    ToolbarItem::Button(KeyEventKey::OcrDetectTool),
    ToolbarItem::Button(KeyEventKey::ScrollScreenshotTool),
    ToolbarItem::Button(KeyEventKey::SaveTool),
    ToolbarItem::Splitter,
    ToolbarItem::Button(KeyEventKey::CancelTool),
    ToolbarItem::Button(KeyEventKey::CopyTool),
];

/// Render-ready state of a single button
#[derive(Debug, Clone, PartialEq)]
pub struct ToolButtonState {
    pub key: KeyEventKey,
    pub icon_name: &'static str,
    pub tooltip: String,
    pub confirm_tip: Option<String>,
    pub active: bool,
    pub disabled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_key_appears_once_in_layout() {
        for key in KeyEventKey::ALL {
            let count = TOOLBAR_LAYOUT
                .iter()
                .filter(|item| **item == ToolbarItem::Button(key))
                .count();
            assert_eq!(count, 1, "{key:?}");
        }
    }

    #[test]
    fn test_extra_tools_active_for_qr_scan() {
        assert!(KeyEventKey::ExtraToolsTool.is_active(DrawState::ExtraTools));
        assert!(KeyEventKey::ExtraToolsTool.is_active(DrawState::ScanQrcode));
        assert!(!KeyEventKey::RectTool.is_active(DrawState::ScanQrcode));
    }

    #[test]
    fn test_scroll_screenshot_leaves_exit_buttons_enabled() {
        let enabled: Vec<_> = KeyEventKey::ALL
            .into_iter()
            .filter(|key| !key.disabled_by_scroll_screenshot())
            .collect();
        assert_eq!(
            enabled,
            vec![
                KeyEventKey::MoveTool,
                KeyEventKey::ScrollScreenshotTool,
                KeyEventKey::SaveTool,
                KeyEventKey::CancelTool,
                KeyEventKey::CopyTool,
            ]
        );
    }

    #[test]
    fn test_only_cancel_asks_for_confirmation() {
        assert!(KeyEventKey::CancelTool.confirm_tip().is_some());
        assert!(KeyEventKey::SaveTool.confirm_tip().is_none());
    }
}
