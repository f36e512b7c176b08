//! Host-side implementations of the session collaborators

use std::cell::{Cell, RefCell};

use crate::domain::ElementRect;
use crate::draw::context::{DrawToolbarCallbacks, Notifier, SelectLayer};

/// Requests the toolbar delegates to the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostAction {
    Cancel,
    Save,
    Fixed,
    TopWindow,
    CopyToClipboard,
    OcrDetect,
}

/// Collects toolbar requests until the update loop drains them
#[derive(Debug, Default)]
pub struct HostQueue {
    actions: RefCell<Vec<HostAction>>,
}

impl HostQueue {
    pub fn take(&self) -> Vec<HostAction> {
        std::mem::take(&mut *self.actions.borrow_mut())
    }

    fn push(&self, action: HostAction) {
        self.actions.borrow_mut().push(action);
    }
}

impl DrawToolbarCallbacks for HostQueue {
    fn on_cancel(&self) {
        self.push(HostAction::Cancel);
    }
    fn on_save(&self) {
        self.push(HostAction::Save);
    }
    fn on_fixed(&self) {
        self.push(HostAction::Fixed);
    }
    fn on_top_window(&self) {
        self.push(HostAction::TopWindow);
    }
    fn on_copy_to_clipboard(&self) {
        self.push(HostAction::CopyToClipboard);
    }
    fn on_ocr_detect(&self) {
        self.push(HostAction::OcrDetect);
    }
}

/// Keeps the latest user-facing error for display
#[derive(Debug, Default)]
pub struct StatusLine {
    message: RefCell<Option<String>>,
}

impl StatusLine {
    pub fn message(&self) -> Option<String> {
        self.message.borrow().clone()
    }

    pub fn clear(&self) {
        self.message.borrow_mut().take();
    }
}

impl Notifier for StatusLine {
    fn error(&self, message: &str) {
        log::error!("{}", message);
        *self.message.borrow_mut() = Some(message.to_string());
    }
}

/// Selection derived from the window size
#[derive(Debug, Default)]
pub struct WindowSelection {
    rect: Cell<Option<ElementRect>>,
}

impl WindowSelection {
    pub fn rect(&self) -> Option<ElementRect> {
        self.rect.get()
    }

    /// Select the middle of the window, leaving room below for the toolbar
    pub fn fit(&self, width: i32, height: i32) -> ElementRect {
        let rect = ElementRect::new(width / 6, height / 6, width * 5 / 6, height * 2 / 3);
        self.rect.set(Some(rect));
        rect
    }
}

impl SelectLayer for WindowSelection {
    fn select_rect(&self) -> Option<ElementRect> {
        self.rect.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_drains_in_order() {
        let queue = HostQueue::default();
        queue.on_save();
        queue.on_cancel();
        assert_eq!(queue.take(), vec![HostAction::Save, HostAction::Cancel]);
        assert!(queue.take().is_empty());
    }

    #[test]
    fn test_status_line_keeps_latest_error() {
        let status = StatusLine::default();
        status.error("first");
        status.error("second");
        assert_eq!(status.message().as_deref(), Some("second"));
        status.clear();
        assert_eq!(status.message(), None);
    }

    #[test]
    fn test_window_selection_fits_window() {
        let selection = WindowSelection::default();
        assert_eq!(selection.select_rect(), None);
        let rect = selection.fit(1200, 900);
        assert_eq!(rect, ElementRect::new(200, 150, 1000, 600));
        assert_eq!(selection.rect(), Some(rect));
    }
}
