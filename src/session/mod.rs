//! Capture session state shared between the toolbar, the resize readout and
//! the layers they drive
//!
//! This module contains:
//! - Typed publish/subscribe topics and the session container that owns them
//! - Zero-delay debouncing
//! - Event messages and the async event driver
//! - Keyboard shortcut handling

pub mod bus;
pub mod debounce;
pub mod driver;
pub mod messages;
pub mod shortcuts;

use crate::domain::{CaptureEvent, CaptureStep, DrawState, ScreenshotType};
use bus::Topic;
use debounce::Scheduler;

/// Pointer state of the toolbar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ToolbarHoverState {
    pub mouse_hover: bool,
}

/// Session-scoped state container.
///
/// Cloning is cheap and yields a handle to the same topics.
#[derive(Debug, Clone)]
pub struct CaptureSession {
    pub draw_state: Topic<DrawState>,
    pub capture_step: Topic<CaptureStep>,
    /// Latest capture lifecycle event, `None` until the first one arrives
    pub capture_event: Topic<Option<CaptureEvent>>,
    pub screenshot_type: Topic<ScreenshotType>,
    /// Whether toolbar keyboard shortcuts are live
    pub enable_key_event: Topic<bool>,
    pub toolbar_hover: Topic<ToolbarHoverState>,
    pub scheduler: Scheduler,
}

impl Default for CaptureSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureSession {
    pub fn new() -> Self {
        Self {
            draw_state: Topic::new("draw-state", DrawState::Idle),
            capture_step: Topic::new("capture-step", CaptureStep::Select),
            capture_event: Topic::new("capture-event", None),
            screenshot_type: Topic::new("screenshot-type", ScreenshotType::Default),
            enable_key_event: Topic::new("enable-key-event", false),
            toolbar_hover: Topic::new("toolbar-hover", ToolbarHoverState::default()),
            scheduler: Scheduler::new(),
        }
    }

    /// Publish a capture lifecycle event
    pub fn publish_capture_event(&self, event: CaptureEvent) {
        log::debug!("capture event: {:?}", event);
        self.capture_event.set(Some(event));
    }

    /// Run deferred work queued since the last flush
    pub fn flush(&self) -> usize {
        self.scheduler.run_pending()
    }
}
