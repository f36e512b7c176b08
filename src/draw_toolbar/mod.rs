//! Annotation toolbar controller
//!
//! This module provides:
//! - The tool-click state machine that drives the draw state and the canvas
//! - Button enablement (scroll-screenshot mode excludes the shape tools)
//! - Startup dispatch on the screenshot type once the capture is ready
//! - Drag handle, hover and history handling

pub mod drag_button;
pub mod history;
pub mod tool_button;

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::config::SnapmarkConfig;
use crate::domain::{
    CaptureEvent, DrawState, ElementRect, Placement, Position, ScreenshotType, Size,
    place_element,
};
use crate::draw::context::{DrawContext, DrawToolbarCallbacks};
use crate::fl;
use crate::session::bus::Subscription;
use crate::session::{CaptureSession, ToolbarHoverState};

pub use drag_button::DragButton;
pub use history::HistoryAction;
pub use tool_button::{
    ButtonAction, KeyEventKey, TOOLBAR_LAYOUT, ToolButtonState, ToolbarItem,
};

/// Why a tool click was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolClickError {
    /// Scroll-screenshot needs a selection
    NoSelection,
    /// Scroll-screenshot needs both sides of the selection to be long enough
    SelectionTooSmall {
        width: i32,
        height: i32,
        min_side: i32,
    },
}

impl fmt::Display for ToolClickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolClickError::NoSelection => {
                write!(f, "scroll screenshot requires a selection")
            }
            ToolClickError::SelectionTooSmall {
                width,
                height,
                min_side,
            } => write!(
                f,
                "selection {}x{} is too small for a scroll screenshot (min side {})",
                width, height, min_side
            ),
        }
    }
}

impl std::error::Error for ToolClickError {}

/// The floating annotation toolbar
pub struct DrawToolbar {
    session: CaptureSession,
    context: DrawContext,
    callbacks: Rc<dyn DrawToolbarCallbacks>,
    min_scroll_screenshot_side: i32,
    toolbar_margin: f64,
    enabled: bool,
    dragging: bool,
    scroll_screenshot: bool,
    /// Set by a capture-ready event, consumed by the next enable change
    can_handle_screenshot_type: Rc<Cell<bool>>,
    drag_button: DragButton,
    _subscriptions: Vec<Subscription>,
}

impl fmt::Debug for DrawToolbar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawToolbar")
            .field("enabled", &self.enabled)
            .field("dragging", &self.dragging)
            .field("scroll_screenshot", &self.scroll_screenshot)
            .field(
                "can_handle_screenshot_type",
                &self.can_handle_screenshot_type.get(),
            )
            .field("drag_button", &self.drag_button)
            .finish_non_exhaustive()
    }
}

impl DrawToolbar {
    pub fn new(
        session: CaptureSession,
        context: DrawContext,
        callbacks: Rc<dyn DrawToolbarCallbacks>,
        config: &SnapmarkConfig,
    ) -> Self {
        let can_handle_screenshot_type = Rc::new(Cell::new(false));

        let ready_flag = Rc::clone(&can_handle_screenshot_type);
        let ready_subscription = session.capture_event.subscribe(move |event| {
            if *event == Some(CaptureEvent::Ready) {
                ready_flag.set(true);
            }
        });

        Self {
            session,
            context,
            callbacks,
            min_scroll_screenshot_side: config.min_scroll_screenshot_side,
            toolbar_margin: config.toolbar_margin,
            enabled: false,
            dragging: false,
            scroll_screenshot: false,
            can_handle_screenshot_type,
            drag_button: DragButton::new(),
            _subscriptions: vec![ready_subscription],
        }
    }

    pub fn draw_state(&self) -> DrawState {
        self.session.draw_state.get()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Whether scroll-screenshot mode is on (shape tools disabled)
    pub fn is_scroll_screenshot(&self) -> bool {
        self.scroll_screenshot
    }

    pub fn drag_button(&self) -> &DragButton {
        &self.drag_button
    }

    /// Apply a tool selection.
    ///
    /// Clicking the active tool again toggles back to `Select`, or to `Idle`
    /// for scroll-screenshot. Returns the resulting draw state.
    pub fn on_tool_click(&mut self, draw_state: DrawState) -> Result<DrawState, ToolClickError> {
        let prev = self.session.draw_state.get();

        if draw_state == DrawState::ScrollScreenshot {
            self.check_scroll_screenshot_selection()?;
        }

        let mut next = draw_state;
        if prev == draw_state && prev != DrawState::Idle {
            next = if draw_state == DrawState::ScrollScreenshot {
                DrawState::Idle
            } else {
                DrawState::Select
            };
        }

        self.session.capture_step.set(next.capture_step());

        if let Some((enable, tool)) = next.canvas_tool() {
            self.context.with_canvas(|layer| {
                layer.set_enable(enable);
                layer.set_active_tool(tool);
            });
        }
        if next == DrawState::OcrDetect {
            self.callbacks.on_ocr_detect();
        }

        self.scroll_screenshot = next == DrawState::ScrollScreenshot;

        log::debug!("draw state: {:?} -> {:?}", prev, next);
        self.session.draw_state.set(next);
        Ok(next)
    }

    fn check_scroll_screenshot_selection(&self) -> Result<(), ToolClickError> {
        let error = match self.context.select_rect() {
            None => ToolClickError::NoSelection,
            Some(rect) if rect.min_side() < self.min_scroll_screenshot_side => {
                ToolClickError::SelectionTooSmall {
                    width: rect.width(),
                    height: rect.height(),
                    min_side: self.min_scroll_screenshot_side,
                }
            }
            Some(_) => return Ok(()),
        };

        log::warn!("Rejected scroll screenshot: {}", error);
        self.context.notifier.error(&fl!(
            "scroll-screenshot-limit-tip",
            min = self.min_scroll_screenshot_side
        ));
        Err(error)
    }

    /// Whether the button currently accepts presses
    pub fn is_button_disabled(&self, key: KeyEventKey) -> bool {
        if self.scroll_screenshot && key.disabled_by_scroll_screenshot() {
            return true;
        }
        match key {
            KeyEventKey::Undo => {
                !history::history_enabled(&self.context, HistoryAction::Undo)
            }
            KeyEventKey::Redo => {
                !history::history_enabled(&self.context, HistoryAction::Redo)
            }
            _ => false,
        }
    }

    /// Handle a button press from the UI or a shortcut.
    ///
    /// Disabled buttons ignore the press and return `Ok(false)`.
    pub fn press(&mut self, key: KeyEventKey) -> Result<bool, ToolClickError> {
        if self.is_button_disabled(key) {
            log::debug!("ignoring press on disabled button {:?}", key);
            return Ok(false);
        }

        match key.action() {
            ButtonAction::Tool(state) => {
                self.on_tool_click(state)?;
            }
            ButtonAction::Undo => {
                history::apply_history(&self.context, HistoryAction::Undo);
            }
            ButtonAction::Redo => {
                history::apply_history(&self.context, HistoryAction::Redo);
            }
            ButtonAction::Fixed => self.callbacks.on_fixed(),
            ButtonAction::Save => self.callbacks.on_save(),
            ButtonAction::Cancel => self.callbacks.on_cancel(),
            ButtonAction::Copy => self.callbacks.on_copy_to_clipboard(),
        }
        Ok(true)
    }

    /// Button states in layout order, for rendering
    pub fn buttons(&self) -> Vec<ToolButtonState> {
        let state = self.draw_state();
        TOOLBAR_LAYOUT
            .iter()
            .filter_map(|item| match item {
                ToolbarItem::Button(key) => Some(*key),
                _ => None,
            })
            .map(|key| ToolButtonState {
                key,
                icon_name: key.icon_name(),
                tooltip: key.tooltip(),
                confirm_tip: key.confirm_tip(),
                active: key.is_active(state),
                disabled: self.is_button_disabled(key),
            })
            .collect()
    }

    /// Imperative enable toggle, called when the capture session is ready
    pub fn set_enable(&mut self, enable: bool) {
        if self.enabled == enable {
            return;
        }

        self.on_enable_change(enable);
        self.update_enable_key_event();
    }

    fn on_enable_change(&mut self, enable: bool) {
        self.enabled = enable;
        self.drag_button.set_enable(enable);
        if !enable {
            // The handle drops its grab, so no drag end will follow
            self.dragging = false;
        }

        if !self.can_handle_screenshot_type.get() {
            return;
        }

        let screenshot_type = self.session.screenshot_type.get();
        log::debug!("starting capture as {:?}", screenshot_type);
        self.drag_button.reset();
        match screenshot_type {
            ScreenshotType::Fixed => self.callbacks.on_fixed(),
            ScreenshotType::OcrDetect => self.click_startup_tool(DrawState::OcrDetect),
            ScreenshotType::TopWindow => self.callbacks.on_top_window(),
            ScreenshotType::Default => self.click_startup_tool(DrawState::Idle),
        }
        self.can_handle_screenshot_type.set(false);
    }

    fn click_startup_tool(&mut self, state: DrawState) {
        if let Err(err) = self.on_tool_click(state) {
            log::warn!("Startup tool {:?} rejected: {}", state, err);
        }
    }

    fn update_enable_key_event(&self) {
        self.session
            .enable_key_event
            .set(self.enabled && !self.dragging);
    }

    pub fn set_dragging(&mut self, dragging: bool) {
        if self.dragging == dragging {
            return;
        }
        self.dragging = dragging;
        self.update_enable_key_event();
    }

    /// Pointer pressed on the drag handle
    pub fn drag_start(&mut self, pointer: Position) {
        if self.drag_button.pointer_down(pointer) {
            self.set_dragging(true);
        }
    }

    /// Pointer moved while the drag handle is held
    pub fn drag_move(&mut self, pointer: Position) -> Option<Position> {
        self.drag_button.pointer_move(pointer)
    }

    /// Pointer released
    pub fn drag_end(&mut self) {
        if self.drag_button.pointer_up() {
            self.set_dragging(false);
        }
    }

    pub fn on_mouse_enter(&self) {
        self.session
            .toolbar_hover
            .set(ToolbarHoverState { mouse_hover: true });
    }

    pub fn on_mouse_leave(&self) {
        self.session
            .toolbar_hover
            .set(ToolbarHoverState { mouse_hover: false });
    }

    /// Place the toolbar under the selection, right-aligned, plus the user's
    /// drag offset. Flips above the selection when there is no room below.
    ///
    /// Returns `None` until an image buffer is attached.
    pub fn layout(
        &self,
        selection: ElementRect,
        toolbar: Size,
        viewport: Option<Size>,
    ) -> Option<Placement> {
        let scale = self.context.image_buffer()?.monitor_scale_factor;
        let origin = selection.logical_origin(scale);
        let end = selection.logical_end(scale);
        let drag_offset = self.drag_button.offset();

        let below = place_element(
            toolbar,
            drag_offset,
            Position::new(toolbar.width, -self.toolbar_margin),
            end,
            viewport,
            true,
        );
        if !below.is_beyond {
            return Some(below);
        }

        Some(place_element(
            toolbar,
            drag_offset,
            Position::new(toolbar.width, toolbar.height + self.toolbar_margin),
            Position::new(end.x, origin.y),
            viewport,
            false,
        ))
    }
}
