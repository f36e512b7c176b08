//! Composition root of a capture session
//!
//! [`Draw`] owns the session topics, the layer handles, the toolbar and the
//! resize readout, and routes [`SessionEvent`]s to them.

pub mod context;

use std::rc::Rc;

use crate::config::SnapmarkConfig;
use crate::draw_toolbar::{DrawToolbar, ToolClickError};
use crate::resize_toolbar::ResizeToolbar;
use crate::session::CaptureSession;
use crate::session::messages::{CaptureMsg, DragAction, LayoutMsg, SessionEvent, ToolbarMsg};
use crate::session::shortcuts::{self, Shortcuts};
use context::{DrawContext, DrawToolbarCallbacks, Notifier};

pub struct Draw {
    session: CaptureSession,
    context: DrawContext,
    toolbar: DrawToolbar,
    resize_toolbar: ResizeToolbar,
    shortcuts: Shortcuts,
}

impl std::fmt::Debug for Draw {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Draw")
            .field("toolbar", &self.toolbar)
            .field("resize_toolbar", &self.resize_toolbar)
            .finish_non_exhaustive()
    }
}

impl Draw {
    pub fn new(
        config: &SnapmarkConfig,
        callbacks: Rc<dyn DrawToolbarCallbacks>,
        notifier: Rc<dyn Notifier>,
    ) -> Self {
        let session = CaptureSession::new();
        let context = DrawContext::new(notifier);
        let resize_toolbar = ResizeToolbar::new(&session, context.clone(), config);
        let toolbar = DrawToolbar::new(session.clone(), context.clone(), callbacks, config);

        Self {
            session,
            context,
            toolbar,
            resize_toolbar,
            shortcuts: Shortcuts::from_config(config),
        }
    }

    pub fn session(&self) -> &CaptureSession {
        &self.session
    }

    /// Layer handles; attach the canvas and select layer here
    pub fn context(&self) -> &DrawContext {
        &self.context
    }

    pub fn toolbar(&self) -> &DrawToolbar {
        &self.toolbar
    }

    pub fn resize_toolbar(&self) -> &ResizeToolbar {
        &self.resize_toolbar
    }

    /// Apply one event. Rejected tool clicks have already been reported to
    /// the user when the error is returned.
    pub fn handle(&mut self, event: SessionEvent) -> Result<(), ToolClickError> {
        match event {
            SessionEvent::Capture(msg) => self.handle_capture(msg),
            SessionEvent::Toolbar(msg) => return self.handle_toolbar(msg),
            SessionEvent::Layout(msg) => self.handle_layout(msg),
        }
        Ok(())
    }

    fn handle_capture(&mut self, msg: CaptureMsg) {
        match msg {
            CaptureMsg::Event(event) => self.session.publish_capture_event(event),
            CaptureMsg::ScreenshotType(screenshot_type) => {
                self.session.screenshot_type.set(screenshot_type)
            }
            CaptureMsg::ImageBuffer(buffer) => self.context.set_image_buffer(buffer),
            CaptureMsg::Selection(rect) => {
                self.resize_toolbar.update_style(rect);
                self.resize_toolbar.set_size(rect.width(), rect.height());
            }
        }
    }

    fn handle_toolbar(&mut self, msg: ToolbarMsg) -> Result<(), ToolClickError> {
        match msg {
            ToolbarMsg::Enable(enable) => self.toolbar.set_enable(enable),
            ToolbarMsg::ToolClick(state) => {
                self.toolbar.on_tool_click(state)?;
            }
            ToolbarMsg::Press(key) => {
                self.toolbar.press(key)?;
            }
            ToolbarMsg::Key(chord) => {
                let enabled = self.session.enable_key_event.get();
                if let Some(key) = shortcuts::handle_key_event(&self.shortcuts, &chord, enabled) {
                    log::debug!("shortcut {} -> {:?}", chord, key);
                    self.toolbar.press(key)?;
                }
            }
            ToolbarMsg::Drag(DragAction::Start(pointer)) => self.toolbar.drag_start(pointer),
            ToolbarMsg::Drag(DragAction::Move(pointer)) => {
                self.toolbar.drag_move(pointer);
            }
            ToolbarMsg::Drag(DragAction::End) => self.toolbar.drag_end(),
            ToolbarMsg::Hover(true) => self.toolbar.on_mouse_enter(),
            ToolbarMsg::Hover(false) => self.toolbar.on_mouse_leave(),
        }
        Ok(())
    }

    fn handle_layout(&mut self, msg: LayoutMsg) {
        match msg {
            LayoutMsg::ReadoutLabel(size) => self.resize_toolbar.set_label_size(size),
            LayoutMsg::Viewport(size) => self.resize_toolbar.set_viewport(size),
        }
    }

    /// Run debounced work queued by the events handled so far
    pub fn flush(&self) -> usize {
        self.session.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        CaptureStep, DrawState, ElementRect, ImageBuffer, Position, ScreenshotType, Size,
    };
    use crate::draw::context::testing::*;
    use crate::draw_toolbar::KeyEventKey;
    use crate::session::shortcuts::KeyChord;

    fn draw() -> (Draw, Rc<FakeCallbacks>, Rc<FakeCanvas>, Rc<FakeSelection>) {
        let callbacks = Rc::new(FakeCallbacks::default());
        let draw = Draw::new(
            &SnapmarkConfig::default(),
            callbacks.clone(),
            Rc::new(FakeNotifier::default()),
        );
        let canvas = Rc::new(FakeCanvas::default());
        let selection = Rc::new(FakeSelection::with_size(640, 480));
        draw.context().draw_cache_layer.attach(canvas.clone());
        draw.context().select_layer.attach(selection.clone());
        (draw, callbacks, canvas, selection)
    }

    #[test]
    fn test_startup_sequence() {
        let (mut draw, callbacks, _, _) = draw();
        draw.handle(SessionEvent::image_buffer(Some(ImageBuffer {
            width: 1920,
            height: 1080,
            monitor_scale_factor: 1.0,
        })))
        .unwrap();
        draw.handle(SessionEvent::readout_label(Some(Size::new(80.0, 20.0))))
            .unwrap();
        draw.handle(SessionEvent::screenshot_type(ScreenshotType::Fixed))
            .unwrap();
        draw.handle(SessionEvent::ready()).unwrap();
        draw.handle(SessionEvent::enable(true)).unwrap();
        draw.flush();

        assert_eq!(*callbacks.calls.borrow(), vec![Callback::Fixed]);
        assert!(draw.resize_toolbar().is_visible());
        assert!(draw.session().enable_key_event.get());
    }

    #[test]
    fn test_key_chords_need_enabled_toolbar() {
        let (mut draw, _, _, _) = draw();
        draw.handle(SessionEvent::key(KeyChord::new("r"))).unwrap();
        assert_eq!(draw.session().draw_state.get(), DrawState::Idle);

        draw.handle(SessionEvent::enable(true)).unwrap();
        draw.handle(SessionEvent::key(KeyChord::new("r"))).unwrap();
        assert_eq!(draw.session().draw_state.get(), DrawState::Rect);
        assert_eq!(draw.session().capture_step.get(), CaptureStep::Draw);
    }

    #[test]
    fn test_key_chords_ignored_while_dragging() {
        let (mut draw, _, _, _) = draw();
        draw.handle(SessionEvent::enable(true)).unwrap();
        draw.handle(SessionEvent::drag_start(0.0, 0.0)).unwrap();
        draw.handle(SessionEvent::drag_move(12.0, 3.0)).unwrap();
        draw.handle(SessionEvent::key(KeyChord::new("p"))).unwrap();
        assert_eq!(draw.session().draw_state.get(), DrawState::Idle);

        draw.handle(SessionEvent::drag_end()).unwrap();
        assert_eq!(
            draw.toolbar().drag_button().offset(),
            Position::new(12.0, 3.0)
        );
        draw.handle(SessionEvent::key(KeyChord::new("p"))).unwrap();
        assert_eq!(draw.session().draw_state.get(), DrawState::Pen);
    }

    #[test]
    fn test_rejected_scroll_screenshot_surfaces_error() {
        let (mut draw, _, canvas, selection) = draw();
        selection.rect.set(Some(ElementRect::new(0, 0, 280, 280)));
        let result = draw.handle(SessionEvent::press(KeyEventKey::ScrollScreenshotTool));
        assert!(matches!(
            result,
            Err(ToolClickError::SelectionTooSmall { .. })
        ));
        assert!(canvas.take_calls().is_empty());
    }

    #[test]
    fn test_selection_updates_readout() {
        let (mut draw, _, _, _) = draw();
        draw.handle(SessionEvent::image_buffer(Some(ImageBuffer {
            width: 3840,
            height: 2160,
            monitor_scale_factor: 2.0,
        })))
        .unwrap();
        draw.handle(SessionEvent::readout_label(Some(Size::new(80.0, 20.0))))
            .unwrap();
        draw.handle(SessionEvent::viewport(Some(Size::new(1920.0, 1080.0))))
            .unwrap();
        draw.handle(SessionEvent::selection(ElementRect::new(200, 400, 1000, 1000)))
            .unwrap();

        assert_eq!(draw.resize_toolbar().text(), "800 x 600");
        assert_eq!(
            draw.resize_toolbar().position(),
            Some(Position::new(100.0, 176.0))
        );
    }

    #[test]
    fn test_hover_reaches_session() {
        let (mut draw, _, _, _) = draw();
        draw.handle(SessionEvent::hover(true)).unwrap();
        assert!(draw.session().toolbar_hover.get().mouse_hover);
        draw.handle(SessionEvent::hover(false)).unwrap();
        assert!(!draw.session().toolbar_hover.get().mouse_hover);
    }
}
