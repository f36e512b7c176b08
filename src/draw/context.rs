//! Collaborators the toolbar and the resize readout talk to
//!
//! The drawing canvas, the selection layer and the host application live
//! outside this crate. They are reached through the traits below and attached
//! to a [`DrawContext`] whenever they become available.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::domain::{ActiveTool, ElementRect, ImageBuffer};

/// Annotation canvas handle
pub trait DrawCacheLayer {
    fn set_enable(&self, enable: bool);
    fn set_active_tool(&self, tool: ActiveTool);
    fn undo(&self);
    fn redo(&self);
    fn can_undo(&self) -> bool {
        true
    }
    fn can_redo(&self) -> bool {
        true
    }
}

/// Selection layer handle
pub trait SelectLayer {
    /// Current selection in monitor pixels
    fn select_rect(&self) -> Option<ElementRect>;
}

/// Actions the toolbar delegates to the host application
pub trait DrawToolbarCallbacks {
    fn on_cancel(&self);
    fn on_save(&self);
    fn on_fixed(&self);
    fn on_top_window(&self);
    fn on_copy_to_clipboard(&self);
    fn on_ocr_detect(&self);
}

/// User-facing notifications
pub trait Notifier {
    fn error(&self, message: &str);
}

/// Notifier that only writes to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn error(&self, message: &str) {
        log::error!("{}", message);
    }
}

/// A late-bound reference to a collaborator.
///
/// Reading an empty slot yields `None`; callers treat that as a no-op.
pub struct Slot<T: ?Sized> {
    inner: Rc<RefCell<Option<Rc<T>>>>,
}

impl<T: ?Sized> Clone for Slot<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: ?Sized> Default for Slot<T> {
    fn default() -> Self {
        Self {
            inner: Rc::new(RefCell::new(None)),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slot")
            .field("attached", &self.is_attached())
            .finish()
    }
}

impl<T: ?Sized> Slot<T> {
    pub fn attach(&self, value: Rc<T>) {
        *self.inner.borrow_mut() = Some(value);
    }

    pub fn detach(&self) {
        self.inner.borrow_mut().take();
    }

    pub fn get(&self) -> Option<Rc<T>> {
        self.inner.borrow().clone()
    }

    pub fn is_attached(&self) -> bool {
        self.inner.borrow().is_some()
    }
}

/// Shared handles of a capture session's layers
#[derive(Clone)]
pub struct DrawContext {
    pub draw_cache_layer: Slot<dyn DrawCacheLayer>,
    pub select_layer: Slot<dyn SelectLayer>,
    pub image_buffer: Rc<RefCell<Option<ImageBuffer>>>,
    pub notifier: Rc<dyn Notifier>,
}

impl fmt::Debug for DrawContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawContext")
            .field("draw_cache_layer", &self.draw_cache_layer)
            .field("select_layer", &self.select_layer)
            .field("image_buffer", &self.image_buffer.borrow())
            .finish_non_exhaustive()
    }
}

impl Default for DrawContext {
    fn default() -> Self {
        Self::new(Rc::new(LogNotifier))
    }
}

impl DrawContext {
    pub fn new(notifier: Rc<dyn Notifier>) -> Self {
        Self {
            draw_cache_layer: Slot::default(),
            select_layer: Slot::default(),
            image_buffer: Rc::new(RefCell::new(None)),
            notifier,
        }
    }

    pub fn image_buffer(&self) -> Option<ImageBuffer> {
        *self.image_buffer.borrow()
    }

    pub fn set_image_buffer(&self, buffer: Option<ImageBuffer>) {
        *self.image_buffer.borrow_mut() = buffer;
    }

    pub fn select_rect(&self) -> Option<ElementRect> {
        self.select_layer.get().and_then(|layer| layer.select_rect())
    }

    /// Run `f` against the canvas if one is attached
    pub fn with_canvas(&self, f: impl FnOnce(&dyn DrawCacheLayer)) {
        if let Some(layer) = self.draw_cache_layer.get() {
            f(layer.as_ref());
        }
    }
}

/// Recording fakes shared by the component tests
#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::Cell;

    #[derive(Debug, Clone, PartialEq)]
    pub enum CanvasCall {
        Enable(bool),
        Tool(ActiveTool),
        Undo,
        Redo,
    }

    #[derive(Default)]
    pub struct FakeCanvas {
        pub calls: RefCell<Vec<CanvasCall>>,
        pub history_empty: Cell<bool>,
    }

    impl FakeCanvas {
        pub fn take_calls(&self) -> Vec<CanvasCall> {
            std::mem::take(&mut *self.calls.borrow_mut())
        }
    }

    impl DrawCacheLayer for FakeCanvas {
        fn set_enable(&self, enable: bool) {
            self.calls.borrow_mut().push(CanvasCall::Enable(enable));
        }
        fn set_active_tool(&self, tool: ActiveTool) {
            self.calls.borrow_mut().push(CanvasCall::Tool(tool));
        }
        fn undo(&self) {
            self.calls.borrow_mut().push(CanvasCall::Undo);
        }
        fn redo(&self) {
            self.calls.borrow_mut().push(CanvasCall::Redo);
        }
        fn can_undo(&self) -> bool {
            !self.history_empty.get()
        }
        fn can_redo(&self) -> bool {
            !self.history_empty.get()
        }
    }

    #[derive(Default)]
    pub struct FakeSelection {
        pub rect: Cell<Option<ElementRect>>,
    }

    impl FakeSelection {
        pub fn with_size(width: i32, height: i32) -> Self {
            Self {
                rect: Cell::new(Some(ElementRect::new(100, 100, 100 + width, 100 + height))),
            }
        }
    }

    impl SelectLayer for FakeSelection {
        fn select_rect(&self) -> Option<ElementRect> {
            self.rect.get()
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Callback {
        Cancel,
        Save,
        Fixed,
        TopWindow,
        CopyToClipboard,
        OcrDetect,
    }

    #[derive(Default)]
    pub struct FakeCallbacks {
        pub calls: RefCell<Vec<Callback>>,
    }

    impl FakeCallbacks {
        fn push(&self, callback: Callback) {
            self.calls.borrow_mut().push(callback);
        }
    }

    impl DrawToolbarCallbacks for FakeCallbacks {
        fn on_cancel(&self) {
            self.push(Callback::Cancel);
        }
        fn on_save(&self) {
            self.push(Callback::Save);
        }
        fn on_fixed(&self) {
            self.push(Callback::Fixed);
        }
        fn on_top_window(&self) {
            self.push(Callback::TopWindow);
        }
        fn on_copy_to_clipboard(&self) {
            self.push(Callback::CopyToClipboard);
        }
        fn on_ocr_detect(&self) {
            self.push(Callback::OcrDetect);
        }
    }

    #[derive(Default)]
    pub struct FakeNotifier {
        pub errors: RefCell<Vec<String>>,
    }

    impl Notifier for FakeNotifier {
        fn error(&self, message: &str) {
            self.errors.borrow_mut().push(message.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    #[test]
    fn test_empty_slots_are_no_ops() {
        let context = DrawContext::default();
        assert_eq!(context.select_rect(), None);
        let mut called = false;
        context.with_canvas(|_| called = true);
        assert!(!called);
    }

    #[test]
    fn test_attached_layers_are_reachable() {
        let context = DrawContext::default();
        let selection = Rc::new(FakeSelection::with_size(300, 200));
        context.select_layer.attach(selection);
        assert_eq!(context.select_rect().map(|r| r.min_side()), Some(200));

        let canvas = Rc::new(FakeCanvas::default());
        context.draw_cache_layer.attach(canvas.clone());
        context.with_canvas(|layer| layer.set_enable(true));
        assert_eq!(canvas.take_calls(), vec![CanvasCall::Enable(true)]);

        context.draw_cache_layer.detach();
        assert!(!context.draw_cache_layer.is_attached());
    }
}
