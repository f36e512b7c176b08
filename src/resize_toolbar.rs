//! Floating `W x H` readout shown next to the selection while it is resized

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::config::SnapmarkConfig;
use crate::domain::{
    CaptureEvent, DrawState, ElementRect, Position, ScreenshotType, Size, place_element,
};
use crate::draw::context::DrawContext;
use crate::session::CaptureSession;
use crate::session::bus::Subscription;
use crate::session::debounce::Debounced;

#[derive(Debug, Default)]
struct ReadoutState {
    width: i32,
    height: i32,
    /// Measured label size, `None` until the view has laid it out
    label_size: Option<Size>,
    viewport: Option<Size>,
    visible: bool,
    position: Option<Position>,
    margin: f64,
}

/// Selection size readout
pub struct ResizeToolbar {
    state: Rc<RefCell<ReadoutState>>,
    context: DrawContext,
    update_enable: Rc<Debounced>,
    _subscriptions: Vec<Subscription>,
}

impl fmt::Debug for ResizeToolbar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResizeToolbar")
            .field("state", &self.state.borrow())
            .finish_non_exhaustive()
    }
}

impl ResizeToolbar {
    pub fn new(session: &CaptureSession, context: DrawContext, config: &SnapmarkConfig) -> Self {
        let state = Rc::new(RefCell::new(ReadoutState {
            margin: config.label_margin,
            ..ReadoutState::default()
        }));

        let debounced = {
            let scheduler = session.scheduler.clone();
            let session = session.clone();
            let context = context.clone();
            let state = Rc::clone(&state);
            scheduler.debounce(move || update_enable(&session, &context, &state))
        };

        let on_capture_event = Rc::clone(&debounced);
        let on_draw_state = Rc::clone(&debounced);
        let subscriptions = vec![
            session
                .capture_event
                .subscribe(move |_| on_capture_event.schedule()),
            session
                .draw_state
                .subscribe(move |_| on_draw_state.schedule()),
        ];

        Self {
            state,
            context,
            update_enable: debounced,
            _subscriptions: subscriptions,
        }
    }

    /// Set the displayed selection size in physical pixels
    pub fn set_size(&self, width: i32, height: i32) {
        let mut state = self.state.borrow_mut();
        state.width = width;
        state.height = height;
    }

    pub fn text(&self) -> String {
        let state = self.state.borrow();
        format!("{} x {}", state.width, state.height)
    }

    /// Record the label's measured size after layout
    pub fn set_label_size(&self, size: Option<Size>) {
        self.state.borrow_mut().label_size = size;
    }

    pub fn set_viewport(&self, viewport: Option<Size>) {
        self.state.borrow_mut().viewport = viewport;
    }

    pub fn is_visible(&self) -> bool {
        self.state.borrow().visible
    }

    /// Last computed label position in logical coordinates
    pub fn position(&self) -> Option<Position> {
        self.state.borrow().position
    }

    /// Reposition the label against a selection rectangle
    pub fn update_style(&self, rect: ElementRect) {
        update_style(&self.context, &self.state, rect);
    }

    /// Queue a visibility re-evaluation for the next flush
    pub fn schedule_update_enable(&self) {
        self.update_enable.schedule();
    }
}

fn update_style(context: &DrawContext, state: &RefCell<ReadoutState>, rect: ElementRect) {
    let mut state = state.borrow_mut();
    let Some(label) = state.label_size else {
        return;
    };
    let Some(image_buffer) = context.image_buffer() else {
        return;
    };

    let scale = image_buffer.monitor_scale_factor;
    let anchor = rect.logical_origin(scale);

    let above = place_element(
        label,
        Position::default(),
        Position::new(0.0, label.height + state.margin),
        anchor,
        state.viewport,
        true,
    );
    let position = if above.is_beyond {
        place_element(
            label,
            Position::new(rect.width() as f64 / scale + state.margin, 0.0),
            Position::default(),
            anchor,
            state.viewport,
            false,
        )
        .position
    } else {
        above.position
    };

    state.position = Some(position);
}

fn update_enable(session: &CaptureSession, context: &DrawContext, state: &RefCell<ReadoutState>) {
    let Some(event) = session.capture_event.get() else {
        return;
    };

    if session.screenshot_type.get() == ScreenshotType::TopWindow {
        state.borrow_mut().visible = false;
        return;
    }

    let visible = match event {
        CaptureEvent::Ready => {
            update_style(context, state, ElementRect::default());
            true
        }
        CaptureEvent::Finish => false,
        CaptureEvent::Load => session.draw_state.get() == DrawState::Idle,
    };
    log::debug!("resize readout visible: {}", visible);
    state.borrow_mut().visible = visible;
}
