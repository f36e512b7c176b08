//! Async event loop feeding a [`Draw`] from a channel

use tokio::sync::mpsc;

use crate::draw::Draw;
use crate::session::messages::SessionEvent;

/// Apply events until every sender is dropped.
///
/// Events that are already queued are applied as one burst, followed by a
/// single flush of the debounced work. Returns the number of events handled.
pub async fn run(draw: &mut Draw, mut rx: mpsc::Receiver<SessionEvent>) -> usize {
    let mut handled = 0;

    while let Some(event) = rx.recv().await {
        apply(draw, event);
        handled += 1;

        while let Ok(event) = rx.try_recv() {
            apply(draw, event);
            handled += 1;
        }

        let ran = draw.flush();
        log::trace!("burst done: {} events, {} deferred tasks", handled, ran);
    }

    log::debug!("session event channel closed after {} events", handled);
    handled
}

fn apply(draw: &mut Draw, event: SessionEvent) {
    if let Err(err) = draw.handle(event) {
        log::debug!("event rejected: {}", err);
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::config::SnapmarkConfig;
    use crate::domain::{DrawState, ImageBuffer, Size};
    use crate::draw::context::testing::{FakeCallbacks, FakeNotifier};

    fn draw() -> Draw {
        Draw::new(
            &SnapmarkConfig::default(),
            Rc::new(FakeCallbacks::default()),
            Rc::new(FakeNotifier::default()),
        )
    }

    #[tokio::test]
    async fn test_run_applies_events_and_flushes() {
        let mut draw = draw();
        let (tx, rx) = mpsc::channel(16);

        tx.send(SessionEvent::image_buffer(Some(ImageBuffer {
            width: 800,
            height: 600,
            monitor_scale_factor: 1.0,
        })))
        .await
        .unwrap();
        tx.send(SessionEvent::readout_label(Some(Size::new(60.0, 18.0))))
            .await
            .unwrap();
        tx.send(SessionEvent::ready()).await.unwrap();
        tx.send(SessionEvent::tool_click(DrawState::Arrow))
            .await
            .unwrap();
        drop(tx);

        assert_eq!(run(&mut draw, rx).await, 4);
        assert_eq!(draw.session().draw_state.get(), DrawState::Arrow);
        assert!(draw.resize_toolbar().is_visible());
        assert_eq!(draw.session().scheduler.pending(), 0);
    }

    #[tokio::test]
    async fn test_rejected_events_do_not_stop_the_loop() {
        let mut draw = draw();
        let (tx, rx) = mpsc::channel(4);

        // No select layer attached, so this is refused
        tx.send(SessionEvent::tool_click(DrawState::ScrollScreenshot))
            .await
            .unwrap();
        tx.send(SessionEvent::tool_click(DrawState::Text))
            .await
            .unwrap();
        drop(tx);

        assert_eq!(run(&mut draw, rx).await, 2);
        assert_eq!(draw.session().draw_state.get(), DrawState::Text);
    }
}
