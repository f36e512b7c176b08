//! Undo/redo controls forwarded to the annotation canvas

use crate::draw::context::DrawContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryAction {
    Undo,
    Redo,
}

/// Whether the history button can be pressed right now
pub fn history_enabled(context: &DrawContext, action: HistoryAction) -> bool {
    match context.draw_cache_layer.get() {
        Some(layer) => match action {
            HistoryAction::Undo => layer.can_undo(),
            HistoryAction::Redo => layer.can_redo(),
        },
        None => false,
    }
}

/// Forward an undo/redo to the canvas. Returns `false` if nothing happened.
pub fn apply_history(context: &DrawContext, action: HistoryAction) -> bool {
    if !history_enabled(context, action) {
        return false;
    }
    context.with_canvas(|layer| match action {
        HistoryAction::Undo => layer.undo(),
        HistoryAction::Redo => layer.redo(),
    });
    log::debug!("history: {:?}", action);
    true
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::draw::context::testing::{CanvasCall, FakeCanvas};

    #[test]
    fn test_without_canvas_history_is_disabled() {
        let context = DrawContext::default();
        assert!(!history_enabled(&context, HistoryAction::Undo));
        assert!(!apply_history(&context, HistoryAction::Undo));
    }

    #[test]
    fn test_history_forwards_to_canvas() {
        let context = DrawContext::default();
        let canvas = Rc::new(FakeCanvas::default());
        context.draw_cache_layer.attach(canvas.clone());

        assert!(apply_history(&context, HistoryAction::Undo));
        assert!(apply_history(&context, HistoryAction::Redo));
        assert_eq!(canvas.take_calls(), vec![CanvasCall::Undo, CanvasCall::Redo]);
    }

    #[test]
    fn test_empty_history_is_ignored() {
        let context = DrawContext::default();
        let canvas = Rc::new(FakeCanvas::default());
        context.draw_cache_layer.attach(canvas.clone());

        canvas.history_empty.set(true);
        assert!(!apply_history(&context, HistoryAction::Redo));
        assert!(canvas.take_calls().is_empty());
    }
}
