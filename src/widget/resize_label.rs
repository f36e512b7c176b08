//! Selection size readout label

use cosmic::Element;
use cosmic::widget::{container, text};

pub fn resize_label<'a, Msg: 'static>(readout: String, padding: u16) -> Element<'a, Msg> {
    container(text::caption(readout))
        .padding(padding)
        .class(cosmic::theme::Container::Card)
        .into()
}
