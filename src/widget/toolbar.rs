//! Toolbar widget for the annotation tools

use cosmic::Element;
use cosmic::iced::Length;
use cosmic::iced_core::Alignment;
use cosmic::iced_widget::Row;
use cosmic::widget::divider::vertical;
use cosmic::widget::{button, container, icon, mouse_area, text, tooltip};

use crate::draw_toolbar::{KeyEventKey, TOOLBAR_LAYOUT, ToolButtonState, ToolbarItem};
use crate::fl;

const BUTTON_ICON_SIZE: f32 = 24.0;

/// Build the toolbar row from render-ready button states.
///
/// `buttons` must be in layout order, as returned by `DrawToolbar::buttons`.
pub fn draw_toolbar<'a, Msg: Clone + 'static>(
    buttons: Vec<ToolButtonState>,
    spacing: u16,
    on_press: impl Fn(KeyEventKey) -> Msg,
    on_drag_press: Msg,
    on_hover_change: impl Fn(bool) -> Msg,
) -> Element<'a, Msg> {
    let mut buttons = buttons.into_iter();
    let mut children: Vec<Element<'a, Msg>> = Vec::with_capacity(TOOLBAR_LAYOUT.len());

    for item in TOOLBAR_LAYOUT {
        match item {
            ToolbarItem::DragHandle => {
                let grip = icon::Icon::from(icon::from_name("grip-lines-symbolic").size(64))
                    .width(Length::Fixed(BUTTON_ICON_SIZE))
                    .height(Length::Fixed(BUTTON_ICON_SIZE));
                children.push(
                    tooltip(
                        mouse_area(grip).on_press(on_drag_press.clone()),
                        text::body(fl!("tool-drag")),
                        tooltip::Position::Bottom,
                    )
                    .into(),
                );
            }
            ToolbarItem::Splitter => {
                children.push(vertical::light().height(Length::Fixed(BUTTON_ICON_SIZE)).into());
            }
            ToolbarItem::Button(key) => {
                let Some(state) = buttons.next() else {
                    log::warn!("No button state for {:?}", key);
                    continue;
                };
                children.push(tool_button(state, spacing, &on_press));
            }
        }
    }

    let row = Row::with_children(children)
        .spacing(spacing)
        .align_y(Alignment::Center)
        .padding([spacing, spacing * 2, spacing, spacing * 2]);

    mouse_area(container(row).class(cosmic::theme::Container::Card))
        .on_enter(on_hover_change(true))
        .on_exit(on_hover_change(false))
        .into()
}

fn tool_button<'a, Msg: Clone + 'static>(
    state: ToolButtonState,
    padding: u16,
    on_press: &impl Fn(KeyEventKey) -> Msg,
) -> Element<'a, Msg> {
    let on_press = (!state.disabled).then(|| on_press(state.key));

    let btn = button::custom(
        icon::Icon::from(icon::from_name(state.icon_name).size(64))
            .width(Length::Fixed(BUTTON_ICON_SIZE))
            .height(Length::Fixed(BUTTON_ICON_SIZE)),
    )
    .selected(state.active)
    .class(cosmic::theme::Button::Icon)
    .on_press_maybe(on_press)
    .padding(padding);

    let label = match state.confirm_tip {
        Some(tip) => format!("{}\n{}", state.tooltip, tip),
        None => state.tooltip,
    };

    tooltip(btn, text::body(label), tooltip::Position::Bottom).into()
}
