use std::rc::Rc;

use cosmic::iced::keyboard::{self, Key, Modifiers, key::Named};
use cosmic::iced::{Length, Padding, mouse, window};
use cosmic::iced_futures::{Subscription, event::listen_with};
use cosmic::iced_widget::Stack;
use cosmic::widget::{container, horizontal_space, text};
use cosmic::{Element, Task, app};

use super::host::{HostAction, HostQueue, StatusLine, WindowSelection};
use crate::config::SnapmarkConfig;
use crate::domain::{ElementRect, ImageBuffer, Position, ScreenshotType, Size};
use crate::draw::Draw;
use crate::session::messages::SessionEvent;
use crate::session::shortcuts::KeyChord;
use crate::widget::{resize_label::resize_label, toolbar::draw_toolbar};

/// Initial window size before the first resize event arrives
const INITIAL_SIZE: (f32, f32) = (1280.0, 800.0);

pub fn run() -> cosmic::iced::Result {
    let settings = cosmic::app::Settings::default()
        .size(cosmic::iced::Size::new(INITIAL_SIZE.0, INITIAL_SIZE.1));
    cosmic::app::run::<App>(settings, ())
}

pub struct App {
    pub core: app::Core,
    pub draw: Draw,
    host: Rc<HostQueue>,
    status: Rc<StatusLine>,
    selection: Rc<WindowSelection>,
    /// Last pointer position in window coordinates
    cursor: Position,
    viewport: Size,
    /// Laid-out toolbar size used for placement
    toolbar_size: Size,
}

#[derive(Debug, Clone)]
pub enum Msg {
    Session(SessionEvent),
    DragHandlePressed,
    Keyboard(keyboard::Event),
    Mouse(mouse::Event),
    Resized(cosmic::iced::Size),
}

impl cosmic::Application for App {
    type Executor = cosmic::executor::Default;

    type Flags = ();

    type Message = Msg;

    const APP_ID: &'static str = "io.github.snapmark";

    fn core(&self) -> &app::Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut app::Core {
        &mut self.core
    }

    fn init(
        core: app::Core,
        _flags: Self::Flags,
    ) -> (Self, cosmic::iced::Task<cosmic::Action<Self::Message>>) {
        let config = SnapmarkConfig::load();
        let host = Rc::new(HostQueue::default());
        let status = Rc::new(StatusLine::default());
        let selection = Rc::new(WindowSelection::default());

        let draw = Draw::new(&config, host.clone(), status.clone());
        draw.context().select_layer.attach(selection.clone());

        let mut app = Self {
            core,
            draw,
            host,
            status,
            selection,
            cursor: Position::default(),
            viewport: Size::default(),
            toolbar_size: Size::new(860.0, 48.0),
        };

        app.resize(cosmic::iced::Size::new(INITIAL_SIZE.0, INITIAL_SIZE.1));
        app.apply(SessionEvent::screenshot_type(screenshot_type_from_args()));
        app.apply(SessionEvent::ready());
        app.apply(SessionEvent::enable(true));
        let task = app.after_events();

        (app, task)
    }

    fn view(&self) -> Element<'_, Self::Message> {
        let spacing = cosmic::theme::active().cosmic().spacing;
        let mut layers: Vec<Element<'_, Msg>> = Vec::new();

        if let Some(rect) = self.selection.rect() {
            let outline = container(horizontal_space())
                .width(Length::Fixed(rect.width() as f32))
                .height(Length::Fixed(rect.height() as f32))
                .class(cosmic::theme::Container::Card);
            layers.push(at(outline, rect.logical_origin(1.0)));

            if let Some(placement) =
                self.draw
                    .toolbar()
                    .layout(rect, self.toolbar_size, Some(self.viewport))
            {
                let toolbar = draw_toolbar(
                    self.draw.toolbar().buttons(),
                    spacing.space_xxs,
                    |key| Msg::Session(SessionEvent::press(key)),
                    Msg::DragHandlePressed,
                    |hovered| Msg::Session(SessionEvent::hover(hovered)),
                );
                layers.push(at(toolbar, placement.position));
            }
        }

        let readout = self.draw.resize_toolbar();
        if readout.is_visible()
            && let Some(position) = readout.position()
        {
            layers.push(at(resize_label(readout.text(), spacing.space_xxs), position));
        }

        if let Some(message) = self.status.message() {
            layers.push(at(
                container(text::body(message)).padding(spacing.space_xs),
                Position::default(),
            ));
        }

        Stack::with_children(layers)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn update(
        &mut self,
        message: Self::Message,
    ) -> cosmic::iced::Task<cosmic::Action<Self::Message>> {
        match message {
            Msg::Session(event) => self.apply(event),
            Msg::DragHandlePressed => {
                self.apply(SessionEvent::drag_start(self.cursor.x, self.cursor.y));
            }
            Msg::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) => {
                if let Some(chord) = key_chord(&key, modifiers) {
                    self.apply(SessionEvent::key(chord));
                }
            }
            Msg::Keyboard(_) => {}
            Msg::Mouse(mouse::Event::CursorMoved { position }) => {
                self.cursor = Position::new(position.x as f64, position.y as f64);
                if self.draw.toolbar().is_dragging() {
                    self.apply(SessionEvent::drag_move(self.cursor.x, self.cursor.y));
                }
            }
            Msg::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                if self.draw.toolbar().is_dragging() {
                    self.apply(SessionEvent::drag_end());
                }
            }
            Msg::Mouse(_) => {}
            Msg::Resized(size) => self.resize(size),
        }

        self.after_events()
    }

    fn subscription(&self) -> Subscription<Self::Message> {
        listen_with(|e, _, _| match e {
            cosmic::iced_core::Event::Keyboard(keyboard_event) => {
                Some(Msg::Keyboard(keyboard_event))
            }
            cosmic::iced_core::Event::Mouse(mouse_event) => Some(Msg::Mouse(mouse_event)),
            cosmic::iced_core::Event::Window(window::Event::Resized(size)) => {
                Some(Msg::Resized(size))
            }
            _ => None,
        })
    }
}

impl App {
    fn apply(&mut self, event: SessionEvent) {
        // A new command replaces any earlier rejection message
        if event.is_command() {
            self.status.clear();
        }
        if let Err(err) = self.draw.handle(event) {
            log::debug!("event rejected: {}", err);
        }
    }

    fn resize(&mut self, size: cosmic::iced::Size) {
        self.viewport = Size::new(size.width as f64, size.height as f64);
        let (width, height) = (size.width as i32, size.height as i32);
        let rect = self.selection.fit(width, height);

        self.apply(SessionEvent::image_buffer(Some(ImageBuffer {
            width: width.max(0) as u32,
            height: height.max(0) as u32,
            monitor_scale_factor: 1.0,
        })));
        self.apply(SessionEvent::viewport(Some(self.viewport)));
        self.apply(SessionEvent::readout_label(Some(readout_label_size(rect))));
        self.apply(SessionEvent::selection(rect));
    }

    /// Flush deferred work and act on the requests the toolbar made
    fn after_events(&mut self) -> Task<cosmic::Action<Msg>> {
        self.draw.flush();

        let mut task = Task::none();
        for action in self.host.take() {
            log::info!("toolbar requested {:?}", action);
            if action == HostAction::Cancel {
                task = cosmic::iced::exit();
            }
        }
        task
    }
}

fn at<'a>(content: impl Into<Element<'a, Msg>>, position: Position) -> Element<'a, Msg> {
    container(content)
        .padding(Padding {
            top: position.y as f32,
            right: 0.0,
            bottom: 0.0,
            left: position.x as f32,
        })
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// Approximate caption size for a `W x H` readout
fn readout_label_size(rect: ElementRect) -> Size {
    let chars = format!("{} x {}", rect.width(), rect.height()).len();
    Size::new(chars as f64 * 8.0 + 16.0, 28.0)
}

fn screenshot_type_from_args() -> ScreenshotType {
    match std::env::args().nth(1).as_deref() {
        Some("--fixed") => ScreenshotType::Fixed,
        Some("--ocr") => ScreenshotType::OcrDetect,
        Some("--top-window") => ScreenshotType::TopWindow,
        _ => ScreenshotType::Default,
    }
}

fn key_chord(key: &Key, modifiers: Modifiers) -> Option<KeyChord> {
    let name = match key {
        Key::Character(c) => c.as_str().to_lowercase(),
        Key::Named(Named::Escape) => "escape".to_string(),
        Key::Named(Named::Enter) => "enter".to_string(),
        Key::Named(Named::Delete) => "delete".to_string(),
        _ => return None,
    };

    let mut chord = KeyChord::new(name);
    chord.ctrl = modifiers.control();
    chord.shift = modifiers.shift();
    chord.alt = modifiers.alt();
    chord.logo = modifiers.logo();
    Some(chord)
}
