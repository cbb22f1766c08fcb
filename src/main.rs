mod api;
mod config;
mod state;
mod view;

use iced::{
    clipboard,
    event::{self, Event as IcedEvent},
    keyboard::{self, Key},
    time,
    widget::text_input::{self, Id},
    window, Element, Font, Subscription, Task, Theme,
};
use std::sync::Arc;
use std::time::Duration;

use api::{Answer, LawsClient};
use state::{Phase, QueryState};

fn main() -> iced::Result {
    let config = config::Config::load();

    iced::application("Query Laws", App::update, App::view)
        .theme(App::theme)
        .subscription(App::subscription)
        .window(window::Settings {
            size: iced::Size::new(config.window.width as f32, config.window.height as f32),
            position: window::Position::Centered,
            ..Default::default()
        })
        .default_font(Font::MONOSPACE)
        .run_with(App::new)
}

#[derive(Debug, Clone)]
pub enum Message {
    InputChanged(String),
    Submit,
    Settled(u64, Result<Answer, String>),
    Tick,
    CopyOutput,
    Exit,
}

struct App {
    state: QueryState,
    spinner_frame: usize,
    client: Arc<LawsClient>,
    input_id: Id,
}

impl App {
    fn new() -> (Self, Task<Message>) {
        let config = config::Config::load();
        let client = LawsClient::with_config(config.server.host);

        let input_id = Id::unique();
        let app = App {
            state: QueryState::new(),
            spinner_frame: 0,
            client: Arc::new(client),
            input_id: input_id.clone(),
        };

        (app, text_input::focus(input_id))
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::InputChanged(value) => {
                self.state.set_query(value);
                Task::none()
            }
            Message::Submit => {
                let Some(submission) = self.state.begin_submit() else {
                    return Task::none();
                };
                self.spinner_frame = 0;

                let client = self.client.clone();
                Task::future(async move {
                    let outcome = client
                        .query_laws(&submission.inquiry)
                        .await
                        .map_err(|e| e.surface_message());
                    Message::Settled(submission.generation, outcome)
                })
            }
            Message::Settled(generation, outcome) => {
                self.state.settle(generation, outcome);
                Task::none()
            }
            Message::Tick => {
                if self.state.is_loading() {
                    self.spinner_frame = (self.spinner_frame + 1) % view::TICKS_PER_CYCLE;
                }
                Task::none()
            }
            Message::CopyOutput => {
                if let Phase::Succeeded(answer) = self.state.phase() {
                    clipboard::write(answer.body_text().to_string())
                } else {
                    Task::none()
                }
            }
            Message::Exit => iced::exit(),
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        let timer = if self.state.is_loading() {
            time::every(Duration::from_millis(80)).map(|_| Message::Tick)
        } else {
            Subscription::none()
        };

        let events = event::listen_with(|event, _status, _id| {
            if let IcedEvent::Keyboard(keyboard::Event::KeyPressed {
                key: Key::Named(keyboard::key::Named::Escape),
                ..
            }) = event
            {
                Some(Message::Exit)
            } else {
                None
            }
        });

        Subscription::batch([timer, events])
    }

    fn view(&self) -> Element<Message> {
        view::render(&self.state, self.spinner_frame, &self.input_id)
    }

    fn theme(&self) -> Theme {
        Theme::Nord
    }
}
