use iced::{
    alignment,
    font::Weight,
    widget::{button, column, container, scrollable, text, text_input, text_input::Id},
    Element, Font, Length,
};

use crate::api::{Answer, Citation, QueryResponse};
use crate::state::{Phase, QueryState};
use crate::Message;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const LOADING_LINES: [&str; 4] = [
    "Consulting the statutes...",
    "Leafing through the codex...",
    "Weighing the precedents...",
    "Drafting an opinion...",
];

pub const TICKS_PER_CYCLE: usize = SPINNER_FRAMES.len() * LOADING_LINES.len();

pub fn submit_label(loading: bool) -> &'static str {
    if loading {
        "Querying…"
    } else {
        "Submit"
    }
}

pub fn citations_header(count: usize) -> String {
    format!("Citations ({})", count)
}

fn bold() -> Font {
    Font {
        weight: Weight::Bold,
        ..Font::MONOSPACE
    }
}

/// Projects the state container into the widget tree. The input form is
/// always present; exactly one of spinner, error slot or result section
/// follows it, per the current phase.
pub fn render<'a>(state: &'a QueryState, spinner_frame: usize, input_id: &Id) -> Element<'a, Message> {
    let input = text_input("e.g. What happens if I steal?", state.query())
        .on_input(Message::InputChanged)
        .on_submit(Message::Submit)
        .padding(12)
        .size(16)
        .id(input_id.clone());

    let mut submit = button(text(submit_label(state.is_loading())).size(14)).padding(10);
    if !state.is_loading() {
        submit = submit.on_press(Message::Submit);
    }

    let form = column![text("Enter your legal question").size(14), input, submit].spacing(8);

    let mut page = column![text("Query Laws").size(24).font(bold()), form]
        .spacing(16)
        .padding(16);

    match state.phase() {
        Phase::Idle => {}
        Phase::Loading => {
            page = page.push(loading_indicator(spinner_frame));
        }
        Phase::Failed(message) => {
            page = page.push(text(message.as_str()).size(14).style(text::danger));
        }
        Phase::Succeeded(answer) => {
            page = page.push(answer_section(answer));
            page = page.push(copy_button());
        }
    }

    scrollable(container(page).width(Length::Fill))
        .height(Length::Fill)
        .into()
}

fn loading_indicator(frame: usize) -> Element<'static, Message> {
    let glyph = SPINNER_FRAMES[frame % SPINNER_FRAMES.len()];
    let line = LOADING_LINES[(frame / SPINNER_FRAMES.len()) % LOADING_LINES.len()];

    container(
        column![text(glyph).size(28), text(line).size(14)]
            .spacing(8)
            .align_x(alignment::Horizontal::Center),
    )
    .width(Length::Fill)
    .align_x(alignment::Horizontal::Center)
    .padding(24)
    .into()
}

fn answer_section(answer: &Answer) -> Element<'_, Message> {
    match answer {
        Answer::Plain(body) | Answer::Opaque(body) => plain_section(body),
        Answer::Structured(result) => structured_section(result),
    }
}

fn plain_section(body: &str) -> Element<'_, Message> {
    column![
        text("Answer").size(18).font(bold()),
        text(body).size(15),
    ]
    .spacing(8)
    .into()
}

fn structured_section(result: &QueryResponse) -> Element<'_, Message> {
    let mut section = column![
        text(result.query.as_str()).size(14).font(bold()),
        text(result.response.as_str()).size(15),
    ]
    .spacing(10);

    if !result.citations.is_empty() {
        let mut list = column![text(citations_header(result.citations.len()))
            .size(16)
            .font(bold())]
        .spacing(8);
        for citation in &result.citations {
            list = list.push(citation_entry(citation));
        }
        section = section.push(list);
    }

    section.into()
}

fn citation_entry(citation: &Citation) -> Element<'_, Message> {
    column![
        text(citation.source.as_str()).size(14).font(bold()),
        text(citation.text.as_str()).size(14),
    ]
    .spacing(2)
    .into()
}

fn copy_button() -> Element<'static, Message> {
    container(
        button(text("[Copy]").size(13))
            .on_press(Message::CopyOutput)
            .padding(8),
    )
    .width(Length::Fill)
    .align_x(alignment::Horizontal::Right)
    .into()
}
