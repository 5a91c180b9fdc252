//! Result aggregation and the per-group hit lists.
//!
//! The branch decision is a pure function over the query, the current
//! generation, and the latest search outcome, so the "no results" state
//! can never flash while a cycle is still in flight.

use std::collections::HashMap;

use iced::font::{self, Font};
use iced::widget::{column, container, image, row, scrollable, text, Space};
use iced::{Alignment, Element, Length, Padding};

use crate::app::{Message, SearchOutcome};
use crate::search::{Hit, SearchResponse};

use super::{highlight, theme};

const NAME_EMPHASIS: Font = Font {
    weight: font::Weight::Bold,
    ..Font::DEFAULT
};

#[derive(Debug, PartialEq)]
pub enum Branch<'a> {
    /// Blank query: nothing result-related is rendered.
    Hidden,
    /// Query present but no response for the current generation yet.
    Pending,
    /// Every group answered with zero hits.
    NoResults(&'a [SearchResponse]),
    /// At least one group has hits; all lists render as given.
    Grouped(&'a [SearchResponse]),
}

pub fn classify<'a>(
    query: &str,
    generation: u64,
    outcome: Option<&'a SearchOutcome>,
) -> Branch<'a> {
    if query.trim().is_empty() {
        return Branch::Hidden;
    }
    match outcome {
        Some(outcome) if outcome.generation == generation => {
            if outcome
                .responses
                .iter()
                .all(|response| response.hit_count == 0)
            {
                Branch::NoResults(&outcome.responses)
            } else {
                Branch::Grouped(&outcome.responses)
            }
        }
        _ => Branch::Pending,
    }
}

pub fn view<'a>(
    query: &'a str,
    generation: u64,
    outcome: Option<&'a SearchOutcome>,
    groups: &'a [String],
    logos: &'a HashMap<String, image::Handle>,
) -> Element<'a, Message> {
    match classify(query, generation, outcome) {
        Branch::Hidden => container(
            text("Type to search apps and DAOs...")
                .size(14)
                .color(theme::TEXT_MUTED),
        )
        .width(Length::Fill)
        .center_x(Length::Fill)
        .into(),

        Branch::Pending => column(groups.iter().map(|group| {
            group_section(
                group,
                container(text("Searching...").size(13).color(theme::TEXT_MUTED))
                    .padding(Padding::from([4.0, 12.0]))
                    .into(),
            )
        }))
        .spacing(12)
        .into(),

        Branch::NoResults(responses) => {
            let mut sections = column![
                text("No results").size(15).color(theme::TEXT),
                Space::with_height(8),
            ];
            for response in responses {
                sections = sections.push(group_section(
                    &response.group,
                    Space::with_height(4).into(),
                ));
            }
            sections.spacing(12).into()
        }

        Branch::Grouped(responses) => {
            let sections = column(responses.iter().map(|response| {
                group_section(&response.group, group_hits(response, query, logos))
            }))
            .spacing(12);
            scrollable(sections).height(Length::Fill).into()
        }
    }
}

fn group_section<'a>(group: &'a str, body: Element<'a, Message>) -> Element<'a, Message> {
    column![
        text(group).size(12).color(theme::TEXT_MUTED),
        Space::with_height(4),
        body,
    ]
    .spacing(0)
    .into()
}

/// One group's hits in backend order. An empty list is a valid state and
/// renders as an empty section.
fn group_hits<'a>(
    response: &'a SearchResponse,
    query: &'a str,
    logos: &'a HashMap<String, image::Handle>,
) -> Element<'a, Message> {
    column(
        response
            .hits
            .iter()
            .map(|hit| hit_row(hit, query, logos.get(&hit.logo))),
    )
    .spacing(4)
    .into()
}

/// Render one hit: logo, highlighted name, description. Pure function of
/// its inputs.
fn hit_row<'a>(
    hit: &'a Hit,
    query: &'a str,
    logo: Option<&'a image::Handle>,
) -> Element<'a, Message> {
    let logo_element: Element<'a, Message> = match logo {
        Some(handle) => container(image(handle.clone()).width(32).height(32))
            .width(40)
            .center_x(40)
            .into(),
        None => container(text("●").size(20).color(theme::PRIMARY))
            .width(40)
            .center_x(40)
            .into(),
    };

    let name_spans =
        highlight::segments(&hit.name, query, hit.highlight_snippet.as_deref());
    let name = row(name_spans.into_iter().map(|segment| -> Element<'a, Message> {
        let span = text(segment.text).size(15);
        if segment.emphasized {
            span.font(NAME_EMPHASIS).color(theme::PRIMARY).into()
        } else {
            span.color(theme::TEXT).into()
        }
    }));

    container(
        row![
            logo_element,
            column![
                name,
                text(&hit.description).size(12).color(theme::TEXT_MUTED),
            ]
            .spacing(2),
        ]
        .spacing(12)
        .align_y(Alignment::Center),
    )
    .padding(Padding::from([8.0, 12.0]))
    .width(Length::Fill)
    .into()
}
