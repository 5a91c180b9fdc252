//! Command palette overlay, toggled with meta+K.
//!
//! Carries the same query input as the inline bar plus a fixed,
//! unfiltered suggestion list under a "Suggestions" heading.

use iced::widget::{column, container, mouse_area, stack, text, Space};
use iced::{Background, Border, Element, Length, Padding};

use crate::app::Message;

use super::{search_bar, theme};

pub struct Suggestion {
    pub label: &'static str,
}

/// Static suggestion items. Not filtered by the query.
pub const SUGGESTIONS: &[Suggestion] = &[
    Suggestion { label: "Swap" },
    Suggestion { label: "shain.eth" },
];

/// Full-screen overlay: dimmed scrim that closes on click, with the
/// palette panel centered on top.
pub fn view(query: &str, cursor: usize) -> Element<'_, Message> {
    let scrim = mouse_area(
        container(Space::new(Length::Fill, Length::Fill))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme| container::Style {
                background: Some(Background::Color(theme::OVERLAY_SCRIM)),
                ..Default::default()
            }),
    )
    .on_press(Message::PaletteClosed);

    let input = search_bar::view(query, Message::QueryChanged, Message::SubmitPressed);

    let mut list = column![
        text("Suggestions").size(12).color(theme::TEXT_MUTED),
        Space::with_height(6),
    ]
    .spacing(2);

    for (index, suggestion) in SUGGESTIONS.iter().enumerate() {
        list = list.push(suggestion_row(suggestion, index, index == cursor));
    }

    let panel = container(
        column![
            input,
            Space::with_height(12),
            list,
            Space::with_height(8),
            text("enter select · esc close")
                .size(11)
                .color(theme::TEXT_MUTED),
        ]
        .spacing(0),
    )
    .padding(16)
    .width(650)
    .style(|_theme| container::Style {
        background: Some(Background::Color(theme::BACKGROUND)),
        border: Border {
            color: theme::BORDER,
            width: 1.0,
            radius: 16.0.into(),
        },
        ..Default::default()
    });

    stack![
        scrim,
        container(panel)
            .center_x(Length::Fill)
            .center_y(Length::Fill),
    ]
    .into()
}

fn suggestion_row(
    suggestion: &'static Suggestion,
    index: usize,
    is_selected: bool,
) -> Element<'static, Message> {
    mouse_area(
        container(text(suggestion.label).size(15).color(theme::TEXT))
            .padding(Padding::from([8.0, 12.0]))
            .width(Length::Fill)
            .style(move |_theme| container::Style {
                background: Some(Background::Color(if is_selected {
                    theme::SELECTION
                } else {
                    iced::Color::TRANSPARENT
                })),
                border: Border::default().rounded(8),
                ..Default::default()
            }),
    )
    .on_press(Message::SuggestionSelected(index))
    .into()
}
