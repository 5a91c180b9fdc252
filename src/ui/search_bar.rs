//! Inline query input, always mounted at the top of the page.

use iced::widget::{container, text_input};
use iced::{Background, Border, Color, Element, Length, Padding};

use super::theme;

pub const PLACEHOLDER: &str = "Search for apps and commands...";

/// Styled text input bound to the shared query text.
pub fn view<'a, Message: Clone + 'a>(
    value: &str,
    on_input: impl Fn(String) -> Message + 'a,
    on_submit: Message,
) -> Element<'a, Message> {
    container(
        text_input(PLACEHOLDER, value)
            .on_input(on_input)
            .on_submit(on_submit)
            .padding(Padding::new(16.0))
            .size(20)
            .style(|_theme, _status| text_input::Style {
                background: Background::Color(Color::TRANSPARENT),
                border: Border::default(),
                icon: theme::TEXT_MUTED,
                placeholder: theme::TEXT_PLACEHOLDER,
                value: theme::TEXT,
                selection: theme::PRIMARY,
            }),
    )
    .padding(Padding::from([4.0, 8.0]))
    .width(Length::Fill)
    .style(|_theme| container::Style {
        background: Some(Background::Color(theme::SURFACE)),
        border: Border {
            color: theme::BORDER,
            width: 1.0,
            radius: 12.0.into(),
        },
        ..Default::default()
    })
    .into()
}
