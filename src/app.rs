//! Core application state and Iced update/view implementation.
//!
//! Owns the single query string, the palette open/closed state, and the
//! latest search outcome. Every keystroke bumps a generation counter and
//! issues one search batch covering all registered groups; completions
//! carrying a stale generation are discarded, so the view always reflects
//! the last request rather than the last arrival.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use iced::keyboard::key::Named;
use iced::keyboard::{Key, Modifiers};
use iced::widget::{column, container, image, mouse_area, row, stack, text, Space};
use iced::{
    keyboard, Background, Border, Element, Event, Length, Padding, Subscription, Task, Theme,
};

use crate::search::{SearchAdapter, SearchResponse};
use crate::ui::{palette, results, search_bar, theme};

/// The responses of one completed search cycle, tagged with the
/// generation of the query that produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub generation: u64,
    pub responses: Vec<SearchResponse>,
}

pub struct App {
    query: String,
    generation: u64,
    outcome: Option<SearchOutcome>,
    palette_open: bool,
    suggestion_cursor: usize,
    adapter: Arc<SearchAdapter>,
    logos: HashMap<String, image::Handle>,
    logo_requested: HashSet<String>,
}

#[derive(Debug, Clone)]
pub enum Message {
    QueryChanged(String),
    SubmitPressed,
    SearchCompleted {
        generation: u64,
        result: Result<Vec<SearchResponse>, String>,
    },
    LogoLoaded {
        url: String,
        bytes: Option<Vec<u8>>,
    },
    PaletteOpened,
    PaletteClosed,
    SuggestionSelected(usize),
    IcedEvent(Event),
}

impl App {
    pub fn new(adapter: SearchAdapter) -> Self {
        App {
            query: String::new(),
            generation: 0,
            outcome: None,
            palette_open: false,
            suggestion_cursor: 0,
            adapter: Arc::new(adapter),
            logos: HashMap::new(),
            logo_requested: HashSet::new(),
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::QueryChanged(query) => self.set_query(query),

            Message::SubmitPressed => {
                if self.palette_open {
                    self.update(Message::SuggestionSelected(self.suggestion_cursor))
                } else {
                    Task::none()
                }
            }

            Message::SearchCompleted { generation, result } => {
                if generation != self.generation {
                    tracing::debug!(
                        generation,
                        current = self.generation,
                        "discarding stale search response"
                    );
                    return Task::none();
                }
                match result {
                    Ok(responses) => {
                        let logo_tasks = self.request_logos(&responses);
                        self.outcome = Some(SearchOutcome {
                            generation,
                            responses,
                        });
                        logo_tasks
                    }
                    Err(error) => {
                        tracing::warn!(%error, "search cycle failed, rendering empty results");
                        self.outcome = Some(SearchOutcome {
                            generation,
                            responses: self.adapter.empty_responses(),
                        });
                        Task::none()
                    }
                }
            }

            Message::LogoLoaded { url, bytes } => {
                match bytes {
                    Some(bytes) => {
                        self.logos.insert(url, image::Handle::from_bytes(bytes));
                    }
                    None => tracing::debug!(%url, "logo fetch failed"),
                }
                Task::none()
            }

            Message::PaletteOpened => {
                self.palette_open = true;
                self.suggestion_cursor = 0;
                Task::none()
            }

            Message::PaletteClosed => {
                self.palette_open = false;
                Task::none()
            }

            Message::SuggestionSelected(index) => {
                let Some(suggestion) = palette::SUGGESTIONS.get(index) else {
                    return Task::none();
                };
                tracing::info!(suggestion = suggestion.label, "suggestion selected");
                self.palette_open = false;
                self.set_query(suggestion.label.to_string())
            }

            Message::IcedEvent(event) => {
                if let Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) = event
                {
                    return self.handle_key(key, modifiers);
                }
                Task::none()
            }
        }
    }

    /// Write the shared query text and issue a fresh search batch. The
    /// adapter answers blank batches locally without a network call.
    fn set_query(&mut self, query: String) -> Task<Message> {
        self.query = query;
        self.generation += 1;
        let generation = self.generation;
        let adapter = self.adapter.clone();
        let requests = adapter.requests_for(&self.query);
        Task::perform(
            async move {
                adapter
                    .search_all(requests)
                    .await
                    .map_err(|error| error.to_string())
            },
            move |result| Message::SearchCompleted { generation, result },
        )
    }

    fn handle_key(&mut self, key: Key, modifiers: Modifiers) -> Task<Message> {
        match key.as_ref() {
            Key::Character("k") if modifiers.command() => {
                self.palette_open = !self.palette_open;
                if self.palette_open {
                    self.suggestion_cursor = 0;
                }
            }
            Key::Named(Named::Escape) => {
                if self.palette_open {
                    self.palette_open = false;
                } else if !self.query.is_empty() {
                    return self.set_query(String::new());
                }
            }
            Key::Named(Named::ArrowDown) if self.palette_open => {
                self.suggestion_cursor = (self.suggestion_cursor + 1) % palette::SUGGESTIONS.len();
            }
            Key::Named(Named::ArrowUp) if self.palette_open => {
                self.suggestion_cursor = if self.suggestion_cursor == 0 {
                    palette::SUGGESTIONS.len() - 1
                } else {
                    self.suggestion_cursor - 1
                };
            }
            _ => {}
        }
        Task::none()
    }

    /// Kick off one fetch per logo URL not seen before. Logos are cached
    /// by URL, so stale search generations cannot corrupt the cache.
    fn request_logos(&mut self, responses: &[SearchResponse]) -> Task<Message> {
        let mut tasks = Vec::new();
        for response in responses {
            for hit in &response.hits {
                let url = hit.logo.clone();
                if url.is_empty()
                    || self.logos.contains_key(&url)
                    || !self.logo_requested.insert(url.clone())
                {
                    continue;
                }
                let adapter = self.adapter.clone();
                tasks.push(Task::perform(
                    async move {
                        let bytes = adapter.fetch_logo(&url).await.ok();
                        (url, bytes)
                    },
                    |(url, bytes)| Message::LogoLoaded { url, bytes },
                ));
            }
        }
        Task::batch(tasks)
    }

    pub fn view(&self) -> Element<'_, Message> {
        let open_hint = mouse_area(
            container(text("⌘K").size(12).color(theme::TEXT_MUTED))
                .padding(Padding::from([8.0, 10.0]))
                .style(|_theme| container::Style {
                    background: Some(Background::Color(theme::SURFACE)),
                    border: Border {
                        color: theme::BORDER,
                        width: 1.0,
                        radius: 8.0.into(),
                    },
                    ..Default::default()
                }),
        )
        .on_press(Message::PaletteOpened);

        let content = column![
            row![
                search_bar::view(&self.query, Message::QueryChanged, Message::SubmitPressed),
                Space::with_width(8),
                open_hint,
            ]
            .align_y(iced::Alignment::Center),
            Space::with_height(12),
            results::view(
                &self.query,
                self.generation,
                self.outcome.as_ref(),
                self.adapter.groups(),
                &self.logos,
            ),
        ]
        .spacing(0);

        let page = container(
            container(content)
                .padding(16)
                .width(Length::Fill)
                .height(Length::Fill),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .style(|_theme| container::Style {
            background: Some(Background::Color(theme::BACKGROUND)),
            border: Border {
                color: theme::BORDER,
                width: 1.0,
                radius: 16.0.into(),
            },
            ..Default::default()
        });

        if self.palette_open {
            stack![page, palette::view(&self.query, self.suggestion_cursor)].into()
        } else {
            page.into()
        }
    }

    /// Declarative keyboard listener: present exactly while the app runs,
    /// so toggling the palette never leaks duplicate listeners.
    pub fn subscription(&self) -> Subscription<Message> {
        iced::event::listen().map(Message::IcedEvent)
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Protocol};
    use crate::search::types::Hit;

    fn app() -> App {
        let config = Config {
            api_key: "test-key".to_string(),
            host: "127.0.0.1".to_string(),
            port: 1,
            protocol: Protocol::Http,
            query_by: "name".to_string(),
            num_typos: 1,
        };
        App::new(SearchAdapter::new(&config).unwrap())
    }

    fn response(group: &str, names: &[&str]) -> SearchResponse {
        SearchResponse {
            group: group.to_string(),
            hits: names
                .iter()
                .map(|name| Hit {
                    logo: String::new(),
                    name: name.to_string(),
                    description: String::new(),
                    highlight_snippet: None,
                    extra: serde_json::Map::new(),
                })
                .collect(),
            hit_count: names.len(),
            page: 1,
            processing_time_ms: 1,
        }
    }

    #[test]
    fn meta_k_toggles_palette_once_per_press() {
        let mut app = app();
        assert!(!app.palette_open);

        let _ = app.handle_key(Key::Character("k".into()), Modifiers::COMMAND);
        assert!(app.palette_open);

        let _ = app.handle_key(Key::Character("k".into()), Modifiers::COMMAND);
        assert!(!app.palette_open);
    }

    #[test]
    fn explicit_open_and_close_requests_work() {
        let mut app = app();
        let _ = app.update(Message::PaletteOpened);
        assert!(app.palette_open);
        let _ = app.update(Message::PaletteClosed);
        assert!(!app.palette_open);
    }

    #[test]
    fn plain_k_does_not_toggle_palette() {
        let mut app = app();
        let _ = app.handle_key(Key::Character("k".into()), Modifiers::empty());
        assert!(!app.palette_open);
    }

    #[test]
    fn escape_closes_palette_before_clearing_query() {
        let mut app = app();
        app.palette_open = true;
        app.query = "swap".to_string();

        let _ = app.handle_key(Key::Named(Named::Escape), Modifiers::empty());
        assert!(!app.palette_open);
        assert_eq!(app.query, "swap");

        let _ = app.handle_key(Key::Named(Named::Escape), Modifiers::empty());
        assert_eq!(app.query, "");
    }

    #[test]
    fn late_response_for_superseded_query_is_discarded() {
        let mut app = app();

        let _ = app.update(Message::QueryChanged("sw".to_string()));
        let generation_a = app.generation;
        let _ = app.update(Message::QueryChanged("swap".to_string()));
        let generation_b = app.generation;
        assert!(generation_b > generation_a);

        // B's response arrives first and is applied.
        let _ = app.update(Message::SearchCompleted {
            generation: generation_b,
            result: Ok(vec![response("apps", &["Swap"]), response("DAOs", &[])]),
        });

        // A's response arrives late and must not overwrite B's.
        let _ = app.update(Message::SearchCompleted {
            generation: generation_a,
            result: Ok(vec![response("apps", &["Swatch"]), response("DAOs", &[])]),
        });

        let outcome = app.outcome.as_ref().unwrap();
        assert_eq!(outcome.generation, generation_b);
        assert_eq!(outcome.responses[0].hits[0].name, "Swap");
    }

    #[test]
    fn failed_cycle_renders_empty_results_for_every_group() {
        let mut app = app();
        let _ = app.update(Message::QueryChanged("swap".to_string()));
        let generation = app.generation;

        let _ = app.update(Message::SearchCompleted {
            generation,
            result: Err("connection refused".to_string()),
        });

        let outcome = app.outcome.as_ref().unwrap();
        assert_eq!(outcome.generation, generation);
        let groups: Vec<&str> = outcome
            .responses
            .iter()
            .map(|response| response.group.as_str())
            .collect();
        assert_eq!(groups, vec!["apps", "DAOs"]);
        assert!(outcome
            .responses
            .iter()
            .all(|response| response.hit_count == 0));
    }

    #[test]
    fn selecting_a_suggestion_populates_the_query_and_closes_the_palette() {
        let mut app = app();
        app.palette_open = true;

        let _ = app.update(Message::SuggestionSelected(0));
        assert!(!app.palette_open);
        assert_eq!(app.query, "Swap");

        // The populated query drives a real search generation.
        assert!(app.generation > 0);
    }

    #[test]
    fn arrow_keys_wrap_the_suggestion_cursor() {
        let mut app = app();
        app.palette_open = true;
        assert_eq!(app.suggestion_cursor, 0);

        let _ = app.handle_key(Key::Named(Named::ArrowDown), Modifiers::empty());
        assert_eq!(app.suggestion_cursor, 1);
        let _ = app.handle_key(Key::Named(Named::ArrowDown), Modifiers::empty());
        assert_eq!(app.suggestion_cursor, 0);
        let _ = app.handle_key(Key::Named(Named::ArrowUp), Modifiers::empty());
        assert_eq!(app.suggestion_cursor, palette::SUGGESTIONS.len() - 1);
    }
}
