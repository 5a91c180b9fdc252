//! dapsearch: a search palette for apps and DAOs.
//!
//! Type to search both groups against the hosted search service; press
//! meta+K to toggle the command palette overlay. Connection settings come
//! from the environment (SEARCH_API_KEY, SEARCH_HOST, SEARCH_PORT,
//! SEARCH_PROTOCOL) and are validated before the window opens.

mod app;
mod config;
mod search;
mod ui;

use app::App;
use config::Config;
use iced::{window, Size, Task};
use search::SearchAdapter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> iced::Result {
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(error) => {
            tracing::error!(%error, "invalid search configuration");
            std::process::exit(1);
        }
    };

    let adapter = match SearchAdapter::new(&config) {
        Ok(adapter) => adapter,
        Err(error) => {
            tracing::error!(%error, "could not build search client");
            std::process::exit(1);
        }
    };

    tracing::info!(
        host = %config.host,
        port = config.port,
        protocol = config.protocol.as_str(),
        "starting dapsearch"
    );

    iced::application("dapsearch", App::update, App::view)
        .subscription(App::subscription)
        .theme(App::theme)
        .window(window::Settings {
            size: Size::new(760.0, 560.0),
            position: window::Position::Centered,
            decorations: false,
            transparent: true,
            level: window::Level::AlwaysOnTop,
            resizable: true,
            ..Default::default()
        })
        .antialiasing(true)
        .run_with(move || (App::new(adapter), Task::none()))
}
