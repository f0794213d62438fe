mod app;
mod application;
mod config;
mod domain;
mod net;
mod storage;
mod ui;
mod utils;

use clap::Parser;
use iced::{window, Size};
use tracing_subscriber::EnvFilter;

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("save_it=info")),
        )
        .init();

    let config = config::AppConfig::parse();
    tracing::debug!("Starting with {:?}", config);

    iced::application(move || app::DownloadApp::new(&config), app::update, app::view)
        .title("Save It")
        .window(window::Settings {
            size: Size::new(480.0, 640.0),
            ..Default::default()
        })
        .run()
}
