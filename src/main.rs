mod actions;
mod app;
mod catalog;
mod clouds;
mod config;
mod lookup;
mod request;
mod response;
mod state;
mod types;
mod ui;
mod utils;

use app::App;
use catalog::Catalog;
use color_eyre::Result;
use config::Config;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Logs live next to the config file; the terminal belongs to the UI
fn log_dir() -> PathBuf {
    Config::config_path()
        .ok()
        .and_then(|path| path.parent().map(PathBuf::from))
        .unwrap_or_else(std::env::temp_dir)
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let file_appender = tracing_appender::rolling::never(log_dir(), "graph-explorer-tui.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::load().unwrap_or_else(|e| {
        warn!(error = %e, "config unavailable, settings will not be saved");
        Config::default()
    });
    info!(path = ?config.path(), "config loaded");

    let catalog = match Catalog::load(config.explorer.catalog_path.as_deref()) {
        Ok(catalog) => catalog,
        Err(e) => {
            warn!(error = %e, "falling back to the bundled catalog");
            Catalog::bundled().map_err(|e| color_eyre::eyre::eyre!("{e:#}"))?
        }
    };

    let terminal = ratatui::init();
    let app_result = App::new(config, catalog).run(terminal).await;
    ratatui::restore();
    app_result
}
