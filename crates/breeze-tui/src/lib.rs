//! breeze TUI — ratatui application shell.

pub mod app;
pub mod event;
pub mod theme;
pub mod widgets;

pub use app::App;

use anyhow::Context;
use breeze_core::config::Config;
use breeze_geo::GeoClient;

/// Start the TUI with the given configuration.
///
/// Owns the tokio runtime: the UI loop runs synchronously on the calling
/// thread while geocoding lookups are spawned onto the runtime's workers.
pub fn run(config: Config) -> anyhow::Result<()> {
    let api_key = config.geocoding.api_key().context(
        "no geocoding API key configured — set OPENWEATHER_API_KEY or \
         `api_key` under [geocoding] in ~/.config/breeze/config.toml",
    )?;
    let client = GeoClient::from_config(&config.geocoding, api_key)?;
    let theme = theme::Theme::load(&config.ui.theme);

    let runtime = tokio::runtime::Runtime::new()?;
    let _guard = runtime.enter();

    App::new(config, theme, client).run()
}
