use clap::Parser;

#[derive(Parser)]
#[command(name = "breeze", about = "breeze — terminal city search for weather lookup")]
struct Cli {
    /// Write debug logs to /tmp/breeze-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,

    /// Geocoding API key; overrides the config file (the
    /// OPENWEATHER_API_KEY environment variable takes precedence over both).
    #[arg(long)]
    api_key: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/breeze-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("breeze debug log started — tail -f /tmp/breeze-debug.log");
    }

    let mut config = breeze_core::config::Config::load()
        .unwrap_or_else(|_| breeze_core::config::Config::defaults());
    if cli.api_key.is_some() {
        config.geocoding.api_key = cli.api_key;
    }

    breeze_tui::run(config)
}
