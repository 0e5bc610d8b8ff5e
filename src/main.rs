use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

use mediadash::api::ApiClient;
use mediadash::app::App;
use mediadash::config;

/// Terminal dashboard for a media upload server.
#[derive(Parser, Debug)]
#[command(name = "mediadash", version, about)]
struct Args {
    /// Server base URL; overrides the configured value
    #[arg(long)]
    server: Option<String>,

    /// Where to write the log (the terminal belongs to the UI)
    #[arg(long, default_value = "mediadash.log")]
    log_file: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_file = File::create(&args.log_file)
        .with_context(|| format!("Failed to create log file: {:?}", args.log_file))?;
    WriteLogger::init(
        LevelFilter::Info,
        ConfigBuilder::new().set_time_format_rfc3339().build(),
        log_file,
    )
    .context("Failed to initialize logger")?;

    // Load configuration at startup; the CLI flag wins over the file
    let config = config::load_config().context("Failed to load configuration")?;
    let server_url = args.server.unwrap_or(config.server_url);
    info!("Starting mediadash against {}", server_url);

    let api = ApiClient::new(&server_url)?;
    App::new(api).run().await
}
