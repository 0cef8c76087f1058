//! `tabslide-demo` — sliding tab bars in a live terminal.
//!
//! Mounts two bars: one built from the config file (or `--tabs`) and a
//! fixed period selector. Click a tab or use the arrow keys; `r` advances
//! the period selection from outside its widget to show the indicator
//! following an external writer.
//!
//! Logs are written to a file (default `/tmp/tabslide-demo.log`) to avoid
//! corrupting the terminal UI.

mod action;
mod app;
mod component;
mod event;
mod tab_bar;
mod theme;
mod tui;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use tabslide_config::{Config, TabEntry};

use crate::app::App;

/// Sliding tab selector demo.
#[derive(Parser, Debug)]
#[command(name = "tabslide-demo", version, about)]
struct Cli {
    /// Config file (defaults to the platform config dir)
    #[arg(short, long, env = "TABSLIDE_CONFIG")]
    config: Option<PathBuf>,

    /// Comma-separated tab labels, overriding the config file
    #[arg(short, long, value_delimiter = ',')]
    tabs: Vec<String>,

    /// Log file path
    #[arg(long, default_value = "/tmp/tabslide-demo.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// File-based tracing; stdout belongs to the TUI. Hold the returned guard
/// for the lifetime of the app so logs get flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("tabslide={log_level},tabslide_demo={log_level}"))
    });

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("tabslide-demo.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    guard
}

/// Config file (explicit path or default location), then CLI overrides.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => tabslide_config::load_config_from(path)?,
        None => tabslide_config::load_config()?,
    };

    if !cli.tabs.is_empty() {
        config.tabs = cli.tabs.iter().cloned().map(TabEntry::Label).collect();
        config.selected = 0;
        config.validate()?;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tui::install_hooks()?;
    let _log_guard = setup_tracing(&cli);

    let config = load_config(&cli)?;
    info!(tabs = config.tabs.len(), "starting tabslide-demo");

    let mut app = App::new(&config)?;
    app.run().await?;

    Ok(())
}
