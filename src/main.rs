// Clinic Carousel - testimonial slide carousel in the terminal
//
// A single carousel controller presents one patient testimonial at a time,
// advancing on its own and yielding to buttons, indicator dots, arrow
// keys and swipes.
//
// Architecture:
// - Carousel (controller): slide index, transition lock, autoplay timer
// - Runtime (tokio task): serializes user input and timer fires through one queue
// - TUI (ratatui): renders the slide track and maps terminal input to stimuli
// - Headless: logs every slide change instead of drawing it

mod carousel;
mod cli;
mod config;
mod logging;
mod tui;

use anyhow::Result;
use carousel::{CarouselRuntime, ChannelSurface, LogSurface};
use clap::Parser;
use config::{Config, LogRotation, LoggingConfig};
use logging::{LogBuffer, TuiLogLayer};
use tokio::sync::oneshot;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

/// Initialize tracing
///
/// TUI mode captures logs into the buffer (stdout would garble the display);
/// headless mode writes them to stdout. File logging is added on top when
/// enabled. Precedence: RUST_LOG env var > config file > default "info".
///
/// The returned guard must be kept alive so the file writer flushes.
fn init_tracing(
    logging: &LoggingConfig,
    enable_tui: bool,
    log_buffer: &LogBuffer,
) -> Option<WorkerGuard> {
    let default_filter = format!("clinic_carousel={}", logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();
    if enable_tui {
        layers.push(TuiLogLayer::new(log_buffer.clone()).boxed());
    } else {
        layers.push(tracing_subscriber::fmt::layer().boxed());
    }

    let mut guard = None;
    if logging.file_enabled {
        match std::fs::create_dir_all(&logging.file_dir) {
            Ok(()) => {
                let appender = match logging.file_rotation {
                    LogRotation::Hourly => {
                        tracing_appender::rolling::hourly(&logging.file_dir, &logging.file_prefix)
                    }
                    LogRotation::Daily => {
                        tracing_appender::rolling::daily(&logging.file_dir, &logging.file_prefix)
                    }
                    LogRotation::Never => {
                        tracing_appender::rolling::never(&logging.file_dir, &logging.file_prefix)
                    }
                };
                // Writes happen on a background thread; JSON for structured parsing
                let (non_blocking, file_guard) = tracing_appender::non_blocking(appender);
                layers.push(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking)
                        .with_ansi(false)
                        .boxed(),
                );
                guard = Some(file_guard);
            }
            Err(e) => {
                // Fall back to non-file logging
                eprintln!(
                    "Warning: Could not create log directory {:?}: {}",
                    logging.file_dir, e
                );
            }
        }
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Config subcommands exit early
    if cli::handle_cli(&cli) {
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let mut config = Config::load()?;
    if cli.headless {
        config.enable_tui = false;
    }
    let slide_count = config.slide_count()?;

    let log_buffer = LogBuffer::new();
    let _file_guard = init_tracing(&config.logging, config.enable_tui, &log_buffer);

    let settings = config.carousel.settings();
    tracing::info!(
        slides = slide_count.get(),
        autoplay_ms = config.carousel.autoplay_interval_ms,
        "Starting clinic-carousel v{}",
        config::VERSION
    );

    // Oneshot: the runtime stops when this fires or is dropped
    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    if config.enable_tui {
        let (surface, updates) = ChannelSurface::channel();
        let (runtime, stimuli) = CarouselRuntime::new(slide_count, settings, surface);
        let runtime_handle = tokio::spawn(runtime.run(shutdown_rx));

        if let Err(e) = tui::run_tui(stimuli, updates, log_buffer, &config).await {
            tracing::error!("TUI error: {:?}", e);
        }

        let _ = shutdown_tx.send(());
        let _ = runtime_handle.await;
    } else {
        let labels = config.slides.iter().map(|s| s.author.clone()).collect();
        let (runtime, _stimuli) = CarouselRuntime::new(slide_count, settings, LogSurface::new(labels));
        let runtime_handle = tokio::spawn(runtime.run(shutdown_rx));

        tracing::info!("TUI disabled, running headless (Ctrl+C to stop)");
        tokio::signal::ctrl_c().await?;

        let _ = shutdown_tx.send(());
        let _ = runtime_handle.await;
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
