//! Configuration for the carousel shell
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/clinic-carousel/config.toml)
//! 3. Built-in defaults (lowest priority)

use anyhow::{Context, Result};
use serde::Deserialize;
use std::num::NonZeroUsize;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod carousel;
mod observability;
mod serialization;


// ─────────────────────────────────────────────────────────────────────────────
// Re-exports
// ─────────────────────────────────────────────────────────────────────────────

pub use carousel::{default_slides, CarouselConfig, FileCarousel, Slide};
pub use observability::{FileLogging, LogRotation, LoggingConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Directory name under ~/.config
const APP_DIR: &str = "clinic-carousel";

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Whether to run the terminal shell (false = headless, log-only)
    pub enable_tui: bool,

    /// Carousel timing and gesture tuning
    pub carousel: CarouselConfig,

    /// Testimonial slides, in display order
    pub slides: Vec<Slide>,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enable_tui: true,
            carousel: CarouselConfig::default(),
            slides: default_slides(),
            logging: LoggingConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    /// Optional [carousel] section
    pub carousel: Option<FileCarousel>,

    /// Optional [[slides]] entries (replace the defaults when present)
    pub slides: Option<Vec<Slide>>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/clinic-carousel/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join(APP_DIR).join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Config is optional
            }
        }

        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Load file config if it exists
    ///
    /// A missing file means defaults. A file that exists but can't be read
    /// or parsed is an error: a broken config should fail loudly instead of
    /// silently falling back while the user edits the wrong thing.
    fn load_file_config() -> Result<FileConfig> {
        let Some(path) = Self::config_path() else {
            return Ok(FileConfig::default());
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => Self::parse_file_config(&contents)
                .with_context(|| format!("Failed to parse config file {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
            Err(e) => Err(e)
                .with_context(|| format!("Cannot read config file {}", path.display())),
        }
    }

    pub(crate) fn parse_file_config(contents: &str) -> Result<FileConfig> {
        Ok(toml::from_str(contents)?)
    }

    /// Load configuration: env > file > defaults
    pub fn load() -> Result<Self> {
        let file = Self::load_file_config()?;
        Ok(Self::from_sources(file, |key| std::env::var(key).ok()))
    }

    /// Load the file layer only (file > defaults, no env overrides)
    ///
    /// Used when rewriting the config file, so a one-off env override
    /// doesn't get saved as a user value.
    pub fn load_file_values() -> Result<Self> {
        Ok(Self::from_file_only(Self::load_file_config()?))
    }

    pub(crate) fn from_file_only(file: FileConfig) -> Self {
        Self::from_sources(file, |_| None)
    }

    /// Merge a parsed file with an environment lookup
    pub(crate) fn from_sources(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        // TUI toggle: env only (runtime flag)
        let enable_tui = env("CAROUSEL_NO_TUI")
            .map(|v| v != "1" && v.to_lowercase() != "true")
            .unwrap_or(true);

        let mut carousel = CarouselConfig::from_file(file.carousel);
        if let Some(ms) = env("CAROUSEL_AUTOPLAY_MS").and_then(|v| v.parse().ok()) {
            carousel.autoplay_interval_ms = ms;
        }

        let slides = file.slides.unwrap_or_else(default_slides);

        let mut logging = LoggingConfig::from_file(file.logging);
        if let Some(level) = env("CAROUSEL_LOG_LEVEL") {
            logging.level = level;
        }

        Self {
            enable_tui,
            carousel,
            slides,
            logging,
        }
    }

    /// Number of slides, which must be at least one
    pub fn slide_count(&self) -> Result<NonZeroUsize> {
        NonZeroUsize::new(self.slides.len())
            .context("Config must define at least one [[slides]] entry")
    }
}
