//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::{Config, Slide};

/// Format a float as a TOML float (`50.0`, never `50` or `NaN`)
fn toml_float(f: f64) -> String {
    toml::Value::Float(f).to_string()
}

/// Quote a string as a TOML basic string (escapes quotes, backslashes, control chars)
fn toml_string(s: &str) -> String {
    toml::Value::String(s.to_string()).to_string()
}

impl Config {
    /// Serialize [[slides]] entries
    pub(super) fn slides_to_toml(&self) -> String {
        let mut output = String::new();
        for slide in &self.slides {
            output.push_str(&slide_to_toml(slide));
        }
        output
    }

    /// Generate the full config file, preserving current values
    pub fn to_toml(&self) -> String {
        format!(
            r#"# clinic-carousel configuration

# Carousel timings (milliseconds) and gesture tuning
[carousel]
# Navigation is locked this long after each slide change
transition_lock_ms = {lock}
# Autoplay advances to the next slide at this interval
autoplay_interval_ms = {autoplay}
# Autoplay restarts this long after a button, indicator, key or swipe
resume_delay_ms = {resume}
# Minimum horizontal drag distance for a swipe
swipe_threshold_px = {swipe}
# Pixels per terminal column when turning mouse drags into swipes
cell_width_px = {cell}

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = {log_level}
# File logging (in addition to TUI buffer or stdout)
file_enabled = {log_file_enabled}
file_dir = {log_file_dir}
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = {log_file_prefix}

# ─────────────────────────────────────────────────────────────────────────────
# SLIDES
# ─────────────────────────────────────────────────────────────────────────────
# Testimonials in display order. At least one is required.
{slides}"#,
            lock = self.carousel.transition_lock_ms,
            autoplay = self.carousel.autoplay_interval_ms,
            resume = self.carousel.resume_delay_ms,
            swipe = toml_float(self.carousel.swipe_threshold_px),
            cell = toml_float(self.carousel.cell_width_px),
            log_level = toml_string(&self.logging.level),
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = toml_string(&self.logging.file_dir.display().to_string()),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = toml_string(&self.logging.file_prefix),
            slides = self.slides_to_toml(),
        )
    }
}

fn slide_to_toml(slide: &Slide) -> String {
    let mut output = String::from("\n[[slides]]\n");
    output.push_str(&format!("quote = {}\n", toml_string(&slide.quote)));
    output.push_str(&format!("author = {}\n", toml_string(&slide.author)));
    if !slide.detail.is_empty() {
        output.push_str(&format!("detail = {}\n", toml_string(&slide.detail)));
    }
    output
}
