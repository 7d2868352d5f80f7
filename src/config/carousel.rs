//! Carousel configuration: timings, gesture threshold, and slide content

use crate::carousel::CarouselSettings;
use serde::Deserialize;
use std::time::Duration;

// ─────────────────────────────────────────────────────────────────────────────
// Timings
// ─────────────────────────────────────────────────────────────────────────────

/// Carousel tuning
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselConfig {
    /// Navigation lock after each slide change (ms)
    pub transition_lock_ms: u64,
    /// Autoplay period (ms)
    pub autoplay_interval_ms: u64,
    /// Delay before autoplay resumes after a manual interaction (ms)
    pub resume_delay_ms: u64,
    /// Minimum horizontal drag distance that counts as a swipe (px)
    pub swipe_threshold_px: f64,
    /// Pixels per terminal column when converting mouse drags to swipes
    pub cell_width_px: f64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            transition_lock_ms: 500,
            autoplay_interval_ms: 7000,
            resume_delay_ms: 1000,
            swipe_threshold_px: 50.0,
            cell_width_px: 10.0,
        }
    }
}

/// Carousel settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileCarousel {
    pub transition_lock_ms: Option<u64>,
    pub autoplay_interval_ms: Option<u64>,
    pub resume_delay_ms: Option<u64>,
    pub swipe_threshold_px: Option<f64>,
    pub cell_width_px: Option<f64>,
}

impl CarouselConfig {
    /// Create from file config with defaults
    ///
    /// A non-finite or negative swipe threshold and a non-positive cell
    /// width fall back to the defaults.
    pub fn from_file(file: Option<FileCarousel>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            transition_lock_ms: file
                .transition_lock_ms
                .unwrap_or(defaults.transition_lock_ms),
            autoplay_interval_ms: file
                .autoplay_interval_ms
                .unwrap_or(defaults.autoplay_interval_ms),
            resume_delay_ms: file.resume_delay_ms.unwrap_or(defaults.resume_delay_ms),
            swipe_threshold_px: file
                .swipe_threshold_px
                .filter(|px| px.is_finite() && *px >= 0.0)
                .unwrap_or(defaults.swipe_threshold_px),
            cell_width_px: file
                .cell_width_px
                .filter(|px| px.is_finite() && *px > 0.0)
                .unwrap_or(defaults.cell_width_px),
        }
    }

    /// Controller settings derived from this config
    pub fn settings(&self) -> CarouselSettings {
        CarouselSettings {
            transition_lock: Duration::from_millis(self.transition_lock_ms),
            autoplay_interval: Duration::from_millis(self.autoplay_interval_ms),
            resume_delay: Duration::from_millis(self.resume_delay_ms),
            swipe_threshold: self.swipe_threshold_px,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Slides
// ─────────────────────────────────────────────────────────────────────────────

/// One testimonial panel
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Slide {
    pub quote: String,
    pub author: String,
    /// Secondary line under the author (e.g. "Patient since 2015")
    #[serde(default)]
    pub detail: String,
}

impl Slide {
    pub fn new(quote: &str, author: &str, detail: &str) -> Self {
        Self {
            quote: quote.to_string(),
            author: author.to_string(),
            detail: detail.to_string(),
        }
    }
}

/// Testimonials shown when the config file defines none
pub fn default_slides() -> Vec<Slide> {
    vec![
        Slide::new(
            "The staff took the time to explain every step of my treatment. I never felt rushed.",
            "Maria G.",
            "Patient since 2016",
        ),
        Slide::new(
            "Same-week appointments and a doctor who actually remembers my history.",
            "James T.",
            "Family care patient",
        ),
        Slide::new(
            "They caught what two other clinics missed. I trust them with my whole family.",
            "Aisha R.",
            "Pediatrics & family medicine",
        ),
        Slide::new(
            "Clean, calm, and on time. Booking a follow-up took less than a minute.",
            "Robert K.",
            "Patient since 2021",
        ),
    ]
}
