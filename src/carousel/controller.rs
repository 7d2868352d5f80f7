//! Carousel controller
//!
//! Presents exactly one of N slides at a time and advances on its own.
//! Buttons, indicators, arrow keys and swipes override the autoplay. The
//! transition lock keeps two visual transitions from overlapping: a
//! navigation request that arrives while the lock is held is dropped, not
//! queued.
//!
//! All timing goes through [`TimerDriver`]. The controller owns every
//! [`TimerId`] it arms and forgets it on cancel, so a fire for an id it no
//! longer holds is ignored.

use super::ports::{SlideSurface, TimerDriver, TimerId};
use super::stimulus::Stimulus;
use std::num::NonZeroUsize;
use std::time::Duration;

/// Timing and gesture tuning for one carousel
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselSettings {
    /// How long navigation stays locked after a slide change
    pub transition_lock: Duration,
    /// Period of the autoplay timer
    pub autoplay_interval: Duration,
    /// Delay before autoplay restarts after a manual interaction
    pub resume_delay: Duration,
    /// Minimum horizontal travel (pixels) for a swipe to count
    pub swipe_threshold: f64,
}

impl Default for CarouselSettings {
    fn default() -> Self {
        Self {
            transition_lock: Duration::from_millis(500),
            autoplay_interval: Duration::from_millis(7000),
            resume_delay: Duration::from_millis(1000),
            swipe_threshold: 50.0,
        }
    }
}

/// Carousel state plus the two ports it drives
pub struct Carousel<S, T> {
    slide_count: NonZeroUsize,
    current_index: usize,
    is_transitioning: bool,

    /// Recurring autoplay timer, present iff autoplay is active
    autoplay: Option<TimerId>,
    /// One-shot that releases the transition lock
    unlock: Option<TimerId>,
    /// One-shot that restarts autoplay after a manual interaction
    resume: Option<TimerId>,

    touch_start_x: Option<f64>,
    touch_end_x: Option<f64>,

    settings: CarouselSettings,
    surface: S,
    timers: T,
}

impl<S: SlideSurface, T: TimerDriver> Carousel<S, T> {
    pub fn new(
        slide_count: NonZeroUsize,
        settings: CarouselSettings,
        surface: S,
        timers: T,
    ) -> Self {
        Self {
            slide_count,
            current_index: 0,
            is_transitioning: false,
            autoplay: None,
            unlock: None,
            resume: None,
            touch_start_x: None,
            touch_end_x: None,
            settings,
            surface,
            timers,
        }
    }

    /// Show the first slide and begin autoplay
    pub fn start(&mut self) {
        tracing::info!(slides = self.slide_count.get(), "Carousel started");
        self.go_to_slide(0);
        self.start_autoplay();
    }

    /// Cancel every timer this carousel owns
    pub fn shutdown(&mut self) {
        for id in [self.autoplay.take(), self.unlock.take(), self.resume.take()]
            .into_iter()
            .flatten()
        {
            self.timers.cancel(id);
        }
        tracing::debug!("Carousel timers cancelled");
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn is_transitioning(&self) -> bool {
        self.is_transitioning
    }

    pub fn is_autoplaying(&self) -> bool {
        self.autoplay.is_some()
    }

    /// Map one inbound event to carousel actions
    pub fn handle(&mut self, stimulus: Stimulus) {
        tracing::trace!(stimulus = stimulus.name(), "Carousel stimulus");

        match stimulus {
            Stimulus::Previous | Stimulus::ArrowLeft => self.prev_slide(),
            Stimulus::Next | Stimulus::ArrowRight => self.next_slide(),
            Stimulus::Indicator(n) => self.go_to_slide(i64::try_from(n).unwrap_or(i64::MAX)),
            Stimulus::TouchStart { x } => {
                self.touch_start_x = Some(x);
                self.touch_end_x = None;
                self.stop_autoplay();
            }
            Stimulus::TouchEnd { x } => {
                self.touch_end_x = Some(x);
                // An end without a recorded start (e.g. press began outside) is not a swipe
                if let (Some(start), Some(end)) = (self.touch_start_x.take(), self.touch_end_x) {
                    self.handle_swipe_gesture(start, end);
                }
                self.schedule_resume();
            }
            Stimulus::PointerEnter | Stimulus::PageHidden => {
                self.stop_autoplay();
                self.cancel_resume();
            }
            Stimulus::PointerLeave | Stimulus::PageVisible => {
                self.start_autoplay();
            }
            Stimulus::TimerFired(id) => self.on_timer(id),
        }

        // Even a request dropped by the lock counts as an interaction
        if stimulus.is_manual_navigation() {
            self.pause_then_resume();
        }
    }

    /// Move to `target`, wrapping around both ends
    ///
    /// No-op while the transition lock is held.
    pub fn go_to_slide(&mut self, target: i64) {
        if self.is_transitioning {
            tracing::trace!(target, "Navigation dropped during transition lock");
            return;
        }

        let count = self.slide_count.get() as i64;
        self.current_index = target.rem_euclid(count) as usize;

        self.is_transitioning = true;
        if let Some(stale) = self.unlock.take() {
            self.timers.cancel(stale);
        }
        self.unlock = Some(self.timers.arm_once(self.settings.transition_lock));

        self.render();
        tracing::debug!(index = self.current_index, target, "Moved to slide");
    }

    pub fn next_slide(&mut self) {
        self.go_to_slide(self.current_index as i64 + 1);
    }

    pub fn prev_slide(&mut self) {
        self.go_to_slide(self.current_index as i64 - 1);
    }

    /// Arm the recurring advance, replacing any existing autoplay timer
    pub fn start_autoplay(&mut self) {
        self.stop_autoplay();
        let id = self.timers.arm_repeating(self.settings.autoplay_interval);
        self.autoplay = Some(id);
        tracing::debug!(%id, "Autoplay started");
    }

    pub fn stop_autoplay(&mut self) {
        if let Some(id) = self.autoplay.take() {
            self.timers.cancel(id);
            tracing::debug!(%id, "Autoplay stopped");
        }
    }

    /// Leftward travel past the threshold advances, rightward goes back
    pub fn handle_swipe_gesture(&mut self, start_x: f64, end_x: f64) {
        let diff = start_x - end_x;
        if !diff.is_finite() || diff.abs() <= self.settings.swipe_threshold {
            tracing::trace!(start_x, end_x, "Swipe below threshold");
            return;
        }

        if diff > 0.0 {
            self.next_slide();
        } else {
            self.prev_slide();
        }
    }

    /// Stop autoplay now and bring it back after the resume delay
    fn pause_then_resume(&mut self) {
        self.stop_autoplay();
        self.schedule_resume();
    }

    fn schedule_resume(&mut self) {
        self.cancel_resume();
        self.resume = Some(self.timers.arm_once(self.settings.resume_delay));
    }

    fn cancel_resume(&mut self) {
        if let Some(id) = self.resume.take() {
            self.timers.cancel(id);
        }
    }

    fn on_timer(&mut self, id: TimerId) {
        if self.autoplay == Some(id) {
            self.next_slide();
        } else if self.unlock == Some(id) {
            self.unlock = None;
            self.timers.cancel(id);
            self.is_transitioning = false;
        } else if self.resume == Some(id) {
            self.resume = None;
            self.timers.cancel(id);
            self.start_autoplay();
        } else {
            tracing::trace!(%id, "Ignoring fire from a timer no longer owned");
        }
    }

    fn render(&mut self) {
        let offset = -(self.current_index as i64) * 100;
        self.surface.translate_track(offset);
        for i in 0..self.slide_count.get() {
            self.surface.set_indicator(i, i == self.current_index);
        }
    }
}
