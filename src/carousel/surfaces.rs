// SlideSurface adapters
//
// - ChannelSurface: forwards updates to the TUI over an mpsc channel
// - LogSurface: headless mode, reports each visible slide through tracing

use super::ports::SlideSurface;
use tokio::sync::mpsc;

/// One visual update, as sent to the terminal shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceUpdate {
    Track { offset_percent: i64 },
    Indicator { index: usize, selected: bool },
}

/// Forwards every update to a receiver owned by the presentation layer
///
/// Unbounded so a slow renderer can never lose an indicator update and end
/// up with zero or two selected dots.
pub struct ChannelSurface {
    tx: mpsc::UnboundedSender<SurfaceUpdate>,
}

impl ChannelSurface {
    pub fn new(tx: mpsc::UnboundedSender<SurfaceUpdate>) -> Self {
        Self { tx }
    }

    pub fn channel() -> (Self, mpsc::UnboundedReceiver<SurfaceUpdate>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

impl SlideSurface for ChannelSurface {
    fn translate_track(&mut self, offset_percent: i64) {
        // Send fails only after the shell has exited
        let _ = self.tx.send(SurfaceUpdate::Track { offset_percent });
    }

    fn set_indicator(&mut self, index: usize, selected: bool) {
        let _ = self.tx.send(SurfaceUpdate::Indicator { index, selected });
    }
}

/// Headless surface: logs which slide is showing
pub struct LogSurface {
    labels: Vec<String>,
}

impl LogSurface {
    pub fn new(labels: Vec<String>) -> Self {
        Self { labels }
    }
}

impl SlideSurface for LogSurface {
    fn translate_track(&mut self, offset_percent: i64) {
        let index = slide_index_for_offset(offset_percent);
        let label = self.labels.get(index).map(String::as_str).unwrap_or("?");
        tracing::info!(
            offset = %format!("translateX({}%)", offset_percent),
            "Slide {}/{}: {}",
            index + 1,
            self.labels.len(),
            label
        );
    }

    fn set_indicator(&mut self, index: usize, selected: bool) {
        if selected {
            tracing::debug!(index, "Indicator selected");
        }
    }
}

/// Inverse of the controller's `-(index * 100)` track offset
pub fn slide_index_for_offset(offset_percent: i64) -> usize {
    usize::try_from(-offset_percent / 100).unwrap_or(0)
}
