// Inbound events for the carousel controller
//
// Every user interaction and every timer fire is turned into one of these
// and pushed through the runtime's queue. Using an enum keeps the mapping
// from "what happened" to "what the carousel does" in a single match.

use super::ports::TimerId;

/// One inbound event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stimulus {
    /// The "previous" control was activated
    Previous,

    /// The "next" control was activated
    Next,

    /// Indicator dot `n` was activated
    Indicator(usize),

    /// A touch/drag gesture began at this X position (pixels)
    TouchStart { x: f64 },

    /// A touch/drag gesture ended at this X position (pixels)
    TouchEnd { x: f64 },

    /// Left arrow while the carousel has focus
    ArrowLeft,

    /// Right arrow while the carousel has focus
    ArrowRight,

    /// Pointer moved into the carousel region
    PointerEnter,

    /// Pointer moved out of the carousel region
    PointerLeave,

    /// The page was backgrounded
    PageHidden,

    /// The page is visible again
    PageVisible,

    /// A timer armed through the `TimerDriver` elapsed
    TimerFired(TimerId),
}

impl Stimulus {
    /// Short name for log lines
    pub fn name(&self) -> &'static str {
        match self {
            Stimulus::Previous => "previous",
            Stimulus::Next => "next",
            Stimulus::Indicator(_) => "indicator",
            Stimulus::TouchStart { .. } => "touch_start",
            Stimulus::TouchEnd { .. } => "touch_end",
            Stimulus::ArrowLeft => "arrow_left",
            Stimulus::ArrowRight => "arrow_right",
            Stimulus::PointerEnter => "pointer_enter",
            Stimulus::PointerLeave => "pointer_leave",
            Stimulus::PageHidden => "page_hidden",
            Stimulus::PageVisible => "page_visible",
            Stimulus::TimerFired(_) => "timer_fired",
        }
    }

    /// Whether this is a direct navigation request from the user
    /// (followed by the pause/resume cycle)
    pub fn is_manual_navigation(&self) -> bool {
        matches!(
            self,
            Stimulus::Previous
                | Stimulus::Next
                | Stimulus::Indicator(_)
                | Stimulus::ArrowLeft
                | Stimulus::ArrowRight
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_navigation_classification() {
        assert!(Stimulus::Previous.is_manual_navigation());
        assert!(Stimulus::Indicator(3).is_manual_navigation());
        assert!(Stimulus::ArrowRight.is_manual_navigation());
        assert!(!Stimulus::TouchEnd { x: 10.0 }.is_manual_navigation());
        assert!(!Stimulus::PointerEnter.is_manual_navigation());
        assert!(!Stimulus::TimerFired(TimerId(1)).is_manual_navigation());
    }
}
