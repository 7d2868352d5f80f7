/// Responsive breakpoints and carousel geometry for the TUI.
///
/// Rendering and mouse hit-testing both use [`CarouselLayout`], so a click
/// always lands on what was drawn.
use ratatui::layout::{Position, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breakpoint {
    /// < 60 cols: Split pane, minimal terminal
    Compact,
    /// 60-99 cols: Half-screen
    Normal,
    /// 100+ cols: Full terminal
    Wide,
}

impl Breakpoint {
    pub fn from_width(width: u16) -> Self {
        match width {
            0..=59 => Breakpoint::Compact,
            60..=99 => Breakpoint::Normal,
            _ => Breakpoint::Wide,
        }
    }

    /// Check if at least this breakpoint (inclusive)
    pub fn at_least(&self, min: Breakpoint) -> bool {
        self.ordinal() >= min.ordinal()
    }

    fn ordinal(&self) -> u8 {
        match self {
            Breakpoint::Compact => 0,
            Breakpoint::Normal => 1,
            Breakpoint::Wide => 2,
        }
    }
}

/// Width of the ‹ and › control columns
const BUTTON_WIDTH: u16 = 5;

/// Regions of the carousel block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarouselLayout {
    /// Whole bordered block (pointer enter/leave region)
    pub block: Rect,
    /// "previous" control
    pub prev: Rect,
    /// Slide viewport (drag-to-swipe region)
    pub viewport: Rect,
    /// "next" control
    pub next: Rect,
    /// One single-cell rect per indicator dot
    pub indicators: Vec<Rect>,
}

/// What the pointer is over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Prev,
    Next,
    Indicator(usize),
    Viewport,
    Frame,
    Outside,
}

impl CarouselLayout {
    /// Split `block` into controls, viewport and an indicator row
    pub fn compute(block: Rect, slide_count: usize) -> Self {
        // Inside the border
        let inner = Rect {
            x: block.x.saturating_add(1),
            y: block.y.saturating_add(1),
            width: block.width.saturating_sub(2),
            height: block.height.saturating_sub(2),
        };

        let content_height = inner.height.saturating_sub(1);
        let button_width = BUTTON_WIDTH.min(inner.width / 3);

        let prev = Rect::new(inner.x, inner.y, button_width, content_height);
        let next = Rect::new(
            inner.right().saturating_sub(button_width),
            inner.y,
            button_width,
            content_height,
        );
        let viewport = Rect::new(
            prev.right(),
            inner.y,
            inner.width.saturating_sub(button_width * 2),
            content_height,
        );

        // Dots are spaced one column apart and centered
        let dot_row = inner.bottom().saturating_sub(1);
        let row_width = (slide_count as u16).saturating_mul(2).saturating_sub(1);
        let start_x = inner.x + inner.width.saturating_sub(row_width) / 2;
        let indicators = if inner.height == 0 {
            Vec::new()
        } else {
            (0..slide_count as u16)
                .map(|i| start_x.saturating_add(i * 2))
                .take_while(|&x| x < inner.right())
                .map(|x| Rect::new(x, dot_row, 1, 1))
                .collect()
        };

        Self {
            block,
            prev,
            viewport,
            next,
            indicators,
        }
    }

    /// Classify a terminal cell
    pub fn hit(&self, column: u16, row: u16) -> Hit {
        let pos = Position::new(column, row);
        if !self.block.contains(pos) {
            return Hit::Outside;
        }
        if self.prev.contains(pos) {
            return Hit::Prev;
        }
        if self.next.contains(pos) {
            return Hit::Next;
        }
        if let Some(i) = self.indicators.iter().position(|r| r.contains(pos)) {
            return Hit::Indicator(i);
        }
        if self.viewport.contains(pos) {
            return Hit::Viewport;
        }
        Hit::Frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoint_thresholds() {
        assert_eq!(Breakpoint::from_width(40), Breakpoint::Compact);
        assert_eq!(Breakpoint::from_width(59), Breakpoint::Compact);
        assert_eq!(Breakpoint::from_width(60), Breakpoint::Normal);
        assert_eq!(Breakpoint::from_width(99), Breakpoint::Normal);
        assert_eq!(Breakpoint::from_width(100), Breakpoint::Wide);
        assert!(Breakpoint::Wide.at_least(Breakpoint::Normal));
        assert!(!Breakpoint::Compact.at_least(Breakpoint::Normal));
    }

    #[test]
    fn regions_do_not_overlap() {
        let layout = CarouselLayout::compute(Rect::new(0, 3, 80, 12), 4);

        assert_eq!(layout.prev, Rect::new(1, 4, 5, 9));
        assert_eq!(layout.next, Rect::new(74, 4, 5, 9));
        assert_eq!(layout.viewport, Rect::new(6, 4, 68, 9));
        assert_eq!(layout.indicators.len(), 4);
        assert!(layout.indicators.iter().all(|r| r.y == 13));
        assert!(layout.indicators.iter().all(|r| !r.intersects(layout.viewport)));
    }

    #[test]
    fn indicator_row_is_centered() {
        // inner width 78, row width 7 → start at 1 + 35
        let layout = CarouselLayout::compute(Rect::new(0, 0, 80, 10), 4);
        let xs: Vec<u16> = layout.indicators.iter().map(|r| r.x).collect();
        assert_eq!(xs, vec![36, 38, 40, 42]);
    }

    #[test]
    fn hit_testing() {
        let layout = CarouselLayout::compute(Rect::new(0, 3, 80, 12), 4);

        assert_eq!(layout.hit(2, 6), Hit::Prev);
        assert_eq!(layout.hit(76, 6), Hit::Next);
        assert_eq!(layout.hit(40, 6), Hit::Viewport);
        let dot = layout.indicators[2];
        assert_eq!(layout.hit(dot.x, dot.y), Hit::Indicator(2));
        assert_eq!(layout.hit(0, 3), Hit::Frame);
        assert_eq!(layout.hit(40, 0), Hit::Outside);
        assert_eq!(layout.hit(40, 15), Hit::Outside);
    }

    #[test]
    fn tiny_area_does_not_panic() {
        let layout = CarouselLayout::compute(Rect::new(0, 0, 2, 2), 9);
        assert!(layout.indicators.is_empty());
        assert_eq!(layout.hit(0, 0), Hit::Frame);
    }
}
