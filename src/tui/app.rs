// TUI application state
//
// The App mirrors what the carousel controller last asked the surface to
// show (track offset and indicator states) and turns terminal input into
// carousel stimuli. It never decides navigation itself; that is the
// controller's job.

use super::input::InputHandler;
use super::layout::{CarouselLayout, Hit};
use crate::carousel::surfaces::slide_index_for_offset;
use crate::carousel::{Stimulus, SurfaceUpdate};
use crate::config::Slide;
use crate::logging::LogBuffer;
use crossterm::event::{KeyCode, MouseButton, MouseEventKind};
use std::time::Instant;

/// Which part of the page has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Page,
    Carousel,
}

impl Focus {
    pub fn toggle(self) -> Self {
        match self {
            Focus::Page => Focus::Carousel,
            Focus::Carousel => Focus::Page,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Focus::Page => "page",
            Focus::Carousel => "carousel",
        }
    }
}

/// Main application state for the TUI
pub struct App {
    pub slides: Vec<Slide>,

    /// Last track offset from the controller, in percent
    pub track_offset: i64,

    /// Selected state per indicator, as last reported
    pub indicators: Vec<bool>,

    pub focus: Focus,

    /// Whether the mouse pointer is over the carousel block
    pub pointer_inside: bool,

    /// Whether the page is currently treated as visible
    pub page_visible: bool,

    /// A drag started in the viewport and hasn't been released yet
    drag_active: bool,

    /// Geometry from the last frame, used for hit-testing
    pub layout: CarouselLayout,

    /// Pixels per column for swipe distances
    cell_width_px: f64,

    pub should_quit: bool,

    pub start_time: Instant,

    input_handler: InputHandler,

    pub log_buffer: LogBuffer,
}

impl App {
    pub fn new(slides: Vec<Slide>, cell_width_px: f64, log_buffer: LogBuffer) -> Self {
        let indicators = vec![false; slides.len()];
        Self {
            slides,
            track_offset: 0,
            indicators,
            focus: Focus::default(),
            pointer_inside: false,
            page_visible: true,
            drag_active: false,
            layout: CarouselLayout::default(),
            cell_width_px,
            should_quit: false,
            start_time: Instant::now(),
            input_handler: InputHandler::default(),
            log_buffer,
        }
    }

    /// Apply one update from the controller
    pub fn apply(&mut self, update: SurfaceUpdate) {
        match update {
            SurfaceUpdate::Track { offset_percent } => self.track_offset = offset_percent,
            SurfaceUpdate::Indicator { index, selected } => {
                if let Some(slot) = self.indicators.get_mut(index) {
                    *slot = selected;
                }
            }
        }
    }

    /// Index of the slide the track is showing
    pub fn visible_slide(&self) -> usize {
        slide_index_for_offset(self.track_offset).min(self.slides.len().saturating_sub(1))
    }

    /// Uptime for the status bar
    pub fn uptime(&self) -> String {
        let secs = self.start_time.elapsed().as_secs();
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }

    pub fn handle_key_press(&mut self, key: KeyCode) -> bool {
        self.input_handler.handle_key_press(key)
    }

    pub fn handle_key_release(&mut self, key: KeyCode) {
        self.input_handler.handle_key_release(key);
    }

    /// Map an accepted key press to stimuli (and local state changes)
    pub fn on_key(&mut self, key: KeyCode) -> Vec<Stimulus> {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
                vec![]
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = self.focus.toggle();
                tracing::debug!(focus = self.focus.name(), "Focus changed");
                vec![]
            }
            KeyCode::Left | KeyCode::Char('h') if self.focus == Focus::Carousel => {
                vec![Stimulus::ArrowLeft]
            }
            KeyCode::Right | KeyCode::Char('l') if self.focus == Focus::Carousel => {
                vec![Stimulus::ArrowRight]
            }
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                if index < self.slides.len() {
                    vec![Stimulus::Indicator(index)]
                } else {
                    vec![]
                }
            }
            KeyCode::Char('v') => self.set_page_visible(!self.page_visible),
            _ => vec![],
        }
    }

    /// Terminal focus changes stand in for page visibility
    pub fn set_page_visible(&mut self, visible: bool) -> Vec<Stimulus> {
        if visible == self.page_visible {
            return vec![];
        }
        self.page_visible = visible;
        if visible {
            vec![Stimulus::PageVisible]
        } else {
            vec![Stimulus::PageHidden]
        }
    }

    /// Map a mouse event to stimuli
    pub fn on_mouse(&mut self, kind: MouseEventKind, column: u16, row: u16) -> Vec<Stimulus> {
        let hit = self.layout.hit(column, row);
        let mut out = Vec::new();

        // Every mouse event carries a position, so any of them can cross the border
        let inside = hit != Hit::Outside;
        if inside != self.pointer_inside {
            self.pointer_inside = inside;
            out.push(if inside {
                Stimulus::PointerEnter
            } else {
                Stimulus::PointerLeave
            });
        }

        match kind {
            MouseEventKind::Down(MouseButton::Left) => match hit {
                Hit::Prev => out.push(Stimulus::Previous),
                Hit::Next => out.push(Stimulus::Next),
                Hit::Indicator(i) => out.push(Stimulus::Indicator(i)),
                Hit::Viewport => {
                    self.drag_active = true;
                    out.push(Stimulus::TouchStart {
                        x: self.column_to_px(column),
                    });
                }
                Hit::Frame | Hit::Outside => {}
            },
            MouseEventKind::Up(MouseButton::Left) if self.drag_active => {
                // Releasing outside the viewport still ends the gesture
                self.drag_active = false;
                out.push(Stimulus::TouchEnd {
                    x: self.column_to_px(column),
                });
            }
            _ => {}
        }

        out
    }

    fn column_to_px(&self, column: u16) -> f64 {
        f64::from(column) * self.cell_width_px
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_slides;
    use ratatui::layout::Rect;

    fn app() -> App {
        let mut app = App::new(default_slides(), 10.0, LogBuffer::new());
        app.layout = CarouselLayout::compute(Rect::new(0, 3, 80, 12), app.slides.len());
        app
    }

    #[test]
    fn applies_surface_updates() {
        let mut app = app();
        app.apply(SurfaceUpdate::Track {
            offset_percent: -200,
        });
        app.apply(SurfaceUpdate::Indicator {
            index: 2,
            selected: true,
        });
        app.apply(SurfaceUpdate::Indicator {
            index: 99,
            selected: true,
        });

        assert_eq!(app.visible_slide(), 2);
        assert_eq!(app.indicators, vec![false, false, true, false]);
    }

    #[test]
    fn arrows_need_carousel_focus() {
        let mut app = app();
        assert!(app.on_key(KeyCode::Right).is_empty());

        app.on_key(KeyCode::Tab);
        assert_eq!(app.focus, Focus::Carousel);
        assert_eq!(app.on_key(KeyCode::Right), vec![Stimulus::ArrowRight]);
        assert_eq!(app.on_key(KeyCode::Char('h')), vec![Stimulus::ArrowLeft]);
    }

    #[test]
    fn digit_keys_activate_existing_indicators() {
        let mut app = app();
        assert_eq!(app.on_key(KeyCode::Char('3')), vec![Stimulus::Indicator(2)]);
        assert!(app.on_key(KeyCode::Char('9')).is_empty());
    }

    #[test]
    fn visibility_toggle_reports_changes_only() {
        let mut app = app();
        assert_eq!(app.on_key(KeyCode::Char('v')), vec![Stimulus::PageHidden]);
        assert!(app.set_page_visible(false).is_empty());
        assert_eq!(app.set_page_visible(true), vec![Stimulus::PageVisible]);
    }

    #[test]
    fn pointer_enter_and_leave() {
        let mut app = app();
        assert_eq!(
            app.on_mouse(MouseEventKind::Moved, 40, 6),
            vec![Stimulus::PointerEnter]
        );
        assert!(app.on_mouse(MouseEventKind::Moved, 41, 6).is_empty());
        assert_eq!(
            app.on_mouse(MouseEventKind::Moved, 40, 0),
            vec![Stimulus::PointerLeave]
        );
    }

    #[test]
    fn clicks_on_controls() {
        let mut app = app();
        assert_eq!(
            app.on_mouse(MouseEventKind::Down(MouseButton::Left), 2, 6),
            vec![Stimulus::PointerEnter, Stimulus::Previous]
        );
        assert_eq!(
            app.on_mouse(MouseEventKind::Down(MouseButton::Left), 76, 6),
            vec![Stimulus::Next]
        );
        let dot = app.layout.indicators[1];
        assert_eq!(
            app.on_mouse(MouseEventKind::Down(MouseButton::Left), dot.x, dot.y),
            vec![Stimulus::Indicator(1)]
        );
    }

    #[test]
    fn drag_in_viewport_becomes_touch_gesture() {
        let mut app = app();
        app.pointer_inside = true;

        assert_eq!(
            app.on_mouse(MouseEventKind::Down(MouseButton::Left), 50, 6),
            vec![Stimulus::TouchStart { x: 500.0 }]
        );
        assert!(app
            .on_mouse(MouseEventKind::Drag(MouseButton::Left), 45, 6)
            .is_empty());
        assert_eq!(
            app.on_mouse(MouseEventKind::Up(MouseButton::Left), 40, 6),
            vec![Stimulus::TouchEnd { x: 400.0 }]
        );

        // No gesture in progress: a stray release is ignored
        assert!(app
            .on_mouse(MouseEventKind::Up(MouseButton::Left), 40, 6)
            .is_empty());
    }
}
