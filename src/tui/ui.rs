// UI rendering logic
//
// Draws the page: title, the carousel block (controls, visible slide,
// indicator dots), the logs panel, and a status bar. The carousel geometry
// is computed once per frame and stored on the App for mouse hit-testing.

use super::app::{App, Focus};
use super::layout::{Breakpoint, CarouselLayout};
use crate::logging::{LogEntry, LogLevel};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(9),    // Carousel
            Constraint::Length(8), // System logs
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    render_title(f, chunks[0]);

    app.layout = CarouselLayout::compute(chunks[1], app.slides.len());
    render_carousel(f, app);

    render_logs_panel(f, chunks[2], app);
    render_status(f, chunks[3], app);
}

fn render_title(f: &mut Frame, area: Rect) {
    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            " Clinic ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Rgb(139, 38, 53))
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  What our patients say"),
    ]))
    .block(Block::default().borders(Borders::ALL));

    f.render_widget(title, area);
}

fn render_carousel(f: &mut Frame, app: &App) {
    let layout = &app.layout;
    let focused = app.focus == Focus::Carousel;

    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(" Testimonials ")
        .title_bottom(
            Line::from(format!(" translateX({}%) ", app.track_offset)).right_aligned(),
        );
    f.render_widget(block, layout.block);

    let button_style = if app.pointer_inside {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    f.render_widget(
        Paragraph::new(vertically_centered("‹", layout.prev.height))
            .alignment(Alignment::Center)
            .style(button_style),
        layout.prev,
    );
    f.render_widget(
        Paragraph::new(vertically_centered("›", layout.next.height))
            .alignment(Alignment::Center)
            .style(button_style),
        layout.next,
    );

    render_slide(f, layout.viewport, app);
    render_indicators(f, app);
}

/// Pad with blank lines so a one-line glyph sits mid-height
fn vertically_centered(text: &str, height: u16) -> Vec<Line<'static>> {
    let pad = height.saturating_sub(1) / 2;
    let mut lines: Vec<Line> = (0..pad).map(|_| Line::raw("")).collect();
    lines.push(Line::raw(text.to_string()));
    lines
}

fn render_slide(f: &mut Frame, area: Rect, app: &App) {
    let Some(slide) = app.slides.get(app.visible_slide()) else {
        return;
    };
    let bp = Breakpoint::from_width(area.width);

    let mut lines = vec![
        Line::raw(""),
        Line::styled(
            format!("“{}”", slide.quote),
            Style::default().add_modifier(Modifier::ITALIC),
        ),
        Line::raw(""),
        Line::styled(
            format!("— {}", slide.author),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ];
    if bp.at_least(Breakpoint::Normal) && !slide.detail.is_empty() {
        lines.push(Line::styled(
            slide.detail.clone(),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn render_indicators(f: &mut Frame, app: &App) {
    for (rect, selected) in app.layout.indicators.iter().zip(&app.indicators) {
        let (glyph, style) = if *selected {
            ("●", Style::default().fg(Color::Rgb(139, 38, 53)))
        } else {
            ("○", Style::default().fg(Color::DarkGray))
        };
        f.render_widget(Paragraph::new(glyph).style(style), *rect);
    }
}

pub fn render_logs_panel(f: &mut Frame, area: Rect, app: &App) {
    let height = area.height.saturating_sub(2) as usize; // Account for borders
    let log_entries = app.log_buffer.get_recent(height);

    let items: Vec<ListItem> = log_entries
        .iter()
        .map(|entry| ListItem::new(format_log_entry(entry)).style(log_level_style(&entry.level)))
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" System Logs ({}) ", app.log_buffer.len())),
    );

    f.render_widget(list, area);
}

fn format_log_entry(entry: &LogEntry) -> String {
    format!(
        "[{}] {:5} {}",
        entry.timestamp.format("%H:%M:%S"),
        entry.level.as_str(),
        entry.message
    )
}

fn log_level_style(level: &LogLevel) -> Style {
    match level {
        LogLevel::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        LogLevel::Warn => Style::default().fg(Color::Yellow),
        LogLevel::Info => Style::default().fg(Color::Blue),
        LogLevel::Debug => Style::default().fg(Color::Gray),
        LogLevel::Trace => Style::default().fg(Color::DarkGray),
    }
}

fn render_status(f: &mut Frame, area: Rect, app: &App) {
    let bp = Breakpoint::from_width(area.width);

    let state = format!(
        " {} │ slide {}/{} │ focus: {} │ pointer: {} │ page: {}",
        app.uptime(),
        app.visible_slide() + 1,
        app.slides.len(),
        app.focus.name(),
        if app.pointer_inside { "in" } else { "out" },
        if app.page_visible { "visible" } else { "hidden" },
    );

    let keys = if bp.at_least(Breakpoint::Wide) {
        " │ Tab focus │ ←/→ slide │ 1-9 jump │ drag swipe │ v visibility │ q quit"
    } else {
        " │ Tab ←/→ 1-9 v q"
    };

    let text = truncate_to_width(&format!("{}{}", state, keys), area.width as usize);
    f.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::Black).bg(Color::Gray)),
        area,
    );
}

/// Cut a string to at most `max` display columns
fn truncate_to_width(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > max {
            break;
        }
        used += w;
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_slides;
    use crate::logging::LogBuffer;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn truncate_respects_display_width() {
        assert_eq!(truncate_to_width("abc", 5), "abc");
        assert_eq!(truncate_to_width("a│b│c", 3), "a│b");
        assert_eq!(truncate_to_width("日本語", 4), "日本");
    }

    #[test]
    fn draw_shows_visible_slide_and_dots() {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut app = App::new(default_slides(), 10.0, LogBuffer::new());
        app.track_offset = -100;
        app.indicators = vec![false, true, false, false];

        terminal.draw(|f| draw(f, &mut app)).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("James T."));
        assert!(text.contains("translateX(-100%)"));

        let dots: Vec<&str> = app
            .layout
            .indicators
            .iter()
            .map(|r| buffer[(r.x, r.y)].symbol())
            .collect();
        assert_eq!(dots, vec!["○", "●", "○", "○"]);
    }
}
