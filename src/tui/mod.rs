// TUI module - the terminal page shell
//
// This module hosts the carousel in a terminal using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard, mouse, focus, timer ticks)
// - Forwarding input to the carousel runtime as stimuli
// - Applying the controller's surface updates and rendering them

pub mod app;
pub mod input;
pub mod layout;
pub mod ui;

use crate::carousel::{Stimulus, SurfaceUpdate};
use crate::config::Config;
use crate::logging::LogBuffer;
use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{
        self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
        Event, KeyEvent, KeyEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

/// Run the TUI
///
/// Sets up the terminal, runs the event loop until the user quits, and
/// restores the terminal even if the loop failed.
pub async fn run_tui(
    stimuli: mpsc::Sender<Stimulus>,
    mut updates: mpsc::UnboundedReceiver<SurfaceUpdate>,
    log_buffer: LogBuffer,
    config: &Config,
) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange
    )
    .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = App::new(
        config.slides.clone(),
        config.carousel.cell_width_px,
        log_buffer,
    );

    let result = run_event_loop(&mut terminal, &mut app, &stimuli, &mut updates).await;

    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Waits on three sources with tokio::select!:
/// 1. Terminal input (keys, mouse, focus)
/// 2. Timer ticks (periodic redraws for uptime and logs)
/// 3. Surface updates from the carousel runtime
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    stimuli: &mpsc::Sender<Stimulus>,
    updates: &mut mpsc::UnboundedReceiver<SurfaceUpdate>,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(250));

    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    let out = match event::read() {
                        Ok(Event::Key(key_event)) => handle_key_event(app, key_event),
                        Ok(Event::Mouse(mouse)) => app.on_mouse(mouse.kind, mouse.column, mouse.row),
                        Ok(Event::FocusLost) => app.set_page_visible(false),
                        Ok(Event::FocusGained) => app.set_page_visible(true),
                        _ => Vec::new(),
                    };
                    forward(stimuli, out);
                }
            } => {}

            _ = tick_interval.tick() => {}

            Some(update) = updates.recv() => {
                app.apply(update);
                // Drain the rest of this render pass so one frame shows it whole
                while let Ok(update) = updates.try_recv() {
                    app.apply(update);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Keyboard dispatch: presses go through the InputHandler for debounce/repeat
fn handle_key_event(app: &mut App, key_event: KeyEvent) -> Vec<Stimulus> {
    match key_event.kind {
        KeyEventKind::Press | KeyEventKind::Repeat => {
            if app.handle_key_press(key_event.code) {
                app.on_key(key_event.code)
            } else {
                Vec::new()
            }
        }
        KeyEventKind::Release => {
            app.handle_key_release(key_event.code);
            Vec::new()
        }
    }
}

/// Hand stimuli to the runtime without blocking the render loop
fn forward(stimuli: &mpsc::Sender<Stimulus>, out: Vec<Stimulus>) {
    for stimulus in out {
        if let Err(e) = stimuli.try_send(stimulus) {
            tracing::warn!("Dropped {} stimulus: {}", stimulus.name(), e);
        }
    }
}
