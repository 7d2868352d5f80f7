// Input handling system with configurable key behaviors
//
// Terminals report held keys as a stream of presses, and many never send
// a release. This module decides which of those presses count:
// - State-change keys trigger once per press (debounced)
// - Repeatable keys trigger on press, then repeat while held

use crossterm::event::KeyCode;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Re-trigger window for state-change keys on terminals without release events
const STATE_CHANGE_DEBOUNCE: Duration = Duration::from_millis(150);

/// Defines how a key should behave when pressed/held
#[derive(Debug, Clone, Copy)]
pub enum KeyBehavior {
    /// Trigger only on state change (press → release)
    StateChange,

    /// Trigger on press, then repeat after initial delay
    Repeatable {
        initial_delay: Duration,
        repeat_interval: Duration,
    },
}

impl KeyBehavior {
    /// Slide navigation: holding an arrow pages through slides slowly
    ///
    /// The interval is longer than the carousel's transition lock so a held
    /// key doesn't just hammer the lock.
    pub fn slide_navigation() -> Self {
        Self::Repeatable {
            initial_delay: Duration::from_millis(500),
            repeat_interval: Duration::from_millis(600),
        }
    }
}

#[derive(Debug, Default)]
struct KeyState {
    is_pressed: bool,
    press_started: Option<Instant>,
    last_triggered: Option<Instant>,
}

impl KeyState {
    fn release(&mut self) {
        *self = Self::default();
    }
}

/// Input handler that manages key behaviors
pub struct InputHandler {
    key_states: HashMap<KeyCode, KeyState>,
    key_behaviors: HashMap<KeyCode, KeyBehavior>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            key_states: HashMap::new(),
            key_behaviors: HashMap::new(),
        }
    }

    pub fn configure_key(&mut self, key: KeyCode, behavior: KeyBehavior) {
        self.key_behaviors.insert(key, behavior);
    }

    pub fn configure_keys(&mut self, keys: &[KeyCode], behavior: KeyBehavior) {
        for key in keys {
            self.configure_key(*key, behavior);
        }
    }

    /// Handle a key press event
    /// Returns true if the action should be triggered
    pub fn handle_key_press(&mut self, key: KeyCode) -> bool {
        self.press_at(key, Instant::now())
    }

    fn press_at(&mut self, key: KeyCode, now: Instant) -> bool {
        let behavior = self
            .key_behaviors
            .get(&key)
            .copied()
            .unwrap_or(KeyBehavior::StateChange);

        let state = self.key_states.entry(key).or_default();

        if !state.is_pressed {
            state.is_pressed = true;
            state.press_started = Some(now);
            state.last_triggered = Some(now);
            return true;
        }

        match behavior {
            KeyBehavior::StateChange => match state.last_triggered {
                Some(last) if now.duration_since(last) >= STATE_CHANGE_DEBOUNCE => {
                    state.last_triggered = Some(now);
                    true
                }
                _ => false,
            },
            KeyBehavior::Repeatable {
                initial_delay,
                repeat_interval,
            } => match (state.press_started, state.last_triggered) {
                (Some(start), Some(last))
                    if now.duration_since(start) >= initial_delay
                        && now.duration_since(last) >= repeat_interval =>
                {
                    state.last_triggered = Some(now);
                    true
                }
                _ => false,
            },
        }
    }

    pub fn handle_key_release(&mut self, key: KeyCode) {
        if let Some(state) = self.key_states.get_mut(&key) {
            state.release();
        }
    }

    /// Carousel shell key configuration
    pub fn with_default_config() -> Self {
        let mut handler = Self::new();

        handler.configure_keys(
            &[
                KeyCode::Left,
                KeyCode::Right,
                KeyCode::Char('h'),
                KeyCode::Char('l'),
            ],
            KeyBehavior::slide_navigation(),
        );

        handler.configure_keys(
            &[
                KeyCode::Tab,
                KeyCode::BackTab,
                KeyCode::Char('q'),
                KeyCode::Char('Q'),
                KeyCode::Char('v'),
            ],
            KeyBehavior::StateChange,
        );

        handler
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::with_default_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_change_triggers_once_until_release() {
        let mut handler = InputHandler::new();
        let t0 = Instant::now();

        assert!(handler.press_at(KeyCode::Tab, t0));
        assert!(!handler.press_at(KeyCode::Tab, t0 + Duration::from_millis(20)));

        handler.handle_key_release(KeyCode::Tab);
        assert!(handler.press_at(KeyCode::Tab, t0 + Duration::from_millis(40)));
    }

    #[test]
    fn state_change_debounce_without_release() {
        let mut handler = InputHandler::new();
        let t0 = Instant::now();

        assert!(handler.press_at(KeyCode::Char('v'), t0));
        assert!(handler.press_at(KeyCode::Char('v'), t0 + Duration::from_millis(200)));
    }

    #[test]
    fn arrows_repeat_slower_than_transition_lock() {
        let mut handler = InputHandler::with_default_config();
        let t0 = Instant::now();

        assert!(handler.press_at(KeyCode::Right, t0));
        assert!(!handler.press_at(KeyCode::Right, t0 + Duration::from_millis(300)));
        assert!(handler.press_at(KeyCode::Right, t0 + Duration::from_millis(650)));
        assert!(!handler.press_at(KeyCode::Right, t0 + Duration::from_millis(900)));
        assert!(handler.press_at(KeyCode::Right, t0 + Duration::from_millis(1300)));
    }
}
