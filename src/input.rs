//! Keyboard input mapping
//!
//! Every key press maps to at most one command. There is no auto-repeat:
//! holding a key relies on the terminal's own repeat events.

use crate::game::Action;
use crate::settings::Settings;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, ModifierKeyCode};

/// Key bindings configuration - supports multiple keys per action
#[derive(Debug, Clone)]
pub struct KeyBindings {
    pub move_left: Vec<KeyCode>,
    pub move_right: Vec<KeyCode>,
    pub move_down: Vec<KeyCode>,
    pub drop: Vec<KeyCode>,
    pub rotate: Vec<KeyCode>,
    pub start: Vec<KeyCode>,
    pub pause: Vec<KeyCode>,
    pub resume: Vec<KeyCode>,
    pub quit: Vec<KeyCode>,
}

impl KeyBindings {
    /// Parse a key string into KeyCode
    fn parse_key(s: &str) -> Option<KeyCode> {
        let key = match s.to_lowercase().as_str() {
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "space" => KeyCode::Char(' '),
            "enter" => KeyCode::Enter,
            "tab" => KeyCode::Tab,
            "esc" | "escape" => KeyCode::Esc,
            "shift" => KeyCode::Modifier(ModifierKeyCode::LeftShift),
            "ctrl" | "control" => KeyCode::Modifier(ModifierKeyCode::LeftControl),
            "alt" => KeyCode::Modifier(ModifierKeyCode::LeftAlt),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => {
                        tracing::warn!("ignoring unknown key binding {:?}", s);
                        return None;
                    }
                }
            }
        };
        Some(key)
    }

    /// Parse a list of key strings into KeyCodes
    fn parse_keys(keys: &[String]) -> Vec<KeyCode> {
        keys.iter().filter_map(|s| Self::parse_key(s)).collect()
    }

    /// Create keybindings from settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            move_left: Self::parse_keys(&settings.keys.move_left),
            move_right: Self::parse_keys(&settings.keys.move_right),
            move_down: Self::parse_keys(&settings.keys.move_down),
            drop: Self::parse_keys(&settings.keys.drop),
            rotate: Self::parse_keys(&settings.keys.rotate),
            start: Self::parse_keys(&settings.keys.start),
            pause: Self::parse_keys(&settings.keys.pause),
            resume: Self::parse_keys(&settings.keys.resume),
            quit: Self::parse_keys(&settings.keys.quit),
        }
    }

    /// Find the action bound to a key. Earlier entries win when a key is
    /// bound twice.
    pub fn action_for(&self, code: KeyCode) -> Option<Action> {
        [
            (&self.quit, Action::Quit),
            (&self.start, Action::Start),
            (&self.pause, Action::Pause),
            (&self.resume, Action::Resume),
            (&self.rotate, Action::Rotate),
            (&self.move_down, Action::MoveDown),
            (&self.move_left, Action::MoveLeft),
            (&self.move_right, Action::MoveRight),
            (&self.drop, Action::Drop),
        ]
        .into_iter()
        .find(|(keys, _)| keys.contains(&code))
        .map(|(_, action)| action)
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Translates key presses into game commands
#[derive(Debug, Clone, Default)]
pub struct InputHandler {
    bindings: KeyBindings,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create input handler from settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            bindings: KeyBindings::from_settings(settings),
        }
    }

    /// Handle a key press event
    pub fn key_down(&self, key: KeyEvent) -> Option<Action> {
        // Handle Ctrl+C for quit
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Action::Quit);
        }
        self.bindings.action_for(normalize_key(key.code))
    }
}

/// Normalize key codes for consistent handling
fn normalize_key(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_default_bindings() {
        let input = InputHandler::new();
        assert_eq!(input.key_down(press(KeyCode::Left)), Some(Action::MoveLeft));
        assert_eq!(input.key_down(press(KeyCode::Right)), Some(Action::MoveRight));
        assert_eq!(input.key_down(press(KeyCode::Down)), Some(Action::MoveDown));
        assert_eq!(input.key_down(press(KeyCode::Up)), Some(Action::Rotate));
        assert_eq!(input.key_down(press(KeyCode::Char(' '))), Some(Action::Drop));
        assert_eq!(input.key_down(press(KeyCode::Char('s'))), Some(Action::Start));
        assert_eq!(input.key_down(press(KeyCode::Char('p'))), Some(Action::Pause));
        assert_eq!(input.key_down(press(KeyCode::Char('c'))), Some(Action::Resume));
        assert_eq!(input.key_down(press(KeyCode::Char('q'))), Some(Action::Quit));
    }

    #[test]
    fn test_unbound_key_does_nothing() {
        let input = InputHandler::new();
        assert_eq!(input.key_down(press(KeyCode::Char('z'))), None);
        assert_eq!(input.key_down(press(KeyCode::Tab)), None);
    }

    #[test]
    fn test_letters_ignore_case() {
        let input = InputHandler::new();
        let key = KeyEvent::new(KeyCode::Char('S'), KeyModifiers::SHIFT);
        assert_eq!(input.key_down(key), Some(Action::Start));
    }

    #[test]
    fn test_ctrl_c_quits() {
        let input = InputHandler::new();
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(input.key_down(key), Some(Action::Quit));
    }

    #[test]
    fn test_custom_bindings() {
        let mut settings = Settings::default();
        settings.keys.rotate = vec!["x".to_string(), "Up".to_string()];
        settings.keys.drop = vec!["Enter".to_string(), "bogus".to_string()];
        let input = InputHandler::from_settings(&settings);

        assert_eq!(input.key_down(press(KeyCode::Char('X'))), Some(Action::Rotate));
        assert_eq!(input.key_down(press(KeyCode::Enter)), Some(Action::Drop));
        assert_eq!(input.key_down(press(KeyCode::Char(' '))), None);
    }

    #[test]
    fn test_parse_key_names() {
        assert_eq!(KeyBindings::parse_key("Space"), Some(KeyCode::Char(' ')));
        assert_eq!(KeyBindings::parse_key("ESC"), Some(KeyCode::Esc));
        assert_eq!(KeyBindings::parse_key("Q"), Some(KeyCode::Char('q')));
        assert_eq!(KeyBindings::parse_key("PageUp"), None);
    }
}
