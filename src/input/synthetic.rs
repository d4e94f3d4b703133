//! Synthetic key and button input
//!
//! Remote tooling describes keys as combos such as `KEY_A`, `S-KEY_ENTER` or
//! `S-BTN_LEFT` (`S-` holds the super key). A key combo expands into the same
//! [`KeyEvent`]s a real keyboard would produce; a button combo is pressed,
//! released, or both, according to a [`ButtonMode`].

use std::str::FromStr;

use super::codes::event_code_from_name;
use super::keyboard::{KeyEvent, KEY_LEFTMETA};

/// Errors from parsing a key combo
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("Missing or wrong key combo")]
    MissingCombo,
    #[error("Failed to parse combo \"{0}\"")]
    UnknownKey(String),
    #[error("Unknown button mode \"{0}\"")]
    UnknownMode(String),
}

/// Which half of a click to synthesize
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonMode {
    Press,
    Release,
    /// Press followed by release
    Full,
}

impl ButtonMode {
    pub fn presses(self) -> bool {
        matches!(self, ButtonMode::Press | ButtonMode::Full)
    }

    pub fn releases(self) -> bool {
        matches!(self, ButtonMode::Release | ButtonMode::Full)
    }
}

impl FromStr for ButtonMode {
    type Err = InputError;

    fn from_str(mode: &str) -> Result<Self, Self::Err> {
        match mode {
            "press" => Ok(ButtonMode::Press),
            "release" => Ok(ButtonMode::Release),
            "full" => Ok(ButtonMode::Full),
            other => Err(InputError::UnknownMode(other.to_string())),
        }
    }
}

/// A parsed key combo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyCombo {
    /// Hold super while the key is pressed
    pub modifier: bool,
    /// Linux evdev keycode
    pub code: u32,
}

impl KeyCombo {
    /// Press and release events for this combo, all stamped with `time_msec`
    pub fn events(&self, time_msec: u32) -> Vec<KeyEvent> {
        let mut events = Vec::with_capacity(4);
        if self.modifier {
            events.push(KeyEvent::pressed(KEY_LEFTMETA, time_msec));
        }
        events.push(KeyEvent::pressed(self.code, time_msec));
        events.push(KeyEvent::released(self.code, time_msec));
        if self.modifier {
            events.push(KeyEvent::released(KEY_LEFTMETA, time_msec));
        }
        events
    }
}

/// Parse a combo like `S-KEY_A`
pub fn parse_combo(combo: &str) -> Result<KeyCombo, InputError> {
    if combo.len() < 4 {
        return Err(InputError::MissingCombo);
    }

    let (modifier, name) = match combo.strip_prefix("S-") {
        Some(rest) => (true, rest),
        None => (false, combo),
    };

    let code = key_code_from_name(name).ok_or_else(|| InputError::UnknownKey(name.to_string()))?;
    Ok(KeyCombo { modifier, code })
}

/// Resolve an evdev key or button name (`KEY_*`, `BTN_*`) to its code
pub fn key_code_from_name(name: &str) -> Option<u32> {
    event_code_from_name(name)
}
