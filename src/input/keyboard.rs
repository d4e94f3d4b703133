//! Keyboard events, per-node keyboard handlers and pressed-key tracking

use log::debug;

/// Linux evdev code for the left meta (super) key
pub const KEY_LEFTMETA: u32 = 125;

/// Whether a key went down or up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// A single key event as delivered to the scene graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// Linux evdev keycode
    pub keycode: u32,
    /// Press or release
    pub state: KeyState,
    /// Event timestamp in milliseconds
    pub time_msec: u32,
}

impl KeyEvent {
    /// Create a key press event
    pub fn pressed(keycode: u32, time_msec: u32) -> Self {
        Self {
            keycode,
            state: KeyState::Pressed,
            time_msec,
        }
    }

    /// Create a key release event
    pub fn released(keycode: u32, time_msec: u32) -> Self {
        Self {
            keycode,
            state: KeyState::Released,
            time_msec,
        }
    }
}

/// What a node did with a key event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyboardAction {
    /// Pass the event on to the next active node
    #[default]
    Ignore,
    /// Stop routing, the event was handled
    Consume,
}

/// Keyboard callbacks attached to a scene node.
///
/// Enter and leave are driven by the focus diff in
/// [`RootNode::update`](crate::scene::RootNode::update); keys arrive through
/// [`RootNode::handle_key`](crate::scene::RootNode::handle_key).
///
/// Handlers are shared and may be re-entered: a key handler is allowed to
/// change focus and run an update, which then delivers a leave to the same
/// handler. Keep mutable state in cells.
pub trait KeyboardInteraction {
    /// The node joined the active keyboard set
    fn handle_keyboard_enter(&self) {}

    /// The node left the active keyboard set
    fn handle_keyboard_leave(&self) {}

    /// A key event routed to this node
    fn handle_keyboard_key(&self, _event: KeyEvent) -> KeyboardAction {
        KeyboardAction::Ignore
    }
}

/// Handler used by nodes that never react to the keyboard
#[derive(Debug, Clone, Copy, Default)]
pub struct NoKeyboardInteraction;

impl KeyboardInteraction for NoKeyboardInteraction {}

/// Seat keyboard state
#[derive(Debug)]
pub struct Keyboard {
    /// Currently pressed keys (keycodes)
    pressed_keys: Vec<u32>,
}

impl Keyboard {
    /// Create a new keyboard
    pub fn new() -> Self {
        Self {
            pressed_keys: Vec::new(),
        }
    }

    /// Record a key event. Returns false for repeats and unmatched releases.
    pub fn track(&mut self, event: KeyEvent) -> bool {
        match event.state {
            KeyState::Pressed => self.key_press(event.keycode),
            KeyState::Released => self.key_release(event.keycode),
        }
    }

    /// Handle a key press
    pub fn key_press(&mut self, keycode: u32) -> bool {
        if !self.pressed_keys.contains(&keycode) {
            self.pressed_keys.push(keycode);
            debug!("Key pressed: {}", keycode);
            true
        } else {
            false // Key already pressed (repeat)
        }
    }

    /// Handle a key release
    pub fn key_release(&mut self, keycode: u32) -> bool {
        if let Some(idx) = self.pressed_keys.iter().position(|&k| k == keycode) {
            self.pressed_keys.remove(idx);
            debug!("Key released: {}", keycode);
            true
        } else {
            false
        }
    }

    /// Get currently pressed keys
    pub fn pressed_keys(&self) -> &[u32] {
        &self.pressed_keys
    }
}

impl Default for Keyboard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyboard_new() {
        let keyboard = Keyboard::new();
        assert!(keyboard.pressed_keys().is_empty());
    }

    #[test]
    fn test_key_press_release() {
        let mut keyboard = Keyboard::new();

        assert!(keyboard.key_press(30)); // 'A' key
        assert!(keyboard.pressed_keys().contains(&30));

        // Repeat
        assert!(!keyboard.key_press(30));

        assert!(keyboard.key_release(30));
        assert!(!keyboard.pressed_keys().contains(&30));
        assert!(!keyboard.key_release(30));
    }

    #[test]
    fn test_track_events() {
        let mut keyboard = Keyboard::new();
        assert!(keyboard.track(KeyEvent::pressed(KEY_LEFTMETA, 0)));
        assert!(keyboard.track(KeyEvent::pressed(30, 1)));
        assert_eq!(keyboard.pressed_keys(), &[KEY_LEFTMETA, 30]);
        assert!(keyboard.track(KeyEvent::released(KEY_LEFTMETA, 2)));
        assert_eq!(keyboard.pressed_keys(), &[30]);
    }

    #[test]
    fn test_default_interaction_ignores_keys() {
        let handler = NoKeyboardInteraction;
        handler.handle_keyboard_enter();
        assert_eq!(
            handler.handle_keyboard_key(KeyEvent::pressed(30, 0)),
            KeyboardAction::Ignore
        );
        handler.handle_keyboard_leave();
    }
}
