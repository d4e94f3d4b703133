//! Input seat coordination

use super::{Keyboard, Pointer};
use crate::scene::NodeRef;

/// Input seat that groups a keyboard and a pointer
#[derive(Debug)]
pub struct Seat {
    /// Seat name
    name: String,
    /// Keyboard device
    keyboard: Keyboard,
    /// Pointer device
    pointer: Pointer,
}

impl Seat {
    /// Create a new seat
    pub fn new() -> Self {
        Self {
            name: "seat0".to_string(),
            keyboard: Keyboard::new(),
            pointer: Pointer::new(),
        }
    }

    /// Get the seat name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get keyboard reference
    pub fn keyboard(&self) -> &Keyboard {
        &self.keyboard
    }

    /// Get mutable keyboard reference
    pub fn keyboard_mut(&mut self) -> &mut Keyboard {
        &mut self.keyboard
    }

    /// Get pointer reference
    pub fn pointer(&self) -> &Pointer {
        &self.pointer
    }

    /// Get mutable pointer reference
    pub fn pointer_mut(&mut self) -> &mut Pointer {
        &mut self.pointer
    }

    /// Get the node under the pointer
    pub fn pointer_focus(&self) -> Option<NodeRef> {
        self.pointer.focus()
    }
}

impl Default for Seat {
    fn default() -> Self {
        Self::new()
    }
}
