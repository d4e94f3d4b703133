//! Pointer (mouse/trackpad) handling

use std::rc::{Rc, Weak};

use log::debug;

use crate::geometry::PointF;
use crate::scene::{InputNode, Node, NodeId, NodeRef};

/// Pointer state
#[derive(Debug)]
pub struct Pointer {
    /// Node under the pointer. Weak so a detached node can die.
    focus: Weak<Node>,
    /// Position in the global layout
    position: PointF,
    /// Position relative to the focused node
    local_position: PointF,
    /// Currently pressed buttons
    pressed_buttons: Vec<u32>,
}

impl Pointer {
    /// Create a new pointer
    pub fn new() -> Self {
        Self {
            focus: Weak::new(),
            position: PointF::default(),
            local_position: PointF::default(),
            pressed_buttons: Vec::new(),
        }
    }

    /// Move the pointer to `at`, with `target` being the hit test result there
    pub fn motion(&mut self, at: PointF, target: Option<InputNode>) -> PointerFocusChange {
        let old_focus = self.focus().map(|node| node.id());
        self.position = at;

        let new_focus = match target {
            Some(InputNode { node, local_coords }) => {
                self.focus = Rc::downgrade(&node);
                self.local_position = local_coords;
                Some(node.id())
            }
            None => {
                self.focus = Weak::new();
                self.local_position = PointF::default();
                None
            }
        };

        if old_focus != new_focus {
            debug!("Pointer focus {:?} -> {:?}", old_focus, new_focus);
        }

        PointerFocusChange {
            old_focus,
            new_focus,
            local_position: self.local_position,
        }
    }

    /// Get the node under the pointer, if it is still alive
    pub fn focus(&self) -> Option<NodeRef> {
        self.focus.upgrade()
    }

    /// Get current global position
    pub fn position(&self) -> PointF {
        self.position
    }

    /// Get position relative to the focused node
    pub fn local_position(&self) -> PointF {
        self.local_position
    }

    /// Handle a button press
    pub fn button_press(&mut self, button: u32) -> bool {
        if !self.pressed_buttons.contains(&button) {
            self.pressed_buttons.push(button);
            debug!("Button pressed: {}", button);
            true
        } else {
            false
        }
    }

    /// Handle a button release
    pub fn button_release(&mut self, button: u32) -> bool {
        if let Some(idx) = self.pressed_buttons.iter().position(|&b| b == button) {
            self.pressed_buttons.remove(idx);
            debug!("Button released: {}", button);
            true
        } else {
            false
        }
    }

    /// Get currently pressed buttons
    pub fn pressed_buttons(&self) -> &[u32] {
        &self.pressed_buttons
    }
}

impl Default for Pointer {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of a pointer motion
#[derive(Debug, Clone, PartialEq)]
pub struct PointerFocusChange {
    /// Previously focused node
    pub old_focus: Option<NodeId>,
    /// Newly focused node
    pub new_focus: Option<NodeId>,
    /// Position relative to the new focus
    pub local_position: PointF,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::ViewInfo;

    #[test]
    fn test_pointer_new() {
        let pointer = Pointer::new();
        assert!(pointer.focus().is_none());
        assert!(pointer.pressed_buttons().is_empty());
    }

    #[test]
    fn test_button_press_release() {
        let mut pointer = Pointer::new();

        // Press left button
        assert!(pointer.button_press(0x110));
        assert!(!pointer.button_press(0x110));
        assert_eq!(pointer.pressed_buttons(), &[0x110]);

        assert!(pointer.button_release(0x110));
        assert!(!pointer.button_release(0x110));
        assert!(pointer.pressed_buttons().is_empty());
    }

    #[test]
    fn test_motion_focus_change() {
        let mut pointer = Pointer::new();
        let first = Node::new_view(ViewInfo::new("a", "x"));
        let second = Node::new_view(ViewInfo::new("b", "x"));

        let change = pointer.motion(
            PointF::new(100.0, 50.0),
            Some(InputNode {
                node: first.clone(),
                local_coords: PointF::new(10.0, 5.0),
            }),
        );
        assert!(change.old_focus.is_none());
        assert_eq!(change.new_focus, Some(first.id()));
        assert_eq!(pointer.position(), PointF::new(100.0, 50.0));
        assert_eq!(pointer.local_position(), PointF::new(10.0, 5.0));

        let change = pointer.motion(
            PointF::new(200.0, 100.0),
            Some(InputNode {
                node: second.clone(),
                local_coords: PointF::new(0.0, 0.0),
            }),
        );
        assert_eq!(change.old_focus, Some(first.id()));
        assert_eq!(change.new_focus, Some(second.id()));

        let change = pointer.motion(PointF::new(0.0, 0.0), None);
        assert_eq!(change.old_focus, Some(second.id()));
        assert!(pointer.focus().is_none());
    }

    #[test]
    fn test_focus_does_not_keep_node_alive() {
        let mut pointer = Pointer::new();
        let node = Node::new_view(ViewInfo::default());
        pointer.motion(
            PointF::default(),
            Some(InputNode {
                node: node.clone(),
                local_coords: PointF::default(),
            }),
        );
        assert!(pointer.focus().is_some());
        drop(node);
        assert!(pointer.focus().is_none());
    }
}
