//! Scene root and keyboard focus tracking

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use log::{debug, trace};

use super::layer::Layer;
use super::node::{InputNode, Node, NodeFlags, NodeId, NodeRef, SceneError};
use super::visitor::{Iteration, Visitor};
use crate::geometry::PointF;
use crate::input::keyboard::{KeyEvent, KeyboardAction};

/// Nodes that gained and lost keyboard focus in one [`RootNode::update`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusChange {
    /// Nodes sent a keyboard leave, in notification order
    pub left: Vec<NodeId>,
    /// Nodes sent a keyboard enter, in notification order
    pub entered: Vec<NodeId>,
}

impl FocusChange {
    pub fn is_empty(&self) -> bool {
        self.left.is_empty() && self.entered.is_empty()
    }
}

/// Collects every node carrying [`NodeFlags::ACTIVE_KEYBOARD`]
#[derive(Default)]
struct CollectActiveNodes {
    active_nodes: Vec<NodeRef>,
}

impl Visitor for CollectActiveNodes {
    fn generic_node(&mut self, node: &NodeRef) -> Iteration {
        if node.flags().contains(NodeFlags::ACTIVE_KEYBOARD) {
            self.active_nodes.push(Rc::clone(node));
        }
        Iteration::All
    }
}

/// Root of the scene graph.
///
/// The root is a structural floating inner node with one structural floating
/// child per [`Layer`], highest priority first. It also owns the set of nodes
/// currently receiving keyboard input.
#[derive(Debug)]
pub struct RootNode {
    node: NodeRef,
    layers: [NodeRef; Layer::COUNT],
    active_keyboard_nodes: RefCell<Vec<NodeRef>>,
}

impl RootNode {
    pub fn new() -> Self {
        let node = Node::new_floating(true);
        let layers: [NodeRef; Layer::COUNT] = std::array::from_fn(|_| Node::new_floating(true));
        node.set_children_unchecked(layers.iter().rev().cloned().collect());

        Self {
            node,
            layers,
            active_keyboard_nodes: RefCell::new(Vec::new()),
        }
    }

    /// The root's own node
    pub fn node(&self) -> &NodeRef {
        &self.node
    }

    /// The node holding everything in `layer`
    pub fn layer(&self, layer: Layer) -> &NodeRef {
        &self.layers[layer.index()]
    }

    /// Replace the root's children. The layer nodes must stay in place.
    pub fn set_children_list(&self, new_list: Vec<NodeRef>) -> Result<(), SceneError> {
        self.node.set_children_list(new_list)
    }

    pub fn find_node_at(&self, at: PointF) -> Option<InputNode> {
        self.node.find_node_at(at)
    }

    pub fn visit(&self, visitor: &mut dyn Visitor) -> Iteration {
        self.node.visit(visitor)
    }

    /// The layer `node` lives in, found by following parent links
    pub fn layer_of(&self, node: &NodeRef) -> Option<Layer> {
        let mut current = Some(Rc::clone(node));
        while let Some(node) = current {
            if let Some(index) = self.layers.iter().position(|l| Rc::ptr_eq(l, &node)) {
                return Some(Layer::ALL[index]);
            }
            current = node.parent();
        }
        None
    }

    /// Nodes receiving keyboard input after the last update, in tree order
    pub fn active_keyboard_nodes(&self) -> Vec<NodeRef> {
        self.active_keyboard_nodes.borrow().clone()
    }

    /// Recompute the active keyboard set.
    ///
    /// Every node that dropped out of the set gets a keyboard leave before any
    /// node that joined gets a keyboard enter. Nodes in both sets are not
    /// notified.
    pub fn update(&self) -> FocusChange {
        let mut collector = CollectActiveNodes::default();
        self.node.visit(&mut collector);

        let previous = self.active_keyboard_nodes.borrow().clone();
        let already_focused: HashSet<NodeId> = previous.iter().map(|n| n.id()).collect();
        let new_focused: HashSet<NodeId> =
            collector.active_nodes.iter().map(|n| n.id()).collect();

        let mut change = FocusChange::default();
        for old_focus in &previous {
            if !new_focused.contains(&old_focus.id()) {
                debug!("Keyboard leave {}", old_focus.id());
                old_focus.keyboard_interaction().handle_keyboard_leave();
                change.left.push(old_focus.id());
            }
        }

        for new_focus in &collector.active_nodes {
            if !already_focused.contains(&new_focus.id()) {
                debug!("Keyboard enter {}", new_focus.id());
                new_focus.keyboard_interaction().handle_keyboard_enter();
                change.entered.push(new_focus.id());
            }
        }

        *self.active_keyboard_nodes.borrow_mut() = collector.active_nodes;
        change
    }

    /// Offer a key event to the active nodes in order until one consumes it
    pub fn handle_key(&self, event: KeyEvent) -> KeyboardAction {
        let active = self.active_keyboard_nodes();
        for node in &active {
            let result = node.keyboard_interaction().handle_keyboard_key(event);
            if result == KeyboardAction::Consume {
                trace!("Key {} consumed by {}", event.keycode, node.id());
                return KeyboardAction::Consume;
            }
        }

        trace!("Key {} not consumed ({} active nodes)", event.keycode, active.len());
        KeyboardAction::Ignore
    }
}

impl Default for RootNode {
    fn default() -> Self {
        Self::new()
    }
}
