//! Per-output subtree

use super::node::{Node, NodeRef};

/// The scene subtree of one display output.
///
/// The output node itself can be added to and removed from the scene like any
/// dynamic node, but its two regions are structure nodes fixed for its whole
/// lifetime: `dynamic` (first, higher priority) and `static`.
#[derive(Debug)]
pub struct OutputNode {
    node: NodeRef,
    static_node: NodeRef,
    dynamic: NodeRef,
}

impl OutputNode {
    pub fn new() -> Self {
        let node = Node::new_inner(false);
        let static_node = Node::new_floating(true);
        let dynamic = Node::new_floating(true);
        node.set_children_unchecked(vec![dynamic.clone(), static_node.clone()]);

        Self {
            node,
            static_node,
            dynamic,
        }
    }

    /// The output's own node, to be attached into the scene
    pub fn node(&self) -> &NodeRef {
        &self.node
    }

    /// Region for content that rarely changes
    pub fn static_node(&self) -> &NodeRef {
        &self.static_node
    }

    /// Region for content that is added and removed at runtime
    pub fn dynamic_node(&self) -> &NodeRef {
        &self.dynamic
    }
}

impl Default for OutputNode {
    fn default() -> Self {
        Self::new()
    }
}
