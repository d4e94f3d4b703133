//! Visitor protocol for walking the scene graph
//!
//! Every cross-cutting pass (hit testing helpers, focus collection,
//! introspection) is written as a [`Visitor`]. Traversal is pre-order and
//! follows child list order; the visitor decides per inner node whether to
//! descend, skip the subtree, or abort the whole walk.

use std::rc::Rc;

use super::node::{Node, NodeKind, NodeRef};
use super::view::ViewNode;

/// How traversal continues after a callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Iteration {
    /// Abort the whole traversal
    Stop,
    /// Do not descend into this node's children
    SkipChildren,
    /// Visit the children
    All,
}

/// A pass over the scene graph.
///
/// Only [`generic_node`](Visitor::generic_node) is required: inner and view
/// nodes fall back to it unless the visitor handles them specially.
pub trait Visitor {
    /// Visit an inner node with children
    fn inner_node(&mut self, node: &NodeRef) -> Iteration {
        self.generic_node(node)
    }

    /// Visit a view node
    fn view_node(&mut self, node: &NodeRef, _view: &ViewNode) -> Iteration {
        self.generic_node(node)
    }

    /// Visit a node whose kind is neither inner nor view
    fn generic_node(&mut self, node: &NodeRef) -> Iteration;
}

impl Node {
    /// Walk this subtree with `visitor`.
    ///
    /// Returns [`Iteration::Stop`] if the visitor aborted, otherwise
    /// [`Iteration::All`].
    pub fn visit(self: &Rc<Self>, visitor: &mut dyn Visitor) -> Iteration {
        match self.kind() {
            NodeKind::Inner(_) => match visitor.inner_node(self) {
                Iteration::Stop => Iteration::Stop,
                Iteration::All => {
                    // Snapshot so a visitor may rearrange children it has seen
                    for child in self.children() {
                        if child.visit(visitor) == Iteration::Stop {
                            return Iteration::Stop;
                        }
                    }
                    Iteration::All
                }
                Iteration::SkipChildren => Iteration::All,
            },
            NodeKind::View(view) => match visitor.view_node(self, view) {
                Iteration::Stop => Iteration::Stop,
                _ => Iteration::All,
            },
            NodeKind::Generic(_) => match visitor.generic_node(self) {
                Iteration::Stop => Iteration::Stop,
                _ => Iteration::All,
            },
        }
    }
}
