//! Scene graph nodes
//!
//! Every element on screen is a [`Node`]. Nodes are shared through
//! [`NodeRef`] (`Rc<Node>`); the owning child list of an inner node is the only
//! thing keeping a node alive, while the parent link is a [`Weak`] back
//! reference used for lookups only.
//!
//! Inner nodes are tagged at construction as structural or dynamic. A floating
//! inner node accepts wholesale replacement of its child list as long as the
//! ordered sequence of structural children stays the same.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use log::{trace, warn};

use super::view::{ViewInfo, ViewNode};
use crate::geometry::{Geometry, PointF};
use crate::input::keyboard::{KeyboardInteraction, NoKeyboardInteraction};

/// Shared handle to a scene node
pub type NodeRef = Rc<Node>;

/// Unique identifier for scene nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl NodeId {
    fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        NodeId(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

// Capabilities a node advertises to the cross-cutting passes
bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct NodeFlags: u32 {
        /// The node wants to receive keyboard input
        const ACTIVE_KEYBOARD = 1;
    }
}

/// Errors reported by child list replacement
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    #[error("{0} does not allow its children to be replaced")]
    NotFloating(NodeId),
    #[error("Structure nodes of {node} would change ({expected} before, {found} after)")]
    StructureMismatch {
        node: NodeId,
        expected: usize,
        found: usize,
    },
}

/// Content of a node that is neither an inner node nor a view
pub trait GenericContent: fmt::Debug {
    /// Area that accepts pointer input, if any
    fn bounding_box(&self) -> Option<Geometry> {
        None
    }
}

/// Children storage of an inner node
#[derive(Debug)]
pub struct InnerNode {
    floating: bool,
    children: RefCell<Vec<NodeRef>>,
}

impl InnerNode {
    /// Whether the child list may be replaced through [`Node::set_children_list`]
    pub fn is_floating(&self) -> bool {
        self.floating
    }
}

/// The kinds of node the visitor protocol dispatches on
#[derive(Debug)]
pub enum NodeKind {
    Inner(InnerNode),
    View(ViewNode),
    Generic(Box<dyn GenericContent>),
}

/// Result of a hit test: the node under the point and the point in its
/// local coordinates
#[derive(Debug, Clone)]
pub struct InputNode {
    pub node: NodeRef,
    pub local_coords: PointF,
}

/// A node in the scene graph
pub struct Node {
    id: NodeId,
    structure: bool,
    flags: Cell<NodeFlags>,
    parent: RefCell<Weak<Node>>,
    keyboard: RefCell<Rc<dyn KeyboardInteraction>>,
    kind: NodeKind,
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("structure", &self.structure)
            .field("flags", &self.flags.get())
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

fn structure_nodes(list: &[NodeRef]) -> Vec<*const Node> {
    list.iter()
        .filter(|node| node.is_structure_node())
        .map(Rc::as_ptr)
        .collect()
}

impl Node {
    fn with_kind(structure: bool, kind: NodeKind) -> NodeRef {
        Rc::new(Self {
            id: NodeId::new(),
            structure,
            flags: Cell::new(NodeFlags::empty()),
            parent: RefCell::new(Weak::new()),
            keyboard: RefCell::new(Rc::new(NoKeyboardInteraction)),
            kind,
        })
    }

    /// Inner node whose children are fixed by its owner
    pub(crate) fn new_inner(structure: bool) -> NodeRef {
        Self::with_kind(
            structure,
            NodeKind::Inner(InnerNode {
                floating: false,
                children: RefCell::new(Vec::new()),
            }),
        )
    }

    /// Create an empty floating inner node
    pub fn new_floating(structure: bool) -> NodeRef {
        Self::with_kind(
            structure,
            NodeKind::Inner(InnerNode {
                floating: true,
                children: RefCell::new(Vec::new()),
            }),
        )
    }

    /// Create a view node for a window or surface
    pub fn new_view(info: ViewInfo) -> NodeRef {
        Self::with_kind(false, NodeKind::View(ViewNode::new(info)))
    }

    /// Create a node with custom content
    pub fn new_generic(content: impl GenericContent + 'static) -> NodeRef {
        Self::with_kind(false, NodeKind::Generic(Box::new(content)))
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Whether the node's position in its parent is fixed by protocol
    pub fn is_structure_node(&self) -> bool {
        self.structure
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// The view data, when this is a view node
    pub fn as_view(&self) -> Option<&ViewNode> {
        match &self.kind {
            NodeKind::View(view) => Some(view),
            _ => None,
        }
    }

    pub fn flags(&self) -> NodeFlags {
        self.flags.get()
    }

    pub fn set_flags(&self, flags: NodeFlags) {
        self.flags.set(flags);
    }

    /// Turn a single capability on or off
    pub fn set_flag(&self, flag: NodeFlags, enabled: bool) {
        let mut flags = self.flags.get();
        flags.set(flag, enabled);
        self.flags.set(flags);
    }

    /// The current owner, if the node is attached
    pub fn parent(&self) -> Option<NodeRef> {
        self.parent.borrow().upgrade()
    }

    /// Snapshot of the child list. Leaves have no children.
    pub fn children(&self) -> Vec<NodeRef> {
        match &self.kind {
            NodeKind::Inner(inner) => inner.children.borrow().clone(),
            _ => Vec::new(),
        }
    }

    /// The node's keyboard handler. No borrow of the node is held while the
    /// handler runs.
    pub fn keyboard_interaction(&self) -> Rc<dyn KeyboardInteraction> {
        self.keyboard.borrow().clone()
    }

    pub fn set_keyboard_interaction(&self, handler: impl KeyboardInteraction + 'static) {
        *self.keyboard.borrow_mut() = Rc::new(handler);
    }

    /// Find the topmost node accepting input at the given point.
    ///
    /// Children are asked in list order and the first match wins.
    pub fn find_node_at(self: &Rc<Self>, at: PointF) -> Option<InputNode> {
        match &self.kind {
            NodeKind::Inner(inner) => inner
                .children
                .borrow()
                .iter()
                .find_map(|child| child.find_node_at(at)),
            NodeKind::View(view) => {
                let geometry = view.info().geometry;
                geometry.contains(at).then(|| InputNode {
                    node: Rc::clone(self),
                    local_coords: geometry.to_local(at),
                })
            }
            NodeKind::Generic(content) => content
                .bounding_box()
                .filter(|bbox| bbox.contains(at))
                .map(|bbox| InputNode {
                    node: Rc::clone(self),
                    local_coords: bbox.to_local(at),
                }),
        }
    }

    /// Replace the whole child list of a floating inner node.
    ///
    /// Fails without touching the tree if the node is not floating or if the
    /// structure nodes of `new_list` differ, by identity or order, from the
    /// current ones.
    pub fn set_children_list(self: &Rc<Self>, new_list: Vec<NodeRef>) -> Result<(), SceneError> {
        let inner = match &self.kind {
            NodeKind::Inner(inner) if inner.floating => inner,
            _ => return Err(SceneError::NotFloating(self.id)),
        };

        debug_assert!(
            !new_list.iter().any(|node| self.is_or_descends_from(node)),
            "attaching to {} would create a cycle",
            self.id
        );

        let current = structure_nodes(&inner.children.borrow());
        let requested = structure_nodes(&new_list);
        if current != requested {
            warn!(
                "Rejecting new children of {}: structure nodes changed",
                self.id
            );
            return Err(SceneError::StructureMismatch {
                node: self.id,
                expected: current.len(),
                found: requested.len(),
            });
        }

        self.set_children_unchecked(new_list);
        Ok(())
    }

    /// Install a child list without validation. Children dropped from the
    /// list lose their parent link if it still points here.
    pub(crate) fn set_children_unchecked(self: &Rc<Self>, new_list: Vec<NodeRef>) {
        let NodeKind::Inner(inner) = &self.kind else {
            debug_assert!(false, "{} cannot have children", self.id);
            return;
        };

        let this = Rc::downgrade(self);
        for node in &new_list {
            *node.parent.borrow_mut() = this.clone();
        }

        let old = inner.children.replace(new_list);
        let current = inner.children.borrow();
        for node in old {
            let kept = current.iter().any(|n| Rc::ptr_eq(n, &node));
            if !kept && node.parent.borrow().ptr_eq(&this) {
                node.parent.replace(Weak::new());
            }
        }

        trace!("{} now has {} children", self.id, current.len());
    }

    /// Insert a child in front of all others (highest priority)
    pub fn add_front(self: &Rc<Self>, child: NodeRef) -> Result<(), SceneError> {
        let mut list = self.children();
        list.insert(0, child);
        self.set_children_list(list)
    }

    /// Append a child after all others (lowest priority)
    pub fn add_back(self: &Rc<Self>, child: NodeRef) -> Result<(), SceneError> {
        let mut list = self.children();
        list.push(child);
        self.set_children_list(list)
    }

    /// Detach a child. Returns false if it was not a child of this node.
    pub fn remove_child(self: &Rc<Self>, child: &NodeRef) -> Result<bool, SceneError> {
        let mut list = self.children();
        let before = list.len();
        list.retain(|node| !Rc::ptr_eq(node, child));
        if list.len() == before {
            return Ok(false);
        }

        self.set_children_list(list)?;
        Ok(true)
    }

    fn is_or_descends_from(self: &Rc<Self>, candidate: &NodeRef) -> bool {
        let mut current = Some(Rc::clone(self));
        while let Some(node) = current {
            if Rc::ptr_eq(&node, candidate) {
                return true;
            }
            current = node.parent();
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(title: &str, geometry: Geometry) -> NodeRef {
        let mut info = ViewInfo::new(title, "test");
        info.geometry = geometry;
        Node::new_view(info)
    }

    #[test]
    fn test_node_id_unique() {
        let id1 = NodeId::new();
        let id2 = NodeId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_set_children_sets_parent() {
        let parent = Node::new_floating(false);
        let a = view("a", Geometry::default());
        let b = view("b", Geometry::default());
        assert!(a.parent().is_none());

        parent
            .set_children_list(vec![a.clone(), b.clone()])
            .unwrap();

        assert!(Rc::ptr_eq(&a.parent().unwrap(), &parent));
        assert!(Rc::ptr_eq(&b.parent().unwrap(), &parent));
        assert_eq!(parent.children().len(), 2);
    }

    #[test]
    fn test_dynamic_children_can_be_reordered_and_removed() {
        let parent = Node::new_floating(false);
        let fixed = Node::new_floating(true);
        let a = view("a", Geometry::default());
        let b = view("b", Geometry::default());
        // Structure nodes are installed by their owner, as Root and Output do
        parent.set_children_unchecked(vec![a.clone(), fixed.clone(), b.clone()]);

        parent
            .set_children_list(vec![b.clone(), fixed.clone()])
            .unwrap();

        let ids: Vec<_> = parent.children().iter().map(|n| n.id()).collect();
        assert_eq!(ids, vec![b.id(), fixed.id()]);
        assert!(a.parent().is_none());
    }

    #[test]
    fn test_structure_change_rejected() {
        let parent = Node::new_floating(false);
        let s1 = Node::new_floating(true);
        let s2 = Node::new_floating(true);
        let dynamic = view("d", Geometry::default());
        parent.set_children_unchecked(vec![s1.clone(), dynamic.clone(), s2.clone()]);
        let before: Vec<_> = parent.children();

        // Reordered structure nodes
        let err = parent
            .set_children_list(vec![s2.clone(), s1.clone()])
            .unwrap_err();
        assert!(matches!(err, SceneError::StructureMismatch { .. }));

        // Dropped structure node
        assert!(parent.set_children_list(vec![s1.clone()]).is_err());

        // Foreign structure node with the same shape
        let other = Node::new_floating(true);
        assert!(parent
            .set_children_list(vec![s1.clone(), other.clone()])
            .is_err());
        assert!(other.parent().is_none());

        // Adding a structure node is also a change
        let extra = Node::new_floating(true);
        assert!(parent.add_back(extra.clone()).is_err());
        assert!(extra.parent().is_none());

        // Dynamic children may still come and go around them
        let before_dynamic = view("e", Geometry::default());
        parent
            .set_children_list(vec![
                before_dynamic.clone(),
                s1.clone(),
                dynamic.clone(),
                s2.clone(),
            ])
            .unwrap();
        parent
            .set_children_list(vec![s1.clone(), dynamic.clone(), s2.clone()])
            .unwrap();
        assert!(before_dynamic.parent().is_none());

        let after = parent.children();
        assert_eq!(before.len(), after.len());
        for (x, y) in before.iter().zip(after.iter()) {
            assert!(Rc::ptr_eq(x, y));
        }
    }

    #[test]
    fn test_non_floating_rejects_replacement() {
        let inner = Node::new_inner(false);
        let leaf = view("a", Geometry::default());
        assert_eq!(
            inner.set_children_list(vec![leaf.clone()]),
            Err(SceneError::NotFloating(inner.id()))
        );
        assert_eq!(
            leaf.set_children_list(Vec::new()),
            Err(SceneError::NotFloating(leaf.id()))
        );
    }

    #[test]
    fn test_add_and_remove_helpers() {
        let parent = Node::new_floating(false);
        let a = view("a", Geometry::default());
        let b = view("b", Geometry::default());
        parent.add_back(a.clone()).unwrap();
        parent.add_front(b.clone()).unwrap();
        let ids: Vec<_> = parent.children().iter().map(|n| n.id()).collect();
        assert_eq!(ids, vec![b.id(), a.id()]);

        assert!(parent.remove_child(&b).unwrap());
        assert!(!parent.remove_child(&b).unwrap());
        assert!(b.parent().is_none());
        assert_eq!(parent.children().len(), 1);
    }

    #[test]
    fn test_moved_child_keeps_new_parent() {
        let first = Node::new_floating(false);
        let second = Node::new_floating(false);
        let a = view("a", Geometry::default());
        first.add_back(a.clone()).unwrap();
        second.add_back(a.clone()).unwrap();
        first.remove_child(&a).unwrap();
        assert!(Rc::ptr_eq(&a.parent().unwrap(), &second));
    }

    #[test]
    fn test_find_node_at_first_match_wins() {
        let parent = Node::new_floating(false);
        let top = view("top", Geometry::new(0, 0, 100, 100));
        let below = view("below", Geometry::new(0, 0, 200, 200));
        parent
            .set_children_list(vec![top.clone(), below.clone()])
            .unwrap();

        let hit = parent.find_node_at(PointF::new(50.0, 50.0)).unwrap();
        assert!(Rc::ptr_eq(&hit.node, &top));

        let hit = parent.find_node_at(PointF::new(150.0, 120.0)).unwrap();
        assert!(Rc::ptr_eq(&hit.node, &below));
        assert_eq!(hit.local_coords, PointF::new(150.0, 120.0));

        assert!(parent.find_node_at(PointF::new(250.0, 0.0)).is_none());
    }

    #[test]
    fn test_find_node_at_generic() {
        #[derive(Debug)]
        struct Solid(Geometry);
        impl GenericContent for Solid {
            fn bounding_box(&self) -> Option<Geometry> {
                Some(self.0)
            }
        }

        #[derive(Debug)]
        struct Invisible;
        impl GenericContent for Invisible {}

        let parent = Node::new_floating(false);
        let ghost = Node::new_generic(Invisible);
        let solid = Node::new_generic(Solid(Geometry::new(10, 10, 10, 10)));
        parent
            .set_children_list(vec![ghost, solid.clone()])
            .unwrap();

        let hit = parent.find_node_at(PointF::new(15.0, 12.0)).unwrap();
        assert!(Rc::ptr_eq(&hit.node, &solid));
        assert_eq!(hit.local_coords, PointF::new(5.0, 2.0));
    }

    #[test]
    fn test_flags() {
        let node = view("a", Geometry::default());
        assert!(node.flags().is_empty());
        node.set_flag(NodeFlags::ACTIVE_KEYBOARD, true);
        assert!(node.flags().contains(NodeFlags::ACTIVE_KEYBOARD));
        node.set_flag(NodeFlags::ACTIVE_KEYBOARD, false);
        assert!(node.flags().is_empty());
        node.set_flags(NodeFlags::ACTIVE_KEYBOARD);
        assert_eq!(node.flags(), NodeFlags::ACTIVE_KEYBOARD);
    }

    #[test]
    fn test_dropping_owner_releases_children() {
        let parent = Node::new_floating(false);
        let a = view("a", Geometry::default());
        let kept = view("kept", Geometry::default());
        let weak = Rc::downgrade(&a);
        parent.add_back(a).unwrap();
        parent.add_back(kept.clone()).unwrap();
        assert!(weak.upgrade().is_some());

        drop(parent);
        assert!(weak.upgrade().is_none());
        // Back references never keep the owner alive
        assert!(kept.parent().is_none());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "cycle")]
    fn test_cycle_detected_in_debug() {
        let outer = Node::new_floating(false);
        let inner = Node::new_floating(false);
        outer.add_back(inner.clone()).unwrap();
        let _ = inner.add_back(outer.clone());
    }
}
