//! Scene graph
//!
//! This module contains the tree describing everything on screen:
//! - Node primitives and validated child list replacement
//! - The visitor protocol used by every pass over the tree
//! - The fixed per-output and per-layer skeleton
//! - Keyboard focus tracking on the root

pub mod layer;
pub mod node;
pub mod output;
pub mod root;
pub mod view;
pub mod visitor;

pub use layer::Layer;
pub use node::{
    GenericContent, InputNode, Node, NodeFlags, NodeId, NodeKind, NodeRef, SceneError,
};
pub use output::OutputNode;
pub use root::{FocusChange, RootNode};
pub use view::{TiledEdges, ViewInfo, ViewNode};
pub use visitor::{Iteration, Visitor};
