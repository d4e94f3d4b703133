//! Wayscene - the scene graph of a Wayland compositor
//!
//! Wayscene holds everything on screen in a single tree: outputs, the fixed
//! set of drawing layers, and the views (windows) placed inside them. Every
//! pass over the tree goes through one visitor protocol, and the root keeps
//! track of which nodes currently receive keyboard input.
//!
//! # Architecture
//!
//! - **Scene**: node primitives, visitor traversal, output and root skeleton,
//!   keyboard focus diffing
//! - **Input**: key events, per-node keyboard handlers, seat state,
//!   evdev key names, synthetic key and button combos
//! - **Compositor**: the context object owning the scene, outputs and seat
//! - **Introspection**: view listing for remote tooling
//! - **Event loop**: calloop integration that serialises scene updates
//!
//! # Example
//!
//! ```
//! use wayscene::scene::{Layer, Node, NodeFlags, RootNode, ViewInfo};
//!
//! let root = RootNode::new();
//! let view = Node::new_view(ViewInfo::new("Terminal", "foot"));
//! view.set_flag(NodeFlags::ACTIVE_KEYBOARD, true);
//! root.layer(Layer::Workspace).add_back(view.clone()).unwrap();
//!
//! let change = root.update();
//! assert_eq!(change.entered, vec![view.id()]);
//! ```

pub mod compositor;
pub mod event_loop;
pub mod geometry;
pub mod input;
pub mod introspect;
pub mod scene;
