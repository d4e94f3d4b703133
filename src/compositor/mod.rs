//! Compositor core module
//!
//! This module contains the compositor context that owns the scene graph:
//! - Global compositor state (scene root, outputs, seat)
//! - Output/display management

pub mod output;
pub mod state;

pub use output::{Output, OutputId, OutputManager, OutputMode};
pub use state::CompositorState;
