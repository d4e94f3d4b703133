//! Compositor state
//!
//! This module contains the context object handed to everything that needs
//! the scene graph: it owns the root node, the outputs and the seat, and is
//! the entry point for updates and input.

use std::time::Instant;

use log::{debug, info};

use crate::compositor::{Output, OutputId, OutputManager};
use crate::geometry::PointF;
use crate::input::keyboard::KEY_LEFTMETA;
use crate::input::pointer::PointerFocusChange;
use crate::input::{parse_combo, ButtonMode, InputError, KeyEvent, KeyboardAction, Seat};
use crate::introspect::{list_views, ViewSummary};
use crate::scene::{FocusChange, Layer, RootNode, SceneError};

/// The compositor state
///
/// Created once at startup and dropped at teardown; there is no global
/// accessor, callers pass it explicitly.
pub struct CompositorState {
    /// Scene graph root
    scene: RootNode,

    /// Output manager - tracks displays/monitors
    pub outputs: OutputManager,

    /// Input seat - keyboard and pointer state
    pub seat: Seat,

    /// Number of completed scene updates
    updates: u64,

    /// Cleared to end the event loop
    running: bool,

    /// Reference point for synthetic event timestamps
    started: Instant,
}

impl CompositorState {
    /// Create a new compositor state with an empty scene
    pub fn new() -> Self {
        Self {
            scene: RootNode::new(),
            outputs: OutputManager::new(),
            seat: Seat::new(),
            updates: 0,
            running: true,
            started: Instant::now(),
        }
    }

    /// The scene graph root
    pub fn scene(&self) -> &RootNode {
        &self.scene
    }

    /// Whether the event loop should keep going
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Ask the event loop to return after the current dispatch
    pub fn stop(&mut self) {
        info!("Stopping compositor");
        self.running = false;
    }

    /// Add an output and attach its subtree to the workspace layer
    pub fn add_output(&mut self, output: Output) -> Result<OutputId, SceneError> {
        self.scene
            .layer(Layer::Workspace)
            .add_back(output.scene().node().clone())?;
        info!(
            "Added output {} ({:?}) at {:?}",
            output.name,
            output.id,
            output.layout_geometry()
        );
        Ok(self.outputs.add(output))
    }

    /// Detach an output's subtree and forget the output
    pub fn remove_output(&mut self, id: OutputId) -> Result<Option<Output>, SceneError> {
        if let Some(output) = self.outputs.get(id) {
            self.scene
                .layer(Layer::Workspace)
                .remove_child(output.scene().node())?;
            info!("Removed output {} ({:?})", output.name, id);
        }
        Ok(self.outputs.remove(id))
    }

    /// Recompute keyboard focus after topology or flag changes
    pub fn update_scene(&mut self) -> FocusChange {
        self.updates += 1;
        let change = self.scene.update();
        debug!(
            "Scene update {}: {} left, {} entered",
            self.updates,
            change.left.len(),
            change.entered.len()
        );
        change
    }

    /// Number of scene updates run so far
    pub fn update_count(&self) -> u64 {
        self.updates
    }

    /// Deliver a key event to the active keyboard nodes
    pub fn handle_key(&mut self, event: KeyEvent) -> KeyboardAction {
        self.seat.keyboard_mut().track(event);
        self.scene.handle_key(event)
    }

    /// Press and release a key combo such as `S-KEY_A`
    pub fn feed_key(&mut self, combo: &str) -> Result<(), InputError> {
        let combo = parse_combo(combo)?;
        let time = self.current_time_msec();
        for event in combo.events(time) {
            self.handle_key(event);
        }
        Ok(())
    }

    /// Press and/or release a button combo such as `S-BTN_LEFT`.
    ///
    /// The super key, when requested, is held around the button: pressed
    /// before the button goes down and released after it comes up.
    pub fn feed_button(&mut self, combo: &str, mode: ButtonMode) -> Result<(), InputError> {
        let combo = parse_combo(combo)?;
        let time = self.current_time_msec();

        if mode.presses() {
            if combo.modifier {
                self.handle_key(KeyEvent::pressed(KEY_LEFTMETA, time));
            }
            self.seat.pointer_mut().button_press(combo.code);
        }

        if mode.releases() {
            self.seat.pointer_mut().button_release(combo.code);
            if combo.modifier {
                self.handle_key(KeyEvent::released(KEY_LEFTMETA, time));
            }
        }
        Ok(())
    }

    /// Move the pointer and refresh the node under it
    pub fn pointer_motion(&mut self, at: PointF) -> PointerFocusChange {
        let target = self.scene.find_node_at(at);
        self.seat.pointer_mut().motion(at, target)
    }

    /// Every view in the scene, for remote introspection
    pub fn list_views(&self) -> Vec<ViewSummary> {
        list_views(&self.scene)
    }

    fn current_time_msec(&self) -> u32 {
        // Wraps after ~49 days, like the protocol's timestamps
        self.started.elapsed().as_millis() as u32
    }
}

impl Default for CompositorState {
    fn default() -> Self {
        Self::new()
    }
}
