//! Output/display management
//!
//! This module tracks displays and the scene subtree each one owns.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::geometry::Geometry;
use crate::scene::OutputNode;

/// Unique identifier for outputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OutputId(pub u64);

impl OutputId {
    fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        OutputId(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// An output mode (resolution + refresh rate)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputMode {
    /// Width in pixels
    pub width: i32,
    /// Height in pixels
    pub height: i32,
    /// Refresh rate in mHz (e.g., 60000 for 60Hz)
    pub refresh: i32,
}

/// A display output (monitor)
#[derive(Debug)]
pub struct Output {
    /// Unique identifier
    pub id: OutputId,
    /// Output name (e.g., "eDP-1")
    pub name: String,
    /// Position in global coordinate space
    pub x: i32,
    pub y: i32,
    /// Current mode
    pub mode: Option<OutputMode>,
    /// Scale factor
    pub scale: f64,
    /// Scene subtree of this output
    scene: OutputNode,
}

impl Output {
    /// Create a new output
    pub fn new(name: String) -> Self {
        Self {
            id: OutputId::new(),
            name,
            x: 0,
            y: 0,
            mode: None,
            scale: 1.0,
            scene: OutputNode::new(),
        }
    }

    /// Builder-style mode setter
    pub fn with_mode(mut self, mode: OutputMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Builder-style position setter
    pub fn with_position(mut self, x: i32, y: i32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Area covered in the global layout
    pub fn layout_geometry(&self) -> Geometry {
        let (width, height) = self.mode.map_or((0, 0), |m| (m.width, m.height));
        Geometry::new(self.x, self.y, width, height)
    }

    /// The output's scene subtree
    pub fn scene(&self) -> &OutputNode {
        &self.scene
    }
}

/// Manager for all outputs
#[derive(Debug, Default)]
pub struct OutputManager {
    outputs: BTreeMap<OutputId, Output>,
}

impl OutputManager {
    /// Create a new output manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an output
    pub fn add(&mut self, output: Output) -> OutputId {
        let id = output.id;
        self.outputs.insert(id, output);
        id
    }

    /// Get an output by ID
    pub fn get(&self, id: OutputId) -> Option<&Output> {
        self.outputs.get(&id)
    }

    /// Remove an output
    pub fn remove(&mut self, id: OutputId) -> Option<Output> {
        self.outputs.remove(&id)
    }
}
