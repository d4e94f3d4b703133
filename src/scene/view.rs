//! View nodes
//!
//! A view node is the leaf representing one toplevel window or surface. The
//! window metadata is owned by the window management code and only mirrored
//! here so that passes over the tree can read it.

use std::cell::{Ref, RefCell, RefMut};

use crate::geometry::Geometry;

// Edges a view is tiled against
bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct TiledEdges: u32 {
        const TOP = 1;
        const BOTTOM = 2;
        const LEFT = 4;
        const RIGHT = 8;
    }
}

/// Window metadata carried by a view node
#[derive(Debug, Clone, Default)]
pub struct ViewInfo {
    /// Window title
    pub title: String,
    /// Application ID (app_id)
    pub app_id: String,
    /// Window management geometry, used for hit testing
    pub geometry: Geometry,
    /// Geometry of the whole surface including decorations and shadows
    pub base_geometry: Geometry,
    /// Edges the view is tiled against
    pub tiled_edges: TiledEdges,
    /// Is fullscreen
    pub fullscreen: bool,
    /// Is minimized
    pub minimized: bool,
}

impl ViewInfo {
    /// Create view metadata with a title and app id
    pub fn new(title: impl Into<String>, app_id: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            app_id: app_id.into(),
            ..Self::default()
        }
    }
}

/// Leaf node for a single window
#[derive(Debug)]
pub struct ViewNode {
    info: RefCell<ViewInfo>,
}

impl ViewNode {
    pub(crate) fn new(info: ViewInfo) -> Self {
        Self {
            info: RefCell::new(info),
        }
    }

    pub fn info(&self) -> Ref<'_, ViewInfo> {
        self.info.borrow()
    }

    pub fn info_mut(&self) -> RefMut<'_, ViewInfo> {
        self.info.borrow_mut()
    }

    /// Set the window title
    pub fn set_title(&self, title: impl Into<String>) {
        self.info.borrow_mut().title = title.into();
    }

    /// Set the application ID
    pub fn set_app_id(&self, app_id: impl Into<String>) {
        self.info.borrow_mut().app_id = app_id.into();
    }

    /// Set the window geometry. The base geometry follows unless it was set
    /// to something larger.
    pub fn set_geometry(&self, geometry: Geometry) {
        let mut info = self.info.borrow_mut();
        if info.base_geometry == info.geometry {
            info.base_geometry = geometry;
        }
        info.geometry = geometry;
    }

    pub fn set_base_geometry(&self, geometry: Geometry) {
        self.info.borrow_mut().base_geometry = geometry;
    }

    pub fn set_tiled_edges(&self, edges: TiledEdges) {
        self.info.borrow_mut().tiled_edges = edges;
    }

    /// Set fullscreen state
    pub fn set_fullscreen(&self, fullscreen: bool) {
        self.info.borrow_mut().fullscreen = fullscreen;
    }

    /// Set minimized state
    pub fn set_minimized(&self, minimized: bool) {
        self.info.borrow_mut().minimized = minimized;
    }
}
