//! Scene introspection for remote tooling
//!
//! Walks the scene graph and reports every view the way the remote
//! `list_views` command presents it.

use std::rc::Rc;

use serde::Serialize;

use crate::geometry::Geometry;
use crate::scene::{Iteration, NodeRef, RootNode, ViewNode, Visitor};

/// State flags of a listed view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewStateSummary {
    /// Tiled edges bitmask
    pub tiled: u32,
    pub fullscreen: bool,
    pub minimized: bool,
}

/// One entry of the view list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewSummary {
    pub id: u64,
    pub title: String,
    #[serde(rename = "app-id")]
    pub app_id: String,
    pub geometry: Geometry,
    #[serde(rename = "base-geometry")]
    pub base_geometry: Geometry,
    pub state: ViewStateSummary,
    /// Layer name, or "none" for views outside any layer
    pub layer: String,
}

#[derive(Default)]
struct CollectViews {
    views: Vec<NodeRef>,
}

impl Visitor for CollectViews {
    fn view_node(&mut self, node: &NodeRef, _view: &ViewNode) -> Iteration {
        self.views.push(Rc::clone(node));
        Iteration::All
    }

    fn generic_node(&mut self, _node: &NodeRef) -> Iteration {
        Iteration::All
    }
}

/// Every view in the scene, in traversal order
pub fn list_views(root: &RootNode) -> Vec<ViewSummary> {
    let mut collector = CollectViews::default();
    root.visit(&mut collector);

    collector
        .views
        .iter()
        .filter_map(|node| {
            let view = node.as_view()?;
            let info = view.info();
            Some(ViewSummary {
                id: node.id().0,
                title: info.title.clone(),
                app_id: info.app_id.clone(),
                geometry: info.geometry,
                base_geometry: info.base_geometry,
                state: ViewStateSummary {
                    tiled: info.tiled_edges.bits(),
                    fullscreen: info.fullscreen,
                    minimized: info.minimized,
                },
                layer: root
                    .layer_of(node)
                    .map_or("none", |layer| layer.name())
                    .to_string(),
            })
        })
        .collect()
}

/// The view list as a JSON array
pub fn list_views_json(root: &RootNode) -> serde_json::Result<serde_json::Value> {
    serde_json::to_value(list_views(root))
}
