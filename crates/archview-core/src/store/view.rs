//! Read contract for the rendering layer.

use std::collections::BTreeSet;

use crate::model::{Dependency, Service};

use super::{GraphStore, Viewport};

/// What a renderer needs to draw one graph view.
///
/// Renderers depend on this trait rather than on [`GraphStore`] so that
/// several independent views, or a test double, can be drawn the same way.
pub trait GraphView {
    fn filtered_services(&self) -> &[Service];
    fn filtered_dependencies(&self) -> &[Dependency];
    fn selected_node_id(&self) -> Option<&str>;
    fn viewport(&self) -> Viewport;
    fn visible_layers(&self) -> &BTreeSet<String>;

    fn is_layer_visible(&self, name: &str) -> bool {
        self.visible_layers().contains(name)
    }

    /// Edges to draw, honouring the `dependencies` layer toggle.
    fn drawable_dependencies(&self) -> &[Dependency] {
        if self.is_layer_visible("dependencies") {
            self.filtered_dependencies()
        } else {
            &[]
        }
    }
}

impl GraphView for GraphStore {
    fn filtered_services(&self) -> &[Service] {
        &self.session.projection.nodes
    }

    fn filtered_dependencies(&self) -> &[Dependency] {
        &self.session.projection.edges
    }

    fn selected_node_id(&self) -> Option<&str> {
        self.session.selected_node_id.as_deref()
    }

    fn viewport(&self) -> Viewport {
        self.prefs.viewport
    }

    fn visible_layers(&self) -> &BTreeSet<String> {
        &self.prefs.visible_layers
    }
}
