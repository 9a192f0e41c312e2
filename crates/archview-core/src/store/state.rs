//! Store state split into the persisted preference subset and the
//! session-only subset.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use archview_error::Error;

use crate::config::ViewConfig;
use crate::model::{ArchitectureGraph, ServiceStatus, ServiceType};
use crate::projector::Projection;
use crate::search::SearchResult;
use crate::zoom::ZoomLevel;

/// Pan offset and scale of the rendered view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: 1.0,
        }
    }
}

impl Viewport {
    pub fn new(x: f64, y: f64, scale: f64) -> Self {
        Self { x, y, scale }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.scale.is_finite()
    }
}

/// UI preferences that survive across sessions.
///
/// This is the only state the persistence layer ever sees; the graph,
/// search, selection and filters live in [`SessionState`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewPreferences {
    pub viewport: Viewport,
    pub show_minimap: bool,
    pub show_legend: bool,
    pub visible_layers: BTreeSet<String>,
}

impl Default for ViewPreferences {
    fn default() -> Self {
        Self::from_config(&ViewConfig::default())
    }
}

impl ViewPreferences {
    pub fn from_config(config: &ViewConfig) -> Self {
        Self {
            viewport: Viewport::default(),
            show_minimap: config.show_minimap,
            show_legend: config.show_legend,
            visible_layers: config.default_layers.iter().cloned().collect(),
        }
    }

    /// Flip layer membership. Returns whether the layer is now visible.
    pub fn toggle_layer(&mut self, name: &str) -> bool {
        if self.visible_layers.remove(name) {
            false
        } else {
            self.visible_layers.insert(name.to_string());
            true
        }
    }
}

/// Canonical-graph filter that overrides the zoom-level projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum ActiveFilter {
    Type(ServiceType),
    Status(ServiceStatus),
}

impl ActiveFilter {
    pub fn field(&self) -> &'static str {
        match self {
            ActiveFilter::Type(_) => "type",
            ActiveFilter::Status(_) => "status",
        }
    }

    pub fn value(&self) -> &str {
        match self {
            ActiveFilter::Type(ty) => ty.as_str(),
            ActiveFilter::Status(status) => status.as_str(),
        }
    }
}

/// State that lives only as long as the current project view.
#[derive(Debug, Default)]
pub struct SessionState {
    pub graph: ArchitectureGraph,
    pub zoom_level: ZoomLevel,
    pub projection: Projection,
    pub filter: Option<ActiveFilter>,
    pub selected_node_id: Option<String>,
    pub search_query: String,
    pub search_results: Vec<SearchResult>,
    pub loading: bool,
    pub last_error: Option<Error>,
}

impl SessionState {
    pub fn new(zoom_level: ZoomLevel) -> Self {
        Self {
            zoom_level,
            ..Self::default()
        }
    }
}
