//! Command-line options shared by the `archview` binary and its tests.

use clap::Args;

/// What part of the graph to show.
#[derive(Args, Debug, Clone, Default)]
pub struct ViewOptions {
    /// Zoom level, as an ordinal (1-4) or a name (enterprise, system, service, component)
    #[arg(long, value_name = "LEVEL")]
    pub zoom: Option<String>,

    /// Show every node of this type, ignoring the zoom level
    #[arg(long = "filter-type", value_name = "TYPE", conflicts_with = "filter_status")]
    pub filter_type: Option<String>,

    /// Show every node with this status, ignoring the zoom level
    #[arg(long = "filter-status", value_name = "STATUS")]
    pub filter_status: Option<String>,

    /// Free-text search over name, technology, type and description
    #[arg(long, value_name = "QUERY")]
    pub search: Option<String>,

    /// Node id to select
    #[arg(long, value_name = "ID")]
    pub select: Option<String>,
}

/// Preference changes applied before rendering. Persisted when a state
/// directory is given.
#[derive(Args, Debug, Clone, Default)]
pub struct PreferenceOptions {
    /// Flip the visibility of a layer (repeatable)
    #[arg(long = "toggle-layer", value_name = "LAYER", action = clap::ArgAction::Append)]
    pub toggle_layers: Vec<String>,

    /// Multiply the viewport scale by this factor
    #[arg(long = "scale-by", value_name = "FACTOR")]
    pub scale_by: Option<f64>,

    /// Restore the default viewport before anything else
    #[arg(long = "reset-view", default_value_t = false)]
    pub reset_view: bool,
}

impl ViewOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_zoom(mut self, zoom: impl Into<String>) -> Self {
        self.zoom = Some(zoom.into());
        self
    }

    pub fn with_filter_type(mut self, service_type: impl Into<String>) -> Self {
        self.filter_type = Some(service_type.into());
        self
    }

    pub fn with_filter_status(mut self, status: impl Into<String>) -> Self {
        self.filter_status = Some(status.into());
        self
    }

    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.search = Some(query.into());
        self
    }

    pub fn with_select(mut self, id: impl Into<String>) -> Self {
        self.select = Some(id.into());
        self
    }
}

impl PreferenceOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_toggle_layer(mut self, layer: impl Into<String>) -> Self {
        self.toggle_layers.push(layer.into());
        self
    }

    pub fn with_scale_by(mut self, factor: f64) -> Self {
        self.scale_by = Some(factor);
        self
    }

    pub fn with_reset_view(mut self, reset: bool) -> Self {
        self.reset_view = reset;
        self
    }
}
