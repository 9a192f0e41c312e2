//! The stateful graph view store.
//!
//! A [`GraphStore`] owns one canonical graph together with everything a
//! view derives from it: the zoom or filter projection, search results,
//! selection and viewport. Every mutating operation runs to completion and
//! leaves the canonical graph and its projection consistent with each other.
//!
//! The store is an ordinary value. Hosts that show several views at once
//! (comparison mode) construct one store per view; hosts with more than one
//! thread wrap it in a [`SharedGraphStore`].

mod shared;
mod state;
mod view;

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use archview_error::{Error, Result};

use crate::config::ViewConfig;
use crate::export::{ExportDocument, ExportFormat};
use crate::model::{ArchitectureGraph, Dependency, Service, ServiceStatus, ServiceType};
use crate::persist::PersistenceAdapter;
use crate::projector::{self, Projection};
use crate::search::{self, SearchResult};
use crate::zoom::ZoomLevel;

pub use shared::SharedGraphStore;
pub use state::{ActiveFilter, SessionState, ViewPreferences, Viewport};
pub use view::GraphView;

/// Node and edge counts for the canonical graph and the current projection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub visible_node_count: usize,
    pub visible_edge_count: usize,
    pub by_type: BTreeMap<String, usize>,
    pub by_status: BTreeMap<String, usize>,
}

/// Canonical graph plus derived view state.
#[derive(Debug)]
pub struct GraphStore {
    config: ViewConfig,
    prefs: ViewPreferences,
    session: SessionState,
    persistence: Option<PersistenceAdapter>,
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphStore {
    /// Create an empty store with default configuration.
    pub fn new() -> Self {
        Self::with_config(ViewConfig::default())
    }

    pub fn with_config(config: ViewConfig) -> Self {
        Self {
            prefs: ViewPreferences::from_config(&config),
            session: SessionState::new(config.default_zoom),
            config,
            persistence: None,
        }
    }

    /// Create a store whose preferences are restored from, and saved to,
    /// `persistence`.
    ///
    /// Restoration happens before any graph is loaded. Unreadable or corrupt
    /// storage is logged and the configured defaults are used instead.
    pub fn restore(config: ViewConfig, persistence: PersistenceAdapter) -> Self {
        let mut store = Self::with_config(config);
        match persistence.load() {
            Ok(Some(prefs)) => {
                debug!(key = persistence.key(), "restored view preferences");
                store.prefs = prefs;
            }
            Ok(None) => {}
            Err(err) => warn!(error = %err, "failed to restore view preferences, using defaults"),
        }
        store.persistence = Some(persistence);
        store
    }

    // ------------------------------------------------------------------
    // Loader lifecycle
    // ------------------------------------------------------------------

    /// Mark that a graph fetch is in flight.
    pub fn begin_load(&mut self) {
        self.session.loading = true;
    }

    /// Replace the canonical graph and re-derive every projection.
    ///
    /// The selection survives if its node is still present; otherwise it is
    /// cleared. A pending search query is re-run against the new graph.
    pub fn set_graph(&mut self, graph: ArchitectureGraph) {
        let duplicates = graph.duplicate_ids();
        if !duplicates.is_empty() {
            warn!(ids = ?duplicates, "graph contains duplicate node ids");
        }
        let dangling = graph.dangling_edges().count();
        if dangling > 0 {
            debug!(dangling, "graph contains edges with missing endpoints");
        }

        self.session.graph = graph;
        self.session.loading = false;
        self.session.last_error = None;

        let selection_missing = self
            .session
            .selected_node_id
            .as_deref()
            .is_some_and(|id| self.service(id).is_none());
        if selection_missing {
            self.session.selected_node_id = None;
        }

        self.refresh_projection();
        self.refresh_search();
        info!(
            nodes = self.session.graph.nodes.len(),
            edges = self.session.graph.edges.len(),
            visible = self.session.projection.nodes.len(),
            "graph loaded"
        );
    }

    /// Record a failed graph fetch. The previous graph stays in place.
    pub fn fail_load(&mut self, error: Error) {
        warn!(error = %error, "graph load failed");
        self.session.loading = false;
        self.session.last_error = Some(error);
    }

    /// Drop all session state for a project switch. Preferences are kept.
    pub fn reset(&mut self) {
        self.session = SessionState::new(self.config.default_zoom);
        debug!("session state reset");
    }

    // ------------------------------------------------------------------
    // Zoom
    // ------------------------------------------------------------------

    /// Switch zoom level by ordinal. Out-of-range ordinals are rejected and
    /// leave the store untouched.
    pub fn set_zoom_level(&mut self, level: u8) -> Result<()> {
        let level = ZoomLevel::from_number(level)
            .map_err(|err| err.with_operation("store::set_zoom_level"))?;
        self.set_zoom(level);
        Ok(())
    }

    /// Switch zoom level. Drops any active filter and clears the selection,
    /// since the selected node may no longer be visible.
    pub fn set_zoom(&mut self, level: ZoomLevel) {
        self.session.zoom_level = level;
        self.session.filter = None;
        self.session.selected_node_id = None;
        self.refresh_projection();
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.session.zoom_level.next());
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.session.zoom_level.previous());
    }

    // ------------------------------------------------------------------
    // Search and selection
    // ------------------------------------------------------------------

    /// Search the canonical graph. Projection and selection are untouched.
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.session.search_query = query.into();
        self.refresh_search();
    }

    /// Select a node, or clear the selection with `None`. The id is not
    /// checked against the projection.
    pub fn set_selected_node(&mut self, id: Option<&str>) {
        self.session.selected_node_id = id.map(str::to_string);
    }

    // ------------------------------------------------------------------
    // Viewport and UI toggles
    // ------------------------------------------------------------------

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.prefs.viewport = viewport;
        self.save_preferences();
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.prefs.viewport.x += dx;
        self.prefs.viewport.y += dy;
        self.save_preferences();
    }

    /// Multiply the viewport scale by `factor`, clamped to the configured
    /// scale range.
    pub fn zoom_viewport_by(&mut self, factor: f64) {
        let scale = self.config.clamp_scale(self.prefs.viewport.scale * factor);
        self.prefs.viewport.scale = scale;
        self.save_preferences();
    }

    pub fn zoom_viewport_in(&mut self) {
        self.zoom_viewport_by(self.config.zoom_step);
    }

    pub fn zoom_viewport_out(&mut self) {
        self.zoom_viewport_by(1.0 / self.config.zoom_step);
    }

    /// Flip a layer's visibility. Returns whether it is now visible.
    pub fn toggle_layer(&mut self, name: &str) -> bool {
        let visible = self.prefs.toggle_layer(name);
        self.save_preferences();
        visible
    }

    pub fn toggle_minimap(&mut self) {
        self.prefs.show_minimap = !self.prefs.show_minimap;
        self.save_preferences();
    }

    pub fn toggle_legend(&mut self) {
        self.prefs.show_legend = !self.prefs.show_legend;
        self.save_preferences();
    }

    // ------------------------------------------------------------------
    // Filters
    // ------------------------------------------------------------------

    /// Show every canonical node of type `service_type`, bypassing the zoom
    /// predicate. Replaces any other active filter.
    pub fn filter_by_type(&mut self, service_type: &str) -> Result<()> {
        if service_type.trim().is_empty() {
            return Err(Error::invalid_filter("type", service_type)
                .with_operation("store::filter_by_type"));
        }
        self.apply_filter(ActiveFilter::Type(ServiceType::parse(service_type)));
        Ok(())
    }

    /// Show every canonical node with `status`, bypassing the zoom predicate.
    /// Replaces any other active filter.
    pub fn filter_by_status(&mut self, status: &str) -> Result<()> {
        if status.trim().is_empty() {
            return Err(Error::invalid_filter("status", status)
                .with_operation("store::filter_by_status"));
        }
        self.apply_filter(ActiveFilter::Status(ServiceStatus::parse(status)));
        Ok(())
    }

    /// Return to the zoom-level projection and clear the search.
    pub fn clear_filters(&mut self) {
        self.session.filter = None;
        self.refresh_projection();
        self.clear_search();
    }

    /// Restore the default viewport and clear selection and search. Zoom
    /// level and canonical graph are left alone.
    pub fn reset_view(&mut self) {
        self.prefs.viewport = Viewport::default();
        self.session.selected_node_id = None;
        self.clear_search();
        self.save_preferences();
    }

    // ------------------------------------------------------------------
    // Export
    // ------------------------------------------------------------------

    /// Serialize the current projection in the named format.
    pub fn export_graph(&self, format: &str) -> Result<String> {
        let format = ExportFormat::parse(format)
            .map_err(|err| err.with_operation("store::export_graph"))?;
        self.export_graph_as(format)
    }

    pub fn export_graph_as(&self, format: ExportFormat) -> Result<String> {
        if format.is_visual() {
            return Err(Error::not_implemented(format!("{format} export"))
                .with_operation("store::export_graph"));
        }
        self.export_document(Utc::now()).render(format)
    }

    /// Snapshot the current projection with metadata stamped `at`.
    pub fn export_document(&self, at: DateTime<Utc>) -> ExportDocument {
        ExportDocument::new(
            &self.session.projection,
            self.session.zoom_level,
            self.session.filter.clone(),
            at,
        )
    }

    // ------------------------------------------------------------------
    // Readers
    // ------------------------------------------------------------------

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn graph(&self) -> &ArchitectureGraph {
        &self.session.graph
    }

    pub fn zoom_level(&self) -> ZoomLevel {
        self.session.zoom_level
    }

    pub fn projection(&self) -> &Projection {
        &self.session.projection
    }

    pub fn filtered_services(&self) -> &[Service] {
        &self.session.projection.nodes
    }

    pub fn filtered_dependencies(&self) -> &[Dependency] {
        &self.session.projection.edges
    }

    pub fn active_filter(&self) -> Option<&ActiveFilter> {
        self.session.filter.as_ref()
    }

    pub fn selected_node_id(&self) -> Option<&str> {
        self.session.selected_node_id.as_deref()
    }

    /// The selected node, if it exists in the canonical graph.
    pub fn selected_service(&self) -> Option<&Service> {
        self.selected_node_id().and_then(|id| self.service(id))
    }

    pub fn search_query(&self) -> &str {
        &self.session.search_query
    }

    pub fn search_results(&self) -> &[SearchResult] {
        &self.session.search_results
    }

    pub fn viewport(&self) -> Viewport {
        self.prefs.viewport
    }

    pub fn preferences(&self) -> &ViewPreferences {
        &self.prefs
    }

    pub fn show_minimap(&self) -> bool {
        self.prefs.show_minimap
    }

    pub fn show_legend(&self) -> bool {
        self.prefs.show_legend
    }

    pub fn is_loading(&self) -> bool {
        self.session.loading
    }

    pub fn last_error(&self) -> Option<&Error> {
        self.session.last_error.as_ref()
    }

    // ------------------------------------------------------------------
    // Graph queries
    // ------------------------------------------------------------------

    /// Look up a canonical node by id.
    pub fn service(&self, id: &str) -> Option<&Service> {
        self.session.graph.nodes.iter().find(|n| n.id == id)
    }

    /// Resolved children of a node, in declared order. Dangling child ids are
    /// skipped.
    pub fn children_of(&self, id: &str) -> Vec<&Service> {
        self.service(id)
            .map(|parent| {
                parent
                    .children
                    .iter()
                    .filter_map(|child| self.service(child))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Canonical edges leaving `id`.
    pub fn dependencies_of(&self, id: &str) -> Vec<&Dependency> {
        self.session
            .graph
            .edges
            .iter()
            .filter(|e| e.source == id)
            .collect()
    }

    /// Canonical edges arriving at `id`.
    pub fn dependents_of(&self, id: &str) -> Vec<&Dependency> {
        self.session
            .graph
            .edges
            .iter()
            .filter(|e| e.target == id)
            .collect()
    }

    /// `id` plus its direct neighbours over the projected edges, in
    /// projection order. Empty if `id` is not projected.
    pub fn neighborhood(&self, id: &str) -> Vec<&str> {
        let projection = &self.session.projection;
        if !projection.contains_node(id) {
            return Vec::new();
        }
        let mut related: HashSet<&str> = HashSet::from([id]);
        for edge in &projection.edges {
            if edge.source == id {
                related.insert(edge.target.as_str());
            } else if edge.target == id {
                related.insert(edge.source.as_str());
            }
        }
        projection
            .nodes
            .iter()
            .map(|n| n.id.as_str())
            .filter(|node_id| related.contains(node_id))
            .collect()
    }

    pub fn stats(&self) -> GraphStats {
        let graph = &self.session.graph;
        let mut stats = GraphStats {
            node_count: graph.nodes.len(),
            edge_count: graph.edges.len(),
            visible_node_count: self.session.projection.nodes.len(),
            visible_edge_count: self.session.projection.edges.len(),
            ..GraphStats::default()
        };
        for node in &graph.nodes {
            *stats
                .by_type
                .entry(node.service_type.to_string())
                .or_insert(0) += 1;
            *stats.by_status.entry(node.status.to_string()).or_insert(0) += 1;
        }
        stats
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn apply_filter(&mut self, filter: ActiveFilter) {
        self.session.filter = Some(filter);
        self.refresh_projection();
    }

    /// Re-derive the projection from the active filter, or from the zoom
    /// level when no filter is active.
    fn refresh_projection(&mut self) {
        let graph = &self.session.graph;
        self.session.projection = match &self.session.filter {
            None => projector::project(&graph.nodes, &graph.edges, self.session.zoom_level),
            Some(ActiveFilter::Type(ty)) => projector::project_where(
                &graph.nodes,
                &graph.edges,
                |n| n.service_type.eq_ignore_case(ty),
                true,
            ),
            Some(ActiveFilter::Status(status)) => projector::project_where(
                &graph.nodes,
                &graph.edges,
                |n| n.status.eq_ignore_case(status),
                true,
            ),
        };
        debug!(
            zoom = self.session.zoom_level.as_number(),
            filter = ?self.session.filter,
            nodes = self.session.projection.nodes.len(),
            edges = self.session.projection.edges.len(),
            "projection derived"
        );
    }

    fn refresh_search(&mut self) {
        self.session.search_results =
            search::search(&self.session.search_query, &self.session.graph.nodes);
    }

    fn clear_search(&mut self) {
        self.session.search_query.clear();
        self.session.search_results.clear();
    }

    /// Best-effort write of the preference subset. Failures are logged, never
    /// surfaced, so UI toggles stay infallible.
    fn save_preferences(&mut self) {
        if let Some(persistence) = self.persistence.as_mut()
            && let Err(err) = persistence.save(&self.prefs)
        {
            warn!(error = %err, "failed to persist view preferences");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RelationshipKind;
    use crate::persist::{FileStorage, MemoryStorage};
    use archview_error::ErrorKind;
    use pretty_assertions::assert_eq;

    fn sample_graph() -> ArchitectureGraph {
        ArchitectureGraph::new(
            vec![
                Service::new("A", "Auth Service", ServiceType::Service)
                    .with_status(ServiceStatus::Healthy),
                Service::new("B", "Billing DB", ServiceType::Database)
                    .with_status(ServiceStatus::Degraded),
                Service::new("C", "Catalog", ServiceType::Service)
                    .with_child("D")
                    .with_status(ServiceStatus::Healthy),
            ],
            vec![Dependency::new("A", "B", RelationshipKind::ApiCall)],
        )
    }

    fn loaded() -> GraphStore {
        let mut store = GraphStore::new();
        store.set_graph(sample_graph());
        store
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = GraphStore::new();
        assert!(store.graph().is_empty());
        assert!(store.projection().is_empty());
        assert_eq!(store.zoom_level(), ZoomLevel::System);
        assert_eq!(store.selected_node_id(), None);
        assert!(!store.is_loading());
    }

    #[test]
    fn test_set_graph_projects_at_current_zoom() {
        let store = loaded();
        assert_eq!(store.projection().node_ids(), vec!["A", "B", "C"]);
        assert_eq!(store.projection().edge_pairs(), vec![("A", "B")]);
    }

    #[test]
    fn test_set_graph_clears_loading_and_error() {
        let mut store = GraphStore::new();
        store.begin_load();
        store.fail_load(Error::load_failed("503"));
        store.begin_load();
        assert!(store.is_loading());
        store.set_graph(sample_graph());
        assert!(!store.is_loading());
        assert!(store.last_error().is_none());
    }

    #[test]
    fn test_fail_load_retains_prior_graph() {
        let mut store = loaded();
        store.begin_load();
        store.fail_load(Error::load_failed("connection reset"));
        assert!(!store.is_loading());
        assert_eq!(store.last_error().map(|e| e.kind()), Some(ErrorKind::LoadFailed));
        assert_eq!(store.graph().nodes.len(), 3);
        assert_eq!(store.projection().nodes.len(), 3);
    }

    #[test]
    fn test_set_graph_drops_missing_selection() {
        let mut store = loaded();
        store.set_selected_node(Some("B"));
        store.set_graph(sample_graph());
        assert_eq!(store.selected_node_id(), Some("B"));

        let mut smaller = sample_graph();
        smaller.nodes.retain(|n| n.id != "B");
        store.set_graph(smaller);
        assert_eq!(store.selected_node_id(), None);
        assert!(store.projection().edges.is_empty());
    }

    #[test]
    fn test_set_graph_reruns_search() {
        let mut store = loaded();
        store.set_search_query("billing");
        assert_eq!(store.search_results().len(), 1);

        let mut smaller = sample_graph();
        smaller.nodes.retain(|n| n.id != "B");
        store.set_graph(smaller);
        assert_eq!(store.search_query(), "billing");
        assert!(store.search_results().is_empty());
    }

    #[test]
    fn test_zoom_clears_selection_but_not_search_or_viewport() {
        let mut store = loaded();
        store.set_selected_node(Some("A"));
        store.set_search_query("auth");
        store.set_viewport(Viewport::new(5.0, 6.0, 1.5));

        store.set_zoom_level(3).unwrap();
        assert_eq!(store.zoom_level(), ZoomLevel::Service);
        assert_eq!(store.projection().node_ids(), vec!["C"]);
        assert_eq!(store.selected_node_id(), None);
        assert_eq!(store.search_query(), "auth");
        assert_eq!(store.search_results().len(), 1);
        assert_eq!(store.viewport(), Viewport::new(5.0, 6.0, 1.5));
    }

    #[test]
    fn test_invalid_zoom_leaves_state_unchanged() {
        let mut store = loaded();
        store.set_selected_node(Some("A"));
        let before = store.projection().clone();

        for bad in [0u8, 5, 255] {
            let err = store.set_zoom_level(bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::UnknownZoomLevel);
            assert_eq!(err.operation(), "store::set_zoom_level");
        }
        assert_eq!(store.zoom_level(), ZoomLevel::System);
        assert_eq!(store.projection(), &before);
        assert_eq!(store.selected_node_id(), Some("A"));
    }

    #[test]
    fn test_zoom_is_idempotent() {
        let mut store = loaded();
        store.set_zoom_level(1).unwrap();
        let first = store.projection().clone();
        store.set_selected_node(Some("A"));
        store.set_zoom_level(1).unwrap();
        assert_eq!(store.projection(), &first);
        assert_eq!(store.selected_node_id(), None);
    }

    #[test]
    fn test_zoom_in_and_out_saturate() {
        let mut store = loaded();
        store.zoom_out();
        store.zoom_out();
        assert_eq!(store.zoom_level(), ZoomLevel::Enterprise);
        for _ in 0..5 {
            store.zoom_in();
        }
        assert_eq!(store.zoom_level(), ZoomLevel::Component);
        assert!(store.projection().edges.is_empty());
    }

    #[test]
    fn test_search_uses_canonical_graph() {
        let mut store = loaded();
        store.set_zoom_level(3).unwrap();
        store.set_selected_node(Some("C"));
        store.set_search_query("auth");
        assert_eq!(store.search_results()[0].node_id, "A");
        assert_eq!(store.projection().node_ids(), vec!["C"]);
        assert_eq!(store.selected_node_id(), Some("C"));
    }

    #[test]
    fn test_selection_is_not_validated() {
        let mut store = GraphStore::new();
        store.set_selected_node(Some("not-loaded-yet"));
        assert_eq!(store.selected_node_id(), Some("not-loaded-yet"));
        assert!(store.selected_service().is_none());
        store.set_selected_node(None);
        assert_eq!(store.selected_node_id(), None);
    }

    #[test]
    fn test_filters_override_each_other_and_zoom() {
        let mut store = loaded();
        store.set_zoom_level(3).unwrap();

        store.filter_by_type("service").unwrap();
        assert_eq!(store.projection().node_ids(), vec!["A", "C"]);
        assert!(store.projection().edges.is_empty());

        store.filter_by_status("Degraded").unwrap();
        assert_eq!(store.projection().node_ids(), vec!["B"]);
        assert_eq!(
            store.active_filter(),
            Some(&ActiveFilter::Status(ServiceStatus::Degraded))
        );

        store.filter_by_status("healthy").unwrap();
        assert_eq!(store.projection().node_ids(), vec!["A", "C"]);
    }

    #[test]
    fn test_filter_keeps_edges_between_survivors() {
        let mut graph = sample_graph();
        graph
            .edges
            .push(Dependency::new("A", "C", RelationshipKind::EventStream));
        let mut store = GraphStore::new();
        store.set_graph(graph);
        store.filter_by_status("healthy").unwrap();
        assert_eq!(store.projection().edge_pairs(), vec![("A", "C")]);
    }

    #[test]
    fn test_blank_filter_is_rejected() {
        let mut store = loaded();
        store.filter_by_type("database").unwrap();
        let err = store.filter_by_type("   ").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidFilter);
        let err = store.filter_by_status("").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidFilter);
        assert_eq!(store.projection().node_ids(), vec!["B"]);
    }

    #[test]
    fn test_clear_filters_restores_zoom_view_and_clears_search() {
        let mut store = loaded();
        store.set_zoom_level(1).unwrap();
        store.set_search_query("catalog");
        store.filter_by_type("database").unwrap();
        store.clear_filters();
        assert_eq!(store.active_filter(), None);
        assert_eq!(store.projection().node_ids(), vec!["A", "C"]);
        assert_eq!(store.search_query(), "");
        assert!(store.search_results().is_empty());
    }

    #[test]
    fn test_zoom_change_drops_filter() {
        let mut store = loaded();
        store.filter_by_type("database").unwrap();
        store.set_zoom_level(2).unwrap();
        assert_eq!(store.active_filter(), None);
        assert_eq!(store.projection().nodes.len(), 3);
    }

    #[test]
    fn test_new_graph_reapplies_filter() {
        let mut store = loaded();
        store.filter_by_type("database").unwrap();
        let mut graph = sample_graph();
        graph
            .nodes
            .push(Service::new("E", "Events DB", ServiceType::Database));
        store.set_graph(graph);
        assert_eq!(store.projection().node_ids(), vec!["B", "E"]);
    }

    #[test]
    fn test_reset_view() {
        let mut store = loaded();
        store.set_zoom_level(1).unwrap();
        store.set_viewport(Viewport::new(40.0, -2.0, 3.0));
        store.set_selected_node(Some("A"));
        store.set_search_query("auth");
        store.reset_view();

        assert_eq!(store.viewport(), Viewport::default());
        assert_eq!(store.selected_node_id(), None);
        assert_eq!(store.search_query(), "");
        assert_eq!(store.zoom_level(), ZoomLevel::Enterprise);
        assert_eq!(store.graph().nodes.len(), 3);
    }

    #[test]
    fn test_toggles() {
        let mut store = GraphStore::new();
        assert!(store.show_minimap());
        store.toggle_minimap();
        assert!(!store.show_minimap());
        store.toggle_legend();
        assert!(!store.show_legend());
        assert!(!store.toggle_layer("dependencies"));
        assert!(!store.preferences().visible_layers.contains("dependencies"));
    }

    #[test]
    fn test_viewport_helpers_clamp_scale() {
        let mut store = GraphStore::with_config(ViewConfig::default().with_scale_range(0.5, 2.0));
        store.pan_by(10.0, -4.0);
        assert_eq!(store.viewport().x, 10.0);
        assert_eq!(store.viewport().y, -4.0);
        store.zoom_viewport_by(100.0);
        assert_eq!(store.viewport().scale, 2.0);
        store.zoom_viewport_by(0.0001);
        assert_eq!(store.viewport().scale, 0.5);

        // set_viewport is plain assignment, no clamping
        store.set_viewport(Viewport::new(0.0, 0.0, 50.0));
        assert_eq!(store.viewport().scale, 50.0);
    }

    #[test]
    fn test_filter_matches_custom_type_in_any_case() {
        let mut store = GraphStore::new();
        store.set_graph(ArchitectureGraph::new(
            vec![
                Service::new("f", "Resize", ServiceType::parse("EdgeFunction")),
                Service::new("a", "API", ServiceType::Service),
            ],
            vec![],
        ));
        store.filter_by_type("edgefunction").unwrap();
        assert_eq!(store.projection().node_ids(), vec!["f"]);

        let json = store.export_graph("json").unwrap();
        assert!(json.contains(r#""type": "EdgeFunction""#));
    }

    #[test]
    fn test_zoom_viewport_with_reversed_scale_range() {
        let mut store = GraphStore::with_config(ViewConfig::default().with_scale_range(2.0, 0.5));
        store.zoom_viewport_by(1.5);
        assert_eq!(store.viewport().scale, 1.5);
        store.zoom_viewport_by(10.0);
        assert_eq!(store.viewport().scale, 2.0);
        store.zoom_viewport_out();
        assert!(store.viewport().scale < 2.0);
    }

    #[test]
    fn test_non_finite_viewport_keeps_last_saved_preferences() {
        let dir = tempfile::tempdir().unwrap();
        let adapter = || PersistenceAdapter::new(FileStorage::new(dir.path()), "view");

        let mut store = GraphStore::restore(ViewConfig::default(), adapter());
        store.toggle_legend();
        store.set_viewport(Viewport::new(4.0, 3.0, 2.0));
        store.set_viewport(Viewport::new(f64::INFINITY, 3.0, 2.0));
        // The in-memory assignment itself is untouched.
        assert_eq!(store.viewport().x, f64::INFINITY);

        let reloaded = GraphStore::restore(ViewConfig::default(), adapter());
        assert_eq!(reloaded.viewport(), Viewport::new(4.0, 3.0, 2.0));
        assert!(!reloaded.show_legend());
    }

    #[test]
    fn test_export_errors() {
        let store = loaded();
        let err = store.export_graph("pdf").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownExportFormat);
        let err = store.export_graph("svg").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotImplemented);
        let err = store.export_graph("png").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotImplemented);
    }

    #[test]
    fn test_export_uses_projection() {
        let mut store = loaded();
        store.set_zoom_level(1).unwrap();
        let json = store.export_graph("json").unwrap();
        let doc = ExportDocument::from_json(&json).unwrap();
        assert_eq!(doc.metadata.zoom_level, ZoomLevel::Enterprise);
        assert_eq!(doc.metadata.node_count, 2);
        assert_eq!(doc.metadata.edge_count, 0);
        assert_eq!(doc.nodes.len(), 2);
    }

    #[test]
    fn test_graph_queries() {
        let mut graph = sample_graph();
        graph.nodes.push(Service::new("D", "Catalog Worker", ServiceType::Component));
        graph.nodes[2].children.push("ghost".to_string());
        graph
            .edges
            .push(Dependency::new("C", "A", RelationshipKind::ApiCall));
        let mut store = GraphStore::new();
        store.set_graph(graph);

        let children: Vec<&str> = store.children_of("C").iter().map(|s| s.id.as_str()).collect();
        assert_eq!(children, vec!["D"]);
        assert!(store.children_of("missing").is_empty());
        assert_eq!(store.dependencies_of("A").len(), 1);
        assert_eq!(store.dependents_of("A").len(), 1);
        assert_eq!(store.neighborhood("A"), vec!["A", "B", "C"]);
        assert_eq!(store.neighborhood("D"), vec!["D"]);
        assert!(store.neighborhood("ghost").is_empty());
    }

    #[test]
    fn test_stats() {
        let mut store = loaded();
        store.set_zoom_level(1).unwrap();
        let stats = store.stats();
        assert_eq!(stats.node_count, 3);
        assert_eq!(stats.edge_count, 1);
        assert_eq!(stats.visible_node_count, 2);
        assert_eq!(stats.visible_edge_count, 0);
        assert_eq!(stats.by_type.get("service"), Some(&2));
        assert_eq!(stats.by_status.get("degraded"), Some(&1));
    }

    #[test]
    fn test_reset_keeps_preferences() {
        let mut store = loaded();
        store.toggle_legend();
        store.set_zoom_level(4).unwrap();
        store.reset();
        assert!(store.graph().is_empty());
        assert_eq!(store.zoom_level(), ZoomLevel::System);
        assert!(!store.show_legend());
    }

    #[test]
    fn test_restore_from_persistence() {
        let mut adapter = PersistenceAdapter::new(MemoryStorage::new(), "view");
        let mut prefs = ViewPreferences::default();
        prefs.show_minimap = false;
        prefs.viewport = Viewport::new(1.0, 2.0, 0.5);
        adapter.save(&prefs).unwrap();

        let store = GraphStore::restore(ViewConfig::default(), adapter);
        assert!(!store.show_minimap());
        assert_eq!(store.viewport(), Viewport::new(1.0, 2.0, 0.5));
        assert!(store.graph().is_empty());
    }
}
