//! Plain-text summary of a graph view.

use std::fmt::Write;

use archview_core::{GraphStore, GraphView};

/// Render the current projection, search hits and selection as text.
pub fn render_summary(store: &GraphStore) -> String {
    let mut out = String::new();
    let stats = store.stats();

    let _ = writeln!(out, "zoom: {}", store.zoom_level());
    if let Some(filter) = store.active_filter() {
        let _ = writeln!(out, "filter: {}={}", filter.field(), filter.value());
    }
    let _ = writeln!(
        out,
        "nodes: {} of {}",
        stats.visible_node_count, stats.node_count
    );
    let _ = writeln!(
        out,
        "edges: {} of {}",
        stats.visible_edge_count, stats.edge_count
    );

    let highlighted = store
        .selected_node_id()
        .map(|id| store.neighborhood(id))
        .unwrap_or_default();

    let _ = writeln!(out);
    let _ = writeln!(out, "services:");
    for node in store.filtered_services() {
        let marker = if store.selected_node_id() == Some(node.id.as_str()) {
            '*'
        } else if highlighted.contains(&node.id.as_str()) {
            '+'
        } else {
            ' '
        };
        let _ = writeln!(
            out,
            "{marker} {:<20} {:<24} {:<10} {}",
            node.id, node.name, node.service_type, node.status
        );
    }

    let edges = store.drawable_dependencies();
    if !edges.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "dependencies:");
        for edge in edges {
            let _ = writeln!(out, "  {} -> {} ({})", edge.source, edge.target, edge.kind);
        }
    }

    if !store.search_query().is_empty() {
        let results = store.search_results();
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "search {:?}: {} hit(s)",
            store.search_query(),
            results.len()
        );
        for result in results {
            let _ = writeln!(
                out,
                "  {:<20} score {:>2}  {}",
                result.node_id, result.score, result.match_type
            );
        }
    }

    if let Some(id) = store.selected_node_id() {
        let _ = writeln!(out);
        match store.selected_service() {
            Some(service) => {
                let _ = writeln!(out, "selected: {} ({})", service.id, service.name);
                let _ = writeln!(
                    out,
                    "  depends on: {}",
                    join_ids(store.dependencies_of(id).iter().map(|e| e.target.as_str()))
                );
                let _ = writeln!(
                    out,
                    "  used by:    {}",
                    join_ids(store.dependents_of(id).iter().map(|e| e.source.as_str()))
                );
                let _ = writeln!(
                    out,
                    "  children:   {}",
                    join_ids(store.children_of(id).iter().map(|c| c.id.as_str()))
                );
            }
            None => {
                let _ = writeln!(out, "selected: {id} (not in graph)");
            }
        }
    }

    let layers: Vec<&str> = store.visible_layers().iter().map(String::as_str).collect();
    let _ = writeln!(out);
    let _ = write!(out, "layers: {}", layers.join(", "));
    out
}

fn join_ids<'a>(ids: impl Iterator<Item = &'a str>) -> String {
    let ids: Vec<&str> = ids.collect();
    if ids.is_empty() {
        "-".to_string()
    } else {
        ids.join(", ")
    }
}
