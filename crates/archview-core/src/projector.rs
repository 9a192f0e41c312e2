//! Projection of the canonical graph into the visible node and edge sets.
//!
//! Every function here is pure: identical inputs give identical,
//! order-preserving output. The store calls them again after each mutation
//! instead of caching across unrelated changes.

use std::collections::HashSet;

use serde::Serialize;

use crate::model::{Dependency, Service};
use crate::zoom::ZoomLevel;

/// The visible subset of the canonical graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Projection {
    pub nodes: Vec<Service>,
    pub edges: Vec<Dependency>,
}

impl Projection {
    pub fn node_ids(&self) -> Vec<&str> {
        self.nodes.iter().map(|n| n.id.as_str()).collect()
    }

    /// `(source, target)` pairs in projection order.
    pub fn edge_pairs(&self) -> Vec<(&str, &str)> {
        self.edges
            .iter()
            .map(|e| (e.source.as_str(), e.target.as_str()))
            .collect()
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Project the canonical graph at a zoom level.
pub fn project(nodes: &[Service], edges: &[Dependency], level: ZoomLevel) -> Projection {
    project_where(nodes, edges, |node| level.keeps(node), level.shows_dependencies())
}

/// Project with an arbitrary node predicate.
///
/// Nodes keep their canonical order. Edges are kept only when both endpoints
/// survive, so an edge never pulls a filtered node back in. With
/// `show_edges == false` no edges are returned at all.
pub fn project_where<F>(
    nodes: &[Service],
    edges: &[Dependency],
    keep: F,
    show_edges: bool,
) -> Projection
where
    F: Fn(&Service) -> bool,
{
    let visible: Vec<Service> = nodes.iter().filter(|n| keep(n)).cloned().collect();
    let edges = if show_edges {
        project_edges(&visible, edges)
    } else {
        Vec::new()
    };
    Projection {
        nodes: visible,
        edges,
    }
}

/// Edges whose source and target are both in `visible`, in canonical order.
pub fn project_edges(visible: &[Service], edges: &[Dependency]) -> Vec<Dependency> {
    let ids: HashSet<&str> = visible.iter().map(|n| n.id.as_str()).collect();
    edges.iter().filter(|e| e.connects(&ids)).cloned().collect()
}
