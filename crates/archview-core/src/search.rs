//! Free-text search over the canonical node set.

use serde::Serialize;
use strum_macros::{Display, IntoStaticStr};
use tracing::debug;

use crate::model::Service;

/// Node field a query matched, listed in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, IntoStaticStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MatchField {
    Name,
    Technology,
    Type,
    Description,
}

impl MatchField {
    pub const PRIORITY: [MatchField; 4] = [
        MatchField::Name,
        MatchField::Technology,
        MatchField::Type,
        MatchField::Description,
    ];

    pub fn weight(&self) -> u32 {
        match self {
            MatchField::Name => 10,
            MatchField::Technology => 8,
            MatchField::Type => 6,
            MatchField::Description => 4,
        }
    }

    fn value<'a>(&self, node: &'a Service) -> Option<&'a str> {
        match self {
            MatchField::Name => Some(node.name.as_str()),
            MatchField::Technology => Some(node.technology.as_str()),
            MatchField::Type => Some(node.service_type.as_str()),
            MatchField::Description => node.description.as_deref(),
        }
    }
}

/// A scored match against one canonical node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub node_id: String,
    /// Position of the node in the canonical node list.
    pub node_index: usize,
    /// Last field in priority order that matched. This is NOT necessarily
    /// the highest-weighted match; existing consumers depend on it.
    pub match_type: MatchField,
    pub score: u32,
}

impl SearchResult {
    /// Resolve the matched node, if `nodes` is the list that was searched.
    pub fn service<'a>(&self, nodes: &'a [Service]) -> Option<&'a Service> {
        nodes.get(self.node_index).filter(|n| n.id == self.node_id)
    }
}

/// Score every node against `query`.
///
/// Matching is case-insensitive substring containment checked against name,
/// technology, type and description. The score is the sum of the weights of
/// all matching fields. An empty query matches nothing. Results are ordered
/// by descending score; `sort_by` is stable, so ties keep canonical order.
pub fn search(query: &str, nodes: &[Service]) -> Vec<SearchResult> {
    if query.is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();

    let mut results: Vec<SearchResult> = nodes
        .iter()
        .enumerate()
        .filter_map(|(index, node)| score_node(&needle, node).map(|(match_type, score)| {
            SearchResult {
                node_id: node.id.clone(),
                node_index: index,
                match_type,
                score,
            }
        }))
        .collect();

    results.sort_by(|a, b| b.score.cmp(&a.score));
    debug!(query, matches = results.len(), "search results derived");
    results
}

/// Returns `(match_type, score)` for a node, or `None` if nothing matched.
fn score_node(needle: &str, node: &Service) -> Option<(MatchField, u32)> {
    let mut matched = None;
    let mut score = 0;
    for field in MatchField::PRIORITY {
        let hit = field
            .value(node)
            .is_some_and(|value| value.to_lowercase().contains(needle));
        if hit {
            score += field.weight();
            matched = Some(field);
        }
    }
    matched.map(|field| (field, score))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ServiceType;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_query_matches_nothing() {
        let nodes = vec![Service::new("a", "Anything", ServiceType::Service)];
        assert!(search("", &nodes).is_empty());
    }

    #[test]
    fn test_score_sums_all_matching_fields() {
        let nodes = vec![
            Service::new("auth", "Auth Service", ServiceType::Service),
            Service::new("cache", "Cache", ServiceType::Component),
        ];
        let results = search("serv", &nodes);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].node_id, "auth");
        assert_eq!(results[0].score, 16);
    }

    #[test]
    fn test_match_type_is_last_matching_field() {
        let nodes = vec![
            Service::new("pg", "Postgres Primary", ServiceType::Database)
                .with_technology("postgres")
                .with_description("postgres cluster for orders"),
        ];
        let results = search("POSTGRES", &nodes);
        assert_eq!(results[0].score, 10 + 8 + 4);
        // Name carries the largest weight, but description was checked last.
        assert_eq!(results[0].match_type, MatchField::Description);
    }

    #[test]
    fn test_ties_keep_canonical_order() {
        let nodes = vec![
            Service::new("z", "Zeta api", ServiceType::Service),
            Service::new("m", "Mid", ServiceType::Service).with_technology("grpc api"),
            Service::new("a", "Alpha api", ServiceType::Service),
        ];
        let results = search("api", &nodes);
        let ids: Vec<&str> = results.iter().map(|r| r.node_id.as_str()).collect();
        assert_eq!(ids, vec!["z", "a", "m"]);
        assert_eq!(results[0].score, results[1].score);
    }

    #[test]
    fn test_no_zero_scores_and_resolve() {
        let nodes = vec![
            Service::new("gw", "Edge", ServiceType::Gateway).with_technology("Envoy"),
            Service::new("db", "Store", ServiceType::Database),
        ];
        let results = search("e", &nodes);
        assert!(results.iter().all(|r| r.score > 0));
        let first = &results[0];
        assert_eq!(first.service(&nodes).map(|s| s.name.as_str()), Some("Edge"));
    }

    #[test]
    fn test_missing_description_is_skipped() {
        let nodes = vec![Service::new("x", "X", ServiceType::Service)];
        assert!(search("payments", &nodes).is_empty());
    }
}
