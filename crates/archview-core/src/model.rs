//! Architecture graph data model: services, dependencies and the canonical graph.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString, IntoStaticStr};

use archview_error::{Error, Result};

/// The kind of a service node.
///
/// The set is open: any type name the loader sends that is not one of the
/// well-known kinds is kept verbatim in [`ServiceType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ServiceType {
    Service,
    Gateway,
    Database,
    Component,
    Queue,
    Cache,
    External,
    Other(String),
}

impl ServiceType {
    pub fn as_str(&self) -> &str {
        match self {
            ServiceType::Service => "service",
            ServiceType::Gateway => "gateway",
            ServiceType::Database => "database",
            ServiceType::Component => "component",
            ServiceType::Queue => "queue",
            ServiceType::Cache => "cache",
            ServiceType::External => "external",
            ServiceType::Other(name) => name,
        }
    }

    /// Parse a type name. Matching is case-insensitive and ignores
    /// surrounding whitespace; unknown names become `Other` with their
    /// original spelling.
    pub fn parse(raw: &str) -> Self {
        let name = raw.trim();
        match name.to_ascii_lowercase().as_str() {
            "service" => ServiceType::Service,
            "gateway" => ServiceType::Gateway,
            "database" => ServiceType::Database,
            "component" => ServiceType::Component,
            "queue" => ServiceType::Queue,
            "cache" => ServiceType::Cache,
            "external" => ServiceType::External,
            _ => ServiceType::Other(name.to_string()),
        }
    }

    /// Case-insensitive comparison, so `Other("EdgeFunction")` matches a
    /// filter for `edgefunction`.
    pub fn eq_ignore_case(&self, other: &ServiceType) -> bool {
        self.as_str().eq_ignore_ascii_case(other.as_str())
    }
}

impl From<String> for ServiceType {
    fn from(raw: String) -> Self {
        ServiceType::parse(&raw)
    }
}

impl From<ServiceType> for String {
    fn from(ty: ServiceType) -> Self {
        ty.as_str().to_string()
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Health status reported for a service. Open set, like [`ServiceType`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ServiceStatus {
    Healthy,
    Degraded,
    Unhealthy,
    #[default]
    Unknown,
    Other(String),
}

impl ServiceStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ServiceStatus::Healthy => "healthy",
            ServiceStatus::Degraded => "degraded",
            ServiceStatus::Unhealthy => "unhealthy",
            ServiceStatus::Unknown => "unknown",
            ServiceStatus::Other(name) => name,
        }
    }

    pub fn parse(raw: &str) -> Self {
        let name = raw.trim();
        match name.to_ascii_lowercase().as_str() {
            "healthy" => ServiceStatus::Healthy,
            "degraded" => ServiceStatus::Degraded,
            "unhealthy" => ServiceStatus::Unhealthy,
            "unknown" => ServiceStatus::Unknown,
            _ => ServiceStatus::Other(name.to_string()),
        }
    }

    pub fn eq_ignore_case(&self, other: &ServiceStatus) -> bool {
        self.as_str().eq_ignore_ascii_case(other.as_str())
    }
}

impl From<String> for ServiceStatus {
    fn from(raw: String) -> Self {
        ServiceStatus::parse(&raw)
    }
}

impl From<ServiceStatus> for String {
    fn from(status: ServiceStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Relationship carried by a dependency edge.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum RelationshipKind {
    ApiCall,
    DatabaseCall,
    MessageQueue,
    EventStream,
}

impl RelationshipKind {
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }
}

/// A service node in the architecture graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    /// Unique, stable identifier. Edges and child lists refer to nodes by id.
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub service_type: ServiceType,
    #[serde(default)]
    pub technology: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Ordered child node ids for hierarchical decomposition. Ids that do not
    /// resolve to a node are dangling and ignored by lookups.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<String>,
    #[serde(default)]
    pub status: ServiceStatus,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub endpoints: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
}

impl Service {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        service_type: ServiceType,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            service_type,
            technology: String::new(),
            description: None,
            children: Vec::new(),
            status: ServiceStatus::default(),
            endpoints: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    pub fn with_technology(mut self, technology: impl Into<String>) -> Self {
        self.technology = technology.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_child(mut self, child_id: impl Into<String>) -> Self {
        self.children.push(child_id.into());
        self
    }

    pub fn with_status(mut self, status: ServiceStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoints.push(endpoint.into());
        self
    }

    /// True when the node lists at least one child reference, resolved or not.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// A directed dependency between two services.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependency {
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub kind: RelationshipKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Dependency {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        kind: RelationshipKind,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            kind,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Both endpoints are members of `ids`.
    pub fn connects(&self, ids: &HashSet<&str>) -> bool {
        ids.contains(self.source.as_str()) && ids.contains(self.target.as_str())
    }
}

/// The canonical graph as delivered by a loader: `{ "nodes": [...], "edges": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArchitectureGraph {
    #[serde(default)]
    pub nodes: Vec<Service>,
    #[serde(default)]
    pub edges: Vec<Dependency>,
}

impl ArchitectureGraph {
    pub fn new(nodes: Vec<Service>, edges: Vec<Dependency>) -> Self {
        Self { nodes, edges }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Parse a loader payload. Unknown top-level fields (such as export
    /// metadata) are ignored, so an export document re-imports directly.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|err| {
            Error::deserialization_failed(format!("invalid architecture graph: {err}"))
                .with_operation("model::from_json")
                .set_source(err)
        })
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|err| {
            Error::serialization_failed(err.to_string())
                .with_operation("model::to_json")
                .set_source(err)
        })
    }

    /// Ids that appear more than once in the node list.
    pub fn duplicate_ids(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for node in &self.nodes {
            if !seen.insert(node.id.as_str()) && !duplicates.contains(&node.id.as_str()) {
                duplicates.push(node.id.as_str());
            }
        }
        duplicates
    }

    /// Edges with at least one endpoint missing from the node set.
    pub fn dangling_edges(&self) -> impl Iterator<Item = &Dependency> {
        let ids: HashSet<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();
        self.edges.iter().filter(move |edge| !edge.connects(&ids))
    }
}
