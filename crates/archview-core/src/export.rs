//! Export of the current projection as a portable, re-importable document.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString, IntoStaticStr};
use tracing::info;

use archview_error::{Error, Result};

use crate::model::{ArchitectureGraph, Dependency, Service};
use crate::projector::Projection;
use crate::store::ActiveFilter;
use crate::zoom::ZoomLevel;

/// Known export formats. Only `Json` is produced here; the visual formats
/// belong to the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ExportFormat {
    Json,
    Png,
    Svg,
}

impl ExportFormat {
    /// Parse a format name, rejecting anything outside the enumeration.
    pub fn parse(raw: &str) -> Result<Self> {
        raw.trim()
            .parse::<ExportFormat>()
            .map_err(|_: strum::ParseError| Error::unknown_export_format(raw.trim()))
    }

    pub fn is_visual(&self) -> bool {
        matches!(self, ExportFormat::Png | ExportFormat::Svg)
    }
}

/// Metadata describing the exported view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetadata {
    /// RFC 3339 / ISO-8601 UTC timestamp.
    #[serde(with = "iso8601")]
    pub exported_at: DateTime<Utc>,
    pub zoom_level: ZoomLevel,
    pub zoom_label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<ActiveFilter>,
    pub node_count: usize,
    pub edge_count: usize,
}

/// Exported projection. Field order is fixed by declaration order.
///
/// The `nodes`/`edges` fields use the loader's shape, so the JSON can be
/// fed straight back through [`ArchitectureGraph::from_json`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub metadata: ExportMetadata,
    pub nodes: Vec<Service>,
    pub edges: Vec<Dependency>,
}

impl ExportDocument {
    pub fn new(
        projection: &Projection,
        zoom_level: ZoomLevel,
        filter: Option<ActiveFilter>,
        exported_at: DateTime<Utc>,
    ) -> Self {
        Self {
            metadata: ExportMetadata {
                exported_at,
                zoom_level,
                zoom_label: zoom_level.label().to_string(),
                filter,
                node_count: projection.nodes.len(),
                edge_count: projection.edges.len(),
            },
            nodes: projection.nodes.clone(),
            edges: projection.edges.clone(),
        }
    }

    /// Serialize in `format`. Visual formats report `NotImplemented`.
    pub fn render(&self, format: ExportFormat) -> Result<String> {
        match format {
            ExportFormat::Json => self.to_json(),
            visual => Err(Error::not_implemented(format!("{visual} export"))
                .with_operation("export::render")
                .with_context("format", visual.to_string())),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        let json = serde_json::to_string_pretty(self).map_err(|err| {
            Error::serialization_failed(err.to_string())
                .with_operation("export::to_json")
                .set_source(err)
        })?;
        info!(
            nodes = self.metadata.node_count,
            edges = self.metadata.edge_count,
            zoom = self.metadata.zoom_level.as_number(),
            "projection exported"
        );
        Ok(json)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|err| {
            Error::deserialization_failed(format!("invalid export document: {err}"))
                .with_operation("export::from_json")
                .set_source(err)
        })
    }

    /// Re-ingest the exported projection as a canonical graph.
    pub fn into_graph(self) -> ArchitectureGraph {
        ArchitectureGraph::new(self.nodes, self.edges)
    }
}

mod iso8601 {
    use super::*;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        at: &DateTime<Utc>,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|at| at.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
