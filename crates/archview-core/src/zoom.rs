//! Zoom levels for multi-resolution architecture views.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use archview_error::{Error, Result};

use crate::model::{Service, ServiceType};

/// Detail tier controlling which nodes and edges are visible.
///
/// Levels are ordered from coarse to fine:
/// - Enterprise (1): entry points only (services and gateways)
/// - System (2): every node with its dependencies (default)
/// - Service (3): nodes that decompose into children
/// - Component (4): every node, dependency edges hidden
///
/// Ordinal order is the only relation between levels; they do not compose.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum ZoomLevel {
    Enterprise,
    #[default]
    System,
    Service,
    Component,
}

impl ZoomLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 4;

    pub const ALL: [ZoomLevel; 4] = [
        ZoomLevel::Enterprise,
        ZoomLevel::System,
        ZoomLevel::Service,
        ZoomLevel::Component,
    ];

    /// Convert from an ordinal. Values outside `1..=4` are rejected.
    pub fn from_number(n: u8) -> Result<Self> {
        match n {
            1 => Ok(Self::Enterprise),
            2 => Ok(Self::System),
            3 => Ok(Self::Service),
            4 => Ok(Self::Component),
            _ => Err(Error::unknown_zoom_level(n.to_string())
                .with_context("min", Self::MIN.to_string())
                .with_context("max", Self::MAX.to_string())),
        }
    }

    pub fn as_number(&self) -> u8 {
        match self {
            Self::Enterprise => 1,
            Self::System => 2,
            Self::Service => 3,
            Self::Component => 4,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Enterprise => "Enterprise",
            Self::System => "System",
            Self::Service => "Service",
            Self::Component => "Component",
        }
    }

    /// Static node predicate for this level.
    pub fn keeps(&self, node: &Service) -> bool {
        match self {
            Self::Enterprise => matches!(
                node.service_type,
                ServiceType::Service | ServiceType::Gateway
            ),
            Self::System | Self::Component => true,
            Self::Service => node.has_children(),
        }
    }

    /// Whether dependency edges are projected at this level.
    pub fn shows_dependencies(&self) -> bool {
        !matches!(self, Self::Component)
    }

    /// One step finer, saturating at Component.
    pub fn next(&self) -> Self {
        Self::from_number(self.as_number() + 1).unwrap_or(*self)
    }

    /// One step coarser, saturating at Enterprise.
    pub fn previous(&self) -> Self {
        Self::from_number(self.as_number().saturating_sub(1)).unwrap_or(*self)
    }
}

impl TryFrom<u8> for ZoomLevel {
    type Error = Error;

    fn try_from(n: u8) -> Result<Self> {
        Self::from_number(n)
    }
}

impl From<ZoomLevel> for u8 {
    fn from(level: ZoomLevel) -> Self {
        level.as_number()
    }
}

impl FromStr for ZoomLevel {
    type Err = Error;

    /// Accepts either the ordinal (`"3"`) or the level name (`"service"`).
    fn from_str(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if let Ok(n) = trimmed.parse::<u8>() {
            return Self::from_number(n);
        }
        Self::ALL
            .into_iter()
            .find(|level| level.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| Error::unknown_zoom_level(trimmed))
    }
}

impl fmt::Display for ZoomLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.as_number())
    }
}
