//! Graph view engine for multi-resolution architecture diagrams.
//!
//! The engine decides what is shown, searched and exported; drawing is left
//! to the rendering layer.
//!
//! # Module Structure
//!
//! - [`model`]: services, dependencies and the canonical graph
//! - [`zoom`]: the four zoom levels and their node predicates
//! - [`projector`]: pure zoom/filter projection of the canonical graph
//! - [`search`]: weighted free-text search
//! - [`store`]: the stateful [`GraphStore`]
//! - [`persist`]: preference persistence over a key/value store
//! - [`export`]: portable export documents
//! - [`config`]: TOML-backed view configuration

pub mod config;
pub mod export;
pub mod model;
pub mod persist;
pub mod projector;
pub mod search;
pub mod store;
pub mod zoom;

pub use archview_error::{Error, ErrorKind, ErrorStatus, Result};

pub use config::ViewConfig;
pub use export::{ExportDocument, ExportFormat, ExportMetadata};
pub use model::{
    ArchitectureGraph, Dependency, RelationshipKind, Service, ServiceStatus, ServiceType,
};
pub use persist::{FileStorage, KeyValueStore, MemoryStorage, PersistenceAdapter};
pub use projector::{Projection, project, project_where};
pub use search::{MatchField, SearchResult, search};
pub use store::{
    ActiveFilter, GraphStats, GraphStore, GraphView, SharedGraphStore, ViewPreferences, Viewport,
};
pub use zoom::ZoomLevel;
