use std::fs;
use std::path::{Path, PathBuf};

use archview::{ArchviewOptions, ViewOptions, run_main};
use archview_core::{ArchitectureGraph, ErrorKind, ExportDocument, ZoomLevel};
use pretty_assertions::assert_eq;

const GRAPH: &str = r#"{
  "nodes": [
    {"id": "gw", "name": "Public Gateway", "type": "gateway", "technology": "Kong", "children": [], "status": "healthy", "endpoints": ["/"], "dependencies": ["auth"]},
    {"id": "auth", "name": "Auth Service", "type": "service", "technology": "Rust", "children": ["auth-tokens"], "status": "healthy", "endpoints": ["/login"], "dependencies": ["users"]},
    {"id": "auth-tokens", "name": "Token Issuer", "type": "component", "technology": "jsonwebtoken", "children": [], "status": "healthy", "endpoints": [], "dependencies": []},
    {"id": "users", "name": "Users DB", "type": "database", "technology": "Postgres", "children": [], "status": "degraded", "endpoints": [], "dependencies": []}
  ],
  "edges": [
    {"source": "gw", "target": "auth", "type": "api-call"},
    {"source": "auth", "target": "users", "type": "database-call", "description": "user lookup"}
  ]
}"#;

fn write_graph(dir: &Path) -> PathBuf {
    let path = dir.join("graph.json");
    fs::write(&path, GRAPH).unwrap();
    path
}

#[test]
fn summary_is_the_default_output() {
    let dir = tempfile::tempdir().unwrap();
    let opts = ArchviewOptions::new(write_graph(dir.path()));

    let out = run_main(&opts).unwrap().unwrap();
    assert!(out.contains("zoom: System (2)"));
    assert!(out.contains("nodes: 4 of 4"));
    assert!(out.contains("auth -> users (database-call)"));
}

#[test]
fn json_export_reimports_to_the_same_view() {
    let dir = tempfile::tempdir().unwrap();
    let mut opts = ArchviewOptions::new(write_graph(dir.path()));
    opts.view = ViewOptions::new().with_zoom("enterprise");
    opts.export = Some("JSON".to_string());

    let exported = run_main(&opts).unwrap().unwrap();
    let doc = ExportDocument::from_json(&exported).unwrap();
    assert_eq!(doc.metadata.zoom_level, ZoomLevel::Enterprise);
    assert_eq!(doc.metadata.node_count, 2);
    assert_eq!(doc.metadata.edge_count, 1);

    // The export file is itself a valid input.
    let reexport_path = dir.path().join("export.json");
    fs::write(&reexport_path, &exported).unwrap();
    let graph = archview::load_graph(&reexport_path).unwrap();
    assert_eq!(graph, ArchitectureGraph::new(doc.nodes, doc.edges));

    let mut again = ArchviewOptions::new(reexport_path);
    again.view = ViewOptions::new().with_zoom("1");
    again.export = Some("json".to_string());
    let second = ExportDocument::from_json(&run_main(&again).unwrap().unwrap()).unwrap();
    assert_eq!(second.metadata.node_count, 2);
    assert_eq!(second.metadata.edge_count, 1);
}

#[test]
fn visual_export_is_not_implemented() {
    let dir = tempfile::tempdir().unwrap();
    let mut opts = ArchviewOptions::new(write_graph(dir.path()));
    opts.export = Some("svg".to_string());

    let err = run_main(&opts).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotImplemented);
}

#[test]
fn unknown_export_format_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut opts = ArchviewOptions::new(write_graph(dir.path()));
    opts.export = Some("pdf".to_string());

    let err = run_main(&opts).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownExportFormat);
}

#[test]
fn config_file_sets_default_zoom() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("archview.toml");
    fs::write(&config, "default_zoom = 3\nshow_minimap = false\n").unwrap();

    let mut opts = ArchviewOptions::new(write_graph(dir.path()));
    opts.config = Some(config);

    let out = run_main(&opts).unwrap().unwrap();
    assert!(out.contains("zoom: Service (3)"));
    assert!(out.contains("nodes: 1 of 4"));
}

#[test]
fn invalid_config_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("archview.toml");
    fs::write(&config, "default_zoom = 9\n").unwrap();

    let mut opts = ArchviewOptions::new(write_graph(dir.path()));
    opts.config = Some(config);

    let err = run_main(&opts).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
}

#[test]
fn malformed_graph_is_a_deserialization_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("graph.json");
    fs::write(&path, "{\"nodes\": 3}").unwrap();

    let err = run_main(&ArchviewOptions::new(path)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DeserializationFailed);
}

#[test]
fn search_by_status_filter() {
    let dir = tempfile::tempdir().unwrap();
    let mut opts = ArchviewOptions::new(write_graph(dir.path()));
    opts.view = ViewOptions::new()
        .with_filter_status("degraded")
        .with_search("auth");

    let out = run_main(&opts).unwrap().unwrap();
    assert!(out.contains("filter: status=degraded"));
    assert!(out.contains("nodes: 1 of 4"));
    assert!(out.contains("search \"auth\": 1 hit(s)"));
}
