//! Drive a [`GraphStore`] from command-line options: config → restore →
//! load → zoom/filter → search/select.

use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Instant;

use tracing::{debug, info};

use archview_core::{
    ArchitectureGraph, Error, FileStorage, GraphStore, PersistenceAdapter, Result, ViewConfig,
    ZoomLevel,
};

use crate::ArchviewOptions;

/// Read a graph payload from disk. Export documents are accepted too.
pub fn load_graph(path: &Path) -> Result<ArchitectureGraph> {
    let text = fs::read_to_string(path).map_err(|err| {
        Error::from(err)
            .with_operation("cli::load_graph")
            .with_context("path", path.display().to_string())
    })?;
    ArchitectureGraph::from_json(&text)
        .map_err(|err| err.with_context("path", path.display().to_string()))
}

/// Build a store with the requested view applied.
pub fn build_store(opts: &ArchviewOptions) -> Result<GraphStore> {
    let config = match &opts.config {
        Some(path) => ViewConfig::from_file(path)?,
        None => ViewConfig::default(),
    };

    let mut store = match &opts.state_dir {
        Some(dir) => {
            debug!(
                dir = %dir.display(),
                key = %config.storage_key,
                "using file-backed preferences"
            );
            let key = config.storage_key.clone();
            GraphStore::restore(config, PersistenceAdapter::new(FileStorage::new(dir), key))
        }
        None => GraphStore::with_config(config),
    };

    let load_start = Instant::now();
    let graph = load_graph(&opts.input)?;
    store.set_graph(graph);
    info!("Graph load: {:.2}s", load_start.elapsed().as_secs_f64());

    apply_preferences(&mut store, opts);
    apply_view(&mut store, opts)?;
    Ok(store)
}

fn apply_preferences(store: &mut GraphStore, opts: &ArchviewOptions) {
    let prefs = &opts.prefs;
    if prefs.reset_view {
        store.reset_view();
    }
    for layer in &prefs.toggle_layers {
        store.toggle_layer(layer);
    }
    if let Some(factor) = prefs.scale_by {
        store.zoom_viewport_by(factor);
    }
}

fn apply_view(store: &mut GraphStore, opts: &ArchviewOptions) -> Result<()> {
    let view = &opts.view;
    if let Some(zoom) = &view.zoom {
        store.set_zoom(ZoomLevel::from_str(zoom)?);
    }
    if let Some(service_type) = &view.filter_type {
        store.filter_by_type(service_type)?;
    }
    if let Some(status) = &view.filter_status {
        store.filter_by_status(status)?;
    }
    if let Some(query) = &view.search {
        store.set_search_query(query.as_str());
    }
    if let Some(id) = &view.select {
        store.set_selected_node(Some(id.as_str()));
    }
    Ok(())
}
