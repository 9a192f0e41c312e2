//! archview command-line interface.
//!
pub mod options;
pub mod output;
pub mod pipeline;

use std::path::PathBuf;

use archview_core::Result;

pub use options::{PreferenceOptions, ViewOptions};
pub use pipeline::{build_store, load_graph};

/// Options for running archview.
#[derive(Debug, Clone, Default)]
pub struct ArchviewOptions {
    pub input: PathBuf,
    pub config: Option<PathBuf>,
    pub state_dir: Option<PathBuf>,
    pub export: Option<String>,
    pub view: ViewOptions,
    pub prefs: PreferenceOptions,
}

impl ArchviewOptions {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            ..Self::default()
        }
    }
}

/// Main entry point. Returns the text to print: the export document when an
/// export format is requested, otherwise a summary of the current view.
pub fn run_main(opts: &ArchviewOptions) -> Result<Option<String>> {
    let store = build_store(opts)?;

    match &opts.export {
        Some(format) => store.export_graph(format).map(Some),
        None => Ok(Some(output::render_summary(&store))),
    }
}
