use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;

use archview::{ArchviewOptions, PreferenceOptions, ViewOptions, run_main};

#[derive(Parser, Debug)]
#[command(
    name = "archview",
    about = "archview: one architecture graph, four zoom levels",
    version
)]
pub struct Cli {
    /// Architecture graph JSON (`{ "nodes": [...], "edges": [...] }`) or an export document
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    input: PathBuf,

    #[command(flatten)]
    view: ViewOptions,

    #[command(flatten)]
    prefs: PreferenceOptions,

    /// Export the current projection in this format instead of printing a summary (json, png, svg)
    #[arg(long, value_name = "FORMAT")]
    export: Option<String>,

    /// Directory where view preferences are persisted between runs
    #[arg(long = "state-dir", value_name = "DIR")]
    state_dir: Option<PathBuf>,

    /// View configuration file (TOML)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output file path (writes to file instead of stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<PathBuf>,
}

pub fn run(args: Cli) -> anyhow::Result<()> {
    let total_start = Instant::now();

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }

    let opts = ArchviewOptions {
        input: args.input,
        config: args.config,
        state_dir: args.state_dir,
        export: args.export,
        view: args.view,
        prefs: args.prefs,
    };

    let result = run_main(&opts).map_err(|err| {
        tracing::error!(error = %err, "execution failed");
        err
    });

    if let Some(output) = result? {
        if let Some(ref path) = args.output {
            std::fs::write(path, &output)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "output written");
        } else {
            println!("{output}");
        }
    }

    let total_secs = total_start.elapsed().as_secs_f64();
    tracing::info!(total_secs, "complete");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    run(args)
}
