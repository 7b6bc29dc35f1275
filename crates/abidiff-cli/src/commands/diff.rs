//! Diff command

use abidiff_core::changes::computer::DEFAULT_PARALLEL_MIN_CLASSES;
use abidiff_core::changes::{compute_with_options, render_human_summary, ComputeOptions};
use abidiff_core::errors::{AbiDiffError, ExError};
use abidiff_core::logging_facility::{init, Profile};
use abidiff_core::snapshot::{parse_snapshot_set_bytes, SnapshotSet};
use abidiff_core_types::RequestContext;
use clap::{Args, ValueEnum};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Change set as JSON
    Json,
    /// Markdown summary
    Summary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogMode {
    /// No logging
    Quiet,
    /// Human-readable logs on stderr
    Dev,
    /// JSON logs on stderr
    Prod,
}

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Snapshot set of the current build
    #[arg(long)]
    pub current: PathBuf,

    /// Snapshot set of the previous build
    #[arg(long)]
    pub previous: PathBuf,

    #[arg(long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Compare common classes on all cores
    #[arg(long)]
    pub parallel: bool,

    /// Minimum common classes before --parallel shards the work
    #[arg(long, default_value_t = DEFAULT_PARALLEL_MIN_CLASSES)]
    pub parallel_min_classes: usize,

    #[arg(long, value_enum, default_value = "quiet")]
    pub log: LogMode,

    /// Trace id of the surrounding build, attached to logs and errors
    #[arg(long)]
    pub trace_id: Option<String>,
}

pub fn execute(args: DiffArgs) -> Result<(), Box<dyn std::error::Error>> {
    match args.log {
        LogMode::Quiet => {}
        LogMode::Dev => init(Profile::Development),
        LogMode::Prod => init(Profile::Production),
    }

    let ctx = RequestContext::for_invocation(args.trace_id.clone());
    let span = tracing::info_span!(
        "abidiff_diff",
        request_id = %ctx.request_id,
        trace_id = ctx.trace_id_str()
    );
    let _guard = span.enter();

    let output = run_diff(&args).map_err(|e| to_ex_error(e, &ctx))?;
    println!("{}", output);
    Ok(())
}

fn run_diff(args: &DiffArgs) -> abidiff_core::Result<String> {
    let current = load_snapshot_set(&args.current)?;
    let previous = load_snapshot_set(&args.previous)?;

    let options = ComputeOptions {
        parallel: args.parallel,
        parallel_min_classes: args.parallel_min_classes,
    };
    let changes = compute_with_options(&current.classes, &previous.classes, &options)?;

    match args.format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&changes)?),
        OutputFormat::Summary => Ok(render_human_summary(&changes)),
    }
}

fn load_snapshot_set(path: &Path) -> abidiff_core::Result<SnapshotSet> {
    let bytes = std::fs::read(path).map_err(|e| AbiDiffError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    parse_snapshot_set_bytes(&bytes)
}

fn to_ex_error(err: AbiDiffError, ctx: &RequestContext) -> ExError {
    let mut ex_err = ExError::from(err)
        .with_op("diff")
        .with_request_id(ctx.request_id.clone());
    if let Some(trace_id) = &ctx.trace_id {
        ex_err = ex_err.with_trace_id(trace_id.clone());
    }
    ex_err
}
