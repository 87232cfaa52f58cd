//! Diff command
//!
//! Usage: costlens diff --before <FILE> --after <FILE> [--aggregate <PROPS>]
//!        [--label-config <FILE>] [--format json|summary] [--output <FILE>]

use super::snapshot::Snapshot;
use clap::{Args, ValueEnum};
use costlens_core::diff::DiffSummary;
use costlens_core::{
    diff_asset, log_op_end, log_op_error, log_op_start, render_human_summary, summarize,
    AggregationSpec, AssetDiff, Window,
};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Snapshot of the earlier cost report
    #[arg(long)]
    pub before: PathBuf,

    /// Snapshot of the later cost report
    #[arg(long)]
    pub after: PathBuf,

    /// Comma-separated aggregation properties (e.g. `cluster,label:app`)
    #[arg(long)]
    pub aggregate: Option<String>,

    /// Label configuration file (JSON) used to resolve label-backed properties
    #[arg(long)]
    pub label_config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Structured diff as JSON
    Json,
    /// Markdown summary
    Summary,
}

/// JSON document written by `--format json`
#[derive(Debug, Serialize)]
struct DiffReport<'a> {
    before_window: Window,
    after_window: Window,
    #[serde(skip_serializing_if = "Option::is_none")]
    aggregate: Option<String>,
    summary: DiffSummary,
    diffs: &'a AssetDiff,
}

/// Execute diff command
pub fn execute(args: DiffArgs) -> Result<(), Box<dyn std::error::Error>> {
    let started = Instant::now();
    log_op_start!(
        "diff",
        before = %args.before.display(),
        after = %args.after.display()
    );

    match run(&args) {
        Ok(summary) => {
            log_op_end!(
                "diff",
                duration_ms = started.elapsed().as_millis() as u64,
                added = summary.added,
                removed = summary.removed,
                changed = summary.changed
            );
            Ok(())
        }
        Err(e) => {
            log_op_error!(
                "diff",
                super::classify(e.as_ref()),
                duration_ms = started.elapsed().as_millis() as u64
            );
            Err(e)
        }
    }
}

fn run(args: &DiffArgs) -> Result<DiffSummary, Box<dyn std::error::Error>> {
    let before = Snapshot::load(&args.before)?.into_asset_set()?;
    let after = Snapshot::load(&args.after)?.into_asset_set()?;

    let (before, after) = match &args.aggregate {
        Some(properties) => {
            let label_config = super::load_label_config(args.label_config.as_deref())?;
            let spec = AggregationSpec::parse(properties, label_config)?;
            (before.aggregate_by(&spec)?, after.aggregate_by(&spec)?)
        }
        None => (before, after),
    };

    let before_window = before.window();
    let diffs = diff_asset(before, after.clone());
    let summary = summarize(&diffs, &after);

    let rendered = match args.format {
        OutputFormat::Json => {
            let report = DiffReport {
                before_window,
                after_window: after.window(),
                aggregate: args.aggregate.clone(),
                summary: summary.clone(),
                diffs: &diffs,
            };
            let mut json = serde_json::to_string_pretty(&report)
                .map_err(costlens_core::CostLensError::from)?;
            json.push('\n');
            json
        }
        OutputFormat::Summary => render_human_summary(&diffs, &after),
    };

    write_output(args.output.as_ref(), &rendered)?;
    Ok(summary)
}

fn write_output(
    output: Option<&PathBuf>,
    rendered: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    match output {
        Some(path) => {
            std::fs::write(path, rendered)
                .map_err(|e| format!("cannot write {}: {}", path.display(), e))?;
            eprintln!("✓ Diff written to {}", path.display());
        }
        None => print!("{}", rendered),
    }
    Ok(())
}
