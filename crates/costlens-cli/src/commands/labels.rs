//! Labels command
//!
//! Usage: costlens labels [--label-config <FILE>] [--external]

use clap::Args;
use costlens_core::{log_op_end, log_op_error, log_op_start};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Args)]
pub struct LabelsArgs {
    /// Label configuration file (JSON); defaults apply when omitted
    #[arg(long)]
    pub label_config: Option<PathBuf>,

    /// Print external query columns instead of the full configuration
    #[arg(long)]
    pub external: bool,
}

/// Execute labels command
pub fn execute(args: LabelsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let started = Instant::now();
    log_op_start!("labels", external = args.external);

    let map = match render(&args) {
        Ok(map) => map,
        Err(e) => {
            log_op_error!(
                "labels",
                super::classify(e.as_ref()),
                duration_ms = started.elapsed().as_millis() as u64
            );
            return Err(e);
        }
    };

    log_op_end!(
        "labels",
        duration_ms = started.elapsed().as_millis() as u64,
        entries = map.len()
    );
    Ok(())
}

/// Print the selected label map as JSON, returning it for logging
fn render(
    args: &LabelsArgs,
) -> Result<std::collections::BTreeMap<String, String>, Box<dyn std::error::Error>> {
    let config = super::load_label_config(args.label_config.as_deref())?;
    let map = if args.external {
        config.external_query_labels()
    } else {
        config.to_map()
    };
    let json = serde_json::to_string_pretty(&map).map_err(costlens_core::CostLensError::from)?;
    println!("{}", json);
    Ok(map)
}
