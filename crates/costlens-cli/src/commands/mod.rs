pub mod diff;
pub mod labels;
pub mod snapshot;

use costlens_core::LabelConfig;
use std::path::Path;

/// Load a label configuration file, or the defaults when no path is given
pub fn load_label_config(
    path: Option<&Path>,
) -> Result<LabelConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .map_err(|e| format!("cannot read label config {}: {}", path.display(), e))?;
            let config = serde_json::from_str(&raw).map_err(costlens_core::CostLensError::from)?;
            Ok(config)
        }
        None => Ok(LabelConfig::default()),
    }
}

/// Classify a command failure for the `end_error` log event
pub fn classify(err: &(dyn std::error::Error + 'static)) -> costlens_core::ExError {
    use costlens_core::{CostLensError, ExError, ExErrorKind};
    match err.downcast_ref::<CostLensError>() {
        Some(e) => e.clone().into(),
        None => ExError::new(ExErrorKind::Io).with_message(err.to_string()),
    }
}
