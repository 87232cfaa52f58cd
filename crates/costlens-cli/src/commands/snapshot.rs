//! Snapshot file format
//!
//! A snapshot is one cost report: the window it covers and every asset
//! observed in it.
//!
//! ```json
//! { "window": { "start": "...", "end": "..." }, "assets": [ { "type": "node", ... } ] }
//! ```

use costlens_core::{Asset, AssetSet, CostLensError, Window};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub window: Window,
    #[serde(default)]
    pub assets: Vec<Asset>,
}

impl Snapshot {
    /// Read and validate a snapshot file
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read snapshot {}: {}", path.display(), e))?;
        let snapshot: Snapshot = serde_json::from_str(&raw).map_err(CostLensError::from)?;

        if let (Some(start), Some(end)) = (snapshot.window.start(), snapshot.window.end()) {
            if start > end {
                return Err(CostLensError::InvalidInput {
                    reason: format!(
                        "{}: window start {} is after end {}",
                        path.display(),
                        start,
                        end
                    ),
                }
                .into());
            }
        }
        Ok(snapshot)
    }

    /// Index the snapshot's assets by full identity
    pub fn into_asset_set(self) -> costlens_core::Result<AssetSet> {
        AssetSet::new(self.window, self.assets)
    }
}
