//! costlens Core - asset identity and diffing engine
//!
//! This crate provides the in-memory model used to explain why a cluster's
//! bill changed between two cost reports:
//! - `Window` time intervals scoping every snapshot
//! - `Asset` variants (nodes, disks, networking, cloud line items, ...)
//! - Identity key derivation with optional aggregation
//! - `AssetSet`, a windowed collection that merges duplicate observations
//! - The diff engine classifying Added / Removed / Changed assets
//!
//! Cost formulas are not computed here; accumulators arrive pre-filled.

pub mod asset_set;
pub mod diff;
pub mod errors;
pub mod identity;
pub mod label_config;
pub mod logging_facility;
pub mod model;
pub mod window;

// Re-export commonly used types
pub use asset_set::{AssetSet, MergePolicy};
pub use diff::{diff_asset, render_human_summary, summarize, AssetDiff, Diff, DiffKind};
pub use errors::{CostLensError, ExError, ExErrorKind, Result};
pub use identity::{key, AggregationProperty, AggregationSpec};
pub use label_config::LabelConfig;
pub use model::{
    AnyAsset, Asset, AssetBase, AssetLabels, AssetProperties, AssetType, Cloud,
    ClusterManagement, Disk, LoadBalancer, Network, Node,
};
pub use window::Window;
