//! Asset data model
//!
//! `Asset` is a closed enum over the billable resource kinds the engine
//! understands. Every variant embeds an [`AssetBase`] carrying identity
//! fields, labels, the observation window, and the shared `adjustment`
//! accumulator; variant structs add their own cost accumulators.

pub mod asset;
pub mod cloud;
pub mod disk;
pub mod labels;
pub mod node;
pub mod properties;
pub mod simple;

pub use asset::Asset;
pub use cloud::Cloud;
pub use disk::Disk;
pub use labels::AssetLabels;
pub use node::Node;
pub use properties::AssetProperties;
pub use simple::{AnyAsset, ClusterManagement, LoadBalancer, Network};

use crate::window::Window;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default asset categories
pub const COMPUTE_CATEGORY: &str = "Compute";
pub const STORAGE_CATEGORY: &str = "Storage";
pub const NETWORK_CATEGORY: &str = "Network";
pub const MANAGEMENT_CATEGORY: &str = "Management";

/// Discriminator of an asset variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AssetType {
    Node,
    Disk,
    Network,
    LoadBalancer,
    ClusterManagement,
    Cloud,
    Any,
}

impl AssetType {
    /// Stable name used in identity keys and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetType::Node => "Node",
            AssetType::Disk => "Disk",
            AssetType::Network => "Network",
            AssetType::LoadBalancer => "LoadBalancer",
            AssetType::ClusterManagement => "ClusterManagement",
            AssetType::Cloud => "Cloud",
            AssetType::Any => "Any",
        }
    }
}

impl std::fmt::Display for AssetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields shared by every asset variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetBase {
    #[serde(default)]
    pub properties: AssetProperties,
    #[serde(default)]
    pub labels: AssetLabels,
    /// First instant the resource was observed running
    pub start: DateTime<Utc>,
    /// Last instant the resource was observed running
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub window: Window,
    /// Provider-side correction applied on top of the computed cost
    #[serde(default)]
    pub adjustment: f64,
}

impl AssetBase {
    /// Create a base with identity fields set and a zero adjustment
    pub fn new(
        name: impl Into<String>,
        cluster: impl Into<String>,
        provider_id: impl Into<String>,
        category: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        window: Window,
    ) -> Self {
        Self {
            properties: AssetProperties {
                category: category.to_string(),
                cluster: cluster.into(),
                name: name.into(),
                provider_id: provider_id.into(),
                ..AssetProperties::default()
            },
            labels: AssetLabels::new(),
            start,
            end,
            window,
            adjustment: 0.0,
        }
    }

    /// Minutes between `start` and `end`
    pub fn minutes(&self) -> f64 {
        (self.end - self.start).num_milliseconds() as f64 / 60_000.0
    }

    /// Fold `other` into `self`: widen the active period and window, sum the adjustment
    ///
    /// With `rollup`, identity fields and labels that disagree are cleared
    /// so the merged record only claims what both inputs share.
    pub(crate) fn absorb(&mut self, other: &AssetBase, rollup: bool) {
        self.start = self.start.min(other.start);
        self.end = self.end.max(other.end);
        self.window = self.window.expand(&other.window);
        self.adjustment += other.adjustment;
        if rollup {
            self.properties.retain_shared(&other.properties);
            self.labels.retain_shared(&other.labels);
        }
    }
}

/// Capability set implemented by every concrete asset struct
pub trait AssetVariant: Clone {
    /// Discriminator of this variant
    const TYPE: AssetType;

    fn base(&self) -> &AssetBase;

    fn base_mut(&mut self) -> &mut AssetBase;

    /// Variant-specific cost accumulators, in a fixed order, excluding `adjustment`
    fn accumulators(&self) -> Vec<(&'static str, f64)>;

    /// Sum the variant-specific accumulators and usage quantities of `other` into `self`
    fn accumulate(&mut self, other: &Self);
}
