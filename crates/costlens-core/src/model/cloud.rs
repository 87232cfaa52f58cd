use super::{AssetBase, AssetType, AssetVariant};
use crate::window::Window;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Out-of-cluster cloud billing line item
///
/// Cloud items carry the provider's external labels (e.g.
/// `kubernetes_statefulset`), which makes them the only variant that can be
/// grouped by workload properties. `credit` is usually negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cloud {
    #[serde(flatten)]
    pub base: AssetBase,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub credit: f64,
}

impl Cloud {
    pub fn new(
        name: impl Into<String>,
        cluster: impl Into<String>,
        provider_id: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        window: Window,
    ) -> Self {
        Self {
            base: AssetBase::new(name, cluster, provider_id, "", start, end, window),
            cost: 0.0,
            credit: 0.0,
        }
    }
}

impl AssetVariant for Cloud {
    const TYPE: AssetType = AssetType::Cloud;

    fn base(&self) -> &AssetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut AssetBase {
        &mut self.base
    }

    fn accumulators(&self) -> Vec<(&'static str, f64)> {
        vec![("cost", self.cost), ("credit", self.credit)]
    }

    fn accumulate(&mut self, other: &Self) {
        self.cost += other.cost;
        self.credit += other.credit;
    }
}
