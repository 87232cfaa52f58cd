use super::{AssetBase, AssetType, AssetVariant, STORAGE_CATEGORY};
use crate::window::Window;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persistent disk or volume
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Disk {
    #[serde(flatten)]
    pub base: AssetBase,
    #[serde(default)]
    pub byte_hours: f64,
    #[serde(default)]
    pub cost: f64,
}

impl Disk {
    /// Create a disk with every accumulator at zero
    pub fn new(
        name: impl Into<String>,
        cluster: impl Into<String>,
        provider_id: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        window: Window,
    ) -> Self {
        Self {
            base: AssetBase::new(
                name,
                cluster,
                provider_id,
                STORAGE_CATEGORY,
                start,
                end,
                window,
            ),
            byte_hours: 0.0,
            cost: 0.0,
        }
    }

    /// Average provisioned size over the active period, in bytes
    pub fn bytes(&self) -> f64 {
        let hours = self.base.minutes() / 60.0;
        if hours <= 0.0 {
            return 0.0;
        }
        self.byte_hours / hours
    }
}

impl AssetVariant for Disk {
    const TYPE: AssetType = AssetType::Disk;

    fn base(&self) -> &AssetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut AssetBase {
        &mut self.base
    }

    fn accumulators(&self) -> Vec<(&'static str, f64)> {
        vec![("cost", self.cost)]
    }

    fn accumulate(&mut self, other: &Self) {
        self.byte_hours += other.byte_hours;
        self.cost += other.cost;
    }
}
