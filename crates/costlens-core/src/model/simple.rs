//! Variants whose only variant-specific accumulator is a single `cost`.

use super::{AssetBase, AssetType, AssetVariant, MANAGEMENT_CATEGORY, NETWORK_CATEGORY};
use crate::window::Window;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

macro_rules! single_cost_asset {
    ($(#[$meta:meta])* $name:ident, $asset_type:expr, $category:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        pub struct $name {
            #[serde(flatten)]
            pub base: AssetBase,
            #[serde(default)]
            pub cost: f64,
        }

        impl $name {
            /// Create the asset with a zero cost
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
                        $category,
                        start,
                        end,
                        window,
                    ),
                    cost: 0.0,
                }
            }
        }

        impl AssetVariant for $name {
            const TYPE: AssetType = $asset_type;

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
                self.cost += other.cost;
            }
        }
    };
}

single_cost_asset!(
    /// Network egress and inter-zone traffic
    Network,
    AssetType::Network,
    NETWORK_CATEGORY
);

single_cost_asset!(
    /// Provider load balancer
    LoadBalancer,
    AssetType::LoadBalancer,
    NETWORK_CATEGORY
);

single_cost_asset!(
    /// Managed control-plane fee
    ClusterManagement,
    AssetType::ClusterManagement,
    MANAGEMENT_CATEGORY
);

single_cost_asset!(
    /// Rollup bucket holding the summed cost of heterogeneous assets
    ///
    /// Produced when an aggregated `AssetSet` merges assets of different
    /// variants under one key.
    AnyAsset,
    AssetType::Any,
    ""
);

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_default_categories() {
        let t = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let w = Window::closed(t, t);
        assert_eq!(
            Network::new("n", "c", "", t, t, w).base.properties.category,
            NETWORK_CATEGORY
        );
        assert_eq!(
            LoadBalancer::new("lb", "c", "", t, t, w).base.properties.category,
            NETWORK_CATEGORY
        );
        assert_eq!(
            ClusterManagement::new("cm", "c", "", t, t, w)
                .base
                .properties
                .category,
            MANAGEMENT_CATEGORY
        );
        assert!(AnyAsset::new("a", "c", "", t, t, w)
            .base
            .properties
            .category
            .is_empty());
    }

    #[test]
    fn test_single_cost_accumulate() {
        let t = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let w = Window::closed(t, t);
        let mut a = LoadBalancer::new("lb", "c", "", t, t, w);
        a.cost = 1.25;
        let mut b = a.clone();
        b.cost = 0.75;
        a.accumulate(&b);
        assert_eq!(a.accumulators(), vec![("cost", 2.0)]);
    }
}
