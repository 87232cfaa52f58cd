use super::{AssetBase, AssetType, AssetVariant, COMPUTE_CATEGORY};
use crate::window::Window;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Compute node
///
/// Cost accumulators: `cpu_cost`, `gpu_cost`, `ram_cost` (plus the shared
/// `adjustment`). The usage quantities are summed on merge but never
/// compared by the diff engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(flatten)]
    pub base: AssetBase,
    #[serde(default)]
    pub node_type: String,
    #[serde(default)]
    pub cpu_core_hours: f64,
    #[serde(default)]
    pub ram_byte_hours: f64,
    #[serde(default)]
    pub gpu_hours: f64,
    #[serde(default)]
    pub cpu_cost: f64,
    #[serde(default)]
    pub gpu_cost: f64,
    #[serde(default)]
    pub ram_cost: f64,
}

impl Node {
    /// Create a node with every accumulator at zero
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
                COMPUTE_CATEGORY,
                start,
                end,
                window,
            ),
            node_type: String::new(),
            cpu_core_hours: 0.0,
            ram_byte_hours: 0.0,
            gpu_hours: 0.0,
            cpu_cost: 0.0,
            gpu_cost: 0.0,
            ram_cost: 0.0,
        }
    }
}

impl AssetVariant for Node {
    const TYPE: AssetType = AssetType::Node;

    fn base(&self) -> &AssetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut AssetBase {
        &mut self.base
    }

    fn accumulators(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("cpu_cost", self.cpu_cost),
            ("gpu_cost", self.gpu_cost),
            ("ram_cost", self.ram_cost),
        ]
    }

    fn accumulate(&mut self, other: &Self) {
        self.cpu_core_hours += other.cpu_core_hours;
        self.ram_byte_hours += other.ram_byte_hours;
        self.gpu_hours += other.gpu_hours;
        self.cpu_cost += other.cpu_cost;
        self.gpu_cost += other.gpu_cost;
        self.ram_cost += other.ram_cost;
        if self.node_type != other.node_type {
            self.node_type.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn node(name: &str) -> Node {
        let start = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 1, 2, 0, 0, 0).unwrap();
        Node::new(name, "cluster1", "123abc", start, end, Window::closed(start, end))
    }

    #[test]
    fn test_new_node_is_zeroed() {
        let n = node("node1");
        assert_eq!(n.base.properties.name, "node1");
        assert_eq!(n.base.properties.cluster, "cluster1");
        assert_eq!(n.base.properties.provider_id, "123abc");
        assert_eq!(n.base.properties.category, COMPUTE_CATEGORY);
        assert!(n.accumulators().iter().all(|(_, v)| *v == 0.0));
        assert_eq!(n.base.adjustment, 0.0);
        assert_eq!(n.base.minutes(), 1440.0);
    }

    #[test]
    fn test_accumulate_sums_costs_and_usage() {
        let mut a = node("node1");
        a.cpu_cost = 1.5;
        a.cpu_core_hours = 24.0;
        a.node_type = "n2-standard-4".to_string();
        let mut b = node("node1");
        b.cpu_cost = 2.0;
        b.ram_cost = 0.5;
        b.cpu_core_hours = 12.0;
        b.node_type = "n2-standard-4".to_string();

        a.accumulate(&b);

        assert_eq!(a.cpu_cost, 3.5);
        assert_eq!(a.ram_cost, 0.5);
        assert_eq!(a.cpu_core_hours, 36.0);
        assert_eq!(a.node_type, "n2-standard-4");
    }
}
