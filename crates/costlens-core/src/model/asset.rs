use super::{
    AnyAsset, AssetBase, AssetLabels, AssetProperties, AssetType, AssetVariant, Cloud,
    ClusterManagement, Disk, LoadBalancer, Network, Node,
};
use crate::identity::AggregationProperty;
use crate::window::Window;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A billable infrastructure resource observed over a window
///
/// Closed set of variants: the engine reasons exhaustively about "same
/// variant" when merging and diffing. Cloning produces a fully independent
/// value.
///
/// Two spellings of the variant name exist. The serde tag in snapshot
/// files is snake_case (`"type": "load_balancer"`). Identity keys, reports
/// and [`AssetType`] itself use the PascalCase name from
/// [`AssetType::as_str`] (`LoadBalancer`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Asset {
    Node(Node),
    Disk(Disk),
    Network(Network),
    LoadBalancer(LoadBalancer),
    ClusterManagement(ClusterManagement),
    Cloud(Cloud),
    Any(AnyAsset),
}

/// Evaluate `$body` with `$v` bound to the inner variant struct
macro_rules! with_variant {
    ($asset:expr, $v:ident => $body:expr) => {
        match $asset {
            Asset::Node($v) => $body,
            Asset::Disk($v) => $body,
            Asset::Network($v) => $body,
            Asset::LoadBalancer($v) => $body,
            Asset::ClusterManagement($v) => $body,
            Asset::Cloud($v) => $body,
            Asset::Any($v) => $body,
        }
    };
}

fn type_of<V: AssetVariant>(_: &V) -> AssetType {
    V::TYPE
}

fn accumulators_of<V: AssetVariant>(v: &V) -> Vec<(&'static str, f64)> {
    let mut acc = v.accumulators();
    acc.push(("adjustment", v.base().adjustment));
    acc
}

fn merge_same<V: AssetVariant>(into: &mut V, other: &V, rollup: bool) {
    into.accumulate(other);
    into.base_mut().absorb(other.base(), rollup);
}

impl Asset {
    /// Variant discriminator used in identity derivation
    pub fn asset_type(&self) -> AssetType {
        with_variant!(self, v => type_of(v))
    }

    pub fn base(&self) -> &AssetBase {
        with_variant!(self, v => v.base())
    }

    pub fn base_mut(&mut self) -> &mut AssetBase {
        with_variant!(self, v => v.base_mut())
    }

    pub fn properties(&self) -> &AssetProperties {
        &self.base().properties
    }

    pub fn labels(&self) -> &AssetLabels {
        &self.base().labels
    }

    pub fn name(&self) -> &str {
        &self.properties().name
    }

    pub fn cluster(&self) -> &str {
        &self.properties().cluster
    }

    pub fn provider_id(&self) -> &str {
        &self.properties().provider_id
    }

    pub fn window(&self) -> Window {
        self.base().window
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.base().start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.base().end
    }

    pub fn minutes(&self) -> f64 {
        self.base().minutes()
    }

    /// All cost accumulators of this variant, in a fixed order, ending with `adjustment`
    pub fn cost_accumulators(&self) -> Vec<(&'static str, f64)> {
        with_variant!(self, v => accumulators_of(v))
    }

    /// Sum of every cost accumulator
    pub fn total_cost(&self) -> f64 {
        self.cost_accumulators().iter().map(|(_, v)| v).sum()
    }

    /// Exact, field-by-field accumulator equality
    ///
    /// Assets of different variants are never cost-equal.
    pub fn costs_equal(&self, other: &Asset) -> bool {
        self.asset_type() == other.asset_type()
            && self.cost_accumulators() == other.cost_accumulators()
    }

    /// Names of the accumulators that differ between `self` and `other`
    ///
    /// Empty when the variants differ.
    pub fn changed_accumulators(&self, other: &Asset) -> Vec<&'static str> {
        if self.asset_type() != other.asset_type() {
            return Vec::new();
        }
        self.cost_accumulators()
            .into_iter()
            .zip(other.cost_accumulators())
            .filter(|((_, a), (_, b))| a != b)
            .map(|((name, _), _)| name)
            .collect()
    }

    /// Whether this variant can resolve `property` when deriving an aggregated key
    ///
    /// Workload properties (namespace, controller, ...) come from external
    /// billing labels, which only cloud line items carry.
    pub fn supports(&self, property: &AggregationProperty) -> bool {
        !property.is_workload() || self.asset_type() == AssetType::Cloud
    }

    /// Sum `other` into `self` when both are the same variant
    ///
    /// Returns `false` without touching `self` when the variants differ.
    pub(crate) fn accumulate(&mut self, other: &Asset, rollup: bool) -> bool {
        match (self, other) {
            (Asset::Node(a), Asset::Node(b)) => merge_same(a, b, rollup),
            (Asset::Disk(a), Asset::Disk(b)) => merge_same(a, b, rollup),
            (Asset::Network(a), Asset::Network(b)) => merge_same(a, b, rollup),
            (Asset::LoadBalancer(a), Asset::LoadBalancer(b)) => merge_same(a, b, rollup),
            (Asset::ClusterManagement(a), Asset::ClusterManagement(b)) => {
                merge_same(a, b, rollup)
            }
            (Asset::Cloud(a), Asset::Cloud(b)) => merge_same(a, b, rollup),
            (Asset::Any(a), Asset::Any(b)) => merge_same(a, b, rollup),
            _ => return false,
        }
        true
    }

    /// Collapse into a rollup bucket preserving total cost and adjustment
    pub fn to_any(&self) -> AnyAsset {
        let base = self.base().clone();
        let cost = self.total_cost() - base.adjustment;
        AnyAsset { base, cost }
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Asset::Node(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_node_mut(&mut self) -> Option<&mut Node> {
        match self {
            Asset::Node(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_disk(&self) -> Option<&Disk> {
        match self {
            Asset::Disk(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_disk_mut(&mut self) -> Option<&mut Disk> {
        match self {
            Asset::Disk(d) => Some(d),
            _ => None,
        }
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Asset {
                fn from(v: $ty) -> Self {
                    Asset::$variant(v)
                }
            }
        )*
    };
}

impl_from_variant!(
    Node => Node,
    Disk => Disk,
    Network => Network,
    LoadBalancer => LoadBalancer,
    ClusterManagement => ClusterManagement,
    Cloud => Cloud,
    Any => AnyAsset,
);

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn bounds() -> (DateTime<Utc>, DateTime<Utc>, Window) {
        let start = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 1, 2, 0, 0, 0).unwrap();
        (start, end, Window::closed(start, end))
    }

    fn node(name: &str, cpu_cost: f64) -> Asset {
        let (start, end, window) = bounds();
        let mut n = Node::new(name, "cluster1", "123abc", start, end, window);
        n.cpu_cost = cpu_cost;
        n.into()
    }

    #[test]
    fn test_total_cost_sums_all_accumulators() {
        let (start, end, window) = bounds();
        let mut n = Node::new("n", "c", "p", start, end, window);
        n.cpu_cost = 1.0;
        n.gpu_cost = 2.0;
        n.ram_cost = 3.0;
        n.base.adjustment = -0.5;
        assert_eq!(Asset::from(n).total_cost(), 5.5);
    }

    #[test]
    fn test_clone_is_independent() {
        let original = node("node1", 10.0);
        let mut copy = original.clone();
        copy.as_node_mut().unwrap().cpu_cost = 20.0;
        copy.base_mut().labels.set("team", "infra");

        assert_eq!(original.as_node().unwrap().cpu_cost, 10.0);
        assert!(original.labels().is_empty());
        assert_eq!(original.window(), copy.window());
    }

    #[test]
    fn test_costs_equal_and_changed_accumulators() {
        let a = node("node1", 10.0);
        let b = node("node1", 20.0);
        assert!(a.costs_equal(&a.clone()));
        assert!(!a.costs_equal(&b));
        assert_eq!(a.changed_accumulators(&b), vec!["cpu_cost"]);
    }

    #[test]
    fn test_costs_never_equal_across_variants() {
        let (start, end, window) = bounds();
        let n: Asset = Node::new("x", "c", "p", start, end, window).into();
        let d: Asset = Disk::new("x", "c", "p", start, end, window).into();
        assert!(!n.costs_equal(&d));
        assert!(n.changed_accumulators(&d).is_empty());
    }

    #[test]
    fn test_accumulate_rejects_other_variant() {
        let (start, end, window) = bounds();
        let mut n = node("x", 1.0);
        let d: Asset = Disk::new("x", "c", "p", start, end, window).into();
        assert!(!n.accumulate(&d, false));
        assert_eq!(n.total_cost(), 1.0);
    }

    #[test]
    fn test_to_any_preserves_total() {
        let mut n = node("x", 4.0);
        n.base_mut().adjustment = 1.0;
        let any = n.to_any();
        assert_eq!(Asset::from(any).total_cost(), 5.0);
    }

    #[test]
    fn test_wire_tag_is_snake_case_and_key_name_is_pascal_case() {
        let (start, end, window) = bounds();
        let lb: Asset = LoadBalancer::new("lb1", "c", "p", start, end, window).into();

        let json = serde_json::to_value(&lb).unwrap();
        assert_eq!(json["type"], "load_balancer");
        assert_eq!(lb.asset_type().as_str(), "LoadBalancer");
        assert_eq!(serde_json::to_value(lb.asset_type()).unwrap(), "LoadBalancer");
        assert!(crate::identity::key(&lb, None).unwrap().starts_with("LoadBalancer/"));
    }

    #[test]
    fn test_serde_tagged_representation() {
        let n = node("node1", 10.0);
        let json = serde_json::to_value(&n).unwrap();
        assert_eq!(json["type"], "node");
        assert_eq!(json["cpu_cost"], 10.0);
        assert_eq!(json["properties"]["name"], "node1");

        let back: Asset = serde_json::from_value(json).unwrap();
        assert_eq!(back, n);
    }
}
