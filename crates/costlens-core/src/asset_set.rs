use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use crate::errors::{CostLensError, Result};
use crate::identity::{key, AggregationSpec};
use crate::model::{Asset, AssetVariant};
use crate::window::Window;

/// How an insert combines an asset with one already stored under the same key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergePolicy {
    /// Same variant and identical properties required; accumulators summed
    #[default]
    Strict,
    /// Accumulators summed; disagreeing fields cleared; mixed variants
    /// collapse into an `Any` bucket
    Rollup,
}

/// Windowed, deduplicating collection of assets indexed by identity key
///
/// Backed by a `BTreeMap`, so iteration is always sorted by key and output
/// built from a set is reproducible. Not internally synchronised; wrap in a
/// lock if several threads insert concurrently.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetSet {
    window: Window,
    assets: BTreeMap<String, Asset>,
    aggregation: Option<AggregationSpec>,
    policy: MergePolicy,
}

impl AssetSet {
    /// Create an empty set with explicit keying and merge behaviour
    pub fn with_options(
        window: Window,
        aggregation: Option<AggregationSpec>,
        policy: MergePolicy,
    ) -> Self {
        Self {
            window,
            assets: BTreeMap::new(),
            aggregation,
            policy,
        }
    }

    /// Create an empty set keyed by full identity
    pub fn empty(window: Window) -> Self {
        Self::with_options(window, None, MergePolicy::Strict)
    }

    /// Build a set keyed by full identity, merging duplicate observations
    ///
    /// # Errors
    ///
    /// Returns `IdentityCollisionMismatch` if two assets share a key but
    /// disagree on variant or identity fields.
    pub fn new(window: Window, assets: impl IntoIterator<Item = Asset>) -> Result<Self> {
        let mut set = Self::empty(window);
        set.extend(assets)?;
        Ok(set)
    }

    /// Build a rollup set keyed by `spec`
    ///
    /// An empty spec keys by full identity, so the set is built exactly as
    /// [`AssetSet::new`] would: strict merge, no aggregation.
    ///
    /// # Errors
    ///
    /// - `InvalidAggregation`: an asset cannot supply a requested property
    /// - `IdentityCollisionMismatch`: empty spec and incompatible duplicates
    pub fn aggregated(
        window: Window,
        spec: AggregationSpec,
        assets: impl IntoIterator<Item = Asset>,
    ) -> Result<Self> {
        let mut set = if spec.is_empty() {
            Self::empty(window)
        } else {
            Self::with_options(window, Some(spec), MergePolicy::Rollup)
        };
        set.extend(assets)?;
        Ok(set)
    }

    /// Re-key a copy of this set by `spec`, rolling up assets that share a bucket
    ///
    /// # Errors
    ///
    /// Returns `InvalidAggregation` if any asset cannot supply a requested
    /// property.
    pub fn aggregate_by(&self, spec: &AggregationSpec) -> Result<AssetSet> {
        AssetSet::aggregated(self.window, spec.clone(), self.assets.values().cloned())
    }

    /// Insert every asset, stopping at the first error
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by [`AssetSet::insert`].
    pub fn extend(&mut self, assets: impl IntoIterator<Item = Asset>) -> Result<()> {
        for asset in assets {
            self.insert(asset)?;
        }
        Ok(())
    }

    /// Insert an asset, merging it into any entry with the same key
    ///
    /// A failed insert leaves the set unchanged.
    ///
    /// # Errors
    ///
    /// - `InvalidAggregation`: the set's aggregation cannot key this asset
    /// - `IdentityCollisionMismatch`: strict merge of incompatible assets
    pub fn insert(&mut self, asset: Asset) -> Result<()> {
        let asset_key = key(&asset, self.aggregation.as_ref())?;
        match self.assets.entry(asset_key) {
            Entry::Vacant(slot) => {
                slot.insert(asset);
            }
            Entry::Occupied(mut slot) => {
                let asset_key = slot.key().clone();
                merge(slot.get_mut(), &asset, self.policy, &asset_key)?;
                tracing::debug!(
                    asset_key = %asset_key,
                    asset_type = %slot.get().asset_type(),
                    "merged duplicate asset observation"
                );
            }
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&Asset> {
        self.assets.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.assets.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Entries sorted by key
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Asset)> {
        self.assets.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.assets.keys()
    }

    pub fn window(&self) -> Window {
        self.window
    }

    pub fn aggregation(&self) -> Option<&AggregationSpec> {
        self.aggregation.as_ref()
    }

    pub fn merge_policy(&self) -> MergePolicy {
        self.policy
    }

    /// Sum of every asset's total cost
    pub fn total_cost(&self) -> f64 {
        self.assets.values().map(Asset::total_cost).sum()
    }

    /// Consume the set, yielding its key-indexed assets
    pub fn into_assets(self) -> BTreeMap<String, Asset> {
        self.assets
    }
}

/// Fold `incoming` into `existing` under `policy`; `existing` is untouched on error
fn merge(
    existing: &mut Asset,
    incoming: &Asset,
    policy: MergePolicy,
    asset_key: &str,
) -> Result<()> {
    match policy {
        MergePolicy::Strict => {
            if existing.asset_type() != incoming.asset_type() {
                return Err(CostLensError::IdentityCollisionMismatch {
                    key: asset_key.to_string(),
                    reason: format!(
                        "variant mismatch: existing {}, incoming {}",
                        existing.asset_type(),
                        incoming.asset_type()
                    ),
                });
            }
            if existing.properties() != incoming.properties() {
                return Err(CostLensError::IdentityCollisionMismatch {
                    key: asset_key.to_string(),
                    reason: "identity fields differ".to_string(),
                });
            }
            existing.accumulate(incoming, false);
        }
        MergePolicy::Rollup => {
            if !existing.accumulate(incoming, true) {
                let mut bucket = existing.to_any();
                let other = incoming.to_any();
                bucket.accumulate(&other);
                bucket.base.absorb(&other.base, true);
                *existing = Asset::Any(bucket);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Disk, Node};
    use chrono::{DateTime, TimeZone, Utc};

    fn bounds() -> (DateTime<Utc>, DateTime<Utc>, Window) {
        let start = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 1, 2, 0, 0, 0).unwrap();
        (start, end, Window::closed(start, end))
    }

    #[test]
    fn test_strict_merge_sums_costs() {
        let (start, end, window) = bounds();
        let mut a = Node::new("n1", "c1", "p1", start, end, window);
        a.cpu_cost = 1.0;
        let mut b = a.clone();
        b.cpu_cost = 2.5;
        b.base.adjustment = 0.5;

        let set = AssetSet::new(window, [a.into(), b.into()]).unwrap();

        assert_eq!(set.len(), 1);
        let merged = set.iter().next().unwrap().1.as_node().unwrap();
        assert_eq!(merged.cpu_cost, 3.5);
        assert_eq!(merged.base.adjustment, 0.5);
    }

    #[test]
    fn test_strict_merge_rejects_property_mismatch_and_leaves_set_unchanged() {
        let (start, end, window) = bounds();
        let mut a = Disk::new("d1", "c1", "p1", start, end, window);
        a.cost = 1.0;
        let mut b = a.clone();
        b.base.properties.account = "other-account".to_string();

        let mut set = AssetSet::new(window, [Asset::from(a)]).unwrap();
        let before = set.clone();
        let err = set.insert(b.into()).unwrap_err();

        assert!(matches!(
            err,
            CostLensError::IdentityCollisionMismatch { .. }
        ));
        assert_eq!(set, before);
    }

    #[test]
    fn test_merge_rejects_variant_mismatch() {
        let (start, end, window) = bounds();
        let mut existing: Asset = Node::new("x", "c", "p", start, end, window).into();
        let incoming: Asset = Disk::new("x", "c", "p", start, end, window).into();
        let err = merge(&mut existing, &incoming, MergePolicy::Strict, "k").unwrap_err();
        assert_eq!(
            err,
            CostLensError::IdentityCollisionMismatch {
                key: "k".to_string(),
                reason: "variant mismatch: existing Node, incoming Disk".to_string(),
            }
        );
    }

    #[test]
    fn test_rollup_merge_of_mixed_variants_becomes_any() {
        let (start, end, window) = bounds();
        let mut n = Node::new("x", "c", "p", start, end, window);
        n.ram_cost = 2.0;
        let mut d = Disk::new("y", "c", "q", start, end, window);
        d.cost = 3.0;
        let mut existing: Asset = n.into();

        merge(&mut existing, &d.into(), MergePolicy::Rollup, "c").unwrap();

        assert_eq!(existing.asset_type(), crate::model::AssetType::Any);
        assert_eq!(existing.total_cost(), 5.0);
        assert_eq!(existing.cluster(), "c");
        assert!(existing.name().is_empty());
    }

    #[test]
    fn test_empty_aggregation_keeps_strict_identity_merge() {
        let (start, end, window) = bounds();
        let mut a = Node::new("n", "c", "p", start, end, window);
        a.base.properties.account = "acct-1".to_string();
        let mut b = a.clone();
        b.base.properties.account = "acct-2".to_string();

        let spec = AggregationSpec::new(vec![]);
        let err = AssetSet::aggregated(window, spec, [a.into(), b.into()]).unwrap_err();

        assert!(matches!(
            err,
            CostLensError::IdentityCollisionMismatch { .. }
        ));
    }

    #[test]
    fn test_merge_widens_active_period() {
        let (start, end, window) = bounds();
        let later_end = end + chrono::Duration::hours(6);
        let a = Node::new("n", "c", "p", start, end, window);
        let b = Node::new("n", "c", "p", start, later_end, Window::closed(start, later_end));

        let set = AssetSet::new(window, [a.into(), b.into()]).unwrap();
        let merged = set.iter().next().unwrap().1;

        assert_eq!(merged.end(), later_end);
        assert_eq!(merged.window(), Window::closed(start, later_end));
    }
}
