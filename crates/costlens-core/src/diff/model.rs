//! Diff output types.
//!
//! Collections use `BTreeMap` for deterministic serialization.

use crate::model::Asset;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Classification of a single keyed change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffKind {
    /// Key present only in the "after" set
    Added,
    /// Key present only in the "before" set
    Removed,
    /// Key present in both with at least one differing cost accumulator
    Changed,
}

impl DiffKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiffKind::Added => "added",
            DiffKind::Removed => "removed",
            DiffKind::Changed => "changed",
        }
    }
}

impl std::fmt::Display for DiffKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified change carrying a representative entity
///
/// For `Added` the entity is the "after" instance; for `Removed` and
/// `Changed` it is the "before" instance. Callers needing the "after" value
/// of a change look it up by key in the after set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diff<A> {
    pub asset: A,
    pub kind: DiffKind,
}

impl<A> Diff<A> {
    pub fn new(asset: A, kind: DiffKind) -> Self {
        Self { asset, kind }
    }

    pub fn added(asset: A) -> Self {
        Self::new(asset, DiffKind::Added)
    }

    pub fn removed(asset: A) -> Self {
        Self::new(asset, DiffKind::Removed)
    }

    pub fn changed(asset: A) -> Self {
        Self::new(asset, DiffKind::Changed)
    }
}

/// Key-indexed result of diffing two asset sets
pub type AssetDiff = BTreeMap<String, Diff<Asset>>;

/// Aggregate view of an [`AssetDiff`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub added: usize,
    pub removed: usize,
    pub changed: usize,
    /// Total cost of added assets
    pub added_cost: f64,
    /// Total cost of removed assets
    pub removed_cost: f64,
    /// Sum of (after − before) total cost over changed assets
    pub changed_cost_delta: f64,
}

impl DiffSummary {
    /// Net change in total cost explained by the diff
    pub fn net_cost_delta(&self) -> f64 {
        self.added_cost - self.removed_cost + self.changed_cost_delta
    }

    pub fn is_empty(&self) -> bool {
        self.added == 0 && self.removed == 0 && self.changed == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_serializes_snake_case() {
        assert_eq!(
            serde_json::to_value(DiffKind::Changed).unwrap(),
            serde_json::json!("changed")
        );
    }

    #[test]
    fn test_net_cost_delta() {
        let s = DiffSummary {
            added: 1,
            removed: 1,
            changed: 1,
            added_cost: 10.0,
            removed_cost: 4.0,
            changed_cost_delta: -1.0,
        };
        assert_eq!(s.net_cost_delta(), 5.0);
        assert!(!s.is_empty());
        assert!(DiffSummary::default().is_empty());
    }
}
