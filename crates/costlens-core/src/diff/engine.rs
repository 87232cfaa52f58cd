//! Asset diff computation engine.
//!
//! The core entry point is [`diff_asset`], which consumes two asset sets and
//! produces an [`AssetDiff`].

use crate::asset_set::AssetSet;
use crate::diff::model::{AssetDiff, Diff, DiffKind, DiffSummary};

/// Reconcile `before` and `after` into a key-indexed map of changes
///
/// - key only in `after` → `Added` with the after asset
/// - key only in `before` → `Removed` with the before asset
/// - key in both with any accumulator differing → `Changed` with the before asset
/// - key in both with identical accumulators → no entry
///
/// Both sets are consumed; clone them first to keep using them.
pub fn diff_asset(before: AssetSet, after: AssetSet) -> AssetDiff {
    let before_len = before.len();
    let after_len = after.len();

    let mut before_assets = before.into_assets();
    let mut diffs = AssetDiff::new();

    for (key, after_asset) in after.into_assets() {
        match before_assets.remove(&key) {
            None => {
                diffs.insert(key, Diff::added(after_asset));
            }
            Some(before_asset) => {
                if !before_asset.costs_equal(&after_asset) {
                    diffs.insert(key, Diff::changed(before_asset));
                }
            }
        }
    }

    for (key, before_asset) in before_assets {
        diffs.insert(key, Diff::removed(before_asset));
    }

    let summary = count_kinds(&diffs);
    tracing::debug!(
        op = "diff_asset",
        before_len,
        after_len,
        added = summary.0,
        removed = summary.1,
        changed = summary.2,
        "asset diff computed"
    );

    diffs
}

fn count_kinds(diffs: &AssetDiff) -> (usize, usize, usize) {
    diffs
        .values()
        .fold((0, 0, 0), |(a, r, c), d| match d.kind {
            DiffKind::Added => (a + 1, r, c),
            DiffKind::Removed => (a, r + 1, c),
            DiffKind::Changed => (a, r, c + 1),
        })
}

/// Summarise a diff, looking up the "after" value of changed keys in `after`
///
/// A changed key missing from `after` contributes nothing to the cost delta.
pub fn summarize(diffs: &AssetDiff, after: &AssetSet) -> DiffSummary {
    let mut summary = DiffSummary::default();
    for (key, diff) in diffs {
        let cost = diff.asset.total_cost();
        match diff.kind {
            DiffKind::Added => {
                summary.added += 1;
                summary.added_cost += cost;
            }
            DiffKind::Removed => {
                summary.removed += 1;
                summary.removed_cost += cost;
            }
            DiffKind::Changed => {
                summary.changed += 1;
                if let Some(after_asset) = after.get(key) {
                    summary.changed_cost_delta += after_asset.total_cost() - cost;
                }
            }
        }
    }
    summary
}
