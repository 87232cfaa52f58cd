//! Human-readable summary renderer for asset diffs.

use crate::asset_set::AssetSet;
use crate::diff::engine::summarize;
use crate::diff::model::{AssetDiff, DiffKind};

/// Render a Markdown summary of an [`AssetDiff`]
///
/// Rows are sorted by key. `after` supplies the post-change cost of
/// `Changed` entries. Informational only; the structured diff is the
/// source of truth.
pub fn render_human_summary(diffs: &AssetDiff, after: &AssetSet) -> String {
    let mut out = String::new();
    let summary = summarize(diffs, after);

    out.push_str("## Asset Diff\n\n");

    if summary.is_empty() {
        out.push_str("_No asset changes detected._\n");
        return out;
    }

    out.push_str(&format!(
        "**Added**: {}  \n**Removed**: {}  \n**Changed**: {}  \n**Net cost delta**: {}\n\n",
        summary.added,
        summary.removed,
        summary.changed,
        signed(summary.net_cost_delta()),
    ));

    out.push_str("| Change | Type | Key | Before | After |\n");
    out.push_str("|---|---|---|---|---|\n");
    for (key, diff) in diffs {
        let cost = diff.asset.total_cost();
        let (before, after_cost) = match diff.kind {
            DiffKind::Added => ("-".to_string(), money(cost)),
            DiffKind::Removed => (money(cost), "-".to_string()),
            DiffKind::Changed => (
                money(cost),
                after
                    .get(key)
                    .map(|a| money(a.total_cost()))
                    .unwrap_or_else(|| "?".to_string()),
            ),
        };
        out.push_str(&format!(
            "| {} | {} | `{}` | {} | {} |\n",
            diff.kind,
            diff.asset.asset_type(),
            key,
            before,
            after_cost
        ));
    }

    // Accumulator detail for changed entries
    let changed: Vec<_> = diffs
        .iter()
        .filter(|(_, d)| d.kind == DiffKind::Changed)
        .filter_map(|(key, d)| after.get(key).map(|a| (key, d.asset.changed_accumulators(a))))
        .collect();
    if !changed.is_empty() {
        out.push_str("\n### Changed Accumulators\n\n");
        for (key, fields) in changed {
            out.push_str(&format!("- `{}`: {}\n", key, fields.join(", ")));
        }
    }

    out
}

fn money(v: f64) -> String {
    format!("{:.2}", v)
}

fn signed(v: f64) -> String {
    if v >= 0.0 {
        format!("+{:.2}", v)
    } else {
        format!("{:.2}", v)
    }
}
