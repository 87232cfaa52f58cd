//! Asset diff engine.
//!
//! Reconciles a "before" and an "after" [`AssetSet`](crate::AssetSet) into a
//! key-indexed map of classified changes.
//!
//! ## Entry point
//!
//! ```ignore
//! use costlens_core::diff::{diff_asset, render_human_summary};
//!
//! let diffs = diff_asset(before.clone(), after.clone());
//! let summary = render_human_summary(&diffs, &after);
//! ```
//!
//! ## Guarantees
//!
//! - **Order independence**: identity is purely key-based; insertion order
//!   of the inputs never affects the result.
//! - **Exact cost comparison**: any accumulator difference marks a
//!   shared key as changed; unchanged keys are absent from the result.
//! - **Determinism**: results are `BTreeMap`s, so rendering is sorted by key.

pub mod engine;
pub mod human_summary;
pub mod model;

pub use engine::{diff_asset, summarize};
pub use human_summary::render_human_summary;
pub use model::{AssetDiff, Diff, DiffKind, DiffSummary};
