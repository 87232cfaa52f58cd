//! Identity key derivation
//!
//! A key decides when two asset observations are the same resource. Without
//! an aggregation specification the key is the full identity
//! (`type/name/cluster/providerID`); with one, the key groups assets by the
//! requested properties so several resources share a bucket.

pub mod aggregation;
pub mod key;

pub use aggregation::{AggregationProperty, AggregationSpec};
pub use key::{key, UNALLOCATED};
