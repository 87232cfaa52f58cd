//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Asset identifiers
pub const FIELD_ASSET_KEY: &str = "asset_key";
pub const FIELD_ASSET_TYPE: &str = "asset_type";
pub const FIELD_PROPERTY: &str = "property";

// Collection sizes
pub const FIELD_BEFORE_LEN: &str = "before_len";
pub const FIELD_AFTER_LEN: &str = "after_len";
pub const FIELD_ADDED: &str = "added";
pub const FIELD_REMOVED: &str = "removed";
pub const FIELD_CHANGED: &str = "changed";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
