use crate::model::AssetType;
use thiserror::Error;

/// Result type alias using CostLensError
pub type Result<T> = std::result::Result<T, CostLensError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and reporting layers built on top of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Identity
    /// An aggregation specification names a property the asset cannot supply
    InvalidAggregation,
    /// Two assets share a key but disagree on variant or identity fields
    IdentityCollisionMismatch,

    // Structural/Validation
    InvalidInput,

    // Integration/IO
    Io,
    Serialization,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidAggregation => "ERR_INVALID_AGGREGATION",
            ExErrorKind::IdentityCollisionMismatch => "ERR_IDENTITY_COLLISION_MISMATCH",
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }
}

/// Canonical structured error type
///
/// Carries classification fields for programmatic handling and the asset
/// context (key, type, aggregation property) for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    asset_key: Option<String>,
    asset_type: Option<AssetType>,
    property: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            asset_key: None,
            asset_type: None,
            property: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add identity key context
    pub fn with_asset_key(mut self, key: impl Into<String>) -> Self {
        self.asset_key = Some(key.into());
        self
    }

    /// Add asset variant context
    pub fn with_asset_type(mut self, asset_type: AssetType) -> Self {
        self.asset_type = Some(asset_type);
        self
    }

    /// Add aggregation property context
    pub fn with_property(mut self, property: impl Into<String>) -> Self {
        self.property = Some(property.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn asset_key(&self) -> Option<&str> {
        self.asset_key.as_deref()
    }

    pub fn asset_type(&self) -> Option<AssetType> {
        self.asset_type
    }

    pub fn property(&self) -> Option<&str> {
        self.property.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(key) = &self.asset_key {
            write!(f, " (asset_key: {})", key)?;
        }
        if let Some(asset_type) = self.asset_type {
            write!(f, " (asset_type: {})", asset_type)?;
        }
        if let Some(property) = &self.property {
            write!(f, " (property: {})", property)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for costlens operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CostLensError {
    // ===== Identity Errors =====
    /// The aggregation property exists but the asset variant cannot supply it
    #[error("Aggregation property '{property}' is not supported by {asset_type} assets")]
    InvalidAggregation {
        property: String,
        asset_type: AssetType,
    },

    /// The aggregation property string does not name any known property
    #[error("Unknown aggregation property: '{property}'")]
    UnknownAggregationProperty { property: String },

    /// Two assets resolved to the same key but cannot be merged
    #[error("Identity collision on key {key}: {reason}")]
    IdentityCollisionMismatch { key: String, reason: String },

    // ===== Input Errors =====
    /// Snapshot or configuration input is malformed
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    /// JSON (de)serialization failed
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

/// Conversion from CostLensError to ExError
impl From<CostLensError> for ExError {
    fn from(err: CostLensError) -> Self {
        match err {
            CostLensError::InvalidAggregation {
                property,
                asset_type,
            } => ExError::new(ExErrorKind::InvalidAggregation)
                .with_property(property)
                .with_asset_type(asset_type)
                .with_message("Aggregation property not supported by asset variant"),

            CostLensError::UnknownAggregationProperty { property } => {
                ExError::new(ExErrorKind::InvalidAggregation)
                    .with_property(property)
                    .with_op("parse_aggregation_property")
                    .with_message("Unknown aggregation property")
            }

            CostLensError::IdentityCollisionMismatch { key, reason } => {
                ExError::new(ExErrorKind::IdentityCollisionMismatch)
                    .with_asset_key(key)
                    .with_op("insert")
                    .with_message(reason)
            }

            CostLensError::InvalidInput { reason } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(reason)
            }

            CostLensError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for CostLensError {
    fn from(err: serde_json::Error) -> Self {
        CostLensError::Serialization {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_error_kind_codes() {
        let cases = [
            (ExErrorKind::InvalidAggregation, "ERR_INVALID_AGGREGATION"),
            (
                ExErrorKind::IdentityCollisionMismatch,
                "ERR_IDENTITY_COLLISION_MISMATCH",
            ),
            (ExErrorKind::Serialization, "ERR_SERIALIZATION"),
        ];
        for (kind, expected_code) in cases {
            assert_eq!(kind.code(), expected_code, "Wrong code for {:?}", kind);
        }
    }

    #[test]
    fn test_display_includes_context() {
        let err = ExError::new(ExErrorKind::InvalidAggregation)
            .with_op("key")
            .with_property("statefulset")
            .with_asset_type(AssetType::Disk)
            .with_message("unsupported");
        let rendered = err.to_string();
        assert!(rendered.starts_with("[ERR_INVALID_AGGREGATION]"));
        assert!(rendered.contains("in operation 'key'"));
        assert!(rendered.contains("(property: statefulset)"));
        assert!(rendered.contains("(asset_type: Disk)"));
    }

    #[test]
    fn test_every_kind_has_a_distinct_code() {
        let kinds = [
            ExErrorKind::InvalidAggregation,
            ExErrorKind::IdentityCollisionMismatch,
            ExErrorKind::InvalidInput,
            ExErrorKind::Io,
            ExErrorKind::Serialization,
        ];
        let codes: std::collections::BTreeSet<_> = kinds.iter().map(|k| k.code()).collect();
        assert_eq!(codes.len(), kinds.len());
        assert!(!codes.contains("ERR_INTERNAL"));
    }
}
