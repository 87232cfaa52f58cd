use crate::errors::{CostLensError, Result};
use crate::label_config::LabelConfig;
use std::str::FromStr;

/// A property an aggregated identity key can group by
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AggregationProperty {
    // Asset fields
    Type,
    Name,
    Cluster,
    ProviderId,
    Category,
    Provider,
    Account,
    Project,
    Service,

    // Logical label fields, resolved through the in-cluster label config
    Department,
    Environment,
    Owner,
    Product,
    Team,

    // Workload fields, resolved through the external label config
    Namespace,
    Controller,
    Deployment,
    StatefulSet,
    DaemonSet,
    Pod,

    /// Raw label lookup (`label:<name>`)
    Label(String),
}

impl AggregationProperty {
    /// Whether the property is a Kubernetes workload association
    pub fn is_workload(&self) -> bool {
        matches!(
            self,
            AggregationProperty::Namespace
                | AggregationProperty::Controller
                | AggregationProperty::Deployment
                | AggregationProperty::StatefulSet
                | AggregationProperty::DaemonSet
                | AggregationProperty::Pod
        )
    }
}

impl std::fmt::Display for AggregationProperty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AggregationProperty::Type => "type",
            AggregationProperty::Name => "name",
            AggregationProperty::Cluster => "cluster",
            AggregationProperty::ProviderId => "providerID",
            AggregationProperty::Category => "category",
            AggregationProperty::Provider => "provider",
            AggregationProperty::Account => "account",
            AggregationProperty::Project => "project",
            AggregationProperty::Service => "service",
            AggregationProperty::Department => "department",
            AggregationProperty::Environment => "environment",
            AggregationProperty::Owner => "owner",
            AggregationProperty::Product => "product",
            AggregationProperty::Team => "team",
            AggregationProperty::Namespace => "namespace",
            AggregationProperty::Controller => "controller",
            AggregationProperty::Deployment => "deployment",
            AggregationProperty::StatefulSet => "statefulset",
            AggregationProperty::DaemonSet => "daemonset",
            AggregationProperty::Pod => "pod",
            AggregationProperty::Label(label) => return write!(f, "label:{label}"),
        };
        f.write_str(name)
    }
}

impl FromStr for AggregationProperty {
    type Err = CostLensError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(label) = s.strip_prefix("label:") {
            if label.is_empty() {
                return Err(CostLensError::UnknownAggregationProperty {
                    property: s.to_string(),
                });
            }
            return Ok(AggregationProperty::Label(label.to_string()));
        }
        let property = match s {
            "type" => AggregationProperty::Type,
            "name" => AggregationProperty::Name,
            "cluster" => AggregationProperty::Cluster,
            "providerID" | "providerid" | "provider_id" => AggregationProperty::ProviderId,
            "category" => AggregationProperty::Category,
            "provider" => AggregationProperty::Provider,
            "account" => AggregationProperty::Account,
            "project" => AggregationProperty::Project,
            "service" => AggregationProperty::Service,
            "department" => AggregationProperty::Department,
            "environment" => AggregationProperty::Environment,
            "owner" => AggregationProperty::Owner,
            "product" => AggregationProperty::Product,
            "team" => AggregationProperty::Team,
            "namespace" => AggregationProperty::Namespace,
            "controller" => AggregationProperty::Controller,
            "deployment" => AggregationProperty::Deployment,
            "statefulset" => AggregationProperty::StatefulSet,
            "daemonset" => AggregationProperty::DaemonSet,
            "pod" => AggregationProperty::Pod,
            _ => {
                return Err(CostLensError::UnknownAggregationProperty {
                    property: s.to_string(),
                })
            }
        };
        Ok(property)
    }
}

/// Aggregation instruction for identity key derivation
///
/// Holds the requested properties (in key order) together with the label
/// configuration used to resolve label-backed properties. Label names are
/// resolved once at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationSpec {
    properties: Vec<AggregationProperty>,
    label_config: LabelConfig,
    label_names: Vec<Option<String>>,
}

impl AggregationSpec {
    /// Create a spec resolved against the default label configuration
    pub fn new(properties: Vec<AggregationProperty>) -> Self {
        Self::with_label_config(properties, LabelConfig::default())
    }

    /// Create a spec resolved against `label_config`
    pub fn with_label_config(
        properties: Vec<AggregationProperty>,
        label_config: LabelConfig,
    ) -> Self {
        let label_names = properties
            .iter()
            .map(|p| label_config.label_for(p))
            .collect();
        Self {
            properties,
            label_config,
            label_names,
        }
    }

    /// Parse a comma-separated property list such as `cluster,label:app`
    ///
    /// # Errors
    ///
    /// Returns `UnknownAggregationProperty` for any unrecognised entry.
    pub fn parse(spec: &str, label_config: LabelConfig) -> Result<Self> {
        let properties = spec
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(AggregationProperty::from_str)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::with_label_config(properties, label_config))
    }

    pub fn properties(&self) -> &[AggregationProperty] {
        &self.properties
    }

    pub fn label_config(&self) -> &LabelConfig {
        &self.label_config
    }

    /// Properties paired with their resolved backing label name
    pub(crate) fn resolved(&self) -> impl Iterator<Item = (&AggregationProperty, Option<&str>)> {
        self.properties
            .iter()
            .zip(self.label_names.iter().map(|n| n.as_deref()))
    }

    /// An empty spec means full identity
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl std::fmt::Display for AggregationSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<String> = self.properties.iter().map(|p| p.to_string()).collect();
        f.write_str(&names.join(","))
    }
}
