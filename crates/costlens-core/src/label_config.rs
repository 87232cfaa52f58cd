//! Label configuration
//!
//! Maps logical reporting fields (department, team, statefulset, ...) to
//! the label names that actually appear on assets. In-cluster labels use the
//! `*_label` entries; cloud billing exports use the `*_external_label`
//! entries.
//!
//! Defaults are built fresh by every call, so no caller can observe
//! another caller's overrides.

use crate::identity::AggregationProperty;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEPARTMENT_LABEL: &str = "department_label";
pub const ENVIRONMENT_LABEL: &str = "environment_label";
pub const OWNER_LABEL: &str = "owner_label";
pub const PRODUCT_LABEL: &str = "product_label";
pub const TEAM_LABEL: &str = "team_label";
pub const CLUSTER_EXTERNAL_LABEL: &str = "cluster_external_label";
pub const NAMESPACE_EXTERNAL_LABEL: &str = "namespace_external_label";
pub const CONTROLLER_EXTERNAL_LABEL: &str = "controller_external_label";
pub const DAEMONSET_EXTERNAL_LABEL: &str = "daemonset_external_label";
pub const DEPLOYMENT_EXTERNAL_LABEL: &str = "deployment_external_label";
pub const STATEFULSET_EXTERNAL_LABEL: &str = "statefulset_external_label";
pub const SERVICE_EXTERNAL_LABEL: &str = "service_external_label";
pub const POD_EXTERNAL_LABEL: &str = "pod_external_label";
pub const DEPARTMENT_EXTERNAL_LABEL: &str = "department_external_label";
pub const ENVIRONMENT_EXTERNAL_LABEL: &str = "environment_external_label";
pub const OWNER_EXTERNAL_LABEL: &str = "owner_external_label";
pub const PRODUCT_EXTERNAL_LABEL: &str = "product_external_label";
pub const TEAM_EXTERNAL_LABEL: &str = "team_external_label";

/// Prefix cloud exports put in front of a propagated Kubernetes label
pub const EXTERNAL_LABEL_PREFIX: &str = "kubernetes_label_";

/// Label configuration with empty strings meaning "use the default"
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    pub department_label: String,
    pub environment_label: String,
    pub owner_label: String,
    pub product_label: String,
    pub team_label: String,
    pub cluster_external_label: String,
    pub namespace_external_label: String,
    pub controller_external_label: String,
    pub daemonset_external_label: String,
    pub deployment_external_label: String,
    pub statefulset_external_label: String,
    pub service_external_label: String,
    pub pod_external_label: String,
    pub department_external_label: String,
    pub environment_external_label: String,
    pub owner_external_label: String,
    pub product_external_label: String,
    pub team_external_label: String,
}

/// Fresh map of every configuration key to its default label name
pub fn default_label_map() -> BTreeMap<String, String> {
    [
        (DEPARTMENT_LABEL, "department"),
        (ENVIRONMENT_LABEL, "env"),
        (OWNER_LABEL, "owner"),
        (PRODUCT_LABEL, "app"),
        (TEAM_LABEL, "team"),
        (CLUSTER_EXTERNAL_LABEL, "kubernetes_cluster"),
        (NAMESPACE_EXTERNAL_LABEL, "kubernetes_namespace"),
        (CONTROLLER_EXTERNAL_LABEL, "kubernetes_controller"),
        (DAEMONSET_EXTERNAL_LABEL, "kubernetes_daemonset"),
        (DEPLOYMENT_EXTERNAL_LABEL, "kubernetes_deployment"),
        (STATEFULSET_EXTERNAL_LABEL, "kubernetes_statefulset"),
        (SERVICE_EXTERNAL_LABEL, "kubernetes_service"),
        (POD_EXTERNAL_LABEL, "kubernetes_pod"),
        (DEPARTMENT_EXTERNAL_LABEL, "kubernetes_label_department"),
        (ENVIRONMENT_EXTERNAL_LABEL, "kubernetes_label_env"),
        (OWNER_EXTERNAL_LABEL, "kubernetes_label_owner"),
        (PRODUCT_EXTERNAL_LABEL, "kubernetes_label_app"),
        (TEAM_EXTERNAL_LABEL, "kubernetes_label_team"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

impl LabelConfig {
    /// Resolved configuration as a flat map, defaults filled in
    ///
    /// An unset `<x>_external_label` whose `<x>_label` is set resolves to
    /// `kubernetes_label_<x_label>`.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        let mut m = default_label_map();

        let overrides = [
            (DEPARTMENT_LABEL, &self.department_label),
            (ENVIRONMENT_LABEL, &self.environment_label),
            (OWNER_LABEL, &self.owner_label),
            (PRODUCT_LABEL, &self.product_label),
            (TEAM_LABEL, &self.team_label),
            (CLUSTER_EXTERNAL_LABEL, &self.cluster_external_label),
            (NAMESPACE_EXTERNAL_LABEL, &self.namespace_external_label),
            (CONTROLLER_EXTERNAL_LABEL, &self.controller_external_label),
            (DAEMONSET_EXTERNAL_LABEL, &self.daemonset_external_label),
            (DEPLOYMENT_EXTERNAL_LABEL, &self.deployment_external_label),
            (STATEFULSET_EXTERNAL_LABEL, &self.statefulset_external_label),
            (SERVICE_EXTERNAL_LABEL, &self.service_external_label),
            (POD_EXTERNAL_LABEL, &self.pod_external_label),
        ];
        for (key, value) in overrides {
            if !value.is_empty() {
                m.insert(key.to_string(), value.clone());
            }
        }

        let derived = [
            (
                DEPARTMENT_EXTERNAL_LABEL,
                &self.department_external_label,
                &self.department_label,
            ),
            (
                ENVIRONMENT_EXTERNAL_LABEL,
                &self.environment_external_label,
                &self.environment_label,
            ),
            (
                OWNER_EXTERNAL_LABEL,
                &self.owner_external_label,
                &self.owner_label,
            ),
            (
                PRODUCT_EXTERNAL_LABEL,
                &self.product_external_label,
                &self.product_label,
            ),
            (TEAM_EXTERNAL_LABEL, &self.team_external_label, &self.team_label),
        ];
        for (key, external, base) in derived {
            if !external.is_empty() {
                m.insert(key.to_string(), external.clone());
            } else if !base.is_empty() {
                m.insert(key.to_string(), format!("{EXTERNAL_LABEL_PREFIX}{base}"));
            }
        }

        m
    }

    /// External labels as `query column → configuration key`
    ///
    /// e.g. `statefulset_external_label = "kubernetes_sset"` yields
    /// `"kubernetes_sset" → "statefulset_external_label"`.
    pub fn external_query_labels(&self) -> BTreeMap<String, String> {
        self.to_map()
            .into_iter()
            .filter(|(key, query)| key.ends_with("external_label") && !query.is_empty())
            .map(|(key, query)| (query, key))
            .collect()
    }

    /// Resource properties mapped to the label name that carries them
    ///
    /// Workload resources map by name (`statefulset → kubernetes_sset`);
    /// every other configured label maps as `label:<name> → <name>`.
    pub fn allocation_property_labels(&self) -> BTreeMap<String, String> {
        let mut labels = BTreeMap::new();
        for (kind, name) in self.to_map() {
            if name.is_empty() {
                continue;
            }
            let property = match kind.as_str() {
                NAMESPACE_EXTERNAL_LABEL => "namespace".to_string(),
                CLUSTER_EXTERNAL_LABEL => "cluster".to_string(),
                CONTROLLER_EXTERNAL_LABEL => "controller".to_string(),
                PRODUCT_EXTERNAL_LABEL => "product".to_string(),
                SERVICE_EXTERNAL_LABEL => "service".to_string(),
                DEPLOYMENT_EXTERNAL_LABEL => "deployment".to_string(),
                STATEFULSET_EXTERNAL_LABEL => "statefulset".to_string(),
                DAEMONSET_EXTERNAL_LABEL => "daemonset".to_string(),
                POD_EXTERNAL_LABEL => "pod".to_string(),
                _ => format!("label:{name}"),
            };
            labels.insert(property, name);
        }
        labels
    }

    /// Label name backing a label-derived aggregation property
    ///
    /// Logical fields resolve through their in-cluster `*_label` entry,
    /// workload fields through [`LabelConfig::allocation_property_labels`],
    /// raw labels resolve to themselves. Asset fields have no backing label.
    pub fn label_for(&self, property: &AggregationProperty) -> Option<String> {
        if property.is_workload() {
            return self
                .allocation_property_labels()
                .remove(&property.to_string());
        }
        let config_key = match property {
            AggregationProperty::Label(name) => return Some(name.clone()),
            AggregationProperty::Department => DEPARTMENT_LABEL,
            AggregationProperty::Environment => ENVIRONMENT_LABEL,
            AggregationProperty::Owner => OWNER_LABEL,
            AggregationProperty::Product => PRODUCT_LABEL,
            AggregationProperty::Team => TEAM_LABEL,
            _ => return None,
        };
        self.to_map().remove(config_key)
    }
}
