#![allow(clippy::unwrap_used, clippy::expect_used)]

use costlens_core::label_config::{
    default_label_map, DEPARTMENT_EXTERNAL_LABEL, PRODUCT_EXTERNAL_LABEL,
    STATEFULSET_EXTERNAL_LABEL, TEAM_EXTERNAL_LABEL, TEAM_LABEL,
};
use costlens_core::{AggregationProperty, LabelConfig};

#[test]
fn test_default_config_matches_default_map() {
    let lc = LabelConfig::default();
    let m = lc.to_map();
    assert_eq!(m, default_label_map());
    assert_eq!(m.len(), 18);
    assert_eq!(m[TEAM_LABEL], "team");
    assert_eq!(m[PRODUCT_EXTERNAL_LABEL], "kubernetes_label_app");
}

#[test]
fn test_override_replaces_default() {
    let lc = LabelConfig {
        statefulset_external_label: "kubernetes_sset".to_string(),
        ..Default::default()
    };
    assert_eq!(lc.to_map()[STATEFULSET_EXTERNAL_LABEL], "kubernetes_sset");
}

#[test]
fn test_external_label_derived_from_in_cluster_label() {
    let lc = LabelConfig {
        team_label: "squad".to_string(),
        department_label: "dept".to_string(),
        department_external_label: "billing_dept".to_string(),
        ..Default::default()
    };
    let m = lc.to_map();
    assert_eq!(m[TEAM_LABEL], "squad");
    assert_eq!(m[TEAM_EXTERNAL_LABEL], "kubernetes_label_squad");
    // An explicit external label wins over the derived one
    assert_eq!(m[DEPARTMENT_EXTERNAL_LABEL], "billing_dept");
}

#[test]
fn test_external_query_labels_inverts_external_entries() {
    let lc = LabelConfig {
        statefulset_external_label: "kubernetes_sset".to_string(),
        ..Default::default()
    };
    let q = lc.external_query_labels();

    assert_eq!(q["kubernetes_sset"], STATEFULSET_EXTERNAL_LABEL);
    assert_eq!(q["kubernetes_namespace"], "namespace_external_label");
    assert!(!q.contains_key("team"), "in-cluster labels are not query columns");
    assert_eq!(q.len(), 13);
}

#[test]
fn test_allocation_property_labels() {
    let lc = LabelConfig {
        statefulset_external_label: "kubernetes_sset".to_string(),
        ..Default::default()
    };
    let labels = lc.allocation_property_labels();

    assert_eq!(labels["statefulset"], "kubernetes_sset");
    assert_eq!(labels["namespace"], "kubernetes_namespace");
    assert_eq!(labels["product"], "kubernetes_label_app");
    assert_eq!(labels["label:team"], "team");
    assert_eq!(labels["label:kubernetes_label_owner"], "kubernetes_label_owner");
}

#[test]
fn test_label_for_routes_logical_and_workload_fields() {
    let lc = LabelConfig {
        environment_label: "stage".to_string(),
        pod_external_label: "k8s_pod".to_string(),
        ..Default::default()
    };
    assert_eq!(lc.label_for(&AggregationProperty::Environment).as_deref(), Some("stage"));
    assert_eq!(lc.label_for(&AggregationProperty::Pod).as_deref(), Some("k8s_pod"));
    assert_eq!(lc.label_for(&AggregationProperty::Owner).as_deref(), Some("owner"));
    assert_eq!(lc.label_for(&AggregationProperty::Account), None);
}

#[test]
fn test_deserializes_partial_config() {
    let lc: LabelConfig = serde_json::from_str(r#"{"team_label": "squad"}"#).unwrap();
    assert_eq!(lc.team_label, "squad");
    assert!(lc.owner_label.is_empty());
}
