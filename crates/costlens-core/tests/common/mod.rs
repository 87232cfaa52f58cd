use chrono::{DateTime, Duration, TimeZone, Utc};
use costlens_core::{Asset, Cloud, Disk, Node, Window};

/// Fixed one-day observation period used across tests
#[allow(dead_code)]
pub fn day() -> (DateTime<Utc>, DateTime<Utc>, Window) {
    let end = Utc.with_ymd_and_hms(2026, 3, 2, 0, 0, 0).unwrap();
    let start = end - Duration::days(1);
    (start, end, Window::closed(start, end))
}

/// Node in `cluster1` with provider id `123abc`
#[allow(dead_code)]
pub fn node(name: &str) -> Asset {
    let (start, end, window) = day();
    Node::new(name, "cluster1", "123abc", start, end, window).into()
}

/// Node with its CPU cost set
#[allow(dead_code)]
pub fn node_with_cpu_cost(name: &str, cpu_cost: f64) -> Asset {
    let mut asset = node(name);
    if let Some(n) = asset.as_node_mut() {
        n.cpu_cost = cpu_cost;
    }
    asset
}

/// Disk in `cluster1` with provider id `123abc`
#[allow(dead_code)]
pub fn disk(name: &str) -> Asset {
    let (start, end, window) = day();
    Disk::new(name, "cluster1", "123abc", start, end, window).into()
}

/// Cloud line item carrying the given labels
#[allow(dead_code)]
pub fn cloud(name: &str, cost: f64, labels: &[(&str, &str)]) -> Asset {
    let (start, end, window) = day();
    let mut c = Cloud::new(name, "cluster1", name, start, end, window);
    c.cost = cost;
    for (k, v) in labels {
        c.base.labels.set(*k, *v);
    }
    c.into()
}
