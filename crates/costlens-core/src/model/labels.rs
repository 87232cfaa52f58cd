use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Label set attached to an asset
///
/// Backed by a `BTreeMap` so serialization and iteration are deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetLabels {
    data: BTreeMap<String, String>,
}

impl AssetLabels {
    pub fn new() -> Self {
        Self {
            data: BTreeMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.data.get(name).map(String::as_str)
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.data.insert(name.into(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.data.remove(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.data.iter()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Keep only labels present in both sets with the same value
    pub(crate) fn retain_shared(&mut self, other: &AssetLabels) {
        self.data.retain(|name, value| other.data.get(name) == Some(value));
    }
}

impl From<BTreeMap<String, String>> for AssetLabels {
    fn from(data: BTreeMap<String, String>) -> Self {
        Self { data }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AssetLabels {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            data: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
