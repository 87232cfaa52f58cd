use serde::{Deserialize, Serialize};

/// Descriptive identity fields of an asset
///
/// `name`, `cluster` and `provider_id` (together with the variant) form the
/// full identity of a resource. The remaining fields are used for grouping.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetProperties {
    pub category: String,
    pub provider: String,
    pub account: String,
    pub project: String,
    pub service: String,
    pub cluster: String,
    pub name: String,
    #[serde(rename = "providerID", alias = "provider_id")]
    pub provider_id: String,
}

impl AssetProperties {
    /// Clear every field whose value differs from `other`
    pub(crate) fn retain_shared(&mut self, other: &AssetProperties) {
        let fields = [
            (&mut self.category, &other.category),
            (&mut self.provider, &other.provider),
            (&mut self.account, &other.account),
            (&mut self.project, &other.project),
            (&mut self.service, &other.service),
            (&mut self.cluster, &other.cluster),
            (&mut self.name, &other.name),
            (&mut self.provider_id, &other.provider_id),
        ];
        for (mine, theirs) in fields {
            if mine != theirs {
                mine.clear();
            }
        }
    }
}
