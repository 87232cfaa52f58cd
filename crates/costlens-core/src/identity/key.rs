use super::{AggregationProperty, AggregationSpec};
use crate::errors::{CostLensError, Result};
use crate::model::Asset;
use std::borrow::Cow;

/// Key segment used when a label-backed property has no value on the asset
///
/// An asset whose label literally holds this value lands in the same
/// bucket as one missing the label; the value is reserved.
pub const UNALLOCATED: &str = "__unallocated__";

const SEPARATOR: char = '/';

/// Derive the identity key of `asset`
///
/// With no aggregation (or an empty one) the key is the full identity
/// `type/name/cluster/providerID`. Otherwise each requested property
/// contributes one segment, in request order. Segments are escaped so
/// that distinct field tuples never produce the same key.
///
/// # Errors
///
/// Returns `InvalidAggregation` if the asset variant cannot supply one of
/// the requested properties.
pub fn key(asset: &Asset, aggregation: Option<&AggregationSpec>) -> Result<String> {
    let spec = match aggregation {
        Some(spec) if !spec.is_empty() => spec,
        _ => return Ok(identity_key(asset)),
    };

    let mut segments = Vec::with_capacity(spec.properties().len());
    for (property, label_name) in spec.resolved() {
        let value = resolve(asset, property, label_name).map_err(|e| {
            tracing::debug!(
                property = %property,
                asset_type = %asset.asset_type(),
                asset_name = asset.name(),
                "aggregation property unsupported"
            );
            e
        })?;
        segments.push(value);
    }
    Ok(join(segments))
}

fn identity_key(asset: &Asset) -> String {
    join([
        Cow::Borrowed(asset.asset_type().as_str()),
        Cow::Borrowed(asset.name()),
        Cow::Borrowed(asset.cluster()),
        Cow::Borrowed(asset.provider_id()),
    ])
}

fn resolve<'a>(
    asset: &'a Asset,
    property: &AggregationProperty,
    label_name: Option<&str>,
) -> Result<Cow<'a, str>> {
    if !asset.supports(property) {
        return Err(CostLensError::InvalidAggregation {
            property: property.to_string(),
            asset_type: asset.asset_type(),
        });
    }

    let props = asset.properties();
    let value = match property {
        AggregationProperty::Type => asset.asset_type().as_str(),
        AggregationProperty::Name => props.name.as_str(),
        AggregationProperty::Cluster => props.cluster.as_str(),
        AggregationProperty::ProviderId => props.provider_id.as_str(),
        AggregationProperty::Category => props.category.as_str(),
        AggregationProperty::Provider => props.provider.as_str(),
        AggregationProperty::Account => props.account.as_str(),
        AggregationProperty::Project => props.project.as_str(),
        AggregationProperty::Service => props.service.as_str(),
        _ => {
            let value = label_name
                .and_then(|name| asset.labels().get(name))
                .filter(|v| !v.is_empty());
            return Ok(match value {
                Some(v) => Cow::Borrowed(v),
                None => Cow::Borrowed(UNALLOCATED),
            });
        }
    };
    Ok(Cow::Borrowed(value))
}

fn join<'a>(segments: impl IntoIterator<Item = Cow<'a, str>>) -> String {
    let mut out = String::new();
    for (i, segment) in segments.into_iter().enumerate() {
        if i > 0 {
            out.push(SEPARATOR);
        }
        out.push_str(&escape_segment(&segment));
    }
    out
}

/// Escape `%` and `/` so the joined key is injective
fn escape_segment(segment: &str) -> Cow<'_, str> {
    if !segment.contains(|c: char| c == '%' || c == SEPARATOR) {
        return Cow::Borrowed(segment);
    }
    let mut escaped = String::with_capacity(segment.len() + 4);
    for c in segment.chars() {
        match c {
            '%' => escaped.push_str("%25"),
            SEPARATOR => escaped.push_str("%2F"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_segment() {
        assert_eq!(escape_segment("node1"), "node1");
        assert_eq!(escape_segment("a/b"), "a%2Fb");
        assert_eq!(escape_segment("50%"), "50%25");
        assert_eq!(escape_segment("%2F"), "%252F");
    }

    #[test]
    fn test_join_keeps_empty_segments() {
        let joined = join([Cow::Borrowed("Node"), Cow::Borrowed(""), Cow::Borrowed("x")]);
        assert_eq!(joined, "Node//x");
    }
}
