use serde::{Deserialize, Serialize};

use super::item::IndicatorItem;
use crate::config::LimitsConfig;

/// Body posted to the ingestion endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    pub items: Vec<IndicatorItem>,
}

/// Applies the submission caps: drops blank values, keeps at most
/// `max_items`, trims and truncates values and descriptions.
pub fn sanitize(items: Vec<IndicatorItem>, limits: &LimitsConfig) -> Vec<IndicatorItem> {
    items
        .into_iter()
        .filter(|it| !it.value.trim().is_empty())
        .take(limits.max_items)
        .map(|it| {
            let value = truncate_chars(it.value.trim(), limits.max_value_chars);
            let description = it
                .description
                .as_deref()
                .map(|d| truncate_chars(d.trim(), limits.max_description_chars))
                .unwrap_or_default();
            IndicatorItem::with_description(value, description)
        })
        .collect()
}

pub fn build_payload(items: Vec<IndicatorItem>, limits: &LimitsConfig) -> Option<SubmissionPayload> {
    let items = sanitize(items, limits);
    if items.is_empty() {
        None
    } else {
        Some(SubmissionPayload { items })
    }
}

/// Keeps the first `max` characters (not bytes).
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}
