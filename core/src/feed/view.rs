use chrono::{DateTime, Utc};
use serde::Serialize;

use super::models::FeedBatch;
use crate::indicator::truncate_chars;

pub const DEFAULT_KIND_LABEL: &str = "text";

/// One displayable row of the flattened feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedEntry {
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "submittedAt", skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<String>,
    #[serde(skip)]
    pub submitted_ts: Option<DateTime<Utc>>,
}

/// Newest batch first (stable for equal times), items kept in batch order,
/// text truncated to `max_chars` characters.
pub fn flatten(mut batches: Vec<FeedBatch>, max_chars: usize) -> Vec<FeedEntry> {
    batches.sort_by(|a, b| b.sort_key().cmp(&a.sort_key()));

    let mut out = Vec::new();
    for b in batches {
        for it in b.items {
            out.push(FeedEntry {
                value: truncate_chars(&it.value, max_chars),
                description: it.description.map(|d| truncate_chars(&d, max_chars)),
                kind: it.kind.unwrap_or_else(|| DEFAULT_KIND_LABEL.to_string()),
                submitted_at: b.submitted_at.clone(),
                submitted_ts: b.submitted_ts,
            });
        }
    }
    out
}

pub fn recent(mut entries: Vec<FeedEntry>, n: usize) -> Vec<FeedEntry> {
    entries.truncate(n);
    entries
}

/// Case-insensitive substring search over value, description and type,
/// plus an exact (case-insensitive) type filter. Empty filters match all.
pub fn search<'a>(entries: &'a [FeedEntry], query: &str, kind: &str) -> Vec<&'a FeedEntry> {
    let query = query.trim().to_lowercase();
    let kind = kind.trim().to_lowercase();

    entries
        .iter()
        .filter(|e| {
            let hay = format!(
                "{} {} {}",
                e.value,
                e.description.as_deref().unwrap_or(""),
                e.kind
            )
            .to_lowercase();
            let match_q = query.is_empty() || hay.contains(&query);
            let match_t = kind.is_empty() || e.kind.to_lowercase() == kind;
            match_q && match_t
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::models::parse_feed;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample() -> Vec<FeedBatch> {
        parse_feed(&json!([
            {"submittedAt": "2024-01-01T00:00:00Z", "items": [{"value": "old.com", "type": "domain"}]},
            {"items": [{"value": "undated"}]},
            {"timestamp": "2024-03-01T00:00:00Z", "items": [
                {"value": "1.2.3.4", "type": "IP", "description": "Scanner"},
                {"value": "new.com", "type": "domain"}
            ]},
            {"submittedAt": "2024-01-01T00:00:00Z", "items": [{"value": "old2.com"}]}
        ]))
    }

    fn values(entries: &[FeedEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.value.as_str()).collect()
    }

    #[test]
    fn flatten_sorts_newest_first_and_is_stable() {
        let entries = flatten(sample(), 500);
        assert_eq!(
            values(&entries),
            vec!["1.2.3.4", "new.com", "old.com", "old2.com", "undated"]
        );
        assert_eq!(entries[0].submitted_at.as_deref(), Some("2024-03-01T00:00:00Z"));
        assert_eq!(entries[3].kind, "text");
        assert_eq!(entries[4].submitted_at, None);
    }

    #[test]
    fn flatten_truncates_text() {
        let batches = parse_feed(&json!([{"items": [
            {"value": "v".repeat(300), "description": "d".repeat(300)}
        ]}]));
        let entries = flatten(batches, 200);
        assert_eq!(entries[0].value.len(), 200);
        assert_eq!(entries[0].description.as_ref().map(|d| d.len()), Some(200));
    }

    #[test]
    fn recent_takes_first_n() {
        let entries = recent(flatten(sample(), 200), 2);
        assert_eq!(values(&entries), vec!["1.2.3.4", "new.com"]);
    }

    #[test]
    fn search_matches_value_description_and_type() {
        let entries = flatten(sample(), 500);
        let hits: Vec<&str> = search(&entries, "  SCANNER ", "")
            .iter()
            .map(|e| e.value.as_str())
            .collect();
        assert_eq!(hits, vec!["1.2.3.4"]);

        let by_type = search(&entries, "", "ip");
        assert_eq!(by_type.len(), 1);

        let both = search(&entries, "com", "domain");
        assert_eq!(both.len(), 2);

        assert_eq!(search(&entries, "", "").len(), entries.len());
        assert!(search(&entries, "nothing-like-this", "").is_empty());
    }

    #[test]
    fn serializes_with_feed_field_names() {
        let entries = flatten(sample(), 500);
        assert_eq!(
            serde_json::to_value(&entries[0]).unwrap(),
            json!({
                "value": "1.2.3.4",
                "description": "Scanner",
                "type": "IP",
                "submittedAt": "2024-03-01T00:00:00Z"
            })
        );
    }
}
