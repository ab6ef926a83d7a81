use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

use crate::indicator::coerce_text;

/// One submission event as read from the feed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedBatch {
    pub items: Vec<FeedItem>,
    /// `submittedAt`, or `timestamp` when that is missing, as written in the feed.
    pub submitted_at: Option<String>,
    pub submitted_ts: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeedItem {
    pub value: String,
    pub description: Option<String>,
    pub kind: Option<String>,
}

impl FeedBatch {
    pub fn from_value(v: &Value) -> Option<Self> {
        let obj = v.as_object()?;
        let items = obj
            .get("items")
            .and_then(Value::as_array)
            .map(|arr| arr.iter().filter_map(FeedItem::from_value).collect())
            .unwrap_or_default();

        let stamp = ["submittedAt", "timestamp"]
            .iter()
            .filter_map(|k| obj.get(*k))
            .find(|v| is_truthy(v));

        Some(Self {
            items,
            submitted_at: stamp.map(coerce_text),
            submitted_ts: stamp.and_then(parse_timestamp),
        })
    }

    /// Batches without a usable time sort as the Unix epoch.
    pub fn sort_key(&self) -> DateTime<Utc> {
        self.submitted_ts.unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }
}

impl FeedItem {
    /// Scalars and arrays become blank entries; only `null` is dropped.
    pub fn from_value(v: &Value) -> Option<Self> {
        if v.is_null() {
            return None;
        }
        let text = |key: &str| {
            v.get(key)
                .filter(|v| is_truthy(v))
                .map(coerce_text)
        };
        Some(Self {
            value: text("value").unwrap_or_default(),
            description: text("description"),
            kind: text("type"),
        })
    }
}

fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        _ => true,
    }
}

/// The feed must be a JSON array of batch objects; anything else is an empty feed.
pub fn parse_feed(doc: &Value) -> Vec<FeedBatch> {
    doc.as_array()
        .map(|arr| arr.iter().filter_map(FeedBatch::from_value).collect())
        .unwrap_or_default()
}

/// RFC 3339, naive ISO date-times (taken as UTC), plain dates, or epoch milliseconds.
pub fn parse_timestamp(v: &Value) -> Option<DateTime<Utc>> {
    match v {
        Value::Number(n) => n
            .as_i64()
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
        Value::String(s) => parse_timestamp_str(s.trim()),
        _ => None,
    }
}

fn parse_timestamp_str(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn batch_prefers_submitted_at_over_timestamp() {
        let b = FeedBatch::from_value(&json!({
            "items": [],
            "submittedAt": "2024-05-01T10:00:00Z",
            "timestamp": "2020-01-01T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(b.submitted_at.as_deref(), Some("2024-05-01T10:00:00Z"));
        assert_eq!(
            b.submitted_ts,
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap())
        );
    }

    #[test]
    fn batch_falls_back_to_timestamp() {
        let b = FeedBatch::from_value(&json!({"items": [], "submittedAt": "", "timestamp": 1714557600000i64}))
            .unwrap();
        assert_eq!(b.submitted_at.as_deref(), Some("1714557600000"));
        assert_eq!(
            b.submitted_ts,
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap())
        );
    }

    #[test]
    fn missing_items_and_unparseable_time() {
        let b = FeedBatch::from_value(&json!({"submittedAt": "yesterday"})).unwrap();
        assert!(b.items.is_empty());
        assert_eq!(b.submitted_at.as_deref(), Some("yesterday"));
        assert_eq!(b.sort_key(), DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn items_are_coerced_leniently() {
        let b = FeedBatch::from_value(&json!({"items": [
            {"value": 123, "description": "", "type": "ip"},
            {"description": "no value"},
            "not an object",
            null
        ]}))
        .unwrap();
        assert_eq!(b.items.len(), 3);
        assert_eq!(b.items[0].value, "123");
        assert_eq!(b.items[0].description, None);
        assert_eq!(b.items[0].kind.as_deref(), Some("ip"));
        assert_eq!(b.items[1].value, "");
        assert_eq!(b.items[1].description.as_deref(), Some("no value"));
        assert_eq!(
            b.items[2],
            FeedItem {
                value: String::new(),
                description: None,
                kind: None,
            }
        );
    }

    #[test]
    fn non_array_feed_is_empty() {
        assert!(parse_feed(&json!({"items": []})).is_empty());
        assert_eq!(parse_feed(&json!([{"items": []}, 5])).len(), 1);
    }

    #[test]
    fn naive_timestamps_are_utc() {
        assert_eq!(
            parse_timestamp(&json!("2024-05-01T10:00:00.250")),
            Some(Utc.timestamp_millis_opt(1714557600250).unwrap())
        );
        assert_eq!(
            parse_timestamp(&json!("2024-05-01")),
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_timestamp(&json!(true)), None);
    }
}
