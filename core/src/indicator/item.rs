use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const VALUE_KEYS: [&str; 3] = ["value", "ioc", "indicator"];
const DESCRIPTION_KEYS: [&str; 3] = ["description", "note", "desc"];

/// One submitted indicator: the value plus an optional free-text note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorItem {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl IndicatorItem {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            description: None,
        }
    }

    /// Builds an item, dropping the description when it is empty.
    pub fn with_description(value: impl Into<String>, description: impl Into<String>) -> Self {
        let description = description.into();
        Self {
            value: value.into(),
            description: (!description.is_empty()).then_some(description),
        }
    }
}

/// Indicator input as it shows up in JSON documents and JSON lines.
#[derive(Debug, Clone, PartialEq)]
pub enum RawIndicator {
    Text(String),
    Record(Map<String, Value>),
    Other(Value),
}

impl From<Value> for RawIndicator {
    fn from(v: Value) -> Self {
        match v {
            Value::String(s) => RawIndicator::Text(s),
            Value::Object(map) => RawIndicator::Record(map),
            other => RawIndicator::Other(other),
        }
    }
}

impl RawIndicator {
    /// Maps the raw input to an item, or `None` when it carries no usable value.
    pub fn normalize(&self) -> Option<IndicatorItem> {
        match self {
            RawIndicator::Text(s) => {
                let s = s.trim();
                (!s.is_empty()).then(|| IndicatorItem::new(s))
            }
            RawIndicator::Record(map) => {
                let value = first_present(map, &VALUE_KEYS)
                    .map(coerce_text)
                    .unwrap_or_default();
                let value = value.trim();
                if value.is_empty() {
                    return None;
                }
                let description = first_present(map, &DESCRIPTION_KEYS)
                    .map(coerce_text)
                    .unwrap_or_default();
                Some(IndicatorItem::with_description(value, description.trim()))
            }
            RawIndicator::Other(_) => None,
        }
    }
}

fn first_present<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| map.get(*k))
        .find(|v| !v.is_null())
}

/// Textual form of a JSON value: strings verbatim, everything else as compact JSON.
pub fn coerce_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(v: Value) -> RawIndicator {
        RawIndicator::from(v)
    }

    #[test]
    fn text_is_trimmed() {
        assert_eq!(
            raw(json!("  evil.com ")).normalize(),
            Some(IndicatorItem::new("evil.com"))
        );
        assert_eq!(raw(json!("   ")).normalize(), None);
    }

    #[test]
    fn record_uses_alternate_keys() {
        let item = raw(json!({"ioc": "evil.com", "note": "phishing"}))
            .normalize()
            .unwrap();
        assert_eq!(item.value, "evil.com");
        assert_eq!(item.description.as_deref(), Some("phishing"));
    }

    #[test]
    fn record_prefers_value_over_ioc() {
        let item = raw(json!({"ioc": "b", "value": "a", "indicator": "c"}))
            .normalize()
            .unwrap();
        assert_eq!(item.value, "a");
    }

    #[test]
    fn null_field_falls_through_to_next_key() {
        let item = raw(json!({"value": null, "indicator": "1.1.1.1", "description": null, "desc": "x"}))
            .normalize()
            .unwrap();
        assert_eq!(item.value, "1.1.1.1");
        assert_eq!(item.description.as_deref(), Some("x"));
    }

    #[test]
    fn numbers_are_coerced_to_text() {
        let item = raw(json!({"value": 42, "note": true})).normalize().unwrap();
        assert_eq!(item.value, "42");
        assert_eq!(item.description.as_deref(), Some("true"));
    }

    #[test]
    fn empty_record_value_drops_item() {
        assert_eq!(raw(json!({"value": "  ", "note": "x"})).normalize(), None);
        assert_eq!(raw(json!({"note": "x"})).normalize(), None);
    }

    #[test]
    fn blank_description_is_omitted() {
        let item = raw(json!({"value": "a", "description": "  "})).normalize().unwrap();
        assert_eq!(item.description, None);
    }

    #[test]
    fn other_values_are_dropped() {
        assert_eq!(raw(json!(12)).normalize(), None);
        assert_eq!(raw(json!(null)).normalize(), None);
        assert_eq!(raw(json!(["a"])).normalize(), None);
    }

    #[test]
    fn description_is_skipped_when_serializing_none() {
        let s = serde_json::to_string(&IndicatorItem::new("a")).unwrap();
        assert_eq!(s, r#"{"value":"a"}"#);
    }
}
