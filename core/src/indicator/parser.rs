//! Indicator line parser
//!
//! Turns pasted text or file content into [`IndicatorItem`]s. Every non-empty,
//! non-comment line goes through, in order:
//!
//! 1. per-line JSON (object or array), falling through silently on a parse error
//! 2. `value | description` or `value<TAB>description`
//! 3. the first indicator pattern by priority; the rest of the line is the description
//! 4. comma/semicolon separated values
//! 5. the whole line as a single value

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::item::{IndicatorItem, RawIndicator};
use super::kind::first_match;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// Type-aware heuristic with JSON line support.
    #[default]
    Enhanced,
    /// Split on newline, comma and semicolon; no type detection.
    Simple,
}

pub fn parse_with_mode(raw: &str, mode: ParseMode) -> Vec<IndicatorItem> {
    match mode {
        ParseMode::Enhanced => parse_lines(raw),
        ParseMode::Simple => parse_simple(raw),
    }
}

pub fn parse_lines(raw: &str) -> Vec<IndicatorItem> {
    raw.split('\n')
        .map(trim_line)
        .filter(|l| !l.is_empty() && !is_comment(l))
        .flat_map(parse_line)
        .collect()
}

/// Whitespace plus any byte-order mark left over from the input encoding.
fn trim_line(line: &str) -> &str {
    line.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
}

fn is_comment(line: &str) -> bool {
    line.starts_with('#') || line.starts_with("//")
}

/// Parses a single trimmed, non-comment line.
pub fn parse_line(line: &str) -> Vec<IndicatorItem> {
    if looks_like_json(line) {
        match serde_json::from_str::<Value>(line) {
            Ok(v) => return normalize_document(v),
            Err(e) => {
                tracing::debug!(
                    target: "iocdrop.parse",
                    stage = "parse.line.json_fallback",
                    error = %e
                );
            }
        }
    }

    if let Some(item) = split_on_separator(line) {
        return vec![item];
    }

    if let Some((kind, range)) = first_match(line) {
        let value = line[range.clone()].trim();
        let rest = format!("{}{}", &line[..range.start], &line[range.end..]);
        tracing::trace!(
            target: "iocdrop.parse",
            stage = "parse.line.pattern",
            kind = %kind
        );
        return vec![IndicatorItem::with_description(value, rest.trim())];
    }

    let chunks: Vec<&str> = line
        .split([',', ';'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    if chunks.len() > 1 {
        return chunks.into_iter().map(IndicatorItem::new).collect();
    }

    vec![IndicatorItem::new(line)]
}

fn looks_like_json(line: &str) -> bool {
    (line.starts_with('{') && line.ends_with('}')) || (line.starts_with('[') && line.ends_with(']'))
}

fn split_on_separator(line: &str) -> Option<IndicatorItem> {
    let sep = if line.contains('|') {
        '|'
    } else if line.contains('\t') {
        '\t'
    } else {
        return None;
    };
    let (v, d) = line.split_once(sep)?;
    let value = v.trim();
    if value.is_empty() {
        return None;
    }
    Some(IndicatorItem::with_description(value, d.trim()))
}

/// Normalizes a parsed JSON document: arrays per element, anything else as one item.
pub fn normalize_document(v: Value) -> Vec<IndicatorItem> {
    match v {
        Value::Array(values) => values
            .into_iter()
            .filter_map(|x| RawIndicator::from(x).normalize())
            .collect(),
        other => RawIndicator::from(other).normalize().into_iter().collect(),
    }
}

/// Parses a whole `.json` file. Unparseable content yields no items.
pub fn parse_json_document(raw: &str) -> Vec<IndicatorItem> {
    match serde_json::from_str::<Value>(raw) {
        Ok(v) => normalize_document(v),
        Err(e) => {
            tracing::warn!(
                target: "iocdrop.parse",
                stage = "parse.document.invalid_json",
                error = %e
            );
            Vec::new()
        }
    }
}

pub fn parse_simple(raw: &str) -> Vec<IndicatorItem> {
    raw.split(['\n', ',', ';'])
        .map(trim_line)
        .filter(|s| !s.is_empty())
        .map(IndicatorItem::new)
        .collect()
}
