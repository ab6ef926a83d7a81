//! Indicator model, type patterns, line parser and submission sanitizer.

pub mod item;
pub mod kind;
pub mod parser;
pub mod sanitize;

pub use item::{coerce_text, IndicatorItem, RawIndicator};
pub use kind::{classify, first_match, IndicatorKind};
pub use parser::{
    normalize_document, parse_json_document, parse_line, parse_lines, parse_simple,
    parse_with_mode, ParseMode,
};
pub use sanitize::{build_payload, sanitize, truncate_chars, SubmissionPayload};
