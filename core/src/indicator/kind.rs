use std::fmt;
use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Indicator types recognised by the line heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorKind {
    Url,
    Ip,
    Sha256,
    Sha1,
    Md5,
    Domain,
}

impl IndicatorKind {
    /// Scan order; the first kind found anywhere in a line wins.
    pub const PRIORITY: [IndicatorKind; 6] = [
        IndicatorKind::Url,
        IndicatorKind::Ip,
        IndicatorKind::Sha256,
        IndicatorKind::Sha1,
        IndicatorKind::Md5,
        IndicatorKind::Domain,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            IndicatorKind::Url => "url",
            IndicatorKind::Ip => "ip",
            IndicatorKind::Sha256 => "sha256",
            IndicatorKind::Sha1 => "sha1",
            IndicatorKind::Md5 => "md5",
            IndicatorKind::Domain => "domain",
        }
    }

    /// Byte range of the first occurrence of this kind in `line`.
    pub fn find_in(self, line: &str) -> Option<Range<usize>> {
        let re = pattern(self);
        match self {
            // The address itself is group 1; the outer match includes the
            // surrounding whitespace that stands in for look-around.
            IndicatorKind::Ip => re
                .captures(line)
                .and_then(|c| c.get(1))
                .map(|m| m.range()),
            _ => re.find(line).map(|m| m.range()),
        }
    }
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// First kind, in priority order, that occurs anywhere in `line`, with its span.
pub fn first_match(line: &str) -> Option<(IndicatorKind, Range<usize>)> {
    IndicatorKind::PRIORITY
        .iter()
        .find_map(|kind| kind.find_in(line).map(|range| (*kind, range)))
}

pub fn classify(value: &str) -> Option<IndicatorKind> {
    first_match(value).map(|(kind, _)| kind)
}

static URL_REGEX: OnceLock<Regex> = OnceLock::new();
static IP_REGEX: OnceLock<Regex> = OnceLock::new();
static SHA256_REGEX: OnceLock<Regex> = OnceLock::new();
static SHA1_REGEX: OnceLock<Regex> = OnceLock::new();
static MD5_REGEX: OnceLock<Regex> = OnceLock::new();
static DOMAIN_REGEX: OnceLock<Regex> = OnceLock::new();

// Digits, letters and word boundaries are ASCII-only; `\s`/`\S` stay Unicode.
fn pattern(kind: IndicatorKind) -> &'static Regex {
    match kind {
        IndicatorKind::Url => URL_REGEX.get_or_init(|| {
            Regex::new(r"(?-u:\b)(?i-u:hxxps?|https?)://\S+").expect("URL_REGEX is valid")
        }),
        IndicatorKind::Ip => IP_REGEX.get_or_init(|| {
            Regex::new(r"(?:^|\s)([0-9]{1,3}(?:\.[0-9]{1,3}){3})(?:\s|$)")
                .expect("IP_REGEX is valid")
        }),
        IndicatorKind::Sha256 => SHA256_REGEX.get_or_init(|| {
            Regex::new(r"(?i-u)\b[a-f0-9]{64}\b").expect("SHA256_REGEX is valid")
        }),
        IndicatorKind::Sha1 => SHA1_REGEX.get_or_init(|| {
            Regex::new(r"(?i-u)\b[a-f0-9]{40}\b").expect("SHA1_REGEX is valid")
        }),
        IndicatorKind::Md5 => MD5_REGEX.get_or_init(|| {
            Regex::new(r"(?i-u)\b[a-f0-9]{32}\b").expect("MD5_REGEX is valid")
        }),
        IndicatorKind::Domain => DOMAIN_REGEX.get_or_init(|| {
            Regex::new(
                r"(?i-u)\b(?:[a-z0-9][a-z0-9-]{0,62}\.)+[a-z]{2,63}\b|\b(?:[a-z0-9][a-z0-9-]{0,62}\[\.\])+[a-z]{2,63}\b",
            )
            .expect("DOMAIN_REGEX is valid")
        }),
    }
}
