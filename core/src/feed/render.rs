use chrono::{DateTime, Local, Utc};

use super::view::FeedEntry;

pub const EMPTY_FEED_MESSAGE: &str = "No entries yet. Be the first to submit an indicator.";
pub const NO_RESULTS_MESSAGE: &str = "No results for the given filters.";
pub const FEED_ERROR_MESSAGE: &str = "Failed to load indicators.";

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

pub fn format_relative_time(ts: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = (now - ts).num_seconds();
    if diff < 60 {
        "a few seconds ago".to_string()
    } else if diff < 3_600 {
        format!("{} min ago", diff / 60)
    } else if diff < 86_400 {
        format!("{} h ago", diff / 3_600)
    } else {
        ts.with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
    }
}

fn when(entry: &FeedEntry, now: DateTime<Utc>) -> String {
    entry
        .submitted_ts
        .map(|ts| format_relative_time(ts, now))
        .unwrap_or_default()
}

pub fn render_text(entries: &[&FeedEntry], now: DateTime<Utc>) -> String {
    let mut out = String::new();
    for (idx, e) in entries.iter().enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        let stamp = when(e, now);
        if stamp.is_empty() {
            out.push_str(&format!("[{}]\n", e.kind.to_uppercase()));
        } else {
            out.push_str(&format!("[{}] {}\n", e.kind.to_uppercase(), stamp));
        }
        out.push_str(&format!("  {}\n", e.value));
        if let Some(d) = e.description.as_deref() {
            out.push_str(&format!("  {}\n", d));
        }
    }
    out
}

pub fn render_html(entries: &[&FeedEntry], now: DateTime<Utc>) -> String {
    entries
        .iter()
        .map(|e| {
            let desc_html = e
                .description
                .as_deref()
                .map(|d| {
                    format!(
                        "\n  <p class=\"text-xs text-gray-400 mt-2 break-words\">{}</p>",
                        escape_html(d)
                    )
                })
                .unwrap_or_default();
            format!(
                "<div class=\"bg-gray-900 p-6 rounded-xl border border-gray-800\">\n  \
                 <div class=\"flex justify-between items-center mb-2\">\n    \
                 <span class=\"text-xs text-gray-500\">{}</span>\n    \
                 <span class=\"text-[10px] px-2 py-0.5 rounded bg-gray-800 text-gray-300 border border-gray-700\">{}</span>\n  \
                 </div>\n  \
                 <p class=\"font-mono text-sm text-blue-400 break-all\">{}</p>{}\n\
                 </div>\n",
                escape_html(&when(e, now)),
                escape_html(&e.kind.to_uppercase()),
                escape_html(&e.value),
                desc_html
            )
        })
        .collect()
}

/// Renders entries as `text`, `json` or `html`.
pub fn render_entries(
    entries: &[&FeedEntry],
    format: &str,
    now: DateTime<Utc>,
) -> Result<String, String> {
    match format {
        "text" => Ok(render_text(entries, now)),
        "html" => Ok(render_html(entries, now)),
        "json" => serde_json::to_string_pretty(entries)
            .map(|s| s + "\n")
            .map_err(|e| e.to_string()),
        other => Err(format!("Unknown format: {}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn entry(value: &str, desc: Option<&str>, ts: Option<DateTime<Utc>>) -> FeedEntry {
        FeedEntry {
            value: value.to_string(),
            description: desc.map(str::to_string),
            kind: "url".to_string(),
            submitted_at: ts.map(|t| t.to_rfc3339()),
            submitted_ts: ts,
        }
    }

    #[test]
    fn escapes_all_special_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn relative_time_buckets() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        assert_eq!(format_relative_time(now - Duration::seconds(59), now), "a few seconds ago");
        assert_eq!(format_relative_time(now + Duration::seconds(30), now), "a few seconds ago");
        assert_eq!(format_relative_time(now - Duration::seconds(60), now), "1 min ago");
        assert_eq!(format_relative_time(now - Duration::seconds(3_599), now), "59 min ago");
        assert_eq!(format_relative_time(now - Duration::hours(5), now), "5 h ago");
        let old = now - Duration::days(3);
        assert_eq!(
            format_relative_time(old, now),
            old.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
        );
    }

    #[test]
    fn html_escapes_user_content() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let e = entry("http://x/<script>", Some("a & b"), Some(now));
        let html = render_html(&[&e], now);
        assert!(html.contains("http://x/&lt;script&gt;"));
        assert!(html.contains("a &amp; b"));
        assert!(html.contains(">URL<"));
        assert!(html.contains("a few seconds ago"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn html_omits_missing_description() {
        let now = Utc::now();
        let html = render_html(&[&entry("v", None, None)], now);
        assert!(!html.contains("text-gray-400 mt-2"));
    }

    #[test]
    fn text_layout() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let a = entry("evil.com", Some("phish"), Some(now - Duration::minutes(5)));
        let b = entry("1.2.3.4", None, None);
        assert_eq!(
            render_text(&[&a, &b], now),
            "[URL] 5 min ago\n  evil.com\n  phish\n\n[URL]\n  1.2.3.4\n"
        );
    }

    #[test]
    fn unknown_format_is_an_error() {
        assert!(render_entries(&[], "markdown", Utc::now()).is_err());
        assert_eq!(render_entries(&[], "json", Utc::now()).unwrap(), "[]\n");
    }
}
