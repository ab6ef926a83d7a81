use std::path::Path;

use crate::error::InputError;
use crate::indicator::{parse_json_document, parse_with_mode, IndicatorItem, ParseMode};

/// An uploaded file: its name decides JSON vs line parsing.
#[derive(Debug, Clone)]
pub struct InputFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl InputFile {
    pub fn read(path: &Path) -> Result<Self, InputError> {
        let bytes = std::fs::read(path).map_err(|source| InputError::ReadFile {
            path: path.display().to_string(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self { name, bytes })
    }

    pub fn is_json(&self) -> bool {
        self.name.to_lowercase().ends_with(".json")
    }

    pub fn text(&self) -> String {
        decode_bytes(&self.bytes)
    }
}

/// UTF-8 with BOM sniffing (UTF-8/UTF-16LE/UTF-16BE); invalid sequences are replaced.
pub fn decode_bytes(bytes: &[u8]) -> String {
    let (text, encoding, had_errors) = encoding_rs::UTF_8.decode(bytes);
    if had_errors {
        tracing::warn!(
            target: "iocdrop.input",
            stage = "input.decode.lossy",
            encoding = encoding.name()
        );
    }
    text.into_owned()
}

/// Parses manual text first, then each file in order.
pub fn collect_items(
    text: Option<&str>,
    files: &[InputFile],
    mode: ParseMode,
) -> Result<Vec<IndicatorItem>, InputError> {
    let text = text.map(str::trim).filter(|t| !t.is_empty());
    if text.is_none() && files.is_empty() {
        return Err(InputError::Empty);
    }

    let mut items = Vec::new();
    if let Some(text) = text {
        items.extend(parse_with_mode(text, mode));
    }

    for f in files {
        let raw = f.text();
        let parsed = if f.is_json() {
            parse_json_document(&raw)
        } else {
            parse_with_mode(&raw, mode)
        };
        tracing::debug!(
            target: "iocdrop.input",
            stage = "input.file.parsed",
            file = %f.name,
            items = parsed.len()
        );
        items.extend(parsed);
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn file(name: &str, content: &[u8]) -> InputFile {
        InputFile {
            name: name.to_string(),
            bytes: content.to_vec(),
        }
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(
            collect_items(Some("   "), &[], ParseMode::Enhanced),
            Err(InputError::Empty)
        ));
        assert!(matches!(
            collect_items(None, &[], ParseMode::Enhanced),
            Err(InputError::Empty)
        ));
    }

    #[test]
    fn text_then_files_in_order() {
        let files = vec![
            file("list.txt", b"b.com\n"),
            file("FEED.JSON", br#"[{"value":"c.com","note":"n"}]"#),
        ];
        let items = collect_items(Some("a.com"), &files, ParseMode::Enhanced).unwrap();
        assert_eq!(
            items,
            vec![
                IndicatorItem::new("a.com"),
                IndicatorItem::new("b.com"),
                IndicatorItem::with_description("c.com", "n"),
            ]
        );
    }

    #[test]
    fn broken_json_file_yields_nothing() {
        let files = vec![file("x.json", b"1.2.3.4 not json")];
        let items = collect_items(None, &files, ParseMode::Enhanced).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn decodes_utf16_with_bom() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "8.8.8.8 dns".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        assert_eq!(decode_bytes(&bytes), "8.8.8.8 dns");
    }

    #[test]
    fn strips_utf8_bom_and_replaces_invalid_bytes() {
        assert_eq!(decode_bytes(b"\xEF\xBB\xBFabc"), "abc");
        assert_eq!(decode_bytes(b"a\xFFb"), "a\u{FFFD}b");
    }

    #[test]
    fn reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("iocs.TXT");
        std::fs::write(&path, "evil.com | c2").unwrap();
        let f = InputFile::read(&path).unwrap();
        assert_eq!(f.name, "iocs.TXT");
        assert!(!f.is_json());
        let missing = InputFile::read(&dir.path().join("missing.txt"));
        assert!(matches!(missing, Err(InputError::ReadFile { .. })));
    }
}
