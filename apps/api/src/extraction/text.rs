use super::{ExtractedText, FileKind};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Decodes a plain-text upload verbatim. Invalid UTF-8 is replaced with U+FFFD
/// and a leading byte-order mark is dropped; nothing else is touched.
pub fn extract_txt(bytes: &[u8]) -> ExtractedText {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    ExtractedText {
        text: String::from_utf8_lossy(bytes).into_owned(),
        file_kind: FileKind::Txt,
        page_count: None,
    }
}
