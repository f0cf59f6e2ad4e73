use std::io::{Cursor, Read};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;
use tracing::warn;
use zip::ZipArchive;

const DOCUMENT_PART: &str = "word/document.xml";

static PARAGRAPH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<w:p(?:\s[^>]*)?/>|<w:p(?:\s[^>]*)?>.*?</w:p>").expect("valid regex")
});
static RUN_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<w:t(?:\s[^>]*)?>(.*?)</w:t>|<w:tab/>|<w:br(?:\s[^>]*)?/>").expect("valid regex")
});

/// Paragraph text of a Word document, one paragraph per line.
/// Any failure (not a zip, no document part, legacy binary `.doc`) yields "".
pub fn extract_docx_text(bytes: &[u8]) -> String {
    match read_document_xml(bytes) {
        Ok(xml) => paragraphs_to_text(&xml),
        Err(e) => {
            warn!("Word extraction failed: {e:#}");
            String::new()
        }
    }
}

fn read_document_xml(bytes: &[u8]) -> Result<String> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).context("not a zip container")?;
    let mut part = archive
        .by_name(DOCUMENT_PART)
        .with_context(|| format!("missing {DOCUMENT_PART}"))?;
    let mut xml = String::new();
    part.read_to_string(&mut xml)
        .with_context(|| format!("{DOCUMENT_PART} is not valid UTF-8"))?;
    Ok(xml)
}

fn paragraphs_to_text(xml: &str) -> String {
    let mut out = String::new();
    for paragraph in PARAGRAPH.find_iter(xml) {
        for token in RUN_TOKEN.captures_iter(paragraph.as_str()) {
            match token.get(1) {
                Some(text) => out.push_str(&decode_entities(text.as_str())),
                None if token[0].starts_with("<w:tab") => out.push('\t'),
                None => out.push('\n'),
            }
        }
        out.push('\n');
    }
    out
}

fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let decoded = tail.find(';').and_then(|semi| {
            let entity = &tail[1..semi];
            let ch = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ => entity
                    .strip_prefix("#x")
                    .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                    .or_else(|| entity.strip_prefix('#').and_then(|dec| dec.parse().ok()))
                    .and_then(char::from_u32),
            };
            ch.map(|c| (c, semi))
        });
        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &tail[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}


#[cfg(test)]
mod tests {
    use super::fixtures::make_docx;
    use super::*;

    #[test]
    fn test_paragraphs_become_lines() {
        let bytes = make_docx(&["John Doe", "Experience", "Software Engineer"]);
        assert_eq!(
            extract_docx_text(&bytes),
            "John Doe\nExperience\nSoftware Engineer\n"
        );
    }

    #[test]
    fn test_runs_within_a_paragraph_are_concatenated() {
        let xml = r#"<w:body><w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr><w:r><w:t>Soft</w:t></w:r><w:r><w:t xml:space="preserve">ware </w:t></w:r><w:r><w:tab/><w:t>Engineer</w:t></w:r></w:p><w:p/></w:body>"#;
        assert_eq!(paragraphs_to_text(xml), "Software \tEngineer\n\n");
    }

    #[test]
    fn test_entities_are_decoded() {
        assert_eq!(decode_entities("R&amp;D &lt;lead&gt; &#233;&#x41;"), "R&D <lead> éA");
        assert_eq!(decode_entities("AT&T"), "AT&T");
    }

    #[test]
    fn test_non_zip_bytes_yield_empty_text() {
        assert_eq!(extract_docx_text(b"\xD0\xCF\x11\xE0 legacy binary"), "");
    }
}
