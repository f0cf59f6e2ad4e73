//! Text Extraction Layer: raw document bytes in, plain newline-separated text out.

use std::path::Path;

use tracing::debug;

use crate::errors::ParseError;
use crate::models::document::{DocumentFormat, RawDocument};

pub mod cascade;
pub mod docx;
pub mod pdf;

/// Reads a file from disk into a `RawDocument`.
/// Existence is checked before the extension so a missing `.txt` reports `NotFound`.
pub fn load_document(path: &Path) -> Result<RawDocument, ParseError> {
    if !path.exists() {
        return Err(ParseError::NotFound(path.display().to_string()));
    }
    let format = DocumentFormat::from_path(path)?;
    let bytes = std::fs::read(path)?;
    debug!("Loaded {} ({} bytes, {:?})", path.display(), bytes.len(), format);
    Ok(RawDocument::new(bytes, format, path.display().to_string()))
}

/// Extracts plain text. An empty result is not an error here; the caller decides.
pub fn extract(doc: &RawDocument) -> Result<String, ParseError> {
    let text = match doc.format {
        DocumentFormat::Pdf => pdf::extract_pdf_text(&doc.bytes),
        // Legacy binary .doc is handed to the Word reader and usually comes back empty.
        DocumentFormat::Docx | DocumentFormat::Doc => docx::extract_docx_text(&doc.bytes),
    };
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_is_not_found_even_with_bad_extension() {
        let err = load_document(Path::new("/definitely/not/here/resume.txt")).unwrap_err();
        assert!(matches!(err, ParseError::NotFound(_)));
    }

    #[test]
    fn test_existing_txt_file_is_unsupported() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        writeln!(file, "plain text resume").unwrap();
        let err = load_document(file.path()).unwrap_err();
        assert!(matches!(err, ParseError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_docx_round_trip_through_loader() {
        let mut file = tempfile::Builder::new().suffix(".DOCX").tempfile().unwrap();
        file.write_all(&docx::fixtures::make_docx(&["Jane Smith"]))
            .unwrap();
        let doc = load_document(file.path()).unwrap();
        assert_eq!(doc.format, DocumentFormat::Docx);
        assert_eq!(extract(&doc).unwrap(), "Jane Smith\n");
    }

    #[test]
    fn test_legacy_doc_extracts_empty() {
        let doc = RawDocument::new(b"\xD0\xCF\x11\xE0".to_vec(), DocumentFormat::Doc, "old.doc");
        assert_eq!(extract(&doc).unwrap(), "");
    }
}
