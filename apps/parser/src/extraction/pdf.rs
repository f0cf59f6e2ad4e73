use anyhow::{anyhow, Context, Result};
use tracing::{info, warn};

use super::cascade::Cascade;

/// Extracts PDF text with `pdf-extract`, falling back to `lopdf`.
/// Returns an empty string when both fail.
pub fn extract_pdf_text(bytes: &[u8]) -> String {
    let cascade = Cascade::<[u8], String>::new("pdf")
        .then("pdf-extract", with_pdf_extract)
        .then("lopdf", with_lopdf);

    match cascade.run(bytes) {
        Ok((name, text)) => {
            info!("PDF text extracted with {name} ({} chars)", text.len());
            text
        }
        Err(e) => {
            warn!("PDF extraction produced no text: {e}");
            String::new()
        }
    }
}

pub(crate) fn with_pdf_extract(bytes: &[u8]) -> Result<String> {
    // pdf-extract panics on some malformed inputs
    let pages = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(bytes))
        .map_err(|_| anyhow!("pdf-extract panicked"))?
        .context("pdf-extract could not read the document")?;
    non_blank(pages.join("\n"))
}

pub(crate) fn with_lopdf(bytes: &[u8]) -> Result<String> {
    let doc = lopdf::Document::load_mem(bytes).context("lopdf could not load the document")?;

    let mut pages = Vec::new();
    for page_num in doc.get_pages().keys() {
        match doc.extract_text(&[*page_num]) {
            Ok(text) => pages.push(text),
            Err(e) => warn!("lopdf skipped page {page_num}: {e}"),
        }
    }
    non_blank(pages.join("\n"))
}

fn non_blank(text: String) -> Result<String> {
    if text.trim().is_empty() {
        anyhow::bail!("no text layer found");
    }
    Ok(text)
}
