//! PDF text extraction

use bytes::Bytes;

use crate::error::{Error, Result};

/// Typographic characters PDF fonts commonly emit, mapped to plain text
const GLYPH_REPLACEMENTS: &[(char, &str)] = &[
    ('\u{2010}', "-"),   // Hyphen
    ('\u{2011}', "-"),   // Non-breaking hyphen
    ('\u{2013}', "-"),   // En dash
    ('\u{2014}', "--"),  // Em dash
    ('\u{2018}', "'"),   // Left single quote
    ('\u{2019}', "'"),   // Right single quote
    ('\u{201C}', "\""),  // Left double quote
    ('\u{201D}', "\""),  // Right double quote
    ('\u{2022}', "* "),  // Bullet
    ('\u{2026}', "..."), // Ellipsis
    ('\u{00A0}', " "),   // Non-breaking space
    ('\u{FB00}', "ff"),
    ('\u{FB01}', "fi"),
    ('\u{FB02}', "fl"),
    ('\u{FB03}', "ffi"),
    ('\u{FB04}', "ffl"),
];

/// Normalise raw page text: drop NULs, map glyphs, trim trailing whitespace
fn cleanup_pdf_text(text: &str) -> String {
    let mut mapped = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '\0' {
            continue;
        }
        match GLYPH_REPLACEMENTS.iter().find(|(glyph, _)| *glyph == c) {
            Some((_, replacement)) => mapped.push_str(replacement),
            None => mapped.push(c),
        }
    }

    mapped
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Text extracted from a PDF, one entry per page
#[derive(Debug, Clone, Default)]
pub struct ExtractedDocument {
    /// Page texts in page order; pages without text are empty strings
    pub pages: Vec<String>,
}

impl ExtractedDocument {
    /// Number of pages seen
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All page texts joined by a blank line
    pub fn context(&self) -> String {
        self.pages.join("\n\n")
    }

    /// Whether any page produced text
    pub fn has_text(&self) -> bool {
        self.pages.iter().any(|p| !p.trim().is_empty())
    }
}

/// PDF loader
pub struct PdfLoader;

impl PdfLoader {
    /// Extract per-page text from PDF bytes
    pub fn load(data: &[u8]) -> Result<ExtractedDocument> {
        let doc = lopdf::Document::load_mem(data)
            .map_err(|e| Error::unreadable(format!("Failed to load PDF: {}", e)))?;

        // pdf-extract panics on some fonts instead of returning an error
        let extracted = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(data)
        }));

        let raw_pages = match extracted {
            Ok(Ok(pages)) => pages,
            Ok(Err(e)) => {
                tracing::warn!("pdf-extract failed: {}, falling back to per-page extraction", e);
                Self::extract_pages_fallback(&doc)
            }
            Err(_) => {
                tracing::warn!("pdf-extract panicked, falling back to per-page extraction");
                Self::extract_pages_fallback(&doc)
            }
        };

        let pages: Vec<String> = raw_pages.iter().map(|p| cleanup_pdf_text(p)).collect();

        tracing::debug!(
            "Extracted {} pages ({} with text)",
            pages.len(),
            pages.iter().filter(|p| !p.is_empty()).count()
        );

        Ok(ExtractedDocument { pages })
    }

    /// Extract on the blocking pool
    pub async fn load_async(data: Bytes) -> Result<ExtractedDocument> {
        tokio::task::spawn_blocking(move || Self::load(&data))
            .await
            .map_err(|e| Error::unreadable(format!("PDF extraction aborted: {}", e)))?
    }

    /// Fallback PDF text extraction using lopdf page by page
    fn extract_pages_fallback(doc: &lopdf::Document) -> Vec<String> {
        doc.get_pages()
            .keys()
            .map(|&page_number| match doc.extract_text(&[page_number]) {
                Ok(text) => text,
                Err(e) => {
                    tracing::debug!("Could not extract text from page {}: {}", page_number, e);
                    String::new()
                }
            })
            .collect()
    }
}
