use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Text content of a single page, as returned by the extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageContent {
    pub page_number: usize,
    pub text: String,
}

/// An extracted document: per-page text plus the source filename.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedDocument {
    pub filename: String,
    pub pages: Vec<PageContent>,
}

impl ExtractedDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn total_chars(&self) -> usize {
        self.pages.iter().map(|p| p.text.len()).sum()
    }

    /// Concatenate all pages into one string with page markers, the form the
    /// chunker consumes.
    pub fn full_text(&self) -> String {
        let mut out = String::with_capacity(self.total_chars());
        for page in &self.pages {
            out.push_str(&format!("\n\n--- Page {} ---\n\n", page.page_number));
            out.push_str(&page.text);
        }
        out
    }
}

/// Metadata attached to every chunk of a document at ingestion time.
/// Opaque to the chunker; the index stores it verbatim.
pub type DocumentMetadata = HashMap<String, String>;
