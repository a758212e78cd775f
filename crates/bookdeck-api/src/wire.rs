use serde::Deserialize;

use bookdeck_core::{Book, BookInsight};

/// `GET /books` envelope.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse {
    pub content: Vec<Book>,
    pub total_pages: u32,
}

/// `GET /books/{id}/ai-insights` body: the book's own fields ride flattened
/// beside the generated text.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightResponse {
    #[serde(flatten)]
    pub book: Book,
    pub ai_insight: String,
}

impl From<InsightResponse> for BookInsight {
    fn from(wire: InsightResponse) -> Self {
        Self {
            book: wire.book,
            insight: wire.ai_insight,
        }
    }
}
