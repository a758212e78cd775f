use serde::{Deserialize, Serialize};

/// A book as the catalog service serves it. The `id` is server-assigned
/// and never changes on the client side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub publication_year: i32,
    /// Long-form text; some records omit it entirely.
    #[serde(default)]
    pub description: String,
}

/// One server-paginated slice of the catalog, paired with the zero-based
/// page index it was requested for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogPage {
    pub books: Vec<Book>,
    pub page: u32,
    pub total_pages: u32,
}

impl CatalogPage {
    pub fn empty() -> Self {
        Self {
            books: Vec::new(),
            page: 0,
            total_pages: 1,
        }
    }
}

/// A book together with its AI-generated insight text, as returned by the
/// insight endpoint (the book fields ride along with the insight).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookInsight {
    pub book: Book,
    pub insight: String,
}

/// Editable fields of a draft under edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Title,
    Author,
    Year,
    Description,
}
