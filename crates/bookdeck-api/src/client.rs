use std::collections::BTreeMap;

use serde_json::Value;
use tracing::debug;

use bookdeck_core::{Book, BookInsight, CatalogError, CatalogPage, Result};

use crate::wire::{InsightResponse, PageResponse};

const USER_AGENT: &str = "bookdeck/0.1";

/// Thin adapter over the remote catalog service. One method per endpoint;
/// every transport or status failure comes back as a classified
/// [`CatalogError`]. No retries, no timeouts beyond transport defaults.
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .gzip(true)
            .build()
            .expect("failed to build reqwest client");
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /books?page&size`. The server pairs the slice with its total
    /// page count; the client never computes bounds itself.
    pub async fn list_books(&self, page: u32, size: u32) -> Result<CatalogPage> {
        let url = format!("{}/books", self.base_url);
        debug!(page, size, "listing books");
        let resp = self
            .http
            .get(&url)
            .query(&[("page", page), ("size", size)])
            .send()
            .await
            .map_err(network)?;
        let wire: PageResponse = decode(resp).await?;
        Ok(CatalogPage {
            books: wire.content,
            page,
            total_pages: wire.total_pages,
        })
    }

    /// `GET /books/{id}`. 404 → `NotFound`.
    pub async fn get_book(&self, id: i64) -> Result<Book> {
        let url = format!("{}/books/{id}", self.base_url);
        debug!(id, "fetching book");
        let resp = self.http.get(&url).send().await.map_err(network)?;
        decode(resp).await
    }

    /// `GET /books/search?title&author`. The caller guards the case where
    /// both filters are blank; this always issues the request.
    pub async fn search_books(&self, title: &str, author: &str) -> Result<Vec<Book>> {
        let url = format!("{}/books/search", self.base_url);
        debug!(title, author, "searching books");
        let resp = self
            .http
            .get(&url)
            .query(&[("title", title), ("author", author)])
            .send()
            .await
            .map_err(network)?;
        decode(resp).await
    }

    /// `PUT /books/{id}`. 400 → `Validation` with the field→message map,
    /// 404 → `NotFound`.
    pub async fn update_book(&self, id: i64, draft: &Book) -> Result<Book> {
        let url = format!("{}/books/{id}", self.base_url);
        debug!(id, "updating book");
        let resp = self
            .http
            .put(&url)
            .json(draft)
            .send()
            .await
            .map_err(network)?;
        decode(resp).await
    }

    /// `DELETE /books/{id}`. 200/204 both count as success.
    pub async fn delete_book(&self, id: i64) -> Result<()> {
        let url = format!("{}/books/{id}", self.base_url);
        debug!(id, "deleting book");
        let resp = self.http.delete(&url).send().await.map_err(network)?;
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(classify(resp).await)
        }
    }

    /// `GET /books/{id}/ai-insights`. 503 → `ServiceUnavailable` (the
    /// generator is down independently of the book data), 404 → `NotFound`.
    pub async fn get_insight(&self, id: i64) -> Result<BookInsight> {
        let url = format!("{}/books/{id}/ai-insights", self.base_url);
        debug!(id, "fetching AI insight");
        let resp = self.http.get(&url).send().await.map_err(network)?;
        let wire: InsightResponse = decode(resp).await?;
        Ok(wire.into())
    }
}

fn network(err: reqwest::Error) -> CatalogError {
    CatalogError::Network(err.to_string())
}

/// Read a successful body as `T`, or classify the failure.
async fn decode<T: serde::de::DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
    if !resp.status().is_success() {
        return Err(classify(resp).await);
    }
    let body = resp.text().await.map_err(network)?;
    serde_json::from_str(&body).map_err(|e| CatalogError::Decode(e.to_string()))
}

/// Translate a non-2xx response into the uniform error shape.
async fn classify(resp: reqwest::Response) -> CatalogError {
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    match status {
        404 => CatalogError::NotFound,
        503 => CatalogError::ServiceUnavailable,
        400 => match serde_json::from_str::<BTreeMap<String, String>>(&body) {
            Ok(fields) => CatalogError::Validation(fields),
            Err(_) => CatalogError::Server {
                status,
                message: extract_message(&body),
            },
        },
        _ => CatalogError::Server {
            status,
            message: extract_message(&body),
        },
    }
}

/// Error bodies sometimes carry `{"message": "..."}`.
fn extract_message(body: &str) -> Option<String> {
    serde_json::from_str::<Value>(body)
        .ok()?
        .get("message")?
        .as_str()
        .map(ToOwned::to_owned)
}
