mod ticket;
#[cfg(test)]
mod tests;

use std::collections::HashMap;

use crate::error::CatalogError;
use crate::models::{Book, BookInsight, CatalogPage, DraftField};

pub use ticket::{Action, Ticket};
use ticket::Lanes;

/// User-facing alert and confirmation strings, kept apart so the shell and
/// the tests can refer to the exact wording.
pub mod messages {
    pub const LOAD_FAILED: &str = "Failed to load books.";
    pub const SEARCH_FAILED: &str = "Failed to search books.";
    pub const NOT_FOUND: &str = "Book not found. Please check the ID.";
    pub const DELETE_NOT_FOUND: &str = "Book not found.";
    pub const UPDATED: &str = "Book successfully updated!";
    pub const DELETED: &str = "Book deleted successfully!";
    pub const UNREACHABLE: &str = "Server is unreachable. Please try again later.";
    pub const UNEXPECTED: &str = "Unexpected error occurred.";
    pub const INSIGHT_UNAVAILABLE: &str =
        "AI Insights service is currently unavailable. Please try again later.";
    pub const INSIGHT_NO_RESPONSE: &str =
        "No response from AI Insights service. Please check your network.";
}

/// The single tagged view state. Fields are scoped to the active variant so
/// impossible combinations (editing with no draft, detail with edit flags)
/// cannot be represented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// Before the first load is triggered.
    Idle,
    /// A list request (page load or search) is in flight.
    Loading,
    Ready,
    /// A list request failed; the last-good list is still shown.
    Error { message: String },
    /// Detail modal. `book` is `None` while the detail fetch is in flight,
    /// which is the intentional "No book selected" transient.
    Detail { book: Option<Book> },
    /// Edit modal over a working draft. `error` holds the last save
    /// failure so the user can correct input without losing the draft.
    Editing { draft: Book, error: Option<String> },
}

/// One-shot message for the shell's status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Alert(String),
}

impl Notice {
    pub fn text(&self) -> &str {
        match self {
            Self::Info(text) | Self::Alert(text) => text,
        }
    }
}

/// Owns list/selection/edit/search/pagination state and decides how server
/// responses merge into it. Network calls themselves happen outside: every
/// operation is a `begin_*` that issues a [`Ticket`] and an `apply_*` that
/// takes the awaited result. Responses whose ticket has been superseded on
/// its lane are dropped, so rapid navigation cannot resurrect stale data.
#[derive(Debug)]
pub struct CatalogController {
    page_size: u32,
    books: Vec<Book>,
    page: u32,
    total_pages: u32,
    /// True while the list shows (unpaginated) search results.
    search_active: bool,
    view: ViewState,
    insights: HashMap<i64, String>,
    notice: Option<Notice>,
    lanes: Lanes,
}

impl CatalogController {
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size,
            books: Vec::new(),
            page: 0,
            total_pages: 1,
            search_active: false,
            view: ViewState::Idle,
            insights: HashMap::new(),
            notice: None,
            lanes: Lanes::default(),
        }
    }

    // ─── Accessors ─────────────────────────────────────────

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn search_active(&self) -> bool {
        self.search_active
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.view, ViewState::Loading)
    }

    pub fn insight_for(&self, id: i64) -> Option<&str> {
        self.insights.get(&id).map(String::as_str)
    }

    pub fn insights(&self) -> &HashMap<i64, String> {
        &self.insights
    }

    /// One-based page indicator, e.g. "Page 3 of 3".
    pub fn page_label(&self) -> String {
        format!("Page {} of {}", self.page + 1, self.total_pages)
    }

    pub fn can_prev(&self) -> bool {
        self.page > 0
    }

    pub fn can_next(&self) -> bool {
        self.page + 1 < self.total_pages
    }

    /// Id of the book open in a modal, if any.
    pub fn modal_book_id(&self) -> Option<i64> {
        match &self.view {
            ViewState::Detail { book: Some(book) } => Some(book.id),
            ViewState::Editing { draft, .. } => Some(draft.id),
            _ => None,
        }
    }

    pub fn draft(&self) -> Option<&Book> {
        match &self.view {
            ViewState::Editing { draft, .. } => Some(draft),
            _ => None,
        }
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    // ─── Page load ─────────────────────────────────────────

    /// (Re)load the current page.
    pub fn begin_load(&mut self) -> Ticket {
        self.view = ViewState::Loading;
        self.lanes.issue(Action::List)
    }

    /// Changing page discards any active search filter state.
    pub fn goto_next_page(&mut self) -> Option<Ticket> {
        if !self.can_next() {
            return None;
        }
        self.page += 1;
        self.search_active = false;
        Some(self.begin_load())
    }

    pub fn goto_prev_page(&mut self) -> Option<Ticket> {
        if !self.can_prev() {
            return None;
        }
        self.page -= 1;
        self.search_active = false;
        Some(self.begin_load())
    }

    pub fn apply_page(&mut self, ticket: Ticket, result: Result<CatalogPage, CatalogError>) {
        if !self.lanes.is_current(ticket) {
            return;
        }
        match result {
            Ok(page) => {
                self.books = page.books;
                self.page = page.page;
                self.total_pages = page.total_pages.max(1);
                self.search_active = false;
                self.view = ViewState::Ready;
            }
            // Last-good list stays; only the banner changes.
            Err(_) => {
                self.view = ViewState::Error {
                    message: messages::LOAD_FAILED.to_string(),
                };
            }
        }
    }

    // ─── Search ────────────────────────────────────────────

    /// No-op when both filters are blank: no request, no state change.
    pub fn begin_search(&mut self, title: &str, author: &str) -> Option<Ticket> {
        if title.trim().is_empty() && author.trim().is_empty() {
            return None;
        }
        self.view = ViewState::Loading;
        Some(self.lanes.issue(Action::List))
    }

    pub fn apply_search(&mut self, ticket: Ticket, result: Result<Vec<Book>, CatalogError>) {
        if !self.lanes.is_current(ticket) {
            return;
        }
        match result {
            Ok(books) => {
                self.books = books;
                self.search_active = true;
                self.view = ViewState::Ready;
            }
            Err(_) => {
                self.view = ViewState::Error {
                    message: messages::SEARCH_FAILED.to_string(),
                };
            }
        }
    }

    // ─── Detail ────────────────────────────────────────────

    /// Selection resets before the fetch starts, so the modal shows its
    /// "no book selected" transient during the round trip.
    pub fn begin_detail(&mut self, _id: i64) -> Ticket {
        self.view = ViewState::Detail { book: None };
        self.lanes.issue(Action::Detail)
    }

    pub fn apply_detail(&mut self, ticket: Ticket, result: Result<Book, CatalogError>) {
        if !self.lanes.is_current(ticket) {
            return;
        }
        match result {
            Ok(book) => {
                self.view = ViewState::Detail { book: Some(book) };
            }
            Err(err) => {
                let message = match &err {
                    CatalogError::NotFound => messages::NOT_FOUND.to_string(),
                    CatalogError::Server { .. } => err.server_alert().unwrap_or_default(),
                    _ => messages::UNEXPECTED.to_string(),
                };
                self.notice = Some(Notice::Alert(message));
                self.view = ViewState::Ready;
            }
        }
    }

    // ─── Edit ──────────────────────────────────────────────

    /// Snapshot `book` into a draft; until save, mutations touch only the
    /// draft.
    pub fn start_edit(&mut self, book: Book) {
        self.view = ViewState::Editing {
            draft: book,
            error: None,
        };
    }

    pub fn set_draft_field(&mut self, field: DraftField, value: &str) {
        if let ViewState::Editing { draft, .. } = &mut self.view {
            match field {
                DraftField::Title => draft.title = value.to_string(),
                DraftField::Author => draft.author = value.to_string(),
                // Type coercion only; non-numeric input keeps the prior year.
                DraftField::Year => {
                    if let Ok(year) = value.trim().parse::<i32>() {
                        draft.publication_year = year;
                    }
                }
                DraftField::Description => draft.description = value.to_string(),
            }
        }
    }

    /// Discard the draft without writing anything back.
    pub fn cancel_edit(&mut self) {
        if matches!(self.view, ViewState::Editing { .. }) {
            self.view = ViewState::Ready;
        }
    }

    /// Returns the draft to send alongside the ticket, or `None` when not
    /// editing.
    pub fn begin_save(&mut self) -> Option<(Ticket, Book)> {
        let draft = self.draft()?.clone();
        Some((self.lanes.issue(Action::Save), draft))
    }

    pub fn apply_save(&mut self, ticket: Ticket, result: Result<Book, CatalogError>) {
        if !self.lanes.is_current(ticket) {
            return;
        }
        match result {
            Ok(saved) => {
                // Local replace-by-id; the list is not re-fetched.
                if let Some(slot) = self.books.iter_mut().find(|b| b.id == saved.id) {
                    *slot = saved;
                }
                self.view = ViewState::Ready;
                self.notice = Some(Notice::Info(messages::UPDATED.to_string()));
            }
            Err(err) => {
                let message = save_error_message(&err);
                self.notice = Some(Notice::Alert(message.clone()));
                // Stay in edit mode so the user can correct input.
                if let ViewState::Editing { error, .. } = &mut self.view {
                    *error = Some(message);
                }
            }
        }
    }

    // ─── Delete ────────────────────────────────────────────

    /// The shell must have confirmed with the user before calling this.
    pub fn begin_delete(&mut self, _id: i64) -> Ticket {
        self.lanes.issue(Action::Delete)
    }

    pub fn apply_delete(&mut self, ticket: Ticket, id: i64, result: Result<(), CatalogError>) {
        if !self.lanes.is_current(ticket) {
            return;
        }
        match result {
            Ok(()) => {
                self.books.retain(|b| b.id != id);
                // A modal showing the deleted book has nothing left to show.
                if self.modal_book_id() == Some(id) {
                    self.view = ViewState::Ready;
                }
                self.notice = Some(Notice::Info(messages::DELETED.to_string()));
            }
            Err(err) => {
                let message = match &err {
                    CatalogError::NotFound => messages::DELETE_NOT_FOUND.to_string(),
                    CatalogError::Server { .. } => err.server_alert().unwrap_or_default(),
                    _ => messages::UNEXPECTED.to_string(),
                };
                self.notice = Some(Notice::Alert(message));
            }
        }
    }

    // ─── Insight ───────────────────────────────────────────

    pub fn begin_insight(&mut self, _id: i64) -> Ticket {
        self.lanes.issue(Action::Insight)
    }

    /// Always leaves `id` present in the insight map afterwards, and always
    /// (re)selects the book when it can, so the modal has context even when
    /// the insight itself failed.
    pub fn apply_insight(
        &mut self,
        ticket: Ticket,
        id: i64,
        result: Result<BookInsight, CatalogError>,
    ) {
        if !self.lanes.is_current(ticket) {
            return;
        }
        match result {
            Ok(loaded) => {
                self.insights.insert(id, loaded.insight);
                self.view = ViewState::Detail {
                    book: Some(loaded.book),
                };
            }
            Err(err) => {
                let message = match &err {
                    CatalogError::ServiceUnavailable => messages::INSIGHT_UNAVAILABLE.to_string(),
                    CatalogError::NotFound => messages::NOT_FOUND.to_string(),
                    CatalogError::Network(_) => messages::INSIGHT_NO_RESPONSE.to_string(),
                    CatalogError::Server { .. } => err.server_alert().unwrap_or_default(),
                    _ => messages::UNEXPECTED.to_string(),
                };
                self.insights.insert(id, message.clone());
                if let Some(book) = self.books.iter().find(|b| b.id == id) {
                    self.view = ViewState::Detail {
                        book: Some(book.clone()),
                    };
                }
                self.notice = Some(Notice::Alert(message));
            }
        }
    }

    // ─── Modal ─────────────────────────────────────────────

    pub fn close_modal(&mut self) {
        if matches!(
            self.view,
            ViewState::Detail { .. } | ViewState::Editing { .. }
        ) {
            self.view = ViewState::Ready;
        }
    }
}

fn save_error_message(err: &CatalogError) -> String {
    match err {
        CatalogError::Validation(fields) => {
            let joined = fields.values().cloned().collect::<Vec<_>>().join("\n");
            format!("Validation Error:\n{joined}")
        }
        CatalogError::NotFound => messages::NOT_FOUND.to_string(),
        CatalogError::Network(_) => messages::UNREACHABLE.to_string(),
        CatalogError::Server { message, .. } => format!(
            "Unexpected Error: {}",
            message.as_deref().unwrap_or("Something went wrong."),
        ),
        _ => "An unexpected error occurred.".to_string(),
    }
}
