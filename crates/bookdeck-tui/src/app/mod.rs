pub mod tasks;

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;

use bookdeck_api::CatalogClient;
use bookdeck_core::{Book, CatalogController, DraftField, ViewState};

use crate::event::NetEvent;
use crate::popup::{EditBookForm, FormField, Popup};

/// Which screen the shell is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Landing,
    Catalog,
}

/// Which catalog widget receives text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List,
    SearchTitle,
    SearchAuthor,
}

/// Shell state on top of the core controller: focus, cursor, inputs and
/// popups. All business decisions stay in the controller; the shell only
/// forwards intents and renders.
pub struct App {
    pub controller: CatalogController,
    pub client: Arc<CatalogClient>,
    pub net_tx: UnboundedSender<NetEvent>,

    pub screen: Screen,
    pub focus: Focus,
    /// Index into `controller.books()`.
    pub cursor: usize,
    pub search_title: FormField,
    pub search_author: FormField,
    pub popup: Option<Popup>,
    pub status_message: String,
    pub should_quit: bool,
}

impl App {
    pub fn new(
        controller: CatalogController,
        client: Arc<CatalogClient>,
        net_tx: UnboundedSender<NetEvent>,
    ) -> Self {
        Self {
            controller,
            client,
            net_tx,
            screen: Screen::Landing,
            focus: Focus::List,
            cursor: 0,
            search_title: FormField::new("Title"),
            search_author: FormField::new("Author"),
            popup: None,
            status_message: String::new(),
            should_quit: false,
        }
    }

    pub fn cursor_book(&self) -> Option<&Book> {
        self.controller.books().get(self.cursor)
    }

    // ─── Navigation ────────────────────────────────────────

    /// Landing → catalog; kicks off the first page load.
    pub fn open_catalog(&mut self) {
        self.screen = Screen::Catalog;
        self.reload();
    }

    pub fn reload(&mut self) {
        let ticket = self.controller.begin_load();
        tasks::spawn_list(
            self.net_tx.clone(),
            self.client.clone(),
            ticket,
            self.controller.page(),
            self.controller.page_size(),
        );
    }

    pub fn next_page(&mut self) {
        if let Some(ticket) = self.controller.goto_next_page() {
            tasks::spawn_list(
                self.net_tx.clone(),
                self.client.clone(),
                ticket,
                self.controller.page(),
                self.controller.page_size(),
            );
        }
    }

    pub fn prev_page(&mut self) {
        if let Some(ticket) = self.controller.goto_prev_page() {
            tasks::spawn_list(
                self.net_tx.clone(),
                self.client.clone(),
                ticket,
                self.controller.page(),
                self.controller.page_size(),
            );
        }
    }

    pub fn cursor_down(&mut self) {
        let len = self.controller.books().len();
        if len > 0 && self.cursor + 1 < len {
            self.cursor += 1;
        }
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    // ─── Search ────────────────────────────────────────────

    /// Both fields blank → no request at all.
    pub fn submit_search(&mut self) {
        let title = self.search_title.value.clone();
        let author = self.search_author.value.clone();
        if let Some(ticket) = self.controller.begin_search(&title, &author) {
            tasks::spawn_search(self.net_tx.clone(), self.client.clone(), ticket, title, author);
        }
        self.focus = Focus::List;
    }

    // ─── Detail / insight ──────────────────────────────────

    pub fn select_under_cursor(&mut self) {
        if let Some(book) = self.cursor_book() {
            let id = book.id;
            let ticket = self.controller.begin_detail(id);
            tasks::spawn_detail(self.net_tx.clone(), self.client.clone(), ticket, id);
        }
    }

    pub fn request_insight(&mut self, id: i64) {
        let ticket = self.controller.begin_insight(id);
        tasks::spawn_insight(self.net_tx.clone(), self.client.clone(), ticket, id);
    }

    pub fn request_insight_under_cursor(&mut self) {
        if let Some(book) = self.cursor_book() {
            let id = book.id;
            self.request_insight(id);
        }
    }

    // ─── Edit ──────────────────────────────────────────────

    pub fn open_edit(&mut self, book: Book) {
        self.popup = Some(Popup::EditBook(EditBookForm::for_book(&book)));
        self.controller.start_edit(book);
    }

    pub fn open_edit_under_cursor(&mut self) {
        if let Some(book) = self.cursor_book().cloned() {
            self.open_edit(book);
        }
    }

    /// Edit the book currently shown in the detail modal.
    pub fn open_edit_from_detail(&mut self) {
        if let ViewState::Detail { book: Some(book) } = self.controller.view() {
            let book = book.clone();
            self.open_edit(book);
        }
    }

    /// Copy the form into the draft and issue the save.
    pub fn submit_edit(&mut self) {
        if let Some(Popup::EditBook(form)) = &self.popup {
            let values: Vec<String> = form.fields.iter().map(|f| f.value.clone()).collect();
            self.controller
                .set_draft_field(DraftField::Title, &values[EditBookForm::TITLE]);
            self.controller
                .set_draft_field(DraftField::Author, &values[EditBookForm::AUTHOR]);
            self.controller
                .set_draft_field(DraftField::Year, &values[EditBookForm::YEAR]);
            self.controller
                .set_draft_field(DraftField::Description, &values[EditBookForm::DESCRIPTION]);

            if let Some((ticket, draft)) = self.controller.begin_save() {
                tasks::spawn_save(self.net_tx.clone(), self.client.clone(), ticket, draft);
            }
        }
    }

    pub fn cancel_edit(&mut self) {
        self.controller.cancel_edit();
        self.popup = None;
    }

    // ─── Delete ────────────────────────────────────────────

    pub fn open_delete_confirm(&mut self) {
        if let Some(book) = self.cursor_book() {
            self.popup = Some(Popup::DeleteConfirm {
                title: book.title.clone(),
                id: book.id,
            });
        }
    }

    pub fn confirm_delete(&mut self) {
        if let Some(Popup::DeleteConfirm { id, .. }) = self.popup {
            let ticket = self.controller.begin_delete(id);
            tasks::spawn_delete(self.net_tx.clone(), self.client.clone(), ticket, id);
            self.popup = None;
        }
    }

    // ─── Network completions ───────────────────────────────

    pub fn handle_net(&mut self, event: NetEvent) {
        match event {
            NetEvent::PageLoaded(ticket, result) => {
                self.controller.apply_page(ticket, result);
            }
            NetEvent::SearchLoaded(ticket, result) => {
                self.controller.apply_search(ticket, result);
            }
            NetEvent::DetailLoaded(ticket, result) => {
                self.controller.apply_detail(ticket, result);
            }
            NetEvent::SaveFinished(ticket, result) => {
                self.controller.apply_save(ticket, result);
                // Close the form only when the save actually went through.
                if !matches!(self.controller.view(), ViewState::Editing { .. }) {
                    self.popup = None;
                }
            }
            NetEvent::DeleteFinished(ticket, id, result) => {
                self.controller.apply_delete(ticket, id, result);
            }
            NetEvent::InsightLoaded(ticket, id, result) => {
                self.controller.apply_insight(ticket, id, result);
            }
        }

        if let Some(notice) = self.controller.take_notice() {
            self.status_message = notice.text().to_string();
        }
        let len = self.controller.books().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }
}
