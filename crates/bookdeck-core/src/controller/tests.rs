use std::collections::BTreeMap;

use super::{messages, CatalogController, Notice, ViewState};
use crate::error::CatalogError;
use crate::models::{Book, BookInsight, CatalogPage, DraftField};

fn book(id: i64, title: &str) -> Book {
    Book {
        id,
        title: title.to_string(),
        author: "Author".to_string(),
        publication_year: 2000,
        description: String::new(),
    }
}

fn page_of(ids: &[i64], page: u32, total_pages: u32) -> CatalogPage {
    CatalogPage {
        books: ids.iter().map(|&id| book(id, &format!("Book {id}"))).collect(),
        page,
        total_pages,
    }
}

fn loaded(ids: &[i64], total_pages: u32) -> CatalogController {
    let mut controller = CatalogController::new(8);
    let ticket = controller.begin_load();
    controller.apply_page(ticket, Ok(page_of(ids, 0, total_pages)));
    controller
}

#[test]
fn starts_idle_and_loads_into_ready() {
    let mut controller = CatalogController::new(8);
    assert_eq!(*controller.view(), ViewState::Idle);

    let ticket = controller.begin_load();
    assert!(controller.is_loading());

    controller.apply_page(ticket, Ok(page_of(&[1, 2], 0, 3)));
    assert_eq!(*controller.view(), ViewState::Ready);
    assert_eq!(controller.books().len(), 2);
    assert_eq!(controller.total_pages(), 3);
}

#[test]
fn load_failure_keeps_last_good_list() {
    let mut controller = loaded(&[1, 2, 3], 2);

    let ticket = controller.goto_next_page().unwrap();
    controller.apply_page(ticket, Err(CatalogError::Network("refused".into())));

    assert_eq!(
        *controller.view(),
        ViewState::Error {
            message: messages::LOAD_FAILED.to_string()
        }
    );
    assert_eq!(controller.books().len(), 3);
}

#[test]
fn stale_list_response_is_dropped() {
    let mut controller = loaded(&[1], 3);

    let old = controller.goto_next_page().unwrap();
    let new = controller.goto_next_page().unwrap();

    controller.apply_page(new, Ok(page_of(&[30], 2, 3)));
    // The slower page-1 response arrives after page 2 was applied.
    controller.apply_page(old, Ok(page_of(&[20], 1, 3)));

    assert_eq!(controller.books()[0].id, 30);
    assert_eq!(controller.page(), 2);
}

#[test]
fn pagination_gating_and_label() {
    let mut controller = loaded(&[1, 2, 3, 4, 5, 6, 7, 8], 3);
    assert!(!controller.can_prev());
    assert!(controller.can_next());
    assert_eq!(controller.page_label(), "Page 1 of 3");

    let t = controller.goto_next_page().unwrap();
    controller.apply_page(t, Ok(page_of(&[9], 1, 3)));
    let t = controller.goto_next_page().unwrap();
    controller.apply_page(t, Ok(page_of(&[10], 2, 3)));

    assert_eq!(controller.page_label(), "Page 3 of 3");
    assert!(!controller.can_next());
    assert!(controller.goto_next_page().is_none());
}

#[test]
fn total_pages_clamps_to_one() {
    let mut controller = CatalogController::new(8);
    let ticket = controller.begin_load();
    controller.apply_page(ticket, Ok(page_of(&[], 0, 0)));
    assert_eq!(controller.total_pages(), 1);
    assert!(!controller.can_next());
}

#[test]
fn blank_search_issues_nothing_and_changes_nothing() {
    let mut controller = loaded(&[1, 2], 1);
    assert!(controller.begin_search("  ", "").is_none());
    assert_eq!(*controller.view(), ViewState::Ready);
    assert_eq!(controller.books().len(), 2);
}

#[test]
fn search_replaces_list_and_page_change_discards_it() {
    let mut controller = loaded(&[1, 2], 3);

    let ticket = controller.begin_search("dune", "").unwrap();
    controller.apply_search(ticket, Ok(vec![book(42, "Dune")]));
    assert!(controller.search_active());
    assert_eq!(controller.books().len(), 1);

    let ticket = controller.goto_next_page().unwrap();
    assert!(!controller.search_active());
    controller.apply_page(ticket, Ok(page_of(&[5, 6], 1, 3)));
    assert_eq!(controller.books().len(), 2);
}

#[test]
fn search_failure_sets_banner() {
    let mut controller = loaded(&[1], 1);
    let ticket = controller.begin_search("x", "").unwrap();
    controller.apply_search(ticket, Err(CatalogError::Network("down".into())));
    assert_eq!(
        *controller.view(),
        ViewState::Error {
            message: messages::SEARCH_FAILED.to_string()
        }
    );
    assert_eq!(controller.books().len(), 1);
}

#[test]
fn detail_shows_transient_empty_selection() {
    let mut controller = loaded(&[7], 1);
    let ticket = controller.begin_detail(7);
    assert_eq!(*controller.view(), ViewState::Detail { book: None });

    controller.apply_detail(ticket, Ok(book(7, "Seven")));
    assert_eq!(controller.modal_book_id(), Some(7));
}

#[test]
fn detail_not_found_alerts_and_returns_to_ready() {
    let mut controller = loaded(&[7], 1);
    let ticket = controller.begin_detail(99);
    controller.apply_detail(ticket, Err(CatalogError::NotFound));

    assert_eq!(*controller.view(), ViewState::Ready);
    assert_eq!(
        controller.take_notice(),
        Some(Notice::Alert(messages::NOT_FOUND.to_string()))
    );
}

#[test]
fn save_replaces_exactly_one_entry_by_id() {
    let mut controller = loaded(&[4, 5, 6], 1);

    controller.start_edit(book(5, "Old Title"));
    controller.set_draft_field(DraftField::Title, "New Title");

    let (ticket, draft) = controller.begin_save().unwrap();
    assert_eq!(draft.id, 5);
    assert_eq!(draft.title, "New Title");

    controller.apply_save(ticket, Ok(draft.clone()));

    let matches: Vec<_> = controller.books().iter().filter(|b| b.id == 5).collect();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0], &draft);
    assert_eq!(*controller.view(), ViewState::Ready);
    assert_eq!(
        controller.take_notice(),
        Some(Notice::Info(messages::UPDATED.to_string()))
    );
}

#[test]
fn save_validation_failure_stays_in_edit_mode() {
    let mut controller = loaded(&[5], 1);
    let entry = controller.books()[0].clone();
    controller.start_edit(entry);
    controller.set_draft_field(DraftField::Title, "");
    let (ticket, _) = controller.begin_save().unwrap();

    let mut fields = BTreeMap::new();
    fields.insert("title".to_string(), "must not be blank".to_string());
    fields.insert("publicationYear".to_string(), "must be positive".to_string());
    controller.apply_save(ticket, Err(CatalogError::Validation(fields)));

    match controller.view() {
        ViewState::Editing { error: Some(message), .. } => {
            assert!(message.starts_with("Validation Error:\n"));
            assert!(message.contains("must not be blank"));
            assert!(message.contains("must be positive"));
        }
        other => panic!("expected editing state, got {other:?}"),
    }
    // The list entry is untouched.
    assert_eq!(controller.books()[0].title, "Book 5");
}

#[test]
fn cancel_edit_discards_the_draft() {
    let mut controller = loaded(&[5], 1);
    controller.start_edit(book(5, "Title"));
    controller.set_draft_field(DraftField::Title, "Changed");
    controller.cancel_edit();

    assert_eq!(*controller.view(), ViewState::Ready);
    assert_eq!(controller.books()[0].title, "Book 5");
}

#[test]
fn year_coercion_ignores_non_numeric_input() {
    let mut controller = loaded(&[5], 1);
    controller.start_edit(book(5, "Title"));
    controller.set_draft_field(DraftField::Year, "abc");
    assert_eq!(controller.draft().unwrap().publication_year, 2000);
    controller.set_draft_field(DraftField::Year, " 1984 ");
    assert_eq!(controller.draft().unwrap().publication_year, 1984);
}

#[test]
fn delete_removes_exactly_one_entry() {
    let mut controller = loaded(&[1, 2, 3], 1);
    let ticket = controller.begin_delete(2);
    controller.apply_delete(ticket, 2, Ok(()));

    let ids: Vec<i64> = controller.books().iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![1, 3]);
    assert_eq!(
        controller.take_notice(),
        Some(Notice::Info(messages::DELETED.to_string()))
    );
}

#[test]
fn deleting_the_open_detail_book_closes_the_modal() {
    let mut controller = loaded(&[1, 2], 1);
    let detail = controller.begin_detail(2);
    controller.apply_detail(detail, Ok(book(2, "Two")));

    let ticket = controller.begin_delete(2);
    controller.apply_delete(ticket, 2, Ok(()));
    assert_eq!(*controller.view(), ViewState::Ready);
}

#[test]
fn deleting_another_book_leaves_the_modal_alone() {
    let mut controller = loaded(&[1, 2], 1);
    let detail = controller.begin_detail(1);
    controller.apply_detail(detail, Ok(book(1, "One")));

    let ticket = controller.begin_delete(2);
    controller.apply_delete(ticket, 2, Ok(()));
    assert_eq!(controller.modal_book_id(), Some(1));
}

#[test]
fn delete_not_found_changes_no_state() {
    let mut controller = loaded(&[1, 2], 1);
    let ticket = controller.begin_delete(9);
    controller.apply_delete(ticket, 9, Err(CatalogError::NotFound));

    assert_eq!(controller.books().len(), 2);
    assert_eq!(
        controller.take_notice(),
        Some(Notice::Alert(messages::DELETE_NOT_FOUND.to_string()))
    );
}

#[test]
fn insight_success_stores_text_and_selects_book() {
    let mut controller = loaded(&[7], 1);
    let ticket = controller.begin_insight(7);
    controller.apply_insight(
        ticket,
        7,
        Ok(BookInsight {
            book: book(7, "Seven"),
            insight: "A study of sevens.".to_string(),
        }),
    );

    assert_eq!(controller.insight_for(7), Some("A study of sevens."));
    assert_eq!(controller.modal_book_id(), Some(7));
}

#[test]
fn insight_unavailable_stores_exact_message_and_keeps_context() {
    let mut controller = loaded(&[7], 1);
    let ticket = controller.begin_insight(7);
    controller.apply_insight(ticket, 7, Err(CatalogError::ServiceUnavailable));

    assert_eq!(controller.insight_for(7), Some(messages::INSIGHT_UNAVAILABLE));
    // The modal still opens on the book's existing fields.
    assert_eq!(controller.modal_book_id(), Some(7));
}

#[test]
fn insight_id_is_always_present_afterwards() {
    for err in [
        CatalogError::NotFound,
        CatalogError::ServiceUnavailable,
        CatalogError::Network("down".into()),
        CatalogError::Server {
            status: 500,
            message: None,
        },
        CatalogError::Decode("bad json".into()),
    ] {
        let mut controller = loaded(&[3], 1);
        let ticket = controller.begin_insight(3);
        controller.apply_insight(ticket, 3, Err(err));
        assert!(controller.insight_for(3).is_some());
    }
}

#[test]
fn insight_latest_write_wins() {
    let mut controller = loaded(&[3], 1);
    let ticket = controller.begin_insight(3);
    controller.apply_insight(ticket, 3, Err(CatalogError::ServiceUnavailable));

    let ticket = controller.begin_insight(3);
    controller.apply_insight(
        ticket,
        3,
        Ok(BookInsight {
            book: book(3, "Three"),
            insight: "Recovered.".to_string(),
        }),
    );
    assert_eq!(controller.insight_for(3), Some("Recovered."));
}

#[test]
fn close_modal_returns_to_ready() {
    let mut controller = loaded(&[1], 1);
    let ticket = controller.begin_detail(1);
    controller.apply_detail(ticket, Ok(book(1, "One")));
    controller.close_modal();
    assert_eq!(*controller.view(), ViewState::Ready);
}
