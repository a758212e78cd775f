//! Controller + client flows against a mock catalog service.

use mockito::{Matcher, Server, ServerGuard};
use serde_json::{json, Value};

use bookdeck_api::CatalogClient;
use bookdeck_core::controller::messages;
use bookdeck_core::{CatalogController, DraftField, ViewState};

const PAGE_SIZE: u32 = 8;

fn book_json(id: i64, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "author": "Some Author",
        "publicationYear": 1990 + id,
        "description": ""
    })
}

fn page_body(ids: std::ops::Range<i64>, total_pages: u32) -> String {
    let content: Vec<Value> = ids.map(|id| book_json(id, &format!("Book {id}"))).collect();
    json!({"content": content, "totalPages": total_pages}).to_string()
}

async fn mock_page(server: &mut ServerGuard, page: u32, body: String) -> mockito::Mock {
    page_mock(server, page, body).create_async().await
}

/// Builder variant for tests that pin down how often the list is fetched.
fn page_mock(server: &mut ServerGuard, page: u32, body: String) -> mockito::Mock {
    server
        .mock("GET", "/books")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page".into(), page.to_string()),
            Matcher::UrlEncoded("size".into(), PAGE_SIZE.to_string()),
        ]))
        .with_status(200)
        .with_body(body)
}

async fn load_page(controller: &mut CatalogController, client: &CatalogClient) {
    let ticket = controller.begin_load();
    let result = client.list_books(controller.page(), PAGE_SIZE).await;
    controller.apply_page(ticket, result);
}

#[tokio::test]
async fn next_twice_reaches_page_three_of_three() {
    let mut server = Server::new_async().await;
    mock_page(&mut server, 0, page_body(1..9, 3)).await;
    mock_page(&mut server, 1, page_body(9..17, 3)).await;
    mock_page(&mut server, 2, page_body(17..21, 3)).await;

    let client = CatalogClient::new(server.url());
    let mut controller = CatalogController::new(PAGE_SIZE);

    load_page(&mut controller, &client).await;
    assert_eq!(controller.books().len(), 8);
    assert_eq!(controller.total_pages(), 3);

    for _ in 0..2 {
        let ticket = controller.goto_next_page().unwrap();
        let result = client.list_books(controller.page(), PAGE_SIZE).await;
        controller.apply_page(ticket, result);
    }

    assert_eq!(controller.page_label(), "Page 3 of 3");
    assert!(!controller.can_next());
    assert!(controller.goto_next_page().is_none());
}

#[tokio::test]
async fn saving_an_edit_updates_the_list_without_a_refetch() {
    let mut server = Server::new_async().await;
    // Exactly one list fetch is allowed for the whole flow.
    let list_mock = page_mock(&mut server, 0, page_body(1..9, 1))
        .expect(1)
        .create_async()
        .await;

    let updated = book_json(5, "New Title");
    let put_mock = server
        .mock("PUT", "/books/5")
        .match_body(Matcher::PartialJson(json!({"id": 5, "title": "New Title"})))
        .with_status(200)
        .with_body(updated.to_string())
        .create_async()
        .await;

    let client = CatalogClient::new(server.url());
    let mut controller = CatalogController::new(PAGE_SIZE);
    load_page(&mut controller, &client).await;

    let original = controller
        .books()
        .iter()
        .find(|b| b.id == 5)
        .cloned()
        .unwrap();
    controller.start_edit(original);
    controller.set_draft_field(DraftField::Title, "New Title");

    let (ticket, draft) = controller.begin_save().unwrap();
    let result = client.update_book(draft.id, &draft).await;
    controller.apply_save(ticket, result);

    let entry: Vec<_> = controller.books().iter().filter(|b| b.id == 5).collect();
    assert_eq!(entry.len(), 1);
    assert_eq!(entry[0].title, "New Title");
    assert_eq!(*controller.view(), ViewState::Ready);

    put_mock.assert_async().await;
    list_mock.assert_async().await;
}

#[tokio::test]
async fn validation_failure_keeps_the_edit_open() {
    let mut server = Server::new_async().await;
    mock_page(&mut server, 0, page_body(1..9, 1)).await;
    server
        .mock("PUT", "/books/5")
        .with_status(400)
        .with_body(json!({"title": "must not be blank"}).to_string())
        .create_async()
        .await;

    let client = CatalogClient::new(server.url());
    let mut controller = CatalogController::new(PAGE_SIZE);
    load_page(&mut controller, &client).await;

    let original = controller
        .books()
        .iter()
        .find(|b| b.id == 5)
        .cloned()
        .unwrap();
    controller.start_edit(original);
    controller.set_draft_field(DraftField::Title, "");

    let (ticket, draft) = controller.begin_save().unwrap();
    let result = client.update_book(draft.id, &draft).await;
    controller.apply_save(ticket, result);

    match controller.view() {
        ViewState::Editing { error: Some(message), .. } => {
            assert_eq!(message, "Validation Error:\nmust not be blank");
        }
        other => panic!("expected editing state, got {other:?}"),
    }
    // List entry untouched by the failed save.
    let entry = controller.books().iter().find(|b| b.id == 5).unwrap();
    assert_eq!(entry.title, "Book 5");
}

#[tokio::test]
async fn insight_503_stores_the_exact_message_and_opens_the_modal() {
    let mut server = Server::new_async().await;
    mock_page(&mut server, 0, page_body(1..9, 1)).await;
    server
        .mock("GET", "/books/7/ai-insights")
        .with_status(503)
        .create_async()
        .await;

    let client = CatalogClient::new(server.url());
    let mut controller = CatalogController::new(PAGE_SIZE);
    load_page(&mut controller, &client).await;

    let ticket = controller.begin_insight(7);
    let result = client.get_insight(7).await;
    controller.apply_insight(ticket, 7, result);

    assert_eq!(controller.insight_for(7), Some(messages::INSIGHT_UNAVAILABLE));
    match controller.view() {
        ViewState::Detail { book: Some(book) } => {
            assert_eq!(book.id, 7);
            assert_eq!(book.title, "Book 7");
        }
        other => panic!("expected detail modal, got {other:?}"),
    }
}

#[tokio::test]
async fn deleting_a_book_removes_it_locally() {
    let mut server = Server::new_async().await;
    let list_mock = page_mock(&mut server, 0, page_body(1..9, 1))
        .expect(1)
        .create_async()
        .await;
    server
        .mock("DELETE", "/books/3")
        .with_status(204)
        .create_async()
        .await;

    let client = CatalogClient::new(server.url());
    let mut controller = CatalogController::new(PAGE_SIZE);
    load_page(&mut controller, &client).await;

    let ticket = controller.begin_delete(3);
    let result = client.delete_book(3).await;
    controller.apply_delete(ticket, 3, result);

    assert_eq!(controller.books().len(), 7);
    assert!(controller.books().iter().all(|b| b.id != 3));
    list_mock.assert_async().await;
}

#[tokio::test]
async fn failed_load_keeps_the_previous_page_on_screen() {
    let mut server = Server::new_async().await;
    mock_page(&mut server, 0, page_body(1..9, 2)).await;
    server
        .mock("GET", "/books")
        .match_query(Matcher::UrlEncoded("page".into(), "1".into()))
        .with_status(500)
        .create_async()
        .await;

    let client = CatalogClient::new(server.url());
    let mut controller = CatalogController::new(PAGE_SIZE);
    load_page(&mut controller, &client).await;

    let ticket = controller.goto_next_page().unwrap();
    let result = client.list_books(controller.page(), PAGE_SIZE).await;
    controller.apply_page(ticket, result);

    assert_eq!(
        *controller.view(),
        ViewState::Error {
            message: messages::LOAD_FAILED.to_string()
        }
    );
    assert_eq!(controller.books().len(), 8);
    assert_eq!(controller.books()[0].title, "Book 1");
}
