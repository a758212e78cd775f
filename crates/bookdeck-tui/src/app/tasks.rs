//! Background fetch tasks. Each spawn issues one HTTP call and reports the
//! outcome over the event channel; the loop feeds it back into the
//! controller, which drops it if the ticket has been superseded.

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;

use bookdeck_api::CatalogClient;
use bookdeck_core::{Book, Ticket};

use crate::event::NetEvent;

pub fn spawn_list(
    tx: UnboundedSender<NetEvent>,
    client: Arc<CatalogClient>,
    ticket: Ticket,
    page: u32,
    size: u32,
) {
    tokio::spawn(async move {
        let result = client.list_books(page, size).await;
        let _ = tx.send(NetEvent::PageLoaded(ticket, result));
    });
}

pub fn spawn_search(
    tx: UnboundedSender<NetEvent>,
    client: Arc<CatalogClient>,
    ticket: Ticket,
    title: String,
    author: String,
) {
    tokio::spawn(async move {
        let result = client.search_books(&title, &author).await;
        let _ = tx.send(NetEvent::SearchLoaded(ticket, result));
    });
}

pub fn spawn_detail(
    tx: UnboundedSender<NetEvent>,
    client: Arc<CatalogClient>,
    ticket: Ticket,
    id: i64,
) {
    tokio::spawn(async move {
        let result = client.get_book(id).await;
        let _ = tx.send(NetEvent::DetailLoaded(ticket, result));
    });
}

pub fn spawn_save(
    tx: UnboundedSender<NetEvent>,
    client: Arc<CatalogClient>,
    ticket: Ticket,
    draft: Book,
) {
    tokio::spawn(async move {
        let result = client.update_book(draft.id, &draft).await;
        let _ = tx.send(NetEvent::SaveFinished(ticket, result));
    });
}

pub fn spawn_delete(
    tx: UnboundedSender<NetEvent>,
    client: Arc<CatalogClient>,
    ticket: Ticket,
    id: i64,
) {
    tokio::spawn(async move {
        let result = client.delete_book(id).await;
        let _ = tx.send(NetEvent::DeleteFinished(ticket, id, result));
    });
}

pub fn spawn_insight(
    tx: UnboundedSender<NetEvent>,
    client: Arc<CatalogClient>,
    ticket: Ticket,
    id: i64,
) {
    tokio::spawn(async move {
        let result = client.get_insight(id).await;
        let _ = tx.send(NetEvent::InsightLoaded(ticket, id, result));
    });
}
