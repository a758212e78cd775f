use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent};
use tokio::sync::mpsc::UnboundedReceiver;

use bookdeck_core::{Book, BookInsight, CatalogError, CatalogPage, Ticket};

/// Completion of a background network call, tagged with the ticket issued
/// when the request was started so stale responses can be dropped.
#[derive(Debug)]
pub enum NetEvent {
    PageLoaded(Ticket, Result<CatalogPage, CatalogError>),
    SearchLoaded(Ticket, Result<Vec<Book>, CatalogError>),
    DetailLoaded(Ticket, Result<Book, CatalogError>),
    SaveFinished(Ticket, Result<Book, CatalogError>),
    DeleteFinished(Ticket, i64, Result<(), CatalogError>),
    InsightLoaded(Ticket, i64, Result<BookInsight, CatalogError>),
}

/// Events the TUI loop handles.
#[derive(Debug)]
pub enum AppEvent {
    /// A key press event.
    Key(KeyEvent),
    /// Terminal was resized.
    Resize(u16, u16),
    /// Periodic tick.
    Tick,
    /// A spawned fetch task finished.
    Net(NetEvent),
}

/// Interleaves terminal events with network completions. Network results
/// are drained first so list updates render without waiting for a key.
pub struct EventHandler {
    tick_rate: Duration,
    net_rx: UnboundedReceiver<NetEvent>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration, net_rx: UnboundedReceiver<NetEvent>) -> Self {
        Self { tick_rate, net_rx }
    }

    /// Block until the next event (network completion, key press, resize,
    /// or tick timeout).
    pub fn next(&mut self) -> Result<AppEvent> {
        if let Ok(net) = self.net_rx.try_recv() {
            return Ok(AppEvent::Net(net));
        }
        if event::poll(self.tick_rate)? {
            match event::read()? {
                CrosstermEvent::Key(key) => Ok(AppEvent::Key(key)),
                CrosstermEvent::Resize(w, h) => Ok(AppEvent::Resize(w, h)),
                _ => Ok(AppEvent::Tick),
            }
        } else {
            Ok(AppEvent::Tick)
        }
    }
}
