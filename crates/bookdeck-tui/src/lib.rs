pub mod app;
pub mod event;
pub mod keys;
pub mod popup;
pub mod ui;

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc::UnboundedReceiver;

use app::App;
use event::{AppEvent, EventHandler, NetEvent};

/// Run the full TUI application. Must be called from within a tokio
/// runtime: background fetches are spawned onto it.
pub fn run_tui(app: &mut App, net_rx: UnboundedReceiver<NetEvent>) -> Result<()> {
    // Install panic hook so a panic never leaves the terminal raw.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = std::io::stdout().execute(crossterm::terminal::LeaveAlternateScreen);
        original_hook(info);
    }));

    // Setup terminal
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut event_handler = EventHandler::new(Duration::from_millis(100), net_rx);

    // Main loop
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        match event_handler.next()? {
            AppEvent::Key(key) => keys::handle_key(app, key.code, key.modifiers),
            AppEvent::Net(net) => app.handle_net(net),
            AppEvent::Resize(_, _) => {}
            AppEvent::Tick => {}
        }

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
