use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use bookdeck_core::{Book, ViewState};

use crate::app::{App, Focus, Screen};
use crate::popup::{EditBookForm, Popup};

/// Color palette — Catppuccin Mocha inspired defaults.
mod colors {
    use ratatui::style::Color;

    pub const SURFACE0: Color = Color::Rgb(49, 50, 68);
    pub const TEXT: Color = Color::Rgb(205, 214, 244);
    pub const SUBTEXT0: Color = Color::Rgb(166, 173, 200);
    pub const LAVENDER: Color = Color::Rgb(180, 190, 254);
    pub const BLUE: Color = Color::Rgb(137, 180, 250);
    pub const GREEN: Color = Color::Rgb(166, 227, 161);
    pub const YELLOW: Color = Color::Rgb(249, 226, 175);
    pub const RED: Color = Color::Rgb(243, 139, 168);
    pub const OVERLAY0: Color = Color::Rgb(108, 112, 134);
}

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App) {
    match app.screen {
        Screen::Landing => render_landing(frame),
        Screen::Catalog => render_catalog(frame, app),
    }

    // Modal overlays, on top of everything.
    if let Some(ref popup) = app.popup {
        render_popup(frame, app, popup);
    } else if let ViewState::Detail { book } = app.controller.view() {
        render_detail_modal(frame, app, book.as_ref());
    }
}

// ─── Landing ───────────────────────────────────────────────

fn render_landing(frame: &mut Frame) {
    let area = frame.area();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);

    let title = Paragraph::new(vec![
        Line::from(Span::styled(
            "Welcome to Library",
            Style::default()
                .fg(colors::LAVENDER)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter to explore books  ·  q to quit",
            Style::default().fg(colors::SUBTEXT0),
        )),
    ])
    .alignment(Alignment::Center);

    frame.render_widget(title, rows[1]);
}

// ─── Catalog ───────────────────────────────────────────────

fn render_catalog(frame: &mut Frame, app: &App) {
    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Length(3), // search bar
            Constraint::Min(3),    // book list
            Constraint::Length(1), // pagination
            Constraint::Length(1), // status line
        ])
        .split(frame.area());

    render_header(frame, app, main[0]);
    render_search_bar(frame, app, main[1]);
    render_book_list(frame, app, main[2]);
    render_pagination(frame, app, main[3]);
    render_status_line(frame, app, main[4]);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let header = Line::from(vec![
        Span::styled(
            " 󰂺 bookdeck ",
            Style::default()
                .fg(colors::LAVENDER)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}  ", app.client.base_url()),
            Style::default().fg(colors::SUBTEXT0),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(header).style(Style::default().bg(colors::SURFACE0)),
        area,
    );
}

fn render_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_search_field(
        frame,
        halves[0],
        "Search by Title",
        &app.search_title.value,
        app.focus == Focus::SearchTitle,
    );
    render_search_field(
        frame,
        halves[1],
        "Search by Author",
        &app.search_author.value,
        app.focus == Focus::SearchAuthor,
    );
}

fn render_search_field(frame: &mut Frame, area: Rect, title: &str, value: &str, focused: bool) {
    let border = if focused {
        Style::default().fg(colors::YELLOW)
    } else {
        Style::default().fg(colors::OVERLAY0)
    };
    let field = Paragraph::new(value.to_string())
        .style(Style::default().fg(colors::TEXT))
        .block(Block::default().borders(Borders::ALL).border_style(border).title(title));
    frame.render_widget(field, area);
}

fn render_book_list(frame: &mut Frame, app: &App, area: Rect) {
    let books = app.controller.books();
    let title = if app.controller.is_loading() {
        " Books (loading…) ".to_string()
    } else if app.controller.search_active() {
        format!(" Search results ({}) ", books.len())
    } else {
        format!(" Books ({}) ", books.len())
    };

    let items: Vec<ListItem> = books.iter().map(book_row).collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(
            Style::default()
                .bg(colors::SURFACE0)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");

    let mut state = ListState::default();
    if !books.is_empty() {
        state.select(Some(app.cursor));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn book_row(book: &Book) -> ListItem<'_> {
    ListItem::new(Line::from(vec![
        Span::styled(&book.title, Style::default().fg(colors::TEXT)),
        Span::styled(
            format!("  {} ", book.author),
            Style::default().fg(colors::SUBTEXT0),
        ),
        Span::styled(
            format!("({})", book.publication_year),
            Style::default().fg(colors::OVERLAY0),
        ),
    ]))
}

fn render_pagination(frame: &mut Frame, app: &App, area: Rect) {
    let enabled = Style::default().fg(colors::BLUE);
    let disabled = Style::default().fg(colors::OVERLAY0);

    let line = Line::from(vec![
        Span::styled(
            " ← Prev ",
            if app.controller.can_prev() { enabled } else { disabled },
        ),
        Span::styled(
            format!(" {} ", app.controller.page_label()),
            Style::default().fg(colors::TEXT),
        ),
        Span::styled(
            " Next → ",
            if app.controller.can_next() { enabled } else { disabled },
        ),
    ]);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn render_status_line(frame: &mut Frame, app: &App, area: Rect) {
    // A failed list load shows its banner here; the last-good list stays up.
    let (text, style) = if let ViewState::Error { message } = app.controller.view() {
        (message.clone(), Style::default().fg(colors::RED))
    } else {
        (
            app.status_message.clone(),
            Style::default().fg(colors::SUBTEXT0),
        )
    };
    frame.render_widget(Paragraph::new(text).style(style), area);
}

// ─── Modals ────────────────────────────────────────────────

fn render_detail_modal(frame: &mut Frame, app: &App, book: Option<&Book>) {
    let area = centered_rect(60, 60, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::BLUE))
        .title(" Book ");

    let lines = match book {
        // Intentional transient while the detail fetch is in flight.
        None => vec![Line::from(Span::styled(
            "No book selected",
            Style::default().fg(colors::SUBTEXT0),
        ))],
        Some(book) => {
            let mut lines = vec![
                Line::from(Span::styled(
                    book.title.clone(),
                    Style::default()
                        .fg(colors::LAVENDER)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    format!("Author: {}", book.author),
                    Style::default().fg(colors::SUBTEXT0),
                )),
                Line::from(Span::styled(
                    format!("Published: {}", book.publication_year),
                    Style::default().fg(colors::SUBTEXT0),
                )),
                Line::from(""),
                Line::from(book.description.clone()),
            ];
            if let Some(insight) = app.controller.insight_for(book.id) {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    "📖 AI Insight:",
                    Style::default()
                        .fg(colors::GREEN)
                        .add_modifier(Modifier::BOLD),
                )));
                lines.push(Line::from(insight.to_string()));
            }
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "e edit · i insight · Esc close",
                Style::default().fg(colors::OVERLAY0),
            )));
            lines
        }
    };

    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(block),
        area,
    );
}

fn render_popup(frame: &mut Frame, app: &App, popup: &Popup) {
    match popup {
        Popup::EditBook(form) => render_edit_form(frame, app, form),
        Popup::DeleteConfirm { title, .. } => render_delete_confirm(frame, title),
        Popup::Help => render_help(frame),
    }
}

fn render_edit_form(frame: &mut Frame, app: &App, form: &EditBookForm) {
    let area = centered_rect(60, 60, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = Vec::new();
    for (i, field) in form.fields.iter().enumerate() {
        let label_style = if i == form.active_field {
            Style::default().fg(colors::YELLOW).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors::SUBTEXT0)
        };
        lines.push(Line::from(Span::styled(format!("{}:", field.label), label_style)));
        lines.push(Line::from(Span::styled(
            field.value.clone(),
            Style::default().fg(colors::TEXT),
        )));
        lines.push(Line::from(""));
    }

    // Save failures keep the form open with the reason attached.
    if let ViewState::Editing {
        error: Some(message),
        ..
    } = app.controller.view()
    {
        for part in message.lines() {
            lines.push(Line::from(Span::styled(
                part.to_string(),
                Style::default().fg(colors::RED),
            )));
        }
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        "Enter save · Tab next field · Esc cancel",
        Style::default().fg(colors::OVERLAY0),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::GREEN))
        .title(" Edit Book ");
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(block),
        area,
    );
}

fn render_delete_confirm(frame: &mut Frame, title: &str) {
    let area = centered_rect(50, 20, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from("Are you sure you want to delete this book?"),
        Line::from(""),
        Line::from(Span::styled(
            title.to_string(),
            Style::default().fg(colors::LAVENDER).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "y delete · n cancel",
            Style::default().fg(colors::OVERLAY0),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::RED))
        .title(" Delete ");
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}

fn render_help(frame: &mut Frame) {
    let area = centered_rect(50, 60, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from("j/k or ↑/↓   move cursor"),
        Line::from("Enter        open book detail"),
        Line::from("i            AI insight"),
        Line::from("e            edit book"),
        Line::from("d            delete book"),
        Line::from("h/l or ←/→   previous / next page"),
        Line::from("/  ?         search title / author"),
        Line::from("r            reload page"),
        Line::from("F1           this help"),
        Line::from("q            quit"),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::BLUE))
        .title(" Help ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Centered sub-rectangle, percent of the full frame.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vert[1])[1]
}
