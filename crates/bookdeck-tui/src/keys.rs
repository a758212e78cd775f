use crossterm::event::{KeyCode, KeyModifiers};

use bookdeck_core::ViewState;

use crate::app::{App, Focus, Screen};
use crate::popup::Popup;

pub(crate) fn handle_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    // Popups take priority over everything.
    if app.popup.is_some() {
        handle_popup_key(app, code, modifiers);
        return;
    }

    // The detail modal is driven by the controller's view state.
    if matches!(app.controller.view(), ViewState::Detail { .. }) {
        handle_detail_key(app, code);
        return;
    }

    match app.screen {
        Screen::Landing => handle_landing_key(app, code),
        Screen::Catalog => match app.focus {
            Focus::List => handle_list_key(app, code),
            Focus::SearchTitle | Focus::SearchAuthor => handle_search_key(app, code),
        },
    }
}

fn handle_landing_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Enter => app.open_catalog(),
        KeyCode::Char('?') | KeyCode::F(1) => app.popup = Some(Popup::Help),
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        _ => {}
    }
}

fn handle_list_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('j') | KeyCode::Down => app.cursor_down(),
        KeyCode::Char('k') | KeyCode::Up => app.cursor_up(),
        KeyCode::Enter => app.select_under_cursor(),
        KeyCode::Char('i') => app.request_insight_under_cursor(),
        KeyCode::Char('e') => app.open_edit_under_cursor(),
        KeyCode::Char('d') => app.open_delete_confirm(),
        KeyCode::Char('r') => app.reload(),
        KeyCode::Char('l') | KeyCode::Right => app.next_page(),
        KeyCode::Char('h') | KeyCode::Left => app.prev_page(),
        KeyCode::Char('/') => app.focus = Focus::SearchTitle,
        KeyCode::Char('?') => app.focus = Focus::SearchAuthor,
        KeyCode::F(1) => app.popup = Some(Popup::Help),
        _ => {}
    }
}

fn handle_search_key(app: &mut App, code: KeyCode) {
    let field = match app.focus {
        Focus::SearchTitle => &mut app.search_title,
        _ => &mut app.search_author,
    };
    match code {
        KeyCode::Char(c) => field.insert_char(c),
        KeyCode::Backspace => field.delete_back(),
        KeyCode::Left => field.move_left(),
        KeyCode::Right => field.move_right(),
        KeyCode::Tab => {
            app.focus = match app.focus {
                Focus::SearchTitle => Focus::SearchAuthor,
                _ => Focus::SearchTitle,
            };
        }
        KeyCode::Enter => app.submit_search(),
        KeyCode::Esc => app.focus = Focus::List,
        _ => {}
    }
}

fn handle_detail_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc | KeyCode::Char('q') => app.controller.close_modal(),
        KeyCode::Char('e') => app.open_edit_from_detail(),
        KeyCode::Char('i') => {
            if let Some(id) = app.controller.modal_book_id() {
                app.request_insight(id);
            }
        }
        _ => {}
    }
}

fn handle_popup_key(app: &mut App, code: KeyCode, _modifiers: KeyModifiers) {
    match app.popup {
        Some(Popup::DeleteConfirm { .. }) => match code {
            KeyCode::Char('y') | KeyCode::Enter => app.confirm_delete(),
            KeyCode::Char('n') | KeyCode::Esc => app.popup = None,
            _ => {}
        },
        Some(Popup::EditBook(ref mut form)) => match code {
            KeyCode::Esc => app.cancel_edit(),
            KeyCode::Enter => app.submit_edit(),
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.prev_field(),
            KeyCode::Left => form.active_field_mut().move_left(),
            KeyCode::Right => form.active_field_mut().move_right(),
            KeyCode::Backspace => form.active_field_mut().delete_back(),
            KeyCode::Char(c) => form.active_field_mut().insert_char(c),
            _ => {}
        },
        Some(Popup::Help) => {
            app.popup = None;
        }
        None => {}
    }
}
