// event handling

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;

use crate::QueryRequest;
use crate::tui::app::{App, Mode, Popup};

pub enum Action {
    None,
    Quit,
    Submit(QueryRequest),
    CopyTrace,
}

pub fn poll_event(timeout: Duration) -> std::io::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

pub fn handle_event(app: &mut App, event: Event) -> Action {
    match event {
        Event::Key(key) => handle_key(app, key),
        _ => Action::None,
    }
}

pub fn handle_key(app: &mut App, key: KeyEvent) -> Action {
    // global keys (work in any mode)
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    if app.popup != Popup::None {
        return handle_popup(app, key);
    }

    match app.mode {
        Mode::Normal => handle_normal_key(app, key),
        Mode::Insert => handle_insert_key(app, key),
    }
}

fn handle_popup(app: &mut App, key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.close_popup(),
        KeyCode::Char('j') | KeyCode::Down => app.popup_down(),
        KeyCode::Char('k') | KeyCode::Up => app.popup_up(),
        KeyCode::Enter => app.popup_select(),
        _ => {}
    }
    Action::None
}

fn submit(app: &mut App) -> Action {
    match app.submit() {
        Some(request) => Action::Submit(request),
        None => Action::None,
    }
}

fn handle_normal_key(app: &mut App, key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') => Action::Quit,

        // enter insert mode
        KeyCode::Char('i') => {
            app.enter_insert();
            Action::None
        }
        KeyCode::Char('a') | KeyCode::Char('A') => {
            app.move_cursor_end();
            app.enter_insert();
            Action::None
        }
        KeyCode::Char('I') => {
            app.move_cursor_start();
            app.enter_insert();
            Action::None
        }

        KeyCode::Tab => {
            app.cycle_panel();
            Action::None
        }

        KeyCode::Char('t') => {
            app.open_theme_popup();
            Action::None
        }
        KeyCode::Char('m') => {
            app.open_model_popup();
            Action::None
        }

        KeyCode::Char('y') => Action::CopyTrace,

        // scrolling
        KeyCode::Char('j') | KeyCode::Down => {
            app.scroll_down();
            Action::None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.scroll_up();
            Action::None
        }

        KeyCode::Enter => submit(app),

        _ => Action::None,
    }
}

fn handle_insert_key(app: &mut App, key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('a') => app.move_cursor_start(),
            KeyCode::Char('e') => app.move_cursor_end(),
            KeyCode::Char('u') => app.clear_query(),
            // ctrl+enter for newline
            KeyCode::Enter => app.insert_newline(),
            _ => {}
        }
        return Action::None;
    }

    // shift+enter for newline
    if key.modifiers.contains(KeyModifiers::SHIFT) && key.code == KeyCode::Enter {
        app.insert_newline();
        return Action::None;
    }

    match key.code {
        KeyCode::Esc => {
            app.exit_insert();
            Action::None
        }

        KeyCode::Enter => {
            app.exit_insert();
            submit(app)
        }

        KeyCode::Char(c) => {
            app.insert_char(c);
            Action::None
        }
        KeyCode::Backspace => {
            app.delete_char();
            Action::None
        }
        KeyCode::Delete => {
            app.delete_char_forward();
            Action::None
        }
        KeyCode::Left => {
            app.move_cursor_left();
            Action::None
        }
        KeyCode::Right => {
            app.move_cursor_right();
            Action::None
        }
        KeyCode::Home => {
            app.move_cursor_start();
            Action::None
        }
        KeyCode::End => {
            app.move_cursor_end();
            Action::None
        }

        _ => Action::None,
    }
}
