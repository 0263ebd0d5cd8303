use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ops::commands::{self, PromptRequest};
use crate::tui::app::{App, Mode};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    // Any key dismisses a transient status message
    app.status_message = None;

    let map = app.cursor_map();
    app.cursor = map.clamp(app.cursor);
    let Some(entry) = map.resolve(app.cursor) else {
        return;
    };

    match (key.modifiers, key.code) {
        (KeyModifiers::NONE, KeyCode::Up) => {
            app.cursor = map.step(app.cursor, -1);
        }
        (KeyModifiers::NONE, KeyCode::Down) => {
            app.cursor = map.step(app.cursor, 1);
        }
        (KeyModifiers::NONE, KeyCode::Char('a')) => {
            open_prompt(app, commands::begin_add(entry));
        }
        (KeyModifiers::NONE, KeyCode::Char('e')) => {
            if let Some(request) = commands::begin_edit(&app.store, entry) {
                open_prompt(app, request);
            }
        }
        (KeyModifiers::NONE, KeyCode::Char('d')) => {
            commands::delete(&mut app.store, entry);
        }
        (KeyModifiers::NONE, KeyCode::Char(' ')) => {
            commands::toggle(&mut app.store, entry);
        }
        (KeyModifiers::NONE, KeyCode::Char('q')) => {
            app.should_quit = true;
        }
        _ => {}
    }

    app.clamp_cursor();
}

/// Enter prompt mode with the request's initial text and the caret at the end
fn open_prompt(app: &mut App, request: PromptRequest) {
    app.edit_buffer = request.initial.clone();
    app.edit_cursor = app.edit_buffer.len();
    app.prompt = Some(request);
    app.mode = Mode::Prompt;
}
