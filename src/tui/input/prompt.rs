use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ops::commands::{self, MAX_INPUT_LEN};
use crate::tui::app::{App, Mode};
use crate::util::unicode::{next_grapheme_boundary, prev_grapheme_boundary};

/// Single-line editing. Enter submits; there is no separate cancel key, an
/// empty submission is the cancel.
pub(super) fn handle_prompt(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Enter) => submit_prompt(app),
        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => insert_char(app, c),
        (_, KeyCode::Backspace) => {
            if let Some(prev) = prev_grapheme_boundary(&app.edit_buffer, app.edit_cursor) {
                app.edit_buffer.drain(prev..app.edit_cursor);
                app.edit_cursor = prev;
            }
        }
        (_, KeyCode::Delete) => {
            if let Some(next) = next_grapheme_boundary(&app.edit_buffer, app.edit_cursor) {
                app.edit_buffer.drain(app.edit_cursor..next);
            }
        }
        (_, KeyCode::Left) => {
            if let Some(prev) = prev_grapheme_boundary(&app.edit_buffer, app.edit_cursor) {
                app.edit_cursor = prev;
            }
        }
        (_, KeyCode::Right) => {
            if let Some(next) = next_grapheme_boundary(&app.edit_buffer, app.edit_cursor) {
                app.edit_cursor = next;
            }
        }
        (_, KeyCode::Home) => app.edit_cursor = 0,
        (_, KeyCode::End) => app.edit_cursor = app.edit_buffer.len(),
        _ => {}
    }
}

fn insert_char(app: &mut App, c: char) {
    if c.is_control() || app.edit_buffer.len() + c.len_utf8() > MAX_INPUT_LEN {
        return;
    }
    app.edit_buffer.insert(app.edit_cursor, c);
    app.edit_cursor += c.len_utf8();
}

/// Hand the line to the pending command and return to browsing
fn submit_prompt(app: &mut App) {
    let input = std::mem::take(&mut app.edit_buffer);
    if let Some(request) = app.prompt.take() {
        commands::complete_prompt(&mut app.store, &request, &input);
    }
    app.edit_cursor = 0;
    app.mode = Mode::Navigate;
    app.clamp_cursor();
}
