use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::util::unicode::{display_width, skip_cells, truncate_to_width};

/// Render the bottom row: the prompt line while typing, otherwise any
/// status message
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let line = match app.mode {
        Mode::Navigate => match &app.status_message {
            Some(msg) => Line::from(Span::styled(
                truncate_to_width(msg, width),
                Style::default().fg(app.theme.highlight).bg(bg),
            )),
            None => Line::default(),
        },
        Mode::Prompt => {
            let label = match &app.prompt {
                Some(request) => format!("{}: ", request.label()),
                None => String::new(),
            };
            let label_width = display_width(&label);
            let room = width.saturating_sub(label_width + 1);

            // Scroll the buffer horizontally so the caret stays on screen
            let caret_col = display_width(&app.edit_buffer[..app.edit_cursor]);
            let start = skip_cells(&app.edit_buffer, caret_col.saturating_sub(room));
            let visible = truncate_to_width(&app.edit_buffer[start..], room + 1);
            let caret_x = label_width + display_width(&app.edit_buffer[start..app.edit_cursor]);

            if caret_x < width {
                frame.set_cursor_position(Position::new(area.x + caret_x as u16, area.y));
            }
            Line::from(vec![
                Span::styled(label, Style::default().fg(app.theme.highlight).bg(bg)),
                Span::styled(visible, Style::default().fg(app.theme.text_bright).bg(bg)),
            ])
        }
    };

    let paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
