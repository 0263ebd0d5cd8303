pub mod status_row;
pub mod task_list;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};

use super::app::App;
use crate::util::unicode::truncate_to_width;

/// Key reference shown on the top row
pub const HELP_BANNER: &str =
    "Cadence | [a] Add  [e] Edit  [d] Delete  [↑↓] Navigate  [Space] Toggle  [q] Quit";

/// Draw the whole screen
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: banner | spacer | task list | status/prompt row
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    render_banner(frame, app, chunks[0]);
    task_list::render_task_list(frame, app, chunks[2]);
    status_row::render_status_row(frame, app, chunks[3]);
}

fn render_banner(frame: &mut Frame, app: &App, area: Rect) {
    let text = truncate_to_width(HELP_BANNER, area.width as usize);
    let banner = Paragraph::new(Line::from(text))
        .style(Style::default().fg(app.theme.dim).bg(app.theme.background));
    frame.render_widget(banner, area);
}
