use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::section::Section;
use crate::model::task::Task;
use crate::ops::cursor_map::CursorEntry;
use crate::tui::app::App;
use crate::util::unicode::truncate_to_width;

/// Indent of task rows under their header
const TASK_INDENT: &str = "  ";

/// Render the flattened header + task list, scrolled to keep the cursor visible
pub fn render_task_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let map = app.cursor_map();
    let visible_height = area.height as usize;
    if visible_height == 0 {
        return;
    }

    app.cursor = map.clamp(app.cursor);
    let cursor = app.cursor;
    if cursor < app.scroll_offset {
        app.scroll_offset = cursor;
    } else if cursor >= app.scroll_offset + visible_height {
        app.scroll_offset = cursor + 1 - visible_height;
    }
    // Never leave blank rows at the bottom when the list could fill them
    app.scroll_offset = app
        .scroll_offset
        .min(map.len().saturating_sub(visible_height));
    let scroll = app.scroll_offset;

    let width = area.width as usize;
    let end = map.len().min(scroll + visible_height);
    let lines: Vec<Line> = map.entries()[scroll..end]
        .iter()
        .zip(scroll..end)
        .map(|(entry, row)| {
            let line = match *entry {
                CursorEntry::Header(section) => header_line(app, section, width),
                CursorEntry::Row(section, index) => match app.store.get(section, index) {
                    Some(task) => task_line(app, task, width),
                    None => Line::default(),
                },
            };
            if row == cursor {
                line.patch_style(Style::default().add_modifier(Modifier::REVERSED))
            } else {
                line
            }
        })
        .collect();

    let paragraph = Paragraph::new(lines).style(Style::default().bg(app.theme.background));
    frame.render_widget(paragraph, area);
}

fn header_line(app: &App, section: Section, width: usize) -> Line<'static> {
    let label = format!("=== {} Tasks ===", section.label());
    Line::from(Span::styled(
        truncate_to_width(&label, width),
        Style::default()
            .fg(app.theme.header)
            .add_modifier(Modifier::BOLD),
    ))
}

fn task_line(app: &App, task: &Task, width: usize) -> Line<'static> {
    let text = format!(
        "{}{} {}",
        TASK_INDENT,
        task.checkbox(),
        task.printable_text()
    );
    Line::from(Span::styled(
        truncate_to_width(&text, width),
        Style::default().fg(app.theme.task_color(task.done)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::store::TaskStore;
    use crate::tui::render::test_helpers::*;
    use insta::assert_snapshot;

    fn store_with_daily(n: usize) -> TaskStore {
        TaskStore {
            daily: (1..=n).map(|i| Task::new(format!("task {i}"))).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn scrolls_to_keep_cursor_visible() {
        let mut app = app_with_store(store_with_daily(4));
        // Map: Daily, task 1..4, Weekly, Monthly (7 rows) in a 5-row area
        app.cursor = 6;
        let output = render_to_string(TERM_W, 5, |frame, area| {
            render_task_list(frame, &mut app, area);
        });
        assert_eq!(app.scroll_offset, 2);
        assert_snapshot!(output, @r"
  [ ] task 2
  [ ] task 3
  [ ] task 4
=== Weekly Tasks ===
=== Monthly Tasks ===
");
    }

    #[test]
    fn scroll_follows_cursor_back_up() {
        let mut app = app_with_store(store_with_daily(4));
        app.scroll_offset = 2;
        app.cursor = 1;
        render_to_string(TERM_W, 5, |frame, area| {
            render_task_list(frame, &mut app, area);
        });
        assert_eq!(app.scroll_offset, 1);
    }

    #[test]
    fn stale_cursor_is_clamped_when_drawing() {
        let mut app = app_with_store(store_with_daily(1));
        app.cursor = 40;
        render_to_string(TERM_W, 10, |frame, area| {
            render_task_list(frame, &mut app, area);
        });
        assert_eq!(app.cursor, 3);
        assert_eq!(app.scroll_offset, 0);
    }

    #[test]
    fn long_and_odd_text_is_sanitized_and_truncated() {
        let store = TaskStore {
            weekly: vec![Task {
                text: b"tab\there \xFF and a very long tail".to_vec(),
                done: false,
            }],
            ..Default::default()
        };
        let mut app = app_with_store(store);
        let output = render_to_string(24, 5, |frame, area| {
            render_task_list(frame, &mut app, area);
        });
        assert_snapshot!(output, @r"
=== Daily Tasks ===
=== Weekly Tasks ===
  [ ] tab here � and a …
=== Monthly Tasks ===
");
    }
}
