use std::io;
use std::path::{Path, PathBuf};

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::config_io::{data_file_path, read_config};
use crate::io::recovery::recovery_log_path;
use crate::io::store_io::{data_dir, load_store_or_empty, log_unsaved, save_store};
use crate::model::store::TaskStore;
use crate::ops::commands::PromptRequest;
use crate::ops::cursor_map::{CursorEntry, CursorMap};

use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Browsing the list
    Navigate,
    /// Typing one line of text for Add or Edit
    Prompt,
}

/// Main application state. Passed explicitly to every key handler.
pub struct App {
    pub store: TaskStore,
    /// Position in the cursor map (highlighted row)
    pub cursor: usize,
    /// First visible row of the task list
    pub scroll_offset: usize,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    /// Pending Add/Edit request while in prompt mode
    pub prompt: Option<PromptRequest>,
    /// Text typed into the prompt line
    pub edit_buffer: String,
    /// Caret position in `edit_buffer` (byte offset, on a grapheme boundary)
    pub edit_cursor: usize,
    /// Transient note on the status row (cleared by the next key)
    pub status_message: Option<String>,
}

impl App {
    pub fn new(store: TaskStore, theme: Theme) -> Self {
        App {
            store,
            cursor: 0,
            scroll_offset: 0,
            mode: Mode::Navigate,
            should_quit: false,
            theme,
            prompt: None,
            edit_buffer: String::new(),
            edit_cursor: 0,
            status_message: None,
        }
    }

    /// Fresh navigable view of the current store
    pub fn cursor_map(&self) -> CursorMap {
        CursorMap::build(&self.store)
    }

    /// Row under the cursor, after clamping
    pub fn current_entry(&self) -> Option<CursorEntry> {
        self.cursor_map().resolve(self.cursor)
    }

    /// Pull the cursor back inside the list after it shrank
    pub fn clamp_cursor(&mut self) {
        self.cursor = self.cursor_map().clamp(self.cursor);
    }
}

/// Run the TUI application in `dir` (the working directory when `None`)
pub fn run(dir: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let root = match dir {
        Some(d) => PathBuf::from(d),
        None => std::env::current_dir()?,
    };
    let config = read_config(&root)?;
    let data_path = data_file_path(&root, &config);

    let outcome = load_store_or_empty(&data_path);
    let writable = outcome.writable;
    let mut app = App::new(outcome.store, Theme::from_config(&config.ui));
    app.status_message = outcome.warning;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    let restored = restore_terminal(&mut terminal);

    // Saved exactly once, even when the loop or the restore failed
    save_on_exit(&data_path, &app.store, writable);

    restored?;
    result
}

fn restore_terminal(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<(), Box<dyn std::error::Error>> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

/// Write the store and report a failure on stderr. A data file that could
/// not be read at startup is never overwritten; the session's tasks go to
/// the recovery log instead.
fn save_on_exit(path: &Path, store: &TaskStore, writable: bool) {
    if !writable {
        eprintln!("warning: {} was not overwritten", path.display());
        if !store.is_empty() {
            log_unsaved(
                path,
                store,
                "save skipped",
                "data file could not be read at startup",
            );
            eprintln!(
                "tasks from this session were written to {}",
                recovery_log_path(&data_dir(path)).display()
            );
        }
        return;
    }
    if let Err(e) = save_store(path, store) {
        eprintln!("error: {}", e);
        eprintln!(
            "unsaved tasks were written to {}",
            recovery_log_path(&data_dir(path)).display()
        );
    }
}
