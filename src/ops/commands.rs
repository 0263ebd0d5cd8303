use crate::model::section::Section;
use crate::model::store::TaskStore;

use super::cursor_map::CursorEntry;
use super::task_ops::{append_task, edit_task_text, remove_task, toggle_task};

/// Prompt line input is capped at this many bytes
pub const MAX_INPUT_LEN: usize = 255;

/// What a pending line prompt will do with the submitted text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Add(Section),
    Edit(Section, usize),
}

/// A request for one line of text from the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRequest {
    pub kind: PromptKind,
    /// Initial contents of the edit buffer
    pub initial: String,
}

impl PromptRequest {
    /// Label shown before the input ("Add Task" / "Edit Task")
    pub fn label(&self) -> &'static str {
        match self.kind {
            PromptKind::Add(_) => "Add Task",
            PromptKind::Edit(..) => "Edit Task",
        }
    }
}

/// Section a new task goes to: the header's own section, or the section of
/// the highlighted task
pub fn add_target(entry: CursorEntry) -> Section {
    entry.section()
}

/// Start adding a task at the highlighted row
pub fn begin_add(entry: CursorEntry) -> PromptRequest {
    PromptRequest {
        kind: PromptKind::Add(add_target(entry)),
        initial: String::new(),
    }
}

/// Start editing the highlighted task, pre-filled with its current text.
/// Headers and stale rows yield `None`.
pub fn begin_edit(store: &TaskStore, entry: CursorEntry) -> Option<PromptRequest> {
    let CursorEntry::Row(section, index) = entry else {
        return None;
    };
    let task = store.get(section, index)?;
    Some(PromptRequest {
        kind: PromptKind::Edit(section, index),
        initial: task.display_text().into_owned(),
    })
}

/// Apply submitted prompt text. Empty input cancels silently.
///
/// An Edit submitted unchanged is a no-op, so bytes that are not valid UTF-8
/// survive an untouched prefill.
pub fn complete_prompt(store: &mut TaskStore, request: &PromptRequest, input: &str) -> bool {
    if input.is_empty() {
        return false;
    }
    match request.kind {
        PromptKind::Add(section) => append_task(store, section, input),
        PromptKind::Edit(..) if input == request.initial => false,
        PromptKind::Edit(section, index) => edit_task_text(store, section, index, input),
    }
}

/// Delete the highlighted task; no-op on headers
pub fn delete(store: &mut TaskStore, entry: CursorEntry) -> bool {
    match entry {
        CursorEntry::Header(_) => false,
        CursorEntry::Row(section, index) => remove_task(store, section, index),
    }
}

/// Toggle the highlighted task; no-op on headers
pub fn toggle(store: &mut TaskStore, entry: CursorEntry) -> bool {
    match entry {
        CursorEntry::Header(_) => false,
        CursorEntry::Row(section, index) => toggle_task(store, section, index),
    }
}
