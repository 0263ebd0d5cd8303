use std::borrow::Cow;

/// Checkbox glyphs as shown in the task list
const DONE_BOX: &str = "[x]";
const OPEN_BOX: &str = "[ ]";

/// A single task. Tasks have no identity beyond their position in a section.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Task {
    /// Raw text bytes. Not guaranteed to be valid UTF-8 when loaded from disk.
    pub text: Vec<u8>,
    /// Completion flag
    pub done: bool,
}

impl Task {
    /// Create an open (not done) task
    pub fn new(text: impl Into<Vec<u8>>) -> Self {
        Task {
            text: text.into(),
            done: false,
        }
    }

    /// Text for display, with invalid UTF-8 sequences replaced
    pub fn display_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.text)
    }

    /// Single-line display text with control characters shown as spaces
    pub fn printable_text(&self) -> String {
        self.display_text()
            .chars()
            .map(|c| if c.is_control() { ' ' } else { c })
            .collect()
    }

    /// The checkbox used in list rows
    pub fn checkbox(&self) -> &'static str {
        if self.done { DONE_BOX } else { OPEN_BOX }
    }
}
