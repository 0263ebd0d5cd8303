use crate::model::section::Section;
use crate::model::store::TaskStore;

/// One row of the navigable list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorEntry {
    /// The non-task label row that introduces a section
    Header(Section),
    /// A task: section plus zero-based index into that section's list
    Row(Section, usize),
}

impl CursorEntry {
    /// The section this row belongs to (or introduces)
    pub fn section(self) -> Section {
        match self {
            CursorEntry::Header(section) | CursorEntry::Row(section, _) => section,
        }
    }

    pub fn is_header(self) -> bool {
        matches!(self, CursorEntry::Header(_))
    }
}

/// The flattened view of a store: each section header followed by its tasks.
///
/// Always `3 + store.total_len()` entries long. Cheap to build, so it is
/// rebuilt after every key rather than kept in sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorMap {
    entries: Vec<CursorEntry>,
}

impl CursorMap {
    pub fn build(store: &TaskStore) -> Self {
        let mut entries = Vec::with_capacity(Section::ALL.len() + store.total_len());
        for section in Section::ALL {
            entries.push(CursorEntry::Header(section));
            entries.extend((0..store.section(section).len()).map(|i| CursorEntry::Row(section, i)));
        }
        CursorMap { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[CursorEntry] {
        &self.entries
    }

    /// Entry at exactly `position`, without clamping
    pub fn get(&self, position: usize) -> Option<CursorEntry> {
        self.entries.get(position).copied()
    }

    /// Pull a position back inside the map (`len - 1` at most, never below 0)
    pub fn clamp(&self, position: usize) -> usize {
        position.min(self.len().saturating_sub(1))
    }

    /// Entry under the cursor, clamping a stale position to the last row.
    /// `None` only for an empty map.
    pub fn resolve(&self, position: usize) -> Option<CursorEntry> {
        self.get(self.clamp(position))
    }

    /// Move a position by `delta` rows, stopping at either end
    pub fn step(&self, position: usize, delta: isize) -> usize {
        let position = self.clamp(position);
        self.clamp(position.saturating_add_signed(delta))
    }
}
