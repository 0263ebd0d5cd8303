use super::section::Section;
use super::task::Task;

/// All tasks, one ordered list per section.
///
/// List order is display order and persistence order. Nothing sorts it; only
/// appending and removing change it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskStore {
    pub daily: Vec<Task>,
    pub weekly: Vec<Task>,
    pub monthly: Vec<Task>,
}

impl TaskStore {
    /// Tasks of one section
    pub fn section(&self, section: Section) -> &[Task] {
        match section {
            Section::Daily => &self.daily,
            Section::Weekly => &self.weekly,
            Section::Monthly => &self.monthly,
        }
    }

    /// Mutable task list of one section
    pub fn section_mut(&mut self, section: Section) -> &mut Vec<Task> {
        match section {
            Section::Daily => &mut self.daily,
            Section::Weekly => &mut self.weekly,
            Section::Monthly => &mut self.monthly,
        }
    }

    /// Task at `index` in `section`, if in bounds
    pub fn get(&self, section: Section, index: usize) -> Option<&Task> {
        self.section(section).get(index)
    }

    /// Mutable task at `index` in `section`, if in bounds
    pub fn get_mut(&mut self, section: Section, index: usize) -> Option<&mut Task> {
        self.section_mut(section).get_mut(index)
    }

    /// Number of tasks across all sections
    pub fn total_len(&self) -> usize {
        self.daily.len() + self.weekly.len() + self.monthly.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total_len() == 0
    }
}
