use crate::model::section::Section;
use crate::model::store::TaskStore;
use crate::model::task::Task;

// Every mutation here is a silent no-op when the index is stale or the text
// is empty. Each returns whether the store changed.

/// Append an open task to the end of `section`
pub fn append_task(store: &mut TaskStore, section: Section, text: impl Into<Vec<u8>>) -> bool {
    let text = text.into();
    if text.is_empty() {
        return false;
    }
    store.section_mut(section).push(Task::new(text));
    true
}

/// Remove the task at `index`; later tasks shift down by one
pub fn remove_task(store: &mut TaskStore, section: Section, index: usize) -> bool {
    let tasks = store.section_mut(section);
    if index >= tasks.len() {
        return false;
    }
    tasks.remove(index);
    true
}

/// Replace a task's text. Empty text leaves the task unchanged.
pub fn edit_task_text(
    store: &mut TaskStore,
    section: Section,
    index: usize,
    text: impl Into<Vec<u8>>,
) -> bool {
    let text = text.into();
    if text.is_empty() {
        return false;
    }
    match store.get_mut(section, index) {
        Some(task) => {
            task.text = text;
            true
        }
        None => false,
    }
}

/// Flip a task's done flag
pub fn toggle_task(store: &mut TaskStore, section: Section, index: usize) -> bool {
    match store.get_mut(section, index) {
        Some(task) => {
            task.done = !task.done;
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_weekly(texts: &[&str]) -> TaskStore {
        let mut store = TaskStore::default();
        for text in texts {
            append_task(&mut store, Section::Weekly, *text);
        }
        store
    }

    #[test]
    fn append_adds_open_task_at_end() {
        let mut store = store_with_weekly(&["a", "b"]);
        assert!(append_task(&mut store, Section::Weekly, "c"));
        assert_eq!(store.weekly.last().unwrap(), &Task::new("c"));
        assert!(store.daily.is_empty());
        assert!(store.monthly.is_empty());
    }

    #[test]
    fn append_rejects_empty_text() {
        let mut store = TaskStore::default();
        assert!(!append_task(&mut store, Section::Daily, ""));
        assert!(store.is_empty());
    }

    #[test]
    fn append_allows_duplicates() {
        let mut store = store_with_weekly(&["same", "same"]);
        assert!(append_task(&mut store, Section::Weekly, "same"));
        assert_eq!(store.weekly.len(), 3);
    }

    #[test]
    fn remove_closes_the_gap() {
        let mut store = store_with_weekly(&["first", "second"]);
        assert!(remove_task(&mut store, Section::Weekly, 0));
        assert_eq!(store.weekly, vec![Task::new("second")]);
    }

    #[test]
    fn remove_out_of_range_is_noop() {
        let mut store = store_with_weekly(&["only"]);
        let before = store.clone();
        assert!(!remove_task(&mut store, Section::Weekly, 1));
        assert!(!remove_task(&mut store, Section::Daily, 0));
        assert_eq!(store, before);
    }

    #[test]
    fn edit_replaces_text_but_keeps_done() {
        let mut store = store_with_weekly(&["old"]);
        toggle_task(&mut store, Section::Weekly, 0);
        assert!(edit_task_text(&mut store, Section::Weekly, 0, "new"));
        assert_eq!(store.weekly[0].text, b"new");
        assert!(store.weekly[0].done);
    }

    #[test]
    fn edit_with_empty_text_cancels() {
        let mut store = store_with_weekly(&["keep me"]);
        assert!(!edit_task_text(&mut store, Section::Weekly, 0, ""));
        assert_eq!(store.weekly[0].text, b"keep me");
    }

    #[test]
    fn edit_out_of_range_is_noop() {
        let mut store = store_with_weekly(&["x"]);
        assert!(!edit_task_text(&mut store, Section::Weekly, 5, "y"));
        assert_eq!(store.weekly[0].text, b"x");
    }

    #[test]
    fn toggle_flips_back_and_forth() {
        let mut store = store_with_weekly(&["x"]);
        assert!(toggle_task(&mut store, Section::Weekly, 0));
        assert!(store.weekly[0].done);
        assert!(toggle_task(&mut store, Section::Weekly, 0));
        assert!(!store.weekly[0].done);
        assert!(!toggle_task(&mut store, Section::Monthly, 0));
    }
}
