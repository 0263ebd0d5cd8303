use serde::Serialize;

use crate::model::section::Section;
use crate::model::store::TaskStore;
use crate::model::task::Task;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskJson {
    pub index: usize,
    /// Lossy UTF-8 rendering of the stored bytes
    pub text: String,
    pub done: bool,
}

#[derive(Serialize)]
pub struct SectionJson {
    pub section: Section,
    pub tasks: Vec<TaskJson>,
}

fn task_to_json(index: usize, task: &Task) -> TaskJson {
    TaskJson {
        index,
        text: task.display_text().into_owned(),
        done: task.done,
    }
}

/// One entry per listed section, in display order
pub fn sections_to_json(store: &TaskStore, only: Option<Section>) -> Vec<SectionJson> {
    listed_sections(only)
        .map(|section| SectionJson {
            section,
            tasks: store
                .section(section)
                .iter()
                .enumerate()
                .map(|(i, t)| task_to_json(i, t))
                .collect(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Text output
// ---------------------------------------------------------------------------

/// Human-readable listing: a header per section, then `index [x] text` rows
pub fn format_list(store: &TaskStore, only: Option<Section>) -> String {
    let mut out = String::new();
    for section in listed_sections(only) {
        out.push_str(&format!("=== {} Tasks ===\n", section.label()));
        for (i, task) in store.section(section).iter().enumerate() {
            out.push_str(&format!("{:>3} {} {}\n", i, task.checkbox(), task.printable_text()));
        }
    }
    out
}

fn listed_sections(only: Option<Section>) -> impl Iterator<Item = Section> {
    Section::ALL
        .into_iter()
        .filter(move |s| only.is_none_or(|o| o == *s))
}
