use crate::model::section::Section;
use crate::model::store::TaskStore;
use crate::model::task::Task;

/// Serialize a store into the on-disk layout.
///
/// For each section in `Section::ALL` order: a u64 little-endian task count,
/// then per task a u64 little-endian text length, the raw text bytes and one
/// done byte (0 or 1).
pub fn serialize_store(store: &TaskStore) -> Vec<u8> {
    let mut out = Vec::with_capacity(encoded_len(store));
    for section in Section::ALL {
        let tasks = store.section(section);
        write_u64(&mut out, tasks.len() as u64);
        for task in tasks {
            serialize_task(&mut out, task);
        }
    }
    out
}

fn serialize_task(out: &mut Vec<u8>, task: &Task) {
    write_u64(out, task.text.len() as u64);
    out.extend_from_slice(&task.text);
    out.push(u8::from(task.done));
}

fn write_u64(out: &mut Vec<u8>, value: u64) {
    out.extend_from_slice(&value.to_le_bytes());
}

/// Exact size of the serialized form
fn encoded_len(store: &TaskStore) -> usize {
    Section::ALL
        .iter()
        .map(|&s| {
            8 + store
                .section(s)
                .iter()
                .map(|t| 8 + t.text.len() + 1)
                .sum::<usize>()
        })
        .sum()
}
