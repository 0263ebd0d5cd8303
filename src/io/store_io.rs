use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::io::recovery::{self, RecoveryCategory, RecoveryEntry};
use crate::model::section::Section;
use crate::model::store::TaskStore;
use crate::parse::{CodecError, parse_store, serialize_store};

/// Suffix appended to the data file name when a corrupt file is set aside
pub const CORRUPT_SUFFIX: &str = ".corrupt";

/// Error type for task data I/O
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{path} is corrupt: {source}")]
    Corrupt { path: PathBuf, source: CodecError },
}

/// Load the store from `path`.
///
/// A missing file is the first-run case and yields an empty store.
pub fn load_store(path: &Path) -> Result<TaskStore, StoreError> {
    let bytes = match fs::read(path) {
        Ok(b) => b,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(TaskStore::default()),
        Err(e) => {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };
    parse_store(&bytes).map_err(|source| StoreError::Corrupt {
        path: path.to_path_buf(),
        source,
    })
}

/// Result of a forgiving startup load
#[derive(Debug)]
pub struct LoadOutcome {
    pub store: TaskStore,
    /// User-facing note when the file could not be used
    pub warning: Option<String>,
    /// False when the file on disk holds data this session could not read.
    /// Such a file must not be replaced by the session's store.
    pub writable: bool,
}

/// Load for an interactive session: any failure falls back to an empty store.
///
/// Unreadable and corrupt files are noted in the recovery log. A corrupt
/// file is first copied to `<path>.corrupt` so the save at exit cannot
/// destroy it. An unreadable file, or a corrupt one whose copy failed, is
/// marked not writable.
pub fn load_store_or_empty(path: &Path) -> LoadOutcome {
    let err = match load_store(path) {
        Ok(store) => {
            return LoadOutcome {
                store,
                warning: None,
                writable: true,
            };
        }
        Err(e) => e,
    };

    let mut fields = vec![
        ("Source".to_string(), path.display().to_string()),
        ("Error".to_string(), err.to_string()),
    ];
    let (warning, writable) = match &err {
        StoreError::Corrupt { .. } => {
            let backup = backup_path(path);
            match fs::copy(path, &backup) {
                Ok(_) => {
                    fields.push(("Backup".to_string(), backup.display().to_string()));
                    (
                        format!(
                            "{} is corrupt; started empty (copy kept at {})",
                            path.display(),
                            backup.display()
                        ),
                        true,
                    )
                }
                Err(e) => {
                    fields.push(("Backup".to_string(), format!("failed: {}", e)));
                    (
                        format!(
                            "{} is corrupt; started empty, changes will not be saved",
                            path.display()
                        ),
                        false,
                    )
                }
            }
        }
        _ => (
            format!(
                "could not read {}; started empty, changes will not be saved",
                path.display()
            ),
            false,
        ),
    };

    recovery::log_recovery(
        &data_dir(path),
        RecoveryEntry::now(
            RecoveryCategory::Load,
            "data file unusable",
            fields,
            String::new(),
        ),
    );

    LoadOutcome {
        store: TaskStore::default(),
        warning: Some(warning),
        writable,
    }
}

/// Replace the data file with the serialized store.
///
/// The write is atomic. On failure the unsaved tasks are written to the
/// recovery log as text so they can be re-entered by hand.
pub fn save_store(path: &Path, store: &TaskStore) -> Result<(), StoreError> {
    let bytes = serialize_store(store);
    if let Err(e) = recovery::atomic_write(path, &bytes) {
        log_unsaved(path, store, "save failed", &e.to_string());
        return Err(StoreError::Write {
            path: path.to_path_buf(),
            source: e,
        });
    }
    Ok(())
}

/// Record a store that was not written to `path` as text in the recovery log
pub fn log_unsaved(path: &Path, store: &TaskStore, description: &str, reason: &str) {
    recovery::log_recovery(
        &data_dir(path),
        RecoveryEntry::now(
            RecoveryCategory::Write,
            description,
            vec![
                ("Target".to_string(), path.display().to_string()),
                ("Error".to_string(), reason.to_string()),
            ],
            render_plain(store),
        ),
    );
}

/// Where a corrupt data file is copied before starting empty
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(CORRUPT_SUFFIX);
    PathBuf::from(name)
}

/// Directory that holds the data file (and the recovery log)
pub fn data_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Plain-text listing of a store, one section heading then one task per line
pub fn render_plain(store: &TaskStore) -> String {
    let mut out = String::new();
    for section in Section::ALL {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&section.to_string());
        out.push('\n');
        for task in store.section(section) {
            out.push_str(&format!("- {} {}\n", task.checkbox(), task.printable_text()));
        }
    }
    out
}
