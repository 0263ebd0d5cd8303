use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tempfile::NamedTempFile;

/// File name of the recovery log, kept next to the data file.
pub const RECOVERY_LOG_NAME: &str = ".cadence-recovery.log";

/// Written at the top of a new recovery log.
const FILE_HEADER: &str = "\
<!-- cadence recovery log: append-only record of task data that could not
     be loaded or saved normally. If tasks went missing, look here.
     View with: cadence recovery
     Safe to delete once you have what you need. -->

---
";

/// Separates the timestamp from the category in an entry header line.
const HEADER_SEP: &str = " - ";

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

/// Category of a recovery entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryCategory {
    /// The data file could not be read or decoded at startup
    Load,
    /// The data file could not be written
    Write,
}

impl fmt::Display for RecoveryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecoveryCategory::Load => write!(f, "load"),
            RecoveryCategory::Write => write!(f, "write"),
        }
    }
}

impl RecoveryCategory {
    pub fn parse_category(s: &str) -> Option<Self> {
        match s {
            "load" => Some(RecoveryCategory::Load),
            "write" => Some(RecoveryCategory::Write),
            _ => None,
        }
    }
}

/// A single entry in the recovery log.
#[derive(Debug, Clone)]
pub struct RecoveryEntry {
    pub timestamp: DateTime<Utc>,
    pub category: RecoveryCategory,
    pub description: String,
    pub fields: Vec<(String, String)>,
    pub body: String,
}

impl RecoveryEntry {
    /// Entry stamped with the current time
    pub fn now(
        category: RecoveryCategory,
        description: impl Into<String>,
        fields: Vec<(String, String)>,
        body: String,
    ) -> Self {
        RecoveryEntry {
            timestamp: Utc::now(),
            category,
            description: description.into(),
            fields,
            body,
        }
    }
}

/// Return the path to the recovery log file.
pub fn recovery_log_path(dir: &Path) -> PathBuf {
    dir.join(RECOVERY_LOG_NAME)
}

// ---------------------------------------------------------------------------
// Atomic file write
// ---------------------------------------------------------------------------

/// Write `content` to `path` atomically using a temp file + rename.
/// The previous contents survive intact if any step fails.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Writing entries
// ---------------------------------------------------------------------------

impl RecoveryEntry {
    /// Format this entry as a markdown block for the recovery log.
    fn to_markdown(&self) -> String {
        let mut out = format!(
            "## {}{}{}: {}\n\n",
            self.timestamp
                .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            HEADER_SEP,
            self.category,
            self.description,
        );

        for (key, value) in &self.fields {
            out.push_str(&format!("{}: {}\n", key, value));
        }

        if !self.body.is_empty() {
            out.push_str("\n```text\n");
            out.push_str(&self.body);
            if !self.body.ends_with('\n') {
                out.push('\n');
            }
            out.push_str("```\n");
        }

        out.push_str("\n---\n");
        out
    }
}

/// Append a recovery entry to the log in `dir`. Errors are swallowed and
/// printed to stderr.
pub fn log_recovery(dir: &Path, entry: RecoveryEntry) {
    if let Err(e) = log_recovery_inner(dir, &entry) {
        eprintln!("warning: could not write to recovery log: {}", e);
    }
}

fn log_recovery_inner(dir: &Path, entry: &RecoveryEntry) -> io::Result<()> {
    let path = recovery_log_path(dir);
    let needs_header = std::fs::metadata(&path).map_or(true, |m| m.len() == 0);

    let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
    if needs_header {
        file.write_all(FILE_HEADER.as_bytes())?;
    }
    file.write_all(entry.to_markdown().as_bytes())?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Reading entries
// ---------------------------------------------------------------------------

/// Read recovery entries from the log in `dir`, most recent first.
pub fn read_recovery_entries(dir: &Path, limit: Option<usize>) -> Vec<RecoveryEntry> {
    let content = match std::fs::read_to_string(recovery_log_path(dir)) {
        Ok(c) => c,
        Err(_) => return Vec::new(),
    };

    let mut entries = parse_entries(&content);
    if let Some(n) = limit {
        let skip = entries.len().saturating_sub(n);
        entries.drain(..skip);
    }
    entries.reverse();
    entries
}

/// Parse all entries from the log content, oldest first.
fn parse_entries(content: &str) -> Vec<RecoveryEntry> {
    let mut entries = Vec::new();
    let mut lines = content.lines();

    while let Some(line) = lines.next() {
        let Some(header) = line.strip_prefix("## ") else {
            continue;
        };
        let Some((timestamp, category, description)) = parse_entry_header(header) else {
            continue;
        };

        let mut fields = Vec::new();
        let mut body = String::new();
        let mut in_code_block = false;

        for line in lines.by_ref() {
            if in_code_block {
                if line == "```" {
                    in_code_block = false;
                } else {
                    if !body.is_empty() {
                        body.push('\n');
                    }
                    body.push_str(line);
                }
                continue;
            }
            if line == "---" || line.starts_with("## ") {
                break;
            }
            if line.starts_with("```") {
                in_code_block = true;
                continue;
            }
            if let Some((key, value)) = line.trim().split_once(": ") {
                fields.push((key.to_string(), value.to_string()));
            }
        }

        entries.push(RecoveryEntry {
            timestamp,
            category,
            description,
            fields,
            body,
        });
    }

    entries
}

/// Parse an entry header: `<timestamp> - <category>: <description>`
fn parse_entry_header(header: &str) -> Option<(DateTime<Utc>, RecoveryCategory, String)> {
    let (timestamp_str, rest) = header.split_once(HEADER_SEP)?;
    let timestamp = DateTime::parse_from_rfc3339(timestamp_str)
        .ok()?
        .with_timezone(&Utc);
    let (category_str, description) = rest.split_once(": ")?;
    let category = RecoveryCategory::parse_category(category_str)?;
    Some((timestamp, category, description.to_string()))
}

impl RecoveryEntry {
    /// Serialize to JSON value for `cadence recovery --json`.
    pub fn to_json(&self) -> serde_json::Value {
        let fields: serde_json::Map<String, serde_json::Value> = self
            .fields
            .iter()
            .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
            .collect();

        serde_json::json!({
            "timestamp": self.timestamp.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            "category": self.category.to_string(),
            "description": self.description,
            "fields": fields,
            "body": self.body,
        })
    }

    /// Raw markdown, as stored in the log
    pub fn to_display_markdown(&self) -> String {
        self.to_markdown()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use tempfile::TempDir;

    fn make_entry(category: RecoveryCategory, desc: &str, body: &str) -> RecoveryEntry {
        RecoveryEntry::now(
            category,
            desc,
            vec![
                ("Source".to_string(), "tasks.dat".to_string()),
                ("Error".to_string(), "truncated data".to_string()),
            ],
            body.to_string(),
        )
    }

    #[test]
    fn entry_formatting() {
        let entry = make_entry(RecoveryCategory::Load, "corrupt data file", "some content");
        let md = entry.to_markdown();
        assert!(md.starts_with("## "));
        assert!(md.contains(" - load: corrupt data file"));
        assert!(md.contains("Source: tasks.dat"));
        assert!(md.contains("```text\nsome content\n```"));
        assert!(md.ends_with("---\n"));
    }

    #[test]
    fn empty_body_has_no_fence() {
        let entry = make_entry(RecoveryCategory::Write, "save failed", "");
        assert!(!entry.to_markdown().contains("```"));
    }

    #[test]
    fn log_and_read_most_recent_first() {
        let tmp = TempDir::new().unwrap();
        log_recovery(tmp.path(), make_entry(RecoveryCategory::Load, "first", "b1"));
        log_recovery(tmp.path(), make_entry(RecoveryCategory::Write, "second", "b2"));

        let entries = read_recovery_entries(tmp.path(), None);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].description, "second");
        assert_eq!(entries[0].category, RecoveryCategory::Write);
        assert_eq!(entries[1].description, "first");
    }

    #[test]
    fn read_with_limit_keeps_newest() {
        let tmp = TempDir::new().unwrap();
        for i in 0..4 {
            log_recovery(
                tmp.path(),
                make_entry(RecoveryCategory::Write, &format!("entry {i}"), ""),
            );
        }
        let entries = read_recovery_entries(tmp.path(), Some(2));
        let descs: Vec<_> = entries.iter().map(|e| e.description.as_str()).collect();
        assert_eq!(descs, vec!["entry 3", "entry 2"]);
    }

    #[test]
    fn round_trip_fields_and_body() {
        let tmp = TempDir::new().unwrap();
        let body = "daily\n- [ ] Buy milk\n\nweekly\n- [x] Laundry";
        log_recovery(tmp.path(), make_entry(RecoveryCategory::Write, "save failed", body));

        let entries = read_recovery_entries(tmp.path(), None);
        assert_eq!(entries.len(), 1);
        assert_eq!(
            entries[0].fields,
            vec![
                ("Source".to_string(), "tasks.dat".to_string()),
                ("Error".to_string(), "truncated data".to_string()),
            ]
        );
        assert_eq!(entries[0].body, body);
    }

    #[test]
    fn file_header_written_once() {
        let tmp = TempDir::new().unwrap();
        log_recovery(tmp.path(), make_entry(RecoveryCategory::Load, "a", ""));
        log_recovery(tmp.path(), make_entry(RecoveryCategory::Load, "b", ""));

        let content = std::fs::read_to_string(recovery_log_path(tmp.path())).unwrap();
        assert!(content.starts_with("<!-- cadence recovery log"));
        assert_eq!(content.matches("<!-- cadence").count(), 1);
    }

    #[test]
    fn read_missing_log_is_empty() {
        let tmp = TempDir::new().unwrap();
        assert!(read_recovery_entries(tmp.path(), None).is_empty());
    }

    #[test]
    fn parse_header() {
        let (ts, cat, desc) =
            parse_entry_header("2026-02-10T14:32:05Z - write: save failed").unwrap();
        assert_eq!(ts.year(), 2026);
        assert_eq!(cat, RecoveryCategory::Write);
        assert_eq!(desc, "save failed");
        assert!(parse_entry_header("garbage").is_none());
        assert!(parse_entry_header("2026-02-10T14:32:05Z - unknown: x").is_none());
    }

    #[test]
    fn atomic_write_replaces_contents() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tasks.dat");
        atomic_write(&path, b"hello world").unwrap();
        atomic_write(&path, b"bye").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"bye");
    }

    #[test]
    fn entry_to_json() {
        let entry = make_entry(RecoveryCategory::Load, "corrupt data file", "x");
        let json = entry.to_json();
        assert_eq!(json["category"], "load");
        assert_eq!(json["description"], "corrupt data file");
        assert_eq!(json["fields"]["Source"], "tasks.dat");
        assert_eq!(json["body"], "x");
    }
}
