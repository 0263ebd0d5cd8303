use std::path::{Path, PathBuf};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io::{self, ConfigError};
use crate::io::recovery;
use crate::io::store_io::{self, StoreError, data_dir};
use crate::model::section::Section;
use crate::model::store::TaskStore;
use crate::ops::task_ops;

/// Errors surfaced by CLI subcommands
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("cannot resolve -C path '{dir}': {source}")]
    Dir {
        dir: String,
        source: std::io::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("no {section} task at index {index}")]
    NotFound { section: Section, index: usize },
    #[error("task text must not be empty")]
    EmptyText,
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let root = resolve_root(cli.dir.as_deref())?;

    match cli.command {
        None => Ok(()),
        Some(cmd) => match cmd {
            // Read commands
            Commands::List(args) => cmd_list(&root, args, json),
            Commands::Recovery(args) => cmd_recovery(&root, args, json),

            // Write commands
            Commands::Add(args) => cmd_add(&root, args),
            Commands::Edit(args) => cmd_edit(&root, args),
            Commands::Toggle(args) => cmd_toggle(&root, args),
            Commands::Rm(args) => cmd_rm(&root, args),
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn resolve_root(dir: Option<&str>) -> Result<PathBuf, CliError> {
    match dir {
        Some(d) => std::fs::canonicalize(d).map_err(|source| CliError::Dir {
            dir: d.to_string(),
            source,
        }),
        None => std::env::current_dir().map_err(|source| CliError::Dir {
            dir: ".".to_string(),
            source,
        }),
    }
}

fn data_path(root: &Path) -> Result<PathBuf, CliError> {
    let config = config_io::read_config(root)?;
    Ok(config_io::data_file_path(root, &config))
}

/// Load strictly: a corrupt file is an error here, never silently replaced
fn load(root: &Path) -> Result<(PathBuf, TaskStore), CliError> {
    let path = data_path(root)?;
    let store = store_io::load_store(&path)?;
    Ok((path, store))
}

fn save(path: &Path, store: &TaskStore) -> Result<(), CliError> {
    store_io::save_store(path, store)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(root: &Path, args: ListArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (_, store) = load(root)?;
    if json {
        let out = sections_to_json(&store, args.section);
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print!("{}", format_list(&store, args.section));
    }
    Ok(())
}

fn cmd_recovery(
    root: &Path,
    args: RecoveryArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let path = data_path(root)?;
    let entries = recovery::read_recovery_entries(&data_dir(&path), args.limit);

    if json {
        let out: Vec<_> = entries.iter().map(|e| e.to_json()).collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No recovery entries.");
        return Ok(());
    }
    for entry in &entries {
        print!("{}", entry.to_display_markdown());
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(root: &Path, args: AddArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (path, mut store) = load(root)?;
    if !task_ops::append_task(&mut store, args.section, args.text) {
        return Err(CliError::EmptyText.into());
    }
    save(&path, &store)?;
    println!("{}", store.section(args.section).len() - 1);
    Ok(())
}

fn cmd_edit(root: &Path, args: EditArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.text.is_empty() {
        return Err(CliError::EmptyText.into());
    }
    let (path, mut store) = load(root)?;
    if !task_ops::edit_task_text(&mut store, args.section, args.index, args.text) {
        return Err(not_found(args.section, args.index).into());
    }
    save(&path, &store)?;
    Ok(())
}

fn cmd_toggle(root: &Path, args: TaskRef) -> Result<(), Box<dyn std::error::Error>> {
    let (path, mut store) = load(root)?;
    if !task_ops::toggle_task(&mut store, args.section, args.index) {
        return Err(not_found(args.section, args.index).into());
    }
    save(&path, &store)?;
    if let Some(task) = store.get(args.section, args.index) {
        println!("{} {}", task.checkbox(), task.display_text());
    }
    Ok(())
}

fn cmd_rm(root: &Path, args: TaskRef) -> Result<(), Box<dyn std::error::Error>> {
    let (path, mut store) = load(root)?;
    if !task_ops::remove_task(&mut store, args.section, args.index) {
        return Err(not_found(args.section, args.index).into());
    }
    save(&path, &store)?;
    Ok(())
}

fn not_found(section: Section, index: usize) -> CliError {
    CliError::NotFound { section, index }
}
