use clap::{Args, Parser, Subcommand};

use crate::model::section::Section;

#[derive(Parser)]
#[command(name = "cadence", about = concat!("cadence v", env!("CARGO_PKG_VERSION"), " - daily, weekly and monthly tasks"), version)]
pub struct Cli {
    /// No subcommand opens the interactive task list
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run as if started in this directory
    #[arg(short = 'C', long = "dir", global = true)]
    pub dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List tasks
    List(ListArgs),
    /// Append a task to a section
    Add(AddArgs),
    /// Replace a task's text
    Edit(EditArgs),
    /// Flip a task between done and open
    Toggle(TaskRef),
    /// Remove a task
    Rm(TaskRef),
    /// Show the recovery log
    Recovery(RecoveryArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// Only this section (daily, weekly, monthly)
    pub section: Option<Section>,
}

#[derive(Args)]
pub struct AddArgs {
    /// Section to add to (daily, weekly, monthly)
    pub section: Section,
    /// Task text
    pub text: String,
}

#[derive(Args)]
pub struct EditArgs {
    /// Section of the task
    pub section: Section,
    /// Zero-based index within the section
    pub index: usize,
    /// New text
    pub text: String,
}

#[derive(Args)]
pub struct TaskRef {
    /// Section of the task
    pub section: Section,
    /// Zero-based index within the section
    pub index: usize,
}

#[derive(Args)]
pub struct RecoveryArgs {
    /// Show only the N most recent entries
    #[arg(long)]
    pub limit: Option<usize>,
}
