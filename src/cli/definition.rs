//! Command-line definition

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use super::add::AddArgs;
use super::calendar::CalendarArgs;
use super::list::ListArgs;
use super::remove::RemoveArgs;
use super::stats::StatsArgs;
use super::toggle::DoneArgs;
use super::transfer::{ExportArgs, ImportArgs};

#[derive(Parser)]
#[command(name = "daybook")]
#[command(about = "Personal task list with due dates and a calendar view")]
#[command(version)]
pub struct Cli {
    /// Task file to use instead of the configured one
    #[arg(long, global = true, env = "DAYBOOK_FILE")]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a new task
    Add(AddArgs),

    /// List tasks
    #[command(alias = "ls")]
    List(ListArgs),

    /// Toggle a task between done and pending
    Done(DoneArgs),

    /// Delete a task
    #[command(alias = "rm")]
    Remove(RemoveArgs),

    /// Show task counts
    Stats(StatsArgs),

    /// Copy the task file to a timestamped backup next to it
    Backup,

    /// Write all tasks to a file
    Export(ExportArgs),

    /// Append tasks from a file
    Import(ImportArgs),

    /// Show a month calendar with due dates marked
    #[command(alias = "cal")]
    Calendar(CalendarArgs),

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
