//! `daybook stats` command implementation

use anyhow::Result;
use chrono::Local;
use clap::Args;
use serde::Serialize;

use crate::store::TaskStore;

#[derive(Args)]
pub struct StatsArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct StatsJson {
    total: usize,
    completed: usize,
    pending: usize,
    overdue: usize,
}

fn collect(store: &TaskStore) -> StatsJson {
    let stats = store.stats();
    StatsJson {
        total: stats.total,
        completed: stats.completed,
        pending: stats.pending(),
        overdue: store.overdue(Local::now().date_naive()),
    }
}

pub fn run(store: &TaskStore, args: StatsArgs) -> Result<()> {
    let stats = collect(store);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("Total:     {}", stats.total);
    println!("Completed: {}", stats.completed);
    println!("Pending:   {}", stats.pending);
    if stats.overdue > 0 {
        println!("Overdue:   {}", stats.overdue);
    }
    Ok(())
}
