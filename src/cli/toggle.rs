//! `daybook done` command implementation

use anyhow::Result;
use clap::Args;

use super::resolve_number;
use crate::store::TaskStore;

#[derive(Args)]
pub struct DoneArgs {
    /// Task number as shown by `daybook list`
    number: usize,
}

pub fn run(store: &mut TaskStore, args: DoneArgs) -> Result<()> {
    let index = resolve_number(args.number, store)?;
    store.toggle_complete(index)?;

    if let Some(task) = store.get(index) {
        let state = if task.completed { "done" } else { "pending" };
        println!("#{} is now {}: {}", args.number, state, task.content);
    }
    Ok(())
}
