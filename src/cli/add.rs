//! `daybook add` command implementation

use anyhow::Result;
use clap::Args;

use crate::store::TaskStore;
use crate::task::NewTask;

#[derive(Args)]
pub struct AddArgs {
    /// What needs doing
    content: String,

    /// Due date (YYYY-MM-DD)
    #[arg(short, long, default_value = "")]
    due: String,

    /// Priority (high, normal, low)
    #[arg(short, long, default_value = "normal")]
    priority: String,

    /// Category label
    #[arg(short, long, default_value = "default")]
    category: String,
}

pub fn run(store: &mut TaskStore, args: AddArgs) -> Result<()> {
    let new = NewTask::parse(&args.content, &args.due, &args.priority, &args.category)?;
    let index = store.add(new)?;

    if let Some(task) = store.get(index) {
        println!("✓ Added #{}: {}", index + 1, task.to_line());
    }
    Ok(())
}
