//! `daybook remove` command implementation

use anyhow::Result;
use clap::Args;
use std::io::{self, Write};

use super::resolve_number;
use crate::store::TaskStore;

#[derive(Args)]
pub struct RemoveArgs {
    /// Task number as shown by `daybook list`
    number: usize,

    /// Skip the confirmation prompt
    #[arg(short = 'y', long)]
    yes: bool,
}

pub fn run(store: &mut TaskStore, args: RemoveArgs) -> Result<()> {
    let index = resolve_number(args.number, store)?;
    let content = store
        .get(index)
        .map(|t| t.content.clone())
        .unwrap_or_default();

    if !args.yes {
        print!("Delete #{} \"{}\"? (y/N): ", args.number, content);
        io::stdout().flush()?;

        let mut response = String::new();
        io::stdin().read_line(&mut response)?;
        if !matches!(response.trim().to_lowercase().as_str(), "y" | "yes") {
            println!("Cancelled.");
            return Ok(());
        }
    }

    store.delete(index)?;
    println!("✓ Deleted #{}: {}", args.number, content);
    Ok(())
}
