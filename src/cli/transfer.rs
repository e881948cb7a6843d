//! `daybook backup`, `export` and `import` command implementations

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use crate::store::TaskStore;

#[derive(Args)]
pub struct ExportArgs {
    /// Destination file
    path: PathBuf,
}

#[derive(Args)]
pub struct ImportArgs {
    /// File written by `daybook export` (or a copy of the task file)
    path: PathBuf,
}

pub fn run_backup(store: &TaskStore) -> Result<()> {
    let target = store.backup().context("Backup failed")?;
    println!("✓ Backed up to {}", target.display());
    Ok(())
}

pub fn run_export(store: &TaskStore, args: ExportArgs) -> Result<()> {
    store
        .export(&args.path)
        .with_context(|| format!("Export to {} failed", args.path.display()))?;
    println!("✓ Exported {} tasks to {}", store.len(), args.path.display());
    Ok(())
}

pub fn run_import(store: &mut TaskStore, args: ImportArgs) -> Result<()> {
    let count = store
        .import_from(&args.path)
        .with_context(|| format!("Import from {} failed", args.path.display()))?;
    println!(
        "✓ Imported {} tasks from {} ({} total)",
        count,
        args.path.display(),
        store.len()
    );
    Ok(())
}
