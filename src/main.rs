//! Daybook - personal task list with due dates and a calendar view

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use daybook::cli::{self, Cli, Commands};
use daybook::config::{self, Config};
use daybook::{logging, tui, TaskStore};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Completions need neither config nor data
    if let Some(Commands::Completion { shell }) = cli.command {
        generate(shell, &mut Cli::command(), "daybook", &mut std::io::stdout());
        return Ok(());
    }

    let config = Config::load()?;
    let data_file = config.data_file(cli.file.as_deref())?;

    // The log is diagnostics only, so a broken sink must not stop the app
    let log_guard = config::get_app_dir()
        .map_err(anyhow::Error::from)
        .and_then(|app_dir| logging::init(&config.logging, &app_dir));
    let _log_guard = match log_guard {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: diagnostic log disabled: {:#}", e);
            None
        }
    };

    let mut store = TaskStore::open(&data_file);

    match cli.command {
        Some(Commands::Add(args)) => cli::add::run(&mut store, args),
        Some(Commands::List(args)) => cli::list::run(&store, args),
        Some(Commands::Done(args)) => cli::toggle::run(&mut store, args),
        Some(Commands::Remove(args)) => cli::remove::run(&mut store, args),
        Some(Commands::Stats(args)) => cli::stats::run(&store, args),
        Some(Commands::Backup) => cli::transfer::run_backup(&store),
        Some(Commands::Export(args)) => cli::transfer::run_export(&store, args),
        Some(Commands::Import(args)) => cli::transfer::run_import(&mut store, args),
        Some(Commands::Calendar(args)) => cli::calendar::run(&store, args),
        None => tui::run(store),
        Some(Commands::Completion { .. }) => unreachable!(),
    }
}
