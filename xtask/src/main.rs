//! xtask - Development tasks for daybook

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::fs;
use std::path::Path;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tasks for daybook")]
struct Xtask {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate CLI documentation from clap definitions
    GenDocs,

    /// Write shell completion scripts for packaging
    GenCompletions {
        /// Output directory
        #[arg(long, default_value = "dist/completions")]
        out: String,
    },
}

fn main() {
    let args = Xtask::parse();
    match args.command {
        Commands::GenDocs => generate_cli_docs(),
        Commands::GenCompletions { out } => generate_completions(Path::new(&out)),
    }
}

fn generate_cli_docs() {
    let markdown = clap_markdown::help_markdown::<daybook::cli::Cli>();

    let docs_dir = Path::new("docs/cli");
    fs::create_dir_all(docs_dir).expect("Failed to create docs/cli directory");

    let output_path = docs_dir.join("reference.md");
    fs::write(&output_path, markdown).expect("Failed to write CLI reference");

    println!("Generated CLI documentation at {}", output_path.display());
}

fn generate_completions(out_dir: &Path) {
    fs::create_dir_all(out_dir).expect("Failed to create completions directory");

    for shell in [Shell::Bash, Shell::Zsh, Shell::Fish] {
        let mut cmd = daybook::cli::Cli::command();
        let path = clap_complete::generate_to(shell, &mut cmd, "daybook", out_dir)
            .expect("Failed to write completion script");
        println!("Generated {} completions at {}", shell, path.display());
    }
}
