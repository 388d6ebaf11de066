use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

mod config;
mod flows;
mod render;


#[derive(Parser, Debug)]
#[command(name = "pyvm")]
#[command(about = "Per-machine python runtime version manager", long_about = None)]
struct Cli {
    #[arg(long)]
    root: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Install {
        version: String,
    },
    Uninstall {
        version: String,
    },
    Use {
        version: String,
    },
    List,
    Available {
        #[arg(long)]
        all: bool,
    },
    Doctor,
    Completions {
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let layout = flows::resolve_layout(cli.root)?;

    match cli.command {
        Commands::Install { version } => flows::run_install(&layout, &version),
        Commands::Uninstall { version } => flows::run_uninstall(&layout, &version),
        Commands::Use { version } => flows::run_use(&layout, &version),
        Commands::List => flows::run_list(&layout),
        Commands::Available { all } => flows::run_available(&layout, all),
        Commands::Doctor => flows::run_doctor(&layout),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "pyvm", &mut std::io::stdout());
            Ok(())
        }
    }
}
