use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod cmd_eval;
mod exprlang;
mod model_io;
mod result_io;

#[derive(Parser)]
#[command(name = "dmn-eval", about = "DMN decision-table evaluator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a decision table against a variable binding
    Eval {
        /// Path to the JSON-serialized decision table
        #[arg(long)]
        table: PathBuf,

        /// Path to the JSON-serialized variable binding
        #[arg(long)]
        vars: PathBuf,
    },
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Eval { table, vars } => cmd_eval::run(table, vars),
    }
}
