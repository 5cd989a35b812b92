use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use folio::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    /// Display currency, overriding the configured one
    #[arg(long, global = true)]
    currency: Option<String>,

    /// Print the data behind the command as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for folio::AppCommand {
    fn from(cmd: Commands) -> folio::AppCommand {
        match cmd {
            Commands::Summary => folio::AppCommand::Summary,
            Commands::Alloc { at } => folio::AppCommand::Alloc { at },
            Commands::History => folio::AppCommand::History,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display valued holdings with day change
    Summary,
    /// Display allocation by category
    Alloc {
        /// Epoch seconds; show the allocation of the latest snapshot at or before it
        #[arg(long)]
        at: Option<i64>,
    },
    /// Display the reconstructed value history
    History,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let options = folio::RunOptions {
        currency: cli.currency,
        json: cli.json,
    };
    let result = match cli.command {
        Some(Commands::Setup) => match cli.config_path.as_deref() {
            Some(path) => folio::cli::setup::setup_at_path(path),
            None => folio::cli::setup::setup(),
        },
        Some(cmd) => folio::run_command(cmd.into(), cli.config_path.as_deref(), &options).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
