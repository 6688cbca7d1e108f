use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod build;
mod commands;
mod config;

#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long, global = true, default_value = "false")]
    verbose: bool,

    /// The command to execute
    #[command(subcommand)]
    command: PagechainCommand,
}

#[derive(Parser)]
struct InitArgs {
    /// The path to initialize the project in
    path: PathBuf,

    /// Whether to create the directory if it doesn't exist
    #[arg(short, long, default_value = "false")]
    create: bool,
}

#[derive(Parser)]
struct BuildArgs {
    /// The path to the configuration file
    #[arg(short, long, default_value = "pagechain.yaml")]
    config_file: Option<PathBuf>,
}

#[derive(Parser)]
struct RoutesArgs {
    /// The path to the configuration file
    #[arg(short, long, default_value = "pagechain.yaml")]
    config_file: Option<PathBuf>,

    /// Print one JSON object per page and redirect
    #[arg(long, default_value = "false")]
    json: bool,
}

#[derive(Parser)]
struct CleanArgs {
    /// The path to the configuration file
    #[arg(short, long, default_value = "pagechain.yaml")]
    config_file: Option<PathBuf>,

    /// Only print what would be deleted
    #[arg(short, long, default_value = "false")]
    dry_run: bool,
}

#[derive(Subcommand)]
enum PagechainCommand {
    /// Initialize a new pagechain project
    Init(InitArgs),

    /// Generate the page manifest and redirects
    Build(BuildArgs),

    /// Print every page route and redirect without writing anything
    Routes(RoutesArgs),

    /// Delete the output directory
    Clean(CleanArgs),
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();
    init_tracing(args.verbose);

    match args.command {
        PagechainCommand::Init(args) => {
            commands::init::run(&args).await?;
        }
        PagechainCommand::Build(args) => {
            commands::build::run(&args).await?;
        }
        PagechainCommand::Routes(args) => {
            commands::routes::run(&args).await?;
        }
        PagechainCommand::Clean(args) => {
            commands::clean::run(&args).await?;
        }
    }

    Ok(())
}
