//! Super Agent CLI: the main entry point.
//!
//! Commands:
//! - `run`: Run one request through the orchestration loop
//! - `tools`: List built-in tools
//! - `config`: Show the resolved configuration

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "super-agent",
    about = "Super Agent: route, plan, think, act",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    log_json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single request and stream its events
    Run(commands::run::RunArgs),

    /// List the built-in tools
    Tools,

    /// Show the resolved configuration
    Config {
        /// Print a default config file instead
        #[arg(long)]
        default_toml: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing; stdout is reserved for events
    let filter = if cli.verbose { "debug" } else { "warn" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    if cli.log_json {
        builder.json().init();
    } else {
        builder.init();
    }

    match cli.command {
        Commands::Run(args) => commands::run::run(args).await?,
        Commands::Tools => commands::tools::run().await?,
        Commands::Config { default_toml } => commands::config_cmd::show(default_toml).await?,
    }

    Ok(())
}
