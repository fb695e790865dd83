mod commands;
mod input;
mod render;
mod telemetry;

use anyhow::Result;
use clap::{Parser, Subcommand};
use recruitcal_core::config::{SchedulerConfig, parse_timezone};

#[derive(Parser)]
#[command(name = "recruitcal")]
#[command(about = "Schedule candidate interviews from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive scheduling session (default)
    Session,
    /// List the configured candidates
    Pool {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Give every candidate a random interview slot in a month
    AutoAssign {
        /// Any date in the target month, YYYY-MM-DD (defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Seed for reproducible assignments
        #[arg(long)]
        seed: Option<u64>,

        /// Print the assigned interviews as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the active configuration
    Config,
}

fn main() -> Result<()> {
    telemetry::init_tracing();

    let cli = Cli::parse();
    let config = load_config()?;

    match cli.command.unwrap_or(Commands::Session) {
        Commands::Session => commands::session::run(&config),
        Commands::Pool { json } => commands::pool::run(&config, json),
        Commands::AutoAssign { date, seed, json } => {
            commands::auto_assign::run(config, date, seed, json)
        }
        Commands::Config => commands::config::run(&config),
    }
}

/// Load the config file, falling back to the system time zone when none is set.
fn load_config() -> Result<SchedulerConfig> {
    let mut config = SchedulerConfig::load()?;

    if config.timezone.is_none() {
        match iana_time_zone::get_timezone() {
            Ok(name) if parse_timezone(&name).is_ok() => config.timezone = Some(name),
            Ok(name) => tracing::warn!(timezone = %name, "unknown system time zone, using UTC"),
            Err(e) => tracing::warn!(error = %e, "could not detect system time zone, using UTC"),
        }
    }

    Ok(config)
}
