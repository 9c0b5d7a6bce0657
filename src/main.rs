mod commands;
mod input;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use apptbook_core::config::AppConfig;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "apptbook")]
#[command(about = "Book vehicle service appointments and browse the dish catalog")]
struct Cli {
    /// Store appointments in this directory instead of the configured one
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List booked appointments, newest first
    List {
        /// Print the stored records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Book a new appointment (prompts for anything not given)
    Add {
        /// Client name (at least 3 characters)
        #[arg(short, long)]
        client: Option<String>,

        /// Vehicle model, e.g. "Toyota Corolla 2016"
        #[arg(short, long)]
        vehicle: Option<String>,

        /// Date and time (e.g. "2026-03-20 15:00" or "tomorrow 3pm")
        #[arg(short, long)]
        at: Option<String>,

        /// Notes about the problem
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Replace an appointment (unspecified fields keep their current values)
    Edit {
        id: String,

        #[arg(short, long)]
        client: Option<String>,

        #[arg(short, long)]
        vehicle: Option<String>,

        #[arg(short, long)]
        at: Option<String>,

        #[arg(short, long)]
        description: Option<String>,
    },
    /// Remove an appointment
    Remove {
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// List the dish catalog
    Dishes,
    /// Show one dish in detail
    Dish { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_tracing();

    let cli = Cli::parse();

    let mut config = AppConfig::load()?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    match cli.command {
        Commands::List { json } => {
            commands::with_store(&config, |store| commands::list::run(store, json)).await
        }
        Commands::Add {
            client,
            vehicle,
            at,
            description,
        } => {
            let fields = commands::Fields {
                client,
                vehicle,
                at,
                description,
            };
            commands::with_store(&config, |store| commands::add::run(store, fields)).await
        }
        Commands::Edit {
            id,
            client,
            vehicle,
            at,
            description,
        } => {
            let fields = commands::Fields {
                client,
                vehicle,
                at,
                description,
            };
            commands::with_store(&config, |store| commands::edit::run(store, &id, fields)).await
        }
        Commands::Remove { id, yes } => {
            commands::with_store(&config, |store| commands::remove::run(store, &id, yes)).await
        }
        Commands::Dishes => commands::dishes::list(&config),
        Commands::Dish { id } => commands::dishes::show(&config, &id),
    }
}

/// Log to stderr so command output stays clean. `RUST_LOG` overrides the level.
fn setup_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
