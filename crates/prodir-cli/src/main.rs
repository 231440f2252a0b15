use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "prodir")]
#[command(about = "prodir CLI - professional service-provider directory", long_about = None)]
struct Cli {
    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Authenticated user id the command runs as
    #[arg(long, global = true, env = "PRODIR_USER")]
    user: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a user record
    RegisterUser {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: Option<String>,
    },
    /// Create a profile for --user from a JSON object
    Create {
        #[arg(long)]
        data: String,
    },
    /// List profiles whose service name matches exactly (ignoring case)
    Find {
        #[arg(long)]
        service_name: Option<String>,
    },
    /// Apply a partial update to the profile of --user
    Update {
        #[arg(long)]
        data: String,
    },
    /// Set isProfession on every profile owner missing it
    Reconcile,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let context = commands::Context::load(cli.config.as_deref(), cli.user)?;

    let success = match cli.command {
        Commands::RegisterUser { id, name } => commands::register_user(&context, id, name).await?,
        Commands::Create { data } => commands::create(&context, &data).await?,
        Commands::Find { service_name } => {
            commands::find(&context, service_name.as_deref()).await?
        }
        Commands::Update { data } => commands::update(&context, &data).await?,
        Commands::Reconcile => commands::reconcile(&context).await?,
    };

    if !success {
        std::process::exit(1);
    }

    Ok(())
}
