pub mod commands;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "edusign-api")]
#[command(about = "EduSign API - age-grouped sign language course catalog")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve {
        #[arg(long, help = "Port to listen on (overrides API_PORT / PORT)")]
        port: Option<u16>,
    },

    #[command(about = "Seed the course store with the sample catalog if it is empty")]
    Seed,

    #[command(about = "Print the sample catalog as JSON")]
    Catalog {
        #[arg(long, help = "Only courses for this age")]
        age: Option<u32>,
    },
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::from_env();

    match cli.command.unwrap_or(Commands::Serve { port: None }) {
        Commands::Serve { port } => commands::serve::handle(config, port).await,
        Commands::Seed => commands::seed::handle(config).await,
        Commands::Catalog { age } => commands::catalog::handle(age),
    }
}
