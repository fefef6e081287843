use clap::Parser;
use edusign_api::cli::Cli;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up MONGODB_URL, SUPABASE_URL, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    if let Err(e) = edusign_api::cli::run(cli).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
