//! bfhl - JSON endpoint for Fibonacci, prime filtering, LCM/HCF and one-word AI answers

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bfhl::api::{self, AppState};
use bfhl::config::Config;

#[derive(Parser)]
#[command(name = "bfhl")]
#[command(about = "JSON endpoint for Fibonacci, prime filtering, LCM/HCF and one-word AI answers")]
#[command(version)]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve {
        /// Port to listen on (overrides PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Run one request body through the dispatcher and print the response envelope
    Eval {
        /// JSON request body, e.g. '{"fibonacci": 7}'
        body: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load environment
    let _ = dotenvy::dotenv();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            format!("bfhl={},tower_http=debug", log_level).into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::load(cli.config.as_deref())?;
    if config.ai.api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY is not set; AI requests will fail");
    }

    match cli.command.unwrap_or(Commands::Serve { port: None }) {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.port = port;
            }
            let state = AppState::new(&config)?;
            let router = api::create_router(state);

            let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
            tracing::info!("Server running on port {}", config.port);

            println!("bfhl server running at http://localhost:{}", config.port);
            println!("  Operations: POST http://localhost:{}/bfhl", config.port);
            println!("  Health:     http://localhost:{}/health", config.port);
            println!("  API Docs:   http://localhost:{}/docs", config.port);

            axum::serve(listener, router).await?;
        }

        Commands::Eval { body } => {
            let state = AppState::new(&config)?;

            let result = match serde_json::from_str(&body) {
                Ok(value) => state.dispatcher.handle(&value).await,
                Err(e) => Err(bfhl::Error::MalformedBody(e.to_string())),
            };

            let (status, envelope) = api::envelope_for(&config.official_email, result);
            println!("{}", serde_json::to_string_pretty(&envelope)?);

            if !status.is_success() {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
