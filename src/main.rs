use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};

use forum_eye::api::GraphQlClient;
use forum_eye::app::App;
use forum_eye::config::Config;
use forum_eye::storage::{Session, SessionStore};

#[derive(Parser)]
#[command(name = "forum-eye")]
#[command(about = "A terminal-based discussion board client with vim-like interface")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// GraphQL endpoint of the board service
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Sign in as this user id and remember it for later runs
    #[arg(short, long)]
    user_id: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(&cli.config)?;

    // Initialize logging; a log file keeps output off the alternate screen
    let log_level = if cli.debug {
        Level::DEBUG
    } else {
        config.logging.level.parse().unwrap_or(Level::INFO)
    };
    match &config.logging.file {
        Some(path) => {
            let file = std::fs::File::create(path)?;
            tracing_subscriber::fmt()
                .with_max_level(log_level)
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt().with_max_level(log_level).init();
        }
    }

    info!("Starting Forum Eye TUI client");

    // Override endpoint if provided via CLI
    if let Some(endpoint) = cli.endpoint {
        config.api.endpoint = endpoint;
    }
    config.validate()?;

    // Resolve the signed-in user: the flag signs in and persists, otherwise
    // the stored session from a previous run is used.
    let store = SessionStore::default_location();
    let user_id = match cli.user_id {
        Some(user_id) => {
            store.save(&Session {
                user_id: user_id.clone(),
            })?;
            user_id
        }
        None => match store.load()? {
            Some(session) => session.user_id,
            None => anyhow::bail!(
                "No signed-in user found. Pass --user-id <id> once to sign in."
            ),
        },
    };
    info!("Signed in as user {}", user_id);

    let backend = Arc::new(GraphQlClient::from_config(&config.api));

    // Create and run the application
    let mut app = App::new(config, backend, user_id);
    app.run().await?;

    info!("Forum Eye client shutdown complete");
    Ok(())
}
