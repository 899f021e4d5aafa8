use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use pcxforum::cli::{commands, Cli, Commands};
use pcxforum::config::Config;
use pcxforum::fetcher::HttpTransport;
use pcxforum::forum::{Forum, SearchQuery};

/// Presence of this variable switches logging from discard to a file.
const DEBUG_ENV: &str = "PCXFORUM_DEBUG";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(url) = &cli.url {
        config.base_url = url.clone();
    }
    if cli.insecure {
        config.ignore_ssl = true;
    }
    if cli.no_cache {
        config.use_cache = false;
    }

    match cli.command {
        Commands::Boards => {
            let forum = Forum::discover(config).await?;
            commands::boards(&forum, cli.json)?;
        }
        Commands::Threads { board_id } => {
            let forum = session(config)?;
            commands::threads(&forum, &board_id, cli.json).await?;
        }
        Commands::Thread {
            board_id,
            thread_id,
        } => {
            let forum = session(config)?;
            commands::thread(&forum, &board_id, &thread_id, cli.json).await?;
        }
        Commands::Message {
            board_id,
            message_id,
        } => {
            let forum = session(config)?;
            commands::message(&forum, &board_id, &message_id, cli.json).await?;
        }
        Commands::Search {
            phrase,
            author,
            board,
            body,
            topic,
        } => {
            let forum = session(config)?;
            let query = SearchQuery {
                phrase,
                author,
                board_id: board,
                in_body: body,
                // Topic search is the default scope.
                in_topic: topic || !body,
            };
            commands::search(&forum, &query, cli.json).await?;
        }
    }

    Ok(())
}

fn session(config: Config) -> anyhow::Result<Forum> {
    let transport = Arc::new(HttpTransport::new(config.ignore_ssl));
    Ok(Forum::with_transport(config, transport)?)
}

fn init_tracing() -> anyhow::Result<()> {
    // Without the debug variable, no subscriber is installed and all events
    // are discarded.
    if std::env::var_os(DEBUG_ENV).is_none() {
        return Ok(());
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("pcxforum.log")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}
