pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "pcxforum")]
#[command(about = "A CLI client for the pcx-forum web board", long_about = None)]
pub struct Cli {
    /// Base origin of the forum (overrides the config file)
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Skip TLS certificate verification
    #[arg(long, global = true)]
    pub insecure: bool,

    /// Bypass the in-memory page cache
    #[arg(long, global = true)]
    pub no_cache: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the boards of the forum
    Boards,
    /// List the threads of a board
    Threads {
        /// Board ID, as shown by `boards`
        board_id: String,
    },
    /// Show the messages of a thread
    Thread {
        board_id: String,
        thread_id: String,
    },
    /// Show a single message and mark it as read
    Message {
        board_id: String,
        message_id: String,
    },
    /// Search messages across the forum
    Search {
        /// Search phrase
        phrase: String,

        /// Restrict to an author name
        #[arg(long, default_value = "")]
        author: String,

        /// Board ID to search in; -1 searches every board
        #[arg(long, default_value = "-1")]
        board: String,

        /// Search in message bodies
        #[arg(long)]
        body: bool,

        /// Search in topics (default when no scope flag is given)
        #[arg(long)]
        topic: bool,
    },
}
