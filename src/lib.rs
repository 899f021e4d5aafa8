//! # pcxforum
//!
//! A typed client for the pcx-forum web discussion board. The site serves
//! semi-structured HTML only; this crate extracts boards, threads, messages
//! and search hits from it and tracks which messages have been read.
//!
//! ## Architecture
//!
//! ```text
//! Forum → PageCache (read-through) → Transport → Parsers → typed objects
//! ```
//!
//! - [`forum`]: the session object tying transport, cache and read log together
//! - [`parser`]: one parse routine per page kind, built on CSS selectors plus
//!   a fragment grammar for fields embedded as sibling text
//! - [`readlog`]: append-only read-state tracker
//!
//! ## Quick Start
//!
//! ```no_run
//! use pcxforum::config::Config;
//! use pcxforum::forum::Forum;
//!
//! # async fn run() -> pcxforum::app::Result<()> {
//! let forum = Forum::discover(Config::default()).await?;
//! for board in &forum.boards {
//!     println!("{}: {}", board.id, board.title);
//! }
//! let board = forum.board("6").await?;
//! let thread = forum.thread("6", &board.threads[0].id).await?;
//! # Ok(())
//! # }
//! ```

/// Error type and crate-wide `Result` alias.
pub mod app;

/// In-memory page cache with a fixed TTL window.
pub mod cache;

/// Command-line interface using clap.
pub mod cli;

/// Configuration from `~/.config/pcxforum/config.toml` plus env overrides.
pub mod config;

/// Core domain models.
///
/// - [`Board`](domain::Board): a topic category with its threads
/// - [`Thread`](domain::Thread): a discussion with its ordered messages
/// - [`Message`](domain::Message): a single post, with reply depth and read flag
pub mod domain;

/// Page transport behind an async trait.
///
/// - [`Transport`](fetcher::Transport): GET/POST contract with a fixed user agent
/// - [`HttpTransport`](fetcher::HttpTransport): reqwest-based implementation
pub mod fetcher;

/// The forum session: fetching, caching and read-state wiring.
pub mod forum;

/// Document parsers, one per page kind, plus the fragment grammar in
/// [`parser::fragment`] for fields that are not cleanly nested in the DOM.
pub mod parser;

/// Append-only read-state tracker backed by a plain text file.
pub mod readlog;
