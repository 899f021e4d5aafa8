//! The forum session: one explicitly constructed object owning the
//! transport, the page cache and the read log (no process-wide state).
//!
//! All fetching is read-through: resource paths are resolved against the
//! configured origin, served from the cache within its TTL window when
//! caching is enabled, and every fresh response is written back into the
//! cache regardless of the toggle.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use url::Url;

use crate::app::{ForumError, Result};
use crate::cache::PageCache;
use crate::config::Config;
use crate::domain::{Board, Message, Thread};
use crate::fetcher::{HttpTransport, Transport};
use crate::parser;
use crate::parser::fragment::{message_id_from_anchor, query_param};
use crate::readlog::{ReadLog, READLOG_FILE_ENV};

/// Parameters of a message search. `board_id` of `"-1"` searches every
/// board, matching the site's own convention.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub phrase: String,
    pub author: String,
    pub board_id: String,
    pub in_body: bool,
    pub in_topic: bool,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            phrase: String::new(),
            author: String::new(),
            board_id: "-1".to_string(),
            in_body: false,
            in_topic: true,
        }
    }
}

pub struct Forum {
    config: Config,
    base: Url,
    transport: Arc<dyn Transport + Send + Sync>,
    cache: Mutex<PageCache>,
    read_log: ReadLog,
    /// Board summaries, populated once by [`Forum::discover`].
    pub boards: Vec<Board>,
}

impl Forum {
    /// Open a session against the configured origin and discover its board
    /// list.
    pub async fn discover(config: Config) -> Result<Self> {
        let transport = Arc::new(HttpTransport::new(config.ignore_ssl));
        let mut forum = Self::with_transport(config, transport)?;
        forum.refresh_boards().await?;
        Ok(forum)
    }

    /// Build a session over an existing transport. Boards are left empty;
    /// call [`Forum::refresh_boards`] to populate them.
    pub fn with_transport(
        config: Config,
        transport: Arc<dyn Transport + Send + Sync>,
    ) -> Result<Self> {
        let base = Url::parse(&config.base_url)?;
        let read_log = ReadLog::new(read_log_path(&config)?)?;

        Ok(Self {
            config,
            base,
            transport,
            cache: Mutex::new(PageCache::default()),
            read_log,
            boards: Vec::new(),
        })
    }

    /// Fetch the board list page and repopulate [`Forum::boards`].
    pub async fn refresh_boards(&mut self) -> Result<()> {
        let body = self.page("pxmboard.php").await?;
        self.boards = parser::parse_board_list(&body);
        tracing::info!(count = self.boards.len(), "discovered boards");
        Ok(())
    }

    /// Fetch a board in list mode, with its threads ordered by last answer.
    pub async fn board(&self, board_id: &str) -> Result<Board> {
        let resource = format!("pxmboard.php?mode=threadlist&brdid={board_id}&sortorder=last");
        let body = self.page(&resource).await?;
        Ok(parser::parse_thread_list(&body, board_id))
    }

    /// Fetch a thread in detail mode. Read flags are filled from the read
    /// log before the thread is returned.
    pub async fn thread(&self, board_id: &str, thread_id: &str) -> Result<Thread> {
        let resource = format!("pxmboard.php?mode=thread&brdid={board_id}&thrdid={thread_id}");
        let body = self.page(&resource).await?;

        let mut thread = parser::parse_thread(&body, board_id, thread_id);
        for message in &mut thread.messages {
            message.read = self.read_log.is_read(&message.id)?;
        }
        Ok(thread)
    }

    /// Fetch a single message by its resource path.
    pub async fn message(&self, resource: &str) -> Result<Message> {
        if resource.is_empty() {
            return Err(ForumError::EmptyResource);
        }

        let body = self.page(resource).await?;

        let mut message = parser::parse_message(&body);
        message.link = resource.to_string();
        message.id = query_param(resource, "msgid")
            .map(|id| message_id_from_anchor(&id))
            .unwrap_or_default();
        message.board_id = query_param(resource, "brdid").unwrap_or_default();
        message.read = self.read_log.is_read(&message.id)?;
        Ok(message)
    }

    /// Run a search over the forum's message base.
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<Message>> {
        let url = self.base.join("search/search.php")?;
        let cbx_body = if query.in_body { "1" } else { "0" };
        let cbx_subject = if query.in_topic { "1" } else { "0" };

        let form = [
            ("phrase", query.phrase.as_str()),
            ("autor", query.author.as_str()),
            ("board", query.board_id.as_str()),
            ("cbxBody", cbx_body),
            ("cbxSubject", cbx_subject),
            ("suche", "durchsuchen"),
        ];

        tracing::debug!(phrase = %query.phrase, board = %query.board_id, "searching");
        let body = self.transport.post_form(url.as_str(), &form).await?;
        parser::parse_search_results(&body)
    }

    /// Record a message as read.
    pub fn mark_read(&self, message_id: &str) -> Result<()> {
        self.read_log.mark_read(message_id)
    }

    pub fn read_log(&self) -> &ReadLog {
        &self.read_log
    }

    /// Drop every cached page, forcing fresh fetches.
    pub fn clear_cache(&self) {
        self.cache.lock().expect("cache lock poisoned").flush();
    }

    /// Resolve an origin-relative resource and fetch its body, through the
    /// cache when enabled. Fresh bodies are always written back.
    async fn page(&self, resource: &str) -> Result<String> {
        let url = self.base.join(resource)?;
        let url = url.to_string();

        if self.config.use_cache {
            let cached = self.cache.lock().expect("cache lock poisoned").get(&url);
            if let Some(body) = cached {
                tracing::debug!(resource, "cache hit");
                return Ok(body);
            }
        }

        tracing::debug!("fetching {}", resource);
        let body = self.transport.get(&url).await?;
        self.cache
            .lock()
            .expect("cache lock poisoned")
            .insert(url, body.clone());
        Ok(body)
    }
}

fn read_log_path(config: &Config) -> Result<PathBuf> {
    if let Some(path) = std::env::var_os(READLOG_FILE_ENV) {
        return Ok(PathBuf::from(path));
    }
    if let Some(path) = &config.read_log_file {
        return Ok(path.clone());
    }
    ReadLog::default_path()
}
