use serde::{Deserialize, Serialize};

/// A single post inside a thread, possibly nested under another post.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Message {
    /// Numeric-string ID assigned by the site, with the `p` anchor prefix
    /// stripped.
    pub id: String,
    pub content: String,
    /// Reserved for link-rewriting; the extraction core leaves it empty.
    pub enriched_content: String,
    pub link: String,
    pub topic: String,
    pub date: String,
    /// Count of enclosing nested-list ancestors at extraction time.
    pub hierarchy: usize,
    pub author: User,
    pub read: bool,
    /// Back-references to the owning board/thread, by ID only.
    pub board_id: String,
    pub thread_id: String,
}

/// Minimal author identity, embedded by value in [`Message`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub id: Option<u32>,
}

impl Message {
    pub fn display_topic(&self) -> &str {
        if self.topic.is_empty() {
            "(no subject)"
        } else {
            &self.topic
        }
    }
}
