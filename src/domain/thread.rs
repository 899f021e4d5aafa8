use serde::{Deserialize, Serialize};

use crate::domain::Message;

/// A discussion topic inside a board, with its ordered messages when
/// fetched in detail mode.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Thread {
    /// Numeric-string ID assigned by the site. Never contains a comma;
    /// reply-anchor suffixes are stripped at extraction time.
    pub id: String,
    pub title: String,
    pub link: String,
    pub author: String,
    pub date: String,
    pub answers: u32,
    pub is_sticky: bool,
    pub last_answer_date: String,
    pub last_answer_link: String,
    pub messages: Vec<Message>,
    /// Back-reference to the owning board, by ID only.
    pub board_id: String,
}
