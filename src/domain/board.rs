use serde::{Deserialize, Serialize};

use crate::domain::Thread;

/// A top-level topic category of the forum, like "Smalltalk" or "O/T".
///
/// A board discovered from the board list carries only `id` and `title`;
/// fetching it in list mode populates `threads`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Board {
    /// Stable ID assigned by the origin site.
    pub id: String,
    pub title: String,
    pub threads: Vec<Thread>,
}

impl Board {
    pub fn summary(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            threads: Vec::new(),
        }
    }

    /// Whether this board has been fetched in list mode.
    pub fn is_populated(&self) -> bool {
        !self.threads.is_empty()
    }
}
