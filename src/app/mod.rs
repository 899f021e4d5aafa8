pub mod error;

pub use error::{ForumError, Result};
