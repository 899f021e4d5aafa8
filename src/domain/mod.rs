pub mod board;
pub mod message;
pub mod thread;

pub use board::Board;
pub use message::{Message, User};
pub use thread::Thread;
