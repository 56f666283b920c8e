//! Interactive chat module
//!
//! Provides the chat command language and a readline-based REPL.

pub mod command;
mod repl;
mod session;

pub use command::{ChatCommand, ChatCommandError};
pub use repl::ChatRepl;
pub use session::{ChatReply, ChatSession};
