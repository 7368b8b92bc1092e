//! Presentation layer for clarity
//!
//! This crate contains CLI definitions, the interactive chat REPL,
//! output formatting, and the waiting spinner.

pub mod chat;
pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use chat::ChatRepl;
pub use cli::commands::{Cli, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use progress::WaitSpinner;
