//! OpenAI-compatible chat completions adapter

mod adapter;
mod types;

pub use adapter::OpenAiCompletionGateway;
