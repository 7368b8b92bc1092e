//! Session store adapters

mod jsonl;
mod memory;

pub use jsonl::JsonlSessionStore;
pub use memory::InMemorySessionStore;
