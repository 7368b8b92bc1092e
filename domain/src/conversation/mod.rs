//! Conversation aggregate: sessions, turns, phase policy, wrap-up intent

pub mod entities;
pub mod intent;
pub mod phase;

pub use entities::{Message, Role, Session, Turn};
pub use intent::{KeywordWrapUpDetector, WrapUpDetector};
pub use phase::{Phase, PhasePolicy};
