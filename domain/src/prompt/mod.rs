//! Prompt assembly for the reflection flow

pub mod assembler;
pub mod persona;

pub use assembler::PromptAssembler;
pub use persona::{Persona, PhaseDirectives};
