//! Assembly of the provider-bound message list

use crate::conversation::entities::{Message, Turn};
use crate::conversation::phase::Phase;
use crate::prompt::persona::{Persona, PhaseDirectives};

/// Builds the exact message list sent to the completion provider
///
/// Pure assembly: no side effects, no randomness, no network. The caller
/// owns the actual provider call.
pub struct PromptAssembler;

impl PromptAssembler {
    /// Ordering guarantee: persona system prompt first, then the phase
    /// directive, then prior turns oldest-first, then the new user message
    /// last. Identical inputs produce identical output.
    pub fn assemble(
        persona: &Persona,
        phase: Phase,
        history: &[Turn],
        user_text: &str,
    ) -> Vec<Message> {
        let mut messages = Vec::with_capacity(history.len() + 3);
        messages.push(Message::system(persona.system_prompt()));
        messages.push(Message::system(PhaseDirectives::for_phase(phase)));
        for turn in history {
            messages.push(Message {
                role: turn.role,
                content: turn.content.clone(),
            });
        }
        messages.push(Message::user(user_text));
        messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::entities::Role;

    fn sample_history() -> Vec<Turn> {
        let mut turns = Vec::new();
        turns.push(Turn::user("My sister keeps inviting my ex to family dinners."));
        turns.push(Turn::assistant(
            "That sounds uncomfortable. What makes it hardest for you?",
            Phase::Opening,
        ));
        turns.push(Turn::user("I just feel replaced, honestly."));
        turns
    }

    #[test]
    fn test_starts_with_persona_ends_with_user_message() {
        let persona = Persona::default();
        let messages = PromptAssembler::assemble(
            &persona,
            Phase::Reflecting,
            &sample_history(),
            "And nobody asked me about it.",
        );

        let first = messages.first().unwrap();
        assert_eq!(first.role, Role::System);
        assert_eq!(first.content, persona.system_prompt());

        let last = messages.last().unwrap();
        assert_eq!(last.role, Role::User);
        assert_eq!(last.content, "And nobody asked me about it.");
    }

    #[test]
    fn test_history_order_preserved_between_directive_and_new_message() {
        let history = sample_history();
        let messages =
            PromptAssembler::assemble(&Persona::default(), Phase::Options, &history, "next");

        // persona, directive, then history verbatim
        assert_eq!(messages[1].content, PhaseDirectives::options());
        for (i, turn) in history.iter().enumerate() {
            assert_eq!(messages[2 + i].role, turn.role);
            assert_eq!(messages[2 + i].content, turn.content);
        }
        assert_eq!(messages.len(), history.len() + 3);
    }

    #[test]
    fn test_assembly_is_deterministic() {
        let persona = Persona::default();
        let history = sample_history();
        let a = PromptAssembler::assemble(&persona, Phase::WrapUp, &history, "thanks");
        let b = PromptAssembler::assemble(&persona, Phase::WrapUp, &history, "thanks");
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_empty_history_yields_three_messages() {
        let messages =
            PromptAssembler::assemble(&Persona::default(), Phase::Opening, &[], "hello");
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].content, PhaseDirectives::opening());
    }
}
