//! Coach persona and per-phase directives

use crate::conversation::phase::Phase;

const DEFAULT_SYSTEM_PROMPT: &str = r#"You are a warm, grounded reflection coach.
You help people think through what is on their mind by listening closely and
asking one good question at a time. You are not a therapist and you never give
medical, legal, or financial advice; if asked, gently say it is outside what
you can help with.

Ground rules:
- Keep replies short: two to four sentences.
- Ask at most one question per reply.
- Reflect the person's own words back before adding anything new.
- Never diagnose, never prescribe, never moralize.
- Follow the stage instruction you are given for each reply."#;

/// The base persona sent as the first system message (immutable configuration)
///
/// Constructed once at process start and passed explicitly into assembly;
/// never read from ambient global state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Persona {
    system_prompt: String,
}

impl Persona {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
        }
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }
}

impl Default for Persona {
    fn default() -> Self {
        Self::new(DEFAULT_SYSTEM_PROMPT)
    }
}

/// Deterministic directive text for each phase
///
/// Identical phase always yields byte-identical text; there is no templating
/// and no randomness here.
pub struct PhaseDirectives;

impl PhaseDirectives {
    pub fn for_phase(phase: Phase) -> &'static str {
        match phase {
            Phase::Opening => Self::opening(),
            Phase::Reflecting => Self::reflecting(),
            Phase::Options => Self::options(),
            Phase::WrapUp => Self::wrap_up(),
            Phase::Final => Self::final_turn(),
        }
    }

    /// First reply: acknowledge and gather context.
    pub fn opening() -> &'static str {
        r#"Stage instruction: this is your first reply in the session.
Acknowledge what the person shared, then ask one open question that helps you
understand the situation and what makes it hard for them. Do not offer advice
or options yet."#
    }

    /// Second reply: mirror back what was heard.
    pub fn reflecting() -> &'static str {
        r#"Stage instruction: reflect back what you have heard so far in the
person's own words, naming the feeling underneath if one is clear. Then ask
one question that goes a level deeper. Still no advice or options."#
    }

    /// Middle of the conversation: offer perspectives.
    pub fn options() -> &'static str {
        r#"Stage instruction: the person has shared enough context. Offer two
or three concrete ways they could look at or approach the situation, framed
as possibilities rather than prescriptions. Invite them to react to whichever
resonates."#
    }

    /// The user signaled they are done.
    pub fn wrap_up() -> &'static str {
        r#"Stage instruction: the person is ready to wrap up. Briefly summarize
the ground covered and any insight they arrived at, affirm the work they did,
and close warmly. Do not ask any new exploratory questions."#
    }

    /// Turn budget exhausted; the system forces closure.
    pub fn final_turn() -> &'static str {
        r#"Stage instruction: this is the final reply of the session. Bring the
conversation to a close: summarize the key thread, leave the person with one
small concrete thing to sit with or try, and say goodbye warmly. Do not ask
any new exploratory questions."#
    }
}
