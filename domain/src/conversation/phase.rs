//! Phase resolution: which persona mode governs the next assistant reply

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Behavioral mode for the next assistant reply (Value Object)
///
/// Computed fresh on every turn from the assistant-turn count and detected
/// intent; never stored as mutable state, only recorded retrospectively on
/// the produced turn for audit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// First reply: acknowledge and gather context.
    Opening,
    /// Second reply: mirror back what was heard.
    Reflecting,
    /// Middle of the conversation: offer perspectives and options.
    Options,
    /// The user signaled they are done; consolidate and close warmly.
    WrapUp,
    /// Turn budget exhausted; the system forces closure.
    Final,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Opening => "opening",
            Phase::Reflecting => "reflecting",
            Phase::Options => "options",
            Phase::WrapUp => "wrap_up",
            Phase::Final => "final",
        }
    }

    /// Whether a reply in this phase ends the session.
    pub fn is_closing(&self) -> bool {
        matches!(self, Phase::WrapUp | Phase::Final)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Phase {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "opening" => Ok(Phase::Opening),
            "reflecting" => Ok(Phase::Reflecting),
            "options" => Ok(Phase::Options),
            "wrap_up" => Ok(Phase::WrapUp),
            "final" => Ok(Phase::Final),
            other => Err(DomainError::UnknownPhase(other.to_string())),
        }
    }
}

/// Turn-count policy that resolves the phase for the next reply
///
/// Pure function of its inputs; no clock, storage, or network access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhasePolicy {
    max_turns: usize,
}

impl PhasePolicy {
    pub const DEFAULT_MAX_TURNS: usize = 8;

    /// `max_turns` below 1 is clamped to 1; a one-turn budget means every
    /// reply is already the final one.
    pub fn new(max_turns: usize) -> Self {
        Self {
            max_turns: max_turns.max(1),
        }
    }

    pub fn max_turns(&self) -> usize {
        self.max_turns
    }

    /// Resolve the phase for the next assistant reply.
    ///
    /// Wrap-up intent (and a closed session) override the turn count;
    /// otherwise the count walks opening -> reflecting -> options until the
    /// budget forces `Final` one turn before `max_turns` is reached.
    pub fn resolve(
        &self,
        assistant_turn_count: usize,
        wrap_up_requested: bool,
        session_closed: bool,
    ) -> Phase {
        if session_closed || wrap_up_requested {
            return Phase::WrapUp;
        }
        if assistant_turn_count >= self.max_turns.saturating_sub(1) {
            return Phase::Final;
        }
        match assistant_turn_count {
            0 => Phase::Opening,
            1 => Phase::Reflecting,
            _ => Phase::Options,
        }
    }
}

impl Default for PhasePolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_TURNS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progression_without_intent() {
        let policy = PhasePolicy::new(8);
        assert_eq!(policy.resolve(0, false, false), Phase::Opening);
        assert_eq!(policy.resolve(1, false, false), Phase::Reflecting);
        assert_eq!(policy.resolve(2, false, false), Phase::Options);
        assert_eq!(policy.resolve(6, false, false), Phase::Options);
    }

    #[test]
    fn test_wrap_up_overrides_any_count() {
        let policy = PhasePolicy::new(8);
        for count in 0..10 {
            assert_eq!(policy.resolve(count, true, false), Phase::WrapUp);
        }
    }

    #[test]
    fn test_final_at_budget_boundary() {
        let policy = PhasePolicy::new(8);
        assert_eq!(policy.resolve(7, false, false), Phase::Final);
        assert_eq!(policy.resolve(8, false, false), Phase::Final);
        assert_eq!(policy.resolve(100, false, false), Phase::Final);
    }

    #[test]
    fn test_wrap_up_beats_final() {
        let policy = PhasePolicy::new(8);
        assert_eq!(policy.resolve(7, true, false), Phase::WrapUp);
    }

    #[test]
    fn test_tiny_budget_forces_final() {
        // max_turns <= 1 must not underflow; every reply is Final.
        for max_turns in [0, 1] {
            let policy = PhasePolicy::new(max_turns);
            assert_eq!(policy.resolve(0, false, false), Phase::Final);
            assert_eq!(policy.resolve(0, true, false), Phase::WrapUp);
        }
    }

    #[test]
    fn test_closed_session_resolves_to_wrap_up() {
        let policy = PhasePolicy::new(8);
        assert_eq!(policy.resolve(0, false, true), Phase::WrapUp);
        assert_eq!(policy.resolve(9, false, true), Phase::WrapUp);
    }

    #[test]
    fn test_phase_string_roundtrip() {
        for phase in [
            Phase::Opening,
            Phase::Reflecting,
            Phase::Options,
            Phase::WrapUp,
            Phase::Final,
        ] {
            let parsed: Phase = phase.as_str().parse().unwrap();
            assert_eq!(parsed, phase);
        }
        assert!("midgame".parse::<Phase>().is_err());
    }

    #[test]
    fn test_closing_phases() {
        assert!(Phase::WrapUp.is_closing());
        assert!(Phase::Final.is_closing());
        assert!(!Phase::Opening.is_closing());
        assert!(!Phase::Reflecting.is_closing());
        assert!(!Phase::Options.is_closing());
    }
}
