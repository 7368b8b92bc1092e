//! Console output formatting

use clarity_application::{RunTurnOutput, SessionSummary};
use clarity_domain::Phase;
use colored::Colorize;

/// Formats replies and session listings for the terminal
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Phase-badged reply: `[reflecting] I hear that...`
    pub fn format_reply(output: &RunTurnOutput) -> String {
        format!("{} {}", Self::phase_badge(output.phase), output.reply)
    }

    /// JSON object with reply, phase, and turn id (one-shot `--output json`)
    pub fn format_reply_json(output: &RunTurnOutput) -> String {
        serde_json::json!({
            "reply": output.reply,
            "phase": output.phase.as_str(),
            "turn_id": output.turn_id,
        })
        .to_string()
    }

    /// Colored `[phase]` badge
    pub fn phase_badge(phase: Phase) -> String {
        let label = format!("[{}]", phase.as_str());
        let colored = match phase {
            Phase::Opening => label.cyan(),
            Phase::Reflecting => label.blue(),
            Phase::Options => label.yellow(),
            Phase::WrapUp => label.magenta(),
            Phase::Final => label.green(),
        };
        colored.to_string()
    }

    /// One line per session: id, owner, turn count, status, creation time
    pub fn format_sessions(sessions: &[SessionSummary]) -> String {
        if sessions.is_empty() {
            return "No sessions found.".to_string();
        }

        let mut out = String::new();
        for session in sessions {
            let status = if session.closed { "closed" } else { "open" };
            out.push_str(&format!(
                "{}  {:<12} {:>3} turns  {:<6} {}\n",
                session.id,
                session.owner_id,
                session.turn_count,
                status,
                session.created_at.format("%Y-%m-%d %H:%M"),
            ));
        }
        out.trim_end().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn output(phase: Phase) -> RunTurnOutput {
        RunTurnOutput {
            reply: "What feels hardest about that?".to_string(),
            phase,
            turn_id: "t-1".to_string(),
        }
    }

    #[test]
    fn test_reply_contains_badge_and_text() {
        colored::control::set_override(false);
        let formatted = ConsoleFormatter::format_reply(&output(Phase::Opening));
        assert!(formatted.starts_with("[opening]"));
        assert!(formatted.contains("What feels hardest about that?"));
    }

    #[test]
    fn test_reply_json_fields() {
        let json = ConsoleFormatter::format_reply_json(&output(Phase::WrapUp));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["phase"], "wrap_up");
        assert_eq!(value["turn_id"], "t-1");
        assert_eq!(value["reply"], "What feels hardest about that?");
    }

    #[test]
    fn test_sessions_listing() {
        let sessions = vec![SessionSummary {
            id: "abc123".to_string(),
            owner_id: "local".to_string(),
            created_at: Utc::now(),
            turn_count: 4,
            closed: true,
        }];
        let listing = ConsoleFormatter::format_sessions(&sessions);
        assert!(listing.contains("abc123"));
        assert!(listing.contains("closed"));
        assert!(listing.contains("4 turns"));
    }

    #[test]
    fn test_empty_sessions_listing() {
        assert_eq!(
            ConsoleFormatter::format_sessions(&[]),
            "No sessions found."
        );
    }
}
