//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for one-shot replies
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Phase-badged reply text
    Text,
    /// JSON with reply, phase, and turn id
    Json,
}

/// CLI arguments for clarity
#[derive(Parser, Debug)]
#[command(name = "clarity")]
#[command(author, version, about = "Guided reflection conversations with a coach persona")]
#[command(long_about = r#"
Clarity runs phase-driven reflection conversations: the coach opens by
gathering context, reflects back what it heard, offers options, and wraps
up — either when you say you're done or when the turn budget runs out.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./clarity.toml      Project-level config
3. ~/.config/clarity/config.toml   Global config

Example:
  clarity                               Start an interactive session
  clarity --session 4f2c... "and then?" Send one message to a session
  clarity --list-sessions               Show stored sessions
  clarity --ephemeral -m gpt-5-mini     Chat without writing to disk
"#)]
pub struct Cli {
    /// Message to send (omit to start interactive chat)
    pub message: Option<String>,

    /// Session to continue (a new session is created when omitted)
    #[arg(short, long, value_name = "ID")]
    pub session: Option<String>,

    /// Owner identity for sessions
    #[arg(long, value_name = "OWNER", default_value = "local")]
    pub owner: String,

    /// Model to use
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Maximum assistant turns before the conversation is wrapped up
    #[arg(long, value_name = "N")]
    pub max_turns: Option<usize>,

    /// List stored sessions and exit
    #[arg(long)]
    pub list_sessions: bool,

    /// Keep sessions in memory only (nothing written to disk)
    #[arg(long)]
    pub ephemeral: bool,

    /// Output format for one-shot replies
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress the waiting spinner
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
