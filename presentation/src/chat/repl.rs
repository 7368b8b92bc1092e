//! REPL (Read-Eval-Print Loop) for interactive reflection sessions

use crate::ConsoleFormatter;
use crate::WaitSpinner;
use clarity_application::{
    ConversationParams, EndSessionUseCase, RunTurnInput, RunTurnUseCase,
};
use clarity_domain::{Model, Persona};
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};

/// Interactive chat REPL: one line is one conversation turn
pub struct ChatRepl {
    run_turn: RunTurnUseCase,
    end_session: EndSessionUseCase,
    session_id: String,
    model: Model,
    persona: Persona,
    params: ConversationParams,
    show_spinner: bool,
}

impl ChatRepl {
    pub fn new(
        run_turn: RunTurnUseCase,
        end_session: EndSessionUseCase,
        session_id: impl Into<String>,
        model: Model,
    ) -> Self {
        Self {
            run_turn,
            end_session,
            session_id: session_id.into(),
            model,
            persona: Persona::default(),
            params: ConversationParams::default(),
            show_spinner: true,
        }
    }

    /// Set the persona used for every turn
    pub fn with_persona(mut self, persona: Persona) -> Self {
        self.persona = persona;
        self
    }

    /// Set the turn-loop parameters
    pub fn with_params(mut self, params: ConversationParams) -> Self {
        self.params = params;
        self
    }

    /// Set whether to show the waiting spinner
    pub fn with_spinner(mut self, show: bool) -> Self {
        self.show_spinner = show;
        self
    }

    /// Run the interactive REPL
    pub async fn run(&self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        // Try to load history
        let history_path = dirs::data_dir().map(|p| p.join("clarity").join("history.txt"));

        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            let readline = rl.readline("you> ");

            match readline {
                Ok(line) => {
                    let line = line.trim();

                    // Skip empty lines
                    if line.is_empty() {
                        continue;
                    }

                    // Handle commands
                    if line.starts_with('/') {
                        if self.handle_command(line).await {
                            break;
                        }
                        continue;
                    }

                    // Add to history
                    let _ = rl.add_history_entry(line);

                    self.process_message(line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        // Save history
        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│            Clarity - Reflection             │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Session: {}", self.session_id);
        println!("Model:   {}", self.model);
        println!();
        println!("Share what's on your mind. Commands:");
        println!("  /help     - Show this help");
        println!("  /session  - Show the session id");
        println!("  /end      - Close the session");
        println!("  /quit     - Exit chat");
        println!();
    }

    /// Handle slash commands. Returns true if the REPL should exit.
    async fn handle_command(&self, cmd: &str) -> bool {
        match cmd {
            "/quit" | "/exit" | "/q" => {
                println!("Bye!");
                true
            }
            "/help" | "/h" | "/?" => {
                println!();
                println!("Commands:");
                println!("  /help, /h, /?    - Show this help");
                println!("  /session         - Show the session id");
                println!("  /end             - Close the session");
                println!("  /quit, /exit, /q - Exit chat");
                println!();
                false
            }
            "/session" => {
                println!("{}", self.session_id);
                false
            }
            "/end" => {
                match self.end_session.execute(&self.session_id).await {
                    Ok(()) => println!("Session closed. You can keep talking or /quit."),
                    Err(e) => eprintln!("Could not close the session: {}", e),
                }
                false
            }
            _ => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
                false
            }
        }
    }

    async fn process_message(&self, text: &str) {
        println!();

        let input = RunTurnInput::new(&self.session_id, text)
            .with_model(self.model.clone())
            .with_persona(self.persona.clone())
            .with_params(self.params.clone());

        let spinner = self
            .show_spinner
            .then(|| WaitSpinner::start("thinking..."));
        let result = self.run_turn.execute(input).await;
        if let Some(spinner) = spinner {
            spinner.finish();
        }

        match result {
            Ok(output) => {
                let closing = output.phase.is_closing();
                println!("{}", ConsoleFormatter::format_reply(&output));
                println!();
                if closing {
                    println!(
                        "{}",
                        "The session is closed; further replies will stay in wrap-up."
                            .dimmed()
                    );
                    println!();
                }
            }
            Err(e) if e.is_transient() => {
                tracing::error!(error = %e, "Turn failed");
                eprintln!(
                    "Something went wrong on our side — your message was not recorded. \
                     Please try again."
                );
            }
            Err(e) => {
                eprintln!("Error: {}", e);
            }
        }
    }
}
