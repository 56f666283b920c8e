//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::chat::command::ChatCommand;
use crate::chat::session::ChatSession;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

/// Interactive chat REPL
pub struct ChatRepl {
    session: ChatSession,
    history_path: Option<PathBuf>,
}

impl ChatRepl {
    pub fn new(session: ChatSession) -> Self {
        Self {
            session,
            history_path: dirs::data_dir().map(|p| p.join("ai-council").join("history.txt")),
        }
    }

    /// Override the history file location
    pub fn with_history_path(mut self, path: Option<PathBuf>) -> Self {
        if path.is_some() {
            self.history_path = path;
        }
        self
    }

    /// Run the interactive REPL
    pub async fn run(&self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        if let Some(ref path) = self.history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            match rl.readline("council> ") {
                Ok(line) => {
                    let command = match ChatCommand::parse(&line) {
                        Ok(Some(command)) => command,
                        Ok(None) => continue,
                        Err(e) => {
                            eprintln!("{}", e);
                            continue;
                        }
                    };

                    let _ = rl.add_history_entry(line.trim());

                    let reply = self.execute_interruptible(command).await;
                    println!("{}", reply.text);
                    if reply.quit {
                        break;
                    }
                    println!();
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

        if let Some(ref path) = self.history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    /// Execute a command; Ctrl-C cancels a running dispatch
    async fn execute_interruptible(&self, command: ChatCommand) -> crate::chat::ChatReply {
        let token = CancellationToken::new();
        let watcher = {
            let token = token.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    token.cancel();
                }
            })
        };

        let reply = self.session.execute(command, Some(token)).await;
        watcher.abort();
        reply
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│            AI Council - Chat Mode           │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!(
            "Council: {}",
            self.session
                .registry()
                .list_enabled()
                .iter()
                .map(|id| id.display_name())
                .collect::<Vec<_>>()
                .join(", ")
        );
        println!("Type 'help' for commands, 'quit' to exit.");
        println!();
    }
}
