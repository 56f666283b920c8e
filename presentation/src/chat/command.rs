//! Chat command language
//!
//! ```text
//! [!council ]code <prompt>      generate code
//! [!council ]analyze <code>     review code
//! [!council ]ask <question>     answer a question
//! [!council ]status             council status
//! [!council ]ai [status]        provider table
//! [!council ]ai enable <name>   enable a provider
//! [!council ]ai disable <name>  disable a provider
//! [!council ]mood               persona mood
//! [!council ]think <topic>      persona reflection
//! [!council ]history [n]        recent operations
//! [!council ]help | quit
//! ```

use council_domain::RequestKind;
use thiserror::Error;

/// Optional prefix accepted in front of every command
pub const COMMAND_PREFIX: &str = "!council";

pub const HELP_TEXT: &str = "\
Commands:
  code <prompt>         Generate code with the council
  analyze <code>        Review a piece of code
  ask <question>        Ask the council a question
  status                Show providers and recent operations
  ai status             Show the provider table
  ai enable <provider>  Enable a provider
  ai disable <provider> Disable a provider
  mood                  Show the persona's mood and reflections
  think <topic>         Ask the persona to reflect on a topic
  history [n]           Show the last n operations
  help                  Show this help
  quit                  Exit chat";

#[derive(Debug, Clone, PartialEq)]
pub enum ChatCommand {
    Dispatch { kind: RequestKind, input: String },
    Status,
    Providers,
    Enable(String),
    Disable(String),
    Mood,
    Think(String),
    History(Option<usize>),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatCommandError {
    #[error("Usage: {0}")]
    MissingArgument(&'static str),

    #[error("Unknown command '{0}'. Valid commands: code, analyze, ask, status, ai, mood, think, history, help, quit")]
    UnknownCommand(String),

    #[error("'{0}' is not a valid count")]
    InvalidCount(String),
}

impl ChatCommand {
    /// Parse one input line; `Ok(None)` for blank lines
    pub fn parse(line: &str) -> Result<Option<Self>, ChatCommandError> {
        let mut line = line.trim();
        if let Some(rest) = line.strip_prefix(COMMAND_PREFIX) {
            if rest.is_empty() {
                return Ok(Some(ChatCommand::Help));
            }
            if rest.starts_with(char::is_whitespace) {
                line = rest.trim_start();
            }
        }
        if line.is_empty() {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "code" | "generate" => Self::dispatch(RequestKind::GenerateCode, rest, "code <prompt>")?,
            "analyze" | "review" => Self::dispatch(RequestKind::AnalyzeCode, rest, "analyze <code>")?,
            "ask" => Self::dispatch(RequestKind::AnswerQuestion, rest, "ask <question>")?,
            "status" => ChatCommand::Status,
            "ai" => Self::parse_ai(rest)?,
            "mood" => ChatCommand::Mood,
            "think" if rest.is_empty() => {
                return Err(ChatCommandError::MissingArgument("think <topic>"));
            }
            "think" => ChatCommand::Think(rest.to_string()),
            "history" => Self::parse_history(rest)?,
            "help" | "?" => ChatCommand::Help,
            "quit" | "exit" => ChatCommand::Quit,
            _ => return Err(ChatCommandError::UnknownCommand(word.to_string())),
        };
        Ok(Some(command))
    }

    fn dispatch(
        kind: RequestKind,
        input: &str,
        usage: &'static str,
    ) -> Result<Self, ChatCommandError> {
        if input.is_empty() {
            return Err(ChatCommandError::MissingArgument(usage));
        }
        Ok(ChatCommand::Dispatch {
            kind,
            input: input.to_string(),
        })
    }

    fn parse_ai(rest: &str) -> Result<Self, ChatCommandError> {
        let mut words = rest.split_whitespace();
        match words.next().map(str::to_ascii_lowercase).as_deref() {
            None | Some("status") => Ok(ChatCommand::Providers),
            Some("enable") => words
                .next()
                .map(|name| ChatCommand::Enable(name.to_string()))
                .ok_or(ChatCommandError::MissingArgument("ai enable <provider>")),
            Some("disable") => words
                .next()
                .map(|name| ChatCommand::Disable(name.to_string()))
                .ok_or(ChatCommandError::MissingArgument("ai disable <provider>")),
            Some(other) => Err(ChatCommandError::UnknownCommand(format!("ai {other}"))),
        }
    }

    fn parse_history(rest: &str) -> Result<Self, ChatCommandError> {
        if rest.is_empty() {
            return Ok(ChatCommand::History(None));
        }
        rest.parse()
            .map(|n| ChatCommand::History(Some(n)))
            .map_err(|_| ChatCommandError::InvalidCount(rest.to_string()))
    }
}
