//! Turn a line typed at the prompt into an outbound event.

use thiserror::Error;

use genkan_server::infrastructure::dto::websocket::ClientEvent;

use crate::domain::Role;

/// What the session loop should do with a line
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Send(ClientEvent),
    Help,
    Quit,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command '/{0}'. Type /help for the list of commands.")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("/{0} is not available in this mode")]
    NotAvailable(String),

    #[error("No session open. Use /open <session_id> first.")]
    NoOpenSession,
}

pub const VISITOR_HELP: &str = "\
Commands:
  <text>             send a message (type \"menu\" to open the menu)
  /select <id>       pick a menu option
  /main              back to the main menu
  /history           show your transcript again
  /summary <email>   mail yourself a summary of this chat
  /quit              leave
";

pub const OPERATOR_HELP: &str = "\
Commands:
  /open <session_id>          show a visitor's transcript
  /reply <session_id> <text>  answer a visitor
  <text>                      answer the session opened last
  /quit                       leave
";

/// Parse one input line.
///
/// `open_session` is the session an operator opened last; bare text from an
/// operator is addressed to it.
pub fn parse_command(
    line: &str,
    role: &Role,
    open_session: Option<&str>,
) -> Result<Command, CommandError> {
    let line = line.trim();

    let Some(rest) = line.strip_prefix('/') else {
        return match role {
            Role::Visitor { .. } => Ok(Command::Send(ClientEvent::plain_message(
                line.to_string(),
            ))),
            Role::Operator => open_session
                .map(|session_id| Command::Send(operator_message(session_id, line)))
                .ok_or(CommandError::NoOpenSession),
        };
    };

    let (name, argument) = match rest.split_once(char::is_whitespace) {
        Some((name, argument)) => (name, argument.trim()),
        None => (rest, ""),
    };

    match (name, role) {
        ("quit" | "exit", _) => Ok(Command::Quit),
        ("help", _) => Ok(Command::Help),

        ("select", Role::Visitor { .. }) => required(argument, "/select <id>").map(|id| {
            Command::Send(ClientEvent::MenuOptionSelected { id: id.to_string() })
        }),
        ("main", Role::Visitor { .. }) => Ok(Command::Send(ClientEvent::ReturnToMainMenu)),
        ("history", Role::Visitor { .. }) => Ok(Command::Send(ClientEvent::Join)),
        ("summary", Role::Visitor { .. }) => required(argument, "/summary <email>").map(|email| {
            Command::Send(ClientEvent::RequestSummaryEmail {
                email: email.to_string(),
            })
        }),

        ("open", Role::Operator) => required(argument, "/open <session_id>").map(|session_id| {
            Command::Send(ClientEvent::OperatorSelectSession {
                session_id: session_id.to_string(),
            })
        }),
        ("reply", Role::Operator) => {
            let usage = "/reply <session_id> <text>";
            let (session_id, text) = argument
                .split_once(char::is_whitespace)
                .ok_or(CommandError::Usage(usage))?;
            let text = required(text.trim(), usage)?;
            Ok(Command::Send(operator_message(session_id, text)))
        }

        ("select" | "main" | "history" | "summary" | "open" | "reply", _) => {
            Err(CommandError::NotAvailable(name.to_string()))
        }
        _ => Err(CommandError::Unknown(name.to_string())),
    }
}

fn required<'a>(argument: &'a str, usage: &'static str) -> Result<&'a str, CommandError> {
    if argument.is_empty() {
        Err(CommandError::Usage(usage))
    } else {
        Ok(argument)
    }
}

fn operator_message(session_id: &str, text: &str) -> ClientEvent {
    ClientEvent::OperatorMessage {
        session_id: session_id.to_string(),
        text: text.to_string(),
        message_id: None,
        timestamp: None,
    }
}
