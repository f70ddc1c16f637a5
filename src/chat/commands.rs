//! Slash command parsing for the chat application.
//!
//! This module handles parsing of special commands that start with `/`,
//! allowing users to browse the portfolio and manage the session without
//! sending messages to the API.

/// A parsed chat command.
///
/// These commands control the chat session and are not sent to the API.
#[derive(Clone, PartialEq)]
pub enum ChatCommand {
    /// Show the profile header and introduction.
    Profile,

    /// List the portfolio sections.
    Sections,

    /// Show one portfolio section by key.
    Section(String),

    /// Replay the conversation so far.
    History,

    /// Supply the API key for this session.
    Key(String),

    /// Display help information.
    Help,

    /// Exit the chat application.
    Quit,

    /// Display session statistics.
    Stats,

    /// Report a parsing error back to the caller.
    Invalid(String),
}

// Hand-written so `/key` arguments never reach a debug print.
impl std::fmt::Debug for ChatCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatCommand::Profile => write!(f, "Profile"),
            ChatCommand::Sections => write!(f, "Sections"),
            ChatCommand::Section(key) => f.debug_tuple("Section").field(key).finish(),
            ChatCommand::History => write!(f, "History"),
            ChatCommand::Key(_) => write!(f, "Key(<redacted>)"),
            ChatCommand::Help => write!(f, "Help"),
            ChatCommand::Quit => write!(f, "Quit"),
            ChatCommand::Stats => write!(f, "Stats"),
            ChatCommand::Invalid(message) => f.debug_tuple("Invalid").field(message).finish(),
        }
    }
}

/// Parses user input for slash commands.
///
/// Returns `Some(ChatCommand)` if the input is a valid command,
/// or `None` if it should be treated as a regular message.
///
/// # Examples
///
/// ```
/// # use persona_chat::chat::parse_command;
/// assert!(parse_command("/quit").is_some());
/// assert!(parse_command("/section projects").is_some());
/// assert!(parse_command("What did you build?").is_none());
/// ```
pub fn parse_command(input: &str) -> Option<ChatCommand> {
    let input = input.trim();

    if !input.starts_with('/') {
        return None;
    }

    let mut parts = input[1..].splitn(2, ' ');
    let command = parts.next()?.to_lowercase();
    let argument = parts.next().map(|s| s.trim()).filter(|s| !s.is_empty());

    let result = match command.as_str() {
        "profile" | "about" => ChatCommand::Profile,
        "sections" => ChatCommand::Sections,
        "projects" => ChatCommand::Section("projects".to_string()),
        "awards" => ChatCommand::Section("awards".to_string()),
        "section" => match argument {
            Some(key) => ChatCommand::Section(key.to_lowercase()),
            None => ChatCommand::Invalid("/section requires a section name".to_string()),
        },
        "history" => ChatCommand::History,
        "key" => match argument {
            Some(secret) => ChatCommand::Key(secret.to_string()),
            None => ChatCommand::Invalid("/key requires an API key".to_string()),
        },
        "help" | "?" => ChatCommand::Help,
        "quit" | "exit" | "q" => ChatCommand::Quit,
        "stats" | "status" => ChatCommand::Stats,
        _ => ChatCommand::Invalid(format!("Unknown command: /{}", command)),
    };

    Some(result)
}

/// Returns the help text for available commands.
pub fn help_text() -> &'static str {
    r#"Available commands:
  /profile            Show the profile
  /projects           Show the projects section
  /awards             Show the awards section
  /section <key>      Show any section by key
  /sections           List section keys
  /history            Replay the conversation
  /key <api-key>      Set the API key for this session
  /stats              Show session statistics
  /help, /?           Show this help message
  /quit, /exit, /q    Exit the chat

Anything else is sent to the persona as a question."#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regular_message_is_not_command() {
        assert!(parse_command("What was hardest about the drone build?").is_none());
        assert!(parse_command("").is_none());
        assert!(parse_command("  no slash ").is_none());
    }

    #[test]
    fn parse_navigation_commands() {
        assert_eq!(parse_command("/profile"), Some(ChatCommand::Profile));
        assert_eq!(parse_command("/about"), Some(ChatCommand::Profile));
        assert_eq!(parse_command("/sections"), Some(ChatCommand::Sections));
        assert_eq!(
            parse_command("/projects"),
            Some(ChatCommand::Section("projects".to_string()))
        );
        assert_eq!(
            parse_command("/awards"),
            Some(ChatCommand::Section("awards".to_string()))
        );
        assert_eq!(
            parse_command("/section  Awards "),
            Some(ChatCommand::Section("awards".to_string()))
        );
        assert!(matches!(
            parse_command("/section"),
            Some(ChatCommand::Invalid(_))
        ));
    }

    #[test]
    fn parse_session_commands() {
        assert_eq!(parse_command("/history"), Some(ChatCommand::History));
        assert_eq!(parse_command("/stats"), Some(ChatCommand::Stats));
        assert_eq!(parse_command("/status"), Some(ChatCommand::Stats));
        assert_eq!(parse_command("/HELP"), Some(ChatCommand::Help));
        assert_eq!(parse_command("/?"), Some(ChatCommand::Help));
        assert_eq!(parse_command("/quit"), Some(ChatCommand::Quit));
        assert_eq!(parse_command("/exit"), Some(ChatCommand::Quit));
        assert_eq!(parse_command("/q"), Some(ChatCommand::Quit));
    }

    #[test]
    fn parse_key_keeps_secret_out_of_debug() {
        let command = parse_command("/key sk-abc123").unwrap();
        assert_eq!(command, ChatCommand::Key("sk-abc123".to_string()));
        assert_eq!(format!("{command:?}"), "Key(<redacted>)");
        assert!(matches!(parse_command("/key"), Some(ChatCommand::Invalid(_))));
    }

    #[test]
    fn unknown_command() {
        assert_eq!(
            parse_command("/clear"),
            Some(ChatCommand::Invalid("Unknown command: /clear".to_string()))
        );
    }
}
