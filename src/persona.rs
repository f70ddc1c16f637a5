//! The fixed instruction that shapes every reply.

use std::path::Path;

use crate::error::{Error, Result};
use crate::types::Turn;

const DEFAULT_NAME: &str = "Minseok Kim";
const DEFAULT_INSTRUCTIONS: &str = include_str!("persona.md");

/// Who the assistant speaks as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Persona {
    /// Display name shown as the assistant's label.
    pub name: String,

    /// The system instruction sent ahead of every conversation.
    pub instructions: String,
}

impl Persona {
    /// Create a persona from a name and instructions.
    pub fn new(name: impl Into<String>, instructions: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instructions: instructions.into(),
        }
    }

    /// Load the instructions from a markdown or plain text file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read and a validation error
    /// if it is blank.
    pub fn from_file<P: AsRef<Path>>(name: impl Into<String>, path: P) -> Result<Self> {
        let path = path.as_ref();
        let instructions = std::fs::read_to_string(path).map_err(|err| {
            Error::io(format!("failed to read persona {}", path.display()), err)
        })?;
        if instructions.trim().is_empty() {
            return Err(Error::validation(
                format!("persona file {} is empty", path.display()),
                Some("persona".to_string()),
            ));
        }
        Ok(Self::new(name, instructions))
    }

    /// The system turn that seeds a transcript.
    pub fn to_turn(&self) -> Turn {
        Turn::system(self.instructions.clone())
    }
}

impl Default for Persona {
    fn default() -> Self {
        Self::new(DEFAULT_NAME, DEFAULT_INSTRUCTIONS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;

    #[test]
    fn default_persona_mentions_projects() {
        let persona = Persona::default();
        assert_eq!(persona.name, "Minseok Kim");
        assert!(persona.instructions.contains("ESP-01"));
        assert!(persona.instructions.contains("Via Temi"));
    }

    #[test]
    fn to_turn_is_system() {
        let turn = Persona::new("Tester", "Be brief.").to_turn();
        assert_eq!(turn.role, Role::System);
        assert_eq!(turn.content, "Be brief.");
    }

    #[test]
    fn from_file_reads_and_rejects_blank() {
        let dir = std::env::temp_dir().join(format!("persona-chat-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let path = dir.join("persona.md");
        std::fs::write(&path, "Answer as a pirate.").unwrap();
        let persona = Persona::from_file("Pirate", &path).unwrap();
        assert_eq!(persona.instructions, "Answer as a pirate.");

        let blank = dir.join("blank.md");
        std::fs::write(&blank, "  \n").unwrap();
        assert!(Persona::from_file("Nobody", &blank).unwrap_err().is_validation());

        let missing = dir.join("missing.md");
        assert!(matches!(
            Persona::from_file("Nobody", &missing).unwrap_err(),
            Error::Io { .. }
        ));
    }
}
