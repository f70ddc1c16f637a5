use crate::error::{Error, Result};
use crate::observability::TURNS_APPENDED;
use crate::types::{Role, Turn};

/// The ordered turns of one chat session.
///
/// The first turn is always the persona's system turn and no other system turn
/// may follow it.  Turns are only ever appended, so insertion order is both
/// chronological order and display order.  There is no cap on length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    /// Create a transcript seeded with the system turn.
    pub fn new(system: impl Into<String>) -> Self {
        Self {
            turns: vec![Turn::system(system)],
        }
    }

    /// Append a turn to the end of the transcript.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a system turn; the persona turn is fixed
    /// at construction.
    pub fn append(&mut self, turn: Turn) -> Result<()> {
        if turn.role == Role::System {
            return Err(Error::validation(
                "a transcript holds exactly one system turn, at the start",
                Some("role".to_string()),
            ));
        }
        self.turns.push(turn);
        TURNS_APPENDED.click();
        Ok(())
    }

    /// The turns a visitor sees, in insertion order.
    ///
    /// The returned iterator is `Clone`, and calling this again yields a fresh
    /// iterator over the current contents.
    pub fn visible_turns(&self) -> impl Iterator<Item = &Turn> + Clone + '_ {
        self.turns.iter().filter(|turn| turn.is_visible())
    }

    /// Every turn, system turn first; this is what the provider receives.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// The persona's system turn.
    pub fn system(&self) -> &Turn {
        &self.turns[0]
    }

    /// The most recent turn.
    pub fn last(&self) -> &Turn {
        &self.turns[self.turns.len() - 1]
    }

    /// Total number of turns, including the system turn.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Always false: the system turn is always present.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Number of turns a visitor sees.
    pub fn visible_len(&self) -> usize {
        self.turns.len() - 1
    }
}
