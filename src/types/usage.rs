use std::ops::Add;

use serde::{Deserialize, Serialize};

/// Token accounting reported alongside a completion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    /// Tokens in the prompt, persona and history included.
    #[serde(default)]
    pub prompt_tokens: u64,

    /// Tokens in the reply.
    #[serde(default)]
    pub completion_tokens: u64,

    /// Sum of the two, as reported by the provider.
    #[serde(default)]
    pub total_tokens: u64,
}

impl Usage {
    /// Create a new `Usage`; the total is derived.
    pub fn new(prompt_tokens: u64, completion_tokens: u64) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }
}

impl Add for Usage {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            prompt_tokens: self.prompt_tokens.saturating_add(rhs.prompt_tokens),
            completion_tokens: self.completion_tokens.saturating_add(rhs.completion_tokens),
            total_tokens: self.total_tokens.saturating_add(rhs.total_tokens),
        }
    }
}
