//! The secret that authorizes provider calls.
//!
//! A credential comes either from process configuration (an environment
//! variable) or from the visitor typing it in.  Both produce the same
//! [`Credential`], so nothing downstream can tell them apart.

use std::env;
use std::fmt;

use crate::error::{Error, Result};

/// Environment variable consulted for the process-wide credential.
pub const DEFAULT_CREDENTIAL_VAR: &str = "OPENAI_API_KEY";

/// An opaque API key.
///
/// There is no `Display` implementation and `Debug` is redacted so the key
/// cannot end up in a log line or an error message by accident.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credential {
    secret: String,
}

impl Credential {
    /// A credential typed in by the user.  Surrounding whitespace is dropped.
    pub fn new(secret: impl Into<String>) -> Self {
        let secret = secret.into();
        let trimmed = secret.trim();
        if trimmed.len() == secret.len() {
            Self { secret }
        } else {
            Self {
                secret: trimmed.to_string(),
            }
        }
    }

    /// The absent credential.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Read a credential from the environment variable `var`.
    ///
    /// An unset or non-Unicode variable yields the empty credential.
    pub fn from_env(var: &str) -> Self {
        match env::var(var) {
            Ok(val) => Self::new(val),
            Err(_) => Self::empty(),
        }
    }

    /// Prefer the configured credential and fall back to the entered one.
    pub fn resolve(configured: Option<Credential>, entered: Option<Credential>) -> Self {
        configured
            .filter(|c| !c.is_empty())
            .or(entered)
            .unwrap_or_default()
    }

    /// True when no secret is present.
    pub fn is_empty(&self) -> bool {
        self.secret.is_empty()
    }

    /// Returns `self` when present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingCredential`] when empty.
    pub fn require(&self) -> Result<&Self> {
        if self.is_empty() {
            Err(Error::missing_credential())
        } else {
            Ok(self)
        }
    }

    /// The secret itself.  Only the HTTP client should call this.
    pub fn expose(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "Credential(<empty>)")
        } else {
            write!(f, "Credential(<redacted>)")
        }
    }
}

impl From<String> for Credential {
    fn from(secret: String) -> Self {
        Self::new(secret)
    }
}

impl From<&str> for Credential {
    fn from(secret: &str) -> Self {
        Self::new(secret)
    }
}
