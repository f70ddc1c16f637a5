//! Logging trait for provider client operations.
//!
//! This module provides the [`ClientLogger`] trait that allows users to capture
//! the completions returned through the [`OpenAi`](crate::OpenAi) client.
//! Loggers see requests and responses, never the credential.

use crate::{ChatCompletion, ChatCompletionRequest, Error};

/// Observes every call made through [`OpenAi`](crate::OpenAi).
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Mutex;
///
/// use persona_chat::{ChatCompletion, ChatCompletionRequest, ClientLogger, Error};
///
/// #[derive(Default)]
/// struct Transcript(Mutex<Vec<String>>);
///
/// impl ClientLogger for Transcript {
///     fn log_request(&self, request: &ChatCompletionRequest) {
///         let line = format!("-> {} turns to {}", request.messages.len(), request.model);
///         self.0.lock().unwrap().push(line);
///     }
///
///     fn log_response(&self, completion: &ChatCompletion) {
///         self.0.lock().unwrap().push(format!("<- {}", completion.id));
///     }
///
///     fn log_error(&self, error: &Error) {
///         self.0.lock().unwrap().push(format!("!! {error}"));
///     }
/// }
/// ```
pub trait ClientLogger: Send + Sync {
    /// Log a request just before it is sent.
    fn log_request(&self, request: &ChatCompletionRequest);

    /// Log a complete response.
    ///
    /// This method is called once per successful call with the parsed
    /// [`ChatCompletion`].
    fn log_response(&self, completion: &ChatCompletion);

    /// Log a failed call.
    fn log_error(&self, error: &Error) {
        _ = error;
    }
}
