//! The seam between a chat session and the completion provider.
//!
//! [`CompletionAdapter::send`] is the only place a transcript leaves the
//! process.  It checks for a credential first, so a session without one never
//! touches the network, then makes exactly one provider call.  There is no
//! retry or backoff: a failure is returned to the caller as is.

use crate::credential::Credential;
use crate::error::Result;
use crate::observability::{MISSING_CREDENTIAL, PROVIDER_FAILURES};
use crate::types::{ChatCompletion, ChatCompletionRequest, Model, Transcript, Usage};

/// An external chat-completion service.
#[async_trait::async_trait]
pub trait Provider: Send + Sync {
    /// Complete `request`, authorized by `credential`.
    async fn complete(
        &self,
        credential: &Credential,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletion>;
}

#[async_trait::async_trait]
impl<P: Provider + ?Sized> Provider for std::sync::Arc<P> {
    async fn complete(
        &self,
        credential: &Credential,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletion> {
        (**self).complete(credential, request).await
    }
}

/// A provider's reply to one transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// The reply text, to be appended as an assistant turn.
    pub text: String,

    /// Token accounting, when the provider reported it.
    pub usage: Option<Usage>,
}

/// Sends transcripts to a [`Provider`] using a fixed model.
#[derive(Debug, Clone)]
pub struct CompletionAdapter<P: Provider> {
    provider: P,
    model: Model,
}

impl<P: Provider> CompletionAdapter<P> {
    /// Create an adapter that asks `provider` for completions from `model`.
    pub fn new(provider: P, model: Model) -> Self {
        Self { provider, model }
    }

    /// The model every request names.
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// The underlying provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Send the whole transcript and return the reply text.
    ///
    /// # Errors
    ///
    /// [`Error::MissingCredential`](crate::Error::MissingCredential) when the
    /// credential is empty; no request is made.  Any other error is a provider
    /// failure.
    pub async fn send(&self, transcript: &Transcript, credential: &Credential) -> Result<Reply> {
        if let Err(err) = credential.require() {
            MISSING_CREDENTIAL.click();
            return Err(err);
        }
        let request = ChatCompletionRequest::new(self.model.clone(), transcript.turns().to_vec());
        let completion = match self.provider.complete(credential, &request).await {
            Ok(completion) => completion,
            Err(err) => {
                PROVIDER_FAILURES.click();
                return Err(err);
            }
        };
        match completion.reply_text() {
            Ok(text) => Ok(Reply {
                text: text.to_string(),
                usage: completion.usage,
            }),
            Err(err) => {
                PROVIDER_FAILURES.click();
                Err(err)
            }
        }
    }
}
