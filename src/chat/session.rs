//! Core chat session management.
//!
//! This module provides the [`ChatSession`] struct, which owns one visitor's
//! transcript and relays each question to the completion provider.

use crate::client::OpenAi;
use crate::completion::{CompletionAdapter, Provider};
use crate::credential::Credential;
use crate::error::Result;
use crate::observability::{MISSING_CREDENTIAL, SESSIONS_INITIALIZED};
use crate::persona::Persona;
use crate::types::{Model, Transcript, Turn, Usage};

/// A chat session: one persona, one transcript, one provider.
///
/// The transcript lives exactly as long as the session.  It is seeded by
/// [`initialize`](Self::initialize) and only grows: each [`submit`](Self::submit)
/// appends the user turn and, if the provider answers, the assistant turn.
pub struct ChatSession<P: Provider = OpenAi> {
    adapter: CompletionAdapter<P>,
    persona: Persona,
    transcript: Option<Transcript>,
    usage_totals: Usage,
    last_turn_usage: Option<Usage>,
    request_count: u64,
    failure_count: u64,
}

/// Aggregated stats for a chat session.
#[derive(Debug, Clone)]
pub struct SessionStats {
    /// The model used for the session.
    pub model: Model,
    /// The persona's display name.
    pub persona: String,
    /// Turns shown to the visitor.
    pub visible_turns: usize,
    /// Provider calls attempted.
    pub total_requests: u64,
    /// Provider calls that failed.
    pub failed_requests: u64,
    /// Prompt tokens across all successful requests.
    pub total_prompt_tokens: u64,
    /// Completion tokens across all successful requests.
    pub total_completion_tokens: u64,
    /// Usage of the last successful request, if reported.
    pub last_turn_usage: Option<Usage>,
}

impl<P: Provider> ChatSession<P> {
    /// Creates a new session and seeds its transcript with the persona.
    pub fn new(provider: P, persona: Persona, model: Model) -> Self {
        let mut session = Self {
            adapter: CompletionAdapter::new(provider, model),
            persona,
            transcript: None,
            usage_totals: Usage::default(),
            last_turn_usage: None,
            request_count: 0,
            failure_count: 0,
        };
        session.initialize();
        session
    }

    /// Seeds the transcript with the persona's system turn.
    ///
    /// Idempotent: once a transcript exists it is returned untouched, so
    /// calling this on every redraw never loses the conversation.
    pub fn initialize(&mut self) -> &Transcript {
        seed(&mut self.transcript, &self.persona)
    }

    /// Sends a user message and records the reply.
    ///
    /// This method:
    /// 1. Refuses with `MissingCredential` when `credential` is empty, leaving
    ///    the transcript untouched
    /// 2. Appends the user turn
    /// 3. Sends the whole transcript to the provider
    /// 4. Appends and returns the assistant turn
    ///
    /// # Errors
    ///
    /// On a provider failure the user turn stays in the transcript, no
    /// assistant turn is added, and the session remains usable.
    ///
    /// # Examples
    ///
    /// ```
    /// use persona_chat::chat::ChatSession;
    /// use persona_chat::{Credential, Model, OpenAi, Persona};
    ///
    /// let client = OpenAi::new(None).unwrap();
    /// let mut session = ChatSession::new(client, Persona::default(), Model::default());
    /// let err = tokio_test::block_on(session.submit("Hi", &Credential::empty())).unwrap_err();
    /// assert!(err.is_missing_credential());
    /// assert_eq!(session.visible_turns().count(), 0);
    /// ```
    pub async fn submit(&mut self, text: &str, credential: &Credential) -> Result<&Turn> {
        if let Err(err) = credential.require() {
            MISSING_CREDENTIAL.click();
            return Err(err);
        }

        let transcript = seed(&mut self.transcript, &self.persona);
        transcript.append(Turn::user(text))?;
        self.request_count = self.request_count.saturating_add(1);

        match self.adapter.send(transcript, credential).await {
            Ok(reply) => {
                if let Some(usage) = reply.usage {
                    self.last_turn_usage = Some(usage);
                    self.usage_totals = self.usage_totals + usage;
                }
                transcript.append(Turn::assistant(reply.text))?;
                Ok(transcript.last())
            }
            Err(err) => {
                self.failure_count = self.failure_count.saturating_add(1);
                Err(err)
            }
        }
    }

    /// The turns to display, in order, without the system turn.
    pub fn visible_turns(&self) -> impl Iterator<Item = &Turn> + Clone + '_ {
        self.transcript
            .iter()
            .flat_map(|transcript| transcript.visible_turns())
    }

    /// The transcript, once initialized.
    pub fn transcript(&self) -> Option<&Transcript> {
        self.transcript.as_ref()
    }

    /// The persona this session speaks as.
    pub fn persona(&self) -> &Persona {
        &self.persona
    }

    /// Returns the current model.
    pub fn model(&self) -> &Model {
        self.adapter.model()
    }

    /// Returns the current session statistics snapshot.
    pub fn stats(&self) -> SessionStats {
        SessionStats {
            model: self.model().clone(),
            persona: self.persona.name.clone(),
            visible_turns: self.transcript.as_ref().map_or(0, Transcript::visible_len),
            total_requests: self.request_count,
            failed_requests: self.failure_count,
            total_prompt_tokens: self.usage_totals.prompt_tokens,
            total_completion_tokens: self.usage_totals.completion_tokens,
            last_turn_usage: self.last_turn_usage,
        }
    }
}

fn seed<'a>(slot: &'a mut Option<Transcript>, persona: &Persona) -> &'a mut Transcript {
    slot.get_or_insert_with(|| {
        SESSIONS_INITIALIZED.click();
        Transcript::new(persona.instructions.clone())
    })
}
