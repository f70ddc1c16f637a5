use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{Model, Role, Turn, Usage};

/// Request body for `POST chat/completions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    /// The model that will complete the conversation.
    pub model: Model,

    /// The whole conversation, system turn first.
    pub messages: Vec<Turn>,
}

impl ChatCompletionRequest {
    /// Create a new request for `model` over `messages`.
    pub fn new(model: Model, messages: Vec<Turn>) -> Self {
        Self { model, messages }
    }
}

/// The message inside a [`Choice`].
///
/// Content is optional on the wire: refusals and tool calls come back with
/// `"content": null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceMessage {
    /// Role of the author; always `assistant` in practice.
    pub role: Role,

    /// Reply text.
    #[serde(default)]
    pub content: Option<String>,
}

/// One completion alternative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    /// Position among the returned choices.
    #[serde(default)]
    pub index: u32,

    /// The generated message.
    pub message: ChoiceMessage,

    /// Why generation stopped, e.g. `stop` or `length`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Response body for `POST chat/completions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletion {
    /// Provider-assigned completion id.
    #[serde(default)]
    pub id: String,

    /// Model that produced the completion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Completion alternatives; one is requested.
    pub choices: Vec<Choice>,

    /// Token accounting, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

impl ChatCompletion {
    /// The text of the first choice.
    ///
    /// # Errors
    ///
    /// Returns a serialization error when the provider sent no choices or a
    /// choice without text.
    pub fn reply_text(&self) -> Result<&str> {
        let choice = self
            .choices
            .first()
            .ok_or_else(|| Error::malformed_response("response contained no choices"))?;
        choice.message.content.as_deref().ok_or_else(|| {
            let reason = choice.finish_reason.as_deref().unwrap_or("unknown");
            Error::malformed_response(format!(
                "response choice had no content (finish reason: {reason})"
            ))
        })
    }

    /// Consume the completion and return the reply as an assistant turn.
    pub fn into_turn(self) -> Result<Turn> {
        let text = self.reply_text()?.to_string();
        Ok(Turn::assistant(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::KnownModel;
    use serde_json::{json, to_value};

    #[test]
    fn request_serializes_model_and_messages() {
        let request = ChatCompletionRequest::new(
            Model::Known(KnownModel::Gpt4oMini),
            vec![Turn::system("persona"), Turn::user("hello")],
        );
        assert_eq!(
            to_value(&request).unwrap(),
            json!({
                "model": "gpt-4o-mini",
                "messages": [
                    {"role": "system", "content": "persona"},
                    {"role": "user", "content": "hello"}
                ]
            })
        );
    }

    #[test]
    fn completion_parses_openai_response() {
        let body = json!({
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "created": 1677652288,
            "model": "gpt-4o-mini-2024-07-18",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "Soldering the telemetry module."},
                "logprobs": null,
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 9, "completion_tokens": 12, "total_tokens": 21}
        });
        let completion: ChatCompletion = serde_json::from_value(body).unwrap();
        assert_eq!(completion.id, "chatcmpl-123");
        assert_eq!(
            completion.reply_text().unwrap(),
            "Soldering the telemetry module."
        );
        assert_eq!(completion.usage, Some(Usage::new(9, 12)));
        assert_eq!(
            completion.into_turn().unwrap(),
            Turn::assistant("Soldering the telemetry module.")
        );
    }

    #[test]
    fn empty_choices_is_malformed() {
        let completion: ChatCompletion =
            serde_json::from_value(json!({"id": "x", "choices": []})).unwrap();
        let err = completion.reply_text().unwrap_err();
        assert!(err.is_provider_failure());
        assert!(err.to_string().contains("no choices"));
    }

    #[test]
    fn null_content_is_malformed() {
        let completion: ChatCompletion = serde_json::from_value(json!({
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": null},
                "finish_reason": "content_filter"
            }]
        }))
        .unwrap();
        let err = completion.reply_text().unwrap_err();
        assert!(err.to_string().contains("content_filter"));
    }
}
