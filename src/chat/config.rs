//! Configuration types for the chat application.
//!
//! This module provides CLI argument parsing via `arrrg` and configuration
//! structures for controlling chat behavior.

use std::path::PathBuf;
use std::time::Duration;

use arrrg_derive::CommandLine;

use crate::credential::DEFAULT_CREDENTIAL_VAR;
use crate::types::Model;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Command-line arguments for the persona-chat tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ChatArgs {
    /// Model to use for chat.
    #[arrrg(optional, "Model to use (default: gpt-4o-mini)", "MODEL")]
    pub model: Option<String>,

    /// Base URL of an OpenAI-compatible API.
    #[arrrg(optional, "API base URL (default: https://api.openai.com/v1/)", "URL")]
    pub base_url: Option<String>,

    /// File holding the persona instructions.
    #[arrrg(optional, "Persona instructions file (default: built in)", "FILE")]
    pub persona: Option<String>,

    /// YAML file describing the portfolio sections.
    #[arrrg(optional, "Portfolio profile YAML (default: built in)", "FILE")]
    pub profile: Option<String>,

    /// Directory that holds portfolio images.
    #[arrrg(optional, "Directory of portfolio images (default: images)", "DIR")]
    pub assets: Option<String>,

    /// Request timeout in seconds.
    #[arrrg(optional, "Request timeout in seconds; 0 means the default of 60", "SECS")]
    pub timeout: Option<u64>,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,
}

/// Configuration for a chat session.
///
/// This struct holds the resolved configuration values after processing
/// command-line arguments with appropriate defaults.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// The model to use for generating responses.
    pub model: Model,

    /// Override for the provider's base URL.
    pub base_url: Option<String>,

    /// Persona instructions file; the built-in persona when unset.
    pub persona_path: Option<PathBuf>,

    /// Portfolio profile file; the built-in profile when unset.
    pub profile_path: Option<PathBuf>,

    /// Directory portfolio images are resolved against.
    pub assets_dir: String,

    /// Per-request timeout.
    pub timeout: Duration,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,

    /// Environment variable holding the process-wide credential.
    pub credential_var: String,
}

impl ChatConfig {
    /// Creates a new ChatConfig with default values.
    ///
    /// Defaults:
    /// - Model: gpt-4o-mini
    /// - Timeout: 60 seconds
    /// - Assets: ./images
    /// - Credential: $OPENAI_API_KEY
    /// - Color: enabled
    pub fn new() -> Self {
        Self {
            model: Model::default(),
            base_url: None,
            persona_path: None,
            profile_path: None,
            assets_dir: "images".to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            use_color: true,
            credential_var: DEFAULT_CREDENTIAL_VAR.to_string(),
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    /// Sets the provider base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the persona file.
    pub fn with_persona_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.persona_path = Some(path.into());
        self
    }

    /// Sets the profile file.
    pub fn with_profile_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.profile_path = Some(path.into());
        self
    }

    /// Sets the image directory.
    pub fn with_assets_dir(mut self, dir: impl Into<String>) -> Self {
        self.assets_dir = dir.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Disables ANSI color output.
    pub fn without_color(mut self) -> Self {
        self.use_color = false;
        self
    }

    /// Reads the credential from a different environment variable.
    pub fn with_credential_var(mut self, var: impl Into<String>) -> Self {
        self.credential_var = var.into();
        self
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ChatArgs> for ChatConfig {
    fn from(args: ChatArgs) -> Self {
        let defaults = ChatConfig::new();
        let model = args
            .model
            .map(|s| s.parse::<Model>().unwrap_or(Model::Custom(s)))
            .unwrap_or(defaults.model.clone());

        ChatConfig {
            model,
            base_url: args.base_url,
            persona_path: args.persona.map(PathBuf::from),
            profile_path: args.profile.map(PathBuf::from),
            assets_dir: args.assets.unwrap_or(defaults.assets_dir.clone()),
            timeout: args
                .timeout
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            use_color: !args.no_color,
            ..defaults
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::KnownModel;

    #[test]
    fn default_config() {
        let config = ChatConfig::new();
        assert_eq!(config.model, Model::Known(KnownModel::Gpt4oMini));
        assert!(config.base_url.is_none());
        assert!(config.persona_path.is_none());
        assert!(config.profile_path.is_none());
        assert_eq!(config.assets_dir, "images");
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert!(config.use_color);
        assert_eq!(config.credential_var, "OPENAI_API_KEY");
    }

    #[test]
    fn config_from_args_defaults() {
        let config = ChatConfig::from(ChatArgs::default());
        assert_eq!(config.model, Model::Known(KnownModel::Gpt4oMini));
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert!(config.use_color);
    }

    #[test]
    fn config_from_args_custom() {
        let args = ChatArgs {
            model: Some("gpt-4o".to_string()),
            base_url: Some("http://localhost:11434/v1/".to_string()),
            persona: Some("persona.md".to_string()),
            profile: Some("profile.yaml".to_string()),
            assets: Some("static/img".to_string()),
            timeout: Some(15),
            no_color: true,
        };
        let config = ChatConfig::from(args);
        assert_eq!(config.model, Model::Known(KnownModel::Gpt4o));
        assert_eq!(
            config.base_url.as_deref(),
            Some("http://localhost:11434/v1/")
        );
        assert_eq!(config.persona_path, Some(PathBuf::from("persona.md")));
        assert_eq!(config.profile_path, Some(PathBuf::from("profile.yaml")));
        assert_eq!(config.assets_dir, "static/img");
        assert_eq!(config.timeout, Duration::from_secs(15));
        assert!(!config.use_color);
    }

    #[test]
    fn zero_timeout_falls_back_to_default() {
        let args = ChatArgs {
            timeout: Some(0),
            ..ChatArgs::default()
        };
        assert_eq!(ChatConfig::from(args).timeout, Duration::from_secs(60));
    }

    #[test]
    fn custom_model_name_passes_through() {
        let args = ChatArgs {
            model: Some("llama3.1:8b".to_string()),
            ..ChatArgs::default()
        };
        assert_eq!(
            ChatConfig::from(args).model,
            Model::Custom("llama3.1:8b".to_string())
        );
    }

    #[test]
    fn config_builder_pattern() {
        let config = ChatConfig::new()
            .with_model(Model::Known(KnownModel::Gpt41Mini))
            .with_base_url("http://localhost:8080/v1")
            .with_persona_path("me.md")
            .with_profile_path("me.yaml")
            .with_assets_dir("pics")
            .with_timeout(Duration::from_secs(5))
            .without_color()
            .with_credential_var("PORTFOLIO_KEY");

        assert_eq!(config.model, Model::Known(KnownModel::Gpt41Mini));
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:8080/v1"));
        assert_eq!(config.persona_path, Some(PathBuf::from("me.md")));
        assert_eq!(config.profile_path, Some(PathBuf::from("me.yaml")));
        assert_eq!(config.assets_dir, "pics");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(!config.use_color);
        assert_eq!(config.credential_var, "PORTFOLIO_KEY");
    }
}
