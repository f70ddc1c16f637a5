use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A chat-completion model identifier.
///
/// This can be a well-known model or a custom string for anything the
/// provider serves that is not listed here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Model {
    /// Known model versions
    Known(KnownModel),

    /// Custom model identifier
    Custom(String),
}

/// Well-known chat-completion models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KnownModel {
    /// GPT-4o mini, the default persona model.
    #[serde(rename = "gpt-4o-mini")]
    Gpt4oMini,

    /// GPT-4o
    #[serde(rename = "gpt-4o")]
    Gpt4o,

    /// GPT-4.1 mini
    #[serde(rename = "gpt-4.1-mini")]
    Gpt41Mini,

    /// GPT-4.1
    #[serde(rename = "gpt-4.1")]
    Gpt41,

    /// GPT-3.5 Turbo
    #[serde(rename = "gpt-3.5-turbo")]
    Gpt35Turbo,
}

impl KnownModel {
    const ALL: [KnownModel; 5] = [
        KnownModel::Gpt4oMini,
        KnownModel::Gpt4o,
        KnownModel::Gpt41Mini,
        KnownModel::Gpt41,
        KnownModel::Gpt35Turbo,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            KnownModel::Gpt4oMini => "gpt-4o-mini",
            KnownModel::Gpt4o => "gpt-4o",
            KnownModel::Gpt41Mini => "gpt-4.1-mini",
            KnownModel::Gpt41 => "gpt-4.1",
            KnownModel::Gpt35Turbo => "gpt-3.5-turbo",
        }
    }
}

impl Default for Model {
    fn default() -> Self {
        Model::Known(KnownModel::Gpt4oMini)
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Model::Known(known_model) => write!(f, "{}", known_model),
            Model::Custom(custom) => write!(f, "{}", custom),
        }
    }
}

impl fmt::Display for KnownModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(KnownModel::ALL
            .iter()
            .find(|known| known.as_str() == s)
            .map(|known| Model::Known(*known))
            .unwrap_or_else(|| Model::Custom(s.to_string())))
    }
}

impl From<KnownModel> for Model {
    fn from(model: KnownModel) -> Self {
        Model::Known(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_gpt_4o_mini() {
        assert_eq!(Model::default(), Model::Known(KnownModel::Gpt4oMini));
        assert_eq!(Model::default().to_string(), "gpt-4o-mini");
    }

    #[test]
    fn known_model_serialization() {
        let json = serde_json::to_string(&Model::Known(KnownModel::Gpt41Mini)).unwrap();
        assert_eq!(json, r#""gpt-4.1-mini""#);
    }

    #[test]
    fn model_deserialization() {
        let model: Model = serde_json::from_str(r#""gpt-4o-mini""#).unwrap();
        assert_eq!(model, Model::Known(KnownModel::Gpt4oMini));

        let model: Model = serde_json::from_str(r#""local-llama""#).unwrap();
        assert_eq!(model, Model::Custom("local-llama".to_string()));
    }

    #[test]
    fn parse_known_and_custom() {
        assert_eq!(
            "gpt-4o".parse::<Model>().unwrap(),
            Model::Known(KnownModel::Gpt4o)
        );
        assert_eq!(
            " my-finetune ".parse::<Model>().unwrap(),
            Model::Custom("my-finetune".to_string())
        );
    }
}
