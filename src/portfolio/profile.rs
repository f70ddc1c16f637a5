use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const BUILTIN_PROFILE: &str = include_str!("profile.yaml");

/// The static portfolio page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Owner's name.
    pub name: String,

    /// One-line role, shown under the name.
    #[serde(default)]
    pub headline: String,

    /// Avatar image key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,

    /// Short introduction.
    #[serde(default)]
    pub intro: String,

    /// Email, links and the like.
    #[serde(default)]
    pub contacts: Vec<String>,

    /// Content sections, in display order.
    #[serde(default)]
    pub sections: Vec<Section>,
}

/// A titled group of blocks, looked up by key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Lookup key, e.g. `projects`.
    pub key: String,

    /// Display title.
    pub title: String,

    /// Blocks in display order.
    #[serde(default)]
    pub blocks: Vec<Block>,
}

/// One piece of content, optionally with an image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,

    #[serde(default)]
    pub body: String,

    /// Image key; may name an asset that does not exist.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

impl Profile {
    /// The profile shipped with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_yaml(BUILTIN_PROFILE)
    }

    /// Parse a profile from YAML.
    ///
    /// # Errors
    ///
    /// Returns a serialization error for malformed YAML and a validation
    /// error when two sections share a key.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let profile: Self = serde_yaml::from_str(yaml)?;
        for (idx, section) in profile.sections.iter().enumerate() {
            if profile.sections[..idx].iter().any(|s| s.key == section.key) {
                return Err(Error::validation(
                    format!("duplicate section key {:?}", section.key),
                    Some("sections".to_string()),
                ));
            }
        }
        Ok(profile)
    }

    /// Load a profile from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|err| {
            Error::io(format!("failed to read profile {}", path.display()), err)
        })?;
        Self::from_yaml(&content)
    }

    /// The section with `key`, if any.
    pub fn section(&self, key: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.key == key)
    }

    /// Section keys in display order.
    pub fn section_keys(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.key.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_profile_parses() {
        let profile = Profile::builtin().unwrap();
        assert_eq!(profile.name, "Minseok Kim");
        assert_eq!(profile.avatar.as_deref(), Some("profile.jpg"));
        assert_eq!(
            profile.section_keys().collect::<Vec<_>>(),
            vec!["projects", "awards"]
        );

        let projects = profile.section("projects").unwrap();
        assert_eq!(projects.blocks.len(), 2);
        assert_eq!(projects.blocks[0].image.as_deref(), Some("drone.jpg"));
        assert!(projects.blocks[0].body.contains("ESP-01"));

        let awards = profile.section("awards").unwrap();
        let photo = awards.blocks.last().unwrap();
        assert!(photo.heading.is_none());
        assert!(photo.body.is_empty());
        assert_eq!(photo.image.as_deref(), Some("temi_team.jpg"));
    }

    #[test]
    fn minimal_yaml_uses_defaults() {
        let profile = Profile::from_yaml("name: Ada").unwrap();
        assert_eq!(profile.name, "Ada");
        assert!(profile.sections.is_empty());
        assert!(profile.avatar.is_none());
        assert!(profile.section("projects").is_none());
    }

    #[test]
    fn duplicate_section_keys_are_rejected() {
        let yaml = r#"
name: Ada
sections:
  - key: projects
    title: Projects
  - key: projects
    title: More projects
"#;
        let err = Profile::from_yaml(yaml).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn malformed_yaml_is_serialization_error() {
        let err = Profile::from_yaml("name: [unclosed").unwrap_err();
        assert!(matches!(err, Error::Serialization { .. }));
    }
}
