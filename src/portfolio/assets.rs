//! Optional images referenced by the portfolio.
//!
//! An image that is missing must never break the page.  [`resolve_or_placeholder`]
//! turns an absent asset into placeholder text, and the [`AssetResolver`]
//! trait keeps that decision independent of where assets actually live.

use std::collections::HashMap;

use utf8path::Path;

use crate::observability::ASSET_PLACEHOLDERS;

/// A located asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    /// The key the asset was requested by, e.g. `drone.jpg`.
    pub key: String,

    /// Where the asset can be loaded from.
    pub location: String,
}

/// Looks up assets by key.
pub trait AssetResolver {
    /// The asset for `key`, or `None` when there is none.
    fn resolve(&self, key: &str) -> Option<Asset>;
}

/// Outcome of resolving an optional asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// The asset exists.
    Asset(Asset),

    /// The asset is absent; show this text instead.
    Placeholder(String),
}

/// Resolve `key`, substituting a placeholder when the asset is absent.
pub fn resolve_or_placeholder(resolver: &dyn AssetResolver, key: &str) -> Resolved {
    match resolver.resolve(key) {
        Some(asset) => Resolved::Asset(asset),
        None => {
            ASSET_PLACEHOLDERS.click();
            Resolved::Placeholder(format!("[image coming soon: {key}]"))
        }
    }
}

/// Assets stored as files beneath a root directory.
#[derive(Debug, Clone)]
pub struct DirectoryAssets {
    root: Path<'static>,
}

impl DirectoryAssets {
    /// Serve assets from `root`.
    pub fn new(root: &str) -> Self {
        Self {
            root: Path::from(root).into_owned(),
        }
    }

    /// The directory assets are resolved against.
    pub fn root(&self) -> &str {
        self.root.as_str()
    }
}

impl AssetResolver for DirectoryAssets {
    fn resolve(&self, key: &str) -> Option<Asset> {
        let relative = Path::from(key);
        if relative.components().any(|c| {
            matches!(
                c,
                utf8path::Component::ParentDir | utf8path::Component::AppDefined
            )
        }) {
            return None;
        }
        let path = self.root.join(key.trim_start_matches('/')).into_owned();
        if !path.exists() {
            return None;
        }
        Some(Asset {
            key: key.to_string(),
            location: path.as_str().to_string(),
        })
    }
}

/// A fixed table of assets, e.g. URLs on a CDN.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssets {
    locations: HashMap<String, String>,
}

impl MemoryAssets {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an asset.
    pub fn with(mut self, key: impl Into<String>, location: impl Into<String>) -> Self {
        self.locations.insert(key.into(), location.into());
        self
    }
}

impl AssetResolver for MemoryAssets {
    fn resolve(&self, key: &str) -> Option<Asset> {
        self.locations.get(key).map(|location| Asset {
            key: key.to_string(),
            location: location.clone(),
        })
    }
}
