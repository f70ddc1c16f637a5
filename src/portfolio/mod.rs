//! Static portfolio content shown around the chat.
//!
//! - [`profile`]: the page itself, sections keyed by name, loaded from YAML
//! - [`assets`]: optional images and the placeholder used when one is missing

mod assets;
mod profile;

pub use assets::{
    Asset, AssetResolver, DirectoryAssets, MemoryAssets, Resolved, resolve_or_placeholder,
};
pub use profile::{Block, Profile, Section};
