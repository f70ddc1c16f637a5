// Public modules
pub mod chat;
pub mod client;
pub mod client_logger;
pub mod completion;
pub mod credential;
pub mod error;
pub mod observability;
pub mod persona;
pub mod portfolio;
pub mod types;

// Re-exports
pub use client::OpenAi;
pub use client_logger::ClientLogger;
pub use completion::{CompletionAdapter, Provider, Reply};
pub use credential::Credential;
pub use error::{Error, Result};
pub use observability::register_biometrics;
pub use persona::Persona;
pub use types::*;
