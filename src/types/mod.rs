// Public modules
pub mod chat_completion;
pub mod model;
pub mod transcript;
pub mod turn;
pub mod usage;

// Re-exports
pub use chat_completion::{ChatCompletion, ChatCompletionRequest, Choice, ChoiceMessage};
pub use model::{KnownModel, Model};
pub use transcript::Transcript;
pub use turn::{Role, Turn};
pub use usage::Usage;
