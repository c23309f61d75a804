//! Error types shared across gembot crates

use thiserror::Error;

/// Result type for gembot type-level operations
pub type Result<T> = std::result::Result<T, GemBotError>;

/// Errors raised while parsing or constructing domain types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GemBotError {
    /// A choice code that is not one of the fixed menu commands
    #[error("Not a menu command: {code}")]
    NotAMenuCommand { code: String },
}
