use thiserror::Error;

use gembot_types::UserId;

use crate::BalanceError;

/// Errors that can occur in ledger operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("User not found: {user}")]
    UserNotFound { user: UserId },

    #[error("User already registered: {user}")]
    AlreadyRegistered { user: UserId },

    #[error(transparent)]
    Balance(#[from] BalanceError),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
