//! Application error types

use thiserror::Error;
use vault_store::StoreError;

/// Main application error type
#[derive(Error, Debug)]
pub enum VaultError {
    // ===== Recoverable (notify user, continue) =====
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Recommendation service error: {0}")]
    Recommendation(String),

    // ===== Fatal (application termination) =====
    #[error("Configuration error: {0}")]
    Config(String),
}

impl VaultError {
    /// Is this error recoverable?
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, VaultError::Config(_))
    }

    /// Get a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            VaultError::Store(StoreError::ImportInvalid) => "Invalid backup file.".to_string(),
            VaultError::Recommendation(_) => "Connection refused. Verify API link.".to_string(),
            _ => self.to_string(),
        }
    }
}
