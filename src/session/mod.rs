//! Session Management
//!
//! Holds the single bearer token shared by every API call and wraps the
//! auth endpoints into a login/logout lifecycle.
//!
//! ## Architecture
//!
//! - **TokenStore**: where the token lives (a JSON file for the CLI, memory for tests)
//! - **Session**: current user plus login, register, logout, and profile updates
//!
//! The token is read at request time by the client. Login and logout simply
//! overwrite or delete it.

mod manager;
mod store;

pub use manager::Session;
pub use store::{FileTokenStore, MemoryTokenStore};

use async_trait::async_trait;
use thiserror::Error;

/// Persistent storage for the bearer token
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Current token, if any
    async fn load(&self) -> Result<Option<String>, SessionError>;

    /// Replace the stored token
    async fn save(&self, token: &str) -> Result<(), SessionError>;

    /// Forget the stored token. Clearing an empty store is not an error.
    async fn clear(&self) -> Result<(), SessionError>;
}

/// Errors that can occur while reading or writing the token
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt session file: {0}")]
    Corrupt(String),
}

impl From<serde_json::Error> for SessionError {
    fn from(err: serde_json::Error) -> Self {
        SessionError::Corrupt(err.to_string())
    }
}
