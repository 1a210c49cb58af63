//! Login lifecycle on top of the API client

use crate::client::{ApiClient, ClientResult, ErrorCategory};
use crate::models::{ProfileUpdate, User};

/// The logged-in user, if any, and the client acting on their behalf
pub struct Session {
    client: ApiClient,
    user: Option<User>,
}

impl Session {
    pub fn new(client: ApiClient) -> Self {
        Self { client, user: None }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Load the user behind a stored token.
    ///
    /// Returns `Ok(None)` when no token is stored. A token the server
    /// rejects is cleared; a network failure keeps it for the next attempt.
    pub async fn restore(&mut self) -> ClientResult<Option<&User>> {
        if !self.client.has_token().await {
            tracing::debug!("No stored token, starting logged out");
            self.user = None;
            return Ok(None);
        }

        match self.client.current_user().await {
            Ok(user) => {
                tracing::debug!(username = %user.username, "Restored session");
                self.user = Some(user);
                Ok(self.user.as_ref())
            }
            Err(e) => {
                self.user = None;
                if e.category() == ErrorCategory::Auth {
                    tracing::info!(error = %e, "Stored token rejected, clearing it");
                    self.client.tokens().clear().await?;
                }
                Err(e)
            }
        }
    }

    pub async fn login(&mut self, email: &str, password: &str) -> ClientResult<&User> {
        let response = self.client.login(email, password).await?;
        Ok(&*self.user.insert(response.user))
    }

    pub async fn register(
        &mut self,
        username: &str,
        email: &str,
        password: &str,
    ) -> ClientResult<&User> {
        let response = self.client.register(username, email, password).await?;
        Ok(&*self.user.insert(response.user))
    }

    pub async fn logout(&mut self) -> ClientResult<()> {
        self.client.logout().await?;
        self.user = None;
        Ok(())
    }

    pub async fn update_profile(&mut self, update: &ProfileUpdate) -> ClientResult<&User> {
        let user = self.client.update_profile(update).await?;
        Ok(&*self.user.insert(user))
    }
}
