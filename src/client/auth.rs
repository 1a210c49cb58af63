//! Authentication and profile endpoints

use super::{ApiClient, ClientResult, Timeout};
use crate::models::{
    AuthResponse, ChangePasswordRequest, LoginRequest, ProfileUpdate, SignupRequest, User,
};

impl ApiClient {
    /// Log in and store the returned token
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<AuthResponse> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response: AuthResponse = self.post("/auth/login", Some(&body)).await?;
        self.tokens().save(&response.token).await?;

        tracing::info!(username = %response.user.username, "Logged in");
        Ok(response)
    }

    /// Create an account and store the returned token
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> ClientResult<AuthResponse> {
        let body = SignupRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };

        let response: AuthResponse = self.post("/auth/signup", Some(&body)).await?;
        self.tokens().save(&response.token).await?;

        tracing::info!(username = %response.user.username, "Registered new account");
        Ok(response)
    }

    /// Forget the stored token. Purely local; the server keeps no session.
    pub async fn logout(&self) -> ClientResult<()> {
        self.tokens().clear().await?;
        tracing::info!("Logged out, token removed");
        Ok(())
    }

    pub async fn current_user(&self) -> ClientResult<User> {
        self.get("/users/profile", Timeout::Standard).await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> ClientResult<User> {
        self.put("/users/profile", update).await
    }

    pub async fn change_password(&self, current: &str, new: &str) -> ClientResult<()> {
        let body = ChangePasswordRequest {
            current_password: current.to_string(),
            new_password: new.to_string(),
        };
        self.post_discard("/users/change-password", &body).await
    }
}
