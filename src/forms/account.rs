//! Account forms

use regex::Regex;

use super::ValidationError;
use crate::models::{ChangePasswordRequest, ProfileUpdate};

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegistrationForm {
    /// Checked in order: matching passwords, required fields, email shape
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordsDontMatch);
        }
        if self.username.trim().is_empty() || self.email.trim().is_empty() || self.password.is_empty() {
            return Err(ValidationError::MissingFields);
        }

        let email = Regex::new(EMAIL_PATTERN).map_err(|_| ValidationError::InvalidEmail)?;
        if !email.is_match(self.email.trim()) {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    pub username: String,
    pub weight: Option<f64>,
    pub height: Option<f64>,
}

/// Zero means "not set"
fn optional_measure(value: Option<f64>, field: &'static str) -> Result<Option<f64>, ValidationError> {
    match value {
        None => Ok(None),
        Some(v) if v == 0.0 => Ok(None),
        Some(v) if v.is_finite() && v > 0.0 => Ok(Some(v)),
        Some(_) => Err(ValidationError::NotPositive(field)),
    }
}

impl ProfileForm {
    pub fn validate(&self) -> Result<ProfileUpdate, ValidationError> {
        let username = self.username.trim();
        if username.is_empty() {
            return Err(ValidationError::Required("Username"));
        }

        Ok(ProfileUpdate {
            username: username.to_string(),
            weight: optional_measure(self.weight, "Weight")?,
            height: optional_measure(self.height, "Height")?,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct ChangePasswordForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl ChangePasswordForm {
    pub fn validate(&self) -> Result<ChangePasswordRequest, ValidationError> {
        if self.current_password.is_empty() || self.new_password.is_empty() || self.confirm_password.is_empty() {
            return Err(ValidationError::MissingFields);
        }
        if self.new_password != self.confirm_password {
            return Err(ValidationError::PasswordsDoNotMatch);
        }

        Ok(ChangePasswordRequest {
            current_password: self.current_password.clone(),
            new_password: self.new_password.clone(),
        })
    }
}
