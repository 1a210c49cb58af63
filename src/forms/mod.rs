//! Form Validation
//!
//! Input checks run before anything is sent to the server. Each form turns
//! raw user input into the request body the client expects, or a
//! [`ValidationError`] carrying the message shown to the user.
//!
//! ## Architecture
//!
//! - **workout**: new workout form and date normalization
//! - **account**: registration, profile and password change
//! - **template**: workout template builder

mod account;
mod template;
mod workout;

pub use account::{ChangePasswordForm, ProfileForm, RegistrationForm};
pub use template::TemplateForm;
pub use workout::{normalize_date, parse_date, NewWorkoutForm};

use thiserror::Error;

/// A rejected form
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("All fields are required")]
    MissingFields,

    #[error("Please enter a valid email address")]
    InvalidEmail,

    /// Registration wording
    #[error("Passwords don't match")]
    PasswordsDontMatch,

    /// Password change wording
    #[error("Passwords do not match")]
    PasswordsDoNotMatch,

    #[error("Please use YYYY-MM-DD format")]
    InvalidDate,

    #[error("Select at least one muscle group")]
    NoMuscleGroups,

    #[error("Please add at least one exercise to your template")]
    NoExercises,

    #[error("{0} must be a positive number")]
    NotPositive(&'static str),

    #[error("No exercise at position {0}")]
    NoSuchExercise(usize),
}
