//! Pre-request validation.
//!
//! These checks run before a request is issued; a failure here means no
//! network traffic happens at all.

use thiserror::Error;

use crate::overlay::{is_valid_day, is_valid_time};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Please select a star rating (1-5)")]
    MissingStars,

    #[error("Star rating must be between 1 and 5, got {0}")]
    StarsOutOfRange(u8),

    #[error("Invalid day '{0}', expected YYYY-MM-DD")]
    InvalidDay(String),

    #[error("Invalid time '{0}', expected HH:MM")]
    InvalidTime(String),
}

/// Checks the registration form fields, including the password
/// confirmation.
pub fn validate_registration(
    email: &str,
    user_name: &str,
    password: &str,
    password_confirm: &str,
) -> Result<(), ValidationError> {
    if email.trim().is_empty() {
        return Err(ValidationError::MissingField("email"));
    }
    if user_name.trim().is_empty() {
        return Err(ValidationError::MissingField("username"));
    }
    if password.is_empty() {
        return Err(ValidationError::MissingField("password"));
    }
    if password != password_confirm {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

/// Checks a star rating: it must be selected and within 1..=5.
pub fn validate_stars(stars: Option<u8>) -> Result<u8, ValidationError> {
    match stars {
        None => Err(ValidationError::MissingStars),
        Some(stars) if (1..=5).contains(&stars) => Ok(stars),
        Some(stars) => Err(ValidationError::StarsOutOfRange(stars)),
    }
}

/// Checks a calendar slot's components. Both must be well-formed before
/// they are joined into an overlay key or sent to the backend.
pub fn validate_slot(day: &str, time: &str) -> Result<(), ValidationError> {
    if !is_valid_day(day) {
        return Err(ValidationError::InvalidDay(day.to_string()));
    }
    if !is_valid_time(time) {
        return Err(ValidationError::InvalidTime(time.to_string()));
    }
    Ok(())
}
