//! Validation rules for account signup.

use validator::ValidateEmail;

use crate::error::CoreError;
use crate::text::validate_length;

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 8;

pub fn validate_username(username: &str) -> Result<(), CoreError> {
    validate_length("Username", username, 3, 30)?;
    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || c == '_' || c == '-' || c == '.')
    {
        return Err(CoreError::Validation(
            "Username may only contain letters, digits, underscore, hyphen, or dot".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if !email.validate_email() {
        return Err(CoreError::Validation(
            "Email must be a valid email address".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), CoreError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters long"
        )));
    }
    Ok(())
}
