//! Shared text-field checks used by the entity rule modules.

use crate::error::CoreError;

/// Require `value` to be between `min` and `max` characters (inclusive).
///
/// Length is measured in Unicode scalar values, not bytes, so accented names
/// are not penalised. `label` is used verbatim in the error message.
pub fn validate_length(label: &str, value: &str, min: usize, max: usize) -> Result<(), CoreError> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(CoreError::Validation(format!(
            "{label} must be between {min} and {max} characters"
        )));
    }
    Ok(())
}
