//! Validation rules for crew members.

use crate::error::CoreError;
use crate::text::validate_length;
use crate::types::DbId;

pub fn validate_name(name: &str) -> Result<(), CoreError> {
    validate_length("Name", name, 2, 50)
}

pub fn validate_role(role: &str) -> Result<(), CoreError> {
    validate_length("Role", role, 2, 50)
}

/// Only the shape of the reference is checked here; whether the production
/// exists is enforced by the store's foreign key.
pub fn validate_production_id(production_id: DbId) -> Result<(), CoreError> {
    if production_id <= 0 {
        return Err(CoreError::Validation(
            "Production id must be a positive integer".to_string(),
        ));
    }
    Ok(())
}
