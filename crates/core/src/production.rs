//! Validation rules for theater productions.

use crate::error::CoreError;
use crate::text::validate_length;

/// Genres a production may be filed under.
pub const GENRES: &[&str] = &["Drama", "Musical", "Opera", "Comedy"];

pub const MIN_BUDGET: f64 = 0.99;
pub const MAX_BUDGET: f64 = 10_000_000.0;

/// Accepted image file extensions (compared case-insensitively).
pub const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png"];

pub fn validate_title(title: &str) -> Result<(), CoreError> {
    validate_length("Title", title, 2, 50)
}

pub fn validate_genre(genre: &str) -> Result<(), CoreError> {
    if !GENRES.contains(&genre) {
        return Err(CoreError::Validation(format!(
            "Genre must be one of: {}",
            GENRES.join(", ")
        )));
    }
    Ok(())
}

pub fn validate_budget(budget: f64) -> Result<(), CoreError> {
    if !budget.is_finite() || !(MIN_BUDGET..=MAX_BUDGET).contains(&budget) {
        return Err(CoreError::Validation(format!(
            "Budget must be between {MIN_BUDGET} and {MAX_BUDGET}"
        )));
    }
    Ok(())
}

/// The image must be a URL or path ending in a supported raster extension.
pub fn validate_image(image: &str) -> Result<(), CoreError> {
    let lower = image.to_ascii_lowercase();
    if !IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
        return Err(CoreError::Validation(
            "Image must be a .jpg, .jpeg or .png file".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_director(director: &str) -> Result<(), CoreError> {
    validate_length("Director", director, 2, 50)
}

pub fn validate_description(description: &str) -> Result<(), CoreError> {
    validate_length("Description", description, 10, 500)
}
