pub mod athlete;
pub mod country;
pub mod dataset;
pub mod gender;
pub mod geo;

use super::ApiError;

/// Required query parameter, trimmed.
fn required(value: Option<String>, name: &str) -> Result<String, ApiError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::BadRequest(format!("Missing query parameter '{name}'")))
}
