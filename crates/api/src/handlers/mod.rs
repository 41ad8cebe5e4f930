pub mod publish;
pub mod resolve;

use crate::error::AppError;

/// Unwrap a required string parameter, rejecting absent or blank values.
pub(crate) fn required<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str, AppError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AppError::BadRequest(format!("{name} is required"))),
    }
}
