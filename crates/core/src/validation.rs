//! Shared input validation helpers.

use validator::ValidateEmail;

use crate::error::CoreError;

/// Validate that a string is a plausible email address.
///
/// Returns a `CoreError::Validation` naming the field and the offending
/// value if the shape check fails.
pub fn validate_email_address(address: &str, field: &str) -> Result<(), CoreError> {
    if !address.validate_email() {
        return Err(CoreError::Validation(format!(
            "Invalid {field} email address: {address}"
        )));
    }
    Ok(())
}
