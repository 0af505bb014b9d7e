//! Local input checks run before any request is built.
//!
//! These are pure functions. A failure here means no request reaches the
//! transport.

use crate::error::{Result, ValidationError};

/// Returns true if `value` is a usable identifier.
///
/// Identifiers must not be empty or blank. `.` and `..` are rejected as well:
/// percent-encoding leaves dots alone, so they would rewrite the request path.
#[must_use]
pub fn valid_string_id(value: &str) -> bool {
    !value.trim().is_empty() && value != "." && value != ".."
}

/// Returns true if the optional string is present and non-empty.
#[must_use]
pub fn valid_string(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

/// Rejects an identifier that is empty or blank.
///
/// # Errors
///
/// Returns `Invalid value for <field>` when the identifier is unusable.
pub fn ensure_id(value: &str, field: &'static str) -> Result<()> {
    if valid_string_id(value) {
        Ok(())
    } else {
        Err(ValidationError::InvalidValue { field }.into())
    }
}

/// Rejects an absent or empty string option.
///
/// # Errors
///
/// Returns `<field> is required` when the option is missing or empty.
pub fn require_string(value: Option<&str>, field: &'static str) -> Result<()> {
    if valid_string(value) {
        Ok(())
    } else {
        Err(ValidationError::Required { field }.into())
    }
}

/// Values that can be present but still carry nothing usable.
pub trait IsEmpty {
    /// Returns true if the value counts as not provided.
    fn is_empty(&self) -> bool;
}

impl IsEmpty for str {
    fn is_empty(&self) -> bool {
        str::is_empty(self)
    }
}

impl IsEmpty for String {
    fn is_empty(&self) -> bool {
        String::is_empty(self)
    }
}

/// Rejects an absent option, or one whose value is empty.
///
/// # Errors
///
/// Returns `<field> is required` when the option is `None` or empty.
pub fn require<T: IsEmpty + ?Sized>(value: Option<&T>, field: &'static str) -> Result<()> {
    if value.is_some_and(|v| !v.is_empty()) {
        Ok(())
    } else {
        Err(ValidationError::Required { field }.into())
    }
}
