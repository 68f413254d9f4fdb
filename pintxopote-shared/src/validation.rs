//! Required-field validation
//!
//! Both the HTTP client and the API server check request fields with these
//! helpers so that a missing or blank value produces the same message on
//! either side of the wire.
//!
//! # Messages
//!
//! - missing value: `"<field> is not a string"`
//! - empty or whitespace-only value: `"<field> is empty or blank"`
//! - missing number: `"<field> is not a number"`
//! - zero quantity: `"<field> must be greater than zero"`
//! - quantity above `i32::MAX`: `"<field> is too large"`
//!
//! # Example
//!
//! ```
//! use pintxopote_shared::validation::{require_str, FieldError};
//!
//! assert_eq!(require_str("user name", Some("John")), Ok("John"));
//!
//! let err = require_str("user name", Some("   ")).unwrap_err();
//! assert_eq!(err.to_string(), "user name is empty or blank");
//!
//! let err = require_str("user name", None).unwrap_err();
//! assert_eq!(err, FieldError::Missing("user name".to_string()));
//! ```

/// A field failed validation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// The field was absent
    #[error("{0} is not a string")]
    Missing(String),

    /// The field was empty or only whitespace
    #[error("{0} is empty or blank")]
    Blank(String),

    /// A numeric field was absent
    #[error("{0} is not a number")]
    NotANumber(String),

    /// A count field was zero
    #[error("{0} must be greater than zero")]
    NotPositive(String),

    /// A count field does not fit the stored integer column
    #[error("{0} is too large")]
    TooLarge(String),
}

/// Requires a string field to be present and not blank
///
/// Returns the value untouched (no trimming) on success.
pub fn require_str<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str, FieldError> {
    match value {
        None => Err(FieldError::Missing(field.to_string())),
        Some(v) if v.trim().is_empty() => Err(FieldError::Blank(field.to_string())),
        Some(v) => Ok(v),
    }
}

/// Accepts an absent field, but rejects a present one that is blank
pub fn optional_str<'a>(
    field: &str,
    value: Option<&'a str>,
) -> Result<Option<&'a str>, FieldError> {
    match value {
        None => Ok(None),
        Some(v) => require_str(field, Some(v)).map(Some),
    }
}

/// Requires a count to be present, strictly positive and at most `i32::MAX`
pub fn require_positive(field: &str, value: Option<u32>) -> Result<i32, FieldError> {
    match value {
        None => Err(FieldError::NotANumber(field.to_string())),
        Some(0) => Err(FieldError::NotPositive(field.to_string())),
        Some(n) => i32::try_from(n).map_err(|_| FieldError::TooLarge(field.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_str_accepts_value() {
        assert_eq!(require_str("user email", Some("jd@mail.com")), Ok("jd@mail.com"));
    }

    #[test]
    fn test_require_str_keeps_surrounding_whitespace() {
        assert_eq!(require_str("user name", Some(" John ")), Ok(" John "));
    }

    #[test]
    fn test_require_str_missing() {
        let err = require_str("user surname", None).unwrap_err();
        assert_eq!(err.to_string(), "user surname is not a string");
    }

    #[test]
    fn test_require_str_empty_and_blank() {
        for value in ["", "     ", "\t\n"] {
            let err = require_str("user password", Some(value)).unwrap_err();
            assert_eq!(err.to_string(), "user password is empty or blank");
        }
    }

    #[test]
    fn test_optional_str() {
        assert_eq!(optional_str("user new email", None), Ok(None));
        assert_eq!(
            optional_str("user new email", Some("jw@mail.com")),
            Ok(Some("jw@mail.com"))
        );
        assert_eq!(
            optional_str("user new email", Some(" ")),
            Err(FieldError::Blank("user new email".to_string()))
        );
    }

    #[test]
    fn test_require_positive() {
        assert_eq!(require_positive("order quantity", Some(2)), Ok(2));
        assert_eq!(
            require_positive("order quantity", None).unwrap_err().to_string(),
            "order quantity is not a number"
        );
        assert_eq!(
            require_positive("order quantity", Some(0)).unwrap_err().to_string(),
            "order quantity must be greater than zero"
        );
        assert_eq!(
            require_positive("order quantity", Some(i32::MAX as u32)),
            Ok(i32::MAX)
        );
        assert_eq!(
            require_positive("order quantity", Some(i32::MAX as u32 + 1)),
            Err(FieldError::TooLarge("order quantity".to_string()))
        );
    }
}
