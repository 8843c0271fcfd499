//! Service-level error types.
//!
//! These errors are transport agnostic. The HTTP adapter maps each code to a
//! fixed status and wraps the payload in the response envelope.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed (bad body, path, or query parameter).
    InvalidInput,
    /// Registration number or model year failed validation.
    Validation,
    /// The requested car does not exist.
    NotFound,
    /// A car with this registration number already exists.
    DuplicateRegNum,
    /// The external lookup API failed.
    ExternalLookup,
    /// The database failed.
    Storage,
    /// Unclassified fallback.
    InternalError,
}

/// Service error payload.
///
/// # Examples
/// ```
/// use backend::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("car 42 not found");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    #[schema(example = "invalid_input")]
    code: ErrorCode,
    #[schema(example = "Something went wrong")]
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl Error {
    /// Create a new error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Supplementary structured details, if any.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach structured details.
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidInput`].
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Convenience constructor for [`ErrorCode::Validation`].
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Validation, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::DuplicateRegNum`].
    pub fn duplicate_reg_num(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DuplicateRegNum, message)
    }

    /// Convenience constructor for [`ErrorCode::ExternalLookup`].
    pub fn external_lookup(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ExternalLookup, message)
    }

    /// Convenience constructor for [`ErrorCode::Storage`].
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Storage, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(Error::invalid_input("bad"), ErrorCode::InvalidInput)]
    #[case(Error::validation("bad"), ErrorCode::Validation)]
    #[case(Error::not_found("gone"), ErrorCode::NotFound)]
    #[case(Error::duplicate_reg_num("dup"), ErrorCode::DuplicateRegNum)]
    #[case(Error::external_lookup("api"), ErrorCode::ExternalLookup)]
    #[case(Error::storage("db"), ErrorCode::Storage)]
    #[case(Error::internal("boom"), ErrorCode::InternalError)]
    fn constructors_set_expected_codes(#[case] error: Error, #[case] code: ErrorCode) {
        assert_eq!(error.code(), code);
    }

    #[test]
    fn serializes_code_as_snake_case() {
        let value = serde_json::to_value(Error::duplicate_reg_num("dup")).expect("serialize");
        assert_eq!(
            value.get("code").and_then(Value::as_str),
            Some("duplicate_reg_num")
        );
        assert!(value.get("details").is_none());
    }

    #[test]
    fn details_survive_serialization() {
        let error = Error::validation("bad year").with_details(json!({ "field": "year" }));
        let value = serde_json::to_value(&error).expect("serialize");
        assert_eq!(
            value
                .get("details")
                .and_then(|d| d.get("field"))
                .and_then(Value::as_str),
            Some("year")
        );
    }
}
