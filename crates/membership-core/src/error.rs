// Error codes shared by the membership crates.
//
// Nothing in entitlement resolution is fatal; these errors only surface at the
// data-source boundary (parsing upstream payloads) and when building redirect
// URLs from configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable, serializable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    MissingConfiguration,
    InvalidEmail,
    MalformedInput,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingConfiguration => "MISSING_CONFIGURATION",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::MalformedInput => "MALFORMED_INPUT",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::MissingConfiguration => "Required configuration is missing",
            Self::InvalidEmail => "Invalid email",
            Self::MalformedInput => "Input is malformed",
        };
        write!(f, "{msg}")
    }
}

/// Error type for boundary parsing and configuration.
#[derive(Debug, thiserror::Error)]
pub enum MembershipError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Url(#[from] url::ParseError),
}

impl MembershipError {
    /// The stable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Config(_) => ErrorCode::MissingConfiguration,
            Self::MalformedInput(_) | Self::Json(_) | Self::Url(_) => ErrorCode::MalformedInput,
        }
    }

    /// Build a JSON body describing the error.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "code": self.code(),
            "message": self.to_string(),
        })
    }
}

/// Unified result type for membership operations.
pub type Result<T> = std::result::Result<T, MembershipError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_serializes_screaming_snake() {
        let json = serde_json::to_string(&ErrorCode::MissingConfiguration).unwrap();
        assert_eq!(json, "\"MISSING_CONFIGURATION\"");
        assert_eq!(ErrorCode::MalformedInput.as_str(), "MALFORMED_INPUT");
    }

    #[test]
    fn test_error_maps_to_code() {
        assert_eq!(
            MembershipError::Config("price id".into()).code(),
            ErrorCode::MissingConfiguration
        );
        let parse_err = url::Url::parse("not a url").unwrap_err();
        assert_eq!(MembershipError::from(parse_err).code(), ErrorCode::MalformedInput);
    }

    #[test]
    fn test_error_to_json() {
        let err = MembershipError::MalformedInput("members[0].id".into());
        let v = err.to_json();
        assert_eq!(v["code"], "MALFORMED_INPUT");
        assert_eq!(v["message"], "Malformed input: members[0].id");
    }
}
