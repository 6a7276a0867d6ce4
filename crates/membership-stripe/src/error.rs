//! Checkout error codes.

use membership_core::{ErrorCode, MembershipError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutError {
    MissingPriceId,
    InvalidEmail,
    MalformedRedirect,
}

impl CheckoutError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingPriceId => "MISSING_PRICE_ID",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::MalformedRedirect => "MALFORMED_REDIRECT",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::MissingPriceId => "No Stripe price id is configured for checkout",
            Self::InvalidEmail => "Viewer email is missing or invalid",
            Self::MalformedRedirect => "Redirect target could not be built",
        }
    }

    /// The shared error code this maps to.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::MissingPriceId => ErrorCode::MissingConfiguration,
            Self::InvalidEmail => ErrorCode::InvalidEmail,
            Self::MalformedRedirect => ErrorCode::MalformedInput,
        }
    }
}

impl std::fmt::Display for CheckoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl std::error::Error for CheckoutError {}

impl From<CheckoutError> for MembershipError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::MissingPriceId => MembershipError::Config(err.to_string()),
            CheckoutError::InvalidEmail | CheckoutError::MalformedRedirect => {
                MembershipError::MalformedInput(err.to_string())
            }
        }
    }
}
