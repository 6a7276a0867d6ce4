//! Checkout configuration.

use membership_core::env::non_empty_var;
use serde::{Deserialize, Serialize};

/// Environment variable holding the lifetime membership Stripe price id.
pub const LIFETIME_PRICE_ID_VAR: &str = "STRIPE_LIFETIME_MEMBERSHIP_PRICE_ID";

/// Lifetime checkout configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutOptions {
    /// Stripe price id. Checkout is a no-op without one.
    #[serde(default)]
    pub price_id: Option<String>,
    /// Seats purchased per checkout.
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    /// Path Stripe returns to after payment.
    #[serde(default = "default_success_path")]
    pub success_path: String,
    /// Path Stripe returns to when the buyer backs out.
    #[serde(default = "default_cancel_path")]
    pub cancel_path: String,
    /// Where anonymous buyers enter their email.
    #[serde(default = "default_email_capture_path")]
    pub email_capture_path: String,
}

fn default_quantity() -> u32 { 1 }
fn default_success_path() -> String { "/confirm/forever".to_string() }
fn default_cancel_path() -> String { "/pricing/forever".to_string() }
fn default_email_capture_path() -> String { "/forever/email".to_string() }

impl Default for CheckoutOptions {
    fn default() -> Self {
        Self {
            price_id: None,
            quantity: default_quantity(),
            success_path: default_success_path(),
            cancel_path: default_cancel_path(),
            email_capture_path: default_email_capture_path(),
        }
    }
}

impl CheckoutOptions {
    /// Defaults with the price id taken from the environment.
    pub fn from_env() -> Self {
        let price_id = non_empty_var(LIFETIME_PRICE_ID_VAR);
        if price_id.is_none() {
            tracing::warn!("{} is not set; lifetime checkout is disabled", LIFETIME_PRICE_ID_VAR);
        }
        Self {
            price_id,
            ..Default::default()
        }
    }

    pub fn with_price_id(mut self, price_id: impl Into<String>) -> Self {
        self.price_id = Some(price_id.into());
        self
    }

    /// The configured price id, ignoring blank values.
    pub fn price_id(&self) -> Option<&str> {
        self.price_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_reads_price_id() {
        std::env::set_var(LIFETIME_PRICE_ID_VAR, "  price_env_123 ");
        let opts = CheckoutOptions::from_env();
        assert_eq!(opts.price_id(), Some("price_env_123"));
        assert_eq!(opts.success_path, "/confirm/forever");

        std::env::set_var(LIFETIME_PRICE_ID_VAR, "   ");
        assert_eq!(CheckoutOptions::from_env().price_id, None);

        std::env::remove_var(LIFETIME_PRICE_ID_VAR);
        assert_eq!(CheckoutOptions::from_env().price_id(), None);
    }
}
