//! Lifetime checkout routing.
//!
//! A checkout click either goes straight to Stripe (viewer has a usable
//! email) or to the email capture page first. Existing entitlements never
//! block the purchase: a lower-tier member buying lifetime is an upgrade.

use membership_core::{is_valid_email, Result};
use serde::{Deserialize, Serialize};

use crate::config::CheckoutOptions;
use crate::error::CheckoutError;
use crate::types::Viewer;

/// Parameters handed to the payment processor redirect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRedirect {
    pub price_id: String,
    pub email: String,
    pub auth_token: Option<String>,
    pub quantity: u32,
    pub success_path: String,
    pub cancel_path: String,
}

impl PaymentRedirect {
    /// Flat key-value pairs in wire order. A missing auth token is an empty value.
    pub fn query_pairs(&self) -> [(&'static str, String); 6] {
        [
            ("priceId", self.price_id.clone()),
            ("email", self.email.clone()),
            ("authToken", self.auth_token.clone().unwrap_or_default()),
            ("quantity", self.quantity.to_string()),
            ("successPath", self.success_path.clone()),
            ("cancelPath", self.cancel_path.clone()),
        ]
    }

    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query_pairs())
            .finish()
    }

    /// Attach the query to an absolute base URL.
    pub fn to_url(&self, base: &str) -> Result<url::Url> {
        let mut url = url::Url::parse(base).map_err(|e| {
            tracing::warn!(base, error = %e, "payment redirect base is not an absolute URL");
            CheckoutError::MalformedRedirect
        })?;
        url.query_pairs_mut().extend_pairs(self.query_pairs());
        Ok(url)
    }
}

/// Parameters for the email capture page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailCaptureRedirect {
    pub price_id: String,
    pub quantity: u32,
}

impl EmailCaptureRedirect {
    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .append_pair("priceId", &self.price_id)
            .append_pair("quantity", &self.quantity.to_string())
            .finish()
    }

    /// Relative path to the capture page, e.g. `/forever/email?priceId=..&quantity=1`.
    pub fn to_path(&self, capture_path: &str) -> String {
        format!("{}?{}", capture_path, self.to_query_string())
    }
}

/// Outcome of a checkout click.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum CheckoutAction {
    RedirectToPayment(PaymentRedirect),
    RedirectToEmailCapture(EmailCaptureRedirect),
    NoPriceConfigured,
}

impl CheckoutAction {
    /// Whether the caller should show a pending loader.
    pub fn shows_loader(&self) -> bool {
        matches!(self, Self::RedirectToEmailCapture(_))
    }

    /// Why checkout did not go straight to payment, if it didn't.
    pub fn reason(&self) -> Option<CheckoutError> {
        match self {
            Self::RedirectToPayment(_) => None,
            Self::RedirectToEmailCapture(_) => Some(CheckoutError::InvalidEmail),
            Self::NoPriceConfigured => Some(CheckoutError::MissingPriceId),
        }
    }

    /// Hand the action to the navigation collaborator.
    pub fn dispatch<R: CheckoutRedirector + ?Sized>(
        &self,
        redirector: &R,
        options: &CheckoutOptions,
    ) -> Result<()> {
        match self {
            Self::RedirectToPayment(details) => redirector.redirect_to_payment(details),
            Self::RedirectToEmailCapture(params) => {
                redirector.navigate(&params.to_path(&options.email_capture_path))
            }
            Self::NoPriceConfigured => Ok(()),
        }
    }
}

/// Navigation seam: performs the actual redirects.
pub trait CheckoutRedirector {
    /// Send the viewer to the payment processor.
    fn redirect_to_payment(&self, details: &PaymentRedirect) -> Result<()>;

    /// Navigate to an in-site path.
    fn navigate(&self, path: &str) -> Result<()>;
}

/// Decide where a lifetime checkout click goes.
pub fn initiate_checkout(
    viewer: &Viewer,
    auth_token: Option<&str>,
    options: &CheckoutOptions,
) -> CheckoutAction {
    let Some(price_id) = options.price_id() else {
        tracing::debug!("lifetime checkout: no price configured");
        return CheckoutAction::NoPriceConfigured;
    };

    match viewer.email.as_deref().filter(|e| is_valid_email(e)) {
        Some(email) => {
            tracing::debug!(price_id, "lifetime checkout: redirect to stripe");
            CheckoutAction::RedirectToPayment(PaymentRedirect {
                price_id: price_id.to_string(),
                email: email.to_string(),
                auth_token: auth_token.map(str::to_string),
                quantity: options.quantity,
                success_path: options.success_path.clone(),
                cancel_path: options.cancel_path.clone(),
            })
        }
        None => {
            tracing::debug!(price_id, "lifetime checkout: get email");
            CheckoutAction::RedirectToEmailCapture(EmailCaptureRedirect {
                price_id: price_id.to_string(),
                quantity: options.quantity,
            })
        }
    }
}
