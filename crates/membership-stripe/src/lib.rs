//! # membership-stripe
//!
//! Membership entitlements and lifetime checkout routing over Stripe-backed
//! billing accounts.
//!
//! - [`entitlement::resolve`]: derive a viewer's membership flags from their accounts
//! - [`checkout::initiate_checkout`]: route a lifetime checkout click
//! - [`accounts::AccountsState`]: typed boundary for upstream account queries

pub mod accounts;
pub mod checkout;
pub mod config;
pub mod entitlement;
pub mod error;
pub mod pricing;
pub mod types;

pub use accounts::*;
pub use checkout::*;
pub use config::*;
pub use entitlement::*;
pub use error::*;
pub use pricing::*;
pub use types::*;
