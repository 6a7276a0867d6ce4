#![doc = include_str!("../README.md")]

pub mod env;
pub mod error;
pub mod utils;

// Re-exports for convenience
pub use error::{ErrorCode, MembershipError, Result};
pub use utils::is_valid_email;
