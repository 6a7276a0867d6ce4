//! Account data-source boundary.
//!
//! Upstream account queries report a status string alongside an untyped JSON
//! payload. This module turns that pair into an [`AccountsState`] so the
//! resolver only ever sees typed records.

use membership_core::{MembershipError, Result};
use serde::{Deserialize, Serialize};

use crate::types::Account;

/// Load state of the viewer's accounts, as reported by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum AccountsState {
    Loading,
    Loaded(Vec<Account>),
    Errored(String),
}

impl AccountsState {
    /// Build a state from a query status (`loading`, `success`, `error`) and
    /// its payload.
    ///
    /// A successful query with no payload counts as an empty account list.
    pub fn from_query(status: &str, data: Option<serde_json::Value>) -> Result<Self> {
        match status {
            "loading" | "pending" => Ok(Self::Loading),
            "success" => match data {
                Some(value) => Ok(Self::Loaded(parse_accounts(value)?)),
                None => Ok(Self::Loaded(Vec::new())),
            },
            "error" => Ok(Self::Errored(
                data.map(|v| v.to_string()).unwrap_or_default(),
            )),
            other => Err(MembershipError::MalformedInput(format!(
                "unknown account query status `{other}`"
            ))),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Accounts known so far. Loading and errored states have none.
    pub fn accounts(&self) -> &[Account] {
        match self {
            Self::Loaded(accounts) => accounts,
            Self::Loading | Self::Errored(_) => &[],
        }
    }
}

impl From<Vec<Account>> for AccountsState {
    fn from(accounts: Vec<Account>) -> Self {
        Self::Loaded(accounts)
    }
}

/// Parse an account list payload. `null` is an empty list.
pub fn parse_accounts(value: serde_json::Value) -> Result<Vec<Account>> {
    if value.is_null() {
        return Ok(Vec::new());
    }
    if !value.is_array() {
        return Err(MembershipError::MalformedInput(
            "accounts payload must be an array".into(),
        ));
    }
    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_query_loading() {
        let state = AccountsState::from_query("loading", None).unwrap();
        assert!(state.is_loading());
        assert!(state.accounts().is_empty());
    }

    #[test]
    fn test_from_query_success() {
        let state = AccountsState::from_query(
            "success",
            Some(json!([{ "owner": { "id": 1 }, "capacity": 2 }])),
        )
        .unwrap();
        assert!(!state.is_loading());
        assert_eq!(state.accounts().len(), 1);
        assert_eq!(state.accounts()[0].capacity, 2);
    }

    #[test]
    fn test_from_query_error_has_no_accounts() {
        let state = AccountsState::from_query("error", Some(json!("boom"))).unwrap();
        assert!(matches!(state, AccountsState::Errored(_)));
        assert!(state.accounts().is_empty());
    }

    #[test]
    fn test_from_query_unknown_status() {
        assert!(AccountsState::from_query("idle", None).is_err());
    }

    #[test]
    fn test_parse_accounts_rejects_object() {
        let err = parse_accounts(json!({ "owner": null })).unwrap_err();
        assert_eq!(err.code(), membership_core::ErrorCode::MalformedInput);
        assert!(parse_accounts(json!(null)).unwrap().is_empty());
    }
}
