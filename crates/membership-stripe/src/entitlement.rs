//! Entitlement resolution: membership flags derived from a viewer's accounts.
//!
//! [`resolve`] is a pure projection over its inputs: it never mutates them,
//! keeps no state between calls and does not log. Every flag fails closed, so
//! missing ids, owners or subscriptions read as "not entitled".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::accounts::AccountsState;
use crate::types::{
    Account, AccountOwner, SubscriptionType, Viewer, LIFETIME_SUBSCRIBER_ROLE,
};

/// Derived access flags for one viewer at one instant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntitlementSnapshot {
    pub is_instructor: bool,
    pub instructor_id: Option<String>,
    pub is_lifetime_member: bool,
    pub is_active_account_member: bool,
    pub is_account_owner: bool,
    pub is_team_account_owner: bool,
    /// First account owned by the viewer with an active subscription.
    pub selected_account: Option<Account>,
    pub gift_expiration: Option<DateTime<Utc>>,
    pub is_gift_expired: bool,
    pub is_gift_membership: bool,
    pub is_team_member: bool,
    pub has_stripe_account: bool,
    pub is_disabled: bool,
    /// Owner of the first account that has one, regardless of the viewer.
    pub account_owner: Option<AccountOwner>,
    pub account_loading: bool,
}

impl EntitlementSnapshot {
    /// Emit the snapshot as a debug event.
    pub fn trace(&self) {
        tracing::debug!(
            target: "membership::entitlement",
            is_lifetime_member = self.is_lifetime_member,
            is_active_account_member = self.is_active_account_member,
            is_account_owner = self.is_account_owner,
            is_team_account_owner = self.is_team_account_owner,
            is_team_member = self.is_team_member,
            is_gift_membership = self.is_gift_membership,
            is_disabled = self.is_disabled,
            account_loading = self.account_loading,
            snapshot = %serde_json::to_string(self).unwrap_or_default(),
            "entitlements resolved"
        );
    }
}

/// Resolve entitlements against the current time.
pub fn resolve(viewer: &Viewer, accounts: &AccountsState) -> EntitlementSnapshot {
    resolve_at(viewer, accounts, Utc::now())
}

/// Resolve entitlements as of `now`.
pub fn resolve_at(
    viewer: &Viewer,
    state: &AccountsState,
    now: DateTime<Utc>,
) -> EntitlementSnapshot {
    let accounts = state.accounts();

    let is_active_account_member = viewer.id.is_some_and(|id| {
        accounts
            .iter()
            .any(|a| a.has_member(id) && a.has_active_subscription())
    });
    let is_account_owner =
        viewer.id.is_some_and(|id| accounts.iter().any(|a| a.is_owned_by(id)));
    let is_team_account_owner = viewer.id.is_some_and(|id| {
        accounts
            .iter()
            .any(|a| a.is_owned_by(id) && a.capacity > 1)
    });

    let selected_account = match viewer.id {
        Some(id) if is_account_owner => accounts
            .iter()
            .find(|a| a.is_owned_by(id) && a.has_active_subscription()),
        _ => None,
    };

    // Gift and disabled checks read index 0, not the active subscription
    // that selected the account.
    let latest = selected_account.and_then(Account::latest_subscription);

    let gift_expiration = latest.and_then(|s| s.current_period_end);
    let is_gift_expired = gift_expiration.is_some_and(|end| end < now);
    let is_gift_membership = latest.is_some_and(|s| {
        s.kind == SubscriptionType::Gift && s.status.is_in_good_standing()
    }) && !is_gift_expired;

    let has_stripe_account = selected_account
        .and_then(|a| a.stripe_customer_id.as_deref())
        .is_some_and(|id| !id.is_empty());
    let is_disabled = latest.is_some_and(|s| s.status.is_disabling());

    let account_owner = accounts.iter().find_map(|a| a.owner.clone());

    EntitlementSnapshot {
        is_instructor: viewer.is_instructor,
        instructor_id: viewer.instructor_id.clone(),
        is_lifetime_member: viewer.has_role(LIFETIME_SUBSCRIBER_ROLE),
        is_active_account_member,
        is_account_owner,
        is_team_account_owner,
        selected_account: selected_account.cloned(),
        gift_expiration,
        is_gift_expired,
        is_gift_membership,
        is_team_member: is_active_account_member && !is_account_owner,
        has_stripe_account,
        is_disabled,
        account_owner,
        account_loading: state.is_loading(),
    }
}
