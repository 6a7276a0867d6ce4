//! Membership types: viewer, billing accounts, subscriptions.
//!
//! These mirror the already-fetched account payloads. Field names follow the
//! upstream snake_case JSON so they deserialize directly.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// Role tag carried by viewers who bought a lifetime membership.
pub const LIFETIME_SUBSCRIBER_ROLE: &str = "lifetime_subscriber";

/// Canonical user identifier.
///
/// Upstream payloads carry ids both as JSON numbers and as numeric strings.
/// Both are coerced to the same `i64` here so comparisons never depend on the
/// representation; anything else is rejected at deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl UserId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct UserIdVisitor;

        impl<'de> Visitor<'de> for UserIdVisitor {
            type Value = UserId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an integer user id or a numeric string")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<UserId, E> {
                Ok(UserId(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<UserId, E> {
                i64::try_from(v)
                    .map(UserId)
                    .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<UserId, E> {
                v.trim()
                    .parse::<i64>()
                    .map(UserId)
                    .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
            }
        }

        deserializer.deserialize_any(UserIdVisitor)
    }
}

/// The current viewer, authenticated or anonymous.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Viewer {
    /// Absent for anonymous viewers.
    #[serde(default)]
    pub id: Option<UserId>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub instructor_id: Option<String>,
    #[serde(default)]
    pub is_instructor: bool,
}

impl Viewer {
    /// A viewer who is not logged in.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

/// Owner of a billing account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountOwner {
    pub id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A member seat on a billing account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountMember {
    pub id: UserId,
}

/// Billing account grouping members under a subscription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    #[serde(default)]
    pub owner: Option<AccountOwner>,
    /// Number of seats. Missing or null means one.
    #[serde(default = "default_capacity", deserialize_with = "capacity_or_default")]
    pub capacity: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub members: Vec<AccountMember>,
    /// Index 0 is the most recent relevant subscription.
    #[serde(default, deserialize_with = "null_as_default")]
    pub subscriptions: Vec<Subscription>,
    #[serde(default)]
    pub stripe_customer_id: Option<String>,
}

fn default_capacity() -> u32 { 1 }

// Upstream payloads send explicit nulls for fields they have no value for.
// These treat null exactly like a missing field.

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn capacity_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or_else(default_capacity))
}

fn lenient_status<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<SubscriptionStatus, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .map(parse_subscription_status)
        .unwrap_or_default())
}

fn lenient_kind<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<SubscriptionType, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value.as_ref().map(|v| v.as_str()) {
        None => SubscriptionType::Standard,
        Some(Some("standard")) => SubscriptionType::Standard,
        Some(Some("gift")) => SubscriptionType::Gift,
        Some(_) => SubscriptionType::Other,
    })
}

/// Period end as either epoch seconds or an RFC 3339 string. Anything
/// unreadable is treated as no end date.
fn lenient_period_end<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => {
            n.as_i64().and_then(|secs| DateTime::from_timestamp(secs, 0))
        }
        Some(serde_json::Value::String(s)) => DateTime::parse_from_rfc3339(s.trim())
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        _ => None,
    })
}

impl Account {
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.owner.as_ref().is_some_and(|o| o.id == user_id)
    }

    pub fn has_member(&self, user_id: UserId) -> bool {
        self.members.iter().any(|m| m.id == user_id)
    }

    pub fn has_active_subscription(&self) -> bool {
        self.subscriptions
            .iter()
            .any(|s| s.status == SubscriptionStatus::Active)
    }

    /// The subscription at index 0, if any.
    pub fn latest_subscription(&self) -> Option<&Subscription> {
        self.subscriptions.first()
    }
}

/// Subscription record attached to an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: SubscriptionStatus,
    #[serde(rename = "type", default, deserialize_with = "lenient_kind")]
    pub kind: SubscriptionType,
    /// Required for gift subscriptions.
    #[serde(default, deserialize_with = "lenient_period_end")]
    pub current_period_end: Option<DateTime<Utc>>,
}

/// Subscription statuses.
///
/// Any status outside the known set, including null or a non-string value,
/// reads as `Unknown`, which is never treated as active.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    PastDue,
    Trialing,
    Incomplete,
    Canceled,
    IncompleteExpired,
    Unpaid,
    #[default]
    #[serde(other)]
    Unknown,
}

impl SubscriptionStatus {
    /// Statuses under which a gift membership still counts.
    pub fn is_in_good_standing(&self) -> bool {
        matches!(self, Self::Active | Self::PastDue | Self::Trialing)
    }

    /// Statuses that disable the account.
    pub fn is_disabling(&self) -> bool {
        matches!(
            self,
            Self::Incomplete | Self::Canceled | Self::IncompleteExpired | Self::Unpaid
        )
    }
}

/// Subscription kinds. Open to extension: unknown kinds map to `Other`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionType {
    #[default]
    Standard,
    Gift,
    #[serde(other)]
    Other,
}

/// Parse a subscription status string. Unknown strings map to `Unknown`.
pub fn parse_subscription_status(status: &str) -> SubscriptionStatus {
    match status {
        "active" => SubscriptionStatus::Active,
        "past_due" => SubscriptionStatus::PastDue,
        "trialing" => SubscriptionStatus::Trialing,
        "incomplete" => SubscriptionStatus::Incomplete,
        "canceled" => SubscriptionStatus::Canceled,
        "incomplete_expired" => SubscriptionStatus::IncompleteExpired,
        "unpaid" => SubscriptionStatus::Unpaid,
        _ => SubscriptionStatus::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_id_accepts_number_and_numeric_string() {
        let a: UserId = serde_json::from_value(json!(42)).unwrap();
        let b: UserId = serde_json::from_value(json!("42")).unwrap();
        assert_eq!(a, b);
        assert!(serde_json::from_value::<UserId>(json!("abc")).is_err());
        assert!(serde_json::from_value::<UserId>(json!(1.5)).is_err());
    }

    #[test]
    fn test_unknown_status_and_kind() {
        let sub: Subscription = serde_json::from_value(json!({
            "status": "paused",
            "type": "enterprise",
        }))
        .unwrap();
        assert_eq!(sub.status, SubscriptionStatus::Unknown);
        assert_eq!(sub.kind, SubscriptionType::Other);
        assert!(sub.current_period_end.is_none());
    }

    #[test]
    fn test_parse_subscription_status() {
        assert_eq!(parse_subscription_status("active"), SubscriptionStatus::Active);
        assert_eq!(parse_subscription_status("past_due"), SubscriptionStatus::PastDue);
        assert_eq!(
            parse_subscription_status("incomplete_expired"),
            SubscriptionStatus::IncompleteExpired
        );
        assert_eq!(parse_subscription_status("bogus"), SubscriptionStatus::Unknown);
    }

    #[test]
    fn test_null_fields_read_as_missing() {
        let account: Account = serde_json::from_value(json!({
            "owner": null,
            "capacity": null,
            "members": null,
            "subscriptions": null,
            "stripe_customer_id": null,
        }))
        .unwrap();
        assert_eq!(account.capacity, 1);
        assert!(account.members.is_empty());
        assert!(account.subscriptions.is_empty());

        let sub: Subscription = serde_json::from_value(json!({
            "status": null,
            "type": null,
            "current_period_end": null,
        }))
        .unwrap();
        assert_eq!(sub.status, SubscriptionStatus::Unknown);
        assert_eq!(sub.kind, SubscriptionType::Standard);
        assert!(sub.current_period_end.is_none());
    }

    #[test]
    fn test_non_string_status_and_kind_fail_closed() {
        let sub: Subscription = serde_json::from_value(json!({
            "status": 3,
            "type": { "name": "gift" },
        }))
        .unwrap();
        assert_eq!(sub.status, SubscriptionStatus::Unknown);
        assert_eq!(sub.kind, SubscriptionType::Other);
    }

    #[test]
    fn test_period_end_accepts_epoch_seconds_and_rfc3339() {
        let from_secs: Subscription =
            serde_json::from_value(json!({ "current_period_end": 1893456000 })).unwrap();
        let from_text: Subscription = serde_json::from_value(json!({
            "current_period_end": "2030-01-01T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(from_secs.current_period_end, from_text.current_period_end);
        assert_eq!(
            from_secs.current_period_end.map(|d| d.timestamp()),
            Some(1893456000)
        );

        let garbled: Subscription =
            serde_json::from_value(json!({ "current_period_end": "next tuesday" })).unwrap();
        assert!(garbled.current_period_end.is_none());
    }

    #[test]
    fn test_subscription_survives_serde_round_trip() {
        let end = DateTime::from_timestamp(1893456000, 0).unwrap();
        let sub = Subscription {
            status: SubscriptionStatus::PastDue,
            kind: SubscriptionType::Gift,
            current_period_end: Some(end),
        };
        let back: Subscription =
            serde_json::from_value(serde_json::to_value(&sub).unwrap()).unwrap();
        assert_eq!(back, sub);
    }

    #[test]
    fn test_account_defaults() {
        let account: Account = serde_json::from_value(json!({})).unwrap();
        assert_eq!(account.capacity, 1);
        assert!(account.owner.is_none());
        assert!(account.members.is_empty());
        assert!(account.latest_subscription().is_none());
    }
}
