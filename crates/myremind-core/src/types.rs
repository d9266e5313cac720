// SPDX-FileCopyrightText: 2026 MyRemind Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the MyRemind workspace.
//!
//! Calendar fields (`expiry_date`, `date_of_birth`) are `NaiveDate` — the
//! domain has no time-of-day component. Row timestamps are UTC strings in
//! SQLite's `%Y-%m-%dT%H:%M:%fZ` format.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Unique identifier for a user account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

/// Unique identifier for an insurance policy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PolicyId(pub String);

/// Unique identifier for a notification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NotificationId(pub String);

/// How far ahead of expiry reminders should start firing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, Serialize, Deserialize,
)]
pub enum ReminderCadence {
    #[strum(serialize = "on_due")]
    #[serde(rename = "on_due")]
    OnDue,
    #[strum(serialize = "3_days")]
    #[serde(rename = "3_days")]
    ThreeDays,
    #[default]
    #[strum(serialize = "1_week")]
    #[serde(rename = "1_week")]
    OneWeek,
    #[strum(serialize = "2_weeks")]
    #[serde(rename = "2_weeks")]
    TwoWeeks,
    #[strum(serialize = "1_month")]
    #[serde(rename = "1_month")]
    OneMonth,
}

impl ReminderCadence {
    /// Parse a stored cadence value, falling back to the `1_week` default
    /// for absent or unrecognized values (data-model invariant).
    pub fn parse_or_default(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

/// Policy priority for dashboard ordering.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    #[default]
    Normal,
    High,
}

/// Notification category. The scheduler emits `Warning` for policies at or
/// past expiry and `Reminder` otherwise; `Info` is reserved for
/// user-triggered notices.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Reminder,
    Warning,
    #[default]
    Info,
}

/// A tracked insurance policy owned by a user.
///
/// `owner` is nullable only for legacy rows created before accounts were
/// gated; all new rows carry an owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    pub id: PolicyId,
    pub owner: Option<UserId>,
    pub customer_name: String,
    pub phone: String,
    pub date_of_birth: Option<NaiveDate>,
    pub national_id: Option<String>,
    pub policy_code: Option<String>,
    pub address: Option<String>,
    pub expiry_date: NaiveDate,
    pub payment_amount: Option<f64>,
    /// `true` once the policy has been renewed; renewed policies are never
    /// eligible for reminders.
    pub status: bool,
    pub priority: Priority,
    pub reminder_cadence: ReminderCadence,
    pub notes: Option<String>,
    pub created_at: String,
}

/// A validated policy ready for insertion. Produced by the service layer's
/// validation boundary; stores may assume every field is well-formed.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPolicy {
    pub owner: UserId,
    pub customer_name: String,
    pub phone: String,
    pub date_of_birth: Option<NaiveDate>,
    pub national_id: Option<String>,
    pub policy_code: Option<String>,
    pub address: Option<String>,
    pub expiry_date: NaiveDate,
    pub payment_amount: Option<f64>,
    pub priority: Priority,
    pub reminder_cadence: ReminderCadence,
    pub notes: Option<String>,
}

/// Partial update for a policy. Fields left as `None` are unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolicyPatch {
    pub customer_name: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub national_id: Option<String>,
    pub policy_code: Option<String>,
    pub address: Option<String>,
    pub expiry_date: Option<NaiveDate>,
    pub payment_amount: Option<f64>,
    pub status: Option<bool>,
    pub priority: Option<Priority>,
    pub reminder_cadence: Option<ReminderCadence>,
    pub notes: Option<String>,
}

/// Listing filter for [`crate::PolicyStore::list`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PolicyFilter {
    /// Restrict to not-yet-renewed policies expiring within
    /// `[today, today + N days]`.
    pub expiring_within_days: Option<i64>,
}

/// A persisted in-app notification.
///
/// `policy_id` is a reference, not ownership: the policy may be deleted
/// later, in which case the reference is cleared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub owner: UserId,
    pub policy_id: Option<PolicyId>,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub read: bool,
    pub created_at: String,
}

/// A notification about to be persisted by the emitter.
#[derive(Debug, Clone, PartialEq)]
pub struct NewNotification {
    pub owner: UserId,
    pub policy_id: Option<PolicyId>,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
}

/// A registered user account. Credential handling lives outside this core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub created_at: String,
}

/// A new user account to be registered.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub email: String,
    pub name: String,
}

/// A web-push subscription endpoint registered by a user's browser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushSubscription {
    pub endpoint: String,
    pub user_id: UserId,
    pub p256dh: String,
    pub auth: String,
}

/// A policy the scheduler decided is due for a reminder today, tagged with
/// the signed day distance to expiry for message formatting.
#[derive(Debug, Clone, PartialEq)]
pub struct DuePolicy {
    pub policy: Policy,
    pub days_until_expiry: i64,
}

/// The caller identity resolved from a request-scoped credential.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentUser {
    pub id: UserId,
    pub email: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cadence_round_trips_wire_values() {
        for (s, v) in [
            ("on_due", ReminderCadence::OnDue),
            ("3_days", ReminderCadence::ThreeDays),
            ("1_week", ReminderCadence::OneWeek),
            ("2_weeks", ReminderCadence::TwoWeeks),
            ("1_month", ReminderCadence::OneMonth),
        ] {
            assert_eq!(ReminderCadence::parse_or_default(s), v);
            assert_eq!(v.to_string(), s);
        }
    }

    #[test]
    fn unrecognized_cadence_falls_back_to_one_week() {
        assert_eq!(
            ReminderCadence::parse_or_default("every_full_moon"),
            ReminderCadence::OneWeek
        );
        assert_eq!(ReminderCadence::parse_or_default(""), ReminderCadence::OneWeek);
    }

    #[test]
    fn enums_serialize_to_snake_case() {
        assert_eq!(
            serde_json::to_string(&NotificationKind::Warning).unwrap(),
            "\"warning\""
        );
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"high\"");
        assert_eq!(
            serde_json::to_string(&ReminderCadence::ThreeDays).unwrap(),
            "\"3_days\""
        );
    }
}
