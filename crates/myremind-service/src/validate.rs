// SPDX-FileCopyrightText: 2026 MyRemind Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The validation boundary between raw submissions and typed rows.
//!
//! Everything downstream of this module may assume well-formed fields.
//! Validation failures surface before any locking or store access.

use chrono::NaiveDate;
use myremind_core::{
    NewPolicy, PolicyPatch, Priority, ReminderCadence, RemindError, UserId,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A policy submission as it arrives from the outside: strings, untrusted.
#[derive(Debug, Clone, Default)]
pub struct PolicyDraft {
    pub customer_name: String,
    pub phone: String,
    pub date_of_birth: Option<String>,
    pub national_id: Option<String>,
    pub policy_code: Option<String>,
    pub address: Option<String>,
    pub expiry_date: String,
    pub payment_amount: Option<f64>,
    pub priority: Option<String>,
    pub reminder_cadence: Option<String>,
    pub notes: Option<String>,
}

/// A partial update submission. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct PolicyPatchDraft {
    pub customer_name: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<String>,
    pub national_id: Option<String>,
    pub policy_code: Option<String>,
    pub address: Option<String>,
    pub expiry_date: Option<String>,
    pub payment_amount: Option<f64>,
    pub status: Option<bool>,
    pub priority: Option<String>,
    pub reminder_cadence: Option<String>,
    pub notes: Option<String>,
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate, RemindError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| RemindError::validation(field, format!("expected YYYY-MM-DD, got {value:?}")))
}

fn check_amount(amount: Option<f64>) -> Result<Option<f64>, RemindError> {
    match amount {
        Some(a) if a < 0.0 => Err(RemindError::validation(
            "payment_amount",
            "must not be negative",
        )),
        other => Ok(other),
    }
}

fn none_if_blank(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Validate a draft into an insertable [`NewPolicy`] owned by `owner`.
pub fn validate_new(owner: UserId, draft: PolicyDraft) -> Result<NewPolicy, RemindError> {
    let customer_name = draft.customer_name.trim().to_string();
    if customer_name.is_empty() {
        return Err(RemindError::validation("customer_name", "must not be empty"));
    }
    let expiry_date = parse_date("expiry_date", &draft.expiry_date)?;
    let date_of_birth = draft
        .date_of_birth
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .map(|v| parse_date("date_of_birth", v))
        .transpose()?;
    let payment_amount = check_amount(draft.payment_amount)?;

    // Unknown enum values fall back to defaults, same as the stored-row
    // parsing rule.
    let priority = draft
        .priority
        .as_deref()
        .map(|p| p.parse().unwrap_or(Priority::Normal))
        .unwrap_or_default();
    let reminder_cadence = draft
        .reminder_cadence
        .as_deref()
        .map(ReminderCadence::parse_or_default)
        .unwrap_or_default();

    Ok(NewPolicy {
        owner,
        customer_name,
        phone: draft.phone.trim().to_string(),
        date_of_birth,
        national_id: none_if_blank(draft.national_id),
        policy_code: none_if_blank(draft.policy_code),
        address: none_if_blank(draft.address),
        expiry_date,
        payment_amount,
        priority,
        reminder_cadence,
        notes: none_if_blank(draft.notes),
    })
}

/// Validate a patch draft into a typed [`PolicyPatch`].
pub fn validate_patch(draft: PolicyPatchDraft) -> Result<PolicyPatch, RemindError> {
    let customer_name = match draft.customer_name {
        Some(name) => {
            let trimmed = name.trim().to_string();
            if trimmed.is_empty() {
                return Err(RemindError::validation("customer_name", "must not be empty"));
            }
            Some(trimmed)
        }
        None => None,
    };
    let expiry_date = draft
        .expiry_date
        .as_deref()
        .map(|v| parse_date("expiry_date", v))
        .transpose()?;
    let date_of_birth = draft
        .date_of_birth
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .map(|v| parse_date("date_of_birth", v))
        .transpose()?;
    let payment_amount = check_amount(draft.payment_amount)?;

    Ok(PolicyPatch {
        customer_name,
        phone: draft.phone,
        date_of_birth,
        national_id: draft.national_id,
        policy_code: draft.policy_code,
        address: draft.address,
        expiry_date,
        payment_amount,
        status: draft.status,
        priority: draft
            .priority
            .as_deref()
            .map(|p| p.parse::<Priority>().unwrap_or_default()),
        reminder_cadence: draft
            .reminder_cadence
            .as_deref()
            .map(ReminderCadence::parse_or_default),
        notes: draft.notes,
    })
}
