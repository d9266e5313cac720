// SPDX-FileCopyrightText: 2026 MyRemind Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reminder eligibility rules.
//!
//! Pure functions of (policy, today); the scheduler keeps no state between
//! runs. A policy is eligible inside `[expiry - lead, expiry + 1]` while not
//! renewed, with a 3-day throttle for lead times beyond a week.

use chrono::{Days, NaiveDate};
use myremind_core::{DuePolicy, Policy, ReminderCadence};

/// Days before expiry at which reminders start for a cadence.
pub fn lead_days(cadence: ReminderCadence) -> i64 {
    match cadence {
        ReminderCadence::OnDue => 0,
        ReminderCadence::ThreeDays => 3,
        ReminderCadence::OneWeek => 7,
        ReminderCadence::TwoWeeks => 14,
        ReminderCadence::OneMonth => 30,
    }
}

/// Decide whether `policy` needs a reminder on `today`.
///
/// Returns the policy tagged with its signed day distance to expiry when a
/// reminder is due, `None` otherwise. Renewed policies and policies more
/// than one day past expiry are never due.
pub fn evaluate(policy: &Policy, today: NaiveDate) -> Option<DuePolicy> {
    if policy.status {
        return None;
    }

    let days_until_expiry = (policy.expiry_date - today).num_days();
    let lead = lead_days(policy.reminder_cadence);
    let window_start = policy.expiry_date - Days::new(lead as u64);
    let window_end = policy.expiry_date + Days::new(1);

    if today < window_start || today > window_end {
        return None;
    }

    // Inside the window. Long lead times fire every 3rd day counted from
    // the window start; the final week and the overdue grace day fire daily.
    if days_until_expiry > 7 {
        let days_from_start = (today - window_start).num_days();
        if days_from_start % 3 != 0 {
            return None;
        }
    }

    Some(DuePolicy {
        policy: policy.clone(),
        days_until_expiry,
    })
}

/// Filter a user's policies down to the ones due today.
pub fn due_policies(policies: &[Policy], today: NaiveDate) -> Vec<DuePolicy> {
    policies
        .iter()
        .filter_map(|policy| evaluate(policy, today))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use myremind_core::{PolicyId, Priority, UserId};

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn make_policy(expiry: &str, cadence: ReminderCadence, renewed: bool) -> Policy {
        Policy {
            id: PolicyId("p-1".into()),
            owner: Some(UserId("u-1".into())),
            customer_name: "Nguyễn Văn An".into(),
            phone: "0901234567".into(),
            date_of_birth: None,
            national_id: None,
            policy_code: None,
            address: None,
            expiry_date: date(expiry),
            payment_amount: None,
            status: renewed,
            priority: Priority::Normal,
            reminder_cadence: cadence,
            notes: None,
            created_at: "2024-01-01T00:00:00.000Z".into(),
        }
    }

    #[test]
    fn lead_days_per_cadence() {
        assert_eq!(lead_days(ReminderCadence::OnDue), 0);
        assert_eq!(lead_days(ReminderCadence::ThreeDays), 3);
        assert_eq!(lead_days(ReminderCadence::OneWeek), 7);
        assert_eq!(lead_days(ReminderCadence::TwoWeeks), 14);
        assert_eq!(lead_days(ReminderCadence::OneMonth), 30);
    }

    #[test]
    fn one_week_cadence_day_by_day() {
        // expiry 2024-01-11, lead 7 => window opens 2024-01-04.
        let policy = make_policy("2024-01-11", ReminderCadence::OneWeek, false);

        assert!(evaluate(&policy, date("2024-01-01")).is_none(), "before window");
        let due = evaluate(&policy, date("2024-01-04")).expect("window start fires");
        assert_eq!(due.days_until_expiry, 7);
        assert!(evaluate(&policy, date("2024-01-05")).is_some(), "final week is daily");
        assert!(evaluate(&policy, date("2024-01-11")).is_some(), "expiry day");
        assert!(evaluate(&policy, date("2024-01-12")).is_some(), "overdue grace day");
        assert!(evaluate(&policy, date("2024-01-13")).is_none(), "past the cutoff");
    }

    #[test]
    fn long_lead_throttles_every_third_day() {
        // expiry 2024-02-01, lead 30 => window opens 2024-01-02.
        let policy = make_policy("2024-02-01", ReminderCadence::OneMonth, false);

        assert!(evaluate(&policy, date("2024-01-02")).is_some(), "day 0");
        assert!(evaluate(&policy, date("2024-01-03")).is_none(), "day 1");
        assert!(evaluate(&policy, date("2024-01-04")).is_none(), "day 2");
        assert!(evaluate(&policy, date("2024-01-05")).is_some(), "day 3");

        // Once inside the final week the throttle no longer applies.
        assert!(evaluate(&policy, date("2024-01-26")).is_some(), "6 days out");
        assert!(evaluate(&policy, date("2024-01-27")).is_some(), "5 days out");
    }

    #[test]
    fn overdue_cutoff_is_one_day() {
        let policy = make_policy("2024-03-01", ReminderCadence::OneWeek, false);

        let due = evaluate(&policy, date("2024-03-02")).expect("one day overdue fires");
        assert_eq!(due.days_until_expiry, -1);
        assert!(evaluate(&policy, date("2024-03-03")).is_none(), "two days overdue exits");
    }

    #[test]
    fn renewed_policy_is_never_due() {
        let policy = make_policy("2024-03-01", ReminderCadence::OnDue, true);
        assert!(evaluate(&policy, date("2024-03-01")).is_none());
    }

    #[test]
    fn on_due_fires_on_expiry_and_grace_day_only() {
        let policy = make_policy("2024-03-01", ReminderCadence::OnDue, false);

        assert!(evaluate(&policy, date("2024-02-29")).is_none());
        assert_eq!(
            evaluate(&policy, date("2024-03-01")).unwrap().days_until_expiry,
            0
        );
        assert_eq!(
            evaluate(&policy, date("2024-03-02")).unwrap().days_until_expiry,
            -1
        );
    }

    #[test]
    fn due_policies_keeps_only_eligible() {
        let today = date("2024-03-01");
        let policies = vec![
            make_policy("2024-03-01", ReminderCadence::OnDue, false),
            make_policy("2024-03-08", ReminderCadence::OneWeek, false),
            make_policy("2024-06-01", ReminderCadence::OneWeek, false),
            make_policy("2024-03-01", ReminderCadence::OnDue, true),
        ];

        let due = due_policies(&policies, today);
        assert_eq!(due.len(), 2);
        assert_eq!(due[0].days_until_expiry, 0);
        assert_eq!(due[1].days_until_expiry, 7);
    }
}
