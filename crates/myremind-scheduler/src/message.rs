// SPDX-FileCopyrightText: 2026 MyRemind Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Notification and digest wording.
//!
//! All user-facing strings are Vietnamese; dates render as dd/mm/yyyy.

use myremind_core::{DuePolicy, NotificationKind};

/// In-app title for a single policy, keyed on days left.
pub fn title_for(days_until_expiry: i64) -> String {
    match days_until_expiry {
        d if d < 0 => "Bảo hiểm đã hết hạn".to_string(),
        0 => "Bảo hiểm hết hạn hôm nay".to_string(),
        1 => "Bảo hiểm hết hạn ngày mai".to_string(),
        d => format!("Bảo hiểm hết hạn trong {d} ngày"),
    }
}

/// In-app message body naming the customer and, when present, the policy code.
pub fn message_for(due: &DuePolicy) -> String {
    let policy = &due.policy;
    let code = policy
        .policy_code
        .as_deref()
        .map(|c| format!(" (Mã: {c})"))
        .unwrap_or_default();
    let tail = match due.days_until_expiry {
        d if d < 0 => "đã hết hạn".to_string(),
        0 => "hết hạn hôm nay".to_string(),
        _ => format!(
            "sẽ hết hạn vào {}",
            policy.expiry_date.format("%d/%m/%Y")
        ),
    };
    format!("Bảo hiểm của {}{} {}", policy.customer_name, code, tail)
}

/// Warning at or past expiry, reminder before it.
pub fn kind_for(days_until_expiry: i64) -> NotificationKind {
    if days_until_expiry <= 0 {
        NotificationKind::Warning
    } else {
        NotificationKind::Reminder
    }
}

/// Aggregate push summary for one user's due policies. A single due policy
/// reuses its own wording; several collapse into a count.
pub fn summary_for(due: &[DuePolicy]) -> (String, String) {
    if let [only] = due {
        (title_for(only.days_until_expiry), message_for(only))
    } else {
        (
            format!("Bạn có {} bảo hiểm sắp hết hạn", due.len()),
            format!(
                "Có {} bảo hiểm cần được gia hạn. Nhấn để xem chi tiết.",
                due.len()
            ),
        )
    }
}

/// Email digest subject line.
pub fn digest_subject(due: &[DuePolicy]) -> String {
    if let [only] = due {
        let name = &only.policy.customer_name;
        match only.days_until_expiry {
            d if d <= 0 => format!("[QUAN TRỌNG] Bảo hiểm đã hết hạn - {name}"),
            1 => format!("[QUAN TRỌNG] Bảo hiểm hết hạn ngày mai - {name}"),
            d => format!("Bảo hiểm hết hạn trong {d} ngày - {name}"),
        }
    } else {
        format!("Bạn có {} bảo hiểm sắp hết hạn", due.len())
    }
}

/// Email digest body: greeting, urgency banner, one card per policy and a
/// link back to the app.
pub fn digest_html(user_name: &str, due: &[DuePolicy], base_url: &str) -> String {
    let expired: Vec<&DuePolicy> = due.iter().filter(|d| d.days_until_expiry <= 0).collect();
    let expiring_count = due.len() - expired.len();

    let mut html = String::new();
    html.push_str("<!DOCTYPE html><html><head><meta charset=\"UTF-8\"></head><body>");
    html.push_str("<h1>MyRemind - Nhắc nhở Bảo hiểm</h1>");
    html.push_str(&format!("<p>Xin chào <strong>{user_name}</strong>,</p>"));
    if !expired.is_empty() {
        html.push_str(&format!(
            "<p>[QUAN TRỌNG] Bạn có {} bảo hiểm đã hết hạn cần được gia hạn ngay!</p>",
            expired.len()
        ));
    }
    if expiring_count > 0 {
        html.push_str(&format!(
            "<p>Bạn có {expiring_count} bảo hiểm sắp đến hạn:</p>"
        ));
    }
    for item in due {
        let policy = &item.policy;
        html.push_str("<div>");
        html.push_str(&format!("<h3>{}</h3>", policy.customer_name));
        if let Some(code) = &policy.policy_code {
            html.push_str(&format!("<p>Mã số: <strong>{code}</strong></p>"));
        }
        let status_line = match item.days_until_expiry {
            d if d < 0 => format!("Đã hết hạn {} ngày", d.abs()),
            0 => "Hết hạn hôm nay".to_string(),
            1 => "Hết hạn ngày mai".to_string(),
            d => format!("Hết hạn trong {d} ngày"),
        };
        html.push_str(&format!("<p>{status_line}</p>"));
        html.push_str(&format!(
            "<p>Ngày hết hạn: <strong>{}</strong></p>",
            policy.expiry_date.format("%d/%m/%Y")
        ));
        html.push_str("</div>");
    }
    html.push_str(&format!(
        "<p><a href=\"{base_url}\">Xem chi tiết và gia hạn</a></p>"
    ));
    html.push_str("<p>Email này được gửi tự động từ hệ thống MyRemind.</p>");
    html.push_str("</body></html>");
    html
}
