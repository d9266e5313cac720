// SPDX-FileCopyrightText: 2026 MyRemind Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! [`EmailSink`] implementations.

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, warn};

use myremind_config::model::SmtpConfig;
use myremind_core::{DispatchOutcome, EmailSink, RemindError};

/// Sends digest emails over an authenticated STARTTLS relay.
#[derive(Debug)]
pub struct SmtpEmailSink {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpEmailSink {
    pub fn new(config: &SmtpConfig) -> Result<Self, RemindError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| RemindError::Config(format!("invalid SMTP relay {}: {e}", config.host)))?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();
        let from = config
            .from
            .parse()
            .map_err(|e| RemindError::Config(format!("invalid from address {:?}: {e}", config.from)))?;
        Ok(Self { transport, from })
    }
}

/// Strip markup for the plain-text alternative part.
fn strip_html(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => text.push(c),
            _ => {}
        }
    }
    text
}

#[async_trait]
impl EmailSink for SmtpEmailSink {
    async fn send(&self, to: &str, subject: &str, html: &str) -> DispatchOutcome {
        let recipient: Mailbox = match to.parse() {
            Ok(mailbox) => mailbox,
            Err(err) => {
                warn!(to, %err, "invalid recipient address");
                return DispatchOutcome::Failed;
            }
        };
        let message = Message::builder()
            .from(self.from.clone())
            .to(recipient)
            .subject(subject)
            .multipart(MultiPart::alternative_plain_html(
                strip_html(html),
                html.to_string(),
            ));
        let message = match message {
            Ok(message) => message,
            Err(err) => {
                warn!(to, %err, "failed to build digest email");
                return DispatchOutcome::Failed;
            }
        };

        match self.transport.send(message).await {
            Ok(_) => {
                debug!(to, subject, "digest email sent");
                DispatchOutcome::Sent
            }
            Err(err) => {
                warn!(to, %err, "digest email dispatch failed");
                DispatchOutcome::Failed
            }
        }
    }
}

/// Stands in when email is disabled by configuration; drops every dispatch.
pub struct DisabledEmailSink;

#[async_trait]
impl EmailSink for DisabledEmailSink {
    async fn send(&self, to: &str, _subject: &str, _html: &str) -> DispatchOutcome {
        debug!(to, "email disabled, dropping dispatch");
        DispatchOutcome::Sent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn smtp_config() -> SmtpConfig {
        SmtpConfig {
            enabled: true,
            host: "smtp.gmail.com".into(),
            port: 587,
            username: "myremind@example.com".into(),
            password: "app-password".into(),
            from: "MyRemind <myremind@example.com>".into(),
        }
    }

    #[test]
    fn builds_from_valid_config() {
        assert!(SmtpEmailSink::new(&smtp_config()).is_ok());
    }

    #[test]
    fn rejects_malformed_from_address() {
        let config = SmtpConfig {
            from: "not an address".into(),
            ..smtp_config()
        };
        assert!(matches!(
            SmtpEmailSink::new(&config).unwrap_err(),
            RemindError::Config(_)
        ));
    }

    #[test]
    fn strip_html_keeps_text_only() {
        let html = "<html><body><h1>Nhắc nhở</h1><p>Xin chào <strong>An</strong></p></body></html>";
        assert_eq!(strip_html(html), "Nhắc nhởXin chào An");
    }

    #[tokio::test]
    async fn invalid_recipient_fails_without_sending() {
        let sink = SmtpEmailSink::new(&smtp_config()).unwrap();
        let outcome = sink.send("not an address", "subject", "<p>hi</p>").await;
        assert!(!outcome.is_sent());
    }

    #[tokio::test]
    async fn disabled_sink_swallows_dispatches() {
        let outcome = DisabledEmailSink
            .send("an@example.com", "subject", "<p>hi</p>")
            .await;
        assert!(outcome.is_sent());
    }
}
