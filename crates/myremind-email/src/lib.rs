// SPDX-FileCopyrightText: 2026 MyRemind Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Email delivery of the reminder digest.

pub mod sink;

pub use sink::{DisabledEmailSink, SmtpEmailSink};
