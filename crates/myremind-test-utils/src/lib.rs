// SPDX-FileCopyrightText: 2026 MyRemind Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for MyRemind integration tests.
//!
//! Provides mock sink and auth implementations for fast, deterministic,
//! CI-runnable tests without external services.
//!
//! # Components
//!
//! - [`MockPushSink`] / [`MockEmailSink`] - capture dispatched summaries and
//!   digests, with one-shot failure injection
//! - [`StaticAuth`] - an auth context fixed to one caller (or none)

pub mod mock_sinks;
pub mod static_auth;

pub use mock_sinks::{MockEmailSink, MockPushSink, SentEmail, SentPush};
pub use static_auth::StaticAuth;
