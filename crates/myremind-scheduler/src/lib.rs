// SPDX-FileCopyrightText: 2026 MyRemind Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reminder scheduling and notification emission.
//!
//! The pipeline is stateless between runs: [`schedule`] decides what is due
//! today, [`emitter::NotificationEmitter`] persists and dispatches, and
//! [`scan::DailyScan`] drives both across all users on the external daily
//! trigger.

pub mod emitter;
pub mod message;
pub mod scan;
pub mod schedule;

pub use emitter::NotificationEmitter;
pub use scan::{DailyScan, ScanReport};
