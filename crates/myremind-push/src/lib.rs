// SPDX-FileCopyrightText: 2026 MyRemind Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Push delivery to a user's registered browser endpoints.
//!
//! Every registered subscription gets the payload; endpoints answering with
//! a permanent-failure status (404/410) are pruned so later scans stop
//! dispatching to dead browsers.

pub mod sink;

pub use sink::{DisabledPushSink, WebPushSink};
