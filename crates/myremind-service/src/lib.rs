// SPDX-FileCopyrightText: 2026 MyRemind Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Owner-scoped application services.
//!
//! Raw submissions cross the [`validate`] boundary once, then flow through
//! [`policies::PolicyService`] (CRUD plus deduplicating create) or
//! [`inbox::InboxService`]. Identity comes from the injected
//! `AuthContext`; ownership failures surface as `NotFound`.

pub mod inbox;
pub mod lock;
pub mod policies;
pub mod validate;

pub use inbox::InboxService;
pub use lock::KeyedMutex;
pub use policies::PolicyService;
pub use validate::{PolicyDraft, PolicyPatchDraft};
