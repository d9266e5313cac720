// SPDX-FileCopyrightText: 2026 MyRemind Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer.
//!
//! A single background writer owns the connection; all access goes through
//! [`Database::connection`] closures. Schema changes live in `migrations/`
//! and run automatically on open.

pub mod adapter;
pub mod database;
pub mod migrations;
pub mod queries;

pub use adapter::SqliteStorage;
pub use database::Database;
