//! # querykit-dialects
//!
//! Concrete dialects for the querykit expression engine:
//!
//! - [`PostgresDialect`] - PostgreSQL, with optional PostGIS
//! - [`SqliteDialect`] - SQLite, relying on the text emulations
//! - [`MySqlDialect`] - MySQL 8
//!
//! [`dialect_from_settings`] picks one from a
//! [`Settings`](querykit_core::Settings) value.

#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::unnecessary_literal_bound)]
#![allow(clippy::match_same_arms)]

pub mod mysql;
pub mod postgresql;
pub mod registry;
pub mod sqlite;

pub use mysql::MySqlDialect;
pub use postgresql::PostgresDialect;
pub use registry::{configured_dialect, dialect_from_settings};
pub use sqlite::SqliteDialect;
