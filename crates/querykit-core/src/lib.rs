//! # querykit-core
//!
//! Core types shared by the querykit crates. This crate has no dependency on
//! the expression engine and provides the foundation for the other crates.
//!
//! ## Modules
//!
//! - [`error`] - The [`QueryKitError`] type and result alias
//! - [`settings`] - Rendering and logging configuration
//! - [`settings_loader`] - Loading settings from TOML, JSON, and the environment
//! - [`logging`] - Tracing-based logging integration

pub mod error;
pub mod logging;
pub mod settings;
pub mod settings_loader;

// Re-export the most commonly used types at the crate root.
pub use error::{QueryKitError, QueryKitResult};
pub use settings::{Settings, SETTINGS};
