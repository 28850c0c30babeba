//! Settings for querykit.
//!
//! This module provides the [`Settings`] struct, which selects the dialect
//! expressions are rendered for and configures logging, and [`LazySettings`],
//! a globally-accessible, lazily-initialized settings instance.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// The dialect names understood by `querykit-dialects`.
pub const KNOWN_DIALECTS: &[&str] = &["postgresql", "sqlite", "mysql", "standard"];

/// Rendering and logging configuration.
///
/// # Examples
///
/// ```
/// use querykit_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert_eq!(settings.dialect, "standard");
/// assert_eq!(settings.alias_prefix, "qk");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // ── Rendering ────────────────────────────────────────────────────

    /// The dialect to render for (`postgresql`, `sqlite`, `mysql`, `standard`).
    pub dialect: String,
    /// Whether the PostgreSQL database has PostGIS installed.
    pub postgis: bool,
    /// Prefix for the synthetic table aliases generated by the mode compiler.
    pub alias_prefix: String,

    // ── Logging ──────────────────────────────────────────────────────

    /// Whether debug mode is enabled (pretty logs instead of JSON).
    pub debug: bool,
    /// The log level (e.g. "info", "debug", "warn").
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dialect: "standard".to_string(),
            postgis: false,
            alias_prefix: "qk".to_string(),
            debug: true,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Returns `true` if [`dialect`](Self::dialect) names a known dialect.
    pub fn has_known_dialect(&self) -> bool {
        KNOWN_DIALECTS.contains(&self.dialect.to_lowercase().as_str())
    }
}

/// A lazily-initialized, globally-accessible settings container.
///
/// Call [`configure`](LazySettings::configure) once at startup, then use
/// [`get`](LazySettings::get) to access the settings.
pub struct LazySettings {
    inner: OnceLock<Settings>,
}

impl Default for LazySettings {
    fn default() -> Self {
        Self::new()
    }
}

impl LazySettings {
    /// Creates a new, unconfigured `LazySettings`.
    pub const fn new() -> Self {
        Self {
            inner: OnceLock::new(),
        }
    }

    /// Configures the global settings. Must be called exactly once.
    ///
    /// # Panics
    ///
    /// Panics if settings have already been configured.
    pub fn configure(&self, settings: Settings) {
        self.inner
            .set(settings)
            .expect("Settings have already been configured");
    }

    /// Returns the configured settings, or the defaults if none were set.
    pub fn get(&self) -> &Settings {
        self.inner.get_or_init(Settings::default)
    }

    /// Returns `true` if settings have been configured.
    pub fn is_configured(&self) -> bool {
        self.inner.get().is_some()
    }
}

/// The global settings instance.
pub static SETTINGS: LazySettings = LazySettings::new();
