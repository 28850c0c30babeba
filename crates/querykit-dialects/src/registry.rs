//! Dialect selection from settings.

use querykit_core::settings::{Settings, KNOWN_DIALECTS};
use querykit_core::{QueryKitError, QueryKitResult, SETTINGS};
use querykit_expr::dialect::{Dialect, StandardDialect};

use crate::mysql::MySqlDialect;
use crate::postgresql::PostgresDialect;
use crate::sqlite::SqliteDialect;

/// Builds the dialect the settings name, with the configured alias prefix
/// and PostGIS flag.
pub fn dialect_from_settings(settings: &Settings) -> QueryKitResult<Box<dyn Dialect>> {
    if !settings.has_known_dialect() {
        tracing::warn!(dialect = %settings.dialect, known = ?KNOWN_DIALECTS, "unknown dialect");
        return Err(QueryKitError::UnknownDialect(settings.dialect.clone()));
    }
    let prefix = settings.alias_prefix.as_str();
    let dialect: Box<dyn Dialect> = match settings.dialect.to_lowercase().as_str() {
        "postgresql" => Box::new(
            PostgresDialect::new()
                .with_postgis(settings.postgis)
                .with_alias_prefix(prefix),
        ),
        "sqlite" => Box::new(SqliteDialect::new().with_alias_prefix(prefix)),
        "mysql" => Box::new(MySqlDialect::new().with_alias_prefix(prefix)),
        _ => Box::new(StandardDialect::new().with_alias_prefix(prefix)),
    };
    tracing::debug!(dialect = dialect.name(), postgis = settings.postgis, "dialect selected");
    Ok(dialect)
}

/// The dialect of the global settings.
pub fn configured_dialect() -> QueryKitResult<Box<dyn Dialect>> {
    dialect_from_settings(SETTINGS.get())
}
