//! PostgreSQL dialect.
//!
//! PostgreSQL has every native construct except geometry, which needs the
//! PostGIS extension. Spatial operations are only rendered natively when
//! the dialect is created with PostGIS enabled.

use querykit_expr::dialect::{Dialect, DEFAULT_ALIAS_PREFIX};
use querykit_expr::fallback::Capability;
use querykit_expr::ops::{DatePart, ScalarFunction};

/// The PostgreSQL dialect.
#[derive(Debug, Clone)]
pub struct PostgresDialect {
    postgis: bool,
    alias_prefix: String,
}

impl Default for PostgresDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl PostgresDialect {
    /// PostgreSQL without PostGIS.
    pub fn new() -> Self {
        Self {
            postgis: false,
            alias_prefix: DEFAULT_ALIAS_PREFIX.to_string(),
        }
    }

    pub fn with_postgis(mut self, postgis: bool) -> Self {
        self.postgis = postgis;
        self
    }

    pub fn with_alias_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.alias_prefix = prefix.into();
        self
    }

    pub const fn has_postgis(&self) -> bool {
        self.postgis
    }
}

impl Dialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgresql"
    }

    fn supports(&self, capability: Capability) -> bool {
        match capability {
            Capability::NativeSpatial => self.postgis,
            Capability::DatePartExtraction
            | Capability::DateTimeFormatting
            | Capability::NativeDuration
            | Capability::GroupsFrames
            | Capability::CaseInsensitiveLike
            | Capability::StandardDeviation => true,
        }
    }

    fn alias_prefix(&self) -> &str {
        &self.alias_prefix
    }

    fn scalar_function(&self, func: ScalarFunction) -> &'static str {
        match func {
            ScalarFunction::Position => "STRPOS",
            other => other.sql_name(),
        }
    }

    // EXTRACT yields numeric; the typed API promises an integer.
    fn date_part(&self, part: DatePart, operand: &str) -> String {
        format!("CAST(EXTRACT({} FROM {operand}) AS INTEGER)", part.sql_unit())
    }
}
