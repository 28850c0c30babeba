//! # querykit
//!
//! Typed SQL expressions rendered per database dialect.
//!
//! This is the meta-crate that re-exports the sub-crates. Depend on
//! `querykit` for everything, or on the individual crates for finer-grained
//! control.
//!
//! ```
//! use querykit::prelude::*;
//!
//! let sales = RelationRef::new("sales");
//! let amount = Expr::<Integer>::column(&sales, "amount");
//! let total = amount.plus(1).sum();
//! assert_eq!(
//!     total.to_sql(&StandardDialect::new()),
//!     "SUM((\"sales\".\"amount\" + 1))"
//! );
//! ```

/// Errors, settings and logging.
pub use querykit_core as core;

/// Expression trees, aggregates, mode and window functions.
pub use querykit_expr as expr;

/// PostgreSQL, SQLite and MySQL dialects.
#[cfg(feature = "dialects")]
pub use querykit_dialects as dialects;

pub use chrono;
pub use tracing;
pub use uuid;

/// Commonly used types, traits and functions.
///
/// ```
/// use querykit::prelude::*;
/// ```
pub mod prelude {
    pub use querykit_core::{QueryKitError, QueryKitResult, Settings, SETTINGS};

    pub use querykit_expr::kind::{
        Boolean, DateTime, Duration, Integer, Kind, Number, Point2D, Text,
    };
    pub use querykit_expr::window::{self, WindowFrameBound, WindowFrameType};
    pub use querykit_expr::{
        count_all, Aggregate, Capability, Dialect, Expr, Period, Point, RelationRef, SortKey,
        SqlExpression, StandardDialect, Value,
    };

    #[cfg(feature = "dialects")]
    pub use querykit_dialects::{
        configured_dialect, dialect_from_settings, MySqlDialect, PostgresDialect, SqliteDialect,
    };
}
