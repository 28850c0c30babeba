//! ANSI SQL reference dialect.

use std::collections::BTreeMap;

use super::{Dialect, DEFAULT_ALIAS_PREFIX};
use crate::fallback::Capability;
use crate::kind::Family;
use crate::ops::{ArithmeticOp, ScalarFunction};
use crate::period::Period;

/// ANSI SQL, with `FETCH FIRST` paging, `POSITION`/`SUBSTRING` syntax and
/// year-month plus day-second interval literals.
///
/// Capabilities can be switched off one by one, which makes this dialect
/// useful for checking both halves of a fallback.
///
/// # Examples
///
/// ```
/// use querykit_expr::dialect::{Dialect, StandardDialect};
/// use querykit_expr::fallback::Capability;
///
/// let d = StandardDialect::new();
/// assert!(d.supports(Capability::NativeDuration));
/// let d = d.with_capability(Capability::NativeDuration, false);
/// assert!(!d.supports(Capability::NativeDuration));
/// ```
#[derive(Debug, Clone)]
pub struct StandardDialect {
    alias_prefix: String,
    overrides: BTreeMap<Capability, bool>,
}

impl Default for StandardDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl StandardDialect {
    pub fn new() -> Self {
        Self {
            alias_prefix: DEFAULT_ALIAS_PREFIX.to_string(),
            overrides: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_alias_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.alias_prefix = prefix.into();
        self
    }

    /// Forces a capability on or off.
    #[must_use]
    pub fn with_capability(mut self, capability: Capability, supported: bool) -> Self {
        self.overrides.insert(capability, supported);
        self
    }

    /// Turns every capability off, so that every fallback renders its
    /// emulation.
    #[must_use]
    pub fn emulating_everything(mut self) -> Self {
        for capability in Capability::ALL {
            self.overrides.insert(capability, false);
        }
        self
    }

    const fn default_support(capability: Capability) -> bool {
        match capability {
            Capability::DatePartExtraction
            | Capability::NativeDuration
            | Capability::GroupsFrames
            | Capability::StandardDeviation => true,
            Capability::DateTimeFormatting
            | Capability::NativeSpatial
            | Capability::CaseInsensitiveLike => false,
        }
    }
}

impl Dialect for StandardDialect {
    fn name(&self) -> &'static str {
        "standard"
    }

    fn supports(&self, capability: Capability) -> bool {
        self.overrides
            .get(&capability)
            .copied()
            .unwrap_or_else(|| Self::default_support(capability))
    }

    fn cast_to_text(&self, operand: &str) -> String {
        format!("CAST({operand} AS VARCHAR(4000))")
    }

    fn limit_clause(&self, limit: u64, offset: Option<u64>) -> String {
        match offset {
            Some(offset) => format!("OFFSET {offset} ROWS FETCH FIRST {limit} ROWS ONLY"),
            None => format!("FETCH FIRST {limit} ROWS ONLY"),
        }
    }

    fn alias_prefix(&self) -> &str {
        &self.alias_prefix
    }

    fn max_identifier_length(&self) -> usize {
        128
    }

    fn scalar_function(&self, func: ScalarFunction) -> &'static str {
        match func {
            ScalarFunction::Length => "CHAR_LENGTH",
            ScalarFunction::Substr => "SUBSTRING",
            ScalarFunction::Position => "POSITION",
            other => other.sql_name(),
        }
    }

    fn scalar_call(&self, func: ScalarFunction, args: &[String]) -> String {
        match (func, args) {
            (ScalarFunction::Position, [haystack, needle]) => {
                format!("POSITION({needle} IN {haystack})")
            }
            (ScalarFunction::Substr, [text, start]) => format!("SUBSTRING({text} FROM {start})"),
            (ScalarFunction::Substr, [text, start, len]) => {
                format!("SUBSTRING({text} FROM {start} FOR {len})")
            }
            _ => format!("{}({})", self.scalar_function(func), args.join(", ")),
        }
    }

    fn arithmetic(&self, _family: Family, op: ArithmeticOp, left: &str, right: &str) -> String {
        match op {
            ArithmeticOp::Modulus => format!("MOD({left}, {right})"),
            _ => format!("({left} {} {right})", op.sql_operator()),
        }
    }

    fn duration_literal(&self, period: &Period) -> String {
        format!(
            "(INTERVAL '{}-{}' YEAR TO MONTH + INTERVAL '{} {}:{}:{}' DAY TO SECOND)",
            period.years, period.months, period.days, period.hours, period.minutes, period.seconds
        )
    }
}
