//! Calendar durations.
//!
//! A [`Period`] keeps its six fields separately (years, months, days, hours,
//! minutes, seconds) instead of collapsing them into a number of seconds,
//! because a month has no fixed length. Dialects without a native interval
//! type store periods as their canonical text, `P<y>Y<m>M<d>D<h>h<n>n<s>s`,
//! which the emulated field accessors slice apart.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use querykit_core::{QueryKitError, QueryKitResult};
use regex::Regex;
use serde::{Deserialize, Serialize};

static CANONICAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^P(-?\d+)Y(-?\d+)M(-?\d+)D(-?\d+)h(-?\d+)n(-?\d+)s$").expect("valid regex")
});

/// The field markers of the canonical text, in order.
///
/// Field `i` sits between marker `i` and marker `i + 1`.
pub const CANONICAL_MARKERS: [&str; 7] = ["P", "Y", "M", "D", "h", "n", "s"];

/// A calendar duration.
///
/// # Examples
///
/// ```
/// use querykit_expr::period::Period;
///
/// let p = Period::new(1, 2, 3, 4, 5, 6);
/// assert_eq!(p.to_canonical(), "P1Y2M3D4h5n6s");
/// assert_eq!("P1Y2M3D4h5n6s".parse::<Period>().unwrap(), p);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    pub years: i64,
    pub months: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

/// One field of a [`Period`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PeriodField {
    Years,
    Months,
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl PeriodField {
    /// All fields, most significant first.
    pub const ALL: [Self; 6] = [
        Self::Years,
        Self::Months,
        Self::Days,
        Self::Hours,
        Self::Minutes,
        Self::Seconds,
    ];

    /// The position of the field in the canonical text.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The marker preceding the field's digits in the canonical text.
    pub const fn opening_marker(self) -> &'static str {
        CANONICAL_MARKERS[self.index()]
    }

    /// The marker following the field's digits in the canonical text.
    pub const fn closing_marker(self) -> &'static str {
        CANONICAL_MARKERS[self.index() + 1]
    }

    /// The SQL interval unit name (`YEAR`, `MONTH`, ...).
    pub const fn sql_unit(self) -> &'static str {
        match self {
            Self::Years => "YEAR",
            Self::Months => "MONTH",
            Self::Days => "DAY",
            Self::Hours => "HOUR",
            Self::Minutes => "MINUTE",
            Self::Seconds => "SECOND",
        }
    }
}

impl Period {
    pub const fn new(
        years: i64,
        months: i64,
        days: i64,
        hours: i64,
        minutes: i64,
        seconds: i64,
    ) -> Self {
        Self {
            years,
            months,
            days,
            hours,
            minutes,
            seconds,
        }
    }

    /// A period of whole days.
    pub const fn days(days: i64) -> Self {
        Self::new(0, 0, days, 0, 0, 0)
    }

    /// A period of whole seconds.
    pub const fn seconds(seconds: i64) -> Self {
        Self::new(0, 0, 0, 0, 0, seconds)
    }

    /// Returns the value of a single field.
    pub const fn field(&self, field: PeriodField) -> i64 {
        match field {
            PeriodField::Years => self.years,
            PeriodField::Months => self.months,
            PeriodField::Days => self.days,
            PeriodField::Hours => self.hours,
            PeriodField::Minutes => self.minutes,
            PeriodField::Seconds => self.seconds,
        }
    }

    /// The canonical text form, `P<y>Y<m>M<d>D<h>h<n>n<s>s`.
    pub fn to_canonical(&self) -> String {
        format!(
            "P{}Y{}M{}D{}h{}n{}s",
            self.years, self.months, self.days, self.hours, self.minutes, self.seconds
        )
    }

    /// Returns `true` if every field is zero.
    pub const fn is_zero(&self) -> bool {
        self.years == 0
            && self.months == 0
            && self.days == 0
            && self.hours == 0
            && self.minutes == 0
            && self.seconds == 0
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_canonical())
    }
}

impl FromStr for Period {
    type Err = QueryKitError;

    fn from_str(s: &str) -> QueryKitResult<Self> {
        let caps = CANONICAL
            .captures(s.trim())
            .ok_or_else(|| QueryKitError::InvalidLiteral(format!("not a period: '{s}'")))?;
        let mut fields = [0_i64; 6];
        for (slot, field) in fields.iter_mut().zip(PeriodField::ALL) {
            let text = &caps[field.index() + 1];
            *slot = text.parse().map_err(|e| {
                QueryKitError::InvalidLiteral(format!("period field {field:?} '{text}': {e}"))
            })?;
        }
        let [years, months, days, hours, minutes, seconds] = fields;
        Ok(Self::new(years, months, days, hours, minutes, seconds))
    }
}

impl From<chrono::Duration> for Period {
    /// Splits an exact duration into days, hours, minutes and seconds.
    ///
    /// Sub-second precision is truncated. Every field carries the sign of
    /// the duration.
    fn from(d: chrono::Duration) -> Self {
        let total = d.num_seconds();
        Self::new(
            0,
            0,
            total / 86_400,
            (total % 86_400) / 3_600,
            (total % 3_600) / 60,
            total % 60,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_text() {
        assert_eq!(Period::new(1, 2, 3, 4, 5, 6).to_canonical(), "P1Y2M3D4h5n6s");
        assert_eq!(Period::default().to_canonical(), "P0Y0M0D0h0n0s");
    }

    #[test]
    fn test_parse_canonical() {
        let p: Period = "P1Y0M-3D0h0n30s".parse().unwrap();
        assert_eq!(p, Period::new(1, 0, -3, 0, 0, 30));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = "1 day".parse::<Period>().unwrap_err();
        assert!(matches!(err, QueryKitError::InvalidLiteral(_)));
        assert!("P1Y2M3D".parse::<Period>().is_err());
    }

    #[test]
    fn test_from_chrono_duration() {
        let p = Period::from(chrono::Duration::seconds(90_061));
        assert_eq!(p, Period::new(0, 0, 1, 1, 1, 1));
    }

    #[test]
    fn test_from_negative_chrono_duration() {
        let p = Period::from(chrono::Duration::seconds(-90));
        assert_eq!(p, Period::new(0, 0, 0, 0, -1, -30));
    }

    #[test]
    fn test_markers() {
        assert_eq!(PeriodField::Years.opening_marker(), "P");
        assert_eq!(PeriodField::Years.closing_marker(), "Y");
        assert_eq!(PeriodField::Seconds.opening_marker(), "n");
        assert_eq!(PeriodField::Seconds.closing_marker(), "s");
    }

    #[test]
    fn test_field_access() {
        let p = Period::new(1, 2, 3, 4, 5, 6);
        let values: Vec<i64> = PeriodField::ALL.iter().map(|f| p.field(*f)).collect();
        assert_eq!(values, vec![1, 2, 3, 4, 5, 6]);
        assert!(!p.is_zero());
        assert!(Period::default().is_zero());
    }
}
