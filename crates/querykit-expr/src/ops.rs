//! Operator identities.
//!
//! Nodes name their operation with one of these enums; the dialect decides
//! how each one is spelled.

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Eq,
    NotEq,
    Lt,
    Le,
    Gt,
    Ge,
    /// Pattern match (`LIKE`).
    Like,
}

impl CompareOp {
    /// Returns the SQL operator.
    pub const fn sql_operator(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::NotEq => "<>",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Like => "LIKE",
        }
    }

    /// The operator that gives the same result with the operands swapped.
    pub const fn swapped(self) -> Self {
        match self {
            Self::Lt => Self::Gt,
            Self::Le => Self::Ge,
            Self::Gt => Self::Lt,
            Self::Ge => Self::Le,
            other => other,
        }
    }
}

/// Arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithmeticOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulus,
}

impl ArithmeticOp {
    pub const fn sql_operator(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulus => "%",
        }
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// Logical `NOT`.
    Not,
    /// Arithmetic negation.
    Negate,
}

/// N-ary boolean connectives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalOp {
    And,
    Or,
}

impl LogicalOp {
    pub const fn sql_keyword(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

/// Portable scalar functions.
///
/// Most of these share a name across dialects; the ones that do not are
/// spelled by [`Dialect::scalar_function`](crate::dialect::Dialect::scalar_function)
/// or laid out by [`Dialect::scalar_call`](crate::dialect::Dialect::scalar_call).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarFunction {
    Abs,
    Round,
    Sqrt,
    Lower,
    Upper,
    Trim,
    Length,
    /// `SUBSTR(text, start[, length])`, 1-based.
    Substr,
    /// 1-based position of the second argument inside the first, 0 if absent.
    Position,
    Replace,
    Coalesce,
    Greatest,
    Least,
}

impl ScalarFunction {
    /// The most common spelling of the function.
    pub const fn sql_name(self) -> &'static str {
        match self {
            Self::Abs => "ABS",
            Self::Round => "ROUND",
            Self::Sqrt => "SQRT",
            Self::Lower => "LOWER",
            Self::Upper => "UPPER",
            Self::Trim => "TRIM",
            Self::Length => "LENGTH",
            Self::Substr => "SUBSTR",
            Self::Position => "INSTR",
            Self::Replace => "REPLACE",
            Self::Coalesce => "COALESCE",
            Self::Greatest => "GREATEST",
            Self::Least => "LEAST",
        }
    }
}

/// Target types of a cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastTarget {
    Text,
    Integer,
    Real,
}

/// A field of a date-time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatePart {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

impl DatePart {
    pub const fn sql_unit(self) -> &'static str {
        match self {
            Self::Year => "YEAR",
            Self::Month => "MONTH",
            Self::Day => "DAY",
            Self::Hour => "HOUR",
            Self::Minute => "MINUTE",
            Self::Second => "SECOND",
        }
    }

    /// The 1-based start and the length of the field in the canonical
    /// `YYYY-MM-DD HH:MM:SS` text.
    pub const fn canonical_slice(self) -> (i64, i64) {
        match self {
            Self::Year => (1, 4),
            Self::Month => (6, 2),
            Self::Day => (9, 2),
            Self::Hour => (12, 2),
            Self::Minute => (15, 2),
            Self::Second => (18, 2),
        }
    }
}

/// Operations whose spelling is entirely up to the dialect.
///
/// These are the native halves of the capability fallbacks; the dialect
/// transform for each receives the rendered arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeOp {
    DatePart(DatePart),
    FormatDateTime,
    PeriodField(crate::period::PeriodField),
    PeriodCompare(CompareOp),
    PointX,
    PointY,
    PointEquals,
    LikeIgnoreCase,
}

impl NativeOp {
    /// Returns `true` for operations producing a boolean from two operands.
    pub const fn is_predicate(self) -> bool {
        matches!(
            self,
            Self::PeriodCompare(_) | Self::PointEquals | Self::LikeIgnoreCase
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_sql_operators() {
        assert_eq!(CompareOp::Eq.sql_operator(), "=");
        assert_eq!(CompareOp::NotEq.sql_operator(), "<>");
        assert_eq!(CompareOp::Le.sql_operator(), "<=");
        assert_eq!(CompareOp::Like.sql_operator(), "LIKE");
    }

    #[test]
    fn test_compare_swapped() {
        assert_eq!(CompareOp::Lt.swapped(), CompareOp::Gt);
        assert_eq!(CompareOp::Ge.swapped(), CompareOp::Le);
        assert_eq!(CompareOp::Eq.swapped(), CompareOp::Eq);
    }

    #[test]
    fn test_date_part_slices() {
        assert_eq!(DatePart::Year.canonical_slice(), (1, 4));
        assert_eq!(DatePart::Second.canonical_slice(), (18, 2));
        assert_eq!(DatePart::Minute.sql_unit(), "MINUTE");
    }

    #[test]
    fn test_native_predicates() {
        assert!(NativeOp::PointEquals.is_predicate());
        assert!(NativeOp::PeriodCompare(CompareOp::Lt).is_predicate());
        assert!(!NativeOp::PointX.is_predicate());
        assert!(!NativeOp::DatePart(DatePart::Year).is_predicate());
    }
}
