//! Window frames.

use querykit_core::{QueryKitError, QueryKitResult};

use crate::fallback::Capability;
use crate::render::RenderContext;

/// The type of window frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowFrameType {
    /// ROWS BETWEEN - frame defined by physical row offsets.
    Rows,
    /// RANGE BETWEEN - frame defined by logical value ranges.
    Range,
    /// GROUPS BETWEEN - frame defined by peer groups.
    Groups,
}

impl WindowFrameType {
    pub const ALL: [Self; 3] = [Self::Rows, Self::Range, Self::Groups];

    /// Returns the SQL keyword.
    pub const fn sql_keyword(self) -> &'static str {
        match self {
            Self::Rows => "ROWS",
            Self::Range => "RANGE",
            Self::Groups => "GROUPS",
        }
    }
}

/// A window frame boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowFrameBound {
    /// UNBOUNDED PRECEDING.
    UnboundedPreceding,
    /// N PRECEDING.
    Preceding(u64),
    /// CURRENT ROW.
    CurrentRow,
    /// N FOLLOWING.
    Following(u64),
    /// UNBOUNDED FOLLOWING.
    UnboundedFollowing,
}

impl WindowFrameBound {
    /// Returns the SQL representation of this bound.
    pub fn to_sql(self) -> String {
        match self {
            Self::UnboundedPreceding => "UNBOUNDED PRECEDING".to_string(),
            Self::Preceding(n) => format!("{n} PRECEDING"),
            Self::CurrentRow => "CURRENT ROW".to_string(),
            Self::Following(n) => format!("{n} FOLLOWING"),
            Self::UnboundedFollowing => "UNBOUNDED FOLLOWING".to_string(),
        }
    }

    /// Position of the bound kind from the start of the partition.
    const fn rank(self) -> u8 {
        match self {
            Self::UnboundedPreceding => 0,
            Self::Preceding(_) => 1,
            Self::CurrentRow => 2,
            Self::Following(_) => 3,
            Self::UnboundedFollowing => 4,
        }
    }

    /// Returns `true` for `n PRECEDING` and `n FOLLOWING`.
    pub const fn is_offset(self) -> bool {
        matches!(self, Self::Preceding(_) | Self::Following(_))
    }
}

/// A window frame: `<type> BETWEEN <start> AND <end>`.
///
/// The end bound never precedes the start bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowFrame {
    frame_type: WindowFrameType,
    start: WindowFrameBound,
    end: WindowFrameBound,
}

impl WindowFrame {
    /// Builds a frame, rejecting bound pairs SQL does not accept.
    pub fn try_new(
        frame_type: WindowFrameType,
        start: WindowFrameBound,
        end: WindowFrameBound,
    ) -> QueryKitResult<Self> {
        use self::WindowFrameBound::{Following, Preceding, UnboundedFollowing, UnboundedPreceding};

        let reason = match (start, end) {
            (UnboundedFollowing, _) => Some("UNBOUNDED FOLLOWING cannot start a frame"),
            (_, UnboundedPreceding) => Some("UNBOUNDED PRECEDING cannot end a frame"),
            (Preceding(n), Preceding(m)) if m > n => Some("end bound precedes start bound"),
            (Following(n), Following(m)) if m < n => Some("end bound precedes start bound"),
            (s, e) if e.rank() < s.rank() => Some("end bound precedes start bound"),
            _ => None,
        };
        match reason {
            Some(reason) => Err(QueryKitError::invalid_frame(
                start.to_sql(),
                end.to_sql(),
                reason,
            )),
            None => Ok(Self {
                frame_type,
                start,
                end,
            }),
        }
    }

    /// A frame whose ordering the caller has already established.
    pub(crate) const fn ordered(
        frame_type: WindowFrameType,
        start: WindowFrameBound,
        end: WindowFrameBound,
    ) -> Self {
        Self {
            frame_type,
            start,
            end,
        }
    }

    pub const fn frame_type(&self) -> WindowFrameType {
        self.frame_type
    }

    pub const fn start(&self) -> WindowFrameBound {
        self.start
    }

    pub const fn end(&self) -> WindowFrameBound {
        self.end
    }

    /// Returns `true` if neither bound is an offset.
    pub const fn is_offset_free(&self) -> bool {
        !self.start.is_offset() && !self.end.is_offset()
    }

    /// Returns the SQL for this frame specification.
    pub fn to_sql(&self) -> String {
        Self::layout(self.frame_type, self.start, self.end)
    }

    fn layout(frame_type: WindowFrameType, start: WindowFrameBound, end: WindowFrameBound) -> String {
        format!(
            "{} BETWEEN {} AND {}",
            frame_type.sql_keyword(),
            start.to_sql(),
            end.to_sql()
        )
    }

    /// Renders for a dialect. Without GROUPS support an offset-free GROUPS
    /// frame is written as the equivalent RANGE frame.
    pub fn render(&self, ctx: &RenderContext<'_>) -> String {
        let d = ctx.dialect();
        if self.frame_type == WindowFrameType::Groups && !d.supports(Capability::GroupsFrames) {
            if self.is_offset_free() {
                tracing::debug!(dialect = d.name(), "GROUPS frame rendered as RANGE");
                return Self::layout(WindowFrameType::Range, self.start, self.end);
            }
            tracing::warn!(
                dialect = d.name(),
                frame = %self.to_sql(),
                "dialect has no GROUPS frames and the frame has offsets; rendering GROUPS"
            );
        }
        self.to_sql()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::StandardDialect;
    use super::WindowFrameBound::{
        CurrentRow, Following, Preceding, UnboundedFollowing, UnboundedPreceding,
    };

    fn rows(start: WindowFrameBound, end: WindowFrameBound) -> QueryKitResult<WindowFrame> {
        WindowFrame::try_new(WindowFrameType::Rows, start, end)
    }

    #[test]
    fn test_window_frame_bound_sql() {
        assert_eq!(UnboundedPreceding.to_sql(), "UNBOUNDED PRECEDING");
        assert_eq!(Preceding(3).to_sql(), "3 PRECEDING");
        assert_eq!(CurrentRow.to_sql(), "CURRENT ROW");
        assert_eq!(Following(2).to_sql(), "2 FOLLOWING");
        assert_eq!(UnboundedFollowing.to_sql(), "UNBOUNDED FOLLOWING");
    }

    #[test]
    fn test_window_frame_rows_sql() {
        let frame = rows(UnboundedPreceding, CurrentRow).unwrap();
        assert_eq!(frame.to_sql(), "ROWS BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW");
    }

    #[test]
    fn test_window_frame_n_preceding_following() {
        let frame = rows(Preceding(5), Following(5)).unwrap();
        assert_eq!(frame.to_sql(), "ROWS BETWEEN 5 PRECEDING AND 5 FOLLOWING");
    }

    #[test]
    fn test_rejects_reversed_bounds() {
        assert!(rows(CurrentRow, Preceding(1)).is_err());
        assert!(rows(Following(1), CurrentRow).is_err());
        assert!(rows(UnboundedFollowing, UnboundedFollowing).is_err());
        assert!(rows(UnboundedPreceding, UnboundedPreceding).is_err());
    }

    #[test]
    fn test_same_direction_offsets() {
        assert!(rows(Preceding(3), Preceding(1)).is_ok());
        assert!(rows(Preceding(3), Preceding(3)).is_ok());
        let err = rows(Preceding(1), Preceding(3)).unwrap_err();
        assert!(matches!(err, QueryKitError::InvalidFrameBound { .. }));
        assert!(rows(Following(1), Following(3)).is_ok());
        assert!(rows(Following(3), Following(1)).is_err());
    }

    #[test]
    fn test_groups_downgrade() {
        let without = StandardDialect::new().with_capability(Capability::GroupsFrames, false);
        let ctx = RenderContext::new(&without);
        let frame = WindowFrame::try_new(WindowFrameType::Groups, UnboundedPreceding, CurrentRow)
            .unwrap();
        assert_eq!(
            frame.render(&ctx),
            "RANGE BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW"
        );
        let offset = WindowFrame::try_new(WindowFrameType::Groups, Preceding(1), CurrentRow)
            .unwrap();
        assert_eq!(offset.render(&ctx), "GROUPS BETWEEN 1 PRECEDING AND CURRENT ROW");

        let with = StandardDialect::new();
        assert_eq!(
            frame.render(&RenderContext::new(&with)),
            "GROUPS BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW"
        );
    }
}
