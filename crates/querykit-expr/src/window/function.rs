//! Window function calls.

use crate::node::Node;
use crate::render::RenderContext;

/// A window function.
#[derive(Debug, Clone)]
pub enum WindowFunction {
    /// ROW_NUMBER() - a unique sequential integer per row.
    RowNumber,
    /// RANK() - rank with gaps for ties.
    Rank,
    /// DENSE_RANK() - rank without gaps for ties.
    DenseRank,
    /// PERCENT_RANK() - relative rank of the current row.
    PercentRank,
    /// CUME_DIST() - cumulative distribution.
    CumeDist,
    /// NTILE(n) - distributes rows into n roughly equal groups.
    Ntile(u64),
    /// LAG(expr, offset[, default]) - a previous row's value.
    Lag {
        operand: Node,
        offset: u64,
        /// Omitted from the call when absent, which means null.
        default: Option<Node>,
    },
    /// LEAD(expr, offset[, default]) - a following row's value.
    Lead {
        operand: Node,
        offset: u64,
        default: Option<Node>,
    },
    /// FIRST_VALUE(expr).
    FirstValue(Node),
    /// LAST_VALUE(expr).
    LastValue(Node),
    /// NTH_VALUE(expr, n).
    NthValue(Node, u64),
    /// An aggregate call (SUM, COUNT, ...) used as a window function.
    Aggregate(Node),
}

impl WindowFunction {
    /// A LAG or LEAD default. A null default is the same as none.
    pub(crate) fn offset_default(default: Node) -> Option<Node> {
        (!default.is_null_terminal()).then_some(default)
    }

    pub fn children(&self) -> Vec<&Node> {
        match self {
            Self::RowNumber
            | Self::Rank
            | Self::DenseRank
            | Self::PercentRank
            | Self::CumeDist
            | Self::Ntile(_) => Vec::new(),
            Self::Lag {
                operand, default, ..
            }
            | Self::Lead {
                operand, default, ..
            } => std::iter::once(operand).chain(default.as_ref()).collect(),
            Self::FirstValue(operand)
            | Self::LastValue(operand)
            | Self::NthValue(operand, _)
            | Self::Aggregate(operand) => vec![operand],
        }
    }

    /// Renders the call, without the `OVER` clause.
    pub fn render(&self, ctx: &RenderContext<'_>) -> String {
        let d = ctx.dialect();
        let offset_call = |name: &str, operand: &Node, offset: u64, default: Option<&Node>| {
            let mut args = vec![operand.render(ctx), offset.to_string()];
            if let Some(default) = default {
                args.push(default.render(ctx));
            }
            format!("{name}({})", args.join(", "))
        };
        match self {
            Self::RowNumber => format!("{}()", d.row_number_function()),
            Self::Rank => format!("{}()", d.rank_function()),
            Self::DenseRank => format!("{}()", d.dense_rank_function()),
            Self::PercentRank => format!("{}()", d.percent_rank_function()),
            Self::CumeDist => format!("{}()", d.cume_dist_function()),
            Self::Ntile(n) => format!("{}({n})", d.ntile_function()),
            Self::Lag {
                operand,
                offset,
                default,
            } => offset_call(d.lag_function(), operand, *offset, default.as_ref()),
            Self::Lead {
                operand,
                offset,
                default,
            } => offset_call(d.lead_function(), operand, *offset, default.as_ref()),
            Self::FirstValue(operand) => {
                format!("{}({})", d.first_value_function(), operand.render(ctx))
            }
            Self::LastValue(operand) => {
                format!("{}({})", d.last_value_function(), operand.render(ctx))
            }
            Self::NthValue(operand, n) => {
                format!("{}({}, {n})", d.nth_value_function(), operand.render(ctx))
            }
            Self::Aggregate(call) => call.render(ctx),
        }
    }
}
