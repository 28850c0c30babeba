//! Property-based tests using proptest.
//!
//! - A clone renders exactly like the original, for every dialect setting
//! - A null operand anywhere in a chain of value operators nulls the chain
//! - The frame validator accepts exactly the ordered bound pairs

use proptest::prelude::*;
use querykit_expr::dialect::StandardDialect;
use querykit_expr::fallback::Capability;
use querykit_expr::kind::Integer;
use querykit_expr::relation::RelationRef;
use querykit_expr::typed::Expr;
use querykit_expr::window::{WindowFrame, WindowFrameBound, WindowFrameType};
use querykit_expr::SqlExpression;

#[derive(Debug, Clone, Copy)]
enum Step {
    Plus(i64),
    Minus(i64),
    Times(i64),
    Modulus(i64),
    Negate,
    Abs,
    PlusNull,
}

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        (-100i64..100).prop_map(Step::Plus),
        (-100i64..100).prop_map(Step::Minus),
        (-100i64..100).prop_map(Step::Times),
        (1i64..100).prop_map(Step::Modulus),
        Just(Step::Negate),
        Just(Step::Abs),
        Just(Step::PlusNull),
    ]
}

fn column(name: &str) -> Expr<Integer> {
    Expr::column(&RelationRef::new("t"), name)
}

fn apply(expr: &Expr<Integer>, step: Step) -> Expr<Integer> {
    match step {
        Step::Plus(n) => expr.plus(n),
        Step::Minus(n) => expr.minus(n),
        Step::Times(n) => expr.times(n),
        Step::Modulus(n) => expr.modulus(n),
        Step::Negate => expr.negated(),
        Step::Abs => expr.abs(),
        Step::PlusNull => expr.plus(Expr::<Integer>::null()),
    }
}

fn build(steps: &[Step]) -> Expr<Integer> {
    steps.iter().fold(column("a"), |acc, step| apply(&acc, *step))
}

fn arb_capability_set() -> impl Strategy<Value = StandardDialect> {
    prop::collection::vec(any::<bool>(), Capability::ALL.len()).prop_map(|flags| {
        Capability::ALL
            .iter()
            .zip(flags)
            .fold(StandardDialect::new(), |d, (cap, on)| d.with_capability(*cap, on))
    })
}

fn arb_bound() -> impl Strategy<Value = WindowFrameBound> {
    prop_oneof![
        Just(WindowFrameBound::UnboundedPreceding),
        (0u64..5).prop_map(WindowFrameBound::Preceding),
        Just(WindowFrameBound::CurrentRow),
        (0u64..5).prop_map(WindowFrameBound::Following),
        Just(WindowFrameBound::UnboundedFollowing),
    ]
}

/// Position of a bound on the partition axis; ties only between equal bounds.
fn position(bound: WindowFrameBound) -> (u8, i64) {
    match bound {
        WindowFrameBound::UnboundedPreceding => (0, 0),
        WindowFrameBound::Preceding(n) => (1, -i64::try_from(n).unwrap()),
        WindowFrameBound::CurrentRow => (2, 0),
        WindowFrameBound::Following(n) => (3, i64::try_from(n).unwrap()),
        WindowFrameBound::UnboundedFollowing => (4, 0),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_clone_renders_identically(
        steps in prop::collection::vec(arb_step(), 0..12),
        dialect in arb_capability_set(),
    ) {
        let expr = build(&steps).is_greater_than(column("b"));
        let copy = expr.deep_clone();
        prop_assert_eq!(copy.to_sql(&dialect), expr.to_sql(&dialect));
        prop_assert_eq!(copy.requires_null_guard(), expr.requires_null_guard());
        prop_assert_eq!(copy.referenced_relations(), expr.referenced_relations());
    }

    #[test]
    fn prop_null_operand_nulls_the_chain(
        before in prop::collection::vec(arb_step(), 0..6),
        after in prop::collection::vec(arb_step(), 0..6),
    ) {
        let d = StandardDialect::new();
        let mut steps = before.clone();
        steps.push(Step::PlusNull);
        steps.extend(after.iter().copied());
        let chain = build(&steps);

        prop_assert!(chain.node().is_null_terminal());
        prop_assert_eq!(chain.to_sql(&d), "NULL");
        prop_assert_eq!(
            column("b").is_greater_than(chain).to_sql(&d),
            "(\"t\".\"b\" IS NULL)"
        );
    }

    #[test]
    fn prop_chain_without_null_renders_operators(
        steps in prop::collection::vec(arb_step(), 1..8),
    ) {
        prop_assume!(steps.iter().all(|s| !matches!(s, Step::PlusNull)));
        let chain = build(&steps);
        prop_assert!(!chain.requires_null_guard());
        prop_assert_ne!(chain.to_sql(&StandardDialect::new()), "NULL");
    }

    #[test]
    fn prop_frame_validation_matches_bound_order(
        frame_type in prop::sample::select(WindowFrameType::ALL.to_vec()),
        start in arb_bound(),
        end in arb_bound(),
    ) {
        let legal = start != WindowFrameBound::UnboundedFollowing
            && end != WindowFrameBound::UnboundedPreceding
            && position(end) >= position(start);
        let frame = WindowFrame::try_new(frame_type, start, end);
        prop_assert_eq!(frame.is_ok(), legal);
        if let Ok(frame) = frame {
            prop_assert_eq!(
                frame.to_sql(),
                format!("{} BETWEEN {} AND {}", frame_type.sql_keyword(), start.to_sql(), end.to_sql())
            );
        }
    }
}
