//! Property-based tests for the AST core.
//!
//! These generate random trees and verify the contracts that unit tests
//! only spot-check:
//! 1. Structural equality is reflexive and survives cloning
//! 2. Splicing without unquote sites is a faithful deep copy
//! 3. Splice argument accounting matches the number of unquote sites
//! 4. Traversal enters/leaves symmetrically and honors `Break` exactly

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use elk_ast::{
    traverse_expr, BinaryOp, Expr, ExprKind, Flow, Location, NodeRef, Splice, SpliceArgs,
    UnaryOp, Visitor,
};
use proptest::prelude::*;

fn loc() -> Location {
    Location::synthetic()
}

fn int(n: i64) -> Expr {
    Expr::new(loc(), ExprKind::Int(n))
}

// -- Tree Generation Strategies --

fn leaf_strategy() -> BoxedStrategy<Expr> {
    prop_oneof![
        any::<i64>().prop_map(|n| Expr::new(loc(), ExprKind::Int(n))),
        any::<bool>().prop_map(|b| Expr::new(loc(), ExprKind::Bool(b))),
        Just(Expr::new(loc(), ExprKind::Nil)),
        (-1.0e6f64..1.0e6).prop_map(|x| Expr::new(loc(), ExprKind::Float(x))),
        "[a-z][a-z0-9_]{0,8}"
            .prop_map(|name| Expr::new(loc(), ExprKind::PublicIdent(name.into()))),
        "[a-z][a-z0-9_]{0,8}".prop_map(|name| Expr::new(loc(), ExprKind::Symbol(name.into()))),
        "[a-zA-Z ]{0,12}".prop_map(|text| Expr::new(loc(), ExprKind::String(text.into()))),
    ]
    .boxed()
}

fn binary_op_strategy() -> impl Strategy<Value = BinaryOp> {
    prop::sample::select(vec![
        BinaryOp::Add,
        BinaryOp::Sub,
        BinaryOp::Mul,
        BinaryOp::Div,
        BinaryOp::Pow,
        BinaryOp::Equal,
        BinaryOp::Less,
        BinaryOp::BitAnd,
        BinaryOp::Shl,
    ])
}

fn expr_strategy() -> BoxedStrategy<Expr> {
    leaf_strategy().prop_recursive(4, 48, 4, |inner| {
        prop_oneof![
            (binary_op_strategy(), inner.clone(), inner.clone()).prop_map(|(op, left, right)| {
                Expr::new(
                    loc(),
                    ExprKind::Binary {
                        op,
                        left: Box::new(left),
                        right: Box::new(right),
                    },
                )
            }),
            inner.clone().prop_map(|operand| {
                Expr::new(
                    loc(),
                    ExprKind::Unary {
                        op: UnaryOp::Minus,
                        operand: Box::new(operand),
                    },
                )
            }),
            prop::collection::vec(inner.clone(), 0..4)
                .prop_map(|elements| Expr::new(loc(), ExprKind::List(elements))),
            (inner.clone(), inner).prop_map(|(receiver, key)| {
                Expr::new(
                    loc(),
                    ExprKind::Subscript {
                        receiver: Box::new(receiver),
                        key: Box::new(key),
                    },
                )
            }),
        ]
        .boxed()
    })
    .boxed()
}

// -- Helpers --

#[derive(Default)]
struct Counter {
    entered: usize,
    left: usize,
    break_at: Option<usize>,
}

impl Visitor for Counter {
    fn enter(&mut self, _node: NodeRef<'_>) -> Flow {
        self.entered += 1;
        if self.break_at == Some(self.entered) {
            return Flow::Break;
        }
        Flow::Continue
    }

    fn leave(&mut self, _node: NodeRef<'_>) {
        self.left += 1;
    }
}

fn node_count(expr: &Expr) -> usize {
    let mut counter = Counter::default();
    traverse_expr(expr, &mut counter);
    counter.entered
}

/// Wrap `base` into a template containing exactly `sites` unquote holes.
fn template_with_sites(base: Expr, sites: usize) -> Expr {
    let mut elements: Vec<Expr> = (0..sites)
        .map(|_| {
            Expr::new(
                loc(),
                ExprKind::Unquote {
                    expr: Box::new(Expr::new(loc(), ExprKind::PublicIdent("hole".into()))),
                },
            )
        })
        .collect();
    elements.push(base);
    Expr::new(loc(), ExprKind::List(elements))
}

// -- Properties --

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    /// Equality is reflexive and survives a deep clone.
    #[test]
    fn prop_equality_reflexive(expr in expr_strategy()) {
        prop_assert_eq!(&expr, &expr);
        prop_assert_eq!(&expr, &expr.clone());
    }

    /// Splicing a template with no unquote sites is a faithful deep copy:
    /// structurally equal, argument queue untouched.
    #[test]
    fn prop_splice_is_deep_copy(expr in expr_strategy()) {
        let mut args = SpliceArgs::new([int(1), int(2)]);
        let copy = expr.splice(None, &mut args, false);
        prop_assert_eq!(&copy, &expr);
        prop_assert_eq!(args.remaining(), 2);
    }

    /// Splicing consumes exactly one argument per unquote site, in order;
    /// surplus arguments stay in the queue.
    #[test]
    fn prop_splice_argument_accounting(
        base in expr_strategy(),
        sites in 0usize..5,
        surplus in 0usize..3,
    ) {
        let template = template_with_sites(base, sites);
        let supplied = (0..sites + surplus).map(|i| {
            i64::try_from(i).map(int).unwrap_or_else(|_| int(0))
        });
        let mut args = SpliceArgs::new(supplied);
        let result = template.splice(None, &mut args, false);
        prop_assert_eq!(args.remaining(), surplus);

        // Substitutions are in queue order.
        if let ExprKind::List(elements) = &result.kind {
            for (i, element) in elements.iter().take(sites).enumerate() {
                prop_assert_eq!(element, &int(i64::try_from(i).unwrap_or(0)));
            }
        } else {
            prop_assert!(false, "template root must stay a list");
        }
    }

    /// Without early exit, every entered node is left exactly once.
    #[test]
    fn prop_traversal_is_balanced(expr in expr_strategy()) {
        let mut counter = Counter::default();
        prop_assert_eq!(traverse_expr(&expr, &mut counter), Flow::Continue);
        prop_assert_eq!(counter.entered, counter.left);
    }

    /// Breaking on the k-th entered node enters exactly k nodes.
    #[test]
    fn prop_break_visits_exactly_k(
        (expr, k) in expr_strategy().prop_flat_map(|expr| {
            let total = node_count(&expr);
            (Just(expr), 1..=total)
        })
    ) {
        let mut counter = Counter {
            break_at: Some(k),
            ..Counter::default()
        };
        prop_assert_eq!(traverse_expr(&expr, &mut counter), Flow::Break);
        prop_assert_eq!(counter.entered, k);
    }

    /// Re-rendering a rendered tree is stable: printing is deterministic
    /// and parenthesization decisions do not accumulate.
    #[test]
    fn prop_display_is_deterministic(expr in expr_strategy()) {
        prop_assert_eq!(expr.to_string(), expr.clone().to_string());
    }
}
