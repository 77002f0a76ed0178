//! Generic tree traversal with enter/leave callbacks.
//!
//! [`Visitor::enter`] runs on a node before its children and steers the
//! walk through its [`Flow`] result; [`Visitor::leave`] runs after the
//! children. Children are visited in the order their fields are declared
//! (for a binary expression: left, then right; for a call: receiver, then
//! positional arguments, then named arguments). Consumers doing
//! left-to-right analysis depend on this order.
//!
//! # Early exit
//!
//! - `Break` aborts the whole traversal immediately. `leave` is *not*
//!   invoked on the node that broke, nor on any of its ancestors.
//! - `Skip` suppresses descent into the node's children; `leave` still
//!   runs on the node itself.
//! - `Continue` descends normally.

use crate::ast::{
    Expr, ExprKind, MapElement, MapPatternEntry, NamedArg, ObjectPatternField, Param, Pattern,
    PatternKind, SignatureParam, StringPart, Stmt, StmtKind, SwitchCase, TypeExpr, TypeKind,
    UsingEntry, UsingEntryKind, UsingSubentry,
};
use crate::stack::ensure_sufficient_stack;
use crate::Program;

/// Traversal verdict returned by [`Visitor::enter`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Flow {
    /// Descend into children.
    #[default]
    Continue,
    /// Do not descend; still leave this node.
    Skip,
    /// Abort the whole traversal.
    Break,
}

/// Borrowed reference to any node category.
#[derive(Copy, Clone, Debug)]
pub enum NodeRef<'a> {
    Program(&'a Program),
    Stmt(&'a Stmt),
    Expr(&'a Expr),
    Pattern(&'a Pattern),
    Type(&'a TypeExpr),
    Param(&'a Param),
    SignatureParam(&'a SignatureParam),
    NamedArg(&'a NamedArg),
    MapElement(&'a MapElement),
    StringPart(&'a StringPart),
    SwitchCase(&'a SwitchCase),
    MapPatternEntry(&'a MapPatternEntry),
    ObjectPatternField(&'a ObjectPatternField),
    UsingEntry(&'a UsingEntry),
    UsingSubentry(&'a UsingSubentry),
}

/// Tree visitor. Override `enter` to steer the walk, `leave` to observe
/// nodes after their children.
pub trait Visitor {
    fn enter(&mut self, node: NodeRef<'_>) -> Flow {
        let _ = node;
        Flow::Continue
    }

    fn leave(&mut self, node: NodeRef<'_>) {
        let _ = node;
    }
}

macro_rules! try_flow {
    ($flow:expr) => {
        if $flow == Flow::Break {
            return Flow::Break;
        }
    };
}

/// Run the enter/children/leave protocol for one node.
fn visit<V: Visitor + ?Sized>(
    node: NodeRef<'_>,
    visitor: &mut V,
    children: impl FnOnce(&mut V) -> Flow,
) -> Flow {
    match visitor.enter(node) {
        Flow::Break => return Flow::Break,
        Flow::Skip => {
            visitor.leave(node);
            return Flow::Continue;
        }
        Flow::Continue => {}
    }
    try_flow!(children(visitor));
    visitor.leave(node);
    Flow::Continue
}

pub fn traverse_program<V: Visitor + ?Sized>(program: &Program, visitor: &mut V) -> Flow {
    visit(NodeRef::Program(program), visitor, |v| {
        for stmt in program.body() {
            try_flow!(traverse_stmt(stmt, v));
        }
        Flow::Continue
    })
}

pub fn traverse_stmt<V: Visitor + ?Sized>(stmt: &Stmt, visitor: &mut V) -> Flow {
    visit(NodeRef::Stmt(stmt), visitor, |v| match &stmt.kind {
        StmtKind::Expression(expr) => traverse_expr(expr, v),
        StmtKind::Empty => Flow::Continue,
        StmtKind::Import { path } => traverse_expr(path, v),
        StmtKind::Using(entries) => {
            for entry in entries {
                try_flow!(traverse_using_entry(entry, v));
            }
            Flow::Continue
        }
    })
}

pub fn traverse_expr<V: Visitor + ?Sized>(expr: &Expr, visitor: &mut V) -> Flow {
    ensure_sufficient_stack(|| {
        visit(NodeRef::Expr(expr), visitor, |v| expr_children(expr, v))
    })
}

fn expr_children<V: Visitor + ?Sized>(expr: &Expr, v: &mut V) -> Flow {
    match &expr.kind {
        // Leaves
        ExprKind::Nil
        | ExprKind::Bool(_)
        | ExprKind::Int(_)
        | ExprKind::Float(_)
        | ExprKind::Char(_)
        | ExprKind::String(_)
        | ExprKind::Symbol(_)
        | ExprKind::Regex { .. }
        | ExprKind::PublicIdent(_)
        | ExprKind::PrivateIdent(_)
        | ExprKind::PublicConstant(_)
        | ExprKind::PrivateConstant(_)
        | ExprKind::InstanceVariable(_)
        | ExprKind::SelfLiteral
        | ExprKind::Invalid(_) => Flow::Continue,

        ExprKind::InterpolatedString(parts) => {
            for part in parts {
                try_flow!(traverse_string_part(part, v));
            }
            Flow::Continue
        }
        ExprKind::Range { start, end, .. } => {
            if let Some(start) = start {
                try_flow!(traverse_expr(start, v));
            }
            if let Some(end) = end {
                try_flow!(traverse_expr(end, v));
            }
            Flow::Continue
        }
        ExprKind::ConstantLookup { receiver, name } => {
            if let Some(receiver) = receiver {
                try_flow!(traverse_expr(receiver, v));
            }
            traverse_expr(name, v)
        }

        ExprKind::Binary { left, right, .. } | ExprKind::Logical { left, right, .. } => {
            try_flow!(traverse_expr(left, v));
            traverse_expr(right, v)
        }
        ExprKind::Unary { operand, .. } => traverse_expr(operand, v),
        ExprKind::Assignment { target, value, .. } => {
            try_flow!(traverse_expr(target, v));
            traverse_expr(value, v)
        }
        ExprKind::Modifier { left, right, .. } => {
            try_flow!(traverse_expr(left, v));
            traverse_expr(right, v)
        }

        ExprKind::List(elements) | ExprKind::Tuple(elements) => {
            for element in elements {
                try_flow!(traverse_expr(element, v));
            }
            Flow::Continue
        }
        ExprKind::Map(elements) => {
            for element in elements {
                try_flow!(traverse_map_element(element, v));
            }
            Flow::Continue
        }

        ExprKind::AttributeAccess { receiver, .. } => traverse_expr(receiver, v),
        ExprKind::Subscript { receiver, key } => {
            try_flow!(traverse_expr(receiver, v));
            traverse_expr(key, v)
        }
        ExprKind::MethodCall {
            receiver,
            positional,
            named,
            ..
        } => {
            try_flow!(traverse_expr(receiver, v));
            for arg in positional {
                try_flow!(traverse_expr(arg, v));
            }
            for arg in named {
                try_flow!(traverse_named_arg(arg, v));
            }
            Flow::Continue
        }
        ExprKind::FunctionCall {
            positional, named, ..
        } => {
            for arg in positional {
                try_flow!(traverse_expr(arg, v));
            }
            for arg in named {
                try_flow!(traverse_named_arg(arg, v));
            }
            Flow::Continue
        }
        ExprKind::ConstructorCall {
            class,
            positional,
            named,
        } => {
            try_flow!(traverse_expr(class, v));
            for arg in positional {
                try_flow!(traverse_expr(arg, v));
            }
            for arg in named {
                try_flow!(traverse_named_arg(arg, v));
            }
            Flow::Continue
        }

        ExprKind::If {
            condition,
            then_body,
            else_body,
        } => {
            try_flow!(traverse_expr(condition, v));
            for stmt in then_body {
                try_flow!(traverse_stmt(stmt, v));
            }
            for stmt in else_body {
                try_flow!(traverse_stmt(stmt, v));
            }
            Flow::Continue
        }
        ExprKind::While { condition, body } => {
            try_flow!(traverse_expr(condition, v));
            for stmt in body {
                try_flow!(traverse_stmt(stmt, v));
            }
            Flow::Continue
        }
        ExprKind::Switch {
            value,
            cases,
            else_body,
        } => {
            try_flow!(traverse_expr(value, v));
            for case in cases {
                try_flow!(traverse_switch_case(case, v));
            }
            for stmt in else_body {
                try_flow!(traverse_stmt(stmt, v));
            }
            Flow::Continue
        }
        ExprKind::Break { value, .. } | ExprKind::Return { value } => {
            if let Some(value) = value {
                try_flow!(traverse_expr(value, v));
            }
            Flow::Continue
        }

        ExprKind::VariableDeclaration {
            type_annotation,
            initializer,
            ..
        }
        | ExprKind::ValueDeclaration {
            type_annotation,
            initializer,
            ..
        } => {
            if let Some(ty) = type_annotation {
                try_flow!(traverse_type(ty, v));
            }
            if let Some(init) = initializer {
                try_flow!(traverse_expr(init, v));
            }
            Flow::Continue
        }
        ExprKind::ConstantDeclaration {
            type_annotation,
            initializer,
            ..
        } => {
            if let Some(ty) = type_annotation {
                try_flow!(traverse_type(ty, v));
            }
            traverse_expr(initializer, v)
        }
        ExprKind::MethodDefinition {
            params,
            return_type,
            body,
            ..
        } => {
            for param in params {
                try_flow!(traverse_param(param, v));
            }
            if let Some(ty) = return_type {
                try_flow!(traverse_type(ty, v));
            }
            for stmt in body {
                try_flow!(traverse_stmt(stmt, v));
            }
            Flow::Continue
        }
        ExprKind::SignatureDefinition {
            params,
            return_type,
            ..
        } => {
            for param in params {
                try_flow!(traverse_signature_param(param, v));
            }
            if let Some(ty) = return_type {
                try_flow!(traverse_type(ty, v));
            }
            Flow::Continue
        }
        ExprKind::ClassDeclaration {
            constant,
            superclass,
            body,
        } => {
            try_flow!(traverse_expr(constant, v));
            if let Some(superclass) = superclass {
                try_flow!(traverse_expr(superclass, v));
            }
            for stmt in body {
                try_flow!(traverse_stmt(stmt, v));
            }
            Flow::Continue
        }
        ExprKind::ModuleDeclaration { constant, body } => {
            try_flow!(traverse_expr(constant, v));
            for stmt in body {
                try_flow!(traverse_stmt(stmt, v));
            }
            Flow::Continue
        }

        ExprKind::Quote { body } | ExprKind::MacroBoundary { body, .. } => {
            for stmt in body {
                try_flow!(traverse_stmt(stmt, v));
            }
            Flow::Continue
        }
        ExprKind::Unquote { expr } => traverse_expr(expr, v),
    }
}

pub fn traverse_pattern<V: Visitor + ?Sized>(pattern: &Pattern, visitor: &mut V) -> Flow {
    ensure_sufficient_stack(|| {
        visit(NodeRef::Pattern(pattern), visitor, |v| match &pattern.kind {
            PatternKind::Expression(expr) => traverse_expr(expr, v),
            PatternKind::As { pattern, name } => {
                try_flow!(traverse_pattern(pattern, v));
                traverse_expr(name, v)
            }
            PatternKind::Or { left, right } | PatternKind::And { left, right } => {
                try_flow!(traverse_pattern(left, v));
                traverse_pattern(right, v)
            }
            PatternKind::Range { start, end, .. } => {
                if let Some(start) = start {
                    try_flow!(traverse_expr(start, v));
                }
                if let Some(end) = end {
                    try_flow!(traverse_expr(end, v));
                }
                Flow::Continue
            }
            PatternKind::List(elements) | PatternKind::Tuple(elements) => {
                for element in elements {
                    try_flow!(traverse_pattern(element, v));
                }
                Flow::Continue
            }
            PatternKind::Rest(_) => Flow::Continue,
            PatternKind::Map(entries) => {
                for entry in entries {
                    try_flow!(traverse_map_pattern_entry(entry, v));
                }
                Flow::Continue
            }
            PatternKind::Object { class, fields } => {
                try_flow!(traverse_expr(class, v));
                for field in fields {
                    try_flow!(traverse_object_pattern_field(field, v));
                }
                Flow::Continue
            }
        })
    })
}

pub fn traverse_type<V: Visitor + ?Sized>(ty: &TypeExpr, visitor: &mut V) -> Flow {
    visit(NodeRef::Type(ty), visitor, |v| match &ty.kind {
        TypeKind::Constant(expr) | TypeKind::Literal(expr) => traverse_expr(expr, v),
        TypeKind::Union { left, right } | TypeKind::Intersection { left, right } => {
            try_flow!(traverse_type(left, v));
            traverse_type(right, v)
        }
        TypeKind::Nilable(inner) => traverse_type(inner, v),
    })
}

pub fn traverse_param<V: Visitor + ?Sized>(param: &Param, visitor: &mut V) -> Flow {
    visit(NodeRef::Param(param), visitor, |v| {
        if let Some(ty) = &param.type_annotation {
            try_flow!(traverse_type(ty, v));
        }
        if let Some(default) = &param.default {
            try_flow!(traverse_expr(default, v));
        }
        Flow::Continue
    })
}

pub fn traverse_signature_param<V: Visitor + ?Sized>(
    param: &SignatureParam,
    visitor: &mut V,
) -> Flow {
    visit(NodeRef::SignatureParam(param), visitor, |v| {
        if let Some(ty) = &param.type_annotation {
            try_flow!(traverse_type(ty, v));
        }
        Flow::Continue
    })
}

pub fn traverse_named_arg<V: Visitor + ?Sized>(arg: &NamedArg, visitor: &mut V) -> Flow {
    visit(NodeRef::NamedArg(arg), visitor, |v| {
        traverse_expr(&arg.value, v)
    })
}

pub fn traverse_map_element<V: Visitor + ?Sized>(element: &MapElement, visitor: &mut V) -> Flow {
    visit(NodeRef::MapElement(element), visitor, |v| match element {
        MapElement::KeyValue { key, value } => {
            try_flow!(traverse_expr(key, v));
            traverse_expr(value, v)
        }
        MapElement::SymbolKeyValue { value, .. } => traverse_expr(value, v),
        MapElement::Shorthand(_) => Flow::Continue,
    })
}

pub fn traverse_string_part<V: Visitor + ?Sized>(part: &StringPart, visitor: &mut V) -> Flow {
    visit(NodeRef::StringPart(part), visitor, |v| match part {
        StringPart::Text(_) => Flow::Continue,
        StringPart::Interpolation(expr) => traverse_expr(expr, v),
    })
}

pub fn traverse_switch_case<V: Visitor + ?Sized>(case: &SwitchCase, visitor: &mut V) -> Flow {
    visit(NodeRef::SwitchCase(case), visitor, |v| {
        try_flow!(traverse_pattern(&case.pattern, v));
        for stmt in &case.body {
            try_flow!(traverse_stmt(stmt, v));
        }
        Flow::Continue
    })
}

pub fn traverse_map_pattern_entry<V: Visitor + ?Sized>(
    entry: &MapPatternEntry,
    visitor: &mut V,
) -> Flow {
    visit(NodeRef::MapPatternEntry(entry), visitor, |v| {
        if let Some(value) = &entry.value {
            try_flow!(traverse_pattern(value, v));
        }
        Flow::Continue
    })
}

pub fn traverse_object_pattern_field<V: Visitor + ?Sized>(
    field: &ObjectPatternField,
    visitor: &mut V,
) -> Flow {
    visit(NodeRef::ObjectPatternField(field), visitor, |v| {
        traverse_pattern(&field.pattern, v)
    })
}

pub fn traverse_using_entry<V: Visitor + ?Sized>(entry: &UsingEntry, visitor: &mut V) -> Flow {
    visit(NodeRef::UsingEntry(entry), visitor, |v| match &entry.kind {
        UsingEntryKind::Constant { path, .. } => traverse_expr(path, v),
        UsingEntryKind::Star { namespace } => traverse_expr(namespace, v),
        UsingEntryKind::Subentries { namespace, entries } => {
            try_flow!(traverse_expr(namespace, v));
            for subentry in entries {
                try_flow!(traverse_using_subentry(subentry, v));
            }
            Flow::Continue
        }
    })
}

pub fn traverse_using_subentry<V: Visitor + ?Sized>(
    subentry: &UsingSubentry,
    visitor: &mut V,
) -> Flow {
    visit(NodeRef::UsingSubentry(subentry), visitor, |_| Flow::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOp, ExprKind};
    use crate::{Expr, Location};

    fn loc() -> Location {
        Location::synthetic()
    }

    fn int(n: i64) -> Expr {
        Expr::new(loc(), ExprKind::Int(n))
    }

    fn ident(name: &str) -> Expr {
        Expr::new(loc(), ExprKind::PublicIdent(name.into()))
    }

    fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
        Expr::new(
            loc(),
            ExprKind::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
        )
    }

    /// `foo(1, 2, a: 3, b: 4)`
    fn call_with_mixed_args() -> Expr {
        Expr::new(
            loc(),
            ExprKind::FunctionCall {
                name: "foo".into(),
                positional: vec![int(1), int(2)],
                named: vec![
                    NamedArg::new(loc(), "a", int(3)),
                    NamedArg::new(loc(), "b", int(4)),
                ],
            },
        )
    }

    /// Collects a label per entered node, in visit order.
    #[derive(Default)]
    struct Tracer {
        entered: Vec<String>,
        left: Vec<String>,
        break_at: Option<usize>,
        skip_at: Option<usize>,
    }

    fn label(node: NodeRef<'_>) -> String {
        match node {
            NodeRef::Expr(expr) => format!("{:?}", expr.kind).chars().take(12).collect(),
            NodeRef::Stmt(_) => "stmt".into(),
            NodeRef::NamedArg(arg) => format!("arg:{}", arg.name),
            other => format!("{other:?}").chars().take(8).collect(),
        }
    }

    impl Visitor for Tracer {
        fn enter(&mut self, node: NodeRef<'_>) -> Flow {
            self.entered.push(label(node));
            if self.break_at == Some(self.entered.len()) {
                return Flow::Break;
            }
            if self.skip_at == Some(self.entered.len()) {
                return Flow::Skip;
            }
            Flow::Continue
        }

        fn leave(&mut self, node: NodeRef<'_>) {
            self.left.push(label(node));
        }
    }

    #[test]
    fn binary_children_visit_left_then_right() {
        let expr = binary(BinaryOp::Add, int(1), int(2));
        let mut tracer = Tracer::default();
        assert_eq!(traverse_expr(&expr, &mut tracer), Flow::Continue);
        assert_eq!(tracer.entered, ["Binary(+, In", "Int(1)", "Int(2)"]);
        // Leave order is children first, parent last.
        assert_eq!(tracer.left, ["Int(1)", "Int(2)", "Binary(+, In"]);
    }

    #[test]
    fn call_visits_receiverless_args_in_source_order() {
        let expr = call_with_mixed_args();
        let mut tracer = Tracer::default();
        traverse_expr(&expr, &mut tracer);
        assert_eq!(
            tracer.entered,
            [
                "FunctionCall",
                "Int(1)",
                "Int(2)",
                "arg:a",
                "Int(3)",
                "arg:b",
                "Int(4)",
            ]
        );
    }

    #[test]
    fn break_stops_after_k_nodes() {
        // Property: breaking on the k-th entered node enters exactly k.
        let trees = [
            binary(BinaryOp::Add, int(1), binary(BinaryOp::Mul, int(2), int(3))),
            call_with_mixed_args(),
            Expr::new(
                loc(),
                ExprKind::If {
                    condition: Box::new(ident("cond")),
                    then_body: vec![crate::Stmt::expression(int(1))],
                    else_body: vec![crate::Stmt::expression(Expr::new(
                        loc(),
                        ExprKind::If {
                            condition: Box::new(ident("other")),
                            then_body: vec![crate::Stmt::expression(int(2))],
                            else_body: vec![],
                        },
                    ))],
                },
            ),
        ];

        for tree in &trees {
            let mut full = Tracer::default();
            traverse_expr(tree, &mut full);
            let total = full.entered.len();

            for k in 1..=total {
                let mut tracer = Tracer {
                    break_at: Some(k),
                    ..Tracer::default()
                };
                assert_eq!(traverse_expr(tree, &mut tracer), Flow::Break);
                assert_eq!(tracer.entered.len(), k, "break at node {k} of {total}");
            }
        }
    }

    #[test]
    fn break_suppresses_leave_on_broken_node_and_ancestors() {
        let expr = binary(BinaryOp::Add, int(1), int(2));
        let mut tracer = Tracer {
            break_at: Some(2), // the left child
            ..Tracer::default()
        };
        assert_eq!(traverse_expr(&expr, &mut tracer), Flow::Break);
        assert!(tracer.left.is_empty());
    }

    #[test]
    fn skip_suppresses_children_but_leaves_the_node() {
        let expr = binary(
            BinaryOp::Add,
            binary(BinaryOp::Mul, int(1), int(2)),
            int(3),
        );
        let mut tracer = Tracer {
            skip_at: Some(2), // the multiplication
            ..Tracer::default()
        };
        assert_eq!(traverse_expr(&expr, &mut tracer), Flow::Continue);
        // 1 and 2 are never entered; the skipped node is still left.
        assert_eq!(tracer.entered, ["Binary(+, In", "Binary(*, In", "Int(3)"]);
        assert_eq!(tracer.left, ["Binary(*, In", "Int(3)", "Binary(+, In"]);
    }

    #[test]
    fn absent_optional_children_are_not_visited() {
        let expr = Expr::new(
            loc(),
            ExprKind::Range {
                op: crate::ast::RangeOp::Closed,
                start: None,
                end: Some(Box::new(int(5))),
            },
        );
        let mut tracer = Tracer::default();
        traverse_expr(&expr, &mut tracer);
        assert_eq!(tracer.entered.len(), 2); // range + end only
    }

    #[test]
    fn deeply_nested_trees_do_not_overflow() {
        let mut expr = int(0);
        for _ in 0..10_000 {
            expr = Expr::new(
                loc(),
                ExprKind::Unary {
                    op: crate::ast::UnaryOp::Minus,
                    operand: Box::new(expr),
                },
            );
        }
        let mut tracer = Tracer::default();
        assert_eq!(traverse_expr(&expr, &mut tracer), Flow::Continue);
        assert_eq!(tracer.entered.len(), 10_001);
        // Unwind the chain iteratively; a derived drop would recurse as
        // deep as the tree.
        let mut current = expr;
        while let ExprKind::Unary { operand, .. } = current.kind {
            current = *operand;
        }
    }
}
