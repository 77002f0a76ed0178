//! Quasi-quotation: instantiating quoted templates.
//!
//! A `quote ... end` block captures its body as data; `unquote(expr)`
//! marks substitution points inside it. [`Splice::splice`] walks a
//! template and builds a structurally fresh tree, consuming one
//! replacement expression from a [`SpliceArgs`] cursor per `Unquote` site,
//! in traversal order. The original template is never mutated and shares
//! no nodes with the result, so one template can be instantiated any
//! number of times.
//!
//! Location handling is delegated to [`Location::spliced`]: substituted
//! subtrees keep their own ranges but are re-rooted under the unquote
//! site, giving diagnostics an "expanded from" trail.
//!
//! # Argument accounting
//!
//! Exhausting the cursor at an `Unquote` site panics: quote/unquote
//! balance is a static property the macro expander must have verified
//! before calling in. Surplus arguments are left unconsumed; callers that
//! care inspect [`SpliceArgs::remaining`] afterwards.

use std::collections::VecDeque;

use crate::ast::{
    Expr, ExprKind, MapElement, MapPatternEntry, NamedArg, ObjectPatternField, Param, Pattern,
    PatternKind, SignatureParam, StringPart, Stmt, StmtKind, SwitchCase, TypeExpr, TypeKind,
    UsingEntry, UsingEntryKind, UsingSubentry,
};
use crate::stack::ensure_sufficient_stack;
use crate::{Located, Location, Program, Token};

/// Ordered cursor over the replacement expressions of one instantiation.
///
/// Consumption is FIFO and single-pass; the cursor is threaded by `&mut`
/// through the whole splice so every `Unquote` site takes the next
/// replacement in traversal order.
#[derive(Debug, Default)]
pub struct SpliceArgs {
    items: VecDeque<Expr>,
}

impl SpliceArgs {
    pub fn new(items: impl IntoIterator<Item = Expr>) -> Self {
        SpliceArgs {
            items: items.into_iter().collect(),
        }
    }

    /// Replacements not yet consumed.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn next(&mut self) -> Expr {
        self.items.pop_front().unwrap_or_else(|| {
            panic!("too few unquote arguments: template has more unquote sites than replacements")
        })
    }
}

/// Deep-copy-with-substitution over one node category.
pub trait Splice {
    /// Build a fresh copy of `self` with every reachable `Unquote` site
    /// replaced by the next argument. See the module docs for the
    /// location contract.
    #[must_use]
    fn splice(&self, target: Option<&Location>, args: &mut SpliceArgs, unquote: bool) -> Self;
}

impl<T: Splice> Splice for Box<T> {
    fn splice(&self, target: Option<&Location>, args: &mut SpliceArgs, unquote: bool) -> Self {
        Box::new((**self).splice(target, args, unquote))
    }
}

impl<T: Splice> Splice for Option<T> {
    fn splice(&self, target: Option<&Location>, args: &mut SpliceArgs, unquote: bool) -> Self {
        self.as_ref().map(|node| node.splice(target, args, unquote))
    }
}

impl<T: Splice> Splice for Vec<T> {
    fn splice(&self, target: Option<&Location>, args: &mut SpliceArgs, unquote: bool) -> Self {
        self.iter()
            .map(|node| node.splice(target, args, unquote))
            .collect()
    }
}

impl Splice for Expr {
    fn splice(&self, target: Option<&Location>, args: &mut SpliceArgs, unquote: bool) -> Self {
        ensure_sufficient_stack(|| {
            // An unquote site contributes nothing of its own: the next
            // replacement is spliced in its place, re-rooted under the
            // site so provenance chains survive arbitrary nesting.
            if matches!(self.kind, ExprKind::Unquote { .. }) {
                let replacement = args.next();
                tracing::trace!(
                    remaining = args.remaining(),
                    site = %self.location(),
                    "substituting unquote site"
                );
                let site = Location::spliced(target, self.location(), unquote);
                return replacement.splice(Some(&site), args, true);
            }

            let location = Location::spliced(target, self.location(), unquote);
            let kind = splice_expr_kind(&self.kind, target, args, unquote);
            Expr::new(location, kind)
        })
    }
}

fn splice_expr_kind(
    kind: &ExprKind,
    target: Option<&Location>,
    args: &mut SpliceArgs,
    unquote: bool,
) -> ExprKind {
    match kind {
        // Leaves are copied wholesale.
        ExprKind::Nil => ExprKind::Nil,
        ExprKind::Bool(b) => ExprKind::Bool(*b),
        ExprKind::Int(n) => ExprKind::Int(*n),
        ExprKind::Float(x) => ExprKind::Float(*x),
        ExprKind::Char(c) => ExprKind::Char(*c),
        ExprKind::String(s) => ExprKind::String(s.clone()),
        ExprKind::Symbol(s) => ExprKind::Symbol(s.clone()),
        ExprKind::Regex { pattern, flags } => ExprKind::Regex {
            pattern: pattern.clone(),
            flags: *flags,
        },
        ExprKind::PublicIdent(n) => ExprKind::PublicIdent(n.clone()),
        ExprKind::PrivateIdent(n) => ExprKind::PrivateIdent(n.clone()),
        ExprKind::PublicConstant(n) => ExprKind::PublicConstant(n.clone()),
        ExprKind::PrivateConstant(n) => ExprKind::PrivateConstant(n.clone()),
        ExprKind::InstanceVariable(n) => ExprKind::InstanceVariable(n.clone()),
        ExprKind::SelfLiteral => ExprKind::SelfLiteral,
        ExprKind::Invalid(token) => ExprKind::Invalid(Token::new(
            Location::spliced(target, token.location(), unquote),
            token.lexeme(),
        )),

        ExprKind::InterpolatedString(parts) => {
            ExprKind::InterpolatedString(parts.splice(target, args, unquote))
        }
        ExprKind::Range { op, start, end } => ExprKind::Range {
            op: *op,
            start: start.splice(target, args, unquote),
            end: end.splice(target, args, unquote),
        },
        ExprKind::ConstantLookup { receiver, name } => ExprKind::ConstantLookup {
            receiver: receiver.splice(target, args, unquote),
            name: name.splice(target, args, unquote),
        },

        ExprKind::Binary { op, left, right } => ExprKind::Binary {
            op: *op,
            left: left.splice(target, args, unquote),
            right: right.splice(target, args, unquote),
        },
        ExprKind::Logical { op, left, right } => ExprKind::Logical {
            op: *op,
            left: left.splice(target, args, unquote),
            right: right.splice(target, args, unquote),
        },
        ExprKind::Unary { op, operand } => ExprKind::Unary {
            op: *op,
            operand: operand.splice(target, args, unquote),
        },
        ExprKind::Assignment { op, target: lhs, value } => ExprKind::Assignment {
            op: *op,
            target: lhs.splice(target, args, unquote),
            value: value.splice(target, args, unquote),
        },
        ExprKind::Modifier {
            keyword,
            left,
            right,
        } => ExprKind::Modifier {
            keyword: *keyword,
            left: left.splice(target, args, unquote),
            right: right.splice(target, args, unquote),
        },

        ExprKind::List(elements) => ExprKind::List(elements.splice(target, args, unquote)),
        ExprKind::Tuple(elements) => ExprKind::Tuple(elements.splice(target, args, unquote)),
        ExprKind::Map(elements) => ExprKind::Map(elements.splice(target, args, unquote)),

        ExprKind::AttributeAccess { receiver, name } => ExprKind::AttributeAccess {
            receiver: receiver.splice(target, args, unquote),
            name: name.clone(),
        },
        ExprKind::Subscript { receiver, key } => ExprKind::Subscript {
            receiver: receiver.splice(target, args, unquote),
            key: key.splice(target, args, unquote),
        },
        ExprKind::MethodCall {
            receiver,
            op,
            name,
            positional,
            named,
        } => ExprKind::MethodCall {
            receiver: receiver.splice(target, args, unquote),
            op: *op,
            name: name.clone(),
            positional: positional.splice(target, args, unquote),
            named: named.splice(target, args, unquote),
        },
        ExprKind::FunctionCall {
            name,
            positional,
            named,
        } => ExprKind::FunctionCall {
            name: name.clone(),
            positional: positional.splice(target, args, unquote),
            named: named.splice(target, args, unquote),
        },
        ExprKind::ConstructorCall {
            class,
            positional,
            named,
        } => ExprKind::ConstructorCall {
            class: class.splice(target, args, unquote),
            positional: positional.splice(target, args, unquote),
            named: named.splice(target, args, unquote),
        },

        ExprKind::If {
            condition,
            then_body,
            else_body,
        } => ExprKind::If {
            condition: condition.splice(target, args, unquote),
            then_body: then_body.splice(target, args, unquote),
            else_body: else_body.splice(target, args, unquote),
        },
        ExprKind::While { condition, body } => ExprKind::While {
            condition: condition.splice(target, args, unquote),
            body: body.splice(target, args, unquote),
        },
        ExprKind::Switch {
            value,
            cases,
            else_body,
        } => ExprKind::Switch {
            value: value.splice(target, args, unquote),
            cases: cases.splice(target, args, unquote),
            else_body: else_body.splice(target, args, unquote),
        },
        ExprKind::Break { label, value } => ExprKind::Break {
            label: label.clone(),
            value: value.splice(target, args, unquote),
        },
        ExprKind::Return { value } => ExprKind::Return {
            value: value.splice(target, args, unquote),
        },

        ExprKind::VariableDeclaration {
            name,
            type_annotation,
            initializer,
        } => ExprKind::VariableDeclaration {
            name: name.clone(),
            type_annotation: type_annotation.splice(target, args, unquote),
            initializer: initializer.splice(target, args, unquote),
        },
        ExprKind::ValueDeclaration {
            name,
            type_annotation,
            initializer,
        } => ExprKind::ValueDeclaration {
            name: name.clone(),
            type_annotation: type_annotation.splice(target, args, unquote),
            initializer: initializer.splice(target, args, unquote),
        },
        ExprKind::ConstantDeclaration {
            name,
            type_annotation,
            initializer,
        } => ExprKind::ConstantDeclaration {
            name: name.clone(),
            type_annotation: type_annotation.splice(target, args, unquote),
            initializer: initializer.splice(target, args, unquote),
        },
        ExprKind::MethodDefinition {
            name,
            params,
            return_type,
            body,
        } => ExprKind::MethodDefinition {
            name: name.clone(),
            params: params.splice(target, args, unquote),
            return_type: return_type.splice(target, args, unquote),
            body: body.splice(target, args, unquote),
        },
        ExprKind::SignatureDefinition {
            name,
            params,
            return_type,
        } => ExprKind::SignatureDefinition {
            name: name.clone(),
            params: params.splice(target, args, unquote),
            return_type: return_type.splice(target, args, unquote),
        },
        ExprKind::ClassDeclaration {
            constant,
            superclass,
            body,
        } => ExprKind::ClassDeclaration {
            constant: constant.splice(target, args, unquote),
            superclass: superclass.splice(target, args, unquote),
            body: body.splice(target, args, unquote),
        },
        ExprKind::ModuleDeclaration { constant, body } => ExprKind::ModuleDeclaration {
            constant: constant.splice(target, args, unquote),
            body: body.splice(target, args, unquote),
        },

        ExprKind::Quote { body } => ExprKind::Quote {
            body: body.splice(target, args, unquote),
        },
        ExprKind::MacroBoundary { descriptor, body } => ExprKind::MacroBoundary {
            descriptor: descriptor.clone(),
            body: body.splice(target, args, unquote),
        },

        // Handled by Expr::splice before kinds are reached.
        ExprKind::Unquote { expr } => ExprKind::Unquote {
            expr: expr.splice(target, args, unquote),
        },
    }
}

impl Splice for Stmt {
    fn splice(&self, target: Option<&Location>, args: &mut SpliceArgs, unquote: bool) -> Self {
        let location = Location::spliced(target, self.location(), unquote);
        let kind = match &self.kind {
            StmtKind::Expression(expr) => StmtKind::Expression(expr.splice(target, args, unquote)),
            StmtKind::Empty => StmtKind::Empty,
            StmtKind::Import { path } => StmtKind::Import {
                path: path.splice(target, args, unquote),
            },
            StmtKind::Using(entries) => StmtKind::Using(entries.splice(target, args, unquote)),
        };
        Stmt::new(location, kind)
    }
}

impl Splice for Pattern {
    fn splice(&self, target: Option<&Location>, args: &mut SpliceArgs, unquote: bool) -> Self {
        ensure_sufficient_stack(|| {
            let location = Location::spliced(target, self.location(), unquote);
            let kind = match &self.kind {
                PatternKind::Expression(expr) => {
                    PatternKind::Expression(expr.splice(target, args, unquote))
                }
                PatternKind::As { pattern, name } => PatternKind::As {
                    pattern: pattern.splice(target, args, unquote),
                    name: name.splice(target, args, unquote),
                },
                PatternKind::Or { left, right } => PatternKind::Or {
                    left: left.splice(target, args, unquote),
                    right: right.splice(target, args, unquote),
                },
                PatternKind::And { left, right } => PatternKind::And {
                    left: left.splice(target, args, unquote),
                    right: right.splice(target, args, unquote),
                },
                PatternKind::Range { op, start, end } => PatternKind::Range {
                    op: *op,
                    start: start.splice(target, args, unquote),
                    end: end.splice(target, args, unquote),
                },
                PatternKind::List(elements) => {
                    PatternKind::List(elements.splice(target, args, unquote))
                }
                PatternKind::Tuple(elements) => {
                    PatternKind::Tuple(elements.splice(target, args, unquote))
                }
                PatternKind::Rest(name) => PatternKind::Rest(name.clone()),
                PatternKind::Map(entries) => {
                    PatternKind::Map(entries.splice(target, args, unquote))
                }
                PatternKind::Object { class, fields } => PatternKind::Object {
                    class: class.splice(target, args, unquote),
                    fields: fields.splice(target, args, unquote),
                },
            };
            Pattern::new(location, kind)
        })
    }
}

impl Splice for TypeExpr {
    fn splice(&self, target: Option<&Location>, args: &mut SpliceArgs, unquote: bool) -> Self {
        let location = Location::spliced(target, self.location(), unquote);
        let kind = match &self.kind {
            TypeKind::Constant(expr) => TypeKind::Constant(expr.splice(target, args, unquote)),
            TypeKind::Literal(expr) => TypeKind::Literal(expr.splice(target, args, unquote)),
            TypeKind::Union { left, right } => TypeKind::Union {
                left: left.splice(target, args, unquote),
                right: right.splice(target, args, unquote),
            },
            TypeKind::Intersection { left, right } => TypeKind::Intersection {
                left: left.splice(target, args, unquote),
                right: right.splice(target, args, unquote),
            },
            TypeKind::Nilable(inner) => TypeKind::Nilable(inner.splice(target, args, unquote)),
        };
        TypeExpr::new(location, kind)
    }
}

impl Splice for Param {
    fn splice(&self, target: Option<&Location>, args: &mut SpliceArgs, unquote: bool) -> Self {
        Param::new(
            Location::spliced(target, self.location(), unquote),
            self.name.clone(),
            self.kind,
            self.type_annotation.splice(target, args, unquote),
            self.default.splice(target, args, unquote),
        )
    }
}

impl Splice for SignatureParam {
    fn splice(&self, target: Option<&Location>, args: &mut SpliceArgs, unquote: bool) -> Self {
        SignatureParam::new(
            Location::spliced(target, self.location(), unquote),
            self.name.clone(),
            self.type_annotation.splice(target, args, unquote),
            self.optional,
        )
    }
}

impl Splice for NamedArg {
    fn splice(&self, target: Option<&Location>, args: &mut SpliceArgs, unquote: bool) -> Self {
        NamedArg::new(
            Location::spliced(target, self.location(), unquote),
            self.name.clone(),
            self.value.splice(target, args, unquote),
        )
    }
}

impl Splice for MapElement {
    fn splice(&self, target: Option<&Location>, args: &mut SpliceArgs, unquote: bool) -> Self {
        match self {
            MapElement::KeyValue { key, value } => MapElement::KeyValue {
                key: key.splice(target, args, unquote),
                value: value.splice(target, args, unquote),
            },
            MapElement::SymbolKeyValue { key, value } => MapElement::SymbolKeyValue {
                key: key.clone(),
                value: value.splice(target, args, unquote),
            },
            MapElement::Shorthand(name) => MapElement::Shorthand(name.clone()),
        }
    }
}

impl Splice for StringPart {
    fn splice(&self, target: Option<&Location>, args: &mut SpliceArgs, unquote: bool) -> Self {
        match self {
            StringPart::Text(text) => StringPart::Text(text.clone()),
            StringPart::Interpolation(expr) => {
                StringPart::Interpolation(expr.splice(target, args, unquote))
            }
        }
    }
}

impl Splice for SwitchCase {
    fn splice(&self, target: Option<&Location>, args: &mut SpliceArgs, unquote: bool) -> Self {
        SwitchCase::new(
            Location::spliced(target, self.location(), unquote),
            self.pattern.splice(target, args, unquote),
            self.body.splice(target, args, unquote),
        )
    }
}

impl Splice for MapPatternEntry {
    fn splice(&self, target: Option<&Location>, args: &mut SpliceArgs, unquote: bool) -> Self {
        MapPatternEntry::new(
            Location::spliced(target, self.location(), unquote),
            self.key.clone(),
            self.value.splice(target, args, unquote),
        )
    }
}

impl Splice for ObjectPatternField {
    fn splice(&self, target: Option<&Location>, args: &mut SpliceArgs, unquote: bool) -> Self {
        ObjectPatternField::new(
            Location::spliced(target, self.location(), unquote),
            self.name.clone(),
            self.pattern.splice(target, args, unquote),
        )
    }
}

impl Splice for UsingEntry {
    fn splice(&self, target: Option<&Location>, args: &mut SpliceArgs, unquote: bool) -> Self {
        let kind = match &self.kind {
            UsingEntryKind::Constant { path, alias } => UsingEntryKind::Constant {
                path: path.splice(target, args, unquote),
                alias: alias.clone(),
            },
            UsingEntryKind::Star { namespace } => UsingEntryKind::Star {
                namespace: namespace.splice(target, args, unquote),
            },
            UsingEntryKind::Subentries { namespace, entries } => UsingEntryKind::Subentries {
                namespace: namespace.splice(target, args, unquote),
                entries: entries.splice(target, args, unquote),
            },
        };
        UsingEntry::new(Location::spliced(target, self.location(), unquote), kind)
    }
}

impl Splice for UsingSubentry {
    fn splice(&self, target: Option<&Location>, args: &mut SpliceArgs, unquote: bool) -> Self {
        UsingSubentry::new(
            Location::spliced(target, self.location(), unquote),
            self.kind.clone(),
        )
    }
}

impl Splice for Program {
    fn splice(&self, target: Option<&Location>, args: &mut SpliceArgs, unquote: bool) -> Self {
        let mut program = Program::new(
            Location::spliced(target, self.location(), unquote),
            self.body().to_vec().splice(target, args, unquote),
        );
        for path in self.import_paths() {
            program.add_import_path(path.clone());
        }
        program
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::ast::BinaryOp;
    use crate::{Node, Position, TypeId, Typed};

    fn loc(file: &str, start: u32, end: u32) -> Location {
        Location::new(
            file,
            Position::new(start, 1, start + 1),
            Position::new(end, 1, end + 1),
        )
    }

    fn int_at(location: Location, n: i64) -> Expr {
        Expr::new(location, ExprKind::Int(n))
    }

    fn ident(name: &str) -> Expr {
        Expr::new(loc("template.elk", 0, 3), ExprKind::PublicIdent(name.into()))
    }

    fn unquote_site(start: u32, end: u32) -> Expr {
        Expr::new(
            loc("template.elk", start, end),
            ExprKind::Unquote {
                expr: Box::new(ident("x")),
            },
        )
    }

    /// `foo + unquote(x)`
    fn template() -> Expr {
        Expr::new(
            loc("template.elk", 0, 20),
            ExprKind::Binary {
                op: BinaryOp::Add,
                left: Box::new(ident("foo")),
                right: Box::new(unquote_site(6, 16)),
            },
        )
    }

    #[test]
    fn substitutes_arguments_in_order() {
        let mut args = SpliceArgs::new([int_at(loc("caller.elk", 30, 32), 42)]);
        let result = template().splice(None, &mut args, false);

        assert_eq!(result.to_string(), "foo + 42");
        assert!(args.is_empty());
    }

    #[test]
    fn original_template_is_reusable() {
        let template = template();

        let mut args = SpliceArgs::new([int_at(loc("a.elk", 0, 1), 1)]);
        let first = template.splice(None, &mut args, false);

        let mut args = SpliceArgs::new([int_at(loc("b.elk", 0, 1), 2)]);
        let second = template.splice(None, &mut args, false);

        assert_eq!(first.to_string(), "foo + 1");
        assert_eq!(second.to_string(), "foo + 2");
        // The template still holds its unquote site.
        assert!(matches!(
            template.kind,
            ExprKind::Binary { ref right, .. }
                if matches!(right.kind, ExprKind::Unquote { .. })
        ));
    }

    #[test]
    #[should_panic(expected = "too few unquote arguments")]
    fn underflow_panics() {
        let mut args = SpliceArgs::new([]);
        let _ = template().splice(None, &mut args, false);
    }

    #[test]
    fn surplus_arguments_are_left_unconsumed() {
        let mut args = SpliceArgs::new([
            int_at(loc("caller.elk", 0, 2), 42),
            int_at(loc("caller.elk", 4, 5), 7),
        ]);
        let _ = template().splice(None, &mut args, false);
        assert_eq!(args.remaining(), 1);
    }

    #[test]
    fn substituted_nodes_are_reparented_under_the_unquote_site() {
        let arg_location = loc("caller.elk", 30, 32);
        let mut args = SpliceArgs::new([int_at(arg_location.clone(), 42)]);
        let result = template().splice(None, &mut args, false);

        let ExprKind::Binary { left, right, .. } = &result.kind else {
            panic!("expected a binary expression");
        };

        // The non-substituted operand keeps its location verbatim.
        assert!(left.location().parent().is_none());

        // The substituted operand keeps its own range but gains the
        // unquote site as its parent.
        assert_eq!(right.location().file(), "caller.elk");
        assert_eq!(right.location().span(), arg_location.span());
        let Some(parent) = right.location().parent() else {
            panic!("expected provenance on the substituted node");
        };
        assert_eq!(parent.file(), "template.elk");
        assert_eq!(parent.span(), crate::Span::new(6, 16));
    }

    #[test]
    fn nested_unquotes_consume_depth_first() {
        // unquote(x) + unquote(y), where the first replacement itself
        // contains an unquote — its argument is consumed before the
        // second site's.
        let template = Expr::new(
            loc("template.elk", 0, 30),
            ExprKind::Binary {
                op: BinaryOp::Add,
                left: Box::new(unquote_site(0, 10)),
                right: Box::new(unquote_site(13, 23)),
            },
        );
        let nested_replacement = Expr::new(
            loc("caller.elk", 0, 12),
            ExprKind::Unary {
                op: crate::ast::UnaryOp::Minus,
                operand: Box::new(unquote_site(1, 11)),
            },
        );
        let mut args = SpliceArgs::new([
            nested_replacement,
            int_at(loc("caller.elk", 20, 21), 1),
            int_at(loc("caller.elk", 25, 26), 2),
        ]);
        let result = template.splice(None, &mut args, false);
        assert_eq!(result.to_string(), "-1 + 2");
        assert!(args.is_empty());
    }

    #[test]
    fn spliced_nodes_start_unchecked() {
        let template = template();
        template.set_ty(TypeId::new(9));

        let mut args = SpliceArgs::new([int_at(loc("caller.elk", 0, 2), 42)]);
        let result = template.splice(None, &mut args, false);
        assert_eq!(result.ty(), None);
        assert!(!result.skip_typechecking());
    }

    #[test]
    fn staticness_is_recomputed_for_the_instantiated_tree() {
        // The template is non-static (it contains an unquote), but the
        // instantiation `foo + 42` still isn't: `foo` is a variable.
        let template = template();
        assert!(!template.is_static());

        // A fully literal instantiation of `1 + unquote(x)` is static.
        let literal_template = Expr::new(
            loc("template.elk", 0, 18),
            ExprKind::Binary {
                op: BinaryOp::Add,
                left: Box::new(int_at(loc("template.elk", 0, 1), 1)),
                right: Box::new(unquote_site(4, 14)),
            },
        );
        let mut args = SpliceArgs::new([int_at(loc("caller.elk", 0, 2), 42)]);
        let result = literal_template.splice(None, &mut args, false);
        assert!(result.is_static());
    }

    #[test]
    fn statements_and_patterns_splice_through() {
        let stmt = Stmt::expression(template());
        let mut args = SpliceArgs::new([int_at(loc("caller.elk", 0, 2), 5)]);
        let spliced = stmt.splice(None, &mut args, false);
        assert_eq!(spliced.to_string(), "foo + 5");

        let pattern = Pattern::new(
            loc("template.elk", 0, 10),
            PatternKind::Object {
                class: Box::new(Expr::new(
                    loc("template.elk", 0, 3),
                    ExprKind::PublicConstant("Foo".into()),
                )),
                fields: vec![ObjectPatternField::new(
                    loc("template.elk", 4, 9),
                    "a",
                    Pattern::expression(unquote_site(7, 9)),
                )],
            },
        );
        let mut args = SpliceArgs::new([int_at(loc("caller.elk", 0, 1), 3)]);
        let spliced = pattern.splice(None, &mut args, false);
        assert_eq!(spliced.to_string(), "Foo(a: 3)");
    }
}
