//! Source re-serialization.
//!
//! `Display` renders a node back to parseable Elk source, re-inserting
//! parentheses wherever a child binds looser than its context requires.
//! The `Debug` impls next to each node type are the structural dumps; the
//! two forms are independent.

use std::fmt;

use crate::{Pattern, PatternKind, Program, Stmt, StmtKind, TypeExpr, TypeKind};

use super::collections::{MapElement, NamedArg, StringPart};
use super::expr::{Expr, ExprKind};

/// Precedence of atoms and postfix forms; nothing binds tighter.
pub(crate) const PRECEDENCE_PRIMARY: u8 = 20;

/// Precedence of prefix operators.
const PRECEDENCE_UNARY: u8 = 16;

impl ExprKind {
    /// Binding strength on the shared operator scale. Keyword forms get
    /// the lowest tier so they are always parenthesized inside operators.
    pub(crate) fn precedence(&self) -> u8 {
        match self {
            ExprKind::Binary { op, .. } => op.precedence(),
            ExprKind::Logical { op, .. } => op.precedence(),
            ExprKind::Unary { .. } => PRECEDENCE_UNARY,
            ExprKind::Range { .. } => 4,
            ExprKind::Assignment { .. } => 3,
            ExprKind::Modifier { .. } => 2,

            ExprKind::If { .. }
            | ExprKind::While { .. }
            | ExprKind::Switch { .. }
            | ExprKind::Break { .. }
            | ExprKind::Return { .. }
            | ExprKind::VariableDeclaration { .. }
            | ExprKind::ValueDeclaration { .. }
            | ExprKind::ConstantDeclaration { .. }
            | ExprKind::MethodDefinition { .. }
            | ExprKind::SignatureDefinition { .. }
            | ExprKind::ClassDeclaration { .. }
            | ExprKind::ModuleDeclaration { .. }
            | ExprKind::Quote { .. }
            | ExprKind::MacroBoundary { .. } => 1,

            ExprKind::Nil
            | ExprKind::Bool(_)
            | ExprKind::Int(_)
            | ExprKind::Float(_)
            | ExprKind::Char(_)
            | ExprKind::String(_)
            | ExprKind::InterpolatedString(_)
            | ExprKind::Symbol(_)
            | ExprKind::Regex { .. }
            | ExprKind::PublicIdent(_)
            | ExprKind::PrivateIdent(_)
            | ExprKind::PublicConstant(_)
            | ExprKind::PrivateConstant(_)
            | ExprKind::InstanceVariable(_)
            | ExprKind::ConstantLookup { .. }
            | ExprKind::SelfLiteral
            | ExprKind::List(_)
            | ExprKind::Tuple(_)
            | ExprKind::Map(_)
            | ExprKind::AttributeAccess { .. }
            | ExprKind::Subscript { .. }
            | ExprKind::MethodCall { .. }
            | ExprKind::FunctionCall { .. }
            | ExprKind::ConstructorCall { .. }
            | ExprKind::Unquote { .. }
            | ExprKind::Invalid(_) => PRECEDENCE_PRIMARY,
        }
    }
}

fn indent_to(f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
    for _ in 0..indent {
        f.write_str("  ")?;
    }
    Ok(())
}

/// Write a child expression, parenthesized if it binds looser than `min`.
fn operand(f: &mut fmt::Formatter<'_>, expr: &Expr, indent: usize, min: u8) -> fmt::Result {
    if expr.kind.precedence() < min {
        f.write_str("(")?;
        expr.fmt_indented(f, indent)?;
        f.write_str(")")
    } else {
        expr.fmt_indented(f, indent)
    }
}

/// Write a statement body one level deeper, one statement per line.
fn block(f: &mut fmt::Formatter<'_>, stmts: &[Stmt], indent: usize) -> fmt::Result {
    for stmt in stmts {
        indent_to(f, indent + 1)?;
        stmt.fmt_indented(f, indent + 1)?;
        f.write_str("\n")?;
    }
    Ok(())
}

fn call_args(
    f: &mut fmt::Formatter<'_>,
    positional: &[Expr],
    named: &[NamedArg],
    indent: usize,
) -> fmt::Result {
    f.write_str("(")?;
    let mut first = true;
    for arg in positional {
        if !first {
            f.write_str(", ")?;
        }
        first = false;
        arg.fmt_indented(f, indent)?;
    }
    for arg in named {
        if !first {
            f.write_str(", ")?;
        }
        first = false;
        write!(f, "{}: ", arg.name)?;
        arg.value.fmt_indented(f, indent)?;
    }
    f.write_str(")")
}

fn string_escaped(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    for ch in text.chars() {
        match ch {
            '\\' => f.write_str("\\\\")?,
            '"' => f.write_str("\\\"")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            '\r' => f.write_str("\\r")?,
            '$' => f.write_str("\\$")?,
            other => write!(f, "{other}")?,
        }
    }
    Ok(())
}

impl Expr {
    pub(crate) fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        match &self.kind {
            ExprKind::Nil => f.write_str("nil"),
            ExprKind::Bool(b) => write!(f, "{b}"),
            ExprKind::Int(n) => write!(f, "{n}"),
            // Debug formatting keeps the decimal point on round floats.
            ExprKind::Float(x) => write!(f, "{x:?}"),
            ExprKind::Char(c) => match c {
                '\n' => f.write_str("`\\n`"),
                '\t' => f.write_str("`\\t`"),
                '\r' => f.write_str("`\\r`"),
                '\\' => f.write_str("`\\\\`"),
                '`' => f.write_str("`\\``"),
                other => write!(f, "`{other}`"),
            },
            ExprKind::String(s) => {
                f.write_str("\"")?;
                string_escaped(f, s)?;
                f.write_str("\"")
            }
            ExprKind::InterpolatedString(parts) => {
                f.write_str("\"")?;
                for part in parts {
                    match part {
                        StringPart::Text(text) => string_escaped(f, text)?,
                        StringPart::Interpolation(expr) => {
                            f.write_str("${")?;
                            expr.fmt_indented(f, indent)?;
                            f.write_str("}")?;
                        }
                    }
                }
                f.write_str("\"")
            }
            ExprKind::Symbol(name) => write!(f, ":{name}"),
            ExprKind::Regex { pattern, flags } => {
                write!(f, "%/{pattern}/{}", flags.as_suffix())
            }
            ExprKind::Range { op, start, end } => {
                if let Some(start) = start {
                    operand(f, start, indent, 5)?;
                }
                write!(f, "{op}")?;
                if let Some(end) = end {
                    operand(f, end, indent, 5)?;
                }
                Ok(())
            }

            ExprKind::PublicIdent(name)
            | ExprKind::PrivateIdent(name)
            | ExprKind::PublicConstant(name)
            | ExprKind::PrivateConstant(name) => f.write_str(name),
            ExprKind::InstanceVariable(name) => write!(f, "@{name}"),
            ExprKind::ConstantLookup { receiver, name } => {
                if let Some(receiver) = receiver {
                    operand(f, receiver, indent, PRECEDENCE_PRIMARY)?;
                }
                f.write_str("::")?;
                name.fmt_indented(f, indent)
            }
            ExprKind::SelfLiteral => f.write_str("self"),

            ExprKind::Binary { op, left, right } => {
                let prec = op.precedence();
                let (left_min, right_min) = if op.is_right_associative() {
                    (prec + 1, prec)
                } else {
                    (prec, prec + 1)
                };
                operand(f, left, indent, left_min)?;
                write!(f, " {op} ")?;
                operand(f, right, indent, right_min)
            }
            ExprKind::Logical { op, left, right } => {
                let prec = op.precedence();
                operand(f, left, indent, prec)?;
                write!(f, " {op} ")?;
                operand(f, right, indent, prec + 1)
            }
            ExprKind::Unary { op, operand: inner } => {
                write!(f, "{op}")?;
                operand(f, inner, indent, PRECEDENCE_UNARY)
            }
            ExprKind::Assignment { op, target, value } => {
                operand(f, target, indent, 4)?;
                write!(f, " {op} ")?;
                operand(f, value, indent, 3)
            }
            ExprKind::Modifier {
                keyword,
                left,
                right,
            } => {
                operand(f, left, indent, 3)?;
                write!(f, " {keyword} ")?;
                operand(f, right, indent, 3)
            }

            ExprKind::List(elements) => {
                f.write_str("[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    element.fmt_indented(f, indent)?;
                }
                f.write_str("]")
            }
            ExprKind::Tuple(elements) => {
                f.write_str("%[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    element.fmt_indented(f, indent)?;
                }
                f.write_str("]")
            }
            ExprKind::Map(elements) => {
                if elements.is_empty() {
                    return f.write_str("{}");
                }
                f.write_str("{ ")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    match element {
                        MapElement::KeyValue { key, value } => {
                            key.fmt_indented(f, indent)?;
                            f.write_str(" => ")?;
                            value.fmt_indented(f, indent)?;
                        }
                        MapElement::SymbolKeyValue { key, value } => {
                            write!(f, "{key}: ")?;
                            value.fmt_indented(f, indent)?;
                        }
                        MapElement::Shorthand(name) => f.write_str(name)?,
                    }
                }
                f.write_str(" }")
            }

            ExprKind::AttributeAccess { receiver, name } => {
                operand(f, receiver, indent, PRECEDENCE_PRIMARY)?;
                write!(f, ".{name}")
            }
            ExprKind::Subscript { receiver, key } => {
                operand(f, receiver, indent, PRECEDENCE_PRIMARY)?;
                f.write_str("[")?;
                key.fmt_indented(f, indent)?;
                f.write_str("]")
            }
            ExprKind::MethodCall {
                receiver,
                op,
                name,
                positional,
                named,
            } => {
                operand(f, receiver, indent, PRECEDENCE_PRIMARY)?;
                write!(f, "{op}{name}")?;
                call_args(f, positional, named, indent)
            }
            ExprKind::FunctionCall {
                name,
                positional,
                named,
            } => {
                f.write_str(name)?;
                call_args(f, positional, named, indent)
            }
            ExprKind::ConstructorCall {
                class,
                positional,
                named,
            } => {
                operand(f, class, indent, PRECEDENCE_PRIMARY)?;
                call_args(f, positional, named, indent)
            }

            ExprKind::If {
                condition,
                then_body,
                else_body,
            } => {
                f.write_str("if ")?;
                condition.fmt_indented(f, indent)?;
                f.write_str("\n")?;
                block(f, then_body, indent)?;
                if !else_body.is_empty() {
                    indent_to(f, indent)?;
                    f.write_str("else\n")?;
                    block(f, else_body, indent)?;
                }
                indent_to(f, indent)?;
                f.write_str("end")
            }
            ExprKind::While { condition, body } => {
                f.write_str("while ")?;
                condition.fmt_indented(f, indent)?;
                f.write_str("\n")?;
                block(f, body, indent)?;
                indent_to(f, indent)?;
                f.write_str("end")
            }
            ExprKind::Switch {
                value,
                cases,
                else_body,
            } => {
                f.write_str("switch ")?;
                value.fmt_indented(f, indent)?;
                f.write_str("\n")?;
                for case in cases {
                    indent_to(f, indent)?;
                    writeln!(f, "case {}", case.pattern)?;
                    block(f, &case.body, indent)?;
                }
                if !else_body.is_empty() {
                    indent_to(f, indent)?;
                    f.write_str("else\n")?;
                    block(f, else_body, indent)?;
                }
                indent_to(f, indent)?;
                f.write_str("end")
            }
            ExprKind::Break { label, value } => {
                f.write_str("break")?;
                if let Some(label) = label {
                    write!(f, "${label}")?;
                }
                if let Some(value) = value {
                    f.write_str(" ")?;
                    value.fmt_indented(f, indent)?;
                }
                Ok(())
            }
            ExprKind::Return { value } => {
                f.write_str("return")?;
                if let Some(value) = value {
                    f.write_str(" ")?;
                    value.fmt_indented(f, indent)?;
                }
                Ok(())
            }

            ExprKind::VariableDeclaration {
                name,
                type_annotation,
                initializer,
            } => {
                write!(f, "var {name}")?;
                if let Some(ty) = type_annotation {
                    write!(f, ": {ty}")?;
                }
                if let Some(init) = initializer {
                    f.write_str(" = ")?;
                    init.fmt_indented(f, indent)?;
                }
                Ok(())
            }
            ExprKind::ValueDeclaration {
                name,
                type_annotation,
                initializer,
            } => {
                write!(f, "val {name}")?;
                if let Some(ty) = type_annotation {
                    write!(f, ": {ty}")?;
                }
                if let Some(init) = initializer {
                    f.write_str(" = ")?;
                    init.fmt_indented(f, indent)?;
                }
                Ok(())
            }
            ExprKind::ConstantDeclaration {
                name,
                type_annotation,
                initializer,
            } => {
                write!(f, "const {name}")?;
                if let Some(ty) = type_annotation {
                    write!(f, ": {ty}")?;
                }
                f.write_str(" = ")?;
                initializer.fmt_indented(f, indent)
            }
            ExprKind::MethodDefinition {
                name,
                params,
                return_type,
                body,
            } => {
                write!(f, "def {name}")?;
                if !params.is_empty() {
                    f.write_str("(")?;
                    for (i, param) in params.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{param}")?;
                    }
                    f.write_str(")")?;
                }
                if let Some(ty) = return_type {
                    write!(f, ": {ty}")?;
                }
                f.write_str("\n")?;
                block(f, body, indent)?;
                indent_to(f, indent)?;
                f.write_str("end")
            }
            ExprKind::SignatureDefinition {
                name,
                params,
                return_type,
            } => {
                write!(f, "sig {name}")?;
                if !params.is_empty() {
                    f.write_str("(")?;
                    for (i, param) in params.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{param}")?;
                    }
                    f.write_str(")")?;
                }
                if let Some(ty) = return_type {
                    write!(f, ": {ty}")?;
                }
                Ok(())
            }
            ExprKind::ClassDeclaration {
                constant,
                superclass,
                body,
            } => {
                f.write_str("class ")?;
                constant.fmt_indented(f, indent)?;
                if let Some(superclass) = superclass {
                    f.write_str(" < ")?;
                    superclass.fmt_indented(f, indent)?;
                }
                f.write_str("\n")?;
                block(f, body, indent)?;
                indent_to(f, indent)?;
                f.write_str("end")
            }
            ExprKind::ModuleDeclaration { constant, body } => {
                f.write_str("module ")?;
                constant.fmt_indented(f, indent)?;
                f.write_str("\n")?;
                block(f, body, indent)?;
                indent_to(f, indent)?;
                f.write_str("end")
            }

            ExprKind::Quote { body } => {
                f.write_str("quote\n")?;
                block(f, body, indent)?;
                indent_to(f, indent)?;
                f.write_str("end")
            }
            ExprKind::Unquote { expr } => {
                f.write_str("unquote(")?;
                expr.fmt_indented(f, indent)?;
                f.write_str(")")
            }
            // Macro boundaries have no surface syntax; render the expanded
            // statements as written.
            ExprKind::MacroBoundary { body, .. } => {
                for (i, stmt) in body.iter().enumerate() {
                    if i > 0 {
                        f.write_str("\n")?;
                        indent_to(f, indent)?;
                    }
                    stmt.fmt_indented(f, indent)?;
                }
                Ok(())
            }

            ExprKind::Invalid(token) => write!(f, "<invalid: {token}>"),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}

impl Stmt {
    pub(crate) fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        match &self.kind {
            StmtKind::Expression(expr) => expr.fmt_indented(f, indent),
            StmtKind::Empty => Ok(()),
            StmtKind::Import { path } => {
                f.write_str("import ")?;
                path.fmt_indented(f, indent)
            }
            StmtKind::Using(entries) => {
                f.write_str("using ")?;
                for (i, entry) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{entry}")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}

// Pattern precedence tiers: `||` < `&&` < everything else.
fn pattern_precedence(pattern: &Pattern) -> u8 {
    match &pattern.kind {
        PatternKind::Or { .. } => 1,
        PatternKind::And { .. } => 2,
        PatternKind::As { .. } => 3,
        PatternKind::Expression(_)
        | PatternKind::Range { .. }
        | PatternKind::List(_)
        | PatternKind::Tuple(_)
        | PatternKind::Rest(_)
        | PatternKind::Map(_)
        | PatternKind::Object { .. } => 4,
    }
}

fn pattern_operand(f: &mut fmt::Formatter<'_>, pattern: &Pattern, min: u8) -> fmt::Result {
    if pattern_precedence(pattern) < min {
        write!(f, "({pattern})")
    } else {
        write!(f, "{pattern}")
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            PatternKind::Expression(expr) => write!(f, "{expr}"),
            PatternKind::As { pattern, name } => {
                pattern_operand(f, pattern, 4)?;
                write!(f, " as {name}")
            }
            PatternKind::Or { left, right } => {
                pattern_operand(f, left, 1)?;
                f.write_str(" || ")?;
                pattern_operand(f, right, 2)
            }
            PatternKind::And { left, right } => {
                pattern_operand(f, left, 2)?;
                f.write_str(" && ")?;
                pattern_operand(f, right, 3)
            }
            PatternKind::Range { op, start, end } => {
                if let Some(start) = start {
                    write!(f, "{start}")?;
                }
                write!(f, "{op}")?;
                if let Some(end) = end {
                    write!(f, "{end}")?;
                }
                Ok(())
            }
            PatternKind::List(elements) => {
                f.write_str("[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{element}")?;
                }
                f.write_str("]")
            }
            PatternKind::Tuple(elements) => {
                f.write_str("%[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{element}")?;
                }
                f.write_str("]")
            }
            PatternKind::Rest(name) => match name {
                Some(name) => write!(f, "*{name}"),
                None => f.write_str("*"),
            },
            PatternKind::Map(entries) => {
                if entries.is_empty() {
                    return f.write_str("{}");
                }
                f.write_str("{ ")?;
                for (i, entry) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    f.write_str(&entry.key)?;
                    if let Some(value) = &entry.value {
                        write!(f, ": {value}")?;
                    }
                }
                f.write_str(" }")
            }
            PatternKind::Object { class, fields } => {
                write!(f, "{class}(")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", field.name, field.pattern)?;
                }
                f.write_str(")")
            }
        }
    }
}

// Type precedence tiers: `|` < `&` < postfix `?` < atoms.
fn type_precedence(ty: &TypeExpr) -> u8 {
    match &ty.kind {
        TypeKind::Union { .. } => 1,
        TypeKind::Intersection { .. } => 2,
        TypeKind::Nilable(_) => 3,
        TypeKind::Constant(_) | TypeKind::Literal(_) => 4,
    }
}

fn type_operand(f: &mut fmt::Formatter<'_>, ty: &TypeExpr, min: u8) -> fmt::Result {
    if type_precedence(ty) < min {
        write!(f, "({ty})")
    } else {
        write!(f, "{ty}")
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TypeKind::Constant(expr) | TypeKind::Literal(expr) => write!(f, "{expr}"),
            TypeKind::Union { left, right } => {
                type_operand(f, left, 1)?;
                f.write_str(" | ")?;
                type_operand(f, right, 2)
            }
            TypeKind::Intersection { left, right } => {
                type_operand(f, left, 2)?;
                f.write_str(" & ")?;
                type_operand(f, right, 3)
            }
            TypeKind::Nilable(inner) => {
                type_operand(f, inner, 3)?;
                f.write_str("?")
            }
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in self.body() {
            stmt.fmt_indented(f, 0)?;
            f.write_str("\n")?;
        }
        Ok(())
    }
}
