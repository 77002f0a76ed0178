//! Expression nodes.
//!
//! Expressions carry the full base contract: a location, a staticness
//! verdict computed at construction from their children, a write-once type
//! slot and (for declaration forms) a write-once doc-comment slot.
//! Children are exclusively owned boxes, so splicing a template never
//! shares structure with the original.

use std::fmt;

use bitflags::bitflags;

use crate::{DocSlot, Located, Location, Node, Token, TypeId, TypeSlot, Typed};

use super::collections::{MapElement, NamedArg, StringPart, SwitchCase};
use super::operators::{
    AccessOp, AssignmentOp, BinaryOp, LogicalOp, ModifierKind, RangeOp, UnaryOp,
};
use super::param::{Param, SignatureParam};
use super::types::TypeExpr;
use crate::Stmt;

bitflags! {
    /// Modifier flags on a regex literal, in source order `imsxua`.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct RegexFlags: u8 {
        const CASE_INSENSITIVE = 1 << 0;
        const MULTILINE = 1 << 1;
        const DOT_ALL = 1 << 2;
        const EXTENDED = 1 << 3;
        const UNGREEDY = 1 << 4;
        const ASCII = 1 << 5;
    }
}

impl RegexFlags {
    /// Source-level flag suffix, e.g. `im` for a case-insensitive
    /// multiline literal.
    pub fn as_suffix(self) -> String {
        let mut out = String::new();
        for (flag, ch) in [
            (RegexFlags::CASE_INSENSITIVE, 'i'),
            (RegexFlags::MULTILINE, 'm'),
            (RegexFlags::DOT_ALL, 's'),
            (RegexFlags::EXTENDED, 'x'),
            (RegexFlags::UNGREEDY, 'u'),
            (RegexFlags::ASCII, 'a'),
        ] {
            if self.contains(flag) {
                out.push(ch);
            }
        }
        out
    }
}

/// Expression node.
#[derive(Clone)]
pub struct Expr {
    pub kind: ExprKind,
    location: Location,
    is_static: bool,
    ty: TypeSlot,
    doc: DocSlot,
}

impl Expr {
    /// Build an expression. The staticness verdict is fixed here, from the
    /// already-constructed children, and never changes afterwards.
    pub fn new(location: Location, kind: ExprKind) -> Self {
        let is_static = kind.compute_static();
        Expr {
            kind,
            location,
            is_static,
            ty: TypeSlot::empty(),
            doc: DocSlot::empty(),
        }
    }

    /// The attached doc comment, once the checker has assigned one.
    #[inline]
    pub fn doc_comment(&self) -> Option<&str> {
        self.doc.get()
    }

    /// Attach a doc comment. Panics on a second write.
    pub fn set_doc_comment(&self, doc: impl Into<Box<str>>) {
        self.doc.set(doc);
    }
}

impl Located for Expr {
    fn location(&self) -> &Location {
        &self.location
    }
}

impl Typed for Expr {
    fn ty(&self) -> Option<TypeId> {
        self.ty.get()
    }

    fn set_ty(&self, ty: TypeId) {
        self.ty.set(ty);
    }
}

impl Node for Expr {
    fn is_static(&self) -> bool {
        self.is_static
    }
}

// Structural equality: kinds and children only. Locations and checker
// annotations never participate, so a spliced copy compares equal to its
// template wherever the substituted arguments do.
impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.location.span())
    }
}

/// Expression variants.
#[derive(Clone, PartialEq)]
pub enum ExprKind {
    // Literals
    /// `nil`
    Nil,
    /// `true`, `false`
    Bool(bool),
    /// `42`, `1_000`
    Int(i64),
    /// `3.14`, `2.5e-8`
    Float(f64),
    /// `` `a` ``
    Char(char),
    /// `"plain string"`
    String(Box<str>),
    /// `"a ${expr} b"` — text and interpolation segments in order.
    InterpolatedString(Vec<StringPart>),
    /// `:symbol`
    Symbol(Box<str>),
    /// `%/pattern/im`
    Regex {
        pattern: Box<str>,
        flags: RegexFlags,
    },
    /// `1..5`, `..<10`, `a<..b` — either endpoint may be absent.
    Range {
        op: RangeOp,
        start: Option<Box<Expr>>,
        end: Option<Box<Expr>>,
    },

    // Identifiers and constants
    /// `foo`
    PublicIdent(Box<str>),
    /// `_foo`
    PrivateIdent(Box<str>),
    /// `Foo`
    PublicConstant(Box<str>),
    /// `_Foo`
    PrivateConstant(Box<str>),
    /// `@foo`
    InstanceVariable(Box<str>),
    /// `Foo::Bar`; a `None` receiver is a root lookup `::Bar`.
    ConstantLookup {
        receiver: Option<Box<Expr>>,
        name: Box<Expr>,
    },
    /// `self`
    SelfLiteral,

    // Operators
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Short-circuiting `&&`, `||`, `??`.
    Logical {
        op: LogicalOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Assignment {
        op: AssignmentOp,
        target: Box<Expr>,
        value: Box<Expr>,
    },
    /// Postfix modifier: `left if right`, `left while right`, …
    Modifier {
        keyword: ModifierKind,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    // Collections
    /// `[1, 2, 3]`
    List(Vec<Expr>),
    /// `%[1, 2, 3]`
    Tuple(Vec<Expr>),
    /// `{ a: 1, b => 2, c }`
    Map(Vec<MapElement>),

    // Access and calls
    /// `receiver.name` without an argument list.
    AttributeAccess {
        receiver: Box<Expr>,
        name: Box<str>,
    },
    /// `receiver[key]`
    Subscript {
        receiver: Box<Expr>,
        key: Box<Expr>,
    },
    /// `receiver.name(args)`, including nil-safe and cascade access.
    MethodCall {
        receiver: Box<Expr>,
        op: AccessOp,
        name: Box<str>,
        positional: Vec<Expr>,
        named: Vec<NamedArg>,
    },
    /// `name(args)` with an implicit receiver.
    FunctionCall {
        name: Box<str>,
        positional: Vec<Expr>,
        named: Vec<NamedArg>,
    },
    /// `Foo(args)` — instantiation of a class named by a complex constant.
    ConstructorCall {
        class: Box<Expr>,
        positional: Vec<Expr>,
        named: Vec<NamedArg>,
    },

    // Control flow
    If {
        condition: Box<Expr>,
        then_body: Vec<Stmt>,
        else_body: Vec<Stmt>,
    },
    While {
        condition: Box<Expr>,
        body: Vec<Stmt>,
    },
    Switch {
        value: Box<Expr>,
        cases: Vec<SwitchCase>,
        else_body: Vec<Stmt>,
    },
    Break {
        label: Option<Box<str>>,
        value: Option<Box<Expr>>,
    },
    Return {
        value: Option<Box<Expr>>,
    },

    // Declarations
    /// `var name: Type = init`
    VariableDeclaration {
        name: Box<str>,
        type_annotation: Option<Box<TypeExpr>>,
        initializer: Option<Box<Expr>>,
    },
    /// `val name: Type = init`
    ValueDeclaration {
        name: Box<str>,
        type_annotation: Option<Box<TypeExpr>>,
        initializer: Option<Box<Expr>>,
    },
    /// `const NAME: Type = init` — the initializer is mandatory.
    ConstantDeclaration {
        name: Box<str>,
        type_annotation: Option<Box<TypeExpr>>,
        initializer: Box<Expr>,
    },
    /// `def name(params): ReturnType ... end`
    MethodDefinition {
        name: Box<str>,
        params: Vec<Param>,
        return_type: Option<Box<TypeExpr>>,
        body: Vec<Stmt>,
    },
    /// `sig name(params): ReturnType`
    SignatureDefinition {
        name: Box<str>,
        params: Vec<SignatureParam>,
        return_type: Option<Box<TypeExpr>>,
    },
    /// `class Foo < Bar ... end`
    ClassDeclaration {
        constant: Box<Expr>,
        superclass: Option<Box<Expr>>,
        body: Vec<Stmt>,
    },
    /// `module Foo ... end`
    ModuleDeclaration {
        constant: Box<Expr>,
        body: Vec<Stmt>,
    },

    // Macro constructs
    /// `quote ... end` — captures its body as data.
    Quote {
        body: Vec<Stmt>,
    },
    /// `unquote(expr)` — substitution point inside a quoted template.
    Unquote {
        expr: Box<Expr>,
    },
    /// Wrapper around statements produced by one macro expansion; carries
    /// a descriptor naming the macro for diagnostics.
    MacroBoundary {
        descriptor: Box<str>,
        body: Vec<Stmt>,
    },

    // Error recovery
    /// Placeholder for a syntax error, carrying the offending token. Valid
    /// in every grammar position so parsing can continue past the error.
    Invalid(Token),
}

impl ExprKind {
    /// Staticness verdict, derived from children at construction time.
    ///
    /// Central table: every variant decides here whether its value is
    /// fully compile-time-known.
    pub(crate) fn compute_static(&self) -> bool {
        match self {
            ExprKind::Nil
            | ExprKind::Bool(_)
            | ExprKind::Int(_)
            | ExprKind::Float(_)
            | ExprKind::Char(_)
            | ExprKind::String(_)
            | ExprKind::Symbol(_)
            | ExprKind::Regex { .. } => true,

            ExprKind::Range { start, end, .. } => {
                start.as_deref().map_or(true, Expr::is_static)
                    && end.as_deref().map_or(true, Expr::is_static)
            }

            ExprKind::Binary { left, right, .. } | ExprKind::Logical { left, right, .. } => {
                left.is_static() && right.is_static()
            }
            ExprKind::Unary { operand, .. } => operand.is_static(),

            ExprKind::List(elements) | ExprKind::Tuple(elements) => {
                elements.iter().all(Expr::is_static)
            }
            ExprKind::Map(elements) => elements.iter().all(MapElement::is_static),

            ExprKind::InterpolatedString(_)
            | ExprKind::PublicIdent(_)
            | ExprKind::PrivateIdent(_)
            | ExprKind::PublicConstant(_)
            | ExprKind::PrivateConstant(_)
            | ExprKind::InstanceVariable(_)
            | ExprKind::ConstantLookup { .. }
            | ExprKind::SelfLiteral
            | ExprKind::Assignment { .. }
            | ExprKind::Modifier { .. }
            | ExprKind::AttributeAccess { .. }
            | ExprKind::Subscript { .. }
            | ExprKind::MethodCall { .. }
            | ExprKind::FunctionCall { .. }
            | ExprKind::ConstructorCall { .. }
            | ExprKind::If { .. }
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
            | ExprKind::Unquote { .. }
            | ExprKind::MacroBoundary { .. }
            | ExprKind::Invalid(_) => false,
        }
    }
}

impl fmt::Debug for ExprKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExprKind::Nil => write!(f, "Nil"),
            ExprKind::Bool(b) => write!(f, "Bool({b})"),
            ExprKind::Int(n) => write!(f, "Int({n})"),
            ExprKind::Float(x) => write!(f, "Float({x})"),
            ExprKind::Char(c) => write!(f, "Char({c:?})"),
            ExprKind::String(s) => write!(f, "String({s:?})"),
            ExprKind::InterpolatedString(parts) => write!(f, "InterpolatedString({parts:?})"),
            ExprKind::Symbol(s) => write!(f, "Symbol({s:?})"),
            ExprKind::Regex { pattern, flags } => {
                write!(f, "Regex({pattern:?}, {})", flags.as_suffix())
            }
            ExprKind::Range { op, start, end } => {
                write!(f, "Range({op}, {start:?}, {end:?})")
            }
            ExprKind::PublicIdent(n) => write!(f, "PublicIdent({n:?})"),
            ExprKind::PrivateIdent(n) => write!(f, "PrivateIdent({n:?})"),
            ExprKind::PublicConstant(n) => write!(f, "PublicConstant({n:?})"),
            ExprKind::PrivateConstant(n) => write!(f, "PrivateConstant({n:?})"),
            ExprKind::InstanceVariable(n) => write!(f, "InstanceVariable({n:?})"),
            ExprKind::ConstantLookup { receiver, name } => {
                write!(f, "ConstantLookup({receiver:?}, {name:?})")
            }
            ExprKind::SelfLiteral => write!(f, "SelfLiteral"),
            ExprKind::Binary { op, left, right } => {
                write!(f, "Binary({op}, {left:?}, {right:?})")
            }
            ExprKind::Logical { op, left, right } => {
                write!(f, "Logical({op}, {left:?}, {right:?})")
            }
            ExprKind::Unary { op, operand } => write!(f, "Unary({op}, {operand:?})"),
            ExprKind::Assignment { op, target, value } => {
                write!(f, "Assignment({op}, {target:?}, {value:?})")
            }
            ExprKind::Modifier {
                keyword,
                left,
                right,
            } => {
                write!(f, "Modifier({keyword}, {left:?}, {right:?})")
            }
            ExprKind::List(elements) => write!(f, "List({elements:?})"),
            ExprKind::Tuple(elements) => write!(f, "Tuple({elements:?})"),
            ExprKind::Map(elements) => write!(f, "Map({elements:?})"),
            ExprKind::AttributeAccess { receiver, name } => {
                write!(f, "AttributeAccess({receiver:?}, {name:?})")
            }
            ExprKind::Subscript { receiver, key } => {
                write!(f, "Subscript({receiver:?}, {key:?})")
            }
            ExprKind::MethodCall {
                receiver,
                op,
                name,
                positional,
                named,
            } => {
                write!(
                    f,
                    "MethodCall({receiver:?}, {op:?}, {name:?}, {positional:?}, {named:?})"
                )
            }
            ExprKind::FunctionCall {
                name,
                positional,
                named,
            } => {
                write!(f, "FunctionCall({name:?}, {positional:?}, {named:?})")
            }
            ExprKind::ConstructorCall {
                class,
                positional,
                named,
            } => {
                write!(f, "ConstructorCall({class:?}, {positional:?}, {named:?})")
            }
            ExprKind::If {
                condition,
                then_body,
                else_body,
            } => {
                write!(f, "If({condition:?}, {then_body:?}, {else_body:?})")
            }
            ExprKind::While { condition, body } => {
                write!(f, "While({condition:?}, {body:?})")
            }
            ExprKind::Switch {
                value,
                cases,
                else_body,
            } => {
                write!(f, "Switch({value:?}, {cases:?}, {else_body:?})")
            }
            ExprKind::Break { label, value } => write!(f, "Break({label:?}, {value:?})"),
            ExprKind::Return { value } => write!(f, "Return({value:?})"),
            ExprKind::VariableDeclaration {
                name,
                type_annotation,
                initializer,
            } => {
                write!(
                    f,
                    "VariableDeclaration({name:?}, {type_annotation:?}, {initializer:?})"
                )
            }
            ExprKind::ValueDeclaration {
                name,
                type_annotation,
                initializer,
            } => {
                write!(
                    f,
                    "ValueDeclaration({name:?}, {type_annotation:?}, {initializer:?})"
                )
            }
            ExprKind::ConstantDeclaration {
                name,
                type_annotation,
                initializer,
            } => {
                write!(
                    f,
                    "ConstantDeclaration({name:?}, {type_annotation:?}, {initializer:?})"
                )
            }
            ExprKind::MethodDefinition {
                name,
                params,
                return_type,
                body,
            } => {
                write!(
                    f,
                    "MethodDefinition({name:?}, {params:?}, {return_type:?}, {body:?})"
                )
            }
            ExprKind::SignatureDefinition {
                name,
                params,
                return_type,
            } => {
                write!(
                    f,
                    "SignatureDefinition({name:?}, {params:?}, {return_type:?})"
                )
            }
            ExprKind::ClassDeclaration {
                constant,
                superclass,
                body,
            } => {
                write!(f, "ClassDeclaration({constant:?}, {superclass:?}, {body:?})")
            }
            ExprKind::ModuleDeclaration { constant, body } => {
                write!(f, "ModuleDeclaration({constant:?}, {body:?})")
            }
            ExprKind::Quote { body } => write!(f, "Quote({body:?})"),
            ExprKind::Unquote { expr } => write!(f, "Unquote({expr:?})"),
            ExprKind::MacroBoundary { descriptor, body } => {
                write!(f, "MacroBoundary({descriptor:?}, {body:?})")
            }
            ExprKind::Invalid(token) => write!(f, "Invalid({token:?})"),
        }
    }
}
