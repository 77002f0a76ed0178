//! Capability classification tables.
//!
//! Each grammar role is one function over [`ExprKind`], written as an
//! exhaustive match with no wildcard arm. Adding an expression variant
//! fails to compile until every table below has registered it, which keeps
//! the tables in lock-step with the catalogue — an unregistered kind would
//! otherwise be a silent bug that only surfaces when the checker rejects a
//! legal program.
//!
//! `Invalid` is registered in every table: a syntax-error placeholder must
//! be accepted wherever the parser needs to produce one, so checking can
//! continue past the error.

use super::expr::ExprKind;

impl ExprKind {
    /// Kinds allowed on the left of an assignment operator.
    pub fn is_valid_assignment_target(&self) -> bool {
        match self {
            ExprKind::PublicIdent(_)
            | ExprKind::PrivateIdent(_)
            | ExprKind::InstanceVariable(_)
            | ExprKind::AttributeAccess { .. }
            | ExprKind::Subscript { .. }
            | ExprKind::Invalid(_) => true,

            ExprKind::Nil
            | ExprKind::Bool(_)
            | ExprKind::Int(_)
            | ExprKind::Float(_)
            | ExprKind::Char(_)
            | ExprKind::String(_)
            | ExprKind::InterpolatedString(_)
            | ExprKind::Symbol(_)
            | ExprKind::Regex { .. }
            | ExprKind::Range { .. }
            | ExprKind::PublicConstant(_)
            | ExprKind::PrivateConstant(_)
            | ExprKind::ConstantLookup { .. }
            | ExprKind::SelfLiteral
            | ExprKind::Binary { .. }
            | ExprKind::Logical { .. }
            | ExprKind::Unary { .. }
            | ExprKind::Assignment { .. }
            | ExprKind::Modifier { .. }
            | ExprKind::List(_)
            | ExprKind::Tuple(_)
            | ExprKind::Map(_)
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
            | ExprKind::MacroBoundary { .. } => false,
        }
    }

    /// Kinds allowed as the target of a `var`/`val` declaration.
    pub fn is_valid_declaration_target(&self) -> bool {
        match self {
            ExprKind::PublicIdent(_) | ExprKind::PrivateIdent(_) | ExprKind::Invalid(_) => true,

            ExprKind::Nil
            | ExprKind::Bool(_)
            | ExprKind::Int(_)
            | ExprKind::Float(_)
            | ExprKind::Char(_)
            | ExprKind::String(_)
            | ExprKind::InterpolatedString(_)
            | ExprKind::Symbol(_)
            | ExprKind::Regex { .. }
            | ExprKind::Range { .. }
            | ExprKind::PublicConstant(_)
            | ExprKind::PrivateConstant(_)
            | ExprKind::InstanceVariable(_)
            | ExprKind::ConstantLookup { .. }
            | ExprKind::SelfLiteral
            | ExprKind::Binary { .. }
            | ExprKind::Logical { .. }
            | ExprKind::Unary { .. }
            | ExprKind::Assignment { .. }
            | ExprKind::Modifier { .. }
            | ExprKind::List(_)
            | ExprKind::Tuple(_)
            | ExprKind::Map(_)
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
            | ExprKind::MacroBoundary { .. } => false,
        }
    }

    /// The identifier role: plain variable references.
    pub fn is_identifier(&self) -> bool {
        match self {
            ExprKind::PublicIdent(_) | ExprKind::PrivateIdent(_) | ExprKind::Invalid(_) => true,

            ExprKind::Nil
            | ExprKind::Bool(_)
            | ExprKind::Int(_)
            | ExprKind::Float(_)
            | ExprKind::Char(_)
            | ExprKind::String(_)
            | ExprKind::InterpolatedString(_)
            | ExprKind::Symbol(_)
            | ExprKind::Regex { .. }
            | ExprKind::Range { .. }
            | ExprKind::PublicConstant(_)
            | ExprKind::PrivateConstant(_)
            | ExprKind::InstanceVariable(_)
            | ExprKind::ConstantLookup { .. }
            | ExprKind::SelfLiteral
            | ExprKind::Binary { .. }
            | ExprKind::Logical { .. }
            | ExprKind::Unary { .. }
            | ExprKind::Assignment { .. }
            | ExprKind::Modifier { .. }
            | ExprKind::List(_)
            | ExprKind::Tuple(_)
            | ExprKind::Map(_)
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
            | ExprKind::MacroBoundary { .. } => false,
        }
    }

    /// The simple-constant role: a single constant segment.
    pub fn is_constant(&self) -> bool {
        match self {
            ExprKind::PublicConstant(_) | ExprKind::PrivateConstant(_) | ExprKind::Invalid(_) => {
                true
            }

            ExprKind::Nil
            | ExprKind::Bool(_)
            | ExprKind::Int(_)
            | ExprKind::Float(_)
            | ExprKind::Char(_)
            | ExprKind::String(_)
            | ExprKind::InterpolatedString(_)
            | ExprKind::Symbol(_)
            | ExprKind::Regex { .. }
            | ExprKind::Range { .. }
            | ExprKind::PublicIdent(_)
            | ExprKind::PrivateIdent(_)
            | ExprKind::InstanceVariable(_)
            | ExprKind::ConstantLookup { .. }
            | ExprKind::SelfLiteral
            | ExprKind::Binary { .. }
            | ExprKind::Logical { .. }
            | ExprKind::Unary { .. }
            | ExprKind::Assignment { .. }
            | ExprKind::Modifier { .. }
            | ExprKind::List(_)
            | ExprKind::Tuple(_)
            | ExprKind::Map(_)
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
            | ExprKind::MacroBoundary { .. } => false,
        }
    }

    /// The complex-constant role: constants and `::` lookup chains. This is
    /// the set accepted in type-name position and `using` paths.
    pub fn is_complex_constant(&self) -> bool {
        match self {
            ExprKind::PublicConstant(_)
            | ExprKind::PrivateConstant(_)
            | ExprKind::ConstantLookup { .. }
            | ExprKind::Invalid(_) => true,

            ExprKind::Nil
            | ExprKind::Bool(_)
            | ExprKind::Int(_)
            | ExprKind::Float(_)
            | ExprKind::Char(_)
            | ExprKind::String(_)
            | ExprKind::InterpolatedString(_)
            | ExprKind::Symbol(_)
            | ExprKind::Regex { .. }
            | ExprKind::Range { .. }
            | ExprKind::PublicIdent(_)
            | ExprKind::PrivateIdent(_)
            | ExprKind::InstanceVariable(_)
            | ExprKind::SelfLiteral
            | ExprKind::Binary { .. }
            | ExprKind::Logical { .. }
            | ExprKind::Unary { .. }
            | ExprKind::Assignment { .. }
            | ExprKind::Modifier { .. }
            | ExprKind::List(_)
            | ExprKind::Tuple(_)
            | ExprKind::Map(_)
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
            | ExprKind::MacroBoundary { .. } => false,
        }
    }

    /// The pattern-expression role: kinds valid in both expression and
    /// pattern position. Identifiers bind; literals and constants compare.
    /// `Unary` is registered for negated literal patterns (`-5`), and
    /// `Unquote` so quoted templates can substitute into pattern position.
    pub fn is_pattern_expression(&self) -> bool {
        match self {
            ExprKind::Nil
            | ExprKind::Bool(_)
            | ExprKind::Int(_)
            | ExprKind::Float(_)
            | ExprKind::Char(_)
            | ExprKind::String(_)
            | ExprKind::Symbol(_)
            | ExprKind::Range { .. }
            | ExprKind::PublicIdent(_)
            | ExprKind::PrivateIdent(_)
            | ExprKind::PublicConstant(_)
            | ExprKind::PrivateConstant(_)
            | ExprKind::ConstantLookup { .. }
            | ExprKind::Unary { .. }
            | ExprKind::Unquote { .. }
            | ExprKind::Invalid(_) => true,

            ExprKind::InterpolatedString(_)
            | ExprKind::Regex { .. }
            | ExprKind::InstanceVariable(_)
            | ExprKind::SelfLiteral
            | ExprKind::Binary { .. }
            | ExprKind::Logical { .. }
            | ExprKind::Assignment { .. }
            | ExprKind::Modifier { .. }
            | ExprKind::List(_)
            | ExprKind::Tuple(_)
            | ExprKind::Map(_)
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
            | ExprKind::MacroBoundary { .. } => false,
        }
    }

    /// Kinds allowed as endpoints of a range pattern: orderable literals,
    /// constants resolving to them, and negation of either.
    pub fn is_valid_range_pattern_element(&self) -> bool {
        match self {
            ExprKind::Int(_)
            | ExprKind::Float(_)
            | ExprKind::Char(_)
            | ExprKind::PublicConstant(_)
            | ExprKind::PrivateConstant(_)
            | ExprKind::ConstantLookup { .. }
            | ExprKind::Unary { .. }
            | ExprKind::Invalid(_) => true,

            ExprKind::Nil
            | ExprKind::Bool(_)
            | ExprKind::String(_)
            | ExprKind::InterpolatedString(_)
            | ExprKind::Symbol(_)
            | ExprKind::Regex { .. }
            | ExprKind::Range { .. }
            | ExprKind::PublicIdent(_)
            | ExprKind::PrivateIdent(_)
            | ExprKind::InstanceVariable(_)
            | ExprKind::SelfLiteral
            | ExprKind::Binary { .. }
            | ExprKind::Logical { .. }
            | ExprKind::Assignment { .. }
            | ExprKind::Modifier { .. }
            | ExprKind::List(_)
            | ExprKind::Tuple(_)
            | ExprKind::Map(_)
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
            | ExprKind::MacroBoundary { .. } => false,
        }
    }

    /// Kinds allowed on the right of `|>`: something callable, so the piped
    /// value has an argument list to be prepended to.
    pub fn is_valid_pipe_expression_target(&self) -> bool {
        match self {
            ExprKind::AttributeAccess { .. }
            | ExprKind::MethodCall { .. }
            | ExprKind::FunctionCall { .. }
            | ExprKind::ConstructorCall { .. }
            | ExprKind::Invalid(_) => true,

            ExprKind::Nil
            | ExprKind::Bool(_)
            | ExprKind::Int(_)
            | ExprKind::Float(_)
            | ExprKind::Char(_)
            | ExprKind::String(_)
            | ExprKind::InterpolatedString(_)
            | ExprKind::Symbol(_)
            | ExprKind::Regex { .. }
            | ExprKind::Range { .. }
            | ExprKind::PublicIdent(_)
            | ExprKind::PrivateIdent(_)
            | ExprKind::PublicConstant(_)
            | ExprKind::PrivateConstant(_)
            | ExprKind::InstanceVariable(_)
            | ExprKind::ConstantLookup { .. }
            | ExprKind::SelfLiteral
            | ExprKind::Binary { .. }
            | ExprKind::Logical { .. }
            | ExprKind::Unary { .. }
            | ExprKind::Assignment { .. }
            | ExprKind::Modifier { .. }
            | ExprKind::List(_)
            | ExprKind::Tuple(_)
            | ExprKind::Map(_)
            | ExprKind::Subscript { .. }
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
            | ExprKind::MacroBoundary { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{BinaryOp, ExprKind, UnaryOp};
    use crate::{Expr, Location, Token};

    fn expr(kind: ExprKind) -> Expr {
        Expr::new(Location::synthetic(), kind)
    }

    #[test]
    fn assignment_targets() {
        assert!(ExprKind::PublicIdent("foo".into()).is_valid_assignment_target());
        assert!(ExprKind::InstanceVariable("bar".into()).is_valid_assignment_target());
        assert!(ExprKind::AttributeAccess {
            receiver: Box::new(expr(ExprKind::PublicIdent("a".into()))),
            name: "b".into(),
        }
        .is_valid_assignment_target());
        assert!(ExprKind::Subscript {
            receiver: Box::new(expr(ExprKind::PublicIdent("a".into()))),
            key: Box::new(expr(ExprKind::Int(0))),
        }
        .is_valid_assignment_target());

        assert!(!ExprKind::Int(1).is_valid_assignment_target());
        assert!(!ExprKind::PublicConstant("Foo".into()).is_valid_assignment_target());
        assert!(!ExprKind::SelfLiteral.is_valid_assignment_target());
    }

    #[test]
    fn invalid_satisfies_every_role() {
        let invalid = ExprKind::Invalid(Token::new(Location::synthetic(), "oops"));
        assert!(invalid.is_valid_assignment_target());
        assert!(invalid.is_valid_declaration_target());
        assert!(invalid.is_identifier());
        assert!(invalid.is_constant());
        assert!(invalid.is_complex_constant());
        assert!(invalid.is_pattern_expression());
        assert!(invalid.is_valid_range_pattern_element());
        assert!(invalid.is_valid_pipe_expression_target());
    }

    #[test]
    fn constants_and_lookups() {
        let lookup = ExprKind::ConstantLookup {
            receiver: Some(Box::new(expr(ExprKind::PublicConstant("Std".into())))),
            name: Box::new(expr(ExprKind::PublicConstant("String".into()))),
        };
        assert!(lookup.is_complex_constant());
        assert!(!lookup.is_constant());
        assert!(ExprKind::PublicConstant("Foo".into()).is_constant());
        assert!(ExprKind::PublicConstant("Foo".into()).is_complex_constant());
        assert!(!ExprKind::PublicIdent("foo".into()).is_constant());
    }

    #[test]
    fn identifiers_overlap_pattern_expressions() {
        let ident = ExprKind::PublicIdent("x".into());
        assert!(ident.is_identifier());
        assert!(ident.is_pattern_expression());
        assert!(ident.is_valid_assignment_target());
        assert!(ident.is_valid_declaration_target());
    }

    #[test]
    fn range_pattern_elements() {
        assert!(ExprKind::Int(5).is_valid_range_pattern_element());
        assert!(ExprKind::Unary {
            op: UnaryOp::Minus,
            operand: Box::new(expr(ExprKind::Int(5))),
        }
        .is_valid_range_pattern_element());
        assert!(!ExprKind::String("a".into()).is_valid_range_pattern_element());
        assert!(!ExprKind::Nil.is_valid_range_pattern_element());
    }

    #[test]
    fn pipe_targets_are_calls() {
        let call = ExprKind::FunctionCall {
            name: "print".into(),
            positional: vec![],
            named: vec![],
        };
        assert!(call.is_valid_pipe_expression_target());
        assert!(!ExprKind::Int(1).is_valid_pipe_expression_target());
        assert!(!ExprKind::Binary {
            op: BinaryOp::Add,
            left: Box::new(expr(ExprKind::Int(1))),
            right: Box::new(expr(ExprKind::Int(2))),
        }
        .is_valid_pipe_expression_target());
    }
}
