//! Parsing domain models

mod ast;

pub use ast::{
    ClassDeclaration, ClassMember, Expression, ExpressionKind, FunctionDeclaration,
    ObjectProperty, SourceUnit, Statement, StatementKind, VariableDeclarator,
};
