//! Source AST consumed by the IR translator
//!
//! Front-ends lower their concrete syntax trees into this closed node set.
//! The translator reads it and never mutates it.

use crate::shared::models::Span;
use serde::{Deserialize, Serialize};

/// One compilation unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceUnit {
    pub file_path: String,
    pub statements: Vec<Statement>,
}

impl SourceUnit {
    pub fn new(file_path: impl Into<String>, statements: Vec<Statement>) -> Self {
        Self {
            file_path: file_path.into(),
            statements,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub kind: StatementKind,
    pub span: Span,
}

impl Statement {
    pub fn new(kind: StatementKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Node kind name used in diagnostics
    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            StatementKind::FunctionDeclaration(_) => "function_declaration",
            StatementKind::ClassDeclaration(_) => "class_declaration",
            StatementKind::VariableDeclaration(_) => "variable_declaration",
            StatementKind::Expression(_) => "expression_statement",
            StatementKind::If { .. } => "if_statement",
            StatementKind::Return(_) => "return_statement",
            StatementKind::While { .. } => "while_statement",
            StatementKind::Block(_) => "block",
            StatementKind::Break => "break_statement",
            StatementKind::Continue => "continue_statement",
            StatementKind::Empty => "empty_statement",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StatementKind {
    FunctionDeclaration(FunctionDeclaration),
    ClassDeclaration(ClassDeclaration),
    /// `var`/`let`/`const`, all block scoped
    VariableDeclaration(Vec<VariableDeclarator>),
    Expression(Expression),
    If {
        condition: Expression,
        then_branch: Box<Statement>,
        else_branch: Option<Box<Statement>>,
    },
    Return(Option<Expression>),
    While {
        condition: Expression,
        body: Box<Statement>,
    },
    Block(Vec<Statement>),
    Break,
    Continue,
    Empty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDeclarator {
    pub name: String,
    pub initializer: Option<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDeclaration {
    pub name: String,
    pub parameters: Vec<String>,
    /// `None` for body-less signatures
    pub body: Option<Vec<Statement>>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDeclaration {
    pub name: String,
    pub members: Vec<ClassMember>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ClassMember {
    Constructor(FunctionDeclaration),
    Method(FunctionDeclaration),
    Property {
        name: String,
        initializer: Option<Expression>,
        span: Span,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expression {
    pub kind: ExpressionKind,
    pub span: Span,
}

impl Expression {
    pub fn new(kind: ExpressionKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            ExpressionKind::Number(_) => "number",
            ExpressionKind::String(_) => "string",
            ExpressionKind::Boolean(_) => "boolean",
            ExpressionKind::Null => "null",
            ExpressionKind::Undefined => "undefined",
            ExpressionKind::Identifier(_) => "identifier",
            ExpressionKind::This => "this",
            ExpressionKind::Binary { .. } => "binary_expression",
            ExpressionKind::Unary { .. } => "unary_expression",
            ExpressionKind::Assignment { .. } => "assignment_expression",
            ExpressionKind::Update { .. } => "update_expression",
            ExpressionKind::Parenthesized(_) => "parenthesized_expression",
            ExpressionKind::Call { .. } => "call_expression",
            ExpressionKind::New { .. } => "new_expression",
            ExpressionKind::PropertyAccess { .. } => "property_access",
            ExpressionKind::ElementAccess { .. } => "element_access",
            ExpressionKind::ArrayLiteral(_) => "array_literal",
            ExpressionKind::ObjectLiteral(_) => "object_literal",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExpressionKind {
    Number(f64),
    String(String),
    Boolean(bool),
    Null,
    Undefined,
    Identifier(String),
    This,
    /// Operator kept as its source token; the translator maps it
    Binary {
        operator: String,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Unary {
        operator: String,
        operand: Box<Expression>,
    },
    /// `=` or a compound operator such as `+=`
    Assignment {
        operator: String,
        target: Box<Expression>,
        value: Box<Expression>,
    },
    /// `++` / `--`
    Update {
        operator: String,
        prefix: bool,
        target: Box<Expression>,
    },
    Parenthesized(Box<Expression>),
    Call {
        callee: Box<Expression>,
        arguments: Vec<Expression>,
    },
    New {
        callee: Box<Expression>,
        arguments: Vec<Expression>,
    },
    PropertyAccess {
        object: Box<Expression>,
        property: String,
    },
    ElementAccess {
        object: Box<Expression>,
        index: Box<Expression>,
    },
    ArrayLiteral(Vec<Expression>),
    ObjectLiteral(Vec<ObjectProperty>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectProperty {
    pub key: String,
    pub value: Expression,
    pub span: Span,
}
