//! AST builders
//!
//! Terse constructors for hand-built programs. Spans are zero.

use codegraph_flowir::features::parsing::domain::{
    Expression, ExpressionKind, FunctionDeclaration, SourceUnit, Statement, StatementKind,
    VariableDeclarator,
};
use codegraph_flowir::shared::models::Span;

pub fn program(statements: Vec<Statement>) -> SourceUnit {
    SourceUnit::new("built.ts", statements)
}

fn e(kind: ExpressionKind) -> Expression {
    Expression::new(kind, Span::zero())
}

fn s(kind: StatementKind) -> Statement {
    Statement::new(kind, Span::zero())
}

pub fn num(value: f64) -> Expression {
    e(ExpressionKind::Number(value))
}

pub fn ident(name: &str) -> Expression {
    e(ExpressionKind::Identifier(name.to_string()))
}

pub fn bin(operator: &str, left: Expression, right: Expression) -> Expression {
    e(ExpressionKind::Binary {
        operator: operator.to_string(),
        left: Box::new(left),
        right: Box::new(right),
    })
}

pub fn call(callee: Expression, arguments: Vec<Expression>) -> Expression {
    e(ExpressionKind::Call {
        callee: Box::new(callee),
        arguments,
    })
}

pub fn assign(name: &str, value: Expression) -> Statement {
    s(StatementKind::Expression(e(ExpressionKind::Assignment {
        operator: "=".to_string(),
        target: Box::new(ident(name)),
        value: Box::new(value),
    })))
}

pub fn let_(name: &str, value: Expression) -> Statement {
    s(StatementKind::VariableDeclaration(vec![VariableDeclarator {
        name: name.to_string(),
        initializer: Some(value),
        span: Span::zero(),
    }]))
}

pub fn expr(expression: Expression) -> Statement {
    s(StatementKind::Expression(expression))
}

pub fn ret(value: Option<Expression>) -> Statement {
    s(StatementKind::Return(value))
}

pub fn block(statements: Vec<Statement>) -> Statement {
    s(StatementKind::Block(statements))
}

pub fn while_(condition: Expression, body: Vec<Statement>) -> Statement {
    s(StatementKind::While {
        condition,
        body: Box::new(block(body)),
    })
}

pub fn if_(condition: Expression, then: Vec<Statement>, otherwise: Option<Vec<Statement>>) -> Statement {
    s(StatementKind::If {
        condition,
        then_branch: Box::new(block(then)),
        else_branch: otherwise.map(|stmts| Box::new(block(stmts))),
    })
}

pub fn function(name: &str, parameters: &[&str], body: Option<Vec<Statement>>) -> Statement {
    s(StatementKind::FunctionDeclaration(FunctionDeclaration {
        name: name.to_string(),
        parameters: parameters.iter().map(|p| p.to_string()).collect(),
        body,
        span: Span::zero(),
    }))
}
