//! Syntactic pre-scan of a loop body for plain-identifier assignment targets
//!
//! Covers `=`, compound assignments and `++`/`--`. Nested function and
//! class declarations are not entered. Assignments to a name the body
//! itself declares (a `let` shadow, a hoisted function or class) from the
//! point of that declaration on do not touch the outer binding and are not
//! reported.

use crate::features::parsing::domain::{Expression, ExpressionKind, Statement, StatementKind};
use rustc_hash::FxHashSet;
use std::collections::BTreeSet;

pub fn assigned_names(body: &Statement) -> BTreeSet<String> {
    let mut scanner = Scanner::default();
    scanner.scoped(|s| s.statement(body));
    scanner.names
}

#[derive(Default)]
struct Scanner {
    names: BTreeSet<String>,
    /// Names declared inside the body, innermost block last
    shadowed: Vec<FxHashSet<String>>,
}

impl Scanner {
    fn scoped(&mut self, f: impl FnOnce(&mut Self)) {
        self.shadowed.push(FxHashSet::default());
        f(self);
        self.shadowed.pop();
    }

    fn shadow(&mut self, name: &str) {
        if let Some(scope) = self.shadowed.last_mut() {
            scope.insert(name.to_string());
        }
    }

    fn is_shadowed(&self, name: &str) -> bool {
        self.shadowed.iter().any(|scope| scope.contains(name))
    }

    fn statement(&mut self, stmt: &Statement) {
        match &stmt.kind {
            StatementKind::FunctionDeclaration(decl) => self.shadow(&decl.name),
            StatementKind::ClassDeclaration(class) => self.shadow(&class.name),
            StatementKind::VariableDeclaration(declarators) => {
                for d in declarators {
                    if let Some(init) = &d.initializer {
                        self.expression(init);
                    }
                    self.shadow(&d.name);
                }
            }
            StatementKind::Expression(expr) => self.expression(expr),
            StatementKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.expression(condition);
                self.scoped(|s| s.statement(then_branch));
                if let Some(else_branch) = else_branch {
                    self.scoped(|s| s.statement(else_branch));
                }
            }
            StatementKind::Return(value) => {
                if let Some(value) = value {
                    self.expression(value);
                }
            }
            StatementKind::While { condition, body } => {
                self.expression(condition);
                self.scoped(|s| s.statement(body));
            }
            StatementKind::Block(statements) => self.scoped(|s| {
                for stmt in statements {
                    if let StatementKind::FunctionDeclaration(decl) = &stmt.kind {
                        s.shadow(&decl.name);
                    } else if let StatementKind::ClassDeclaration(class) = &stmt.kind {
                        s.shadow(&class.name);
                    }
                }
                for stmt in statements {
                    s.statement(stmt);
                }
            }),
            StatementKind::Break | StatementKind::Continue | StatementKind::Empty => {}
        }
    }

    fn expression(&mut self, expr: &Expression) {
        match &expr.kind {
            ExpressionKind::Assignment { target, value, .. } => {
                self.record_target(target);
                self.expression(target);
                self.expression(value);
            }
            ExpressionKind::Update { target, .. } => {
                self.record_target(target);
                self.expression(target);
            }
            ExpressionKind::Binary { left, right, .. } => {
                self.expression(left);
                self.expression(right);
            }
            ExpressionKind::Unary { operand, .. } => self.expression(operand),
            ExpressionKind::Parenthesized(inner) => self.expression(inner),
            ExpressionKind::Call { callee, arguments } | ExpressionKind::New { callee, arguments } => {
                self.expression(callee);
                for arg in arguments {
                    self.expression(arg);
                }
            }
            ExpressionKind::PropertyAccess { object, .. } => self.expression(object),
            ExpressionKind::ElementAccess { object, index } => {
                self.expression(object);
                self.expression(index);
            }
            ExpressionKind::ArrayLiteral(elements) => {
                for e in elements {
                    self.expression(e);
                }
            }
            ExpressionKind::ObjectLiteral(properties) => {
                for p in properties {
                    self.expression(&p.value);
                }
            }
            ExpressionKind::Number(_)
            | ExpressionKind::String(_)
            | ExpressionKind::Boolean(_)
            | ExpressionKind::Null
            | ExpressionKind::Undefined
            | ExpressionKind::Identifier(_)
            | ExpressionKind::This => {}
        }
    }

    fn record_target(&mut self, target: &Expression) {
        match &target.kind {
            ExpressionKind::Identifier(name) if !self.is_shadowed(name) => {
                self.names.insert(name.clone());
            }
            ExpressionKind::Parenthesized(inner) => self.record_target(inner),
            _ => {}
        }
    }
}
