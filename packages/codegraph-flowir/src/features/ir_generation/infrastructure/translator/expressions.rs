//! Expression translation
//!
//! Operands are evaluated left to right; each is spliced into the parent's
//! chain before the next is translated, so calls and loads appear in
//! evaluation order.

use super::Translator;
use crate::errors::{ExtractError, Result};
use crate::features::ir_generation::domain::{
    binary_operator, compound_assignment_operator, unary_operator, update_operator,
    ExpressionSemantics, PendingReference, Semantics, SymbolTable,
};
use crate::features::ir_graph::{
    BinaryOperator, EdgeKind, EdgeLabel, LiteralValue, VertexId, VertexKind,
};
use crate::features::parsing::domain::{Expression, ExpressionKind, ObjectProperty};
use crate::shared::models::Span;

impl<'a> Translator<'a> {
    /// Translate `expr` against `sem`'s bindings, splice it into `sem` and
    /// return its value
    pub(super) fn operand<S: Semantics>(&mut self, sem: &mut S, expr: &Expression) -> Result<VertexId> {
        let mut translated = self.expression(expr, sem.symbol_table())?;
        let value = translated.get_value(self.session, Some(expr.span))?;
        sem.concat_semantics(self.session, translated)?;
        Ok(value)
    }

    pub(super) fn expression(
        &mut self,
        expr: &Expression,
        table: &SymbolTable,
    ) -> Result<ExpressionSemantics> {
        let span = Some(expr.span);
        match &expr.kind {
            ExpressionKind::Number(n) => Ok(self.literal(LiteralValue::Number(*n), table, span)),
            ExpressionKind::String(s) => Ok(self.literal(LiteralValue::String(s.clone()), table, span)),
            ExpressionKind::Boolean(b) => Ok(self.literal(LiteralValue::Bool(*b), table, span)),
            ExpressionKind::Null => Ok(self.literal(LiteralValue::Null, table, span)),
            ExpressionKind::Undefined => Ok(self.literal(LiteralValue::Undefined, table, span)),
            ExpressionKind::Identifier(name) => Ok(self.identifier(name, table, span)),
            ExpressionKind::This => Ok(self.identifier(super::THIS, table, span)),
            ExpressionKind::Parenthesized(inner) => self.expression(inner, table),

            ExpressionKind::Binary {
                operator,
                left,
                right,
            } => {
                let op = binary_operator(operator).ok_or_else(|| {
                    ExtractError::unsupported(format!("binary operator {}", operator), span)
                })?;
                let mut sem = ExpressionSemantics::new(table.clone());
                let l = self.operand(&mut sem, left)?;
                let r = self.operand(&mut sem, right)?;
                let value = self.binary_vertex(&mut sem, op, l, r, span)?;
                sem.set_value(value);
                Ok(sem)
            }

            ExpressionKind::Unary { operator, operand } => {
                let op = unary_operator(operator).ok_or_else(|| {
                    ExtractError::unsupported(format!("unary operator {}", operator), span)
                })?;
                let mut sem = ExpressionSemantics::new(table.clone());
                let v = self.operand(&mut sem, operand)?;
                let value = sem.emit(self.session, VertexKind::UnaryOp { operator: op }, span);
                self.session
                    .create_edge(v, value, EdgeKind::Data, EdgeLabel::Operand)?;
                sem.set_value(value);
                Ok(sem)
            }

            ExpressionKind::Assignment {
                operator,
                target,
                value,
            } => self.assignment(operator, target, value, table, expr.span),

            ExpressionKind::Update {
                operator,
                prefix,
                target,
            } => self.update(operator, *prefix, target, table, expr.span),

            ExpressionKind::Call { callee, arguments } => {
                let mut sem = ExpressionSemantics::new(table.clone());
                let target = self.operand(&mut sem, callee)?;
                let args = self.arguments(&mut sem, arguments)?;
                let call = sem.emit_control(self.session, VertexKind::Call, span)?;
                self.session
                    .create_edge(target, call, EdgeKind::Data, EdgeLabel::Callee)?;
                self.attach_arguments(&args, call, 0)?;
                sem.set_value(call);
                Ok(sem)
            }

            ExpressionKind::New { callee, arguments } => {
                self.instantiation(callee, arguments, table, expr.span)
            }

            ExpressionKind::PropertyAccess { object, property } => {
                let mut sem = ExpressionSemantics::new(table.clone());
                let object = self.operand(&mut sem, object)?;
                let key = self.literal_vertex(&mut sem, LiteralValue::String(property.clone()), span);
                sem.set_access(object, key);
                Ok(sem)
            }

            ExpressionKind::ElementAccess { object, index } => {
                let mut sem = ExpressionSemantics::new(table.clone());
                let object = self.operand(&mut sem, object)?;
                let key = self.operand(&mut sem, index)?;
                sem.set_access(object, key);
                Ok(sem)
            }

            ExpressionKind::ArrayLiteral(elements) => {
                let mut sem = ExpressionSemantics::new(table.clone());
                let array = self.allocation(&mut sem, "Array", span)?;
                for (index, element) in elements.iter().enumerate() {
                    let value = self.operand(&mut sem, element)?;
                    let key = self.literal_vertex(
                        &mut sem,
                        LiteralValue::Number(index as f64),
                        Some(element.span),
                    );
                    sem.set_access(array, key);
                    sem.store_value(self.session, value, Some(element.span))?;
                }
                sem.set_value(array);
                Ok(sem)
            }

            ExpressionKind::ObjectLiteral(properties) => {
                let mut sem = ExpressionSemantics::new(table.clone());
                let object = self.allocation(&mut sem, "Object", span)?;
                for ObjectProperty { key, value, span } in properties {
                    let value = self.operand(&mut sem, value)?;
                    let key = self.literal_vertex(&mut sem, LiteralValue::String(key.clone()), Some(*span));
                    sem.set_access(object, key);
                    sem.store_value(self.session, value, Some(*span))?;
                }
                sem.set_value(object);
                Ok(sem)
            }
        }
    }

    fn literal(
        &mut self,
        value: LiteralValue,
        table: &SymbolTable,
        span: Option<Span>,
    ) -> ExpressionSemantics {
        let mut sem = ExpressionSemantics::new(table.clone());
        let v = self.literal_vertex(&mut sem, value, span);
        sem.set_value(v);
        sem
    }

    fn literal_vertex<S: Semantics>(
        &mut self,
        sem: &mut S,
        value: LiteralValue,
        span: Option<Span>,
    ) -> VertexId {
        let v = self
            .session
            .literal(value, span, self.config.intern_literals);
        sem.add_vertex(v);
        v
    }

    /// Current binding of `name`, or a placeholder Symbol patched when the
    /// declaring block ends
    fn identifier(&mut self, name: &str, table: &SymbolTable, span: Option<Span>) -> ExpressionSemantics {
        let mut sem = ExpressionSemantics::new(table.clone());
        let value = match table.get(name) {
            Some(v) => self.session.canonical(v),
            None => {
                let placeholder = sem.emit(
                    self.session,
                    VertexKind::Symbol {
                        name: name.to_string(),
                    },
                    span,
                );
                sem.symbol_table_mut().declare(name, placeholder);
                self.patches.record(PendingReference {
                    name: name.to_string(),
                    placeholder,
                    span,
                });
                placeholder
            }
        };
        sem.set_value(value);
        sem
    }

    fn binary_vertex<S: Semantics>(
        &mut self,
        sem: &mut S,
        operator: BinaryOperator,
        left: VertexId,
        right: VertexId,
        span: Option<Span>,
    ) -> Result<VertexId> {
        let value = sem.emit(self.session, VertexKind::BinaryOp { operator }, span);
        self.session
            .create_edge(left, value, EdgeKind::Data, EdgeLabel::Left)?;
        self.session
            .create_edge(right, value, EdgeKind::Data, EdgeLabel::Right)?;
        Ok(value)
    }

    fn assignment(
        &mut self,
        operator: &str,
        target: &Expression,
        value: &Expression,
        table: &SymbolTable,
        span: Span,
    ) -> Result<ExpressionSemantics> {
        let compound = match operator {
            "=" => None,
            _ => Some(compound_assignment_operator(operator).ok_or_else(|| {
                ExtractError::unsupported(format!("assignment operator {}", operator), Some(span))
            })?),
        };
        let target = unparenthesize(target);

        match &target.kind {
            ExpressionKind::Identifier(name) => {
                let mut sem = ExpressionSemantics::new(table.clone());
                let current = match compound {
                    Some(_) => Some(self.operand(&mut sem, target)?),
                    None => None,
                };
                let rhs = self.operand(&mut sem, value)?;
                let new_value = match (compound, current) {
                    (Some(op), Some(current)) => {
                        self.binary_vertex(&mut sem, op, current, rhs, Some(span))?
                    }
                    _ => rhs,
                };
                sem.set_variable(name, new_value);
                sem.set_value(new_value);
                Ok(sem)
            }
            ExpressionKind::PropertyAccess { .. } | ExpressionKind::ElementAccess { .. } => {
                let mut sem = self.expression(target, table)?;
                let current = match compound {
                    Some(_) => Some(sem.get_value(self.session, Some(target.span))?),
                    None => None,
                };
                let rhs = self.operand(&mut sem, value)?;
                let new_value = match (compound, current) {
                    (Some(op), Some(current)) => {
                        self.binary_vertex(&mut sem, op, current, rhs, Some(span))?
                    }
                    _ => rhs,
                };
                sem.store_value(self.session, new_value, Some(span))?;
                Ok(sem)
            }
            _ => Err(ExtractError::malformed(
                format!("invalid assignment target {}", target.kind_name()),
                Some(target.span),
            )),
        }
    }

    fn update(
        &mut self,
        operator: &str,
        prefix: bool,
        target: &Expression,
        table: &SymbolTable,
        span: Span,
    ) -> Result<ExpressionSemantics> {
        let op = update_operator(operator).ok_or_else(|| {
            ExtractError::unsupported(format!("update operator {}", operator), Some(span))
        })?;
        let target = unparenthesize(target);

        match &target.kind {
            ExpressionKind::Identifier(name) => {
                let mut sem = ExpressionSemantics::new(table.clone());
                let old = self.operand(&mut sem, target)?;
                let one = self.literal_vertex(&mut sem, LiteralValue::Number(1.0), Some(span));
                let new_value = self.binary_vertex(&mut sem, op, old, one, Some(span))?;
                sem.set_variable(name, new_value);
                sem.set_value(if prefix { new_value } else { old });
                Ok(sem)
            }
            ExpressionKind::PropertyAccess { .. } | ExpressionKind::ElementAccess { .. } => {
                let mut sem = self.expression(target, table)?;
                let old = sem.get_value(self.session, Some(target.span))?;
                let one = self.literal_vertex(&mut sem, LiteralValue::Number(1.0), Some(span));
                let new_value = self.binary_vertex(&mut sem, op, old, one, Some(span))?;
                sem.store_value(self.session, new_value, Some(span))?;
                sem.set_value(if prefix { new_value } else { old });
                Ok(sem)
            }
            _ => Err(ExtractError::malformed(
                format!("invalid update target {}", target.kind_name()),
                Some(target.span),
            )),
        }
    }

    fn arguments(
        &mut self,
        sem: &mut ExpressionSemantics,
        arguments: &[Expression],
    ) -> Result<Vec<VertexId>> {
        let mut values = Vec::with_capacity(arguments.len());
        for arg in arguments {
            values.push(self.operand(&mut *sem, arg)?);
        }
        Ok(values)
    }

    fn attach_arguments(&mut self, args: &[VertexId], target: VertexId, offset: usize) -> Result<()> {
        for (i, arg) in args.iter().enumerate() {
            self.session.create_edge(
                *arg,
                target,
                EdgeKind::Data,
                EdgeLabel::Arg {
                    position: i + offset,
                },
            )?;
        }
        Ok(())
    }

    fn allocation(
        &mut self,
        sem: &mut ExpressionSemantics,
        class_name: &str,
        span: Option<Span>,
    ) -> Result<VertexId> {
        sem.emit_control(
            self.session,
            VertexKind::Allocation {
                class_name: class_name.to_string(),
            },
            span,
        )
    }

    /// `new C(args)`: arguments, then the Allocation, then a constructor
    /// call with the new object as argument 0 when `C::constructor` is bound
    fn instantiation(
        &mut self,
        callee: &Expression,
        arguments: &[Expression],
        table: &SymbolTable,
        span: Span,
    ) -> Result<ExpressionSemantics> {
        let class_name = match &unparenthesize(callee).kind {
            ExpressionKind::Identifier(name) => name.clone(),
            _ => {
                return Err(ExtractError::unsupported(
                    "new with a computed constructor",
                    Some(callee.span),
                ))
            }
        };

        let mut sem = ExpressionSemantics::new(table.clone());
        let args = self.arguments(&mut sem, arguments)?;
        let object = self.allocation(&mut sem, &class_name, Some(span))?;

        let constructor = format!("{}::constructor", class_name);
        match sem.symbol_table().get(&constructor) {
            Some(ctor) if self.config.class_members => {
                let ctor = self.session.canonical(ctor);
                let call = sem.emit_control(self.session, VertexKind::Call, Some(span))?;
                self.session
                    .create_edge(ctor, call, EdgeKind::Data, EdgeLabel::Callee)?;
                self.session
                    .create_edge(object, call, EdgeKind::Data, EdgeLabel::Arg { position: 0 })?;
                self.attach_arguments(&args, call, 1)?;
            }
            _ => self.attach_arguments(&args, object, 0)?,
        }

        sem.set_value(object);
        Ok(sem)
    }
}

fn unparenthesize(expr: &Expression) -> &Expression {
    match &expr.kind {
        ExpressionKind::Parenthesized(inner) => unparenthesize(inner),
        _ => expr,
    }
}
