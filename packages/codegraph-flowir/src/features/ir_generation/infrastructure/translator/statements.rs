//! Statement translation: declarations, `if`, `while`, jumps

use super::{LoopContext, Translator};
use crate::errors::{ExtractError, Result};
use crate::features::ir_generation::domain::{Semantics, StatementSemantics, SymbolTable};
use crate::features::ir_generation::infrastructure::loop_scanner::assigned_names;
use crate::features::ir_graph::{EdgeKind, EdgeLabel, LiteralValue, VertexId, VertexKind};
use crate::features::parsing::domain::{Expression, Statement, StatementKind, VariableDeclarator};
use crate::shared::models::Span;
use tracing::debug;

impl<'a> Translator<'a> {
    pub(super) fn statement(
        &mut self,
        stmt: &Statement,
        table: &SymbolTable,
    ) -> Result<StatementSemantics> {
        let span = Some(stmt.span);
        match &stmt.kind {
            StatementKind::FunctionDeclaration(_) | StatementKind::ClassDeclaration(_) => {
                self.block(std::slice::from_ref(stmt), table, false)
            }
            StatementKind::VariableDeclaration(declarators) => {
                self.variable_declaration(declarators, table)
            }
            StatementKind::Expression(expr) => {
                let mut sem = StatementSemantics::new(table.clone());
                self.operand(&mut sem, expr)?;
                Ok(sem)
            }
            StatementKind::If {
                condition,
                then_branch,
                else_branch,
            } => self.if_statement(condition, then_branch, else_branch.as_deref(), stmt.span, table),
            StatementKind::Return(value) => {
                let mut sem = StatementSemantics::new(table.clone());
                let value = match value {
                    Some(expr) => Some(self.operand(&mut sem, expr)?),
                    None => None,
                };
                let ret = sem.emit_control(self.session, VertexKind::Return, span)?;
                if let Some(value) = value {
                    self.session
                        .create_edge(value, ret, EdgeKind::Data, EdgeLabel::Value)?;
                }
                Ok(sem)
            }
            StatementKind::While { condition, body } => {
                self.while_statement(condition, body, stmt.span, table)
            }
            StatementKind::Block(statements) => {
                self.block(statements, table, self.config.block_markers)
            }
            StatementKind::Break => {
                self.current_loop("break", stmt)?;
                let mut sem = StatementSemantics::new(table.clone());
                let jump = sem.emit_control(self.session, VertexKind::Break, span)?;
                self.current_loop("break", stmt)?.breaks.push(jump);
                Ok(sem)
            }
            StatementKind::Continue => {
                self.current_loop("continue", stmt)?;
                let mut sem = StatementSemantics::new(table.clone());
                let jump = sem.emit_control(self.session, VertexKind::Continue, span)?;
                self.current_loop("continue", stmt)?
                    .continues
                    .push((jump, table.clone()));
                Ok(sem)
            }
            StatementKind::Empty => Ok(StatementSemantics::new(table.clone())),
        }
    }

    fn variable_declaration(
        &mut self,
        declarators: &[VariableDeclarator],
        table: &SymbolTable,
    ) -> Result<StatementSemantics> {
        let mut sem = StatementSemantics::new(table.clone());
        for declarator in declarators {
            let value = match &declarator.initializer {
                Some(init) => self.operand(&mut sem, init)?,
                None => {
                    let undefined = self.session.literal(
                        LiteralValue::Undefined,
                        Some(declarator.span),
                        self.config.intern_literals,
                    );
                    sem.add_vertex(undefined);
                    undefined
                }
            };
            sem.declare_variable(&declarator.name, value);
            self.patches.declare(&declarator.name);
        }
        Ok(sem)
    }

    /// Translate one arm of a branch from `table`; an arm without control
    /// flow gets a Pass so the branch has a target
    fn branch_arm(
        &mut self,
        stmt: Option<&Statement>,
        table: &SymbolTable,
    ) -> Result<StatementSemantics> {
        let mut sem = match stmt {
            Some(stmt) => self.statement(stmt, table)?,
            None => StatementSemantics::new(table.clone()),
        };
        if !sem.has_control() {
            sem.emit_control(self.session, VertexKind::Pass, None)?;
        }
        Ok(sem)
    }

    fn if_statement(
        &mut self,
        condition: &Expression,
        then_branch: &Statement,
        else_branch: Option<&Statement>,
        span: Span,
        table: &SymbolTable,
    ) -> Result<StatementSemantics> {
        let mut sem = StatementSemantics::new(table.clone());
        let cond = self.operand(&mut sem, condition)?;
        let branch = sem.emit_control(self.session, VertexKind::Branch, Some(span))?;
        self.session
            .create_edge(cond, branch, EdgeKind::Data, EdgeLabel::Condition)?;
        let before = sem.symbol_table().clone();

        let then_sem = self.branch_arm(Some(then_branch), &before)?;
        let else_sem = self.branch_arm(else_branch, &before)?;
        for (arm, label) in [(&then_sem, EdgeLabel::True), (&else_sem, EdgeLabel::False)] {
            let first = arm
                .first_control()
                .ok_or_else(|| ExtractError::invariant("branch arm without control vertex"))?;
            self.session
                .create_edge(branch, first, EdgeKind::Control, label)?;
        }

        let reached: Vec<(VertexId, &SymbolTable)> = [&then_sem, &else_sem]
            .into_iter()
            .filter_map(|arm| arm.open_tail().map(|tail| (tail, arm.symbol_table())))
            .collect();

        if reached.is_empty() {
            sem.absorb(then_sem)?;
            sem.absorb(else_sem)?;
            sem.close();
            return Ok(sem);
        }

        let merge = sem.emit(self.session, VertexKind::Merge, Some(span));
        for (tail, _) in &reached {
            self.session.link_control(*tail, merge, EdgeLabel::Next)?;
        }
        let joined = self.join_branches(
            &mut sem,
            &before,
            merge,
            [then_sem.symbol_table(), else_sem.symbol_table()],
            &reached,
            span,
        )?;
        drop(reached);

        sem.absorb(then_sem)?;
        sem.absorb(else_sem)?;
        sem.set_tail(merge);
        *sem.symbol_table_mut() = joined;
        Ok(sem)
    }

    /// Bindings after a merge. Names visible before the branch, plus names
    /// both arms introduced, get the common value if every reaching arm
    /// agrees and a Phi otherwise.
    fn join_branches(
        &mut self,
        sem: &mut StatementSemantics,
        before: &SymbolTable,
        merge: VertexId,
        arms: [&SymbolTable; 2],
        reached: &[(VertexId, &SymbolTable)],
        span: Span,
    ) -> Result<SymbolTable> {
        let mut names = before.visible_names();
        let then_names = arms[0].visible_names();
        let else_names = arms[1].visible_names();
        names.extend(then_names.intersection(&else_names).cloned());

        let mut joined = before.clone();
        for name in names {
            let operands: Vec<(VertexId, VertexId)> = reached
                .iter()
                .filter_map(|(tail, table)| {
                    table.get(&name).map(|v| (*tail, self.session.canonical(v)))
                })
                .collect();
            if operands.len() != reached.len() {
                continue;
            }

            let first = operands[0].1;
            let value = if operands.iter().all(|(_, v)| *v == first) {
                first
            } else {
                let phi = self.phi(sem, merge, &operands, span)?;
                self.trace_phi(&name, phi, merge);
                phi
            };
            if before.has(&name) {
                joined.set(&name, value);
            } else {
                joined.declare(name, value);
            }
        }
        Ok(joined)
    }

    /// Phi attached to `merge` with one operand per (predecessor, value)
    fn phi(
        &mut self,
        sem: &mut StatementSemantics,
        merge: VertexId,
        operands: &[(VertexId, VertexId)],
        span: Span,
    ) -> Result<VertexId> {
        let phi = sem.emit(self.session, VertexKind::Phi, Some(span));
        self.session
            .create_edge(phi, merge, EdgeKind::Association, EdgeLabel::Merge)?;
        for &(predecessor, value) in operands {
            self.add_phi_operand(phi, predecessor, value)?;
        }
        Ok(phi)
    }

    fn add_phi_operand(&mut self, phi: VertexId, predecessor: VertexId, value: VertexId) -> Result<()> {
        self.session.create_edge(
            value,
            phi,
            EdgeKind::Data,
            EdgeLabel::PhiOperand { predecessor },
        )
    }

    /// `entry: Pass → header: Merge → cond → While`. Variables assigned in
    /// the body get a header Phi before the condition is translated; the
    /// back edge and every continue add one operand each.
    fn while_statement(
        &mut self,
        condition: &Expression,
        body: &Statement,
        span: Span,
        table: &SymbolTable,
    ) -> Result<StatementSemantics> {
        let mut sem = StatementSemantics::new(table.clone());
        let entry = sem.emit_control(self.session, VertexKind::Pass, Some(span))?;
        let header = sem.emit_control(self.session, VertexKind::Merge, Some(span))?;

        let mut phis = Vec::new();
        for name in assigned_names(body) {
            let Some(initial) = table.get(&name) else {
                continue;
            };
            let initial = self.session.canonical(initial);
            let phi = self.phi(&mut sem, header, &[(entry, initial)], span)?;
            self.trace_phi(&name, phi, header);
            sem.symbol_table_mut().set(&name, phi);
            phis.push((name, phi));
        }

        let cond = self.operand(&mut sem, condition)?;
        let test = sem.emit_control(self.session, VertexKind::While, Some(span))?;
        self.session
            .create_edge(cond, test, EdgeKind::Data, EdgeLabel::Condition)?;

        self.loops.push(LoopContext::new(header));
        let body_result = self.loop_body(body, sem.symbol_table());
        let context = self
            .loops
            .pop()
            .ok_or_else(|| ExtractError::invariant("loop context stack underflow"))?;
        let body_sem = body_result?;

        let body_first = body_sem
            .first_control()
            .ok_or_else(|| ExtractError::invariant("loop body without control vertex"))?;
        self.session
            .create_edge(test, body_first, EdgeKind::Control, EdgeLabel::True)?;

        if let Some(tail) = body_sem.open_tail() {
            self.session.link_control(tail, context.header, EdgeLabel::LoopBack)?;
            self.close_loop_phis(&phis, tail, body_sem.symbol_table())?;
        }
        for (jump, snapshot) in &context.continues {
            self.session
                .create_edge(*jump, context.header, EdgeKind::Control, EdgeLabel::Continue)?;
            self.close_loop_phis(&phis, *jump, snapshot)?;
        }
        sem.absorb(body_sem)?;

        // without a break the While itself is the exit; its False edge is
        // wired by whatever follows
        if !context.breaks.is_empty() {
            let exit = sem.emit_control(self.session, VertexKind::Merge, Some(span))?;
            for jump in &context.breaks {
                self.session
                    .create_edge(*jump, exit, EdgeKind::Control, EdgeLabel::Break)?;
            }
        }

        debug!(
            header = %header,
            phis = phis.len(),
            breaks = context.breaks.len(),
            continues = context.continues.len(),
            "loop translated"
        );
        Ok(sem)
    }

    fn loop_body(&mut self, body: &Statement, table: &SymbolTable) -> Result<StatementSemantics> {
        let mut scope = table.clone();
        scope.push_scope();
        let mut sem = self.statement(body, &scope)?;
        sem.symbol_table_mut().pop_scope();
        if !sem.has_control() {
            sem.emit_control(self.session, VertexKind::Pass, None)?;
        }
        Ok(sem)
    }

    fn close_loop_phis(
        &mut self,
        phis: &[(String, VertexId)],
        predecessor: VertexId,
        table: &SymbolTable,
    ) -> Result<()> {
        for (name, phi) in phis {
            let value = table.get(name).ok_or_else(|| {
                ExtractError::invariant(format!("loop variable '{}' lost its binding", name))
            })?;
            let value = self.session.canonical(value);
            self.add_phi_operand(*phi, predecessor, value)?;
        }
        Ok(())
    }
}
