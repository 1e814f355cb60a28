//! AST → IR translator
//!
//! Depth-first recursive descent. Every node returns a semantics value;
//! parents splice children together in source order. Each call receives the
//! symbol table it must translate against and returns the table as of after
//! the node, so `if` arms and loop bodies can diverge on clones.

mod expressions;
mod statements;

use crate::config::{ExtractorConfig, FreeIdentifierPolicy};
use crate::errors::{ExtractError, Result};
use crate::features::ir_generation::domain::{
    BackpatchTable, Semantics, StatementSemantics, SymbolTable,
};
use crate::features::ir_graph::{
    EdgeKind, EdgeLabel, Graph, IrSession, PendingGraph, VertexId, VertexKind,
};
use crate::features::parsing::domain::{
    ClassDeclaration, ClassMember, Expression, ExpressionKind, FunctionDeclaration, SourceUnit,
    Statement, StatementKind,
};
use tracing::{debug, trace, warn};

/// Name bound to the receiver inside constructors and methods
const THIS: &str = "this";

/// Break/continue bookkeeping of the innermost enclosing loop
#[derive(Debug)]
struct LoopContext {
    header: VertexId,
    breaks: Vec<VertexId>,
    /// Continue vertex with the bindings in effect where it appears
    continues: Vec<(VertexId, SymbolTable)>,
}

impl LoopContext {
    fn new(header: VertexId) -> Self {
        Self {
            header,
            breaks: Vec::new(),
            continues: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum FunctionRole<'c> {
    Plain,
    Method { class_name: &'c str },
}

pub struct Translator<'a> {
    session: &'a mut IrSession,
    config: &'a ExtractorConfig,
    patches: BackpatchTable,
    loops: Vec<LoopContext>,
}

impl<'a> Translator<'a> {
    pub fn new(session: &'a mut IrSession, config: &'a ExtractorConfig) -> Self {
        Self {
            session,
            config,
            patches: BackpatchTable::new(),
            loops: Vec::new(),
        }
    }

    /// Translate one compilation unit into the root graph. Graphs are
    /// assembled only once every block has resolved its forward references.
    pub fn translate_program(&mut self, unit: &SourceUnit) -> Result<Graph> {
        let owner = self.session.enter_graph();
        let name = self.config.entry_name.clone();

        let mut sem = StatementSemantics::new(SymbolTable::new());
        let start = sem.emit_control(self.session, VertexKind::Start { name: name.clone() }, None)?;
        let body = self.block(&unit.statements, sem.symbol_table(), false)?;
        sem.concat_semantics(self.session, body)?;
        if !sem.is_closed() {
            sem.emit_control(self.session, VertexKind::Return, None)?;
        }

        self.check_free_identifiers()?;
        let pending = sem.into_pending(owner, &name, start);
        self.session.exit_graph()?;
        self.session.materialize(&pending)
    }

    fn check_free_identifiers(&self) -> Result<()> {
        let unresolved = self.patches.unresolved();
        let Some(first) = unresolved.first() else {
            return Ok(());
        };
        match self.config.free_identifiers {
            FreeIdentifierPolicy::Error => Err(ExtractError::undefined(first.name.clone(), first.span)),
            FreeIdentifierPolicy::Global => {
                let names: Vec<&str> = unresolved.iter().map(|r| r.name.as_str()).collect();
                warn!(count = unresolved.len(), names = ?names, "free identifiers kept as globals");
                Ok(())
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Blocks and hoisting
    // ═══════════════════════════════════════════════════════════════════

    /// Translate a statement list in a fresh scope. Functions and classes
    /// are bound first, their bodies translated second, and the remaining
    /// statements last, so earlier references see the hoisted symbols.
    fn block(
        &mut self,
        statements: &[Statement],
        table: &SymbolTable,
        markers: bool,
    ) -> Result<StatementSemantics> {
        let mut scope = table.clone();
        scope.push_scope();
        let mut sem = StatementSemantics::new(scope);
        self.patches.push_frame();

        if markers {
            sem.emit_control(self.session, VertexKind::BlockBegin, None)?;
        }

        let mut functions = Vec::new();
        let mut classes = Vec::new();
        for stmt in statements {
            match &stmt.kind {
                StatementKind::FunctionDeclaration(decl) => {
                    let symbol = self.bind_static(&mut sem, &decl.name, stmt);
                    functions.push((decl, symbol));
                }
                StatementKind::ClassDeclaration(class) => {
                    let members = self.hoist_class(&mut sem, class, stmt)?;
                    classes.push((class, members));
                }
                _ => {}
            }
        }

        for (decl, symbol) in functions {
            let graph = self.function(decl, sem.symbol_table(), FunctionRole::Plain)?;
            self.session
                .create_edge(symbol, graph.start, EdgeKind::Association, EdgeLabel::Function)?;
            sem.add_subgraph(graph);
        }
        for (class, members) in classes {
            for (decl, symbol) in members {
                let role = FunctionRole::Method {
                    class_name: &class.name,
                };
                let graph = self.function(&decl, sem.symbol_table(), role)?;
                self.session
                    .create_edge(symbol, graph.start, EdgeKind::Association, EdgeLabel::Function)?;
                sem.add_subgraph(graph);
            }
        }

        for stmt in statements {
            if matches!(
                stmt.kind,
                StatementKind::FunctionDeclaration(_)
                    | StatementKind::ClassDeclaration(_)
                    | StatementKind::Empty
            ) {
                continue;
            }
            if sem.is_closed() {
                return Err(ExtractError::malformed(
                    format!("unreachable {} after a terminating statement", stmt.kind_name()),
                    Some(stmt.span),
                ));
            }
            let translated = self.statement(stmt, sem.symbol_table())?;
            sem.concat_semantics(self.session, translated)?;
        }

        if markers && !sem.is_closed() {
            sem.emit_control(self.session, VertexKind::BlockEnd, None)?;
        }

        let resolved = self.patches.pop_frame(self.session, sem.symbol_table())?;
        if resolved > 0 {
            debug!(resolved, "forward references resolved at block end");
        }
        sem.symbol_table_mut().pop_scope();
        Ok(sem)
    }

    /// Bind `name` to a fresh StaticSymbol in the block's scope
    fn bind_static(&mut self, sem: &mut StatementSemantics, name: &str, stmt: &Statement) -> VertexId {
        let symbol = sem.emit(
            self.session,
            VertexKind::StaticSymbol {
                name: name.to_string(),
            },
            Some(stmt.span),
        );
        sem.symbol_table_mut().declare(name, symbol);
        self.patches.declare(name);
        symbol
    }

    /// Bind the class name and, when class members are translated, one
    /// `Class::member` symbol per constructor/method
    fn hoist_class(
        &mut self,
        sem: &mut StatementSemantics,
        class: &ClassDeclaration,
        stmt: &Statement,
    ) -> Result<Vec<(FunctionDeclaration, VertexId)>> {
        let class_symbol = self.bind_static(sem, &class.name, stmt);
        if !self.config.class_members {
            return Ok(Vec::new());
        }

        let mut hoisted = Vec::new();
        for decl in member_functions(class)? {
            let qualified = format!("{}::{}", class.name, decl.name);
            let symbol = self.bind_static(sem, &qualified, stmt);
            self.session
                .create_edge(symbol, class_symbol, EdgeKind::Association, EdgeLabel::Member)?;
            hoisted.push((decl, symbol));
        }
        Ok(hoisted)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Functions
    // ═══════════════════════════════════════════════════════════════════

    fn function(
        &mut self,
        decl: &FunctionDeclaration,
        table: &SymbolTable,
        role: FunctionRole<'_>,
    ) -> Result<PendingGraph> {
        let graph_name = match role {
            FunctionRole::Plain => decl.name.clone(),
            FunctionRole::Method { class_name } => format!("{}::{}", class_name, decl.name),
        };
        let body = decl.body.as_ref().ok_or_else(|| {
            ExtractError::malformed(format!("function '{}' has no body", graph_name), Some(decl.span))
        })?;

        // break/continue never cross a function boundary
        let enclosing_loops = std::mem::take(&mut self.loops);
        let result = self.function_graph(&graph_name, decl, body, table, role);
        self.loops = enclosing_loops;
        result
    }

    fn function_graph(
        &mut self,
        graph_name: &str,
        decl: &FunctionDeclaration,
        body: &[Statement],
        table: &SymbolTable,
        role: FunctionRole<'_>,
    ) -> Result<PendingGraph> {
        let owner = self.session.enter_graph();
        let span = Some(decl.span);

        let mut scope = table.clone();
        scope.push_scope();
        let mut sem = StatementSemantics::new(scope);
        let start = sem.emit_control(
            self.session,
            VertexKind::Start {
                name: graph_name.to_string(),
            },
            span,
        )?;

        let receiver = match role {
            FunctionRole::Method { .. } => Some(THIS),
            FunctionRole::Plain => None,
        };
        for (position, name) in receiver
            .into_iter()
            .chain(decl.parameters.iter().map(String::as_str))
            .enumerate()
        {
            let param = sem.emit(
                self.session,
                VertexKind::Parameter {
                    position,
                    name: name.to_string(),
                },
                span,
            );
            self.session
                .create_edge(param, start, EdgeKind::Association, EdgeLabel::Parameter)?;
            sem.symbol_table_mut().declare(name, param);
        }

        let translated = self.block(body, sem.symbol_table(), false)?;
        sem.concat_semantics(self.session, translated)?;
        if !sem.is_closed() {
            sem.emit_control(self.session, VertexKind::Return, None)?;
        }

        let pending = sem.into_pending(owner, graph_name, start);
        self.session.exit_graph()?;
        debug!(
            function = graph_name,
            vertices = pending.vertices.len(),
            nested = pending.subgraphs.len(),
            "function subgraph translated"
        );
        Ok(pending)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Loops
    // ═══════════════════════════════════════════════════════════════════

    fn current_loop(&mut self, what: &str, stmt: &Statement) -> Result<&mut LoopContext> {
        self.loops.last_mut().ok_or_else(|| {
            ExtractError::malformed(format!("{} outside of a loop", what), Some(stmt.span))
        })
    }

    fn trace_phi(&self, name: &str, phi: VertexId, merge: VertexId) {
        trace!(name, phi = %phi, merge = %merge, "phi inserted");
    }
}

/// Constructor first, then methods. Property initializers become
/// `this.name = value` assignments at the top of the constructor, which is
/// synthesized when the class declares none.
fn member_functions(class: &ClassDeclaration) -> Result<Vec<FunctionDeclaration>> {
    let mut constructor: Option<FunctionDeclaration> = None;
    let mut methods = Vec::new();
    let mut initializers = Vec::new();

    for member in &class.members {
        match member {
            ClassMember::Constructor(decl) => {
                if constructor.is_some() {
                    return Err(ExtractError::malformed(
                        format!("class '{}' declares more than one constructor", class.name),
                        Some(decl.span),
                    ));
                }
                constructor = Some(FunctionDeclaration {
                    name: "constructor".to_string(),
                    ..decl.clone()
                });
            }
            ClassMember::Method(decl) => methods.push(decl.clone()),
            ClassMember::Property {
                name,
                initializer: Some(value),
                span,
            } => initializers.push(field_initializer(name, value, *span)),
            ClassMember::Property { .. } => {}
        }
    }

    if !initializers.is_empty() {
        let mut ctor = constructor.unwrap_or_else(|| FunctionDeclaration {
            name: "constructor".to_string(),
            parameters: Vec::new(),
            body: Some(Vec::new()),
            span: class.span,
        });
        if let Some(body) = ctor.body.as_mut() {
            initializers.append(body);
            *body = initializers;
        }
        constructor = Some(ctor);
    }

    Ok(constructor.into_iter().chain(methods).collect())
}

fn field_initializer(name: &str, value: &Expression, span: crate::shared::models::Span) -> Statement {
    let target = Expression::new(
        ExpressionKind::PropertyAccess {
            object: Box::new(Expression::new(ExpressionKind::This, span)),
            property: name.to_string(),
        },
        span,
    );
    Statement::new(
        StatementKind::Expression(Expression::new(
            ExpressionKind::Assignment {
                operator: "=".to_string(),
                target: Box::new(target),
                value: Box::new(value.clone()),
            },
            span,
        )),
        span,
    )
}
