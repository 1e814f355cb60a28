//! Semantics accumulator
//!
//! A semantics value carries the partial subgraph produced for one statement
//! or expression: the vertices it introduced, the bounds of its control
//! chain, and the symbol table as of "after this code". Translators build
//! bigger semantics by splicing smaller ones together in source order.

use super::symbol_table::SymbolTable;
use crate::errors::{ExtractError, Result};
use crate::features::ir_graph::{
    EdgeKind, EdgeLabel, GraphId, IrSession, PendingGraph, VertexId, VertexKind,
};
use crate::shared::models::Span;

/// Bounds of a control chain. Both ends are `None` for pure data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlChain {
    pub first: Option<VertexId>,
    pub last: Option<VertexId>,
    /// Ended by Return/Break/Continue (or by a branch whose arms all did);
    /// nothing may be appended
    pub closed: bool,
}

#[derive(Debug, Clone)]
pub struct SemanticsCore {
    vertices: Vec<VertexId>,
    chain: ControlChain,
    symbol_table: SymbolTable,
}

impl SemanticsCore {
    pub fn new(symbol_table: SymbolTable) -> Self {
        Self {
            vertices: Vec::new(),
            chain: ControlChain::default(),
            symbol_table,
        }
    }
}

/// Shared protocol of statement and expression semantics
pub trait Semantics: Sized {
    fn core(&self) -> &SemanticsCore;
    fn core_mut(&mut self) -> &mut SemanticsCore;
    fn into_parts(self) -> (SemanticsCore, Vec<PendingGraph>);
    fn adopt_subgraphs(&mut self, subgraphs: Vec<PendingGraph>) -> Result<()>;

    fn symbol_table(&self) -> &SymbolTable {
        &self.core().symbol_table
    }

    fn symbol_table_mut(&mut self) -> &mut SymbolTable {
        &mut self.core_mut().symbol_table
    }

    fn vertices(&self) -> &[VertexId] {
        &self.core().vertices
    }

    fn chain(&self) -> ControlChain {
        self.core().chain
    }

    fn first_control(&self) -> Option<VertexId> {
        self.core().chain.first
    }

    fn last_control(&self) -> Option<VertexId> {
        self.core().chain.last
    }

    fn has_control(&self) -> bool {
        self.core().chain.first.is_some()
    }

    fn is_closed(&self) -> bool {
        self.core().chain.closed
    }

    /// Last control vertex, if more code may follow it
    fn open_tail(&self) -> Option<VertexId> {
        if self.is_closed() {
            None
        } else {
            self.last_control()
        }
    }

    fn add_vertex(&mut self, id: VertexId) {
        self.core_mut().vertices.push(id);
    }

    /// Create a vertex and record it as introduced here
    fn emit(&mut self, session: &mut IrSession, kind: VertexKind, span: Option<Span>) -> VertexId {
        let id = session.create_vertex(kind, span);
        self.add_vertex(id);
        id
    }

    /// Append `vertex` to the control chain, wiring the previous tail to it
    fn concat_control_vertex(&mut self, session: &mut IrSession, vertex: VertexId) -> Result<()> {
        if self.is_closed() {
            return Err(ExtractError::invariant(format!(
                "cannot append {} {} to a terminated control chain",
                session.kind(vertex)?.kind_name(),
                vertex
            )));
        }
        match self.last_control() {
            Some(last) => session.link_control(last, vertex, EdgeLabel::Next)?,
            None => self.core_mut().chain.first = Some(vertex),
        }
        let terminal = session.kind(vertex)?.is_terminal();
        let core = self.core_mut();
        core.chain.last = Some(vertex);
        core.chain.closed = terminal;
        core.vertices.push(vertex);
        Ok(())
    }

    /// `emit` followed by `concat_control_vertex`
    fn emit_control(
        &mut self,
        session: &mut IrSession,
        kind: VertexKind,
        span: Option<Span>,
    ) -> Result<VertexId> {
        let id = session.create_vertex(kind, span);
        self.concat_control_vertex(session, id)?;
        Ok(id)
    }

    /// Splice `other` after this semantics: its chain follows ours, its
    /// bindings override ours, its vertices and subgraphs are folded in
    fn concat_semantics<S: Semantics>(&mut self, session: &mut IrSession, other: S) -> Result<()> {
        let (other, subgraphs) = other.into_parts();
        if let Some(first) = other.chain.first {
            if self.is_closed() {
                return Err(ExtractError::invariant(format!(
                    "cannot splice chain starting at {} onto a terminated control chain",
                    first
                )));
            }
            match self.last_control() {
                Some(last) => session.link_control(last, first, EdgeLabel::Next)?,
                None => self.core_mut().chain.first = Some(first),
            }
            let core = self.core_mut();
            core.chain.last = other.chain.last;
            core.chain.closed = other.chain.closed;
        }
        let core = self.core_mut();
        core.symbol_table.override_with(&other.symbol_table);
        core.vertices.extend(other.vertices);
        self.adopt_subgraphs(subgraphs)
    }

    /// Fold in `other`'s vertices and subgraphs only; its chain has been
    /// wired by the caller and its table is discarded
    fn absorb<S: Semantics>(&mut self, other: S) -> Result<()> {
        let (other, subgraphs) = other.into_parts();
        self.core_mut().vertices.extend(other.vertices);
        self.adopt_subgraphs(subgraphs)
    }

    /// Rebind `name` (see [`SymbolTable::set`]) and record `value`
    fn set_variable(&mut self, name: &str, value: VertexId) {
        let core = self.core_mut();
        core.symbol_table.set(name, value);
        core.vertices.push(value);
    }

    /// Bind `name` in the innermost scope and record `value`
    fn declare_variable(&mut self, name: &str, value: VertexId) {
        let core = self.core_mut();
        core.symbol_table.declare(name, value);
        core.vertices.push(value);
    }

    /// Replace the chain tail after the caller wired `tail` in manually
    fn set_tail(&mut self, tail: VertexId) {
        let chain = &mut self.core_mut().chain;
        if chain.first.is_none() {
            chain.first = Some(tail);
        }
        chain.last = Some(tail);
        chain.closed = false;
    }

    /// Mark the chain terminated, e.g. after a branch whose arms all returned
    fn close(&mut self) {
        self.core_mut().chain.closed = true;
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Statement semantics
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct StatementSemantics {
    core: SemanticsCore,
    subgraphs: Vec<PendingGraph>,
}

impl StatementSemantics {
    pub fn new(symbol_table: SymbolTable) -> Self {
        Self {
            core: SemanticsCore::new(symbol_table),
            subgraphs: Vec::new(),
        }
    }

    pub fn add_subgraph(&mut self, graph: PendingGraph) {
        self.subgraphs.push(graph);
    }

    /// Close the graph `owner` rooted at `start`; it is assembled later with
    /// [`IrSession::materialize`]
    pub fn into_pending(self, owner: GraphId, name: &str, start: VertexId) -> PendingGraph {
        PendingGraph {
            owner,
            name: name.to_string(),
            start,
            vertices: self.core.vertices,
            subgraphs: self.subgraphs,
        }
    }
}

impl Semantics for StatementSemantics {
    fn core(&self) -> &SemanticsCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut SemanticsCore {
        &mut self.core
    }

    fn into_parts(self) -> (SemanticsCore, Vec<PendingGraph>) {
        (self.core, self.subgraphs)
    }

    fn adopt_subgraphs(&mut self, subgraphs: Vec<PendingGraph>) -> Result<()> {
        self.subgraphs.extend(subgraphs);
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Expression semantics
// ═══════════════════════════════════════════════════════════════════════════

/// Object/key pair of a property or element access whose use (read or
/// write) is not known yet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingAccess {
    pub object: VertexId,
    pub key: VertexId,
}

#[derive(Debug, Clone)]
pub struct ExpressionSemantics {
    core: SemanticsCore,
    value: Option<VertexId>,
    access: Option<PendingAccess>,
}

impl ExpressionSemantics {
    pub fn new(symbol_table: SymbolTable) -> Self {
        Self {
            core: SemanticsCore::new(symbol_table),
            value: None,
            access: None,
        }
    }

    pub fn value(&self) -> Option<VertexId> {
        self.value
    }

    pub fn set_value(&mut self, value: VertexId) {
        self.value = Some(value);
    }

    pub fn access(&self) -> Option<PendingAccess> {
        self.access
    }

    pub fn set_access(&mut self, object: VertexId, key: VertexId) {
        self.access = Some(PendingAccess { object, key });
        self.value = None;
    }

    /// Value of the expression. A pending access is materialized as a Load
    /// the first time; the access stays recorded so a compound assignment
    /// can still store through it.
    pub fn get_value(&mut self, session: &mut IrSession, span: Option<Span>) -> Result<VertexId> {
        if let Some(value) = self.value {
            return Ok(value);
        }
        let access = self.access.ok_or_else(|| {
            ExtractError::invariant("expression produced neither a value nor an access")
        })?;
        let load = session.create_vertex(VertexKind::Load, span);
        session.create_edge(access.object, load, EdgeKind::Data, EdgeLabel::Object)?;
        session.create_edge(access.key, load, EdgeKind::Data, EdgeLabel::Property)?;
        self.concat_control_vertex(session, load)?;
        self.value = Some(load);
        Ok(load)
    }

    /// Write `value` through the pending access with a Store; the
    /// expression's value becomes `value`. Returns the Store vertex.
    pub fn store_value(
        &mut self,
        session: &mut IrSession,
        value: VertexId,
        span: Option<Span>,
    ) -> Result<VertexId> {
        let access = self
            .access
            .ok_or_else(|| ExtractError::invariant("store through an expression without an access"))?;
        let store = session.create_vertex(VertexKind::Store, span);
        session.create_edge(access.object, store, EdgeKind::Data, EdgeLabel::Object)?;
        session.create_edge(access.key, store, EdgeKind::Data, EdgeLabel::Property)?;
        session.create_edge(value, store, EdgeKind::Data, EdgeLabel::Value)?;
        self.concat_control_vertex(session, store)?;
        self.value = Some(value);
        Ok(store)
    }
}

impl Semantics for ExpressionSemantics {
    fn core(&self) -> &SemanticsCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut SemanticsCore {
        &mut self.core
    }

    fn into_parts(self) -> (SemanticsCore, Vec<PendingGraph>) {
        (self.core, Vec::new())
    }

    fn adopt_subgraphs(&mut self, subgraphs: Vec<PendingGraph>) -> Result<()> {
        if subgraphs.is_empty() {
            Ok(())
        } else {
            Err(ExtractError::invariant("expressions cannot own function subgraphs"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::ir_graph::LiteralValue;

    fn session() -> IrSession {
        let mut session = IrSession::new();
        session.enter_graph();
        session
    }

    #[test]
    fn test_concat_control_vertex_chains() {
        let mut session = session();
        let mut sem = StatementSemantics::new(SymbolTable::new());
        let a = sem.emit_control(&mut session, VertexKind::Pass, None).unwrap();
        let b = sem.emit_control(&mut session, VertexKind::Call, None).unwrap();

        assert_eq!(sem.first_control(), Some(a));
        assert_eq!(sem.last_control(), Some(b));
        assert_eq!(session.control_successors(a), vec![b]);
        assert!(!sem.is_closed());
    }

    #[test]
    fn test_terminal_vertex_closes_chain() {
        let mut session = session();
        let mut sem = StatementSemantics::new(SymbolTable::new());
        sem.emit_control(&mut session, VertexKind::Return, None).unwrap();
        assert!(sem.is_closed());
        assert_eq!(sem.open_tail(), None);

        let err = sem
            .emit_control(&mut session, VertexKind::Pass, None)
            .unwrap_err();
        assert!(matches!(err, ExtractError::InternalInvariantViolation { .. }));
    }

    #[test]
    fn test_concat_semantics_splices_and_overrides() {
        let mut session = session();
        let mut table = SymbolTable::new();
        let one = session.literal(LiteralValue::Number(1.0), None, false);
        table.declare("x", one);

        let mut head = StatementSemantics::new(table.clone());
        let a = head.emit_control(&mut session, VertexKind::Pass, None).unwrap();

        let mut tail = StatementSemantics::new(table);
        let b = tail.emit_control(&mut session, VertexKind::Call, None).unwrap();
        let two = session.literal(LiteralValue::Number(2.0), None, false);
        tail.set_variable("x", two);

        head.concat_semantics(&mut session, tail).unwrap();
        assert_eq!(head.first_control(), Some(a));
        assert_eq!(head.last_control(), Some(b));
        assert_eq!(session.control_successors(a), vec![b]);
        assert_eq!(head.symbol_table().get("x"), Some(two));
        assert!(head.vertices().contains(&two));
    }

    #[test]
    fn test_concat_adopts_chain_of_pure_data_receiver() {
        let mut session = session();
        let mut data = ExpressionSemantics::new(SymbolTable::new());
        let mut effect = ExpressionSemantics::new(SymbolTable::new());
        let call = effect.emit_control(&mut session, VertexKind::Call, None).unwrap();
        data.concat_semantics(&mut session, effect).unwrap();
        assert_eq!(data.first_control(), Some(call));
    }

    #[test]
    fn test_get_value_materializes_load_once() {
        let mut session = session();
        let mut sem = ExpressionSemantics::new(SymbolTable::new());
        let obj = sem.emit(&mut session, VertexKind::Allocation { class_name: "Object".into() }, None);
        let key = session.literal(LiteralValue::String("f".into()), None, false);
        sem.set_access(obj, key);

        let load = sem.get_value(&mut session, None).unwrap();
        assert_eq!(session.kind(load).unwrap(), &VertexKind::Load);
        assert_eq!(sem.get_value(&mut session, None).unwrap(), load);
        assert_eq!(sem.last_control(), Some(load));
        assert!(sem.access().is_some());
    }

    #[test]
    fn test_store_value_emits_store() {
        let mut session = session();
        let mut sem = ExpressionSemantics::new(SymbolTable::new());
        let obj = session.create_vertex(VertexKind::Allocation { class_name: "Array".into() }, None);
        let key = session.literal(LiteralValue::Number(0.0), None, false);
        let val = session.literal(LiteralValue::Number(7.0), None, false);
        sem.set_access(obj, key);

        let store = sem.store_value(&mut session, val, None).unwrap();
        assert_eq!(sem.value(), Some(val));
        let labels: Vec<EdgeLabel> = session.incoming(store).map(|e| e.label).collect();
        assert_eq!(labels, vec![EdgeLabel::Object, EdgeLabel::Property, EdgeLabel::Value]);
    }

    #[test]
    fn test_get_value_without_value_is_invariant_violation() {
        let mut session = session();
        let mut sem = ExpressionSemantics::new(SymbolTable::new());
        assert!(sem.get_value(&mut session, None).is_err());
    }
}
