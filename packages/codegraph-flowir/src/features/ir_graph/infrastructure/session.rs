//! Extraction session arena
//!
//! Owns the vertex-id counter and every vertex/edge minted during one
//! extraction. Ids are indexes into the arena, so they are unique and
//! increasing for the lifetime of the session and never reused. A session
//! is never shared between inputs.

use crate::errors::{ExtractError, Result};
use crate::features::ir_graph::domain::{
    Edge, EdgeKind, EdgeLabel, Graph, GraphId, LiteralKey, LiteralValue, Vertex, VertexId,
    VertexKind,
};
use crate::shared::models::Span;
use rustc_hash::FxHashMap;

/// A translated function whose `Graph` has not been assembled yet. Edges
/// may still be retargeted by forward-reference resolution in an enclosing
/// block, so assembly waits until the whole program is translated.
#[derive(Debug, Clone)]
pub struct PendingGraph {
    pub owner: GraphId,
    pub name: String,
    pub start: VertexId,
    pub vertices: Vec<VertexId>,
    pub subgraphs: Vec<PendingGraph>,
}

#[derive(Debug, Default)]
pub struct IrSession {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    /// Edge indexes by source vertex index
    outgoing: Vec<Vec<usize>>,
    /// Edge indexes by target vertex index
    incoming: Vec<Vec<usize>>,
    /// Graphs under construction, innermost last
    owners: Vec<GraphId>,
    next_graph: u32,
    literals: FxHashMap<(GraphId, LiteralKey), VertexId>,
    /// Resolved placeholder → the vertex it was retargeted to
    resolved: FxHashMap<VertexId, VertexId>,
}

impl IrSession {
    pub fn new() -> Self {
        Self::default()
    }

    // ═══════════════════════════════════════════════════════════════════
    // Graph ownership
    // ═══════════════════════════════════════════════════════════════════

    /// Start building a new function graph; vertices and edges created
    /// until the matching [`exit_graph`](Self::exit_graph) belong to it.
    pub fn enter_graph(&mut self) -> GraphId {
        let id = GraphId(self.next_graph);
        self.next_graph += 1;
        self.owners.push(id);
        id
    }

    pub fn exit_graph(&mut self) -> Result<GraphId> {
        self.owners
            .pop()
            .ok_or_else(|| ExtractError::invariant("exit_graph without a graph under construction"))
    }

    pub fn current_graph(&self) -> GraphId {
        self.owners.last().copied().unwrap_or(GraphId(0))
    }

    // ═══════════════════════════════════════════════════════════════════
    // Creation
    // ═══════════════════════════════════════════════════════════════════

    pub fn create_vertex(&mut self, kind: VertexKind, span: Option<Span>) -> VertexId {
        let id = VertexId(self.vertices.len() as u32);
        self.vertices.push(Vertex {
            id,
            kind,
            owner: self.current_graph(),
            span,
        });
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());
        id
    }

    /// Literal vertex; with `intern` set, one vertex per distinct literal
    /// and graph is reused
    pub fn literal(&mut self, value: LiteralValue, span: Option<Span>, intern: bool) -> VertexId {
        if !intern {
            return self.create_vertex(VertexKind::Literal { value }, span);
        }
        let key = (self.current_graph(), value.intern_key());
        if let Some(&id) = self.literals.get(&key) {
            return id;
        }
        let id = self.create_vertex(VertexKind::Literal { value }, span);
        self.literals.insert(key, id);
        id
    }

    /// Endpoints that name a resolved placeholder are redirected to its
    /// resolution.
    pub fn create_edge(
        &mut self,
        source: VertexId,
        target: VertexId,
        kind: EdgeKind,
        label: EdgeLabel,
    ) -> Result<()> {
        let source = self.canonical(source);
        let target = self.canonical(target);
        self.check_exists(source)?;
        self.check_exists(target)?;

        let idx = self.edges.len();
        self.edges.push(Edge {
            source,
            target,
            kind,
            label,
            owner: self.current_graph(),
        });
        self.outgoing[source.index()].push(idx);
        self.incoming[target.index()].push(idx);
        Ok(())
    }

    /// Chain `to` after `from`. The chain successor of a While vertex is
    /// always its false edge.
    pub fn link_control(&mut self, from: VertexId, to: VertexId, label: EdgeLabel) -> Result<()> {
        let from_kind = self.kind(from)?;
        if !from_kind.is_control() || !self.kind(to)?.is_control() {
            return Err(ExtractError::invariant(format!(
                "control edge {} -> {} between non-control vertices",
                from, to
            )));
        }
        let label = if matches!(from_kind, VertexKind::While) {
            EdgeLabel::False
        } else {
            label
        };
        self.create_edge(from, to, EdgeKind::Control, label)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Lookup
    // ═══════════════════════════════════════════════════════════════════

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id.index())
    }

    pub fn kind(&self, id: VertexId) -> Result<&VertexKind> {
        self.vertex(id)
            .map(|v| &v.kind)
            .ok_or_else(|| ExtractError::invariant(format!("unknown vertex id {}", id)))
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn outgoing(&self, id: VertexId) -> impl Iterator<Item = &Edge> + '_ {
        self.outgoing
            .get(id.index())
            .into_iter()
            .flatten()
            .map(move |&i| &self.edges[i])
    }

    pub fn incoming(&self, id: VertexId) -> impl Iterator<Item = &Edge> + '_ {
        self.incoming
            .get(id.index())
            .into_iter()
            .flatten()
            .map(move |&i| &self.edges[i])
    }

    pub fn control_successors(&self, id: VertexId) -> Vec<VertexId> {
        self.outgoing(id)
            .filter(|e| e.is_control())
            .map(|e| e.target)
            .collect()
    }

    fn check_exists(&self, id: VertexId) -> Result<()> {
        if id.index() < self.vertices.len() {
            Ok(())
        } else {
            Err(ExtractError::invariant(format!("edge references unknown vertex {}", id)))
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Placeholders
    // ═══════════════════════════════════════════════════════════════════

    /// Follow placeholder resolutions to the vertex that currently stands
    /// for `id`
    pub fn canonical(&self, mut id: VertexId) -> VertexId {
        while let Some(&next) = self.resolved.get(&id) {
            id = next;
        }
        id
    }

    pub fn is_resolved(&self, id: VertexId) -> bool {
        self.resolved.contains_key(&id)
    }

    /// Placeholders retargeted so far, in id order
    pub fn resolved_placeholders(&self) -> Vec<VertexId> {
        let mut ids: Vec<VertexId> = self.resolved.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Unresolved Symbol vertex
    pub fn is_placeholder(&self, id: VertexId) -> bool {
        !self.is_resolved(id)
            && self
                .vertex(id)
                .map(|v| v.kind.is_placeholder())
                .unwrap_or(false)
    }

    /// Rewrite every edge that references `placeholder` to reference `value`
    /// instead. The placeholder vertex itself stays in the arena, detached.
    /// Returns the number of rewritten edges.
    pub fn retarget(&mut self, placeholder: VertexId, value: VertexId) -> Result<usize> {
        if !self.is_placeholder(placeholder) {
            return Err(ExtractError::invariant(format!(
                "vertex {} is not an unresolved placeholder",
                placeholder
            )));
        }
        let value = self.canonical(value);
        self.check_exists(value)?;
        if value == placeholder {
            return Err(ExtractError::invariant(format!(
                "placeholder {} cannot resolve to itself",
                placeholder
            )));
        }

        let p = placeholder.index();
        let mut touching: Vec<usize> = self.outgoing[p]
            .drain(..)
            .chain(self.incoming[p].drain(..))
            .collect();
        touching.sort_unstable();
        touching.dedup();

        for &idx in &touching {
            let edge = &mut self.edges[idx];
            if edge.source == placeholder {
                edge.source = value;
                self.outgoing[value.index()].push(idx);
            }
            if edge.target == placeholder {
                edge.target = value;
                self.incoming[value.index()].push(idx);
            }
        }

        self.resolved.insert(placeholder, value);
        Ok(touching.len())
    }

    // ═══════════════════════════════════════════════════════════════════
    // Graph assembly
    // ═══════════════════════════════════════════════════════════════════

    /// Assemble the finished graph `owner` from the vertices a semantics
    /// accumulated. Resolved placeholders and vertices of other graphs are
    /// left out; edges are those created while `owner` was being built.
    pub fn build_graph(
        &self,
        owner: GraphId,
        name: &str,
        start: VertexId,
        vertex_ids: &[VertexId],
    ) -> Result<Graph> {
        let mut vertices = Vec::with_capacity(vertex_ids.len());
        for &id in vertex_ids {
            if self.is_resolved(id) {
                continue;
            }
            let vertex = self
                .vertex(id)
                .ok_or_else(|| ExtractError::invariant(format!("unknown vertex id {}", id)))?;
            if vertex.owner == owner {
                vertices.push(vertex.clone());
            }
        }
        let edges = self
            .edges
            .iter()
            .filter(|e| e.owner == owner)
            .cloned()
            .collect();
        Graph::new(owner, name, start, vertices, edges)
    }

    /// Assemble `pending` and its nested functions against the arena as it
    /// is now
    pub fn materialize(&self, pending: &PendingGraph) -> Result<Graph> {
        let mut graph = self.build_graph(pending.owner, &pending.name, pending.start, &pending.vertices)?;
        for sub in &pending.subgraphs {
            graph.add_subgraph(self.materialize(sub)?);
        }
        Ok(graph)
    }
}
