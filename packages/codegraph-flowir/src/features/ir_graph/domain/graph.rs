//! Finished IR graph
//!
//! A `Graph` is immutable once its owning function/program has been
//! translated. Nested functions and methods are subgraphs, each with its own
//! Start vertex.

use super::edge::{Edge, EdgeKind, EdgeLabel};
use super::vertex::{GraphId, Vertex, VertexId, VertexKind};
use crate::errors::{ExtractError, Result};
use petgraph::algo::has_path_connecting;
use petgraph::graph::{DiGraph, NodeIndex};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    pub id: GraphId,
    pub name: String,
    pub start: VertexId,
    /// Sorted by id
    pub vertices: Vec<Vertex>,
    pub edges: Vec<Edge>,
    pub subgraphs: Vec<Graph>,
}

impl Graph {
    pub fn new(
        id: GraphId,
        name: impl Into<String>,
        start: VertexId,
        mut vertices: Vec<Vertex>,
        edges: Vec<Edge>,
    ) -> Result<Self> {
        vertices.sort_by_key(|v| v.id);
        vertices.dedup_by_key(|v| v.id);

        let graph = Self {
            id,
            name: name.into(),
            start,
            vertices,
            edges,
            subgraphs: Vec::new(),
        };

        match graph.vertex(start).map(|v| &v.kind) {
            Some(VertexKind::Start { .. }) => Ok(graph),
            Some(other) => Err(ExtractError::invariant(format!(
                "graph '{}' entry {} is a {} vertex, expected start",
                graph.name,
                start,
                other.kind_name()
            ))),
            None => Err(ExtractError::invariant(format!(
                "graph '{}' entry {} is not one of its vertices",
                graph.name, start
            ))),
        }
    }

    pub fn add_subgraph(&mut self, graph: Graph) {
        self.subgraphs.push(graph);
    }

    /// Local lookup (this graph only)
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices
            .binary_search_by_key(&id, |v| v.id)
            .ok()
            .map(|i| &self.vertices[i])
    }

    /// Recursive lookup through subgraphs
    pub fn find_vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertex(id)
            .or_else(|| self.subgraphs.iter().find_map(|g| g.find_vertex(id)))
    }

    /// Depth-first search for a (sub)graph by name, including `self`
    pub fn find_graph(&self, name: &str) -> Option<&Graph> {
        if self.name == name {
            return Some(self);
        }
        self.subgraphs.iter().find_map(|g| g.find_graph(name))
    }

    pub fn start_vertex(&self) -> Option<&Vertex> {
        self.vertex(self.start)
    }

    /// Every vertex, recursively including subgraphs
    pub fn all_vertices(&self) -> Vec<&Vertex> {
        let mut out: Vec<&Vertex> = self.vertices.iter().collect();
        for sub in &self.subgraphs {
            out.extend(sub.all_vertices());
        }
        out
    }

    /// Every edge, recursively including subgraphs
    pub fn all_edges(&self) -> Vec<&Edge> {
        let mut out: Vec<&Edge> = self.edges.iter().collect();
        for sub in &self.subgraphs {
            out.extend(sub.all_edges());
        }
        out
    }

    /// Every graph in the tree, `self` first
    pub fn all_graphs(&self) -> Vec<&Graph> {
        let mut out = vec![self];
        for sub in &self.subgraphs {
            out.extend(sub.all_graphs());
        }
        out
    }

    pub fn outgoing(&self, id: VertexId) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter().filter(move |e| e.source == id)
    }

    pub fn incoming(&self, id: VertexId) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter().filter(move |e| e.target == id)
    }

    /// Control successors of `id` with the edge label, in creation order
    pub fn control_successors(&self, id: VertexId) -> Vec<(EdgeLabel, VertexId)> {
        self.outgoing(id)
            .filter(|e| e.is_control())
            .map(|e| (e.label, e.target))
            .collect()
    }

    pub fn control_predecessors(&self, id: VertexId) -> Vec<VertexId> {
        self.incoming(id)
            .filter(|e| e.is_control())
            .map(|e| e.source)
            .collect()
    }

    /// petgraph view of every local vertex and every edge between them
    pub fn to_petgraph(&self) -> PetgraphView {
        self.petgraph_filtered(|_| true)
    }

    /// petgraph view restricted to Control edges
    pub fn control_flow_petgraph(&self) -> PetgraphView {
        self.petgraph_filtered(|e| e.kind == EdgeKind::Control)
    }

    fn petgraph_filtered(&self, keep: impl Fn(&Edge) -> bool) -> PetgraphView {
        let mut graph = DiGraph::with_capacity(self.vertices.len(), self.edges.len());
        let mut index = FxHashMap::default();
        for v in &self.vertices {
            index.insert(v.id, graph.add_node(v.id));
        }
        for e in self.edges.iter().filter(|e| keep(*e)) {
            if let (Some(&s), Some(&t)) = (index.get(&e.source), index.get(&e.target)) {
                graph.add_edge(s, t, e.label);
            }
        }
        PetgraphView { graph, index }
    }
}

/// petgraph projection of one [`Graph`] level
#[derive(Debug, Clone)]
pub struct PetgraphView {
    pub graph: DiGraph<VertexId, EdgeLabel>,
    pub index: FxHashMap<VertexId, NodeIndex>,
}

impl PetgraphView {
    pub fn node(&self, id: VertexId) -> Option<NodeIndex> {
        self.index.get(&id).copied()
    }

    pub fn has_path(&self, from: VertexId, to: VertexId) -> bool {
        match (self.node(from), self.node(to)) {
            (Some(a), Some(b)) => has_path_connecting(&self.graph, a, b, None),
            _ => false,
        }
    }
}
