//! Graph queries and assertions
//!
//! Queries run over the whole graph tree, subgraphs included, since data
//! edges may cross function boundaries.

use codegraph_flowir::{verify, EdgeKind, EdgeLabel, Graph, Vertex, VertexId};

/// Vertices whose kind name (`"phi"`, `"binary_op"`, ...) matches
pub fn vertices_of<'g>(graph: &'g Graph, kind: &str) -> Vec<&'g Vertex> {
    graph
        .all_vertices()
        .into_iter()
        .filter(|v| v.kind.kind_name() == kind)
        .collect()
}

/// The only vertex of `kind`
pub fn single<'g>(graph: &'g Graph, kind: &str) -> &'g Vertex {
    let found = vertices_of(graph, kind);
    assert_eq!(
        found.len(),
        1,
        "expected exactly one {kind} vertex, found {:?}",
        found.iter().map(|v| v.label()).collect::<Vec<_>>()
    );
    found[0]
}

pub fn vertex(graph: &Graph, id: VertexId) -> &Vertex {
    graph
        .find_vertex(id)
        .unwrap_or_else(|| panic!("vertex {id} not in graph"))
}

pub fn label_of(graph: &Graph, id: VertexId) -> String {
    vertex(graph, id).label()
}

/// Sources of data edges into `target` with `label`
pub fn data_inputs(graph: &Graph, target: VertexId, label: EdgeLabel) -> Vec<VertexId> {
    graph
        .all_edges()
        .into_iter()
        .filter(|e| e.kind == EdgeKind::Data && e.target == target && e.label == label)
        .map(|e| e.source)
        .collect()
}

/// Control successors of `source` with their labels
pub fn control_out(graph: &Graph, source: VertexId) -> Vec<(EdgeLabel, VertexId)> {
    graph
        .all_edges()
        .into_iter()
        .filter(|e| e.kind == EdgeKind::Control && e.source == source)
        .map(|e| (e.label, e.target))
        .collect()
}

pub fn control_in(graph: &Graph, target: VertexId) -> Vec<VertexId> {
    graph
        .all_edges()
        .into_iter()
        .filter(|e| e.kind == EdgeKind::Control && e.target == target)
        .map(|e| e.source)
        .collect()
}

/// `(predecessor, value)` operands of a phi, sorted by predecessor
pub fn phi_operands(graph: &Graph, phi: VertexId) -> Vec<(VertexId, VertexId)> {
    let mut operands: Vec<(VertexId, VertexId)> = graph
        .all_edges()
        .into_iter()
        .filter(|e| e.target == phi)
        .filter_map(|e| match e.label {
            EdgeLabel::PhiOperand { predecessor } => Some((predecessor, e.source)),
            _ => None,
        })
        .collect();
    operands.sort();
    operands
}

/// Merge a phi is associated with
pub fn phi_merge(graph: &Graph, phi: VertexId) -> VertexId {
    let merges: Vec<VertexId> = graph
        .all_edges()
        .into_iter()
        .filter(|e| e.source == phi && e.kind == EdgeKind::Association && e.label == EdgeLabel::Merge)
        .map(|e| e.target)
        .collect();
    assert_eq!(merges.len(), 1, "phi {phi} has merges {merges:?}");
    merges[0]
}

/// Value flowing into the (single) Return of `graph` itself
pub fn returned_value(graph: &Graph) -> VertexId {
    let returns: Vec<&Vertex> = graph
        .vertices
        .iter()
        .filter(|v| v.kind.kind_name() == "return")
        .collect();
    assert_eq!(returns.len(), 1, "expected one return in '{}'", graph.name);
    let values = data_inputs(graph, returns[0].id, EdgeLabel::Value);
    assert_eq!(values.len(), 1, "return in '{}' carries no value", graph.name);
    values[0]
}

pub fn assert_verified(graph: &Graph) {
    if let Err(e) = verify(graph) {
        panic!("graph failed verification: {e}");
    }
}
