//! Structural verifier for finished graphs
//!
//! Checked per (sub)graph:
//! - exactly one Start vertex, the graph entry, with no incoming control edge
//! - control out-degree: Return 0, Break/Continue 1, Branch/While exactly one
//!   `true` and one `false` edge, every other control vertex 1
//! - every Merge has at least one control predecessor
//! - every Phi is associated with exactly one Merge and carries one operand
//!   per control predecessor of that Merge
//! - edge endpoints exist and no edge touches a Symbol placeholder that was
//!   resolved; with free identifiers disallowed no Symbol vertex is left
//! - a Return is reachable from Start over control edges

use crate::errors::{ExtractError, Result};
use crate::features::ir_graph::domain::{
    EdgeKind, EdgeLabel, Graph, Vertex, VertexId, VertexKind,
};
use rustc_hash::{FxHashMap, FxHashSet};

/// Extraction facts the graph alone does not record
#[derive(Debug, Clone, Default)]
pub struct VerifyOptions {
    /// Unresolved Symbol vertices are an error
    pub reject_placeholders: bool,
    /// Placeholders retargeted during translation
    pub resolved: FxHashSet<VertexId>,
}

impl VerifyOptions {
    pub fn new(reject_placeholders: bool, resolved: impl IntoIterator<Item = VertexId>) -> Self {
        Self {
            reject_placeholders,
            resolved: resolved.into_iter().collect(),
        }
    }
}

/// Structural checks only; free Symbol vertices are accepted
pub fn verify(graph: &Graph) -> Result<()> {
    verify_with(graph, &VerifyOptions::default())
}

pub fn verify_with(graph: &Graph, options: &VerifyOptions) -> Result<()> {
    let known: FxHashSet<VertexId> = graph.all_vertices().iter().map(|v| v.id).collect();
    for g in graph.all_graphs() {
        verify_placeholders(g, options)?;
        verify_one(g, &known)?;
    }
    tracing::trace!(graph = %graph.name, "graph verified");
    Ok(())
}

fn violation(graph: &Graph, message: String) -> ExtractError {
    ExtractError::invariant(format!("graph '{}': {}", graph.name, message))
}

fn verify_placeholders(graph: &Graph, options: &VerifyOptions) -> Result<()> {
    for v in &graph.vertices {
        if !v.kind.is_placeholder() {
            continue;
        }
        if options.resolved.contains(&v.id) {
            return Err(violation(graph, format!("resolved placeholder {} ({}) is still present", v.id, v.label())));
        }
        if options.reject_placeholders {
            return Err(violation(graph, format!("unresolved placeholder {} ({})", v.id, v.label())));
        }
    }
    for edge in &graph.edges {
        if let Some(end) = [edge.source, edge.target]
            .into_iter()
            .find(|end| options.resolved.contains(end))
        {
            return Err(violation(
                graph,
                format!("edge {} -> {} touches resolved placeholder {}", edge.source, edge.target, end),
            ));
        }
    }
    Ok(())
}

fn verify_one(graph: &Graph, known: &FxHashSet<VertexId>) -> Result<()> {
    for edge in &graph.edges {
        for end in [edge.source, edge.target] {
            if !known.contains(&end) {
                return Err(violation(
                    graph,
                    format!("edge {} -> {} references missing vertex {}", edge.source, edge.target, end),
                ));
            }
        }
    }

    let starts: Vec<&Vertex> = graph
        .vertices
        .iter()
        .filter(|v| matches!(v.kind, VertexKind::Start { .. }))
        .collect();
    if starts.len() != 1 || starts[0].id != graph.start {
        return Err(violation(
            graph,
            format!("expected exactly one start vertex (entry {}), found {}", graph.start, starts.len()),
        ));
    }

    let mut control_out: FxHashMap<VertexId, Vec<EdgeLabel>> = FxHashMap::default();
    let mut control_in: FxHashMap<VertexId, Vec<VertexId>> = FxHashMap::default();
    for e in graph.edges.iter().filter(|e| e.kind == EdgeKind::Control) {
        control_out.entry(e.source).or_default().push(e.label);
        control_in.entry(e.target).or_default().push(e.source);
    }

    if control_in.contains_key(&graph.start) {
        return Err(violation(graph, "start vertex has an incoming control edge".to_string()));
    }

    let mut returns = Vec::new();
    for v in graph.vertices.iter().filter(|v| v.kind.is_control()) {
        let out = control_out.get(&v.id).map(Vec::as_slice).unwrap_or(&[]);
        match v.kind {
            VertexKind::Return => {
                returns.push(v.id);
                if !out.is_empty() {
                    return Err(violation(graph, format!("return {} has a control successor", v.id)));
                }
            }
            VertexKind::Branch | VertexKind::While => {
                let has = |l: EdgeLabel| out.iter().filter(|&&x| x == l).count() == 1;
                if out.len() != 2 || !has(EdgeLabel::True) || !has(EdgeLabel::False) {
                    return Err(violation(
                        graph,
                        format!("{} {} needs one true and one false edge, has {:?}", v.kind.kind_name(), v.id, out),
                    ));
                }
            }
            _ => {
                if out.len() != 1 {
                    return Err(violation(
                        graph,
                        format!("{} {} has {} control successors, expected 1", v.kind.kind_name(), v.id, out.len()),
                    ));
                }
            }
        }
        if matches!(v.kind, VertexKind::Merge) && !control_in.contains_key(&v.id) {
            return Err(violation(graph, format!("merge {} has no control predecessor", v.id)));
        }
    }

    for phi in graph.vertices.iter().filter(|v| matches!(v.kind, VertexKind::Phi)) {
        verify_phi(graph, phi.id, &control_in)?;
    }

    let view = graph.control_flow_petgraph();
    if !returns.iter().any(|&r| view.has_path(graph.start, r)) {
        return Err(violation(graph, "no return reachable from start".to_string()));
    }
    Ok(())
}

fn verify_phi(
    graph: &Graph,
    phi: VertexId,
    control_in: &FxHashMap<VertexId, Vec<VertexId>>,
) -> Result<()> {
    let merges: Vec<VertexId> = graph
        .outgoing(phi)
        .filter(|e| e.kind == EdgeKind::Association && e.label == EdgeLabel::Merge)
        .map(|e| e.target)
        .collect();
    let merge = match merges.as_slice() {
        [m] if matches!(graph.vertex(*m).map(|v| &v.kind), Some(VertexKind::Merge)) => *m,
        _ => {
            return Err(violation(graph, format!("phi {} is not associated with exactly one merge", phi)));
        }
    };

    let mut operands: Vec<VertexId> = graph
        .incoming(phi)
        .filter_map(|e| match e.label {
            EdgeLabel::PhiOperand { predecessor } => Some(predecessor),
            _ => None,
        })
        .collect();
    let mut predecessors = control_in.get(&merge).cloned().unwrap_or_default();
    operands.sort();
    predecessors.sort();
    if operands != predecessors {
        return Err(violation(
            graph,
            format!(
                "phi {} operands tagged {:?} do not match merge {} predecessors {:?}",
                phi, operands, merge, predecessors
            ),
        ));
    }
    Ok(())
}
