//! Graph statistics

use super::graph::Graph;
use super::vertex::VertexCategory;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    pub vertices: usize,
    pub edges: usize,
    /// Nested graphs at any depth
    pub subgraphs: usize,
    pub control_vertices: usize,
    pub data_vertices: usize,
    pub phis: usize,
    pub by_kind: BTreeMap<&'static str, usize>,
}

impl GraphStats {
    pub fn collect(graph: &Graph) -> Self {
        let mut stats = Self {
            edges: graph.all_edges().len(),
            subgraphs: graph.all_graphs().len() - 1,
            ..Self::default()
        };

        for v in graph.all_vertices() {
            stats.vertices += 1;
            match v.category() {
                VertexCategory::Control => stats.control_vertices += 1,
                VertexCategory::Data => stats.data_vertices += 1,
            }
            *stats.by_kind.entry(v.kind.kind_name()).or_insert(0) += 1;
        }
        stats.phis = stats.count("phi");
        stats
    }

    pub fn count(&self, kind_name: &str) -> usize {
        self.by_kind.get(kind_name).copied().unwrap_or(0)
    }
}

impl fmt::Display for GraphStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} vertices ({} control, {} data), {} edges, {} subgraphs, {} phis",
            self.vertices,
            self.control_vertices,
            self.data_vertices,
            self.edges,
            self.subgraphs,
            self.phis
        )
    }
}
