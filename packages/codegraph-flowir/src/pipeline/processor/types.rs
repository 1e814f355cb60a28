use crate::features::ir_graph::{Graph, GraphStats};
use serde::Serialize;
use std::time::Duration;

/// Outcome of processing one input
#[derive(Debug, Clone, Serialize)]
pub struct ProcessResult {
    pub file_path: String,
    pub graph: Graph,
    pub stats: GraphStats,
    #[serde(skip)]
    pub elapsed: Duration,
}

impl ProcessResult {
    pub fn new(file_path: impl Into<String>, graph: Graph, elapsed: Duration) -> Self {
        let stats = GraphStats::collect(&graph);
        Self {
            file_path: file_path.into(),
            graph,
            stats,
            elapsed,
        }
    }
}
