use crate::errors::Result;
use crate::features::ir_graph::Graph;
use std::path::{Path, PathBuf};

/// Writes a finished graph into `out_dir`. The graph is immutable by now,
/// so exporters may run concurrently.
pub trait GraphExporter: Send + Sync {
    fn name(&self) -> &'static str;

    /// Returns the files written
    fn export(&self, graph: &Graph, out_dir: &Path) -> Result<Vec<PathBuf>>;
}
