use crate::errors::Result;
use crate::features::ir_graph::Graph;
use crate::features::parsing::domain::SourceUnit;

/// Lowers a program (a list of compilation units) into its root graph
pub trait IrExtractor: Send + Sync {
    fn extract(&self, units: &[SourceUnit]) -> Result<Graph>;
}
