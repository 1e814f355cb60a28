use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Graphviz `graph.dot`
    #[default]
    Dot,
    /// Tab-separated `vertices.facts` and `edges.facts`
    Relations,
    /// `graph.json`
    Json,
    /// Every format above
    All,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Dot => "dot",
            ExportFormat::Relations => "relations",
            ExportFormat::Json => "json",
            ExportFormat::All => "all",
        }
    }

    /// Concrete formats this selection expands to
    pub fn expand(self) -> Vec<ExportFormat> {
        match self {
            ExportFormat::All => vec![ExportFormat::Dot, ExportFormat::Relations, ExportFormat::Json],
            other => vec![other],
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
