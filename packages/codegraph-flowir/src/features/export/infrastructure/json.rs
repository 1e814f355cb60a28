//! JSON exporter: the serde form of the finished graph

use crate::errors::Result;
use crate::features::export::ports::GraphExporter;
use crate::features::ir_graph::Graph;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const JSON_FILE: &str = "graph.json";

#[derive(Debug, Clone, Copy)]
pub struct JsonExporter {
    pub pretty: bool,
}

impl Default for JsonExporter {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl GraphExporter for JsonExporter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn export(&self, graph: &Graph, out_dir: &Path) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(out_dir)?;
        let path = out_dir.join(JSON_FILE);
        let mut writer = BufWriter::new(File::create(&path)?);
        if self.pretty {
            serde_json::to_writer_pretty(&mut writer, graph)?;
        } else {
            serde_json::to_writer(&mut writer, graph)?;
        }
        writer.flush()?;
        tracing::debug!(path = %path.display(), "json written");
        Ok(vec![path])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::ir_graph::{EdgeLabel, IrSession, VertexKind};

    #[test]
    fn test_json_round_trips_graph() {
        let mut session = IrSession::new();
        let owner = session.enter_graph();
        let start = session.create_vertex(VertexKind::Start { name: "main".into() }, None);
        let ret = session.create_vertex(VertexKind::Return, None);
        session.link_control(start, ret, EdgeLabel::Next).unwrap();
        let graph = session.build_graph(owner, "main", start, &[start, ret]).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let written = JsonExporter::default().export(&graph, dir.path()).unwrap();
        let text = std::fs::read_to_string(&written[0]).unwrap();
        let back: Graph = serde_json::from_str(&text).unwrap();
        assert_eq!(back, graph);
    }
}
