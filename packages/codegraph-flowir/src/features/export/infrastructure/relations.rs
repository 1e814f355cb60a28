//! Flat relation facts for Datalog-style consumers
//!
//! `vertices.facts`: `id  kind  category  label`
//! `edges.facts`: `source  target  kind  label`
//!
//! Tab separated, one record per line, covering every subgraph.

use crate::errors::Result;
use crate::features::export::ports::GraphExporter;
use crate::features::ir_graph::Graph;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const VERTICES_FILE: &str = "vertices.facts";
pub const EDGES_FILE: &str = "edges.facts";

#[derive(Debug, Clone, Copy, Default)]
pub struct RelationsExporter;

impl RelationsExporter {
    pub fn write_vertices<W: Write>(&self, graph: &Graph, out: &mut W) -> Result<()> {
        for v in graph.all_vertices() {
            writeln!(
                out,
                "{}\t{}\t{}\t{}",
                v.id,
                v.kind.kind_name(),
                v.category().as_str(),
                escape(&v.label())
            )?;
        }
        Ok(())
    }

    pub fn write_edges<W: Write>(&self, graph: &Graph, out: &mut W) -> Result<()> {
        for e in graph.all_edges() {
            writeln!(
                out,
                "{}\t{}\t{}\t{}",
                e.source,
                e.target,
                e.kind.as_str(),
                escape(&e.label.to_string())
            )?;
        }
        Ok(())
    }
}

impl GraphExporter for RelationsExporter {
    fn name(&self) -> &'static str {
        "relations"
    }

    fn export(&self, graph: &Graph, out_dir: &Path) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(out_dir)?;

        let vertices_path = out_dir.join(VERTICES_FILE);
        let mut vertices = BufWriter::new(File::create(&vertices_path)?);
        self.write_vertices(graph, &mut vertices)?;
        vertices.flush()?;

        let edges_path = out_dir.join(EDGES_FILE);
        let mut edges = BufWriter::new(File::create(&edges_path)?);
        self.write_edges(graph, &mut edges)?;
        edges.flush()?;

        tracing::debug!(dir = %out_dir.display(), "relation facts written");
        Ok(vec![vertices_path, edges_path])
    }
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('\t', "\\t")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::ir_graph::{EdgeKind, EdgeLabel, IrSession, LiteralValue, VertexKind};
    use pretty_assertions::assert_eq;

    fn sample() -> Graph {
        let mut session = IrSession::new();
        let owner = session.enter_graph();
        let start = session.create_vertex(VertexKind::Start { name: "main".into() }, None);
        let text = session.literal(LiteralValue::String("a\tb".into()), None, false);
        let ret = session.create_vertex(VertexKind::Return, None);
        session.link_control(start, ret, EdgeLabel::Next).unwrap();
        session
            .create_edge(text, ret, EdgeKind::Data, EdgeLabel::Value)
            .unwrap();
        session.build_graph(owner, "main", start, &[start, text, ret]).unwrap()
    }

    #[test]
    fn test_vertex_records() {
        let mut buf = Vec::new();
        RelationsExporter.write_vertices(&sample(), &mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "0\tstart\tcontrol\tstart (main)\n1\tliteral\tdata\ta\\tb\n2\treturn\tcontrol\treturn\n"
        );
    }

    #[test]
    fn test_edge_records() {
        let mut buf = Vec::new();
        RelationsExporter.write_edges(&sample(), &mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "0\t2\tcontrol\tnext\n1\t2\tdata\tvalue\n"
        );
    }

    #[test]
    fn test_export_writes_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let written = RelationsExporter.export(&sample(), dir.path()).unwrap();
        assert_eq!(written.len(), 2);
        assert!(written.iter().all(|p| p.exists()));
    }
}
