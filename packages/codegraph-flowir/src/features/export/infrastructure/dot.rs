//! Graphviz exporter
//!
//! Node label `"<id> | <label>"`. Control vertices are diamonds, data
//! vertices rectangles. Arrowheads: control `normal`, data `onormal`,
//! association `vee` (dashed). Every function subgraph becomes a
//! `cluster_<start id>`.

use crate::errors::Result;
use crate::features::export::ports::GraphExporter;
use crate::features::ir_graph::{Edge, EdgeKind, Graph, Vertex, VertexCategory};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

pub const DOT_FILE: &str = "graph.dot";

#[derive(Debug, Clone, Copy, Default)]
pub struct DotExporter;

impl DotExporter {
    pub fn render(&self, graph: &Graph) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "digraph \"{}\" {{", escape(&graph.name));
        for vertex in &graph.vertices {
            write_vertex(&mut out, vertex, 1);
        }
        for sub in &graph.subgraphs {
            write_cluster(&mut out, sub, 1);
        }
        for edge in graph.all_edges() {
            write_edge(&mut out, edge);
        }
        out.push_str("}\n");
        out
    }
}

impl GraphExporter for DotExporter {
    fn name(&self) -> &'static str {
        "dot"
    }

    fn export(&self, graph: &Graph, out_dir: &Path) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(out_dir)?;
        let path = out_dir.join(DOT_FILE);
        fs::write(&path, self.render(graph))?;
        tracing::debug!(path = %path.display(), "dot written");
        Ok(vec![path])
    }
}

fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}

fn write_cluster(out: &mut String, graph: &Graph, depth: usize) {
    let pad = indent(depth);
    let _ = writeln!(out, "{}subgraph cluster_{} {{", pad, graph.start.0);
    let _ = writeln!(out, "{}  label=\"{}\";", pad, escape(&graph.name));
    for vertex in &graph.vertices {
        write_vertex(out, vertex, depth + 1);
    }
    for sub in &graph.subgraphs {
        write_cluster(out, sub, depth + 1);
    }
    let _ = writeln!(out, "{}}}", pad);
}

fn write_vertex(out: &mut String, vertex: &Vertex, depth: usize) {
    let shape = match vertex.category() {
        VertexCategory::Control => "diamond",
        VertexCategory::Data => "rectangle",
    };
    let _ = writeln!(
        out,
        "{}{} [label=\"{} | {}\", shape={}];",
        indent(depth),
        vertex.id.0,
        vertex.id.0,
        escape(&vertex.label()),
        shape
    );
}

fn write_edge(out: &mut String, edge: &Edge) {
    let arrowhead = match edge.kind {
        EdgeKind::Control => "normal",
        EdgeKind::Data => "onormal",
        EdgeKind::Association => "vee",
    };
    let style = if edge.kind == EdgeKind::Association {
        ", style=dashed"
    } else {
        ""
    };
    let _ = writeln!(
        out,
        "  {} -> {} [label=\"{}\", arrowhead={}{}];",
        edge.source.0,
        edge.target.0,
        escape(&edge.label.to_string()),
        arrowhead,
        style
    );
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            _ => escaped.push(c),
        }
    }
    escaped
}
