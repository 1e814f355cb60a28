//! Exporters over extracted graphs

mod common;

use codegraph_flowir::features::export::{
    exporters_for, DotExporter, ExportFormat, RelationsExporter,
};
use codegraph_flowir::Graph;
use common::*;
use std::fs;
use tempfile::TempDir;

const LOOP: &str = "function count(n) { let i = 0; while (i < n) { i = i + 1; } return i; } count(3);";

#[test]
fn test_all_formats_written() {
    let graph = extract(LOOP);
    let dir = TempDir::new().unwrap();

    let mut written = Vec::new();
    for exporter in exporters_for(ExportFormat::All) {
        written.extend(exporter.export(&graph, dir.path()).unwrap());
    }
    let mut names: Vec<String> = written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["edges.facts", "graph.dot", "graph.json", "vertices.facts"]);

    let json = fs::read_to_string(dir.path().join("graph.json")).unwrap();
    let back: Graph = serde_json::from_str(&json).unwrap();
    assert_eq!(back, graph);
}

#[test]
fn test_dot_clusters_and_edge_styles() {
    let graph = extract(LOOP);
    let count = graph.find_graph("count").unwrap();
    let dot = DotExporter.render(&graph);

    assert!(dot.starts_with("digraph \"main\" {"));
    assert!(dot.contains(&format!("subgraph cluster_{} {{", count.start.0)));
    assert!(dot.contains("label=\"count\";"));
    assert!(dot.contains("[label=\"loop\", arrowhead=normal]"));
    assert!(dot.contains("arrowhead=vee, style=dashed"));
    assert!(dot.contains("shape=diamond"));
    assert!(dot.contains("shape=rectangle"));
    assert!(dot.trim_end().ends_with('}'));
}

#[test]
fn test_relation_facts_cover_every_subgraph() {
    let graph = extract(LOOP);
    let mut vertices = Vec::new();
    let mut edges = Vec::new();
    RelationsExporter.write_vertices(&graph, &mut vertices).unwrap();
    RelationsExporter.write_edges(&graph, &mut edges).unwrap();

    let vertices = String::from_utf8(vertices).unwrap();
    let edges = String::from_utf8(edges).unwrap();
    assert_eq!(vertices.lines().count(), graph.all_vertices().len());
    assert_eq!(edges.lines().count(), graph.all_edges().len());

    let phi = single(&graph, "phi").id;
    assert!(vertices
        .lines()
        .any(|l| l == format!("{}\tphi\tdata\tphi", phi)));
    assert!(edges.lines().all(|l| l.split('\t').count() == 4));
}
