//! Translator-backed IrExtractor

use super::translator::Translator;
use crate::config::{ExtractorConfig, FreeIdentifierPolicy};
use crate::errors::{ExtractError, Result};
use crate::features::ir_generation::ports::IrExtractor;
use crate::features::ir_graph::{verify_with, Graph, GraphStats, IrSession, VerifyOptions};
use crate::features::parsing::domain::SourceUnit;
use tracing::{debug, info};

/// Runs one translation per `extract` call on a fresh [`IrSession`], so
/// vertex ids restart at 0 and identical input yields identical output
#[derive(Debug, Clone, Default)]
pub struct TranslatingExtractor {
    config: ExtractorConfig,
}

impl TranslatingExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }
}

impl IrExtractor for TranslatingExtractor {
    fn extract(&self, units: &[SourceUnit]) -> Result<Graph> {
        let unit = match units {
            [unit] => unit,
            _ => {
                return Err(ExtractError::malformed(
                    format!("expected exactly one compilation unit, got {}", units.len()),
                    None,
                ))
            }
        };
        self.config.validate()?;

        let mut session = IrSession::new();
        let graph = Translator::new(&mut session, &self.config).translate_program(unit)?;
        debug!(
            file = %unit.file_path,
            session_vertices = session.vertex_count(),
            session_edges = session.edge_count(),
            "translation finished"
        );

        if self.config.verify {
            let options = VerifyOptions::new(
                self.config.free_identifiers == FreeIdentifierPolicy::Error,
                session.resolved_placeholders(),
            );
            verify_with(&graph, &options)?;
        }

        let stats = GraphStats::collect(&graph);
        info!(
            file = %unit.file_path,
            vertices = stats.vertices,
            edges = stats.edges,
            subgraphs = stats.subgraphs,
            phis = stats.phis,
            "graph extracted"
        );
        Ok(graph)
    }
}
