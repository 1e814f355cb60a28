use crate::config::ExtractorConfig;
use crate::errors::Result;
use crate::features::ir_generation::infrastructure::TranslatingExtractor;
use crate::features::ir_generation::ports::IrExtractor;
use crate::features::ir_graph::Graph;
use crate::features::parsing::domain::SourceUnit;

pub struct ExtractIrUseCase<E: IrExtractor> {
    extractor: E,
}

impl<E: IrExtractor> ExtractIrUseCase<E> {
    pub fn new(extractor: E) -> Self {
        Self { extractor }
    }

    pub fn execute(&self, units: &[SourceUnit]) -> Result<Graph> {
        self.extractor.extract(units)
    }
}

/// Extract the root graph of a single-unit program
pub fn extract_program(units: &[SourceUnit], config: &ExtractorConfig) -> Result<Graph> {
    ExtractIrUseCase::new(TranslatingExtractor::new(config.clone())).execute(units)
}
