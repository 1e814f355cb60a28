//! Parse file use case

use crate::errors::Result;
use crate::features::parsing::domain::SourceUnit;
use crate::features::parsing::ports::SourceFrontend;

/// Parse file use case
pub struct ParseFileUseCase<F: SourceFrontend> {
    frontend: F,
}

impl<F: SourceFrontend> ParseFileUseCase<F> {
    pub fn new(frontend: F) -> Self {
        Self { frontend }
    }

    /// Execute the parse operation
    pub fn execute(&self, source: &str, file_path: &str) -> Result<SourceUnit> {
        self.frontend.parse(source, file_path)
    }

    /// Execute for multiple files
    pub fn execute_batch(&self, files: &[(String, String)]) -> Vec<Result<SourceUnit>> {
        files
            .iter()
            .map(|(path, source)| self.frontend.parse(source, path))
            .collect()
    }
}
