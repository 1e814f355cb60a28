//! IR generation infrastructure

pub mod extractor;
pub mod loop_scanner;
pub mod translator;

pub use extractor::TranslatingExtractor;
pub use translator::Translator;
