//! IR generation ports

mod ir_extractor;

pub use ir_extractor::IrExtractor;
