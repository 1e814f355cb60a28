//! IR generation use cases

mod extract_ir;

pub use extract_ir::{extract_program, ExtractIrUseCase};
