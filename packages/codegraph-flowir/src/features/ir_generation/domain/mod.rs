//! IR generation domain models

mod backpatch;
mod operator_table;
mod semantics;
mod symbol_table;

pub use backpatch::{BackpatchTable, PendingReference};
pub use operator_table::{
    binary_operator, compound_assignment_operator, unary_operator, update_operator,
};
pub use semantics::{
    ControlChain, ExpressionSemantics, PendingAccess, Semantics, SemanticsCore,
    StatementSemantics,
};
pub use symbol_table::SymbolTable;
