//! Parsing infrastructure
//!
//! This is where the tree-sitter dependency lives.

pub mod typescript;

pub use typescript::{Dialect, TypeScriptFrontend};
