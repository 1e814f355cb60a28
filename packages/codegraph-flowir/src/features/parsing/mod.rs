//! Parsing Feature
//!
//! Responsible for turning source text into the language-neutral AST.
//!
//! ## Structure
//! - `domain/` - SourceUnit, Statement, Expression
//! - `ports/` - SourceFrontend trait
//! - `application/` - ParseFileUseCase
//! - `infrastructure/` - tree-sitter TypeScript front-end

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::ParseFileUseCase;
pub use domain::SourceUnit;
pub use infrastructure::{Dialect, TypeScriptFrontend};
pub use ports::SourceFrontend;
