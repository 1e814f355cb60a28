//! IR Graph Model
//!
//! Vertex/edge data model, the per-extraction `IrSession` arena, finished
//! `Graph`s, the structural verifier and statistics.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::{verify, verify_with, VerifyOptions};
pub use domain::{
    BinaryOperator, Edge, EdgeKind, EdgeLabel, Graph, GraphId, GraphStats, LiteralValue,
    PetgraphView, UnaryOperator, Vertex, VertexCategory, VertexId, VertexKind,
};
pub use infrastructure::{IrSession, PendingGraph};
