pub mod edge;
pub mod graph;
pub mod operators;
pub mod stats;
pub mod vertex;

pub use edge::{Edge, EdgeKind, EdgeLabel};
pub use graph::{Graph, PetgraphView};
pub use operators::{BinaryOperator, UnaryOperator};
pub use stats::GraphStats;
pub use vertex::{GraphId, LiteralKey, LiteralValue, Vertex, VertexCategory, VertexId, VertexKind};
