//! IR vertices
//!
//! One closed [`VertexKind`] enumeration covers every control and data
//! vertex; the category is derived from the variant, never stored twice.

use super::operators::{BinaryOperator, UnaryOperator};
use crate::shared::models::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Session-unique vertex identifier (also the vertex's index in the session arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VertexId(pub u32);

impl VertexId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies the function graph (program, function or method) a vertex or
/// edge was created for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GraphId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VertexCategory {
    Control,
    Data,
}

impl VertexCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Control => "control",
            Self::Data => "data",
        }
    }
}

impl fmt::Display for VertexCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum LiteralValue {
    Number(f64),
    String(String),
    Bool(bool),
    Null,
    Undefined,
}

impl LiteralValue {
    /// Hashable identity used for literal interning
    pub fn intern_key(&self) -> LiteralKey {
        match self {
            Self::Number(n) => LiteralKey::Number(n.to_bits()),
            Self::String(s) => LiteralKey::String(s.clone()),
            Self::Bool(b) => LiteralKey::Bool(*b),
            Self::Null => LiteralKey::Null,
            Self::Undefined => LiteralKey::Undefined,
        }
    }
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            Self::Number(n) => write!(f, "{}", n),
            Self::String(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Null => f.write_str("null"),
            Self::Undefined => f.write_str("undefined"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LiteralKey {
    Number(u64),
    String(String),
    Bool(bool),
    Null,
    Undefined,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VertexKind {
    // Control
    Start { name: String },
    Return,
    Branch,
    While,
    Merge,
    Call,
    Load,
    Store,
    Allocation { class_name: String },
    Pass,
    BlockBegin,
    BlockEnd,
    Break,
    Continue,

    // Data
    Literal { value: LiteralValue },
    Parameter { position: usize, name: String },
    /// Placeholder for a name whose binding is not known yet
    Symbol { name: String },
    StaticSymbol { name: String },
    BinaryOp { operator: BinaryOperator },
    UnaryOp { operator: UnaryOperator },
    Phi,
}

impl VertexKind {
    pub fn category(&self) -> VertexCategory {
        match self {
            Self::Start { .. }
            | Self::Return
            | Self::Branch
            | Self::While
            | Self::Merge
            | Self::Call
            | Self::Load
            | Self::Store
            | Self::Allocation { .. }
            | Self::Pass
            | Self::BlockBegin
            | Self::BlockEnd
            | Self::Break
            | Self::Continue => VertexCategory::Control,
            Self::Literal { .. }
            | Self::Parameter { .. }
            | Self::Symbol { .. }
            | Self::StaticSymbol { .. }
            | Self::BinaryOp { .. }
            | Self::UnaryOp { .. }
            | Self::Phi => VertexCategory::Data,
        }
    }

    #[inline]
    pub fn is_control(&self) -> bool {
        self.category() == VertexCategory::Control
    }

    /// Return, Break and Continue end a control chain
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Return | Self::Break | Self::Continue)
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Symbol { .. })
    }

    /// Stable snake_case kind name, as written to relation facts
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Start { .. } => "start",
            Self::Return => "return",
            Self::Branch => "branch",
            Self::While => "while",
            Self::Merge => "merge",
            Self::Call => "call",
            Self::Load => "load",
            Self::Store => "store",
            Self::Allocation { .. } => "allocation",
            Self::Pass => "pass",
            Self::BlockBegin => "block_begin",
            Self::BlockEnd => "block_end",
            Self::Break => "break",
            Self::Continue => "continue",
            Self::Literal { .. } => "literal",
            Self::Parameter { .. } => "parameter",
            Self::Symbol { .. } => "symbol",
            Self::StaticSymbol { .. } => "static_symbol",
            Self::BinaryOp { .. } => "binary_op",
            Self::UnaryOp { .. } => "unary_op",
            Self::Phi => "phi",
        }
    }
}

/// Human-readable label
impl fmt::Display for VertexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start { name } => write!(f, "start ({})", name),
            Self::Branch => f.write_str("if"),
            Self::Allocation { class_name } => write!(f, "new {}", class_name),
            Self::BlockBegin => f.write_str("block begin"),
            Self::BlockEnd => f.write_str("block end"),
            Self::Literal { value } => write!(f, "{}", value),
            Self::Parameter { position, .. } => write!(f, "param ({})", position),
            Self::Symbol { name } => write!(f, "#{}", name),
            Self::StaticSymbol { name } => write!(f, "@{}", name),
            Self::BinaryOp { operator } => write!(f, "{}", operator),
            Self::UnaryOp { operator } => write!(f, "{}", operator),
            other => f.write_str(other.kind_name()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub id: VertexId,
    #[serde(flatten)]
    pub kind: VertexKind,
    pub owner: GraphId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

impl Vertex {
    #[inline]
    pub fn category(&self) -> VertexCategory {
        self.kind.category()
    }

    pub fn label(&self) -> String {
        self.kind.to_string()
    }
}
