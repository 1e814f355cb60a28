//! IR edges

use super::vertex::{GraphId, VertexId};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// Execution order
    Control,
    /// Operand/value dependency (producer → consumer)
    Data,
    /// Structural link (phi → merge, parameter → start, ...)
    Association,
}

impl EdgeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Control => "control",
            Self::Data => "data",
            Self::Association => "association",
        }
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Edge provenance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum EdgeLabel {
    // Control
    Next,
    True,
    False,
    LoopBack,
    Continue,
    Break,

    // Data
    Condition,
    Left,
    Right,
    Operand,
    Callee,
    Arg { position: usize },
    Object,
    Property,
    Value,
    PhiOperand { predecessor: VertexId },

    // Association
    Merge,
    Parameter,
    Function,
    Member,
}

impl fmt::Display for EdgeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Next => f.write_str("next"),
            Self::True => f.write_str("true"),
            Self::False => f.write_str("false"),
            Self::LoopBack => f.write_str("loop"),
            Self::Continue => f.write_str("continue"),
            Self::Break => f.write_str("break"),
            Self::Condition => f.write_str("condition"),
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
            Self::Operand => f.write_str("operand"),
            Self::Callee => f.write_str("callee"),
            Self::Arg { position } => write!(f, "pos:{}", position),
            Self::Object => f.write_str("object"),
            Self::Property => f.write_str("property"),
            Self::Value => f.write_str("value"),
            Self::PhiOperand { predecessor } => write!(f, "from:{}", predecessor),
            Self::Merge => f.write_str("merge"),
            Self::Parameter => f.write_str("parameter"),
            Self::Function => f.write_str("function"),
            Self::Member => f.write_str("member"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub source: VertexId,
    pub target: VertexId,
    pub kind: EdgeKind,
    pub label: EdgeLabel,
    /// Graph that was being built when the edge was created
    pub owner: GraphId,
}

impl Edge {
    #[inline]
    pub fn is_control(&self) -> bool {
        self.kind == EdgeKind::Control
    }

    pub fn touches(&self, id: VertexId) -> bool {
        self.source == id || self.target == id
    }
}
