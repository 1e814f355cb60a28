//! Error types for codegraph-flowir
//!
//! Every failure aborts extraction for the current input; there is no
//! partial graph.

use crate::config::ConfigError;
use crate::shared::models::Span;
use thiserror::Error;

/// Main error type for extraction operations
#[derive(Debug, Error)]
pub enum ExtractError {
    /// An AST node kind or operator token has no translation rule
    #[error("Unsupported construct `{kind}`{}", at(.span))]
    UnsupportedConstruct { kind: String, span: Option<Span> },

    /// A structural precondition of the input is violated
    #[error("Malformed input: {reason}{}", at(.span))]
    MalformedInput { reason: String, span: Option<Span> },

    /// A free identifier survived every backpatching opportunity
    #[error("Undefined symbol `{name}`{}", at(.span))]
    UndefinedSymbol { name: String, span: Option<Span> },

    /// The IR builder broke one of its own invariants
    #[error("Internal invariant violation: {message}")]
    InternalInvariantViolation { message: String },

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn at(span: &Option<Span>) -> String {
    match span {
        Some(span) => format!(" at {}", span),
        None => String::new(),
    }
}

/// Coarse classification of [`ExtractError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnsupportedConstruct,
    MalformedInput,
    UndefinedSymbol,
    InternalInvariantViolation,
    Parse,
    Io,
    Config,
    Serialization,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::UnsupportedConstruct => "unsupported_construct",
            ErrorKind::MalformedInput => "malformed_input",
            ErrorKind::UndefinedSymbol => "undefined_symbol",
            ErrorKind::InternalInvariantViolation => "internal_invariant_violation",
            ErrorKind::Parse => "parse",
            ErrorKind::Io => "io",
            ErrorKind::Config => "config",
            ErrorKind::Serialization => "serialization",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ExtractError {
    /// Create an unsupported-construct error
    pub fn unsupported(kind: impl Into<String>, span: Option<Span>) -> Self {
        ExtractError::UnsupportedConstruct {
            kind: kind.into(),
            span,
        }
    }

    /// Create a malformed-input error
    pub fn malformed(reason: impl Into<String>, span: Option<Span>) -> Self {
        ExtractError::MalformedInput {
            reason: reason.into(),
            span,
        }
    }

    /// Create an undefined-symbol error
    pub fn undefined(name: impl Into<String>, span: Option<Span>) -> Self {
        ExtractError::UndefinedSymbol {
            name: name.into(),
            span,
        }
    }

    /// Create an internal invariant violation
    pub fn invariant(message: impl Into<String>) -> Self {
        ExtractError::InternalInvariantViolation {
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse_error(msg: impl Into<String>) -> Self {
        ExtractError::Parse(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ExtractError::UnsupportedConstruct { .. } => ErrorKind::UnsupportedConstruct,
            ExtractError::MalformedInput { .. } => ErrorKind::MalformedInput,
            ExtractError::UndefinedSymbol { .. } => ErrorKind::UndefinedSymbol,
            ExtractError::InternalInvariantViolation { .. } => {
                ErrorKind::InternalInvariantViolation
            }
            ExtractError::Parse(_) => ErrorKind::Parse,
            ExtractError::Io(_) => ErrorKind::Io,
            ExtractError::Config(_) => ErrorKind::Config,
            ExtractError::Serialization(_) => ErrorKind::Serialization,
        }
    }

    /// Source position of the offending node, when known
    pub fn span(&self) -> Option<Span> {
        match self {
            ExtractError::UnsupportedConstruct { span, .. }
            | ExtractError::MalformedInput { span, .. }
            | ExtractError::UndefinedSymbol { span, .. } => *span,
            _ => None,
        }
    }
}

/// Result type alias for extraction operations
pub type Result<T> = std::result::Result<T, ExtractError>;
