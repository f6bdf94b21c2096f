//! Errors reported by the enumeration engine.

use std::fmt;

use crate::kind::Kind;

/// Everything that can go wrong while planning, enumerating or exporting.
#[derive(Debug)]
pub enum Error {
    /// A requested column name is not part of the kind vocabulary.
    UnknownKind { name: String },

    /// No kinds were requested.
    EmptyRequest,

    /// The maximum order lies below the minimum order.
    InvalidOrderRange { min: usize, max: usize },

    /// The kind is a scalar column and has no shapes to materialize.
    NoShapes { kind: Kind },

    /// The boundary walk took more steps than any polyomino of this order can have.
    BoundaryOverrun { order: usize, steps: usize },

    /// The boundary walk reached a vertex with no shape cell on any side.
    BoundaryStuck { row: i32, col: i32 },

    /// Writing exported shapes failed.
    Io {
        operation: &'static str,
        source: std::io::Error,
    },

    /// Serializing a shape or the dependency graph failed.
    Json(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownKind { name } => write!(f, "Unknown kind '{name}'"),
            Self::EmptyRequest => write!(f, "At least one kind must be requested"),
            Self::InvalidOrderRange { min, max } => {
                write!(f, "Maximum order {max} is smaller than minimum order {min}")
            }
            Self::NoShapes { kind } => write!(f, "Kind '{kind}' does not describe shapes"),
            Self::BoundaryOverrun { order, steps } => write!(
                f,
                "Boundary walk exceeded {steps} steps on a polyomino of order {order}"
            ),
            Self::BoundaryStuck { row, col } => {
                write!(f, "Boundary walk got stuck at vertex ({row}, {col})")
            }
            Self::Io { operation, source } => write!(f, "I/O error during {operation}: {source}"),
            Self::Json(source) => write!(f, "JSON serialization failed: {source}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json(source) => Some(source),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
