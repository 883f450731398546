use thiserror::Error;

use crate::topology::{LineId, NodeId};

/// Top-level error type for path graphs and their walkers.
#[derive(Debug, Error)]
pub enum PathError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Point(#[from] PointError),

    #[error(transparent)]
    Walker(#[from] WalkerError),
}

/// Errors raised while building a graph.
///
/// Every variant leaves the graph as it was before the failing call.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("graph already contains a node with key {0}")]
    DuplicateNode(String),

    #[error("graph already contains a line with key {0}")]
    DuplicateLine(String),

    #[error("node {0} does not exist and cannot be defined without vertices")]
    UndefinedNode(String),

    #[error("line {line} failed the consistency check: {reason}")]
    InconsistentLine { line: String, reason: &'static str },
}

/// Errors raised by point arithmetic.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PointError {
    #[error("points lie on different lines ({left:?} and {right:?})")]
    LineMismatch { left: LineId, right: LineId },
}

/// Errors that end a walker's traversal.
///
/// Apart from [`InvalidParameters`](WalkerError::InvalidParameters), every
/// variant leaves the walker invalid.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WalkerError {
    #[error("guide returned no continuation at node {node:?}")]
    DeadEnd { node: NodeId },

    #[error("line {line:?} does not touch node {node:?}")]
    NotAdjacent { line: LineId, node: NodeId },

    #[error("guide returned unknown line {0:?}")]
    UnknownLine(LineId),

    #[error("more than {limit} junction crossings in a single move")]
    CrossingLimit { limit: usize },

    #[error("walker is no longer valid")]
    Invalidated,

    #[error("invalid walker parameters: {0}")]
    InvalidParameters(String),
}

/// Convenience type alias for results using [`PathError`].
pub type Result<T> = std::result::Result<T, PathError>;
