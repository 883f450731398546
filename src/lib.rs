pub mod error;
pub mod math;
pub mod topology;
pub mod traversal;

#[cfg(test)]
mod testing;

pub use error::{GraphError, PathError, PointError, Result, WalkerError};
pub use topology::{Graph, Line, LineId, Node, NodeId, Vertex};
pub use traversal::{Direction, Guide, Point, Walker, WalkerConfig};
