use crate::math::Point3;

use super::line::LineId;
use super::vertex::Vertex;

slotmap::new_key_type! {
    /// Unique identifier for a node in a graph.
    pub struct NodeId;
}

/// A junction where lines meet.
///
/// Nodes are created by [`Graph`](super::Graph) and only grow their line lists
/// when a line touching them is added.
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    vertex: Vertex,
    incoming: Vec<LineId>,
    outgoing: Vec<LineId>,
}

impl Node {
    pub(crate) fn new(id: NodeId, vertex: Vertex) -> Self {
        Self {
            id,
            vertex,
            incoming: Vec::new(),
            outgoing: Vec::new(),
        }
    }

    /// Returns the node's handle.
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the vertex this node sits on.
    #[must_use]
    pub fn vertex(&self) -> &Vertex {
        &self.vertex
    }

    /// Returns the node's position.
    #[must_use]
    pub fn position(&self) -> &Point3 {
        &self.vertex.position
    }

    /// Lines ending at this node.
    #[must_use]
    pub fn incoming(&self) -> &[LineId] {
        &self.incoming
    }

    /// Lines starting at this node.
    #[must_use]
    pub fn outgoing(&self) -> &[LineId] {
        &self.outgoing
    }

    pub(crate) fn add_incoming(&mut self, line: LineId) {
        self.incoming.push(line);
    }

    pub(crate) fn add_outgoing(&mut self, line: LineId) {
        self.outgoing.push(line);
    }
}
