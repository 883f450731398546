pub mod line;
pub mod node;
pub mod vertex;

pub use line::{Line, LineId};
pub use node::{Node, NodeId};
pub use vertex::Vertex;

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use rand::Rng;
use slotmap::{SecondaryMap, SlotMap};
use tracing::{debug, warn};

use crate::error::GraphError;
use crate::math::Point3;
use crate::traversal::{Guide, Point, Walker};

/// Central arena that owns all nodes and lines of a path graph.
///
/// Nodes and lines are addressed by typed IDs (generational indices) and,
/// for callers, by the keys they were registered under. Topology is only
/// ever added, never edited, so a built graph can be shared read-only by
/// any number of walkers.
#[derive(Debug)]
pub struct Graph<K> {
    nodes: SlotMap<NodeId, Node>,
    lines: SlotMap<LineId, Line>,
    node_ids: HashMap<K, NodeId>,
    line_ids: HashMap<K, LineId>,
    node_keys: SecondaryMap<NodeId, K>,
    line_keys: SecondaryMap<LineId, K>,
}

impl<K> Default for Graph<K> {
    fn default() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            lines: SlotMap::with_key(),
            node_ids: HashMap::new(),
            line_ids: HashMap::new(),
            node_keys: SecondaryMap::new(),
            line_keys: SecondaryMap::new(),
        }
    }
}

impl<K> Graph<K> {
    /// Creates a new, empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the node with the given ID.
    #[must_use]
    pub fn node_by_id(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Returns the line with the given ID.
    #[must_use]
    pub fn line_by_id(&self, id: LineId) -> Option<&Line> {
        self.lines.get(id)
    }

    /// Returns the key a node was registered under.
    #[must_use]
    pub fn node_key(&self, id: NodeId) -> Option<&K> {
        self.node_keys.get(id)
    }

    /// Returns the key a line was registered under.
    #[must_use]
    pub fn line_key(&self, id: LineId) -> Option<&K> {
        self.line_keys.get(id)
    }

    /// Iterates over all nodes.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Iterates over all lines.
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.values()
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Lines a traveller may leave `node` along: every outgoing line plus
    /// every undirected incoming one.
    pub fn exits(&self, node: NodeId) -> impl Iterator<Item = &Line> {
        let node = self.nodes.get(node);
        let outgoing = node.map(Node::outgoing).unwrap_or_default();
        let incoming = node.map(Node::incoming).unwrap_or_default();
        outgoing
            .iter()
            .filter_map(|&id| self.lines.get(id))
            .chain(
                incoming
                    .iter()
                    .filter_map(|&id| self.lines.get(id))
                    .filter(|line| !line.is_directed()),
            )
    }

    /// Closest point of any line to `position`.
    #[must_use]
    pub fn nearest_point(&self, position: &Point3) -> Option<Point<'_>> {
        self.lines
            .values()
            .map(|line| line.nearest_point(position))
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(point, _)| point)
    }

    /// Seeds a walker at the start of a uniformly chosen line.
    ///
    /// Returns `None` when the graph has no lines.
    pub fn random_walker<G, R>(&self, guide: G, rng: &mut R) -> Option<Walker<'_, K, G>>
    where
        G: Guide<K>,
        R: Rng,
    {
        if self.lines.is_empty() {
            return None;
        }
        let index = rng.random_range(0..self.lines.len());
        let line = self.lines.values().nth(index)?;
        Some(Walker::new(self, guide, line.start_point()))
    }

    /// Seeds a walker on the line nearest to `position`.
    pub fn walker_near<G: Guide<K>>(&self, guide: G, position: &Point3) -> Option<Walker<'_, K, G>> {
        let point = self.nearest_point(position)?;
        Some(Walker::new(self, guide, point))
    }
}

impl<K> Graph<K>
where
    K: Eq + Hash + Clone + Debug,
{
    /// Returns the node registered under `key`.
    #[must_use]
    pub fn node<Q>(&self, key: &Q) -> Option<&Node>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.node_ids.get(key).and_then(|&id| self.nodes.get(id))
    }

    /// Returns the line registered under `key`.
    #[must_use]
    pub fn line<Q>(&self, key: &Q) -> Option<&Line>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.line_ids.get(key).and_then(|&id| self.lines.get(id))
    }

    /// Returns the ID of the node registered under `key`.
    #[must_use]
    pub fn node_id<Q>(&self, key: &Q) -> Option<NodeId>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.node_ids.get(key).copied()
    }

    /// Returns the ID of the line registered under `key`.
    #[must_use]
    pub fn line_id<Q>(&self, key: &Q) -> Option<LineId>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.line_ids.get(key).copied()
    }

    /// Inserts a node and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if a node is already registered under `key`.
    pub fn add_node(&mut self, key: K, vertex: impl Into<Vertex>) -> Result<NodeId, GraphError> {
        if self.node_ids.contains_key(&key) {
            warn!(?key, "graph already contains this node");
            return Err(GraphError::DuplicateNode(format!("{key:?}")));
        }
        Ok(self.insert_node(key, vertex.into()))
    }

    fn insert_node(&mut self, key: K, vertex: Vertex) -> NodeId {
        let id = self.nodes.insert_with_key(|id| Node::new(id, vertex));
        self.node_ids.insert(key.clone(), id);
        self.node_keys.insert(id, key);
        id
    }

    /// Inserts a line between two nodes and returns its ID.
    ///
    /// `vertices` may include the end positions themselves. Missing nodes
    /// are created from the first and last vertex. The vertex order decides
    /// which of the two nodes becomes the line's start: the one nearer the
    /// first vertex and farther from the last. Interior vertices coinciding
    /// with a node are trimmed. A single interior vertex cannot tell the
    /// two nodes apart, so the line then runs from `start` to `end` as given.
    ///
    /// The call is atomic: when it fails, nothing is added, including any
    /// node that would have been created on the way.
    ///
    /// # Errors
    ///
    /// Returns an error if `key` is taken, if a missing node cannot be
    /// defined because `vertices` is empty, or if the line fails the
    /// consistency check.
    pub fn add_line<I>(
        &mut self,
        key: K,
        start: K,
        end: K,
        vertices: I,
        directed: bool,
    ) -> Result<LineId, GraphError>
    where
        I: IntoIterator,
        I::Item: Into<Vertex>,
    {
        if self.line_ids.contains_key(&key) {
            warn!(?key, "graph already contains this line");
            return Err(GraphError::DuplicateLine(format!("{key:?}")));
        }

        let vertices: Vec<Vertex> = vertices.into_iter().map(Into::into).collect();
        let first = self.resolve_end(&start, vertices.first())?;
        let second = self.resolve_end(&end, vertices.last())?;

        if start == end {
            return Err(self.reject(&key, &first, &second, "line starts and ends at the same node"));
        }

        let oriented = match line::orient(&first, &second, vertices) {
            Ok(oriented) => oriented,
            Err(reason) => return Err(self.reject(&key, &first, &second, reason)),
        };

        let first_id = self.ensure_node(start, first);
        let second_id = self.ensure_node(end, second);
        let (start_end, end_end) = if oriented.reversed {
            ((second_id, second), (first_id, first))
        } else {
            ((first_id, first), (second_id, second))
        };

        let id = self
            .lines
            .insert_with_key(|id| Line::new(id, start_end, end_end, oriented.vertices, directed));
        if let Some(node) = self.nodes.get_mut(start_end.0) {
            node.add_outgoing(id);
        }
        if let Some(node) = self.nodes.get_mut(end_end.0) {
            node.add_incoming(id);
        }
        self.line_ids.insert(key.clone(), id);

        debug!(
            ?key,
            length = self.lines.get(id).map_or(0.0, Line::length),
            reversed = oriented.reversed,
            "line added"
        );
        self.line_keys.insert(id, key);
        Ok(id)
    }

    /// Vertex of an existing node, or the vertex a missing node would be
    /// created from.
    fn resolve_end(&self, key: &K, fallback: Option<&Vertex>) -> Result<Vertex, GraphError> {
        if let Some(node) = self.node(key) {
            return Ok(*node.vertex());
        }
        fallback.copied().ok_or_else(|| {
            warn!(?key, "node cannot be defined without vertices");
            GraphError::UndefinedNode(format!("{key:?}"))
        })
    }

    fn ensure_node(&mut self, key: K, vertex: Vertex) -> NodeId {
        match self.node_ids.get(&key) {
            Some(&id) => id,
            None => self.insert_node(key, vertex),
        }
    }

    fn reject(&self, key: &K, first: &Vertex, second: &Vertex, reason: &'static str) -> GraphError {
        warn!(
            ?key,
            first = ?first.position,
            second = ?second.position,
            reason,
            "line consistency check failed"
        );
        GraphError::InconsistentLine {
            line: format!("{key:?}"),
            reason,
        }
    }

    /// Seeds a walker on the line registered under `key`, `distance` along
    /// it from its start (clamped to the line).
    pub fn walker_at<Q, G>(&self, guide: G, key: &Q, distance: f64) -> Option<Walker<'_, K, G>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        G: Guide<K>,
    {
        let line = self.line(key)?;
        Some(Walker::new(self, guide, line.point_at(distance)))
    }
}
