use crate::math::distance_3d::clamped_point_segment_projection;
use crate::math::{Point3, TOLERANCE};
use crate::traversal::Point;

use super::node::NodeId;
use super::vertex::Vertex;

slotmap::new_key_type! {
    /// Unique identifier for a line in a graph.
    pub struct LineId;
}

/// A polyline between a start node and an end node.
///
/// Segment `i` runs from `vertex_at(i - 1)` to `vertex_at(i)`, so segment `0`
/// leaves the start node and the last segment arrives at the end node.
/// Cumulative arc lengths are computed once at construction.
#[derive(Debug, Clone)]
pub struct Line {
    id: LineId,
    start: NodeId,
    end: NodeId,
    start_vertex: Vertex,
    end_vertex: Vertex,
    vertices: Vec<Vertex>,
    directed: bool,
    lengths: Vec<f64>,
}

impl Line {
    pub(crate) fn new(
        id: LineId,
        (start, start_vertex): (NodeId, Vertex),
        (end, end_vertex): (NodeId, Vertex),
        vertices: Vec<Vertex>,
        directed: bool,
    ) -> Self {
        let mut line = Self {
            id,
            start,
            end,
            start_vertex,
            end_vertex,
            vertices,
            directed,
            lengths: Vec::new(),
        };
        line.lengths = line.cumulative_lengths();
        line
    }

    fn cumulative_lengths(&self) -> Vec<f64> {
        let mut total = 0.0;
        (0..=self.vertices.len())
            .map(|segment| {
                total += self.segment_start(segment).distance(self.segment_end(segment));
                total
            })
            .collect()
    }

    /// Returns the line's handle.
    #[must_use]
    pub fn id(&self) -> LineId {
        self.id
    }

    /// Returns the start node.
    #[must_use]
    pub fn start(&self) -> NodeId {
        self.start
    }

    /// Returns the end node.
    #[must_use]
    pub fn end(&self) -> NodeId {
        self.end
    }

    /// Whether the line may only be travelled from start to end.
    #[must_use]
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Interior vertices, excluding both end nodes.
    #[must_use]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Total arc length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.lengths.last().copied().unwrap_or(0.0)
    }

    /// Number of segments (`vertices().len() + 1`).
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.vertices.len() + 1
    }

    /// Index of the segment arriving at the end node.
    #[must_use]
    pub fn last_segment(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the vertex at `index`.
    ///
    /// Negative indices resolve to the start node and indices past the
    /// interior vertices resolve to the end node.
    #[must_use]
    pub fn vertex_at(&self, index: isize) -> &Vertex {
        match usize::try_from(index) {
            Ok(index) => self.boundary(index + 1),
            Err(_) => &self.start_vertex,
        }
    }

    /// The vertex segment `segment` starts at.
    #[must_use]
    pub fn segment_start(&self, segment: usize) -> &Vertex {
        self.boundary(segment)
    }

    /// The vertex segment `segment` ends at.
    #[must_use]
    pub fn segment_end(&self, segment: usize) -> &Vertex {
        self.boundary(segment + 1)
    }

    /// Length of segment `segment`.
    #[must_use]
    pub fn segment_length(&self, segment: usize) -> f64 {
        self.cumulative(segment + 1) - self.cumulative(segment)
    }

    /// Arc length from the start node to the end of segment `segment`.
    ///
    /// `segment_end_distance(-1)` is `0`.
    #[must_use]
    pub fn segment_end_distance(&self, segment: isize) -> f64 {
        match usize::try_from(segment) {
            Ok(segment) => self.cumulative(segment + 1),
            Err(_) => 0.0,
        }
    }

    /// Point at the start node.
    #[must_use]
    pub fn start_point(&self) -> Point<'_> {
        Point::new(self, 0, 0.0)
    }

    /// Point at the end node.
    #[must_use]
    pub fn end_point(&self) -> Point<'_> {
        Point::new(self, self.last_segment(), 1.0)
    }

    /// Point at arc offset `distance` from the start node, clamped to the line.
    #[must_use]
    pub fn point_at(&self, distance: f64) -> Point<'_> {
        let distance = distance.clamp(0.0, self.length());
        let segment = self
            .lengths
            .partition_point(|&end| end < distance)
            .min(self.last_segment());
        let length = self.segment_length(segment);
        let t = if length > TOLERANCE {
            (distance - self.cumulative(segment)) / length
        } else {
            0.0
        };
        Point::new(self, segment, t)
    }

    /// Closest point of the line to `position`, with its distance.
    #[must_use]
    pub fn nearest_point(&self, position: &Point3) -> (Point<'_>, f64) {
        let mut best = (0, 0.0, f64::INFINITY);
        for segment in 0..self.segment_count() {
            let projection = clamped_point_segment_projection(
                &self.segment_start(segment).position,
                &self.segment_end(segment).position,
                position,
            );
            if projection.distance < best.2 {
                let length = self.segment_length(segment);
                let t = if length > TOLERANCE {
                    projection.along / length
                } else {
                    0.0
                };
                best = (segment, t, projection.distance);
            }
        }
        (Point::new(self, best.0, best.1), best.2)
    }

    // Boundary 0 is the start node, boundary `k` the interior vertex `k - 1`.
    fn boundary(&self, index: usize) -> &Vertex {
        match index {
            0 => &self.start_vertex,
            k => self.vertices.get(k - 1).unwrap_or(&self.end_vertex),
        }
    }

    fn cumulative(&self, boundary: usize) -> f64 {
        match boundary {
            0 => 0.0,
            k => self
                .lengths
                .get(k - 1)
                .copied()
                .unwrap_or_else(|| self.length()),
        }
    }
}

/// Interior vertices oriented against a pair of end nodes.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Oriented {
    /// `true` when the vertices run from the second node to the first.
    pub reversed: bool,
    pub vertices: Vec<Vertex>,
}

/// Decides which node a vertex sequence starts at and trims it to the
/// interior vertices.
///
/// The sequence starts at the node that is closer to its first vertex and
/// farther from its last. Vertices coinciding with an end node are trimmed
/// and consecutive duplicates collapsed, so every segment of the resulting
/// line has positive length.
pub(crate) fn orient(
    first: &Vertex,
    second: &Vertex,
    mut vertices: Vec<Vertex>,
) -> Result<Oriented, &'static str> {
    if first.distance(second) < TOLERANCE {
        return Err("end nodes coincide");
    }

    let reversed = match (vertices.first(), vertices.last()) {
        (Some(head), Some(tail)) if vertices.len() > 1 => {
            let first_to_head = first.distance(head);
            let first_to_tail = first.distance(tail);
            let second_to_head = second.distance(head);
            let second_to_tail = second.distance(tail);

            if first_to_head < first_to_tail && second_to_head > second_to_tail {
                false
            } else if first_to_head > first_to_tail && second_to_head < second_to_tail {
                true
            } else {
                return Err("vertex orientation is ambiguous");
            }
        }
        _ => false,
    };

    let (start, end) = if reversed {
        (second, first)
    } else {
        (first, second)
    };

    vertices.dedup_by(|b, a| a.distance(b) < TOLERANCE);
    while vertices.first().is_some_and(|v| v.distance(start) < TOLERANCE) {
        vertices.remove(0);
    }
    while vertices.last().is_some_and(|v| v.distance(end) < TOLERANCE) {
        vertices.pop();
    }

    Ok(Oriented { reversed, vertices })
}
