use std::cmp::Ordering;

use crate::error::PointError;
use crate::math::{Point3, UnitQuaternion, Vector3, TOLERANCE};
use crate::topology::{Line, Vertex};

/// A position on a line: a segment index and a fraction `t` of that segment.
///
/// `(0, 0.0)` sits on the start node and `(line.last_segment(), 1.0)` on the
/// end node. Every accessor is derived from the line's cached lengths, so a
/// point costs nothing to copy.
#[derive(Debug, Clone, Copy)]
pub struct Point<'g> {
    pub(crate) line: &'g Line,
    pub(crate) segment: usize,
    pub(crate) t: f64,
}

impl<'g> Point<'g> {
    /// Creates a point, clamping `segment` and `t` onto the line.
    #[must_use]
    pub fn new(line: &'g Line, segment: usize, t: f64) -> Self {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        Self {
            line,
            segment: segment.min(line.last_segment()),
            t,
        }
    }

    #[must_use]
    pub fn line(&self) -> &'g Line {
        self.line
    }

    #[must_use]
    pub fn segment(&self) -> usize {
        self.segment
    }

    /// Fraction of the current segment, in `[0, 1]`.
    #[must_use]
    pub fn t(&self) -> f64 {
        self.t
    }

    /// Vertex the current segment starts at.
    #[must_use]
    pub fn prev_vertex(&self) -> &'g Vertex {
        self.line.segment_start(self.segment)
    }

    /// Vertex the current segment ends at.
    #[must_use]
    pub fn next_vertex(&self) -> &'g Vertex {
        self.line.segment_end(self.segment)
    }

    #[must_use]
    pub fn position(&self) -> Point3 {
        let prev = self.prev_vertex().position;
        prev + (self.next_vertex().position - prev) * self.t
    }

    /// Roll interpolated between the segment's vertices.
    #[must_use]
    pub fn roll(&self) -> f64 {
        let prev = self.prev_vertex().roll;
        prev + (self.next_vertex().roll - prev) * self.t
    }

    /// Unit vector along the current segment, start to end.
    #[must_use]
    pub fn heading(&self) -> Vector3 {
        (self.next_vertex().position - self.prev_vertex().position)
            .try_normalize(TOLERANCE)
            .unwrap_or_else(Vector3::zeros)
    }

    /// Rotation taking local `+z` onto [`heading`](Self::heading), rolled
    /// about it by [`roll`](Self::roll).
    #[must_use]
    pub fn orientation(&self) -> UnitQuaternion {
        look_rotation(&self.heading(), self.roll())
    }

    #[must_use]
    pub fn segment_length(&self) -> f64 {
        self.line.segment_length(self.segment)
    }

    /// Signed distance back to the segment's start vertex (never positive).
    #[must_use]
    pub fn distance_to_prev_vertex(&self) -> f64 {
        -self.segment_length() * self.t
    }

    /// Distance ahead to the segment's end vertex.
    #[must_use]
    pub fn distance_to_next_vertex(&self) -> f64 {
        self.segment_length() * (1.0 - self.t)
    }

    /// Arc length from the line's start node to this point.
    #[must_use]
    pub fn distance_to_line_start(&self) -> f64 {
        self.line.segment_end_distance(self.previous_segment()) + self.segment_length() * self.t
    }

    /// Arc length from this point to the line's end node.
    #[must_use]
    pub fn distance_to_line_end(&self) -> f64 {
        self.line.length() - self.line.segment_end_distance(self.current_segment())
            + self.segment_length() * (1.0 - self.t)
    }

    #[must_use]
    pub fn at_first_segment(&self) -> bool {
        self.segment == 0
    }

    #[must_use]
    pub fn at_last_segment(&self) -> bool {
        self.segment >= self.line.last_segment()
    }

    /// Orders two points on the same line by segment, then by `t`.
    ///
    /// # Errors
    ///
    /// Returns an error if the points lie on different lines.
    pub fn try_cmp(&self, other: &Point<'_>) -> Result<Ordering, PointError> {
        self.check_same_line(other)?;
        Ok(self
            .segment
            .cmp(&other.segment)
            .then_with(|| self.t.total_cmp(&other.t)))
    }

    /// Signed arc length from `other` to `self` along their common line.
    ///
    /// # Errors
    ///
    /// Returns an error if the points lie on different lines.
    pub fn distance_from(&self, other: &Point<'_>) -> Result<f64, PointError> {
        self.check_same_line(other)?;
        Ok(self.distance_to_line_start() - other.distance_to_line_start())
    }

    fn check_same_line(&self, other: &Point<'_>) -> Result<(), PointError> {
        if self.line.id() == other.line.id() {
            Ok(())
        } else {
            Err(PointError::LineMismatch {
                left: self.line.id(),
                right: other.line.id(),
            })
        }
    }

    fn current_segment(&self) -> isize {
        isize::try_from(self.segment).unwrap_or(isize::MAX)
    }

    fn previous_segment(&self) -> isize {
        self.current_segment() - 1
    }
}

impl PartialEq for Point<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.line.id() == other.line.id() && self.segment == other.segment && self.t == other.t
    }
}

/// Rotation facing `heading` with `+y` as up, rolled about the heading.
pub(crate) fn look_rotation(heading: &Vector3, roll: f64) -> UnitQuaternion {
    if heading.norm() < TOLERANCE {
        return UnitQuaternion::identity();
    }
    let up = if heading.cross(&Vector3::y()).norm() < TOLERANCE {
        Vector3::z()
    } else {
        Vector3::y()
    };
    UnitQuaternion::face_towards(heading, &up)
        * UnitQuaternion::from_axis_angle(&Vector3::z_axis(), roll)
}
