use super::{Point3, TOLERANCE};

/// Projection of a point onto a segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentProjection {
    /// Signed distance along the segment from its start to the foot of the
    /// perpendicular.
    pub along: f64,
    /// Distance from the point to the nearest point of the segment.
    pub distance: f64,
}

/// Projects `point` onto the segment `start → end`.
///
/// `along` is left unclamped so callers can tell on which side of the
/// segment the point falls; `distance` is always measured to the segment
/// itself (to an endpoint when the foot lies outside).
#[must_use]
pub fn point_segment_projection(start: &Point3, end: &Point3, point: &Point3) -> SegmentProjection {
    let dir = end - start;
    let length = dir.norm();
    let local = point - start;

    if length < TOLERANCE {
        return SegmentProjection {
            along: 0.0,
            distance: local.norm(),
        };
    }

    let dir = dir / length;
    let along = local.dot(&dir);

    let distance = if along < 0.0 {
        local.norm()
    } else if along > length {
        (point - end).norm()
    } else {
        (local - dir * along).norm()
    };

    SegmentProjection { along, distance }
}

/// Same as [`point_segment_projection`] with `along` clamped to the segment.
#[must_use]
pub fn clamped_point_segment_projection(
    start: &Point3,
    end: &Point3,
    point: &Point3,
) -> SegmentProjection {
    let length = (end - start).norm();
    let projection = point_segment_projection(start, end, point);
    SegmentProjection {
        along: projection.along.clamp(0.0, length),
        ..projection
    }
}
