use super::{Point3, TOLERANCE};

/// Computes where the segment `start → end` crosses a sphere of `radius`
/// around `center`.
///
/// Returns both roots `(near, far)` of `|start + u * (end - start) - center| = radius`
/// in the segment's parametric form, `near <= far`. The roots are not clamped:
/// callers decide which of them fall inside `[0, 1]`. Returns `None` when the
/// circle misses the supporting line or the segment is degenerate.
#[must_use]
pub fn circle_segment_intersection(
    center: &Point3,
    radius: f64,
    start: &Point3,
    end: &Point3,
) -> Option<(f64, f64)> {
    let dir = end - start;
    let length = dir.norm();
    if length < TOLERANCE {
        return None;
    }
    let dir = dir / length;

    let local = center - start;
    let along = local.dot(&dir);
    let off_line_sq = (local - dir * along).norm_squared();
    let radius_sq = radius * radius;

    // Centers on the line carry rounding noise in `off_line_sq`.
    if radius_sq < off_line_sq - TOLERANCE * TOLERANCE {
        return None;
    }

    let half_chord = (radius_sq - off_line_sq).max(0.0).sqrt();
    Some(((along - half_chord) / length, (along + half_chord) / length))
}

/// Returns the exit crossing of a circle on a segment that starts inside it.
///
/// Only roots inside `[from, 1]` count; `from` is the parameter the search
/// starts at.
#[must_use]
pub fn circle_segment_exit(
    center: &Point3,
    radius: f64,
    start: &Point3,
    end: &Point3,
    from: f64,
) -> Option<f64> {
    let (_, far) = circle_segment_intersection(center, radius, start, end)?;
    (far >= from - TOLERANCE && far <= 1.0 + TOLERANCE).then(|| far.max(from).clamp(0.0, 1.0))
}
