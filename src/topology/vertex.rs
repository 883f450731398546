use crate::math::Point3;

/// A polyline vertex: a position plus the roll (radians) of the path there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// The 3D position of the vertex.
    pub position: Point3,
    /// Roll about the path heading, in radians.
    pub roll: f64,
}

impl Vertex {
    /// Creates a new vertex.
    #[must_use]
    pub fn new(position: Point3, roll: f64) -> Self {
        Self { position, roll }
    }

    /// Creates a vertex with zero roll.
    #[must_use]
    pub fn at(x: f64, y: f64, z: f64) -> Self {
        Self::new(Point3::new(x, y, z), 0.0)
    }

    /// Distance between the positions of two vertices.
    #[must_use]
    pub fn distance(&self, other: &Vertex) -> f64 {
        (self.position - other.position).norm()
    }
}

impl From<Point3> for Vertex {
    fn from(position: Point3) -> Self {
        Self::new(position, 0.0)
    }
}
