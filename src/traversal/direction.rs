/// Sense of travel along a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// From the start node towards the end node.
    #[default]
    Forward,
    /// From the end node towards the start node.
    Backward,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }

    /// `1.0` for [`Forward`](Self::Forward), `-1.0` for [`Backward`](Self::Backward).
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            Self::Forward => 1.0,
            Self::Backward => -1.0,
        }
    }

    /// Direction of a signed distance; zero counts as forward.
    #[must_use]
    pub fn of(distance: f64) -> Self {
        if distance < 0.0 {
            Self::Backward
        } else {
            Self::Forward
        }
    }

    /// Composes two directions: `Backward` relative to `Backward` is `Forward`.
    #[must_use]
    pub fn relative_to(self, base: Direction) -> Self {
        match self {
            Self::Forward => base,
            Self::Backward => base.opposite(),
        }
    }
}
