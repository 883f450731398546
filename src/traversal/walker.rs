use tracing::{trace, warn};

use crate::error::WalkerError;
use crate::math::intersect_3d::circle_segment_exit;
use crate::math::{Point3, UnitQuaternion, Vector3, TOLERANCE};
use crate::topology::{Graph, Line, NodeId};

use super::config::WalkerConfig;
use super::direction::Direction;
use super::guide::Guide;
use super::point::{look_rotation, Point};

/// A cursor that travels a graph, crossing junctions as its guide directs.
///
/// The walker owns a [`Point`], the direction it faces relative to the
/// current line, and an odometer. "Next", "ahead" and "end" are always
/// measured in the walker's own sense of travel, so a walker facing
/// [`Backward`](Direction::Backward) reaches the line's start node when it
/// moves ahead.
///
/// Any failure to continue at a junction invalidates the walker for good;
/// every later motion returns [`WalkerError::Invalidated`].
#[derive(Debug)]
pub struct Walker<'g, K, G> {
    graph: &'g Graph<K>,
    guide: G,
    point: Point<'g>,
    direction: Direction,
    distance: f64,
    valid: bool,
    config: WalkerConfig,
}

impl<'g, K, G> Walker<'g, K, G> {
    /// Creates a walker facing forward at `point`.
    #[must_use]
    pub fn new(graph: &'g Graph<K>, guide: G, point: Point<'g>) -> Self {
        Self {
            graph,
            guide,
            point,
            direction: Direction::Forward,
            distance: 0.0,
            valid: true,
            config: WalkerConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: WalkerConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    #[must_use]
    pub fn graph(&self) -> &'g Graph<K> {
        self.graph
    }

    #[must_use]
    pub fn guide(&self) -> &G {
        &self.guide
    }

    #[must_use]
    pub fn point(&self) -> Point<'g> {
        self.point
    }

    #[must_use]
    pub fn line(&self) -> &'g Line {
        self.point.line
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Turns the walker around on the spot.
    pub fn reverse(&mut self) {
        self.direction = self.direction.opposite();
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    #[must_use]
    pub fn config(&self) -> &WalkerConfig {
        &self.config
    }

    /// Odometer: signed distance travelled since creation or the last reset.
    #[must_use]
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Returns the odometer and zeroes it.
    pub fn reset_distance(&mut self) -> f64 {
        std::mem::take(&mut self.distance)
    }

    #[must_use]
    pub fn position(&self) -> Point3 {
        self.point.position()
    }

    /// Unit vector in the walker's sense of travel.
    #[must_use]
    pub fn heading(&self) -> Vector3 {
        self.point.heading() * self.direction.sign()
    }

    /// Orientation facing [`heading`](Self::heading). Roll is mirrored when
    /// travelling backward so that it stays relative to the traveller.
    #[must_use]
    pub fn orientation(&self) -> UnitQuaternion {
        look_rotation(&self.heading(), self.point.roll() * self.direction.sign())
    }

    /// Node the walker is heading for.
    #[must_use]
    pub fn end_node(&self) -> NodeId {
        match self.direction {
            Direction::Forward => self.point.line.end(),
            Direction::Backward => self.point.line.start(),
        }
    }

    /// Node the walker is heading away from.
    #[must_use]
    pub fn start_node(&self) -> NodeId {
        match self.direction {
            Direction::Forward => self.point.line.start(),
            Direction::Backward => self.point.line.end(),
        }
    }

    /// Lines the walker may continue onto at the node ahead.
    pub fn junction_ahead(&self) -> impl Iterator<Item = &'g Line> {
        let current = self.point.line.id();
        self.graph
            .exits(self.end_node())
            .filter(move |line| line.id() != current)
    }

    /// Lines meeting the current one at the node behind.
    pub fn junction_behind(&self) -> impl Iterator<Item = &'g Line> {
        let current = self.point.line.id();
        self.graph
            .exits(self.start_node())
            .filter(move |line| line.id() != current)
    }

    /// Distance ahead to the next vertex (never negative).
    #[must_use]
    pub fn distance_to_next_vertex(&self) -> f64 {
        self.span_to_vertex(self.direction)
    }

    /// Signed distance back to the previous vertex (never positive).
    #[must_use]
    pub fn distance_to_prev_vertex(&self) -> f64 {
        -self.span_to_vertex(self.direction.opposite())
    }

    /// Distance ahead to [`end_node`](Self::end_node) (never negative).
    #[must_use]
    pub fn distance_ahead(&self) -> f64 {
        self.span_to_node(self.direction)
    }

    /// Signed distance back to [`start_node`](Self::start_node) (never positive).
    #[must_use]
    pub fn distance_behind(&self) -> f64 {
        -self.span_to_node(self.direction.opposite())
    }

    // Spans below take a line-relative direction of motion.

    fn span_to_vertex(&self, motion: Direction) -> f64 {
        match motion {
            Direction::Forward => self.point.distance_to_next_vertex(),
            Direction::Backward => -self.point.distance_to_prev_vertex(),
        }
    }

    fn span_to_node(&self, motion: Direction) -> f64 {
        match motion {
            Direction::Forward => self.point.distance_to_line_end(),
            Direction::Backward => self.point.distance_to_line_start(),
        }
    }

    fn at_final_segment(&self, motion: Direction) -> bool {
        match motion {
            Direction::Forward => self.point.at_last_segment(),
            Direction::Backward => self.point.at_first_segment(),
        }
    }

    /// Line-relative direction of a move in walker-relative `sense`.
    fn motion(&self, sense: Direction) -> Direction {
        sense.relative_to(self.direction)
    }

    fn ensure_valid(&self) -> Result<(), WalkerError> {
        if self.valid {
            Ok(())
        } else {
            Err(WalkerError::Invalidated)
        }
    }

    fn fail(&mut self, error: WalkerError) -> WalkerError {
        self.valid = false;
        warn!(%error, line = ?self.point.line.id(), "walker invalidated");
        error
    }

    fn count_crossing(&mut self, crossings: &mut usize) -> Result<(), WalkerError> {
        *crossings += 1;
        let limit = self.config.max_crossings();
        if *crossings > limit {
            return Err(self.fail(WalkerError::CrossingLimit { limit }));
        }
        Ok(())
    }

    /// Slides within the current segment by `span` in `motion`.
    fn slide(&mut self, motion: Direction, span: f64) {
        let length = self.point.segment_length();
        if length <= 0.0 {
            return;
        }
        let t = self.point.t + motion.sign() * span / length;
        self.point.t = t.clamp(0.0, 1.0);
    }
}

impl<K, G: Guide<K>> Walker<'_, K, G> {
    /// Moves to the next vertex ahead, crossing a junction when the walker
    /// is on the last segment in its sense of travel.
    ///
    /// # Errors
    ///
    /// Returns an error if the walker is invalid or the junction cannot be
    /// crossed.
    pub fn move_to_next_vertex(&mut self) -> Result<(), WalkerError> {
        self.step(Direction::Forward)
    }

    /// Moves to the previous vertex behind, crossing a junction when the
    /// walker is on its first segment.
    ///
    /// # Errors
    ///
    /// Returns an error if the walker is invalid or the junction cannot be
    /// crossed.
    pub fn move_to_prev_vertex(&mut self) -> Result<(), WalkerError> {
        self.step(Direction::Backward)
    }

    /// Moves to the node ahead and onto the line the guide picks there.
    ///
    /// # Errors
    ///
    /// Returns an error if the walker is invalid, the guide has no
    /// continuation, or the continuation does not touch the node.
    pub fn move_to_line_end(&mut self) -> Result<(), WalkerError> {
        self.leave(Direction::Forward)
    }

    /// Moves to the node behind and onto the line the guide picks there.
    ///
    /// # Errors
    ///
    /// Returns an error if the walker is invalid, the guide has no
    /// continuation, or the continuation does not touch the node.
    pub fn move_to_line_start(&mut self) -> Result<(), WalkerError> {
        self.leave(Direction::Backward)
    }

    /// Moves `distance` along the path, ahead when positive.
    ///
    /// Whole lines are consumed first, asking the guide at every junction,
    /// then whole segments, and the remainder is placed within the final
    /// segment. The odometer grows by exactly `distance`.
    ///
    /// # Errors
    ///
    /// Returns an error if the walker is invalid, `distance` is not finite,
    /// a junction cannot be crossed, or the move needs more junction
    /// crossings than the configuration allows.
    pub fn move_by(&mut self, distance: f64) -> Result<(), WalkerError> {
        self.ensure_valid()?;
        if !distance.is_finite() {
            return Err(WalkerError::InvalidParameters(format!(
                "move distance must be finite, got {distance}"
            )));
        }

        let odometer = self.distance + distance;
        let sense = Direction::of(distance);
        let mut remaining = distance.abs();
        let mut crossings = 0;

        loop {
            let motion = self.motion(sense);
            let span = self.span_to_node(motion);
            if remaining <= span {
                break;
            }
            self.count_crossing(&mut crossings)?;
            remaining -= span;
            self.cross(motion)?;
        }

        loop {
            let motion = self.motion(sense);
            let span = self.span_to_vertex(motion);
            if remaining <= span || self.at_final_segment(motion) {
                break;
            }
            remaining -= span;
            self.step_vertex(motion)?;
        }

        self.slide(self.motion(sense), remaining);
        self.distance = odometer;
        Ok(())
    }

    /// Moves to the first place along the path whose straight-line distance
    /// from the current position is `|distance|`, searching ahead when
    /// `distance` is positive and behind otherwise.
    ///
    /// The odometer grows by the arc length actually travelled. A zero
    /// `distance` leaves the walker where it is.
    ///
    /// # Errors
    ///
    /// Returns an error if the walker is invalid, `distance` is not finite,
    /// a junction cannot be crossed, or the search needs more junction
    /// crossings than the configuration allows.
    pub fn jump(&mut self, distance: f64) -> Result<(), WalkerError> {
        self.ensure_valid()?;
        if !distance.is_finite() {
            return Err(WalkerError::InvalidParameters(format!(
                "jump distance must be finite, got {distance}"
            )));
        }

        let sense = Direction::of(distance);
        let radius = distance.abs();
        if radius <= TOLERANCE {
            return Ok(());
        }
        let center = self.point.position();
        let mut travelled = 0.0;
        let mut crossings = 0;

        loop {
            let motion = self.motion(sense);
            let (from, to, start) = match motion {
                Direction::Forward => (
                    self.point.prev_vertex(),
                    self.point.next_vertex(),
                    self.point.t,
                ),
                Direction::Backward => (
                    self.point.next_vertex(),
                    self.point.prev_vertex(),
                    1.0 - self.point.t,
                ),
            };

            if let Some(exit) =
                circle_segment_exit(&center, radius, &from.position, &to.position, start)
            {
                travelled += (exit - start) * self.point.segment_length();
                self.point.t = match motion {
                    Direction::Forward => exit,
                    Direction::Backward => 1.0 - exit,
                };
                break;
            }

            travelled += self.span_to_vertex(motion);
            if self.at_final_segment(motion) {
                self.count_crossing(&mut crossings)?;
            }
            self.step_vertex(motion)?;
        }

        self.distance += sense.sign() * travelled;
        Ok(())
    }

    fn step(&mut self, sense: Direction) -> Result<(), WalkerError> {
        self.ensure_valid()?;
        let motion = self.motion(sense);
        let span = self.span_to_vertex(motion);
        self.step_vertex(motion)?;
        self.distance += sense.sign() * span;
        Ok(())
    }

    fn leave(&mut self, sense: Direction) -> Result<(), WalkerError> {
        self.ensure_valid()?;
        let motion = self.motion(sense);
        let span = self.span_to_node(motion);
        self.cross(motion)?;
        self.distance += sense.sign() * span;
        Ok(())
    }

    /// Steps one vertex in `motion`, crossing the junction from the final
    /// segment.
    fn step_vertex(&mut self, motion: Direction) -> Result<(), WalkerError> {
        if self.at_final_segment(motion) {
            return self.cross(motion);
        }
        match motion {
            Direction::Forward => {
                self.point.segment += 1;
                self.point.t = 0.0;
            }
            Direction::Backward => {
                self.point.segment -= 1;
                self.point.t = 1.0;
            }
        }
        Ok(())
    }

    /// Leaves the current line through the node in `motion` and enters the
    /// line the guide picks there.
    ///
    /// Entering the new line at its start keeps travel line-forward,
    /// entering at its end makes it line-backward; the walker's direction
    /// flips whenever that differs from `motion`.
    fn cross(&mut self, motion: Direction) -> Result<(), WalkerError> {
        let line = self.point.line;
        let (node, requested) = match motion {
            Direction::Forward => (line.end(), self.guide.next_line(self)),
            Direction::Backward => (line.start(), self.guide.prev_line(self)),
        };

        let Some(id) = requested else {
            return Err(self.fail(WalkerError::DeadEnd { node }));
        };
        let graph = self.graph;
        let Some(next) = graph.line_by_id(id) else {
            return Err(self.fail(WalkerError::UnknownLine(id)));
        };

        let entered = if next.start() == node {
            self.point = next.start_point();
            Direction::Forward
        } else if next.end() == node {
            self.point = next.end_point();
            Direction::Backward
        } else {
            return Err(self.fail(WalkerError::NotAdjacent { line: id, node }));
        };

        let flipped = entered != motion;
        if flipped {
            self.direction = self.direction.opposite();
        }
        trace!(from = ?line.id(), to = ?id, ?node, flipped, "crossed junction");
        Ok(())
    }
}
