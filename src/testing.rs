//! Shared fixtures for unit tests.

#![allow(clippy::unwrap_used)]

use crate::topology::{Graph, LineId, Vertex};
use crate::traversal::{Guide, Walker};

/// Installs a test-friendly subscriber once; honours `RUST_LOG`.
pub(crate) fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Equilateral triangle with sides of length 10: `ab`, `bc`, `ca`, all
/// undirected and oriented head to tail.
pub(crate) fn triangle() -> Graph<&'static str> {
    let height = 75.0_f64.sqrt();
    let mut graph = Graph::new();
    graph.add_node("a", Vertex::at(0.0, 0.0, 0.0)).unwrap();
    graph.add_node("b", Vertex::at(10.0, 0.0, 0.0)).unwrap();
    graph.add_node("c", Vertex::at(5.0, height, 0.0)).unwrap();
    graph.add_line("ab", "a", "b", Vec::<Vertex>::new(), false).unwrap();
    graph.add_line("bc", "b", "c", Vec::<Vertex>::new(), false).unwrap();
    graph.add_line("ca", "c", "a", Vec::<Vertex>::new(), false).unwrap();
    graph
}

/// A single line `zz` from `p` (0, 0) over (10, 0) and (10, 10) to `q`
/// (20, 10): three segments of length 10.
pub(crate) fn zigzag() -> Graph<&'static str> {
    let mut graph = Graph::new();
    graph
        .add_line(
            "zz",
            "p",
            "q",
            vec![
                Vertex::at(0.0, 0.0, 0.0),
                Vertex::at(10.0, 0.0, 0.0),
                Vertex::at(10.0, 10.0, 0.0),
                Vertex::at(20.0, 10.0, 0.0),
            ],
            false,
        )
        .unwrap();
    graph
}

/// Walks a fixed cycle of lines: `next_line` returns the successor of the
/// current line, `prev_line` its predecessor.
#[derive(Debug, Clone)]
pub(crate) struct CycleGuide {
    lines: Vec<LineId>,
}

impl CycleGuide {
    pub(crate) fn new(graph: &Graph<&'static str>, keys: &[&str]) -> Self {
        Self {
            lines: keys.iter().map(|key| graph.line_id(*key).unwrap()).collect(),
        }
    }

    fn offset(&self, current: LineId, by: usize) -> Option<LineId> {
        let index = self.lines.iter().position(|&id| id == current)?;
        self.lines.get((index + by) % self.lines.len()).copied()
    }
}

impl<K> Guide<K> for CycleGuide {
    fn next_line(&self, walker: &Walker<'_, K, Self>) -> Option<LineId> {
        self.offset(walker.line().id(), 1)
    }

    fn prev_line(&self, walker: &Walker<'_, K, Self>) -> Option<LineId> {
        self.offset(walker.line().id(), self.lines.len() - 1)
    }
}

/// Takes the first other exit at the node being left.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ExitGuide;

impl<K> Guide<K> for ExitGuide {
    fn next_line(&self, walker: &Walker<'_, K, Self>) -> Option<LineId> {
        let line = walker.line();
        walker
            .graph()
            .exits(line.end())
            .map(|exit| exit.id())
            .find(|&id| id != line.id())
    }

    fn prev_line(&self, walker: &Walker<'_, K, Self>) -> Option<LineId> {
        let line = walker.line();
        walker
            .graph()
            .exits(line.start())
            .map(|exit| exit.id())
            .find(|&id| id != line.id())
    }
}

/// Never continues.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DeadEndGuide;

impl<K> Guide<K> for DeadEndGuide {
    fn next_line(&self, _walker: &Walker<'_, K, Self>) -> Option<LineId> {
        None
    }

    fn prev_line(&self, _walker: &Walker<'_, K, Self>) -> Option<LineId> {
        None
    }
}

/// Always answers with the same line.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FixedGuide(pub LineId);

impl<K> Guide<K> for FixedGuide {
    fn next_line(&self, _walker: &Walker<'_, K, Self>) -> Option<LineId> {
        Some(self.0)
    }

    fn prev_line(&self, _walker: &Walker<'_, K, Self>) -> Option<LineId> {
        Some(self.0)
    }
}
