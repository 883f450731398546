use crate::topology::LineId;

use super::walker::Walker;

/// Chooses how a walker continues at a junction.
///
/// The walker calls [`next_line`](Guide::next_line) when it leaves its line
/// through the line's end node and [`prev_line`](Guide::prev_line) when it
/// leaves through the start node; either way, the walker is still on the old
/// line at that node when the guide is asked. The returned line must touch
/// that node, at its start or at its end. Returning `None` ends the
/// traversal: the walker becomes invalid and the move fails.
pub trait Guide<K>: Sized {
    /// Line to continue onto from the current line's end node.
    fn next_line(&self, walker: &Walker<'_, K, Self>) -> Option<LineId>;

    /// Line to continue onto from the current line's start node.
    fn prev_line(&self, walker: &Walker<'_, K, Self>) -> Option<LineId>;
}
