//! Next/previous navigation over ordered candidates.
//!
//! Navigation is a pure function of the caret, the candidate list, a
//! direction and the cycle flag. Nothing is remembered between calls.

use serde::{Deserialize, Serialize};

use crate::buffer::{Region, Snapshot};

/// Direction of a jump.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

impl Direction {
    pub fn from_forward(forward: bool) -> Self {
        if forward {
            Self::Forward
        } else {
            Self::Backward
        }
    }

    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }
}

/// Picks the candidate to jump to from `caret`.
///
/// Forward takes the first candidate starting strictly after `caret`,
/// backward the last one starting strictly before it, so a candidate at the
/// caret itself is never chosen. When nothing qualifies, `cycle` wraps to the
/// first (forward) or last (backward) candidate; otherwise there is no move.
///
/// `candidates` must be in buffer order.
pub fn advance(
    caret: usize,
    candidates: &[Region],
    direction: Direction,
    cycle: bool,
) -> Option<Region> {
    let found = match direction {
        Direction::Forward => candidates.iter().find(|c| c.begin > caret),
        Direction::Backward => candidates.iter().rev().find(|c| c.begin < caret),
    };

    match (found, cycle, direction) {
        (Some(target), _, _) => Some(*target),
        (None, true, Direction::Forward) => candidates.first().copied(),
        (None, true, Direction::Backward) => candidates.last().copied(),
        (None, false, _) => None,
    }
}

/// Vertical scroll offset that pins the line holding `offset` to the top of
/// the viewport.
pub fn pinned_top_offset(snapshot: &Snapshot, offset: usize, line_height: f64) -> f64 {
    snapshot.line_index_of(offset) as f64 * line_height
}

/// True if the line holding `target` lies outside `visible`, which means the
/// viewport should re-center on it.
pub fn needs_recenter(snapshot: &Snapshot, target: Region, visible: Region) -> bool {
    let line = snapshot.line_at(target.begin);
    line.region.begin < visible.begin || line.region.end > visible.end
}
