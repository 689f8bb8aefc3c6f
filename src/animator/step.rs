use crate::maze::{CellKind, Grid, Position};

/// One scheduled unit of playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Mark a cell the search finalized.
    Visit(Position),
    /// Move the path head to `path[index]`, leaving trail behind it.
    Path(usize),
    /// Demote the last head to trail.
    Finalize,
}

impl Step {
    /// Derive the next snapshot from `prev`. `prev` is left untouched.
    pub fn apply(self, prev: &Grid, path: &[Position]) -> Grid {
        let mut next = prev.clone();
        match self {
            Step::Visit(pos) => {
                // Only plain passages advance; trail, head and endpoints are never demoted
                if next.get(pos) == Some(CellKind::Passage) {
                    next.set(pos, CellKind::Visited);
                }
            }
            Step::Path(index) => {
                for (i, &pos) in path.iter().enumerate().take(index + 1) {
                    let kind = if i == index {
                        CellKind::PathHead
                    } else {
                        CellKind::Path
                    };
                    promote(&mut next, pos, kind);
                }
            }
            Step::Finalize => {
                for &pos in path {
                    if next.get(pos) == Some(CellKind::PathHead) {
                        next.set(pos, CellKind::Path);
                    }
                }
            }
        }
        next
    }
}

fn promote(grid: &mut Grid, pos: Position, kind: CellKind) {
    match grid.get(pos) {
        Some(current) if !current.is_endpoint() && current.is_passable() => grid.set(pos, kind),
        _ => {}
    }
}
