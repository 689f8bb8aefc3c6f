use std::collections::HashMap;

mod bfs;
mod dfs;

pub use bfs::solve_bfs;
pub use dfs::solve_dfs;

use crate::maze::{CellKind, Grid, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Algorithm {
    Bfs,
    Dfs,
}

impl Algorithm {
    pub const ALL: [Algorithm; 2] = [Algorithm::Bfs, Algorithm::Dfs];

    /// Short lowercase name, as accepted on the command line.
    pub fn short_name(self) -> &'static str {
        match self {
            Algorithm::Bfs => "bfs",
            Algorithm::Dfs => "dfs",
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Algorithm::Bfs => write!(f, "Breadth-First Search (BFS)"),
            Algorithm::Dfs => write!(f, "Depth-First Search (DFS)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SolveError {
    /// The grid does not hold exactly one cell of the endpoint kind.
    #[error("grid must contain exactly one {} cell, found {found}", .kind.name())]
    MissingEndpoint { kind: CellKind, found: usize },
}

/// Outcome of a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveResult {
    pub algorithm: Algorithm,
    /// Start to end, both included. `None` when the end is unreachable.
    pub path: Option<Vec<Position>>,
    /// Cells in the order the search finalized them (dequeued or popped).
    pub visited_order: Vec<Position>,
}

impl SolveResult {
    pub fn path_len(&self) -> Option<usize> {
        self.path.as_ref().map(Vec::len)
    }
}

/// Locate the single start and end cells of a grid.
pub fn find_endpoints(grid: &Grid) -> Result<(Position, Position), SolveError> {
    let find = |kind| match grid.positions_of(kind).as_slice() {
        [pos] => Ok(*pos),
        others => Err(SolveError::MissingEndpoint {
            kind,
            found: others.len(),
        }),
    };
    Ok((find(CellKind::Start)?, find(CellKind::End)?))
}

/// Follow parent links back from `end` and return the path in start-to-end order.
fn reconstruct_path(
    parents: &HashMap<Position, Position>,
    start: Position,
    end: Position,
) -> Vec<Position> {
    let mut path = vec![end];
    let mut current = end;
    while current != start {
        match parents.get(&current) {
            Some(&parent) => {
                path.push(parent);
                current = parent;
            }
            // Only reachable cells are reconstructed, so every one of them has a parent
            None => break,
        }
    }
    path.reverse();
    path
}

/// Run the given search over `grid`. The grid is only read.
pub fn solve(grid: &Grid, algorithm: Algorithm) -> Result<SolveResult, SolveError> {
    let result = match algorithm {
        Algorithm::Bfs => solve_bfs(grid),
        Algorithm::Dfs => solve_dfs(grid),
    }?;
    match result.path_len() {
        Some(len) => tracing::info!(
            "[solver] {} found a path of {} cells after visiting {}",
            algorithm,
            len,
            result.visited_order.len()
        ),
        None => tracing::info!(
            "[solver] {} found no path after visiting {}",
            algorithm,
            result.visited_order.len()
        ),
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Parse a small ASCII grid: `#` wall, `.` passage, `S` start, `E` end.
    pub(crate) fn parse_grid(text: &str) -> Grid {
        let rows = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                line.chars()
                    .map(|c| match c {
                        '#' => CellKind::Wall,
                        'S' => CellKind::Start,
                        'E' => CellKind::End,
                        _ => CellKind::Passage,
                    })
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();
        Grid::from_rows(&rows).expect("test grid must be rectangular")
    }

    #[test]
    fn test_missing_start() {
        let grid = parse_grid(
            "
            ...E
            ",
        );
        assert_eq!(
            find_endpoints(&grid),
            Err(SolveError::MissingEndpoint {
                kind: CellKind::Start,
                found: 0
            })
        );
        assert!(solve(&grid, Algorithm::Bfs).is_err());
        assert!(solve(&grid, Algorithm::Dfs).is_err());
    }

    #[test]
    fn test_duplicate_end() {
        let grid = parse_grid(
            "
            S.EE
            ",
        );
        let err = find_endpoints(&grid).expect_err("two end cells");
        assert_eq!(
            err,
            SolveError::MissingEndpoint {
                kind: CellKind::End,
                found: 2
            }
        );
        assert_eq!(err.to_string(), "grid must contain exactly one end cell, found 2");
    }

    #[test]
    fn test_reconstruct_path_orders_start_to_end() {
        let mut parents = HashMap::new();
        parents.insert(Position::new(0, 1), Position::new(0, 0));
        parents.insert(Position::new(0, 2), Position::new(0, 1));
        let path = reconstruct_path(&parents, Position::new(0, 0), Position::new(0, 2));
        assert_eq!(
            path,
            vec![Position::new(0, 0), Position::new(0, 1), Position::new(0, 2)]
        );
    }

    #[test]
    fn test_solvers_agree_on_unique_path() {
        let grid = parse_grid(
            "
            #####
            S...#
            ###.#
            #...E
            #####
            ",
        );
        let bfs = solve(&grid, Algorithm::Bfs).expect("valid grid");
        let dfs = solve(&grid, Algorithm::Dfs).expect("valid grid");
        assert_eq!(bfs.path, dfs.path);
        assert_eq!(bfs.path_len(), Some(7));
    }
}
