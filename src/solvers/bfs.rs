use std::collections::{HashMap, HashSet, VecDeque};

use super::{Algorithm, SolveError, SolveResult, find_endpoints, reconstruct_path};
use crate::maze::Grid;

/// Breadth-first search from the start cell to the end cell.
///
/// Cells are marked as seen when enqueued, which is also when their parent is recorded, so no
/// cell is queued twice. The first time the end is dequeued it is at its minimum distance, and the
/// search stops there.
pub fn solve_bfs(grid: &Grid) -> Result<SolveResult, SolveError> {
    let (start, goal) = find_endpoints(grid)?;

    let mut queue = VecDeque::from([start]);
    let mut seen = HashSet::from([start]);
    let mut parents = HashMap::new();
    let mut visited_order = Vec::new();

    while let Some(current) = queue.pop_front() {
        visited_order.push(current);
        if current == goal {
            tracing::debug!("[bfs] reached goal {} after {} cells", goal, visited_order.len());
            return Ok(SolveResult {
                algorithm: Algorithm::Bfs,
                path: Some(reconstruct_path(&parents, start, goal)),
                visited_order,
            });
        }

        for neighbor in grid.neighbors(current) {
            if grid[neighbor].is_passable() && seen.insert(neighbor) {
                parents.insert(neighbor, current);
                queue.push_back(neighbor);
            }
        }
    }

    tracing::debug!("[bfs] queue drained after {} cells", visited_order.len());
    Ok(SolveResult {
        algorithm: Algorithm::Bfs,
        path: None,
        visited_order,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::Position;
    use crate::solvers::tests::parse_grid;

    #[test]
    fn test_bfs_takes_the_shorter_branch() {
        // Two routes around the central block; the lower one is shorter
        let grid = parse_grid(
            "
            .......
            .#####.
            S.....E
            ",
        );
        let result = solve_bfs(&grid).expect("valid grid");
        let path = result.path.expect("end reachable");
        assert_eq!(path.len(), 7);
        assert!(path.iter().all(|p| p.row == 2));
    }

    #[test]
    fn test_bfs_visited_order_is_level_order() {
        let grid = parse_grid(
            "
            S..
            ...
            ..E
            ",
        );
        let result = solve_bfs(&grid).expect("valid grid");
        // Neighbours are enqueued up, down, left, right
        assert_eq!(
            result.visited_order,
            vec![
                Position::new(0, 0),
                Position::new(1, 0),
                Position::new(0, 1),
                Position::new(2, 0),
                Position::new(1, 1),
                Position::new(0, 2),
                Position::new(2, 1),
                Position::new(1, 2),
                Position::new(2, 2),
            ]
        );
        assert_eq!(
            result.path,
            Some(vec![
                Position::new(0, 0),
                Position::new(1, 0),
                Position::new(2, 0),
                Position::new(2, 1),
                Position::new(2, 2),
            ])
        );
    }

    #[test]
    fn test_bfs_stops_at_goal() {
        let grid = parse_grid(
            "
            SE....
            ",
        );
        let result = solve_bfs(&grid).expect("valid grid");
        assert_eq!(
            result.visited_order,
            vec![Position::new(0, 0), Position::new(0, 1)]
        );
    }

    #[test]
    fn test_bfs_walks_over_stale_marks() {
        let mut grid = parse_grid(
            "
            S..E
            ",
        );
        grid[Position::new(0, 1)] = crate::maze::CellKind::Visited;
        grid[Position::new(0, 2)] = crate::maze::CellKind::PathHead;
        let result = solve_bfs(&grid).expect("valid grid");
        assert_eq!(result.path_len(), Some(4));
    }
}
