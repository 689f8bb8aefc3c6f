use std::collections::{HashMap, HashSet};

use super::{Algorithm, SolveError, SolveResult, find_endpoints, reconstruct_path};
use crate::maze::Grid;

/// Depth-first search with an explicit stack.
///
/// A cell counts as visited when popped, so it may sit on the stack more than once; stale copies
/// are skipped. Its parent is whoever discovered it first, even if a later push is the one that
/// gets popped. Neighbours are pushed in reverse order so they pop as up, down, left, right.
pub fn solve_dfs(grid: &Grid) -> Result<SolveResult, SolveError> {
    let (start, goal) = find_endpoints(grid)?;

    let mut stack = vec![start];
    let mut discovered = HashSet::from([start]);
    let mut visited = HashSet::new();
    let mut parents = HashMap::new();
    let mut visited_order = Vec::new();

    while let Some(current) = stack.pop() {
        if !visited.insert(current) {
            continue;
        }
        visited_order.push(current);
        if current == goal {
            tracing::debug!("[dfs] reached goal {} after {} cells", goal, visited_order.len());
            return Ok(SolveResult {
                algorithm: Algorithm::Dfs,
                path: Some(reconstruct_path(&parents, start, goal)),
                visited_order,
            });
        }

        let neighbors = grid
            .neighbors(current)
            .filter(|&n| grid[n].is_passable() && !visited.contains(&n))
            .collect::<Vec<_>>();
        for neighbor in neighbors.into_iter().rev() {
            if discovered.insert(neighbor) {
                parents.insert(neighbor, current);
            }
            stack.push(neighbor);
        }
    }

    tracing::debug!("[dfs] stack drained after {} cells", visited_order.len());
    Ok(SolveResult {
        algorithm: Algorithm::Dfs,
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
    fn test_dfs_prefers_up_then_down() {
        let grid = parse_grid(
            "
            ...
            S.E
            ...
            ",
        );
        let result = solve_dfs(&grid).expect("valid grid");
        // From S the first pop is "up", then that branch is exhausted before "down"
        assert_eq!(result.visited_order[0], Position::new(1, 0));
        assert_eq!(result.visited_order[1], Position::new(0, 0));
        assert_eq!(result.visited_order[2], Position::new(0, 1));
    }

    #[test]
    fn test_dfs_keeps_first_discoverer_as_parent() {
        let grid = parse_grid(
            "
            ...
            S.E
            ...
            ",
        );
        let result = solve_dfs(&grid).expect("valid grid");
        assert_eq!(
            result.visited_order,
            vec![
                Position::new(1, 0),
                Position::new(0, 0),
                Position::new(0, 1),
                Position::new(1, 1),
                Position::new(2, 1),
                Position::new(2, 0),
                Position::new(2, 2),
                Position::new(1, 2),
            ]
        );
        // The end is popped from below, but (1,1) discovered it first
        assert_eq!(
            result.path,
            Some(vec![
                Position::new(1, 0),
                Position::new(1, 1),
                Position::new(1, 2),
            ])
        );
    }

    #[test]
    fn test_dfs_exhausts_component_when_unreachable() {
        let grid = parse_grid(
            "
            S.#E
            ..#.
            ",
        );
        let result = solve_dfs(&grid).expect("valid grid");
        assert_eq!(result.path, None);
        let mut visited = result.visited_order.clone();
        visited.sort();
        assert_eq!(
            visited,
            vec![
                Position::new(0, 0),
                Position::new(0, 1),
                Position::new(1, 0),
                Position::new(1, 1),
            ]
        );
    }
}
