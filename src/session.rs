use rand::rngs::StdRng;

use crate::{
    animator::{AnimationSink, Animator, Speed},
    config::Config,
    generators::{clamp_dimension, generate_with, get_rng},
    maze::Grid,
    solvers::{Algorithm, SolveError, SolveResult, solve},
};

/// Owns the current maze and the animator, and guards every grid-mutating action.
///
/// While an animation is playing, [`solve`](Session::solve), [`regenerate`](Session::regenerate),
/// [`clear`](Session::clear) and [`resize`](Session::resize) do nothing and return `false`.
pub struct Session {
    /// The maze as generated, without any search marks.
    maze: Grid,
    rows: u16,
    cols: u16,
    speed: Speed,
    rng: StdRng,
    animator: Animator,
    last_result: Option<SolveResult>,
}

impl Session {
    pub fn new(config: &Config, sink: impl AnimationSink + 'static) -> Self {
        let rows = clamp_dimension(config.rows);
        let cols = clamp_dimension(config.cols);
        let mut rng = get_rng(config.seed);
        let maze = generate_with(rows, cols, &mut rng);
        let animator = Animator::new(maze.clone(), sink);
        tracing::info!("[session] new {}x{} maze", rows, cols);
        Session {
            maze,
            rows,
            cols,
            speed: config.speed,
            rng,
            animator,
            last_result: None,
        }
    }

    /// The current working grid, including any search marks.
    pub fn grid(&self) -> &Grid {
        self.animator.grid()
    }

    /// The generated maze without search marks.
    pub fn maze(&self) -> &Grid {
        &self.maze
    }

    pub fn dimensions(&self) -> (u16, u16) {
        (self.rows, self.cols)
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    pub fn last_result(&self) -> Option<&SolveResult> {
        self.last_result.as_ref()
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.animator.next_deadline()
    }

    /// Advance the animation clock. Returns the number of steps fired.
    pub fn tick(&mut self, now: u64) -> usize {
        self.animator.advance_to(now)
    }

    /// Only affects animations started afterwards.
    pub fn set_speed(&mut self, speed: Speed) {
        self.speed = speed;
    }

    pub fn cancel(&mut self) {
        self.animator.cancel_all();
    }

    fn guard(&self, action: &str) -> bool {
        if self.is_animating() {
            tracing::warn!("[session] ignoring {} while animating", action);
            false
        } else {
            true
        }
    }

    /// Search a pristine copy of the maze and start animating the result.
    ///
    /// Returns `Ok(false)` if an animation is already playing.
    pub fn solve(&mut self, algorithm: Algorithm) -> Result<bool, SolveError> {
        if !self.guard("solve") {
            return Ok(false);
        }
        let grid = self.maze.cleared();
        let result = solve(&grid, algorithm)?;
        self.animator.load(grid);
        let started = self.animator.start(&result, self.speed);
        self.last_result = Some(result);
        Ok(started)
    }

    /// Carve a new maze with the current dimensions.
    pub fn regenerate(&mut self) -> bool {
        if !self.guard("regenerate") {
            return false;
        }
        self.maze = generate_with(self.rows, self.cols, &mut self.rng);
        self.last_result = None;
        tracing::info!("[session] regenerated {}x{} maze", self.rows, self.cols);
        self.animator.load(self.maze.clone())
    }

    /// Remove search marks from the working grid.
    pub fn clear(&mut self) -> bool {
        if !self.guard("clear") {
            return false;
        }
        let cleared = self.animator.grid().cleared();
        self.animator.load(cleared)
    }

    /// Change the lattice dimensions (clamped) and regenerate.
    pub fn resize(&mut self, rows: u16, cols: u16) -> bool {
        if !self.guard("resize") {
            return false;
        }
        self.rows = clamp_dimension(rows);
        self.cols = clamp_dimension(cols);
        self.regenerate()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc::{Receiver, channel};

    use super::*;
    use crate::{
        animator::AnimationEvent,
        maze::{CellKind, Position},
    };

    fn session(rows: u16, cols: u16) -> (Session, Receiver<AnimationEvent>) {
        let config = Config {
            rows,
            cols,
            speed: Speed::Fast,
            seed: Some(7),
            ..Config::default()
        };
        let (tx, rx) = channel();
        (Session::new(&config, tx), rx)
    }

    #[test]
    fn test_actions_are_ignored_while_animating() {
        let (mut session, _rx) = session(6, 6);
        assert_eq!(session.solve(Algorithm::Bfs), Ok(true));
        assert!(session.is_animating());

        let before = session.maze().clone();
        assert_eq!(session.solve(Algorithm::Dfs), Ok(false));
        assert!(!session.regenerate());
        assert!(!session.clear());
        assert!(!session.resize(20, 20));
        assert_eq!(session.dimensions(), (6, 6));
        assert_eq!(session.maze(), &before);
        assert_eq!(
            session.last_result().map(|r| r.algorithm),
            Some(Algorithm::Bfs)
        );
    }

    #[test]
    fn test_solve_plays_to_completion() {
        let (mut session, rx) = session(5, 5);
        session.solve(Algorithm::Bfs).expect("generated maze is valid");
        while let Some(deadline) = session.next_deadline() {
            session.tick(deadline);
        }
        assert!(!session.is_animating());

        let path = session
            .last_result()
            .and_then(|r| r.path.clone())
            .expect("perfect maze is solvable");
        for pos in &path[1..path.len() - 1] {
            assert_eq!(session.grid()[*pos], CellKind::Path);
        }
        assert_eq!(session.grid()[Position::new(1, 0)], CellKind::Start);
        assert_eq!(session.grid().count(CellKind::PathHead), 0);

        let completed = rx
            .try_iter()
            .filter(|e| matches!(e, AnimationEvent::Completed(_)))
            .count();
        assert_eq!(completed, 1);
    }

    #[test]
    fn test_clear_and_resolve() {
        let (mut session, _rx) = session(5, 5);
        session.solve(Algorithm::Dfs).expect("generated maze is valid");
        session.tick(1_000_000);
        assert!(session.grid().count(CellKind::Visited) + session.grid().count(CellKind::Path) > 0);

        assert!(session.clear());
        assert_eq!(session.grid(), session.maze());

        // A fresh solve starts from the pristine maze
        assert_eq!(session.solve(Algorithm::Dfs), Ok(true));
    }

    #[test]
    fn test_cancel_unblocks_actions() {
        let (mut session, _rx) = session(5, 5);
        session.solve(Algorithm::Bfs).expect("generated maze is valid");
        session.cancel();
        assert!(!session.is_animating());
        assert!(session.resize(3, 80));
        assert_eq!(session.dimensions(), (5, 50));
        assert_eq!(session.grid().width(), 101);
        assert!(session.last_result().is_none());
    }
}
