use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

mod recur_backtrack;

use recur_backtrack::recursive_backtrack;

use crate::maze::{CellKind, Direction, Grid, Position};

/// Smallest accepted lattice dimension, in rooms.
pub const MIN_DIMENSION: u16 = 5;
/// Largest accepted lattice dimension, in rooms.
pub const MAX_DIMENSION: u16 = 50;

/// Get a random number generator, optionally seeded for reproducibility.
pub fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Clamp a requested lattice dimension into `[MIN_DIMENSION, MAX_DIMENSION]`.
///
/// Out of range requests are not an error for a visual tool; they are logged and adjusted.
pub fn clamp_dimension(requested: u16) -> u16 {
    let clamped = requested.clamp(MIN_DIMENSION, MAX_DIMENSION);
    if clamped != requested {
        tracing::warn!(
            "[generator] dimension {} outside [{}, {}], using {}",
            requested,
            MIN_DIMENSION,
            MAX_DIMENSION,
            clamped
        );
    }
    clamped
}

/// Source of the neighbour order used at every room while carving.
pub trait DirectionShuffle {
    fn shuffle_directions(&mut self, directions: &mut [Direction; 4]);
}

/// Any RNG shuffles with Fisher-Yates through [`SliceRandom::shuffle`].
impl<R: rand::Rng + ?Sized> DirectionShuffle for R {
    fn shuffle_directions(&mut self, directions: &mut [Direction; 4]) {
        directions.shuffle(self);
    }
}

/// Replays the same direction order at every room. Useful for golden mazes.
#[derive(Debug, Clone, Copy)]
pub struct FixedOrder(pub [Direction; 4]);

impl DirectionShuffle for FixedOrder {
    fn shuffle_directions(&mut self, directions: &mut [Direction; 4]) {
        *directions = self.0;
    }
}

/// Grid position of the start opening for a `rows x cols` lattice: left of room (0, 0).
pub fn start_position() -> Position {
    Position::new(1, 0)
}

/// Grid position of the end opening: right of the bottom-right room.
pub fn end_position(rows: u16, cols: u16) -> Position {
    Position::new(rows * 2 - 1, cols * 2)
}

/// Generate a perfect maze with OS entropy.
pub fn generate(rows: u16, cols: u16) -> Grid {
    generate_seeded(rows, cols, None)
}

/// Generate a perfect maze, optionally from a fixed seed.
pub fn generate_seeded(rows: u16, cols: u16, seed: Option<u64>) -> Grid {
    let mut rng = get_rng(seed);
    generate_with(rows, cols, &mut rng)
}

/// Generate a perfect maze with the given direction source.
///
/// Produces a `(2*rows+1) x (2*cols+1)` grid whose rooms and opened connectors form a spanning
/// tree, with `Start` at `(1, 0)` and `End` at `(2*rows-1, 2*cols)`.
pub fn generate_with<S: DirectionShuffle + ?Sized>(rows: u16, cols: u16, shuffle: &mut S) -> Grid {
    let rows = clamp_dimension(rows);
    let cols = clamp_dimension(cols);

    let mut grid = Grid::new(rows * 2 + 1, cols * 2 + 1, CellKind::Wall);
    recursive_backtrack(&mut grid, rows, cols, shuffle);

    grid.set(start_position(), CellKind::Start);
    grid.set(end_position(rows, cols), CellKind::End);

    tracing::debug!(
        "[generator] carved {}x{} maze into a {}x{} grid",
        rows,
        cols,
        grid.height(),
        grid.width()
    );
    grid
}
