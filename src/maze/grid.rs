use super::{
    Position,
    cell::{Cell, CellKind},
};

/// Rectangular buffer of cell kinds, stored row-major.
///
/// A grid is a plain owned value: cloning it is a deep copy, which is what the animator relies on
/// to derive every new snapshot from the previous one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    data: Box<[CellKind]>,
    width: u16,
    height: u16,
}

impl Grid {
    pub fn new(height: u16, width: u16, kind: CellKind) -> Self {
        let data = vec![kind; width as usize * height as usize].into_boxed_slice();
        Grid {
            data,
            width,
            height,
        }
    }

    /// Build a grid from rows of kinds. Returns `None` if the rows are ragged or empty.
    pub fn from_rows(rows: &[Vec<CellKind>]) -> Option<Self> {
        let width = rows.first()?.len();
        if width == 0 || rows.iter().any(|row| row.len() != width) {
            return None;
        }
        let height = u16::try_from(rows.len()).ok()?;
        let width = u16::try_from(width).ok()?;
        let data = rows.iter().flatten().copied().collect::<Vec<_>>();
        Some(Grid {
            data: data.into_boxed_slice(),
            width,
            height,
        })
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn is_boundary(&self, pos: Position) -> bool {
        pos.row == 0 || pos.col == 0 || pos.row == self.height - 1 || pos.col == self.width - 1
    }

    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.row < self.height && pos.col < self.width
    }

    fn ravel_index(&self, pos: Position) -> usize {
        // Overflow-safe since width and height are u16 (assuming usize is at least 32 bits)
        pos.row as usize * self.width as usize + pos.col as usize
    }

    pub fn get(&self, pos: Position) -> Option<CellKind> {
        if self.is_in_bounds(pos) {
            Some(self.data[self.ravel_index(pos)])
        } else {
            None
        }
    }

    pub fn set(&mut self, pos: Position, kind: CellKind) {
        let idx = self.ravel_index(pos);
        self.data[idx] = kind;
    }

    /// In-bounds neighbours in the fixed order up, down, left, right.
    ///
    /// Search tie-breaking depends on this order, so it must not change.
    pub fn neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        // NOTE: wrapping_sub on 0 yields u16::MAX and saturating_add caps at u16::MAX, both of
        // which are out of bounds for any grid, so the bounds filter drops them.
        [
            Position::new(pos.row.wrapping_sub(1), pos.col),
            Position::new(pos.row.saturating_add(1), pos.col),
            Position::new(pos.row, pos.col.wrapping_sub(1)),
            Position::new(pos.row, pos.col.saturating_add(1)),
        ]
        .into_iter()
        .filter(move |&p| self.is_in_bounds(p))
    }

    /// Iterate over every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.data.iter().enumerate().map(|(idx, &kind)| Cell {
            row: (idx / self.width as usize) as u16,
            col: (idx % self.width as usize) as u16,
            kind,
        })
    }

    /// Rows of the grid as slices, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[CellKind]> {
        self.data.chunks(self.width.max(1) as usize)
    }

    pub fn positions_of(&self, kind: CellKind) -> Vec<Position> {
        self.cells()
            .filter(|cell| cell.kind == kind)
            .map(|cell| cell.position())
            .collect()
    }

    pub fn count(&self, kind: CellKind) -> usize {
        self.data.iter().filter(|&&k| k == kind).count()
    }

    /// A copy with every search mark reset to a plain passage.
    pub fn cleared(&self) -> Grid {
        let mut grid = self.clone();
        grid.data.iter_mut().for_each(|kind| {
            if kind.is_search_mark() {
                *kind = CellKind::Passage;
            }
        });
        grid
    }
}

impl std::ops::Index<Position> for Grid {
    type Output = CellKind;

    fn index(&self, index: Position) -> &Self::Output {
        &self.data[self.ravel_index(index)]
    }
}

impl std::ops::IndexMut<Position> for Grid {
    fn index_mut(&mut self, index: Position) -> &mut Self::Output {
        let idx = self.ravel_index(index);
        &mut self.data[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_indexing() {
        let mut grid = Grid::new(5, 7, CellKind::Wall);
        grid[Position::new(2, 3)] = CellKind::Start;
        assert_eq!(grid[Position::new(2, 3)], CellKind::Start);
        assert_eq!(grid.get(Position::new(2, 3)), Some(CellKind::Start));
        assert_eq!(grid.get(Position::new(5, 0)), None);
        assert_eq!(grid.count(CellKind::Start), 1);
    }

    #[test]
    fn test_neighbors_order_and_bounds() {
        let grid = Grid::new(5, 5, CellKind::Passage);
        let neighbors = grid.neighbors(Position::new(2, 2)).collect::<Vec<_>>();
        assert_eq!(
            neighbors,
            vec![
                Position::new(1, 2),
                Position::new(3, 2),
                Position::new(2, 1),
                Position::new(2, 3),
            ]
        );
        // Corner only has two in-bounds neighbours
        let corner = grid.neighbors(Position::new(0, 0)).collect::<Vec<_>>();
        assert_eq!(corner, vec![Position::new(1, 0), Position::new(0, 1)]);
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let ragged = vec![vec![CellKind::Wall; 3], vec![CellKind::Wall; 2]];
        assert!(Grid::from_rows(&ragged).is_none());
        assert!(Grid::from_rows(&[]).is_none());
        let square = vec![vec![CellKind::Passage; 3]; 3];
        let grid = Grid::from_rows(&square).expect("rectangular rows");
        assert_eq!((grid.height(), grid.width()), (3, 3));
    }

    #[test]
    fn test_cleared_keeps_endpoints_and_walls() {
        let mut grid = Grid::new(1, 6, CellKind::Passage);
        grid[Position::new(0, 0)] = CellKind::Start;
        grid[Position::new(0, 1)] = CellKind::Visited;
        grid[Position::new(0, 2)] = CellKind::Path;
        grid[Position::new(0, 3)] = CellKind::PathHead;
        grid[Position::new(0, 4)] = CellKind::Wall;
        grid[Position::new(0, 5)] = CellKind::End;
        let cleared = grid.cleared();
        let kinds = cleared.rows().next().expect("one row").to_vec();
        assert_eq!(
            kinds,
            vec![
                CellKind::Start,
                CellKind::Passage,
                CellKind::Passage,
                CellKind::Passage,
                CellKind::Wall,
                CellKind::End,
            ]
        );
    }

    #[test]
    fn test_boundary() {
        let grid = Grid::new(3, 3, CellKind::Wall);
        assert!(grid.is_boundary(Position::new(0, 1)));
        assert!(grid.is_boundary(Position::new(1, 2)));
        assert!(!grid.is_boundary(Position::new(1, 1)));
    }
}
