use crossterm::style::{Color, Stylize};

use std::fmt;

use crate::maze::Position;

/// The closed set of states a grid slot can be in.
///
/// During playback a slot only moves forward along
/// `Passage -> Visited -> Path -> PathHead -> Path`. `Start` and `End` never change once placed.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    #[default]
    Wall,
    Passage,
    Start,
    End,
    /// Finalized by the search.
    Visited,
    /// Trail behind the path head.
    Path,
    /// Leading cell of the path playback.
    PathHead,
}

impl CellKind {
    /// The width of each cell when rendered, in character widths.
    pub const CELL_WIDTH: u16 = 2;

    /// Whether a search may step onto this cell.
    pub fn is_passable(self) -> bool {
        self != CellKind::Wall
    }

    /// Start and end are fixed once the maze is carved.
    pub fn is_endpoint(self) -> bool {
        matches!(self, CellKind::Start | CellKind::End)
    }

    /// Marks left behind by a solve or an animation.
    pub fn is_search_mark(self) -> bool {
        matches!(self, CellKind::Visited | CellKind::Path | CellKind::PathHead)
    }

    /// Name used in error messages and logs.
    pub fn name(self) -> &'static str {
        match self {
            CellKind::Wall => "wall",
            CellKind::Passage => "passage",
            CellKind::Start => "start",
            CellKind::End => "end",
            CellKind::Visited => "visited",
            CellKind::Path => "path",
            CellKind::PathHead => "path head",
        }
    }
}

/// A value view of one grid slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub row: u16,
    pub col: u16,
    pub kind: CellKind,
}

impl Cell {
    pub fn position(&self) -> Position {
        Position::new(self.row, self.col)
    }
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let styled_symbol = match self {
            CellKind::Wall => "⬜".with(Color::White),
            CellKind::Passage => "  ".with(Color::Reset),
            CellKind::Start => "🟩".with(Color::Green),
            CellKind::End => "🟥".with(Color::Red),
            CellKind::Visited => "* ".with(Color::Blue),
            CellKind::Path => "🟨".with(Color::Yellow),
            CellKind::PathHead => "🟡".with(Color::Yellow),
        };

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                styled_symbol.content().width(),
                CellKind::CELL_WIDTH as usize,
                "Each cell must occupy exactly two character widths."
            );
        }

        write!(f, "{}", styled_symbol)
    }
}
