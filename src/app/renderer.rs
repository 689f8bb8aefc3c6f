use std::io::{Stdout, Write};

use crossterm::{
    QueueableCommand, cursor, queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};

use crate::maze::{CellKind, Grid, Position};

/// Draws grid snapshots, redrawing only the cells that changed since the last one.
pub struct Renderer {
    /// Last snapshot drawn, `None` forces a full redraw
    last: Option<Grid>,
    /// Whether the last draw was skipped because the terminal was too small
    too_small: bool,
}

impl Renderer {
    /// Rows below the maze reserved for status and key help
    pub const NUM_STATUS_ROWS: u16 = 3;

    pub fn new() -> Self {
        Self {
            last: None,
            too_small: false,
        }
    }

    /// Forget what is on screen, so the next draw repaints everything.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Check if terminal size is sufficient for the grid.
    /// If not, display a message and return Ok(false).
    fn check_size(stdout: &mut Stdout, grid: &Grid) -> std::io::Result<bool> {
        let (term_width, term_height) = terminal::size()?;
        let needed_width = grid.width() * CellKind::CELL_WIDTH;
        let needed_height = grid.height() + Renderer::NUM_STATUS_ROWS;
        if term_width < needed_width || term_height < needed_height {
            let msg = format!(
                "Terminal size is too small ({}x{}) for the maze ({}x{}). Please resize the terminal or shrink the maze with '-'.\r\n",
                term_width, term_height, needed_width, needed_height
            );
            queue!(
                stdout,
                terminal::Clear(ClearType::All),
                cursor::MoveTo(0, 0),
                style::PrintStyledContent(msg.with(Color::Yellow).attribute(Attribute::Bold)),
            )?;
            stdout.flush()?;
            return Ok(false);
        }
        Ok(true)
    }

    /// Draw `grid`, diffing against the previous snapshot when the shapes match.
    pub fn draw(&mut self, stdout: &mut Stdout, grid: &Grid) -> std::io::Result<()> {
        if !Renderer::check_size(stdout, grid)? {
            self.too_small = true;
            self.last = None;
            return Ok(());
        }
        if self.too_small {
            self.too_small = false;
            stdout.queue(terminal::Clear(ClearType::All))?;
        }

        match &self.last {
            Some(last) if last.height() == grid.height() && last.width() == grid.width() => {
                for cell in grid.cells() {
                    if last[cell.position()] != cell.kind {
                        Renderer::queue_cell(stdout, cell.position(), cell.kind)?;
                    }
                }
            }
            _ => {
                stdout.queue(terminal::Clear(ClearType::All))?;
                for (y, row) in grid.rows().enumerate() {
                    stdout.queue(cursor::MoveTo(0, y as u16))?;
                    for kind in row {
                        stdout.queue(style::Print(kind))?;
                    }
                }
            }
        }
        stdout.flush()?;
        self.last = Some(grid.clone());
        Ok(())
    }

    fn queue_cell(stdout: &mut Stdout, pos: Position, kind: CellKind) -> std::io::Result<()> {
        queue!(
            stdout,
            cursor::MoveTo(pos.col * CellKind::CELL_WIDTH, pos.row),
            style::Print(kind)
        )
    }

    /// Print the status line and key help under the maze.
    pub fn status(&self, stdout: &mut Stdout, line: &str) -> std::io::Result<()> {
        let Some(grid) = &self.last else {
            // Nothing drawn (terminal too small), keep the size warning visible
            return Ok(());
        };
        let y = grid.height();
        queue!(
            stdout,
            cursor::MoveTo(0, y),
            terminal::Clear(ClearType::FromCursorDown),
            style::PrintStyledContent(line.with(Color::Green).attribute(Attribute::Bold)),
            cursor::MoveTo(0, y + 1),
            style::PrintStyledContent(
                "b/d: solve BFS/DFS  g: new maze  c: clear  +/-: resize  1/2/3: speed  x: cancel  Esc: exit"
                    .with(Color::Cyan)
            ),
        )?;
        stdout.flush()
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
