use std::{fmt, io::Write};

use crossterm::{
    QueueableCommand, cursor,
    style::{self, Color, Stylize},
    terminal::{self, ClearType},
};

use crate::maze::{CellKind, Coord, Direction, Maze};

/// One character slot of the drawn maze.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    /// Outside the maze (the corners around a disk).
    Void,
    Wall,
    Passage,
    Entrance,
    Exit,
    Path,
}

impl Glyph {
    /// The width of each glyph when rendered, in character widths.
    pub const CELL_WIDTH: u16 = 2;
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let styled_symbol = match self {
            Glyph::Void => "  ".with(Color::Reset),
            Glyph::Wall => "⬜".with(Color::White),
            Glyph::Passage => "  ".with(Color::Reset),
            Glyph::Entrance => "🟩".with(Color::Green),
            Glyph::Exit => "🟥".with(Color::Red),
            Glyph::Path => "🟨".with(Color::Yellow),
        };

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                styled_symbol.content().width(),
                Glyph::CELL_WIDTH as usize,
                "Each glyph must occupy exactly two character widths."
            );
        }

        write!(f, "{}", styled_symbol)
    }
}

/// Lays the maze out on a `(2 * columns + 1) x (2 * rows + 1)` glyph grid:
/// cells sit on odd positions, walls and passages between them.
pub fn layout(maze: &Maze, show_path: bool) -> Vec<Vec<Glyph>> {
    let (columns, rows) = maze.topology().extent();
    let mut grid = vec![vec![Glyph::Void; 2 * columns as usize + 1]; 2 * rows as usize + 1];
    let slot = |(x, y): Coord, (dx, dy): (i32, i32)| {
        ((2 * y + 1 + dy) as usize, (2 * x + 1 + dx) as usize)
    };
    let on_route = |kind: CellKind| {
        show_path && matches!(kind, CellKind::Entrance | CellKind::Exit | CellKind::OnPath)
    };

    for cell in maze.cells() {
        let coord = cell.coord();
        let glyph = match cell.kind() {
            CellKind::Entrance => Glyph::Entrance,
            CellKind::Exit => Glyph::Exit,
            CellKind::OnPath if show_path => Glyph::Path,
            _ => Glyph::Passage,
        };
        let (row, column) = slot(coord, (0, 0));
        grid[row][column] = glyph;

        for (dx, dy) in [(-1, -1), (1, -1), (-1, 1), (1, 1)] {
            let (row, column) = slot(coord, (dx, dy));
            grid[row][column] = Glyph::Wall;
        }
        for direction in Direction::ALL {
            let (row, column) = slot(coord, direction.offset());
            grid[row][column] = if cell.has_wall(direction) {
                Glyph::Wall
            } else {
                // An open wall joining two route cells is itself part of the route
                let beyond = direction.step(coord).and_then(|next| maze.cell(next));
                match beyond {
                    Some(next) if on_route(cell.kind()) && on_route(next.kind()) => Glyph::Path,
                    _ => Glyph::Passage,
                }
            };
        }
    }
    grid
}

/// Clears the terminal and draws the maze from the top-left corner.
pub fn draw<W: Write>(out: &mut W, maze: &Maze, show_path: bool) -> std::io::Result<()> {
    out.queue(terminal::Clear(ClearType::All))?
        .queue(cursor::MoveTo(0, 0))?;
    for row in layout(maze, show_path) {
        for glyph in row {
            out.queue(style::Print(glyph))?;
        }
        out.queue(style::Print("\r\n"))?;
    }
    out.flush()
}
