use std::fmt;

use super::Coord;

/// The four sides of a cell. The discriminants are the codes used in save files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Top = 0,
    Right = 1,
    Bottom = 2,
    Left = 3,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Top,
        Direction::Right,
        Direction::Bottom,
        Direction::Left,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Direction> {
        Direction::ALL.get(index).copied()
    }

    /// The side of the neighboring cell that faces this side.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Top => Direction::Bottom,
            Direction::Right => Direction::Left,
            Direction::Bottom => Direction::Top,
            Direction::Left => Direction::Right,
        }
    }

    /// Coordinate delta of one step in this direction. `y` grows downwards.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::Top => (0, -1),
            Direction::Right => (1, 0),
            Direction::Bottom => (0, 1),
            Direction::Left => (-1, 0),
        }
    }

    /// The coordinate one step away, or `None` past the edge of the `i32` plane.
    pub fn step(self, (x, y): Coord) -> Option<Coord> {
        let (dx, dy) = self.offset();
        Some((x.checked_add(dx)?, y.checked_add(dy)?))
    }

    /// The direction leading from `from` to `to`, if they are one unit apart along one axis.
    pub fn between(from: Coord, to: Coord) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|&direction| direction.step(from) == Some(to))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Top => write!(f, "top"),
            Direction::Right => write!(f, "right"),
            Direction::Bottom => write!(f, "bottom"),
            Direction::Left => write!(f, "left"),
        }
    }
}

/// Classification of a cell. The discriminants are the codes used in save files.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    #[default]
    Regular = 0,
    /// The root of the spanning tree.
    Entrance = 1,
    Exit = 2,
    /// Lies strictly between the entrance and the exit on the unique path joining them.
    OnPath = 3,
}

impl CellKind {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<CellKind> {
        match code {
            0 => Some(CellKind::Regular),
            1 => Some(CellKind::Entrance),
            2 => Some(CellKind::Exit),
            3 => Some(CellKind::OnPath),
            _ => None,
        }
    }
}

/// A single grid unit with its four walls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    x: i32,
    y: i32,
    walls: [bool; 4],
    /// Generation scratch state; meaningless once a generator has returned.
    pub(crate) visited: bool,
    kind: CellKind,
}

impl Cell {
    /// A regular, unvisited cell with all four walls standing.
    pub fn new(x: i32, y: i32) -> Self {
        Cell {
            x,
            y,
            walls: [true; 4],
            visited: false,
            kind: CellKind::Regular,
        }
    }

    pub fn coord(&self) -> Coord {
        (self.x, self.y)
    }

    pub fn has_wall(&self, direction: Direction) -> bool {
        self.walls[direction.index()]
    }

    /// Wall flags indexed by `Direction::index`.
    pub fn walls(&self) -> [bool; 4] {
        self.walls
    }

    pub fn kind(&self) -> CellKind {
        self.kind
    }

    pub fn is_visited(&self) -> bool {
        self.visited
    }

    pub(crate) fn set_wall(&mut self, direction: Direction, present: bool) {
        self.walls[direction.index()] = present;
    }

    pub(crate) fn set_walls(&mut self, walls: [bool; 4]) {
        self.walls = walls;
    }

    pub(crate) fn set_kind(&mut self, kind: CellKind) {
        self.kind = kind;
    }
}
