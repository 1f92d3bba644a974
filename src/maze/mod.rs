pub mod cell;
pub mod topology;

use std::collections::BTreeMap;

use rand::Rng;

pub use cell::{Cell, CellKind, Direction};
pub use topology::Topology;

use crate::error::{MazeError, Result};

/// Cell coordinate `(x, y)`; `x` grows to the right and `y` grows downwards.
pub type Coord = (i32, i32);

/// A maze over a fixed topology: one cell per coordinate, plus an optional entrance and exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    topology: Topology,
    cells: BTreeMap<Coord, Cell>,
    entrance: Option<Coord>,
    exit: Option<Coord>,
}

impl Maze {
    /// Creates a maze with every wall standing and the entrance at the topology's default.
    pub fn new(topology: Topology) -> Self {
        let mut maze = Maze::bare(topology);
        let entrance = topology.default_entrance();
        maze.entrance = Some(entrance);
        maze.refresh_kind(entrance);
        maze
    }

    /// Creates a maze with every wall standing and neither entrance nor exit.
    pub fn bare(topology: Topology) -> Self {
        Maze {
            topology,
            cells: Maze::closed_cells(&topology),
            entrance: None,
            exit: None,
        }
    }

    fn closed_cells(topology: &Topology) -> BTreeMap<Coord, Cell> {
        topology
            .coords()
            .map(|(x, y)| ((x, y), Cell::new(x, y)))
            .collect()
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn entrance(&self) -> Option<Coord> {
        self.entrance
    }

    pub fn exit(&self) -> Option<Coord> {
        self.exit
    }

    /// Number of cells in the maze.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.cells.contains_key(&coord)
    }

    pub fn cell(&self, coord: Coord) -> Option<&Cell> {
        self.cells.get(&coord)
    }

    /// Iterates over every cell in coordinate order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.values()
    }

    fn cell_mut(&mut self, coord: Coord) -> Result<&mut Cell> {
        self.cells
            .get_mut(&coord)
            .ok_or(MazeError::UnknownCell { coord })
    }

    /// The kind a cell should carry given the recorded entrance and exit, ignoring path marks.
    fn endpoint_kind(&self, coord: Coord) -> CellKind {
        if self.entrance == Some(coord) {
            CellKind::Entrance
        } else if self.exit == Some(coord) {
            CellKind::Exit
        } else {
            CellKind::Regular
        }
    }

    fn refresh_kind(&mut self, coord: Coord) {
        let kind = self.endpoint_kind(coord);
        if let Some(cell) = self.cells.get_mut(&coord) {
            cell.set_kind(kind);
        }
    }

    /// Moves the entrance to `coord`, demoting the previous entrance cell.
    pub fn set_entrance(&mut self, coord: Coord) -> Result<()> {
        if !self.contains(coord) {
            return Err(MazeError::UnknownCell { coord });
        }
        if let Some(previous) = self.entrance.replace(coord) {
            self.refresh_kind(previous);
        }
        self.refresh_kind(coord);
        Ok(())
    }

    /// Moves the exit to `coord`, demoting the previous exit cell.
    ///
    /// An exit placed on the entrance is recorded, but the shared cell keeps the entrance kind.
    pub fn set_exit(&mut self, coord: Coord) -> Result<()> {
        if !self.contains(coord) {
            return Err(MazeError::UnknownCell { coord });
        }
        if let Some(previous) = self.exit.replace(coord) {
            self.refresh_kind(previous);
        }
        self.refresh_kind(coord);
        Ok(())
    }

    /// Demotes every on-path cell back to regular.
    pub fn clear_path(&mut self) {
        self.cells
            .values_mut()
            .filter(|cell| cell.kind() == CellKind::OnPath)
            .for_each(|cell| cell.set_kind(CellKind::Regular));
    }

    pub(crate) fn set_path_mark(&mut self, coord: Coord, on_path: bool) {
        if let Some(cell) = self.cells.get_mut(&coord) {
            match (cell.kind(), on_path) {
                (CellKind::Regular, true) => cell.set_kind(CellKind::OnPath),
                (CellKind::OnPath, false) => cell.set_kind(CellKind::Regular),
                _ => {}
            }
        }
    }

    /// Removes the wall shared by two adjacent cells, on both sides.
    pub fn open_wall(&mut self, from: Coord, to: Coord) -> Result<()> {
        let direction = Direction::between(from, to).ok_or(MazeError::NotAdjacent { from, to })?;
        if !self.contains(to) {
            return Err(MazeError::UnknownCell { coord: to });
        }
        self.cell_mut(from)?.set_wall(direction, false);
        self.cell_mut(to)?.set_wall(direction.opposite(), false);
        Ok(())
    }

    /// Whether `from` has no wall on the side facing `direction`.
    pub fn is_open(&self, from: Coord, direction: Direction) -> bool {
        self.cell(from)
            .is_some_and(|cell| !cell.has_wall(direction))
    }

    /// In-topology neighbors of `coord`, with the direction leading to each.
    pub fn neighbors(&self, coord: Coord) -> impl Iterator<Item = (Direction, Coord)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |direction| Some((direction, direction.step(coord)?)))
            .filter(move |&(_, neighbor)| self.contains(neighbor))
    }

    /// Every pair of adjacent cells with no wall between them, each pair reported once.
    pub fn open_passages(&self) -> impl Iterator<Item = (Coord, Coord)> + '_ {
        self.cells.values().flat_map(move |cell| {
            [Direction::Right, Direction::Bottom]
                .into_iter()
                .filter(move |&direction| !cell.has_wall(direction))
                .filter_map(move |direction| Some((cell.coord(), direction.step(cell.coord())?)))
                .filter(move |&(_, neighbor)| self.contains(neighbor))
        })
    }

    pub(crate) fn is_visited(&self, coord: Coord) -> bool {
        self.cells.get(&coord).is_some_and(Cell::is_visited)
    }

    pub(crate) fn mark_visited(&mut self, coord: Coord) -> Result<()> {
        self.cell_mut(coord)?.visited = true;
        Ok(())
    }

    pub(crate) fn restore_cell(&mut self, coord: Coord, walls: [bool; 4], kind: CellKind) -> Result<()> {
        let cell = self.cell_mut(coord)?;
        cell.set_walls(walls);
        cell.set_kind(kind);
        Ok(())
    }

    pub(crate) fn restore_endpoints(&mut self, entrance: Option<Coord>, exit: Option<Coord>) {
        self.entrance = entrance;
        self.exit = exit;
    }

    /// Closes every wall and forgets visits and path marks, keeping the topology,
    /// entrance and exit.
    pub fn reset(&mut self) {
        self.cells = Maze::closed_cells(&self.topology);
        for endpoint in [self.entrance, self.exit].into_iter().flatten() {
            self.refresh_kind(endpoint);
        }
    }

    /// Picks a cell coordinate uniformly at random, `None` for a maze without cells.
    pub fn random_coord<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Coord> {
        if self.cells.is_empty() {
            return None;
        }
        let index = rng.random_range(0..self.cells.len());
        self.cells.keys().nth(index).copied()
    }
}
