use rand::Rng;

use crate::error::{MazeError, Result};
use crate::maze::{Coord, Direction, Maze};

/// Randomized Prim's algorithm over candidate walls.
///
/// The frontier holds `(cell, direction)` pairs naming a wall of an already
/// visited cell. A wall is opened only when it leads to an unvisited cell, so
/// the carved passages always form a tree.
pub fn randomized_prim<R: Rng + ?Sized>(maze: &mut Maze, rng: &mut R) -> Result<()> {
    let start = maze.entrance().ok_or(MazeError::EntranceUnset)?;

    // The root belongs to the tree before any wall is drawn
    maze.mark_visited(start)?;
    let mut frontier: Vec<(Coord, Direction)> =
        Direction::ALL.iter().map(|&d| (start, d)).collect();
    let mut carved = 0usize;

    while !frontier.is_empty() {
        // Randomly select a candidate wall, swap-with-last keeps removal O(1)
        let idx = rng.random_range(0..frontier.len());
        let (current, direction) = frontier.swap_remove(idx);
        let Some(neighbor) = direction.step(current).filter(|&n| maze.contains(n)) else {
            continue;
        };
        let fresh = match (maze.is_visited(current), maze.is_visited(neighbor)) {
            // Opening this wall would close a cycle
            (true, true) => continue,
            (false, _) => current,
            (_, false) => neighbor,
        };

        maze.open_wall(current, neighbor)?;
        maze.mark_visited(current)?;
        maze.mark_visited(neighbor)?;
        carved += 1;
        frontier.extend(Direction::ALL.iter().map(|&d| (fresh, d)));
    }

    tracing::debug!("[generate] prim carved {} passages", carved);
    Ok(())
}
