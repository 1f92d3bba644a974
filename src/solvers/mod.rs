mod traversal;

pub use traversal::Traversal;

use crate::error::{MazeError, Result};
use crate::maze::{Coord, Maze};

/// Marks the cells between the entrance and the exit as on-path and returns the walk used.
pub fn compute_path(maze: &mut Maze) -> Result<Traversal> {
    let mut traversal = Traversal::new();
    compute_path_with(maze, &mut traversal)?;
    Ok(traversal)
}

/// Same as [`compute_path`], reusing the caller's traversal buffers.
///
/// A cell is on the path when it is an ancestor of the exit in the depth-first
/// walk rooted at the entrance. Stale path marks are cleared, and an exit the
/// walk cannot reach leaves no path at all.
pub fn compute_path_with(maze: &mut Maze, traversal: &mut Traversal) -> Result<()> {
    let exit = maze.exit().ok_or(MazeError::ExitUnset)?;
    let entrance = maze.entrance().ok_or(MazeError::EntranceUnset)?;

    traversal.run(maze, entrance);
    if !traversal.reaches(exit) {
        tracing::warn!("[path] exit {:?} is not reachable from {:?}", exit, entrance);
    }

    let marks = maze
        .cells()
        .map(|cell| {
            let coord = cell.coord();
            let on_path =
                coord != entrance && coord != exit && traversal.is_ancestor(coord, exit);
            (coord, on_path)
        })
        .collect::<Vec<_>>();
    let length = marks.iter().filter(|(_, on_path)| *on_path).count();
    for (coord, on_path) in marks {
        maze.set_path_mark(coord, on_path);
    }

    tracing::debug!(
        "[path] {} cells between {:?} and {:?}",
        length,
        entrance,
        exit
    );
    Ok(())
}

/// Moves the entrance and recomputes the path if an exit is set.
pub fn relocate_entrance(maze: &mut Maze, coord: Coord) -> Result<()> {
    maze.set_entrance(coord)?;
    maze.clear_path();
    if maze.exit().is_some() {
        compute_path(maze)?;
    }
    Ok(())
}

/// Moves the exit and recomputes the path.
pub fn relocate_exit(maze: &mut Maze, coord: Coord) -> Result<()> {
    maze.set_exit(coord)?;
    maze.clear_path();
    compute_path(maze)?;
    Ok(())
}
