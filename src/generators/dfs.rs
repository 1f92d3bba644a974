use rand::{Rng, seq::SliceRandom};

use crate::error::{MazeError, Result};
use crate::maze::{Coord, Maze};

/// A cell being carved from, with the neighbors it has yet to try.
struct Frame {
    coord: Coord,
    pending: std::vec::IntoIter<Coord>,
}

/// Marks `coord` visited and returns its frame with the neighbors in random order.
fn enter<R: Rng + ?Sized>(maze: &mut Maze, coord: Coord, rng: &mut R) -> Result<Frame> {
    maze.mark_visited(coord)?;
    let mut neighbors = maze
        .neighbors(coord)
        .map(|(_, neighbor)| neighbor)
        .collect::<Vec<_>>();
    neighbors.shuffle(rng);
    Ok(Frame {
        coord,
        pending: neighbors.into_iter(),
    })
}

/// Recursive backtracker driven by an explicit stack, so the depth of the
/// maze never touches the call stack.
pub fn randomized_dfs<R: Rng + ?Sized>(maze: &mut Maze, rng: &mut R) -> Result<()> {
    let start = maze.entrance().ok_or(MazeError::EntranceUnset)?;

    let mut stack = vec![enter(maze, start, rng)?];
    let mut carved = 0usize;

    while let Some(frame) = stack.last_mut() {
        let Some(next) = frame.pending.next() else {
            // Every neighbor tried, backtrack
            stack.pop();
            continue;
        };
        let current = frame.coord;
        if maze.is_visited(next) {
            continue;
        }
        maze.open_wall(current, next)?;
        carved += 1;
        stack.push(enter(maze, next, rng)?);
    }

    tracing::debug!("[generate] dfs carved {} passages", carved);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::tests::assert_spanning_tree;
    use crate::maze::{Direction, Topology};
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_randomized_dfs_two_by_two() {
        let mut maze = Maze::new(Topology::rectangular(2, 2).unwrap());
        randomized_dfs(&mut maze, &mut StdRng::seed_from_u64(0)).unwrap();
        assert_spanning_tree(&maze);
        assert_eq!(maze.open_passages().count(), 3);
        // The entrance is a leaf or a branch of the tree, never isolated
        let entrance = maze.cell((0, 0)).unwrap();
        assert!(
            !entrance.has_wall(Direction::Right) || !entrance.has_wall(Direction::Bottom)
        );
    }

    #[test]
    fn test_randomized_dfs_single_row_is_a_line() {
        let mut maze = Maze::new(Topology::rectangular(1, 3).unwrap());
        randomized_dfs(&mut maze, &mut StdRng::seed_from_u64(99)).unwrap();
        let passages = maze.open_passages().collect::<Vec<_>>();
        assert_eq!(passages, vec![((0, 0), (0, 1)), ((0, 1), (0, 2))]);
    }

    #[test]
    fn test_randomized_dfs_deep_maze_does_not_overflow() {
        // A corridor this long would exhaust a default thread stack under naive recursion
        let mut maze = Maze::new(Topology::rectangular(1, 200_000).unwrap());
        randomized_dfs(&mut maze, &mut StdRng::seed_from_u64(5)).unwrap();
        assert_eq!(maze.open_passages().count(), maze.len() - 1);
    }

    #[test]
    fn test_randomized_dfs_starts_from_moved_entrance() {
        let mut maze = Maze::new(Topology::rectangular(5, 5).unwrap());
        maze.set_entrance((2, 2)).unwrap();
        randomized_dfs(&mut maze, &mut StdRng::seed_from_u64(11)).unwrap();
        assert_spanning_tree(&maze);
    }
}
