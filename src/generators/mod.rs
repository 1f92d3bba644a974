use rand::{Rng, SeedableRng, rngs::StdRng};

mod dfs;
mod prim;

pub use dfs::randomized_dfs;
pub use prim::randomized_prim;

use crate::{
    error::{MazeError, Result},
    maze::Maze,
    solvers::compute_path,
};

/// Get a random number generator, optionally seeded for reproducibility.
pub fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generator {
    Dfs,
    Prim,
}

impl std::fmt::Display for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Generator::Dfs => write!(f, "Randomized Depth-First Search (DFS)"),
            Generator::Prim => write!(f, "Prim's Algorithm"),
        }
    }
}

impl std::str::FromStr for Generator {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dfs" => Ok(Generator::Dfs),
            "prim" | "prims" => Ok(Generator::Prim),
            other => Err(MazeError::invalid(format!(
                "unknown generator '{other}', expected 'dfs' or 'prim'"
            ))),
        }
    }
}

/// Carves a spanning tree rooted at the maze's entrance using the given rng.
///
/// A maze that already has open walls or visited cells (generated before, or
/// loaded from a save) is reset first, so the result is always a spanning tree.
pub fn generate_with<R: Rng + ?Sized>(
    maze: &mut Maze,
    generator: Generator,
    rng: &mut R,
) -> Result<()> {
    if maze
        .cells()
        .any(|cell| cell.is_visited() || cell.walls().contains(&false))
    {
        tracing::debug!("[generate] resetting previously carved {}", maze.topology());
        maze.reset();
    }
    tracing::debug!(
        "[generate] {} on {} ({} cells)",
        generator,
        maze.topology(),
        maze.len()
    );
    match generator {
        Generator::Dfs => randomized_dfs(maze, rng),
        Generator::Prim => randomized_prim(maze, rng),
    }
}

/// Carves a spanning tree rooted at the maze's entrance.
/// A `None` seed draws one from the operating system.
pub fn generate_maze(maze: &mut Maze, generator: Generator, seed: Option<u64>) -> Result<()> {
    let mut rng = get_rng(seed);
    generate_with(maze, generator, &mut rng)
}

/// Resets the maze, carves a fresh spanning tree and recomputes the path when an exit is set.
pub fn regenerate(maze: &mut Maze, generator: Generator, seed: Option<u64>) -> Result<()> {
    maze.reset();
    generate_maze(maze, generator, seed)?;
    if maze.exit().is_some() {
        compute_path(maze)?;
    }
    Ok(())
}
