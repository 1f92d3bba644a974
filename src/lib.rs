//! Perfect maze generation over rectangular and disk grids.
//!
//! A [`Maze`] is built from a [`Topology`], carved into a spanning tree by one
//! of the [`generators`], solved by [`solvers::compute_path`] and persisted
//! through [`storage::MazeStore`].

pub mod app;
pub mod error;
pub mod generators;
pub mod maze;
pub mod solvers;
pub mod storage;

pub use error::{MazeError, Result};
pub use generators::{Generator, generate_maze, regenerate};
pub use maze::{Cell, CellKind, Coord, Direction, Maze, Topology};
pub use solvers::{Traversal, compute_path};
pub use storage::{MazeStore, RenderSettings};
