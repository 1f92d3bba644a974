use std::collections::HashMap;

use crate::maze::{Coord, Direction, Maze};

/// Discovery and finish times of a depth-first walk over open passages.
///
/// Owned by the caller; nothing is remembered between walks except what the
/// caller keeps in this value.
#[derive(Debug, Default, Clone)]
pub struct Traversal {
    discovery: HashMap<Coord, u32>,
    finish: HashMap<Coord, u32>,
    clock: u32,
}

/// A cell on the walk, with the index of the next direction to try.
struct Frame {
    coord: Coord,
    next_direction: usize,
}

impl Traversal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Walks every cell reachable from `root` through open walls, overwriting any previous walk.
    pub fn run(&mut self, maze: &Maze, root: Coord) {
        self.discovery.clear();
        self.finish.clear();
        self.clock = 0;
        if !maze.contains(root) {
            return;
        }

        let mut stack = vec![self.discover(root)];
        while let Some(frame) = stack.last_mut() {
            let Some(direction) = Direction::from_index(frame.next_direction) else {
                let done = frame.coord;
                stack.pop();
                self.clock += 1;
                self.finish.insert(done, self.clock);
                continue;
            };
            frame.next_direction += 1;

            let coord = frame.coord;
            let Some(next) = direction.step(coord) else {
                continue;
            };
            if maze.is_open(coord, direction)
                && maze.contains(next)
                && !self.discovery.contains_key(&next)
            {
                stack.push(self.discover(next));
            }
        }
    }

    fn discover(&mut self, coord: Coord) -> Frame {
        self.clock += 1;
        self.discovery.insert(coord, self.clock);
        Frame {
            coord,
            next_direction: 0,
        }
    }

    pub fn discovery(&self, coord: Coord) -> Option<u32> {
        self.discovery.get(&coord).copied()
    }

    pub fn finish(&self, coord: Coord) -> Option<u32> {
        self.finish.get(&coord).copied()
    }

    /// Whether the walk reached `coord` from the root.
    pub fn reaches(&self, coord: Coord) -> bool {
        self.discovery.contains_key(&coord)
    }

    /// Whether `ancestor` lies on the walk's path from the root to `descendant`.
    /// Every reached cell is its own ancestor.
    pub fn is_ancestor(&self, ancestor: Coord, descendant: Coord) -> bool {
        match (
            self.discovery(ancestor),
            self.finish(ancestor),
            self.discovery(descendant),
            self.finish(descendant),
        ) {
            (Some(a_in), Some(a_out), Some(d_in), Some(d_out)) => a_in <= d_in && a_out >= d_out,
            _ => false,
        }
    }
}
