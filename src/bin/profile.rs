use std::time::Instant;

use mazewright::{Generator, Maze, Topology, compute_path, generate_maze};

fn main() -> mazewright::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let mut args = std::env::args();
    args.next(); // Skip executable name
    let num_iters = args
        .next()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(10);

    for (topology, generator) in [
        (Topology::rectangular(255, 255)?, Generator::Dfs),
        (Topology::rectangular(255, 255)?, Generator::Prim),
        (Topology::disk(128)?, Generator::Dfs),
        (Topology::disk(128)?, Generator::Prim),
    ] {
        let mut maze = Maze::new(topology);
        let started = Instant::now();
        for seed in 0..num_iters as u64 {
            maze.reset();
            generate_maze(&mut maze, generator, Some(seed))?;
            let far_corner = maze.cells().last().map(|cell| cell.coord());
            if let Some(exit) = far_corner {
                maze.set_exit(exit)?;
                compute_path(&mut maze)?;
            }
        }
        tracing::info!(
            "[profile] {} / {}: {} iterations in {:?}",
            topology,
            generator,
            num_iters,
            started.elapsed()
        );
    }
    Ok(())
}
