pub mod renderer;

use std::{io::Write, path::PathBuf};

use crate::{
    error::{MazeError, Result},
    generators::{Generator, generate_with, get_rng},
    maze::{CellKind, Coord, Maze, Topology},
    solvers::compute_path,
    storage::{MazeStore, RenderSettings},
};

pub const USAGE: &str = "\
usage: mazewright [options]
  --shape rect|disk     maze topology (default rect)
  --length N            rectangular columns (default 30)
  --width N             rectangular rows (default 30)
  --radius N            disk radius (default 15)
  --generator dfs|prim  spanning tree algorithm (default dfs)
  --seed N              seed for reproducible mazes
  --entrance X,Y        entrance cell (default: topology default)
  --exit X,Y            exit cell (default: random)
  --cell-size N         render metadata stored in saves (default 20)
  --wall-width N        render metadata stored in saves (default 3)
  --dir PATH            save directory (default saves)
  --save NAME           save the maze as <dir>/NAME.json
  --load NAME           load <dir>/NAME.json instead of generating
  --no-path             do not highlight the path";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Rectangular,
    Disk,
}

/// Everything the command line can choose.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub shape: Shape,
    pub length: i32,
    pub width: i32,
    pub radius: i32,
    pub generator: Generator,
    pub seed: Option<u64>,
    pub entrance: Option<Coord>,
    pub exit: Option<Coord>,
    pub render: RenderSettings,
    pub save_dir: PathBuf,
    pub save: Option<String>,
    pub load: Option<String>,
    pub show_path: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            shape: Shape::Rectangular,
            length: 30,
            width: 30,
            radius: 15,
            generator: Generator::Dfs,
            seed: None,
            entrance: None,
            exit: None,
            render: RenderSettings::default(),
            save_dir: PathBuf::from("saves"),
            save: None,
            load: None,
            show_path: true,
        }
    }
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| MazeError::invalid(format!("{flag} expects a number, got '{value}'")))
}

fn parse_coord(flag: &str, value: &str) -> Result<Coord> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| MazeError::invalid(format!("{flag} expects X,Y, got '{value}'")))?;
    Ok((parse_number(flag, x.trim())?, parse_number(flag, y.trim())?))
}

impl AppConfig {
    /// Parses command line arguments, without the executable name.
    pub fn from_args<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = AppConfig::default();
        let mut args = args.into_iter();
        while let Some(flag) = args.next() {
            if flag == "--no-path" {
                config.show_path = false;
                continue;
            }
            let value = args
                .next()
                .ok_or_else(|| MazeError::invalid(format!("{flag} expects a value")))?;
            match flag.as_str() {
                "--shape" => {
                    config.shape = match value.as_str() {
                        "rect" | "rectangular" => Shape::Rectangular,
                        "disk" | "circular" => Shape::Disk,
                        other => {
                            return Err(MazeError::invalid(format!("unknown shape '{other}'")));
                        }
                    }
                }
                "--length" => config.length = parse_number(&flag, &value)?,
                "--width" => config.width = parse_number(&flag, &value)?,
                "--radius" => config.radius = parse_number(&flag, &value)?,
                "--generator" => config.generator = value.parse()?,
                "--seed" => config.seed = Some(parse_number(&flag, &value)?),
                "--entrance" => config.entrance = Some(parse_coord(&flag, &value)?),
                "--exit" => config.exit = Some(parse_coord(&flag, &value)?),
                "--cell-size" => config.render.cell_size = parse_number(&flag, &value)?,
                "--wall-width" => config.render.wall_width = parse_number(&flag, &value)?,
                "--dir" => config.save_dir = PathBuf::from(value),
                "--save" => config.save = Some(value),
                "--load" => config.load = Some(value),
                other => return Err(MazeError::invalid(format!("unknown option '{other}'"))),
            }
        }
        Ok(config)
    }

    /// Validated topology for the chosen shape.
    pub fn topology(&self) -> Result<Topology> {
        match self.shape {
            Shape::Rectangular => Topology::rectangular(self.length, self.width),
            Shape::Disk => Topology::disk(self.radius),
        }
    }
}

pub struct App {
    config: AppConfig,
    store: MazeStore,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let store = MazeStore::new(config.save_dir.clone());
        Self { config, store }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Creates, generates and solves a maze as configured.
    pub fn build_maze(&self) -> Result<Maze> {
        let config = &self.config;
        let mut maze = Maze::new(config.topology()?);
        if let Some(entrance) = config.entrance {
            maze.set_entrance(entrance)?;
        }

        let mut rng = get_rng(config.seed);
        generate_with(&mut maze, config.generator, &mut rng)?;

        let exit = match config.exit {
            Some(exit) => exit,
            None => maze
                .random_coord(&mut rng)
                .ok_or_else(|| MazeError::invalid("maze has no cells"))?,
        };
        maze.set_exit(exit)?;
        compute_path(&mut maze)?;
        Ok(maze)
    }

    /// Produces the configured maze (loaded or generated), saves it if asked and draws it.
    pub fn run<W: Write>(&self, out: &mut W) -> Result<()> {
        let (maze, settings) = match &self.config.load {
            Some(name) => self.store.load(name)?,
            None => (self.build_maze()?, self.config.render),
        };
        tracing::info!(
            "[app] {} with entrance {:?} and exit {:?}",
            maze.topology(),
            maze.entrance(),
            maze.exit()
        );

        if let Some(name) = &self.config.save {
            self.store.save(&maze, name, &settings)?;
        }

        renderer::draw(out, &maze, self.config.show_path)?;
        let path_length = maze
            .cells()
            .filter(|cell| cell.kind() == CellKind::OnPath)
            .count();
        let (canvas_width, canvas_height) = settings.canvas_size(&maze.topology());
        writeln!(
            out,
            "{}: {} cells, {} between entrance and exit, {}x{} px canvas\r",
            maze.topology(),
            maze.len(),
            path_length,
            canvas_width,
            canvas_height
        )?;
        Ok(())
    }
}
