//! Save files.
//!
//! A save is two JSON documents, one per line. The first describes the
//! topology (`["rectangular", length, width]` or `["disk", radius]`), the
//! second holds the cell table, entrance, exit and render settings:
//!
//! ```text
//! ["rectangular",2,1]
//! [{"(0, 0)":[0,0,{"0":true,"1":false,"2":true,"3":true},1],"(1, 0)":[...]},[0,0],[1,0],20,3]
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::{MazeError, Result};
use crate::maze::{CellKind, Coord, Direction, Maze, Topology};

/// Pixel metrics a renderer uses; stored with the maze but not part of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderSettings {
    pub cell_size: u32,
    pub wall_width: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            cell_size: 20,
            wall_width: 3,
        }
    }
}

impl RenderSettings {
    /// Width and height in pixels of a canvas holding the whole maze, saturating at `u32::MAX`.
    pub fn canvas_size(&self, topology: &Topology) -> (u32, u32) {
        let (columns, rows) = topology.extent();
        (
            columns.unsigned_abs().saturating_mul(self.cell_size),
            rows.unsigned_abs().saturating_mul(self.cell_size),
        )
    }
}

/// `(x, y, walls by direction code, kind code)`
pub type EncodedCell = (i32, i32, BTreeMap<u8, bool>, u8);

/// The second record of a save file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellRecord(
    pub BTreeMap<String, EncodedCell>,
    pub Option<Coord>,
    pub Option<Coord>,
    pub u32,
    pub u32,
);

fn coord_key((x, y): Coord) -> String {
    format!("({x}, {y})")
}

/// The first record of a save file.
pub fn describe(topology: &Topology) -> Value {
    match topology.radius() {
        Some(radius) => json!(["disk", radius]),
        None => {
            let (length, width) = topology.extent();
            json!(["rectangular", length, width])
        }
    }
}

/// Rebuilds a topology from its descriptor. `"circular"` is read as `"disk"`.
pub fn parse_descriptor(descriptor: &Value) -> Result<Topology> {
    let fields = descriptor
        .as_array()
        .ok_or_else(|| MazeError::corrupt("topology descriptor is not an array"))?;
    let param = |i: usize| -> Result<i32> {
        fields
            .get(i)
            .and_then(Value::as_i64)
            .and_then(|v| i32::try_from(v).ok())
            .ok_or_else(|| MazeError::corrupt(format!("topology parameter {i} is not an integer")))
    };
    let topology = match fields.first().and_then(Value::as_str) {
        Some("rectangular") if fields.len() == 3 => Topology::rectangular(param(1)?, param(2)?),
        Some("disk" | "circular") if fields.len() == 2 => Topology::disk(param(1)?),
        _ => {
            return Err(MazeError::corrupt(format!(
                "unrecognized topology descriptor {descriptor}"
            )));
        }
    };
    topology.map_err(|err| MazeError::corrupt(err.to_string()))
}

pub fn encode(maze: &Maze, settings: &RenderSettings) -> (Value, CellRecord) {
    let table: BTreeMap<String, EncodedCell> = maze
        .cells()
        .map(|cell| {
            let (x, y) = cell.coord();
            let walls: BTreeMap<u8, bool> = Direction::ALL
                .iter()
                .map(|&d| (d.index() as u8, cell.has_wall(d)))
                .collect();
            (coord_key((x, y)), (x, y, walls, cell.kind().code()))
        })
        .collect();
    (
        describe(&maze.topology()),
        CellRecord(
            table,
            maze.entrance(),
            maze.exit(),
            settings.cell_size,
            settings.wall_width,
        ),
    )
}

fn decode_walls(coord: Coord, encoded: &BTreeMap<u8, bool>) -> Result<[bool; 4]> {
    if encoded.len() != 4 {
        return Err(MazeError::corrupt(format!(
            "cell {coord:?} has {} wall flags, expected 4",
            encoded.len()
        )));
    }
    let mut walls = [true; 4];
    for (&code, &present) in encoded {
        let direction = Direction::from_index(code as usize).ok_or_else(|| {
            MazeError::corrupt(format!("cell {coord:?} has unknown wall direction {code}"))
        })?;
        walls[direction.index()] = present;
    }
    Ok(walls)
}

/// Rejects kinds that disagree with the recorded endpoints and walls open on one side only.
fn check_restored(maze: &Maze) -> Result<()> {
    for cell in maze.cells() {
        let coord = cell.coord();
        let consistent = if maze.entrance() == Some(coord) {
            cell.kind() == CellKind::Entrance
        } else if maze.exit() == Some(coord) {
            cell.kind() == CellKind::Exit
        } else {
            matches!(cell.kind(), CellKind::Regular | CellKind::OnPath)
        };
        if !consistent {
            return Err(MazeError::corrupt(format!(
                "cell {coord:?} is marked {:?} but the entrance is {:?} and the exit {:?}",
                cell.kind(),
                maze.entrance(),
                maze.exit()
            )));
        }

        for (direction, neighbor) in maze.neighbors(coord) {
            let facing = maze
                .cell(neighbor)
                .is_some_and(|other| other.has_wall(direction.opposite()));
            if cell.has_wall(direction) != facing {
                return Err(MazeError::corrupt(format!(
                    "wall between {coord:?} and {neighbor:?} is open on one side only"
                )));
            }
        }
    }
    Ok(())
}

pub fn decode(descriptor: &Value, record: &CellRecord) -> Result<(Maze, RenderSettings)> {
    let topology = parse_descriptor(descriptor)?;
    let CellRecord(table, entrance, exit, cell_size, wall_width) = record;
    let mut maze = Maze::bare(topology);

    for (key, (x, y, walls, kind)) in table {
        let coord = (*x, *y);
        if *key != coord_key(coord) {
            return Err(MazeError::corrupt(format!(
                "cell key {key} does not match its coordinate {coord:?}"
            )));
        }
        if !topology.contains(coord) {
            return Err(MazeError::mismatch(format!(
                "cell {coord:?} lies outside the {topology}"
            )));
        }
        let walls = decode_walls(coord, walls)?;
        let kind = CellKind::from_code(*kind)
            .ok_or_else(|| MazeError::corrupt(format!("cell {coord:?} has unknown kind {kind}")))?;
        maze.restore_cell(coord, walls, kind)?;
    }

    // Keys are unique and all inside the topology, so a short table means missing cells
    if table.len() != maze.len() {
        let missing = maze
            .cells()
            .map(|cell| cell.coord())
            .find(|&coord| !table.contains_key(&coord_key(coord)));
        return Err(MazeError::mismatch(format!(
            "the {topology} has {} cells but the save lists {}, first missing {missing:?}",
            maze.len(),
            table.len()
        )));
    }

    for endpoint in [entrance, exit].into_iter().flatten() {
        if !topology.contains(*endpoint) {
            return Err(MazeError::mismatch(format!(
                "endpoint {endpoint:?} lies outside the {topology}"
            )));
        }
    }
    maze.restore_endpoints(*entrance, *exit);
    check_restored(&maze)?;

    let settings = RenderSettings {
        cell_size: *cell_size,
        wall_width: *wall_width,
    };
    Ok((maze, settings))
}

/// Renders both records, one per line.
pub fn to_text(maze: &Maze, settings: &RenderSettings) -> Result<String> {
    let (descriptor, record) = encode(maze, settings);
    Ok(format!(
        "{}\n{}\n",
        serde_json::to_string(&descriptor)?,
        serde_json::to_string(&record)?
    ))
}

pub fn from_text(text: &str) -> Result<(Maze, RenderSettings)> {
    let mut lines = text.lines().filter(|line| !line.trim().is_empty());
    let descriptor_line = lines
        .next()
        .ok_or_else(|| MazeError::corrupt("missing topology record"))?;
    let record_line = lines
        .next()
        .ok_or_else(|| MazeError::corrupt("missing cell record"))?;
    if lines.next().is_some() {
        return Err(MazeError::corrupt("unexpected data after the cell record"));
    }
    let descriptor: Value = serde_json::from_str(descriptor_line)?;
    let record: CellRecord = serde_json::from_str(record_line)?;
    decode(&descriptor, &record)
}

/// A directory of named save files.
#[derive(Debug, Clone)]
pub struct MazeStore {
    dir: PathBuf,
}

impl MazeStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The file a save name maps to. Names are plain file stems.
    pub fn path_for(&self, name: &str) -> Result<PathBuf> {
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(MazeError::invalid(format!("'{name}' is not a valid save name")));
        }
        Ok(self.dir.join(format!("{name}.json")))
    }

    /// Writes the maze under `name`, replacing any previous save of that name.
    pub fn save(&self, maze: &Maze, name: &str, settings: &RenderSettings) -> Result<()> {
        let path = self.path_for(name)?;
        let text = to_text(maze, settings)?;
        fs::create_dir_all(&self.dir)?;
        fs::write(&path, text)?;
        tracing::info!("[store] saved {} to {}", maze.topology(), path.display());
        Ok(())
    }

    pub fn load(&self, name: &str) -> Result<(Maze, RenderSettings)> {
        let path = self.path_for(name)?;
        let text = fs::read_to_string(&path)?;
        let loaded = from_text(&text)?;
        tracing::info!("[store] loaded {} from {}", loaded.0.topology(), path.display());
        Ok(loaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{Generator, generate_maze};
    use crate::solvers::compute_path;

    fn same_maze(a: &Maze, b: &Maze) {
        assert_eq!(a.topology(), b.topology());
        assert_eq!(a.entrance(), b.entrance());
        assert_eq!(a.exit(), b.exit());
        assert_eq!(a.len(), b.len());
        for (x, y) in a.cells().zip(b.cells()) {
            assert_eq!(x.coord(), y.coord());
            assert_eq!(x.walls(), y.walls());
            assert_eq!(x.kind(), y.kind());
        }
    }

    fn solved(topology: Topology, seed: u64) -> Maze {
        let mut maze = Maze::new(topology);
        generate_maze(&mut maze, Generator::Dfs, Some(seed)).unwrap();
        let exit = maze.cells().last().unwrap().coord();
        maze.set_exit(exit).unwrap();
        compute_path(&mut maze).unwrap();
        maze
    }

    #[test]
    fn test_round_trip_both_topologies() {
        for topology in [
            Topology::rectangular(3, 3).unwrap(),
            Topology::disk(5).unwrap(),
        ] {
            let maze = solved(topology, 3);
            let settings = RenderSettings {
                cell_size: 10,
                wall_width: 5,
            };
            let (descriptor, record) = encode(&maze, &settings);
            let (restored, restored_settings) = decode(&descriptor, &record).unwrap();
            same_maze(&maze, &restored);
            assert_eq!(restored_settings, settings);
        }
    }

    #[test]
    fn test_text_layout() {
        let mut maze = Maze::new(Topology::rectangular(2, 1).unwrap());
        maze.open_wall((0, 0), (1, 0)).unwrap();
        maze.set_exit((1, 0)).unwrap();
        let text = to_text(&maze, &RenderSettings::default()).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some(r#"["rectangular",2,1]"#));
        assert_eq!(
            lines.next(),
            Some(
                r#"[{"(0, 0)":[0,0,{"0":true,"1":false,"2":true,"3":true},1],"(1, 0)":[1,0,{"0":true,"1":true,"2":true,"3":false},2]},[0,0],[1,0],20,3]"#
            )
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_legacy_circular_descriptor() {
        assert_eq!(
            parse_descriptor(&json!(["circular", 4])).unwrap(),
            Topology::disk(4).unwrap()
        );
    }

    #[test]
    fn test_bad_descriptors_are_corrupt() {
        for descriptor in [
            json!({"kind": "disk"}),
            json!(["hexagonal", 3]),
            json!(["disk"]),
            json!(["rectangular", 3]),
            json!(["disk", "three"]),
            json!(["disk", 0]),
        ] {
            assert!(
                matches!(
                    parse_descriptor(&descriptor),
                    Err(MazeError::CorruptFile { .. })
                ),
                "{descriptor} accepted"
            );
        }
    }

    #[test]
    fn test_cell_outside_topology_is_mismatch() {
        let maze = Maze::new(Topology::rectangular(2, 2).unwrap());
        let (_, record) = encode(&maze, &RenderSettings::default());
        let err = decode(&json!(["rectangular", 2, 1]), &record).unwrap_err();
        assert!(matches!(err, MazeError::TopologyMismatch { .. }));
    }

    #[test]
    fn test_missing_cell_is_mismatch() {
        let maze = Maze::new(Topology::rectangular(2, 2).unwrap());
        let (descriptor, mut record) = encode(&maze, &RenderSettings::default());
        record.0.remove("(1, 1)");
        let err = decode(&descriptor, &record).unwrap_err();
        assert!(matches!(err, MazeError::TopologyMismatch { .. }));
    }

    #[test]
    fn test_malformed_cells_are_corrupt() {
        let maze = Maze::new(Topology::rectangular(2, 2).unwrap());
        let (descriptor, record) = encode(&maze, &RenderSettings::default());

        let mut bad_kind = record.clone();
        bad_kind.0.get_mut("(0, 1)").unwrap().3 = 7;
        assert!(matches!(
            decode(&descriptor, &bad_kind),
            Err(MazeError::CorruptFile { .. })
        ));

        let mut bad_walls = record.clone();
        bad_walls.0.get_mut("(0, 1)").unwrap().2.remove(&2);
        assert!(matches!(
            decode(&descriptor, &bad_walls),
            Err(MazeError::CorruptFile { .. })
        ));

        let mut bad_key = record;
        let cell = bad_key.0.remove("(0, 1)").unwrap();
        bad_key.0.insert("(9, 9)".to_string(), cell);
        assert!(matches!(
            decode(&descriptor, &bad_key),
            Err(MazeError::CorruptFile { .. })
        ));
    }

    #[test]
    fn test_from_text_rejects_garbage() {
        for text in ["", "[\"disk\", 2]\n", "not json\n[]\n", "[\"disk\",1]\n{}\n"] {
            assert!(matches!(
                from_text(text),
                Err(MazeError::CorruptFile { .. })
            ));
        }
    }

    #[test]
    fn test_null_endpoints_round_trip() {
        let maze = Maze::bare(Topology::disk(2).unwrap());
        let text = to_text(&maze, &RenderSettings::default()).unwrap();
        let (restored, _) = from_text(&text).unwrap();
        assert_eq!(restored.entrance(), None);
        assert_eq!(restored.exit(), None);
    }

    #[test]
    fn test_store_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = MazeStore::new(dir.path().join("saves"));
        let maze = solved(Topology::rectangular(3, 3).unwrap(), 9);

        store.save(&maze, "first", &RenderSettings::default()).unwrap();
        // Saving again replaces the file rather than appending to it
        store.save(&maze, "first", &RenderSettings::default()).unwrap();
        let (loaded, settings) = store.load("first").unwrap();
        same_maze(&maze, &loaded);
        assert_eq!(settings, RenderSettings::default());
    }

    #[test]
    fn test_store_errors() {
        let dir = tempfile::tempdir().unwrap();
        let store = MazeStore::new(dir.path());
        assert!(matches!(store.load("absent"), Err(MazeError::Io(_))));
        assert!(matches!(
            store.path_for("../escape"),
            Err(MazeError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_canvas_size() {
        let settings = RenderSettings::default();
        assert_eq!(
            settings.canvas_size(&Topology::rectangular(30, 10).unwrap()),
            (600, 200)
        );
        assert_eq!(settings.canvas_size(&Topology::disk(15).unwrap()), (580, 580));

        let huge = RenderSettings {
            cell_size: u32::MAX - 1,
            wall_width: 3,
        };
        assert_eq!(
            huge.canvas_size(&Topology::rectangular(3, 1).unwrap()),
            (u32::MAX, u32::MAX - 1)
        );
    }

    #[test]
    fn test_oversized_disk_radius_is_corrupt() {
        assert!(matches!(
            from_text("[\"disk\",1500000000]\n[{},null,null,20,3]\n"),
            Err(MazeError::CorruptFile { .. })
        ));
        assert!(matches!(
            parse_descriptor(&json!(["disk", i32::MAX])),
            Err(MazeError::CorruptFile { .. })
        ));
    }

    #[test]
    fn test_duplicated_endpoint_kinds_are_corrupt() {
        let mut maze = Maze::new(Topology::rectangular(2, 1).unwrap());
        maze.open_wall((0, 0), (1, 0)).unwrap();
        let (descriptor, record) = encode(&maze, &RenderSettings::default());

        let mut two_entrances = record.clone();
        two_entrances.0.get_mut("(1, 0)").unwrap().3 = CellKind::Entrance.code();
        assert!(matches!(
            decode(&descriptor, &two_entrances),
            Err(MazeError::CorruptFile { .. })
        ));

        // An exit kind with no recorded exit
        let mut stray_exit = record.clone();
        stray_exit.0.get_mut("(1, 0)").unwrap().3 = CellKind::Exit.code();
        assert!(matches!(
            decode(&descriptor, &stray_exit),
            Err(MazeError::CorruptFile { .. })
        ));

        // The recorded entrance cell demoted to regular
        let mut demoted = record.clone();
        demoted.0.get_mut("(0, 0)").unwrap().3 = CellKind::Regular.code();
        assert!(matches!(
            decode(&descriptor, &demoted),
            Err(MazeError::CorruptFile { .. })
        ));

        let mut exit_set = record;
        exit_set.2 = Some((1, 0));
        exit_set.0.get_mut("(1, 0)").unwrap().3 = CellKind::Exit.code();
        assert!(decode(&descriptor, &exit_set).is_ok());
    }

    #[test]
    fn test_one_sided_wall_is_corrupt() {
        let mut maze = Maze::new(Topology::rectangular(2, 1).unwrap());
        maze.open_wall((0, 0), (1, 0)).unwrap();
        let (descriptor, mut record) = encode(&maze, &RenderSettings::default());
        record
            .0
            .get_mut("(1, 0)")
            .unwrap()
            .2
            .insert(Direction::Left.index() as u8, true);
        assert!(matches!(
            decode(&descriptor, &record),
            Err(MazeError::CorruptFile { .. })
        ));
    }
}
