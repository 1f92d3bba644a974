use crate::maze::Coord;

/// Every way a maze operation can fail.
///
/// All variants are recoverable; the library never aborts the process.
#[derive(Debug, thiserror::Error)]
pub enum MazeError {
    /// Construction arguments that cannot describe a maze.
    #[error("invalid parameter: {reason}")]
    InvalidParameter { reason: String },
    /// A coordinate that is not part of the maze's topology.
    #[error("cell {coord:?} is not part of the maze")]
    UnknownCell { coord: Coord },
    /// A wall operation between cells that do not share a wall.
    #[error("cells {from:?} and {to:?} are not adjacent")]
    NotAdjacent { from: Coord, to: Coord },
    #[error("the maze has no entrance")]
    EntranceUnset,
    #[error("the maze has no exit")]
    ExitUnset,
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// A save file whose records cannot be parsed.
    #[error("corrupt save file: {reason}")]
    CorruptFile { reason: String },
    /// A save file whose cells do not match the topology it declares.
    #[error("topology mismatch: {reason}")]
    TopologyMismatch { reason: String },
}

impl MazeError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        MazeError::InvalidParameter {
            reason: reason.into(),
        }
    }

    pub(crate) fn corrupt(reason: impl Into<String>) -> Self {
        MazeError::CorruptFile {
            reason: reason.into(),
        }
    }

    pub(crate) fn mismatch(reason: impl Into<String>) -> Self {
        MazeError::TopologyMismatch {
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for MazeError {
    fn from(err: serde_json::Error) -> Self {
        MazeError::corrupt(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MazeError>;
