use thiserror::Error;

/// Failures while turning road artwork into a graph. All of them abort
/// compilation before anything is written.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IngestionError {
    #[error("Malformed path data at byte {position}: {reason}")]
    Malformed { position: usize, reason: String },
    #[error(
        "Unsupported curve command '{command}' at byte {position}: only cubic Bézier segments can be compiled"
    )]
    UnsupportedCurve { command: char, position: usize },
    #[error("Invalid SVG document at {row}:{col}: {reason}")]
    InvalidSvg { row: u32, col: u32, reason: String },
    #[error("Document contains no <path> element with path data")]
    NoPathElement,
    #[error("Path data contains no road points")]
    NoRoadPoints,
    #[error("Coordinate ({x}, {y}) cannot identify a road node")]
    InvalidCoordinate { x: f64, y: f64 },
}
