use thiserror::Error;

use crate::loading::IngestionError;
use crate::model::NodeId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Ingestion failed: {0}")]
    Ingestion(#[from] IngestionError),
    #[error("Node {0} does not exist in the road graph")]
    NodeNotFound(NodeId),
    #[error("No road connects {start} and {end}")]
    NoPathFound { start: NodeId, end: NodeId },
    #[error("No candidate nodes to snap to")]
    EmptyCandidateSet,
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("GeoJSON error: {0}")]
    GeoJsonError(String),
}
