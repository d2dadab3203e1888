//! This module is responsible for compiling road line art into a routing
//! graph and for persisting and loading that graph.

mod builder;
mod config;
mod error;
mod persist;
pub mod svg;

pub use builder::{build_graph, compile_document, compile_file, compile_path_data};
pub use config::CompileConfig;
pub use error::IngestionError;
pub use persist::{read_adjacency, write_adjacency};
