use std::path::PathBuf;

/// Inputs of one offline compilation
#[derive(Debug, Clone)]
pub struct CompileConfig {
    /// SVG document with the road line art
    pub source: PathBuf,
    /// Where the adjacency document is written
    pub output: PathBuf,
    /// Treat `source` as bare path data instead of an SVG document
    pub raw_path_data: bool,
}
