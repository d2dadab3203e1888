use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::Error;
use crate::model::{AdjacencyDocument, RoadGraph};

/// Writes `graph` as an adjacency document at `path`.
///
/// The document goes to a temporary file next to `path` first and is renamed
/// into place once complete, so readers never see a partial file.
///
/// # Errors
///
/// Returns an error if the file cannot be written or renamed.
pub fn write_adjacency(graph: &RoadGraph, path: &Path) -> Result<(), Error> {
    let document = AdjacencyDocument::from(graph);
    let staging = staging_path(path);

    let placed = write_document(&document, &staging)
        .and_then(|()| fs::rename(&staging, path).map_err(Error::from));
    if let Err(e) = placed {
        let _ = fs::remove_file(&staging);
        return Err(e);
    }
    debug!("Moved {} into place", staging.display());
    Ok(())
}

fn write_document(document: &AdjacencyDocument, path: &Path) -> Result<(), Error> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, document)
        .map_err(|e| Error::InvalidData(format!("Failed to serialise adjacency: {e}")))?;
    writer.flush()?;
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map_or_else(|| "adjacency".into(), |name| name.to_string_lossy());
    path.with_file_name(format!(".{name}.tmp"))
}

/// Loads the road graph from an adjacency document.
///
/// # Errors
///
/// Returns [`Error::IoError`] if the file cannot be opened and
/// [`Error::InvalidData`] if it is not a valid adjacency document.
pub fn read_adjacency(path: &Path) -> Result<RoadGraph, Error> {
    let file = File::open(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("Failed to open adjacency file '{}': {}", path.display(), e),
        )
    })?;

    let document: AdjacencyDocument = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| Error::InvalidData(format!("{}: {e}", path.display())))?;
    info!(
        "Loaded adjacency for {} nodes from {}",
        document.len(),
        path.display()
    );

    RoadGraph::try_from(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loading::compile_path_data;

    #[test]
    fn written_graph_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("adjacency.json");
        let graph = compile_path_data("M0 0L3 4L3 10M20 20L25 20").unwrap();

        write_adjacency(&graph, &path).unwrap();
        let loaded = read_adjacency(&path).unwrap();

        assert_eq!(loaded.node_count(), 5);
        assert_eq!(loaded.edge_count(), 3);
        assert_eq!(AdjacencyDocument::from(&loaded), AdjacencyDocument::from(&graph));
        assert!(!staging_path(&path).exists());
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_adjacency(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(Error::IoError(_))));
    }

    #[test]
    fn garbage_is_invalid_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("adjacency.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(read_adjacency(&path), Err(Error::InvalidData(_))));
    }

    #[test]
    fn failed_write_leaves_nothing_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("adjacency.json");
        let graph = compile_path_data("M0 0L1 0").unwrap();

        assert!(write_adjacency(&graph, &path).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn failed_rename_removes_staging_file() {
        let dir = tempfile::tempdir().unwrap();
        // a directory in the way makes the final rename fail
        let path = dir.path().join("adjacency.json");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "occupied").unwrap();
        let graph = compile_path_data("M0 0L1 0").unwrap();

        assert!(matches!(write_adjacency(&graph, &path), Err(Error::IoError(_))));
        assert!(!staging_path(&path).exists());
        assert!(path.join("keep").exists());
    }
}
