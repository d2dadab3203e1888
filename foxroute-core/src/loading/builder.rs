use itertools::Itertools;
use log::{info, warn};

use super::IngestionError;
use super::config::CompileConfig;
use super::persist::write_adjacency;
use super::svg::{self, PathCommand, PathPoint};
use crate::{Error, model::RoadGraph};

/// Compiles the road artwork named in `config` and writes the adjacency
/// document.
///
/// # Errors
///
/// Returns an error if the source cannot be read or compiled, or the output
/// cannot be written. Nothing is written unless compilation succeeded.
pub fn compile_file(config: &CompileConfig) -> Result<RoadGraph, Error> {
    validate_config(config)?;

    info!("Reading road artwork: {}", config.source.display());
    let source = std::fs::read_to_string(&config.source).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("Failed to read '{}': {}", config.source.display(), e),
        )
    })?;

    let graph = if config.raw_path_data {
        compile_path_data(&source)?
    } else {
        compile_document(&source)?
    };

    write_adjacency(&graph, &config.output)?;
    info!(
        "Wrote adjacency for {} nodes to {}",
        graph.node_count(),
        config.output.display()
    );

    Ok(graph)
}

/// Builds the road graph from every `<path>` of an SVG document
///
/// # Errors
///
/// Returns [`Error::Ingestion`] for documents without path data, malformed
/// path data or unsupported curve commands.
pub fn compile_document(document: &str) -> Result<RoadGraph, Error> {
    let mut commands = Vec::new();
    for data in svg::extract_path_data(document)? {
        commands.extend(svg::parse_path_data(&data)?);
    }
    compile_commands(&commands)
}

/// Builds the road graph from bare path data (the content of a `d` attribute)
///
/// # Errors
///
/// Same as [`compile_document`].
pub fn compile_path_data(data: &str) -> Result<RoadGraph, Error> {
    compile_commands(&svg::parse_path_data(data)?)
}

fn compile_commands(commands: &[PathCommand]) -> Result<RoadGraph, Error> {
    info!("Parsed {} path commands", commands.len());
    let points = svg::to_path_points(commands);
    if points.is_empty() {
        return Err(IngestionError::NoRoadPoints.into());
    }
    info!("Building road graph from {} path points", points.len());

    let graph = build_graph(&points)?;
    info!(
        "Road graph has {} nodes and {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}

/// Turns ordered path points into an undirected road graph.
///
/// Every point becomes a node (coincident points share one). Each point
/// that does not start a subpath is joined to the point before it by an
/// edge weighted with their straight-line distance. Curved segments are
/// joined the same way: the curve's control points do not affect the graph.
///
/// # Errors
///
/// [`IngestionError::InvalidCoordinate`] for a point that cannot identify a
/// node.
pub fn build_graph(points: &[PathPoint]) -> Result<RoadGraph, IngestionError> {
    let mut graph = RoadGraph::new();

    let nodes = points
        .iter()
        .map(|path_point| {
            let point = path_point.point;
            graph
                .add_node(point)
                .ok_or(IngestionError::InvalidCoordinate {
                    x: point.x(),
                    y: point.y(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    for ((&previous, _), (&current, path_point)) in nodes.iter().zip(points).tuple_windows() {
        if path_point.move_to {
            continue;
        }
        if previous == current {
            warn!(
                "Skipping zero-length segment at {}",
                path_point.point
            );
            continue;
        }

        let (Some(from), Some(to)) = (graph.node(previous), graph.node(current)) else {
            continue;
        };
        let weight = from.geometry.distance(&to.geometry);
        graph.add_edge(previous, current, weight);
    }

    Ok(graph)
}

fn validate_config(config: &CompileConfig) -> Result<(), Error> {
    if !config.source.exists() {
        return Err(Error::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Road artwork not found: {}", config.source.display()),
        )));
    }

    if let Some(parent) = config.output.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            return Err(Error::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Output directory not found: {}", parent.display()),
            )));
        }
    }

    Ok(())
}
