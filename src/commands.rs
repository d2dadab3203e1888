use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use foxroute_core::projection::path_to_geojson;
use foxroute_core::{CompileConfig, DisplayPoint, FOXHOLE_PROJECTION, GraphStore, compile_file};

pub fn compile(
    source: PathBuf,
    output: PathBuf,
    raw_path_data: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let config = CompileConfig {
        source,
        output,
        raw_path_data,
    };
    let graph = compile_file(&config)
        .with_context(|| format!("failed to compile {}", config.source.display()))?;

    writeln!(
        out,
        "{}: {} nodes, {} edges",
        config.output.display(),
        graph.node_count(),
        graph.edge_count()
    )?;
    Ok(())
}

pub fn nearest(graph: &Path, at: DisplayPoint, out: &mut impl Write) -> anyhow::Result<()> {
    let store = GraphStore::open(graph);
    let snapped = store.find_nearest_node(FOXHOLE_PROJECTION.to_vector_space(at))?;
    let display = FOXHOLE_PROJECTION.to_display_space(snapped.point);
    tracing::debug!(node = %snapped.id, distance = snapped.distance, "snapped {at}");

    let body = serde_json::json!({
        "id": snapped.id.to_string(),
        "point": [snapped.point.x(), snapped.point.y()],
        "display": { "lat": display.lat(), "lng": display.lng() },
        "distance": snapped.distance,
    });
    writeln!(out, "{}", serde_json::to_string_pretty(&body)?)?;
    Ok(())
}

pub fn route(
    graph: &Path,
    from: DisplayPoint,
    to: DisplayPoint,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let store = GraphStore::open(graph);
    let path = store.route_between_display(from, to, &FOXHOLE_PROJECTION)?;
    tracing::info!(
        start = %path.start(),
        end = %path.end(),
        weight = path.total_weight(),
        "route found"
    );

    let feature = path_to_geojson(&path, &FOXHOLE_PROJECTION)?;
    writeln!(out, "{}", serde_json::to_string_pretty(&feature)?)?;
    Ok(())
}
