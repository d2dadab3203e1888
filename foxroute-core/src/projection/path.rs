use geo::{Coord, LineString};
use geojson::{Feature, Geometry};
use serde_json::json;

use super::CoordinateProjector;
use crate::Error;
use crate::model::{DisplayPoint, PathResult};

/// Display-space polyline of `path`, in the exact order the route was
/// traversed: the first point is the start node, the last the end node.
pub fn project_path(path: &PathResult, projector: &CoordinateProjector) -> Vec<DisplayPoint> {
    path.nodes()
        .iter()
        .map(|id| projector.to_display_space(id.point()))
        .collect()
}

/// Converts the route to a `GeoJSON` `Feature` with a `LineString` geometry
/// in `[lng, lat]` order.
///
/// A route that starts and ends on the same node repeats that node so the
/// line stays valid.
pub fn path_to_geojson(path: &PathResult, projector: &CoordinateProjector) -> Result<Feature, Error> {
    let mut coordinates: Vec<Coord<f64>> = project_path(path, projector)
        .into_iter()
        .map(|point| point.geometry().into())
        .collect();
    if coordinates.len() == 1 {
        coordinates.push(coordinates[0]);
    }
    let line = LineString::from(coordinates);

    let value = json!({
        "type": "Feature",
        "geometry": Geometry::new((&line).into()),
        "properties": {
            "start": path.start().to_string(),
            "end": path.end().to_string(),
            "total_weight": path.total_weight(),
            "node_count": path.nodes().len(),
        }
    });

    serde_json::from_value::<Feature>(value).map_err(|e| Error::GeoJsonError(e.to_string()))
}
