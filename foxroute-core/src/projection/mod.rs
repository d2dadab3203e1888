//! Conversion between vector space and the viewer's display space

mod path;
mod projector;

pub use path::{path_to_geojson, project_path};
pub use projector::{CoordinateProjector, FOXHOLE_PROJECTION};
