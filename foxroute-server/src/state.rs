use std::sync::Arc;

use foxroute_core::{CoordinateProjector, FOXHOLE_PROJECTION, GraphStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<GraphStore>,
    pub projector: CoordinateProjector,
}

impl AppState {
    pub fn new(store: Arc<GraphStore>) -> Self {
        Self {
            store,
            projector: FOXHOLE_PROJECTION,
        }
    }
}
