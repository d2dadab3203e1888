//! Shared, lazily loaded road network.
//!
//! A [`GraphStore`] is created by the application and handed to every
//! caller that needs route queries. The adjacency document is read on the
//! first query; every later query reuses the loaded [`RoadNetwork`].

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock, PoisonError};

use log::{debug, info, trace};

use crate::Error;
use crate::loading::read_adjacency;
use crate::model::{DisplayPoint, NodeId, PathResult, RoadNetwork, VectorPoint};
use crate::projection::{CoordinateProjector, project_path};
use crate::routing::{Snapped, nearest_node, shortest_path};

#[derive(Debug)]
pub struct GraphStore {
    source: Option<PathBuf>,
    network: OnceLock<RoadNetwork>,
    // serialises first-time loads so only one caller reads the file
    init_lock: Mutex<()>,
}

impl GraphStore {
    /// Store that loads the adjacency document at `path` on first use
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            source: Some(path.into()),
            network: OnceLock::new(),
            init_lock: Mutex::new(()),
        }
    }

    /// Store around an already built network
    pub fn from_network(network: RoadNetwork) -> Self {
        Self {
            source: None,
            network: OnceLock::from(network),
            init_lock: Mutex::new(()),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.network.get().is_some()
    }

    /// The road network, loading it on the first call.
    ///
    /// Concurrent first calls perform a single load and all receive the same
    /// network. A failed load is reported to its caller and retried by the
    /// next one.
    ///
    /// # Errors
    ///
    /// Returns the error of the adjacency load.
    pub fn network(&self) -> Result<&RoadNetwork, Error> {
        if let Some(network) = self.network.get() {
            return Ok(network);
        }

        let _guard = self.init_lock.lock().unwrap_or_else(PoisonError::into_inner);
        // another caller may have finished loading while we waited
        if let Some(network) = self.network.get() {
            return Ok(network);
        }

        let path = self
            .source
            .as_deref()
            .ok_or_else(|| Error::InvalidData("Graph store has no source".to_string()))?;
        info!("Loading road network from {}", path.display());
        let network = RoadNetwork::new(read_adjacency(path)?);
        info!(
            "Road network ready: {} nodes, {} edges",
            network.graph().node_count(),
            network.graph().edge_count()
        );

        Ok(self.network.get_or_init(|| network))
    }

    /// Snaps `point` to the closest road node
    ///
    /// # Errors
    ///
    /// Load errors, or [`Error::EmptyCandidateSet`] for a network without
    /// nodes.
    pub fn find_nearest_node(&self, point: VectorPoint) -> Result<Snapped, Error> {
        let network = self.network()?;
        let snapped = nearest_node(point, network.nodes())?;
        trace!(
            "Snapped {point} to {} ({:.3} away)",
            snapped.id, snapped.distance
        );
        Ok(snapped)
    }

    /// Shortest route between two road nodes
    ///
    /// # Errors
    ///
    /// Load errors, [`Error::NodeNotFound`] or [`Error::NoPathFound`].
    pub fn compute_path(&self, start: NodeId, end: NodeId) -> Result<PathResult, Error> {
        shortest_path(self.network()?.graph(), start, end)
    }

    /// Display-space polyline of `path`, start first
    pub fn project_for_display(
        &self,
        path: &PathResult,
        projector: &CoordinateProjector,
    ) -> Vec<DisplayPoint> {
        project_path(path, projector)
    }

    /// Routes between two clicks in display space: both are snapped to
    /// their nearest road node and the route between those is returned.
    ///
    /// # Errors
    ///
    /// Same as [`Self::find_nearest_node`] and [`Self::compute_path`].
    pub fn route_between_display(
        &self,
        from: DisplayPoint,
        to: DisplayPoint,
        projector: &CoordinateProjector,
    ) -> Result<PathResult, Error> {
        let start = self.find_nearest_node(projector.to_vector_space(from))?;
        let end = self.find_nearest_node(projector.to_vector_space(to))?;
        debug!("Routing click {from} -> {to} as {} -> {}", start.id, end.id);

        self.compute_path(start.id, end.id)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;
    use crate::loading::{compile_path_data, write_adjacency};
    use crate::projection::FOXHOLE_PROJECTION;

    fn id(x: f64, y: f64) -> NodeId {
        NodeId::try_from_point(VectorPoint::new(x, y)).unwrap()
    }

    fn roads() -> RoadNetwork {
        RoadNetwork::new(compile_path_data("M0 0L100 0L100 100M200 200L300 200").unwrap())
    }

    #[test]
    fn loads_once_and_reuses_network() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("adjacency.json");
        write_adjacency(roads().graph(), &path).unwrap();

        let store = GraphStore::open(&path);
        assert!(!store.is_loaded());

        let first = store.network().unwrap() as *const RoadNetwork;
        // the file is no longer needed once loaded
        std::fs::remove_file(&path).unwrap();
        let second = store.network().unwrap() as *const RoadNetwork;

        assert!(store.is_loaded());
        assert_eq!(first, second);
    }

    #[test]
    fn concurrent_first_queries_share_one_network() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("adjacency.json");
        write_adjacency(roads().graph(), &path).unwrap();

        let store = Arc::new(GraphStore::open(&path));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || store.network().unwrap() as *const RoadNetwork as usize)
            })
            .collect();

        let addresses: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(addresses.windows(2).all(|pair| pair[0] == pair[1]));
        assert_eq!(store.network().unwrap().nodes().len(), 5);
    }

    #[test]
    fn failed_load_is_reported_and_retried() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("adjacency.json");
        let store = GraphStore::open(&path);

        assert!(matches!(store.network(), Err(Error::IoError(_))));
        assert!(!store.is_loaded());

        write_adjacency(roads().graph(), &path).unwrap();
        assert!(store.network().is_ok());
    }

    #[test]
    fn query_api_snaps_routes_and_projects() {
        let store = GraphStore::from_network(roads());

        let start = store.find_nearest_node(VectorPoint::new(3.0, -2.0)).unwrap();
        let end = store.find_nearest_node(VectorPoint::new(98.0, 97.0)).unwrap();
        assert_eq!(start.id, id(0.0, 0.0));
        assert_eq!(end.id, id(100.0, 100.0));

        let path = store.compute_path(start.id, end.id).unwrap();
        assert_eq!(path.nodes(), &[id(0.0, 0.0), id(100.0, 0.0), id(100.0, 100.0)]);
        assert!((path.total_weight() - 200.0).abs() < 1e-9);

        let line = store.project_for_display(&path, &FOXHOLE_PROJECTION);
        assert_eq!(line.len(), 3);
        assert_eq!(line[0], FOXHOLE_PROJECTION.to_display_space(VectorPoint::new(0.0, 0.0)));
    }

    #[test]
    fn display_clicks_in_separate_components_have_no_route() {
        let store = GraphStore::from_network(roads());
        let from = FOXHOLE_PROJECTION.to_display_space(VectorPoint::new(1.0, 1.0));
        let to = FOXHOLE_PROJECTION.to_display_space(VectorPoint::new(299.0, 201.0));

        assert!(matches!(
            store.route_between_display(from, to, &FOXHOLE_PROJECTION),
            Err(Error::NoPathFound { .. })
        ));
    }

    #[test]
    fn empty_network_has_nothing_to_snap_to() {
        let store = GraphStore::from_network(RoadNetwork::new(crate::model::RoadGraph::new()));
        assert!(matches!(
            store.find_nearest_node(VectorPoint::new(0.0, 0.0)),
            Err(Error::EmptyCandidateSet)
        ));
    }
}
