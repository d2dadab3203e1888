//! Snapping arbitrary points onto the road graph.
//!
//! A linear scan over every node: the road network has hundreds of nodes,
//! not millions, so a spatial index would not pay for itself.

use ordered_float::OrderedFloat;

use crate::model::{NodeId, VectorPoint};
use crate::{Distance, Error};

/// Road node closest to a queried point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapped {
    pub id: NodeId,
    pub point: VectorPoint,
    /// Straight-line distance from the queried point
    pub distance: Distance,
}

/// Returns the candidate closest to `point`.
///
/// Equidistant candidates are decided by the lowest [`NodeId`].
///
/// # Errors
///
/// [`Error::EmptyCandidateSet`] if `candidates` is empty.
pub fn nearest(point: VectorPoint, candidates: &[VectorPoint]) -> Result<VectorPoint, Error> {
    candidates
        .iter()
        .min_by_key(|candidate| {
            (
                OrderedFloat(point.distance(candidate)),
                NodeId::try_from_point(**candidate),
            )
        })
        .copied()
        .ok_or(Error::EmptyCandidateSet)
}

/// Returns the node closest to `point` among `nodes`.
///
/// Same tie-break as [`nearest`].
///
/// # Errors
///
/// [`Error::EmptyCandidateSet`] if `nodes` is empty.
pub fn nearest_node(point: VectorPoint, nodes: &[(NodeId, VectorPoint)]) -> Result<Snapped, Error> {
    nodes
        .iter()
        .map(|&(id, node_point)| Snapped {
            id,
            point: node_point,
            distance: point.distance(&node_point),
        })
        .min_by_key(|snapped| (OrderedFloat(snapped.distance), snapped.id))
        .ok_or(Error::EmptyCandidateSet)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates() -> Vec<VectorPoint> {
        vec![
            VectorPoint::new(0.0, 0.0),
            VectorPoint::new(10.0, 0.0),
            VectorPoint::new(5.0, 5.0),
        ]
    }

    #[test]
    fn picks_closest_candidate() {
        let found = nearest(VectorPoint::new(1.0, 1.0), &candidates()).unwrap();
        assert_eq!(found, VectorPoint::new(0.0, 0.0));

        let found = nearest(VectorPoint::new(9.0, 1.0), &candidates()).unwrap();
        assert_eq!(found, VectorPoint::new(10.0, 0.0));
    }

    #[test]
    fn exact_match_wins() {
        let found = nearest(VectorPoint::new(5.0, 5.0), &candidates()).unwrap();
        assert_eq!(found, VectorPoint::new(5.0, 5.0));
    }

    #[test]
    fn ties_go_to_lowest_node_id() {
        // (0,0) and (5,5) are both sqrt(17) away
        let found = nearest(VectorPoint::new(4.0, 1.0), &candidates()).unwrap();
        assert_eq!(found, VectorPoint::new(0.0, 0.0));

        let mut reversed = candidates();
        reversed.reverse();
        let found = nearest(VectorPoint::new(4.0, 1.0), &reversed).unwrap();
        assert_eq!(found, VectorPoint::new(0.0, 0.0));
    }

    #[test]
    fn empty_candidates_fail() {
        assert!(matches!(
            nearest(VectorPoint::new(1.0, 1.0), &[]),
            Err(Error::EmptyCandidateSet)
        ));
        assert!(matches!(
            nearest_node(VectorPoint::new(1.0, 1.0), &[]),
            Err(Error::EmptyCandidateSet)
        ));
    }

    #[test]
    fn snapped_node_reports_distance() {
        let nodes: Vec<_> = candidates()
            .into_iter()
            .map(|p| (NodeId::try_from_point(p).unwrap(), p))
            .collect();
        let snapped = nearest_node(VectorPoint::new(10.0, 3.0), &nodes).unwrap();

        assert_eq!(snapped.point, VectorPoint::new(10.0, 0.0));
        assert!((snapped.distance - 3.0).abs() < 1e-12);
    }
}
