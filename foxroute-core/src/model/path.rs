use crate::Distance;
use crate::model::NodeId;

/// One traversed road segment, oriented in travel direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathEdge {
    pub from: NodeId,
    pub to: NodeId,
    pub weight: Distance,
}

/// Shortest route between two nodes, ordered from start to end
#[derive(Debug, Clone, PartialEq)]
pub struct PathResult {
    nodes: Vec<NodeId>,
    edges: Vec<PathEdge>,
    total_weight: Distance,
}

impl PathResult {
    /// Route that starts and ends at the same node
    pub fn single(node: NodeId) -> Self {
        Self {
            nodes: vec![node],
            edges: Vec::new(),
            total_weight: 0.0,
        }
    }

    /// Builds a route from consecutive edges leaving `start`.
    /// Each edge must begin where the previous one ended.
    pub(crate) fn from_edges(start: NodeId, edges: Vec<PathEdge>) -> Self {
        let mut nodes = Vec::with_capacity(edges.len() + 1);
        nodes.push(start);
        nodes.extend(edges.iter().map(|edge| edge.to));
        debug_assert!(
            edges
                .iter()
                .zip(&nodes)
                .all(|(edge, &node)| edge.from == node)
        );

        let total_weight = edges.iter().map(|edge| edge.weight).sum();

        Self {
            nodes,
            edges,
            total_weight,
        }
    }

    pub fn start(&self) -> NodeId {
        self.nodes[0]
    }

    pub fn end(&self) -> NodeId {
        self.nodes[self.nodes.len() - 1]
    }

    /// Node ids in traversal order, start first
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn edges(&self) -> &[PathEdge] {
        &self.edges
    }

    pub fn total_weight(&self) -> Distance {
        self.total_weight
    }
}
