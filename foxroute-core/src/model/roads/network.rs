use hashbrown::HashMap;
use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

use super::components::{RoadEdge, RoadNode};
use crate::Distance;
use crate::model::{NodeId, VectorPoint};

/// Undirected road graph with node lookup by coordinates
#[derive(Debug, Clone, Default)]
pub struct RoadGraph {
    pub(crate) graph: UnGraph<RoadNode, RoadEdge>,
    node_lookup: HashMap<NodeId, NodeIndex>,
}

impl RoadGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the node at `point`.
    ///
    /// Coincident points resolve to the node registered first. Returns `None`
    /// when the coordinates cannot form a [`NodeId`].
    pub fn add_node(&mut self, point: VectorPoint) -> Option<NodeIndex> {
        NodeId::try_from_point(point).map(|id| self.add_node_with_id(id))
    }

    pub fn add_node_with_id(&mut self, id: NodeId) -> NodeIndex {
        let graph = &mut self.graph;
        *self.node_lookup.entry(id).or_insert_with(|| {
            graph.add_node(RoadNode {
                id,
                geometry: id.point(),
            })
        })
    }

    /// Connects `a` and `b`, replacing the weight of an existing edge between
    /// them. Self-loops are not stored.
    pub fn add_edge(&mut self, a: NodeIndex, b: NodeIndex, weight: Distance) -> Option<EdgeIndex> {
        if a == b {
            return None;
        }
        Some(self.graph.update_edge(a, b, RoadEdge { weight }))
    }

    pub fn node_index(&self, id: &NodeId) -> Option<NodeIndex> {
        self.node_lookup.get(id).copied()
    }

    pub fn node(&self, index: NodeIndex) -> Option<&RoadNode> {
        self.graph.node_weight(index)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &RoadNode> {
        self.graph.node_weights()
    }

    /// Edges incident to `node` as `(neighbour, weight)` pairs
    pub(crate) fn incident(
        &self,
        node: NodeIndex,
    ) -> impl Iterator<Item = (NodeIndex, Distance)> + '_ {
        self.graph.edges(node).map(move |edge| {
            let other = if edge.source() == node {
                edge.target()
            } else {
                edge.source()
            };
            (other, edge.weight().weight)
        })
    }

    /// Neighbours of `id` with the weight of the connecting edge
    pub fn neighbors(&self, id: &NodeId) -> Vec<(NodeId, Distance)> {
        let Some(index) = self.node_index(id) else {
            return Vec::new();
        };

        self.incident(index)
            .filter_map(|(other, weight)| self.node(other).map(|node| (node.id, weight)))
            .collect()
    }
}

/// Loaded road graph together with the flat node list used for snapping
#[derive(Debug, Clone)]
pub struct RoadNetwork {
    graph: RoadGraph,
    nodes: Vec<(NodeId, VectorPoint)>,
}

impl RoadNetwork {
    pub fn new(graph: RoadGraph) -> Self {
        let mut nodes: Vec<_> = graph.nodes().map(|node| (node.id, node.geometry)).collect();
        nodes.sort_unstable_by_key(|(id, _)| *id);

        Self { graph, nodes }
    }

    pub fn graph(&self) -> &RoadGraph {
        &self.graph
    }

    /// Every node of the graph, ordered by id
    pub fn nodes(&self) -> &[(NodeId, VectorPoint)] {
        &self.nodes
    }
}
