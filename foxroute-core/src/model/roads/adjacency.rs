//! Persisted form of the road graph.
//!
//! A JSON object keyed by node id text, each value listing the node's
//! neighbours and edge weights:
//!
//! ```json
//! { "[0,0]": [{ "id": "[3,4]", "weight": 5 }], "[3,4]": [{ "id": "[0,0]", "weight": 5 }] }
//! ```
//!
//! This is the contract between the offline compiler and the runtime loader.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::network::RoadGraph;
use crate::model::NodeId;
use crate::{Distance, Error};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    pub id: NodeId,
    pub weight: Distance,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdjacencyDocument(BTreeMap<NodeId, Vec<Neighbor>>);

impl AdjacencyDocument {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn neighbors(&self, id: &NodeId) -> Option<&[Neighbor]> {
        self.0.get(id).map(Vec::as_slice)
    }

}

impl From<&RoadGraph> for AdjacencyDocument {
    fn from(graph: &RoadGraph) -> Self {
        let entries = graph
            .nodes()
            .map(|node| {
                let mut neighbors: Vec<Neighbor> = graph
                    .neighbors(&node.id)
                    .into_iter()
                    .map(|(id, weight)| Neighbor { id, weight })
                    .collect();
                neighbors.sort_unstable_by_key(|neighbor| neighbor.id);
                (node.id, neighbors)
            })
            .collect();

        Self(entries)
    }
}

impl TryFrom<AdjacencyDocument> for RoadGraph {
    type Error = Error;

    fn try_from(document: AdjacencyDocument) -> Result<Self, Self::Error> {
        let mut graph = RoadGraph::new();

        for id in document.0.keys() {
            graph.add_node_with_id(*id);
        }

        for (id, neighbors) in &document.0 {
            let from = graph
                .node_index(id)
                .ok_or_else(|| Error::InvalidData(format!("Node {id} vanished while loading")))?;

            for neighbor in neighbors {
                if !neighbor.weight.is_finite() || neighbor.weight < 0.0 {
                    return Err(Error::InvalidData(format!(
                        "Edge {id} -> {} has invalid weight {}",
                        neighbor.id, neighbor.weight
                    )));
                }

                let to = graph.node_index(&neighbor.id).ok_or_else(|| {
                    Error::InvalidData(format!(
                        "Node {id} lists unknown neighbour {}",
                        neighbor.id
                    ))
                })?;

                let mirrored = document.neighbors(&neighbor.id).is_some_and(|back| {
                    back.iter()
                        .any(|entry| entry.id == *id && entry.weight == neighbor.weight)
                });
                if !mirrored {
                    return Err(Error::InvalidData(format!(
                        "Edge {id} -> {} (weight {}) has no matching reverse entry",
                        neighbor.id, neighbor.weight
                    )));
                }

                graph.add_edge(from, to, neighbor.weight);
            }
        }

        Ok(graph)
    }
}
