use std::collections::BinaryHeap;

use hashbrown::HashMap;
use log::debug;
use ordered_float::OrderedFloat;
use petgraph::graph::NodeIndex;

use super::state::State;
use crate::model::{NodeId, PathEdge, PathResult, RoadGraph};
use crate::{Distance, Error};

/// Dijkstra's algorithm for the shortest road route between two nodes.
/// Returns the route ordered from `start` to `end`.
///
/// # Errors
///
/// [`Error::NodeNotFound`] if either node is not in `graph`,
/// [`Error::NoPathFound`] if no road connects them.
pub fn shortest_path(graph: &RoadGraph, start: NodeId, end: NodeId) -> Result<PathResult, Error> {
    let source = graph.node_index(&start).ok_or(Error::NodeNotFound(start))?;
    let target = graph.node_index(&end).ok_or(Error::NodeNotFound(end))?;

    if source == target {
        return Ok(PathResult::single(start));
    }

    let estimated_nodes = graph.node_count().min(1000);
    let mut distances: HashMap<NodeIndex, OrderedFloat<Distance>> =
        HashMap::with_capacity(estimated_nodes);
    // predecessor and the weight of the edge leading from it
    let mut predecessors: HashMap<NodeIndex, (NodeIndex, Distance)> =
        HashMap::with_capacity(estimated_nodes);
    let mut heap = BinaryHeap::with_capacity(estimated_nodes / 4);

    // Start node has distance 0
    heap.push(State {
        cost: OrderedFloat(0.0),
        node: source,
    });
    distances.insert(source, OrderedFloat(0.0));

    let mut reached = false;
    while let Some(State { cost, node }) = heap.pop() {
        // Skip if we've found a better path
        if let Some(&best) = distances.get(&node) {
            if cost > best {
                continue;
            }
        }

        if node == target {
            reached = true;
            break;
        }

        for (next, weight) in graph.incident(node) {
            let next_cost = OrderedFloat(cost.0 + weight);

            match distances.entry(next) {
                hashbrown::hash_map::Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                    heap.push(State {
                        cost: next_cost,
                        node: next,
                    });
                    predecessors.insert(next, (node, weight));
                }
                hashbrown::hash_map::Entry::Occupied(mut entry) => {
                    if next_cost < *entry.get() {
                        *entry.get_mut() = next_cost;
                        heap.push(State {
                            cost: next_cost,
                            node: next,
                        });
                        predecessors.insert(next, (node, weight));
                    }
                }
            }
        }
    }

    if !reached {
        debug!(
            "No route from {start} to {end}; explored {} nodes",
            distances.len()
        );
        return Err(Error::NoPathFound { start, end });
    }

    let node_id = |index: NodeIndex| {
        graph
            .node(index)
            .map(|node| node.id)
            .ok_or_else(|| Error::InvalidData(format!("Road graph lost node {index:?}")))
    };

    // Follow predecessors backward from target to start
    let mut edges = Vec::new();
    let mut current = target;
    while current != source {
        let &(previous, weight) = predecessors.get(&current).ok_or_else(|| {
            Error::InvalidData(format!("Broken predecessor chain at {current:?}"))
        })?;
        edges.push(PathEdge {
            from: node_id(previous)?,
            to: node_id(current)?,
            weight,
        });
        current = previous;
    }
    edges.reverse();

    let path = PathResult::from_edges(start, edges);
    debug!(
        "Route {start} -> {end}: {} segments, length {:.3}",
        path.edges().len(),
        path.total_weight()
    );
    Ok(path)
}
