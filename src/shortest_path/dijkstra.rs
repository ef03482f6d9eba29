use std::collections::BinaryHeap;

use crate::col::HashSet;
use crate::edge::RoutingEdgeId;
use crate::graph::RoutingGraph;
use crate::primitives::{Seconds, INFEASIBLE};
use crate::shortest_path::SearchEngine;
use crate::trip::Trip;

#[derive(Debug, Clone)]
struct QueueItem {
    edge_id: RoutingEdgeId,
    arrival: Seconds,
}
impl PartialEq for QueueItem {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}
impl Eq for QueueItem {}
impl PartialOrd for QueueItem {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for QueueItem {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Min-heap on arrival; ties broken by edge id for determinism.
        other
            .arrival
            .total_cmp(&self.arrival)
            .then_with(|| other.edge_id.0.cmp(&self.edge_id.0))
    }
}

/// Time-dependent Dijkstra over routing edges. Edge costs are evaluated
/// at the clock time the edge is reached; infeasible edges (no valid
/// schedule) are skipped rather than relaxed.
#[derive(Default)]
pub struct Dijkstra {
    prohibited: HashSet<RoutingEdgeId>,
}

impl SearchEngine for Dijkstra {
    fn compute(
        &mut self,
        graph: &RoutingGraph,
        from: RoutingEdgeId,
        to: RoutingEdgeId,
        trip: &Trip,
        start: Seconds,
    ) -> Option<Vec<RoutingEdgeId>> {
        let num_edges = graph.num_edges();
        let mut best: Vec<Seconds> = vec![f64::INFINITY; num_edges];
        let mut prev: Vec<Option<RoutingEdgeId>> = vec![None; num_edges];

        if self.prohibited.contains(&from) || graph.prohibits(from, trip) {
            return None;
        }
        best[from.0 as usize] = start;

        let mut queue: BinaryHeap<QueueItem> = BinaryHeap::new();
        queue.push(QueueItem {
            edge_id: from,
            arrival: start,
        });

        while let Some(QueueItem { edge_id, arrival }) = queue.pop() {
            if arrival > best[edge_id.0 as usize] {
                continue;
            }
            if edge_id == to {
                return Some(unwind_path(&prev, from, to));
            }
            for &succ in graph.edge(edge_id).successors.iter() {
                if self.prohibited.contains(&succ) || graph.prohibits(succ, trip) {
                    continue;
                }
                let cost = graph.travel_time(succ, trip, arrival);
                if cost >= INFEASIBLE {
                    continue;
                }
                let next = arrival + cost;
                if next < best[succ.0 as usize] {
                    best[succ.0 as usize] = next;
                    prev[succ.0 as usize] = Some(edge_id);
                    queue.push(QueueItem {
                        edge_id: succ,
                        arrival: next,
                    });
                }
            }
        }
        None
    }

    fn prohibit(&mut self, edges: Vec<RoutingEdgeId>) {
        self.prohibited = edges.into_iter().collect();
    }
}

fn unwind_path(
    prev: &[Option<RoutingEdgeId>],
    from: RoutingEdgeId,
    to: RoutingEdgeId,
) -> Vec<RoutingEdgeId> {
    let mut path = vec![to];
    let mut current = to;
    while current != from {
        match prev[current.0 as usize] {
            Some(p) => current = p,
            None => break,
        }
        path.push(current);
    }
    path.reverse();
    path
}
