pub mod dijkstra;

use crate::edge::RoutingEdgeId;
use crate::graph::RoutingGraph;
use crate::primitives::Seconds;
use crate::trip::Trip;

/// The pluggable shortest-path strategy a router runs its queries on.
/// Implementations hold the router-local mutable state (the prohibition
/// set and any scratch buffers); the graph itself is only read, so one
/// graph can back any number of engines concurrently.
pub trait SearchEngine: Default {
    /// Cheapest path of routing edge ids from `from` to `to`, inclusive,
    /// under the graph's time-dependent travel times, or `None` when no
    /// feasible path exists.
    fn compute(
        &mut self,
        graph: &RoutingGraph,
        from: RoutingEdgeId,
        to: RoutingEdgeId,
        trip: &Trip,
        start: Seconds,
    ) -> Option<Vec<RoutingEdgeId>>;

    /// Replaces the set of edges excluded from all subsequent queries.
    /// An empty set resets earlier prohibitions.
    fn prohibit(&mut self, edges: Vec<RoutingEdgeId>);
}
