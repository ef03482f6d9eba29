use std::fmt::Debug;

use crate::primitives::Seconds;

/// Dense index of an edge in the underlying road network.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoadEdgeId(pub u32);
impl Debug for RoadEdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("e#{}", self.0))
    }
}

/// The vehicle a trip may use for its car legs. The road network decides
/// what the vehicle is allowed to drive on and how fast it travels.
#[derive(Debug, Clone)]
pub struct Vehicle {
    pub id: String,
}

/// Read-only view of the physical road network the routing graph is built
/// over. Edge ids are dense over `[0, num_edges)`.
pub trait RoadNetwork {
    fn num_edges(&self) -> usize;

    /// Length of the edge in meters.
    fn length(&self, edge: RoadEdgeId) -> f64;

    /// Whether pedestrians can walk along this edge.
    fn has_sidewalk(&self, edge: RoadEdgeId) -> bool;

    /// Junction-internal edges get no car edge in the routing graph.
    fn is_internal(&self, edge: RoadEdgeId) -> bool;

    fn successors(&self, edge: RoadEdgeId) -> &[RoadEdgeId];

    /// Vehicle-class travel time over the full edge at the given time.
    fn travel_time(&self, edge: RoadEdgeId, vehicle: Option<&Vehicle>, time: Seconds) -> Seconds;

    /// Whether the vehicle is allowed on the edge.
    fn permits(&self, edge: RoadEdgeId, vehicle: &Vehicle) -> bool;
}
