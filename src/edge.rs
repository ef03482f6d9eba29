use std::fmt::Debug;

use crate::primitives::Seconds;
use crate::road::RoadEdgeId;
use crate::schedule::Schedule;

/// Dense index of an edge in the routing graph arena. Ids are assigned at
/// creation, contiguous over `[0, num_edges)`, and never reused.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoutingEdgeId(pub u32);
impl Debug for RoutingEdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("r#{}", self.0))
    }
}

/// Mode/line tag of a routing edge, used to group path edges into
/// itinerary legs. Connectors and access edges share the `Access` tag
/// since neither contributes a leg of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label<'a> {
    Car,
    Pedestrian,
    Stop,
    Access,
    Line(&'a str),
}

/// The closed set of routing edge behaviors.
#[derive(Debug)]
pub enum EdgeKind {
    /// Zero-cost entry point of a road edge.
    Depart,
    /// Zero-cost exit point of a road edge.
    Arrival,
    /// Driving over one non-internal road edge.
    Car { road: RoadEdgeId },
    /// Walking along one direction of a road edge's sidewalk.
    Pedestrian { road: RoadEdgeId, backward: bool },
    /// Zero-cost pass-through marking a transit stop.
    Stop { stop: String },
    /// Riding one transit line between two consecutive stops.
    Transit {
        line: String,
        entry_stop: RoutingEdgeId,
        schedules: Vec<Schedule>,
    },
    /// Mode transfer between two routing edges. The scales compensate for
    /// the fraction of each neighbor's travel time that the transfer
    /// position makes redundant.
    Access {
        in_edge: RoutingEdgeId,
        out_edge: RoutingEdgeId,
        in_scale: f64,
        out_scale: f64,
        transfer_time: Seconds,
    },
}

#[derive(Debug)]
pub struct RoutingEdge {
    /// Stable string id, unique within the graph.
    pub id: String,
    /// Road edge underlying this routing edge. Connectors and pure
    /// transfer edges have none; transit edges carry the road edge of
    /// their destination stop.
    pub road_edge: Option<RoadEdgeId>,
    pub successors: Vec<RoutingEdgeId>,
    pub kind: EdgeKind,
}

impl RoutingEdge {
    pub fn new(id: String, road_edge: Option<RoadEdgeId>, kind: EdgeKind) -> Self {
        RoutingEdge {
            id,
            road_edge,
            successors: Vec::new(),
            kind,
        }
    }

    pub fn label(&self) -> Label<'_> {
        match &self.kind {
            EdgeKind::Depart | EdgeKind::Arrival | EdgeKind::Access { .. } => Label::Access,
            EdgeKind::Car { .. } => Label::Car,
            EdgeKind::Pedestrian { .. } => Label::Pedestrian,
            EdgeKind::Stop { .. } => Label::Stop,
            EdgeKind::Transit { line, .. } => Label::Line(line),
        }
    }
}
