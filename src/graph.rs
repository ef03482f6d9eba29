use std::sync::Arc;

use crate::col::{map_new, HashMap};
use crate::edge::{EdgeKind, RoutingEdge, RoutingEdgeId};
use crate::primitives::{Seconds, INFEASIBLE};
use crate::road::{RoadEdgeId, RoadNetwork};
use crate::schedule::Schedule;
use crate::trip::{ModeSet, Trip};

/// The routing edges attached to one road edge.
#[derive(Debug, Clone)]
pub struct RoadEdgeSlots {
    pub depart: RoutingEdgeId,
    pub arrival: RoutingEdgeId,
    pub ped_forward: Option<RoutingEdgeId>,
    pub ped_backward: Option<RoutingEdgeId>,
    pub car: Option<RoutingEdgeId>,
}

/// Arena of all routing edges plus the mode-specific lookup tables. Built
/// once by the network builder; after construction it is only extended
/// through the schedule registrar and otherwise treated as immutable, so
/// a shared reference can serve any number of concurrent queries.
pub struct RoutingGraph {
    roads: Arc<dyn RoadNetwork + Send + Sync>,
    edges: Vec<RoutingEdge>,
    slots: Vec<RoadEdgeSlots>,
    stops: HashMap<String, RoutingEdgeId>,
    lines: HashMap<String, Vec<RoutingEdgeId>>,
}

impl RoutingGraph {
    pub(crate) fn new(roads: Arc<dyn RoadNetwork + Send + Sync>) -> Self {
        RoutingGraph {
            roads,
            edges: Vec::new(),
            slots: Vec::new(),
            stops: map_new(),
            lines: map_new(),
        }
    }

    pub fn roads(&self) -> &(dyn RoadNetwork + Send + Sync) {
        &*self.roads
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn edge(&self, id: RoutingEdgeId) -> &RoutingEdge {
        &self.edges[id.0 as usize]
    }

    pub(crate) fn edge_mut(&mut self, id: RoutingEdgeId) -> &mut RoutingEdge {
        &mut self.edges[id.0 as usize]
    }

    pub fn edges(&self) -> impl Iterator<Item = (RoutingEdgeId, &RoutingEdge)> {
        self.edges
            .iter()
            .enumerate()
            .map(|(i, e)| (RoutingEdgeId(i as u32), e))
    }

    pub(crate) fn add_edge(&mut self, edge: RoutingEdge) -> RoutingEdgeId {
        let id = RoutingEdgeId(self.edges.len().try_into().unwrap());
        self.edges.push(edge);
        id
    }

    pub(crate) fn add_successor(&mut self, from: RoutingEdgeId, to: RoutingEdgeId) {
        self.edge_mut(from).successors.push(to);
    }

    pub(crate) fn push_slots(&mut self, slots: RoadEdgeSlots) {
        self.slots.push(slots);
    }

    pub(crate) fn slots_mut(&mut self, road: RoadEdgeId) -> &mut RoadEdgeSlots {
        &mut self.slots[road.0 as usize]
    }

    /// Depart connector of the given road edge.
    pub fn depart_edge(&self, road: RoadEdgeId) -> RoutingEdgeId {
        self.slots[road.0 as usize].depart
    }

    /// Arrival connector of the given road edge.
    pub fn arrival_edge(&self, road: RoadEdgeId) -> RoutingEdgeId {
        self.slots[road.0 as usize].arrival
    }

    /// Forward and backward pedestrian edges of a road edge with a
    /// sidewalk, `None` otherwise.
    pub fn ped_pair(&self, road: RoadEdgeId) -> Option<(RoutingEdgeId, RoutingEdgeId)> {
        let slots = &self.slots[road.0 as usize];
        match (slots.ped_forward, slots.ped_backward) {
            (Some(forward), Some(backward)) => Some((forward, backward)),
            _ => None,
        }
    }

    pub fn car_edge(&self, road: RoadEdgeId) -> Option<RoutingEdgeId> {
        self.slots[road.0 as usize].car
    }

    /// Car edge lookup for contexts where the edge is structurally
    /// required (car successor wiring). A miss means the extension
    /// callback built the network inconsistently, which is not a
    /// recoverable condition.
    pub(crate) fn expect_car_edge(&self, road: RoadEdgeId) -> RoutingEdgeId {
        match self.car_edge(road) {
            Some(id) => id,
            None => panic!("car edge for road edge {:?} not found in routing graph", road),
        }
    }

    pub fn stop_edge(&self, stop_id: &str) -> Option<RoutingEdgeId> {
        self.stops.get(stop_id).copied()
    }

    pub(crate) fn register_stop(&mut self, stop_id: String, edge: RoutingEdgeId) {
        self.stops.insert(stop_id, edge);
    }

    /// Transit edges of a line, in stop-sequence order.
    pub fn line_edges(&self, line: &str) -> &[RoutingEdgeId] {
        self.lines.get(line).map(Vec::as_slice).unwrap_or(&[])
    }

    pub(crate) fn register_line_edge(&mut self, line: &str, edge: RoutingEdgeId) {
        self.lines.entry(line.to_owned()).or_default().push(edge);
    }

    /// Creates an access edge between two existing routing edges and
    /// wires it in as `in_edge -> access -> out_edge`.
    pub(crate) fn wire_access(
        &mut self,
        in_edge: RoutingEdgeId,
        out_edge: RoutingEdgeId,
        in_scale: f64,
        out_scale: f64,
    ) -> RoutingEdgeId {
        let id = format!("{}:{}", self.edge(in_edge).id, self.edge(out_edge).id);
        let road_edge = self.edge(out_edge).road_edge;
        let access = self.add_edge(RoutingEdge::new(
            id,
            road_edge,
            EdgeKind::Access {
                in_edge,
                out_edge,
                in_scale,
                out_scale,
                transfer_time: crate::primitives::TRANSFER_TIME,
            },
        ));
        self.add_successor(in_edge, access);
        self.add_successor(access, out_edge);
        access
    }

    /// Appends a schedule to a transit edge, keeping the edge's schedules
    /// ordered by validity begin.
    pub(crate) fn insert_schedule(&mut self, edge: RoutingEdgeId, schedule: Schedule) {
        match &mut self.edge_mut(edge).kind {
            EdgeKind::Transit { schedules, .. } => {
                let at = schedules.partition_point(|s| s.begin <= schedule.begin);
                schedules.insert(at, schedule);
            }
            kind => panic!("cannot attach a schedule to {:?}", kind),
        }
    }

    /// Whether the trip's permissions rule out the edge entirely,
    /// independent of time.
    pub fn prohibits(&self, id: RoutingEdgeId, trip: &Trip) -> bool {
        match &self.edge(id).kind {
            EdgeKind::Car { road } => {
                if !trip.modes.contains(ModeSet::CAR) {
                    return true;
                }
                match &trip.vehicle {
                    None => true,
                    Some(vehicle) => !self.roads.permits(*road, vehicle),
                }
            }
            EdgeKind::Pedestrian { .. } => !trip.modes.contains(ModeSet::PEDESTRIAN),
            EdgeKind::Stop { .. } => !trip.modes.contains(ModeSet::TRANSIT),
            _ => false,
        }
    }

    /// Time-dependent cost of traversing the edge. Pure in the graph:
    /// repeated and concurrent evaluation over a shared graph is safe.
    pub fn travel_time(&self, id: RoutingEdgeId, trip: &Trip, now: Seconds) -> Seconds {
        match &self.edge(id).kind {
            EdgeKind::Depart | EdgeKind::Arrival | EdgeKind::Stop { .. } => 0.0,
            EdgeKind::Car { road } => {
                let full = self
                    .roads
                    .travel_time(*road, trip.vehicle.as_ref(), now);
                self.partial(*road, trip, full)
            }
            EdgeKind::Pedestrian { road, .. } => {
                let full = self.roads.length(*road) / trip.speed;
                self.partial(*road, trip, full)
            }
            EdgeKind::Transit { schedules, .. } => {
                let mut best = INFEASIBLE;
                for schedule in schedules {
                    // Schedules are sorted by begin and rides take
                    // non-negative time, so no later pattern can beat the
                    // current best arrival.
                    if schedule.begin > best {
                        break;
                    }
                    if let Some(arrival) = schedule.next_arrival(now) {
                        best = best.min(arrival);
                    }
                }
                if best >= INFEASIBLE {
                    INFEASIBLE
                } else {
                    best - now
                }
            }
            EdgeKind::Access {
                in_edge,
                out_edge,
                in_scale,
                out_scale,
                transfer_time,
            } => {
                // The scaled neighbor costs refund distance already paid
                // for on the adjacent edges. Clamped at zero: the search
                // engine must not see negative weights.
                let cost = transfer_time
                    - self.travel_time(*in_edge, trip, now) * in_scale
                    - self.travel_time(*out_edge, trip, now) * out_scale;
                cost.max(0.0)
            }
        }
    }

    /// Scales a full-edge travel time down when the edge is only
    /// partially covered as the trip's origin or destination.
    fn partial(&self, road: RoadEdgeId, trip: &Trip, full: Seconds) -> Seconds {
        let length = self.roads.length(road);
        if road == trip.from {
            full * (length - trip.depart_pos) / length
        } else if road == trip.to {
            full * trip.arrival_pos / length
        } else {
            full
        }
    }
}

impl std::fmt::Debug for RoutingGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoutingGraph")
            .field("edges", &self.edges.len())
            .field("stops", &self.stops.len())
            .field("lines", &self.lines.len())
            .finish()
    }
}
