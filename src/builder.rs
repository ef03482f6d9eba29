use std::sync::Arc;

use crate::edge::{EdgeKind, RoutingEdge, RoutingEdgeId};
use crate::graph::{RoadEdgeSlots, RoutingGraph};
use crate::road::{RoadEdgeId, RoadNetwork};

/// Hook invoked mid-build so the embedding system can add mode-specific
/// edges (typically [`NetworkBuilder::add_car_edges`]) without the builder
/// depending on any vehicle model.
pub type ExtensionCallback = Arc<dyn Fn(&mut NetworkBuilder) + Send + Sync>;

/// One-time construction of the routing graph: connectors and pedestrian
/// edges for every road edge, then whatever the extension callback adds.
pub struct NetworkBuilder {
    graph: RoutingGraph,
}

impl NetworkBuilder {
    pub fn build(
        roads: Arc<dyn RoadNetwork + Send + Sync>,
        extension: &ExtensionCallback,
    ) -> RoutingGraph {
        let mut builder = NetworkBuilder {
            graph: RoutingGraph::new(roads),
        };
        builder.add_base_edges();
        extension(&mut builder);
        builder.graph
    }

    pub fn graph(&self) -> &RoutingGraph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut RoutingGraph {
        &mut self.graph
    }

    /// Connectors for every road edge and a pedestrian edge pair for every
    /// road edge with a sidewalk, wired depart -> pedestrian -> arrival in
    /// both directions. Forward pedestrian edges follow the road graph's
    /// successors, backward ones run against them; the two directions are
    /// never wired to each other directly.
    fn add_base_edges(&mut self) {
        let num_roads = self.graph.roads().num_edges();
        for index in 0..num_roads {
            let road = RoadEdgeId(index as u32);
            let depart = self.graph.add_edge(RoutingEdge::new(
                format!("{}_depart", index),
                None,
                EdgeKind::Depart,
            ));
            let arrival = self.graph.add_edge(RoutingEdge::new(
                format!("{}_arrival", index),
                None,
                EdgeKind::Arrival,
            ));
            let (ped_forward, ped_backward) = if self.graph.roads().has_sidewalk(road) {
                let forward = self.graph.add_edge(RoutingEdge::new(
                    format!("{}_fwd", index),
                    Some(road),
                    EdgeKind::Pedestrian {
                        road,
                        backward: false,
                    },
                ));
                let backward = self.graph.add_edge(RoutingEdge::new(
                    format!("{}_bwd", index),
                    Some(road),
                    EdgeKind::Pedestrian {
                        road,
                        backward: true,
                    },
                ));
                self.graph.add_successor(depart, forward);
                self.graph.add_successor(forward, arrival);
                self.graph.add_successor(depart, backward);
                self.graph.add_successor(backward, arrival);
                (Some(forward), Some(backward))
            } else {
                (None, None)
            };
            self.graph.push_slots(RoadEdgeSlots {
                depart,
                arrival,
                ped_forward,
                ped_backward,
                car: None,
            });
        }

        // Walking connectivity mirrors road connectivity.
        for index in 0..num_roads {
            let road = RoadEdgeId(index as u32);
            let Some((forward, backward)) = self.graph.ped_pair(road) else {
                continue;
            };
            let successors = self.graph.roads().successors(road).to_vec();
            for next in successors {
                if let Some((next_forward, next_backward)) = self.graph.ped_pair(next) {
                    self.graph.add_successor(forward, next_forward);
                    self.graph.add_successor(next_backward, backward);
                }
            }
        }
    }

    /// Reference car-mode extension: one car edge per non-internal road
    /// edge, successors mirroring the road graph, plus access edges onto
    /// the sidewalk for dropping off anywhere along the edge. Any
    /// additional vehicular mode follows the same pattern.
    pub fn add_car_edges(&mut self) {
        let num_roads = self.graph.roads().num_edges();
        for index in 0..num_roads {
            let road = RoadEdgeId(index as u32);
            if self.graph.roads().is_internal(road) {
                continue;
            }
            let car = self.graph.add_edge(RoutingEdge::new(
                format!("{}_car", index),
                Some(road),
                EdgeKind::Car { road },
            ));
            self.graph.slots_mut(road).car = Some(car);
        }
        for index in 0..num_roads {
            let road = RoadEdgeId(index as u32);
            if self.graph.roads().is_internal(road) {
                continue;
            }
            let car = self.graph.expect_car_edge(road);
            let successors = self.graph.roads().successors(road).to_vec();
            for next in successors {
                let next_car = self.graph.expect_car_edge(next);
                self.graph.add_successor(car, next_car);
            }
            self.graph.add_successor(self.graph.depart_edge(road), car);
            self.graph.add_successor(car, self.graph.arrival_edge(road));
            if let Some((forward, backward)) = self.graph.ped_pair(road) {
                self.add_access(car, forward, 0.0, 1.0);
                self.add_access(car, backward, 1.0, 1.0);
            }
        }
    }

    /// Creates and wires an access edge between two existing routing
    /// edges.
    pub fn add_access(
        &mut self,
        in_edge: RoutingEdgeId,
        out_edge: RoutingEdgeId,
        in_scale: f64,
        out_scale: f64,
    ) -> RoutingEdgeId {
        self.graph.wire_access(in_edge, out_edge, in_scale, out_scale)
    }
}
