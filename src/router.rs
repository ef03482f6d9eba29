use std::sync::Arc;

use log::warn;

use crate::builder::{ExtensionCallback, NetworkBuilder};
use crate::graph::RoutingGraph;
use crate::itinerary::{build_itinerary, TripItem};
use crate::primitives::Seconds;
use crate::registrar::{ScheduleRegistrar, StopTime};
use crate::road::{RoadEdgeId, RoadNetwork};
use crate::shortest_path::dijkstra::Dijkstra;
use crate::shortest_path::SearchEngine;
use crate::trip::Trip;

/// The multi-modal router: owns one lazily-built routing graph and one
/// private search engine. The graph is built on first use and never
/// rebuilt; [`Router::clone`] hands out further routers sharing it, each
/// with fresh search state, for use from other workers.
pub struct Router<S: SearchEngine = Dijkstra> {
    roads: Arc<dyn RoadNetwork + Send + Sync>,
    extension: ExtensionCallback,
    graph: Option<Arc<RoutingGraph>>,
    engine: S,
}

impl<S: SearchEngine> Router<S> {
    pub fn new(roads: Arc<dyn RoadNetwork + Send + Sync>, extension: ExtensionCallback) -> Self {
        Router {
            roads,
            extension,
            graph: None,
            engine: S::default(),
        }
    }

    /// Router whose extension hook installs the reference car mode.
    pub fn with_car_extension(roads: Arc<dyn RoadNetwork + Send + Sync>) -> Self {
        Router::new(roads, Arc::new(NetworkBuilder::add_car_edges))
    }

    /// The shared routing graph, building it first if necessary.
    pub fn network(&mut self) -> Arc<RoutingGraph> {
        self.ensure_built()
    }

    /// Registers a stop access point. No-op with a warning once the graph
    /// is shared with clones (post-build mutation requires the only
    /// owner).
    pub fn add_access(&mut self, stop_id: &str, road_edge: RoadEdgeId, pos: f64) {
        self.ensure_built();
        match self.graph.as_mut().and_then(Arc::get_mut) {
            Some(graph) => ScheduleRegistrar::new(graph).add_access(stop_id, road_edge, pos),
            None => warn!(
                "Routing graph is shared, ignoring access point for stop '{}'.",
                stop_id
            ),
        }
    }

    /// Submits a transit line timetable. Same ownership rule as
    /// [`Router::add_access`].
    pub fn add_schedule(
        &mut self,
        line: &str,
        stop_times: &[StopTime],
        end: Seconds,
        period: Seconds,
    ) {
        self.ensure_built();
        match self.graph.as_mut().and_then(Arc::get_mut) {
            Some(graph) => {
                ScheduleRegistrar::new(graph).add_schedule(line, stop_times, end, period)
            }
            None => warn!(
                "Routing graph is shared, ignoring schedule for line '{}'.",
                line
            ),
        }
    }

    /// Cheapest itinerary for the trip, or `None` when no feasible route
    /// exists.
    pub fn compute(&mut self, trip: &Trip) -> Option<Vec<TripItem>> {
        let graph = self.ensure_built();
        let from = graph.depart_edge(trip.from);
        let to = graph.arrival_edge(trip.to);
        let path = self.engine.compute(&graph, from, to, trip, trip.depart)?;
        Some(build_itinerary(&graph, trip, &path))
    }

    /// Excludes the given road edges (their pedestrian directions and car
    /// edge, where present) from all subsequent queries on this router.
    /// Replaces any earlier prohibition; an empty slice resets it.
    /// Transit edges are unaffected.
    pub fn prohibit(&mut self, road_edges: &[RoadEdgeId]) {
        let graph = self.ensure_built();
        let mut prohibited = Vec::new();
        for &road in road_edges {
            if let Some((forward, backward)) = graph.ped_pair(road) {
                prohibited.push(forward);
                prohibited.push(backward);
            }
            if let Some(car) = graph.car_edge(road) {
                prohibited.push(car);
            }
        }
        self.engine.prohibit(prohibited);
    }

    /// A router sharing this router's graph with fresh, independent
    /// search state. Builds the graph once if it is not built yet; clones
    /// never rebuild it.
    pub fn clone(&mut self) -> Router<S> {
        let graph = self.ensure_built();
        Router {
            roads: Arc::clone(&self.roads),
            extension: Arc::clone(&self.extension),
            graph: Some(graph),
            engine: S::default(),
        }
    }

    fn ensure_built(&mut self) -> Arc<RoutingGraph> {
        match &self.graph {
            Some(graph) => Arc::clone(graph),
            None => {
                let graph = Arc::new(NetworkBuilder::build(
                    Arc::clone(&self.roads),
                    &self.extension,
                ));
                self.graph = Some(Arc::clone(&graph));
                graph
            }
        }
    }
}
