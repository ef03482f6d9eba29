//! A multi-modal itinerary routing engine.
//!
//! Given a road network (with optional sidewalks) and scheduled transit
//! lines, the engine builds an auxiliary routing graph whose edges
//! represent ways of traversing something by some mode, and answers
//! shortest-time queries between two positions at a given departure time,
//! returning mode-labeled itinerary legs.
//!
//! The graph is built lazily on first use and is immutable afterwards;
//! [`Router::clone`] shares it across workers while giving each router
//! its own search state.

mod builder;
mod col;
mod edge;
mod graph;
mod itinerary;
mod primitives;
mod registrar;
mod road;
mod router;
mod schedule;
mod shortest_path;
mod trip;

#[cfg(test)]
mod test;

pub use crate::builder::{ExtensionCallback, NetworkBuilder};
pub use crate::edge::{EdgeKind, Label, RoutingEdge, RoutingEdgeId};
pub use crate::graph::{RoadEdgeSlots, RoutingGraph};
pub use crate::itinerary::TripItem;
pub use crate::primitives::{Seconds, INFEASIBLE, TRANSFER_TIME};
pub use crate::registrar::{ScheduleRegistrar, StopTime};
pub use crate::road::{RoadEdgeId, RoadNetwork, Vehicle};
pub use crate::router::Router;
pub use crate::schedule::Schedule;
pub use crate::shortest_path::dijkstra::Dijkstra;
pub use crate::shortest_path::SearchEngine;
pub use crate::trip::{ModeSet, Trip};
