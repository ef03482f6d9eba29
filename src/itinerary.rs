use crate::edge::{EdgeKind, Label, RoutingEdgeId};
use crate::graph::RoutingGraph;
use crate::road::RoadEdgeId;
use crate::trip::Trip;

/// One leg of a computed itinerary: the mode/line label (the vehicle id
/// for car legs, empty for pedestrian legs, the line name for transit
/// legs), the stop the leg ends at (if any), and the road edges traversed.
#[derive(Debug, Clone, PartialEq)]
pub struct TripItem {
    pub line: String,
    pub dest_stop: Option<String>,
    pub edges: Vec<RoadEdgeId>,
}

impl TripItem {
    fn new(line: String) -> Self {
        TripItem {
            line,
            dest_stop: None,
            edges: Vec::new(),
        }
    }
}

/// Reduces a raw path of routing edges into itinerary legs. Connectors
/// and access edges contribute nothing; a stop edge closes no leg but
/// records its id on the current one; every label change among the
/// remaining edges opens a new leg.
pub fn build_itinerary(
    graph: &RoutingGraph,
    trip: &Trip,
    path: &[RoutingEdgeId],
) -> Vec<TripItem> {
    let mut items: Vec<TripItem> = Vec::new();
    let mut last_label: Option<Label<'_>> = None;
    for &id in path {
        let edge = graph.edge(id);
        match edge.label() {
            Label::Access => {}
            Label::Stop => {
                if let (Some(item), EdgeKind::Stop { stop }) = (items.last_mut(), &edge.kind) {
                    item.dest_stop = Some(stop.clone());
                }
            }
            label => {
                if last_label != Some(label) {
                    let line = match label {
                        Label::Car => trip
                            .vehicle
                            .as_ref()
                            .map(|vehicle| vehicle.id.clone())
                            .unwrap_or_default(),
                        Label::Line(line) => line.to_owned(),
                        _ => String::new(),
                    };
                    items.push(TripItem::new(line));
                    last_label = Some(label);
                }
                if let (Some(item), Some(road)) = (items.last_mut(), edge.road_edge) {
                    item.edges.push(road);
                }
            }
        }
    }
    items
}
