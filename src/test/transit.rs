use std::sync::Arc;

use crate::edge::EdgeKind;
use crate::primitives::INFEASIBLE;
use crate::road::RoadEdgeId;
use crate::router::Router;
use crate::test::sample::{car_trip, stop_time, transit_sample, walk_trip, SampleNet};
use crate::trip::ModeSet;

fn line_schedule_counts(router: &mut Router, line: &str) -> Vec<usize> {
    let graph = router.network();
    graph
        .line_edges(line)
        .iter()
        .map(|&id| match &graph.edge(id).kind {
            EdgeKind::Transit { schedules, .. } => schedules.len(),
            kind => panic!("line edge is {:?}", kind),
        })
        .collect()
}

#[test]
fn test_walk_transit_walk_itinerary() {
    crate::test::init_logger();
    let mut router = transit_sample();
    let items = router.compute(&walk_trip(0, 2)).unwrap();

    assert_eq!(items.len(), 3);
    assert_eq!(items[0].line, "");
    assert_eq!(items[0].dest_stop.as_deref(), Some("A"));
    assert_eq!(items[0].edges, vec![RoadEdgeId(0)]);

    assert_eq!(items[1].line, "L1");
    assert_eq!(items[1].dest_stop.as_deref(), Some("B"));
    assert_eq!(items[1].edges, vec![RoadEdgeId(2)]);

    assert_eq!(items[2].line, "");
    assert_eq!(items[2].dest_stop, None);
    assert_eq!(items[2].edges, vec![RoadEdgeId(2)]);
}

#[test]
fn test_fresh_line_creates_one_edge_per_stop_pair() {
    let mut router = transit_sample();
    router.add_access("C", RoadEdgeId(1), 500.0);
    router.add_schedule(
        "L2",
        &[
            stop_time("A", 0.0),
            stop_time("C", 120.0),
            stop_time("B", 360.0),
        ],
        86400.0,
        900.0,
    );
    let graph = router.network();
    assert_eq!(graph.line_edges("L1").len(), 1);
    assert_eq!(graph.line_edges("L2").len(), 2);

    // The line edges chain through the stop edges.
    let stop_c = graph.stop_edge("C").unwrap();
    let stop_b = graph.stop_edge("B").unwrap();
    let edges = graph.line_edges("L2");
    assert!(graph.edge(edges[0]).successors.contains(&stop_c));
    assert!(graph.edge(edges[1]).successors.contains(&stop_b));
}

#[test]
fn test_unknown_stops_are_filtered() {
    let mut router = transit_sample();
    router.add_schedule(
        "L3",
        &[
            stop_time("A", 0.0),
            stop_time("nowhere", 60.0),
            stop_time("B", 300.0),
        ],
        86400.0,
        600.0,
    );
    // "nowhere" was never registered; the remaining two stops suffice.
    assert_eq!(router.network().line_edges("L3").len(), 1);
}

#[test]
fn test_schedule_with_single_usable_stop_is_ignored() {
    crate::test::init_logger();
    let mut router = transit_sample();
    router.add_schedule("L9", &[stop_time("A", 0.0)], 86400.0, 600.0);
    assert!(router.network().line_edges("L9").is_empty());

    // A transit-only trip that would have needed L9 reports "no route"
    // instead of crashing.
    let mut trip = walk_trip(0, 2);
    trip.modes = ModeSet::TRANSIT;
    assert!(router.compute(&trip).is_none());
}

#[test]
fn test_mismatched_resubmission_is_rejected() {
    let mut router = transit_sample();
    router.add_access("C", RoadEdgeId(1), 500.0);

    // Different stop count.
    router.add_schedule(
        "L1",
        &[
            stop_time("A", 3600.0),
            stop_time("C", 3700.0),
            stop_time("B", 3900.0),
        ],
        86400.0,
        600.0,
    );
    assert_eq!(line_schedule_counts(&mut router, "L1"), vec![1]);

    // Same count, different stop identity.
    router.add_schedule(
        "L1",
        &[stop_time("A", 3600.0), stop_time("C", 3900.0)],
        86400.0,
        600.0,
    );
    assert_eq!(line_schedule_counts(&mut router, "L1"), vec![1]);
    assert_eq!(router.network().line_edges("L1").len(), 1);
}

#[test]
fn test_matching_resubmission_appends_schedule() {
    let mut router = transit_sample();
    // Off-peak pattern on the same stop sequence.
    router.add_schedule(
        "L1",
        &[stop_time("A", 3600.0), stop_time("B", 3960.0)],
        90000.0,
        1200.0,
    );
    assert_eq!(line_schedule_counts(&mut router, "L1"), vec![2]);

    let graph = router.network();
    let transit = graph.line_edges("L1")[0];
    match &graph.edge(transit).kind {
        EdgeKind::Transit { schedules, .. } => {
            assert_eq!(schedules[0].begin, 0.0);
            assert_eq!(schedules[1].begin, 3600.0);
            assert_eq!(schedules[1].travel_time, 360.0);
        }
        kind => panic!("line edge is {:?}", kind),
    }
}

#[test]
fn test_transit_edge_infeasible_outside_service() {
    let mut router = transit_sample();
    let graph = router.network();
    let transit = graph.line_edges("L1")[0];
    let trip = walk_trip(0, 2);
    assert_eq!(graph.travel_time(transit, &trip, 90000.0), INFEASIBLE);
    assert!(graph.travel_time(transit, &trip, 0.0) < INFEASIBLE);
}

#[test]
fn test_access_cost_is_clamped_non_negative() {
    let mut router = transit_sample();
    let graph = router.network();
    let trip = walk_trip(0, 2);
    for (id, edge) in graph.edges() {
        if matches!(edge.kind, EdgeKind::Access { .. }) {
            assert!(graph.travel_time(id, &trip, 0.0) >= 0.0);
        }
    }
}

#[test]
fn test_compute_is_deterministic() {
    let mut router = transit_sample();
    let first = router.compute(&walk_trip(0, 2)).unwrap();
    let second = router.compute(&walk_trip(0, 2)).unwrap();
    let labels = |items: &[crate::itinerary::TripItem]| {
        items.iter().map(|it| it.line.clone()).collect::<Vec<_>>()
    };
    assert_eq!(labels(&first), labels(&second));
    let total = |items: &[crate::itinerary::TripItem]| {
        items.iter().map(|it| it.edges.len()).sum::<usize>()
    };
    assert_eq!(total(&first), total(&second));
}

#[test]
fn test_car_trip_uses_single_car_leg() {
    let mut router: Router =
        Router::with_car_extension(Arc::new(SampleNet::chain(&[100.0, 200.0, 100.0])));
    let items = router.compute(&car_trip(0, 2)).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].line, "veh0");
    assert_eq!(
        items[0].edges,
        vec![RoadEdgeId(0), RoadEdgeId(1), RoadEdgeId(2)]
    );
}

#[test]
fn test_car_mode_excluded_despite_vehicle() {
    let mut router: Router =
        Router::with_car_extension(Arc::new(SampleNet::chain(&[100.0, 200.0, 100.0])));
    // A vehicle is available, but the trip does not allow the car mode.
    let mut trip = car_trip(0, 2);
    trip.modes = ModeSet::PEDESTRIAN;
    let items = router.compute(&trip).unwrap();
    assert!(items.iter().all(|it| it.line.is_empty()));
}

#[test]
fn test_no_modes_means_no_route() {
    let mut router: Router =
        Router::with_car_extension(Arc::new(SampleNet::chain(&[100.0, 200.0, 100.0])));
    // Car mode but no vehicle, and walking not permitted.
    let mut trip = walk_trip(0, 2);
    trip.modes = ModeSet::CAR;
    assert!(router.compute(&trip).is_none());
}

#[test]
fn test_prohibit_avoids_road_edge() {
    let mut router: Router = Router::with_car_extension(Arc::new(SampleNet::diamond()));
    let short = RoadEdgeId(1);

    let items = router.compute(&walk_trip(0, 3)).unwrap();
    assert!(items.iter().any(|it| it.edges.contains(&short)));

    router.prohibit(&[short]);
    let items = router.compute(&walk_trip(0, 3)).unwrap();
    assert!(!items.iter().any(|it| it.edges.contains(&short)));
    assert!(items.iter().any(|it| it.edges.contains(&RoadEdgeId(2))));

    // An empty prohibition resets the filter.
    router.prohibit(&[]);
    let items = router.compute(&walk_trip(0, 3)).unwrap();
    assert!(items.iter().any(|it| it.edges.contains(&short)));
}

#[test]
fn test_clone_shares_graph_with_private_search_state() {
    let mut router: Router = Router::with_car_extension(Arc::new(SampleNet::diamond()));
    let mut clone = router.clone();
    assert!(Arc::ptr_eq(&router.network(), &clone.network()));

    router.prohibit(&[RoadEdgeId(1)]);
    let original = router.compute(&walk_trip(0, 3)).unwrap();
    assert!(!original.iter().any(|it| it.edges.contains(&RoadEdgeId(1))));

    // The clone's engine is unaffected by the original's prohibition.
    let cloned = clone.compute(&walk_trip(0, 3)).unwrap();
    assert!(cloned.iter().any(|it| it.edges.contains(&RoadEdgeId(1))));
}

#[test]
fn test_mutation_refused_once_graph_is_shared() {
    crate::test::init_logger();
    let mut router = transit_sample();
    let _clone = router.clone();
    router.add_access("Z", RoadEdgeId(1), 1.0);
    assert!(router.network().stop_edge("Z").is_none());
}
