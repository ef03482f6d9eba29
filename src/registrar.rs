use itertools::Itertools;
use log::warn;

use crate::edge::{EdgeKind, RoutingEdge};
use crate::graph::RoutingGraph;
use crate::primitives::Seconds;
use crate::road::RoadEdgeId;
use crate::schedule::Schedule;

/// One stop call of a transit line: the stop's id and the scheduled time
/// at which the vehicle leaves it.
#[derive(Debug, Clone)]
pub struct StopTime {
    pub stop: String,
    pub until: Seconds,
}

/// Incremental augmentation of an already-built routing graph with stop
/// access points and transit line timetables. Malformed submissions are
/// logged and dropped without touching the graph.
pub struct ScheduleRegistrar<'a> {
    graph: &'a mut RoutingGraph,
}

impl<'a> ScheduleRegistrar<'a> {
    pub fn new(graph: &'a mut RoutingGraph) -> Self {
        ScheduleRegistrar { graph }
    }

    /// Registers a stop at `pos` meters along `road_edge`, creating its
    /// stop edge on first reference. Pedestrian entry/exit wiring requires
    /// a sidewalk; car wiring is created whenever a car edge exists,
    /// independent of sidewalk presence.
    pub fn add_access(&mut self, stop_id: &str, road_edge: RoadEdgeId, pos: f64) {
        let stop = match self.graph.stop_edge(stop_id) {
            Some(stop) => stop,
            None => {
                let stop = self.graph.add_edge(RoutingEdge::new(
                    stop_id.to_owned(),
                    Some(road_edge),
                    EdgeKind::Stop {
                        stop: stop_id.to_owned(),
                    },
                ));
                self.graph.register_stop(stop_id.to_owned(), stop);
                stop
            }
        };
        let length = self.graph.roads().length(road_edge);
        let share = pos / length;

        if let Some((forward, backward)) = self.graph.ped_pair(road_edge) {
            // Entries refund the sidewalk distance beyond the stop,
            // exits the distance before it.
            self.graph.wire_access(forward, stop, 1.0 - share, 0.0);
            self.graph.wire_access(backward, stop, share, 0.0);
            self.graph.wire_access(stop, forward, 0.0, share);
            self.graph.wire_access(stop, backward, 0.0, 1.0 - share);
        }
        if let Some(car) = self.graph.car_edge(road_edge) {
            self.graph.wire_access(car, stop, share, 0.0);
            self.graph.wire_access(stop, car, 0.0, 1.0 - share);
        }
    }

    /// Submits one recurring timetable for `line`. The first accepted
    /// submission fixes the line's stop sequence and creates its transit
    /// edges; later submissions must match that sequence exactly and then
    /// only add a further service pattern to each edge.
    pub fn add_schedule(
        &mut self,
        line: &str,
        stop_times: &[StopTime],
        end: Seconds,
        period: Seconds,
    ) {
        if period <= 0.0 {
            warn!(
                "Ignoring schedule for line '{}' with non-positive period {}.",
                line, period
            );
            return;
        }
        let mut valid: Vec<&StopTime> = Vec::new();
        let mut last_until = f64::NEG_INFINITY;
        for stop_time in stop_times {
            if self.graph.stop_edge(&stop_time.stop).is_some() && stop_time.until >= last_until {
                valid.push(stop_time);
                last_until = stop_time.until;
            }
        }
        if valid.len() < 2 {
            warn!(
                "Ignoring schedule for line '{}' with less than two usable stops.",
                line
            );
            return;
        }

        if self.graph.line_edges(line).is_empty() {
            self.create_line(line, &valid, end, period);
        } else {
            self.append_line_schedule(line, &valid, end, period);
        }
    }

    fn create_line(&mut self, line: &str, valid: &[&StopTime], end: Seconds, period: Seconds) {
        let first_until = valid[0].until;
        for (entry, exit) in valid.iter().tuple_windows() {
            // Both stops passed the filter above.
            let entry_stop = self.graph.stop_edge(&entry.stop).unwrap();
            let exit_stop = self.graph.stop_edge(&exit.stop).unwrap();
            let transit = self.graph.add_edge(RoutingEdge::new(
                format!("{}:{}", line, exit.stop),
                self.graph.edge(exit_stop).road_edge,
                EdgeKind::Transit {
                    line: line.to_owned(),
                    entry_stop,
                    schedules: Vec::new(),
                },
            ));
            self.graph.insert_schedule(
                transit,
                Schedule {
                    begin: entry.until,
                    end: end + entry.until - first_until,
                    period,
                    travel_time: exit.until - entry.until,
                },
            );
            self.graph.add_successor(entry_stop, transit);
            self.graph.add_successor(transit, exit_stop);
            self.graph.register_line_edge(line, transit);
        }
    }

    fn append_line_schedule(
        &mut self,
        line: &str,
        valid: &[&StopTime],
        end: Seconds,
        period: Seconds,
    ) {
        let line_edges = self.graph.line_edges(line).to_vec();
        if valid.len() != line_edges.len() + 1 {
            warn!(
                "Number of stops for line '{}' does not match earlier definitions, ignoring schedule.",
                line
            );
            return;
        }
        let first_stop = self.graph.stop_edge(&valid[0].stop).unwrap();
        let entry_stop = match &self.graph.edge(line_edges[0]).kind {
            EdgeKind::Transit { entry_stop, .. } => *entry_stop,
            kind => panic!("line edge of '{}' is {:?}", line, kind),
        };
        if entry_stop != first_stop {
            warn!(
                "Different stop for line '{}' compared to earlier definitions, ignoring schedule.",
                line
            );
            return;
        }
        for (&transit, stop_time) in line_edges.iter().zip(&valid[1..]) {
            let exit_stop = self.graph.stop_edge(&stop_time.stop).unwrap();
            if self.graph.edge(transit).successors.first() != Some(&exit_stop) {
                warn!(
                    "Different stop for line '{}' compared to earlier definitions, ignoring schedule.",
                    line
                );
                return;
            }
        }

        // Structure matches; add one service pattern per line edge.
        let first_until = valid[0].until;
        for (&transit, (entry, exit)) in line_edges.iter().zip(valid.iter().tuple_windows()) {
            self.graph.insert_schedule(
                transit,
                Schedule {
                    begin: entry.until,
                    end: end + entry.until - first_until,
                    period,
                    travel_time: exit.until - entry.until,
                },
            );
        }
    }
}
