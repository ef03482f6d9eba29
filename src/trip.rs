use std::fmt::Debug;
use std::ops::BitOr;

use crate::primitives::Seconds;
use crate::road::{RoadEdgeId, Vehicle};

/// Bitset of the modes a trip is allowed to use. The closed set of
/// constants makes an unknown mode value unrepresentable.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModeSet(pub u32);

impl ModeSet {
    pub const PEDESTRIAN: ModeSet = ModeSet(1);
    pub const CAR: ModeSet = ModeSet(1 << 1);
    pub const TRANSIT: ModeSet = ModeSet(1 << 2);

    pub const ALL: ModeSet = ModeSet(Self::PEDESTRIAN.0 | Self::CAR.0 | Self::TRANSIT.0);

    pub fn contains(&self, mode: ModeSet) -> bool {
        self.0 & mode.0 == mode.0
    }
}

impl BitOr for ModeSet {
    type Output = ModeSet;

    fn bitor(self, rhs: ModeSet) -> ModeSet {
        ModeSet(self.0 | rhs.0)
    }
}

impl Debug for ModeSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("modes#{:03b}", self.0))
    }
}

/// Immutable context of one routing query. Positions are meters along the
/// respective road edge, `speed` is the traveler's walking speed in m/s.
#[derive(Debug)]
pub struct Trip {
    pub from: RoadEdgeId,
    pub to: RoadEdgeId,
    pub depart_pos: f64,
    pub arrival_pos: f64,
    pub speed: f64,
    pub depart: Seconds,
    pub vehicle: Option<Vehicle>,
    pub modes: ModeSet,
}
