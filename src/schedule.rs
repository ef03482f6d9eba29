use crate::primitives::Seconds;

/// One recurring service pattern on a transit edge: departures every
/// `period` seconds from `begin` while the current time is before `end`,
/// each ride taking `travel_time` seconds. A line accumulates one
/// `Schedule` per accepted timetable submission (e.g. peak and off-peak
/// headways), kept ordered by `begin`.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    pub begin: Seconds,
    pub end: Seconds,
    pub period: Seconds,
    pub travel_time: Seconds,
}

impl Schedule {
    /// Absolute arrival time of the earliest ride departing not before
    /// `now`, or `None` when the pattern is no longer valid at `now`.
    pub fn next_arrival(&self, now: Seconds) -> Option<Seconds> {
        if now >= self.end {
            return None;
        }
        let elapsed = (now - self.begin).max(0.0);
        let runs = (elapsed / self.period).ceil();
        let departure = self.begin + runs * self.period;
        Some(departure + self.travel_time)
    }
}

#[cfg(test)]
mod tests {
    use super::Schedule;

    #[test]
    fn test_next_arrival_waits_for_next_departure() {
        let schedule = Schedule {
            begin: 0.0,
            end: 86400.0,
            period: 600.0,
            travel_time: 300.0,
        };
        // Ten seconds into the third period: wait out the remaining 590
        // seconds, then ride for 300.
        let now = 2.0 * 600.0 + 10.0;
        let arrival = schedule.next_arrival(now).unwrap();
        assert_eq!(arrival - now, (600.0 - 10.0) + 300.0);
    }

    #[test]
    fn test_next_arrival_before_first_departure() {
        let schedule = Schedule {
            begin: 100.0,
            end: 1000.0,
            period: 60.0,
            travel_time: 30.0,
        };
        assert_eq!(schedule.next_arrival(40.0), Some(130.0));
    }

    #[test]
    fn test_next_arrival_exactly_on_departure() {
        let schedule = Schedule {
            begin: 0.0,
            end: 1000.0,
            period: 60.0,
            travel_time: 30.0,
        };
        assert_eq!(schedule.next_arrival(120.0), Some(150.0));
    }

    #[test]
    fn test_expired_schedule_is_invalid() {
        let schedule = Schedule {
            begin: 0.0,
            end: 600.0,
            period: 60.0,
            travel_time: 30.0,
        };
        assert_eq!(schedule.next_arrival(600.0), None);
        assert_eq!(schedule.next_arrival(601.0), None);
    }
}
