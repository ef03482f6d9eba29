/// Wall-clock time and durations, in seconds.
pub type Seconds = f64;

/// Returned by travel-time evaluation when an edge cannot be used at the
/// queried time (e.g. a transit edge outside all of its service windows).
/// The search engine skips such edges instead of relaxing them.
pub const INFEASIBLE: Seconds = 1e18;

/// Base cost of switching modes at an access edge. Kept close to zero so
/// that transfers order paths without distorting their total travel time.
pub const TRANSFER_TIME: Seconds = 1e-3;
