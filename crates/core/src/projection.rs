//! Re-expresses a weekly availability recorded in one timezone as the same
//! hours seen from another timezone's wall clock.
//!
//! The week is treated as a ring of 168 hours, so a Sunday evening in one
//! timezone can become a Monday morning in another. A single offset per
//! timezone is used for the whole week.

use crate::models::AvailabilityVector;
use crate::timezones::{TimezoneId, TimezoneRegistry};

/// Hours to add to a wall-clock time in `from` to get the wall-clock time in `to`.
pub fn offset_delta(from: TimezoneId, to: TimezoneId, registry: &TimezoneRegistry) -> i32 {
    registry.offset_hours(to) - registry.offset_hours(from)
}

/// Circular rotation: `output[i] = availability[(i - delta) mod 168]`.
pub fn rotate(availability: &AvailabilityVector, delta: i32) -> AvailabilityVector {
    availability.rotated(delta)
}

/// Projects `availability`, recorded in `from`, onto the wall clock of `to`.
pub fn project(
    availability: &AvailabilityVector,
    from: TimezoneId,
    to: TimezoneId,
    registry: &TimezoneRegistry,
) -> AvailabilityVector {
    if from == to {
        return *availability;
    }
    rotate(availability, offset_delta(from, to, registry))
}
