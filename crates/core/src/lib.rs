//! # GroupSync Core
//!
//! The engine behind GroupSync: it turns weekly student availability into
//! shareable schedule codes and splits a roster of codes into meeting groups
//! with suggested common meeting times.
//!
//! ## Architecture
//!
//! - **Timezones**: fixed registry of IANA timezones and their whole-hour offsets
//! - **Models**: availability vectors, students, and groups
//! - **Codec**: compact, checksummed schedule codes
//! - **Projection**: re-expresses a weekly availability in another timezone
//! - **Grouping**: partitions a roster and ranks meeting slots
//!
//! Everything here is synchronous and free of I/O. The only shared state is the
//! read-only global timezone registry.

/// Schedule code encoding and decoding
pub mod codec;
/// Error types for validation, decoding and group formation
pub mod errors;
/// Group formation strategies and meeting time suggestions
pub mod grouping;
/// Domain models
pub mod models;
/// Timezone rotation of availability vectors
pub mod projection;
/// Seeded synthetic rosters
pub mod random;
/// Supported timezone catalogue
pub mod timezones;

/// Number of hourly slots in a week, starting Monday at 12 AM.
pub const NUM_HOURS_PER_WEEK: usize = NUM_HOURS_PER_DAY * NUM_DAYS_PER_WEEK;
pub const NUM_HOURS_PER_DAY: usize = 24;
pub const NUM_DAYS_PER_WEEK: usize = 7;

pub use errors::{ConfigurationError, DecodeError, GroupsError, GroupsResult, ValidationError};
pub use grouping::{
    create_groups, create_groups_with, display_groups, GreedyOverlap, GroupingStrategy,
    HillClimbing,
};
pub use models::{AvailabilityVector, DisplayGroup, Group, Student, WeeklyHourSlot};
pub use timezones::{list_timezones, TimezoneId, TimezoneRegistry};
