//! # Group Formation
//!
//! Turns a batch of schedule codes into meeting groups:
//!
//! 1. Decode every code, silently dropping the ones that do not decode
//! 2. Project every student's availability onto the output timezone
//! 3. Partition the roster with a [`GroupingStrategy`]
//! 4. For each group, rank the hours of the week by how many members are free
//!    and suggest the best ones
//!
//! Invalid arguments (group size, output timezone) abort the whole call. Bad
//! codes never do, since they come from text pasted by people.

mod greedy;
mod hill_climbing;

use tracing::{debug, info};

pub use greedy::GreedyOverlap;
pub use hill_climbing::{score_partition, HillClimbing};

use crate::errors::ConfigurationError;
use crate::models::{AvailabilityVector, DisplayGroup, Group, Student, WeeklyHourSlot};
use crate::timezones::TimezoneRegistry;
use crate::NUM_HOURS_PER_WEEK;

/// Upper bound on the number of meeting times suggested per group.
pub const MAX_SUGGESTED_SLOTS: usize = 3;

/// Decides which students end up together.
pub trait GroupingStrategy {
    /// Splits students into groups of at most `group_size` members.
    ///
    /// `availabilities[i]` is student `i` projected onto a common timezone.
    /// Returns student indices per group; every index appears exactly once.
    fn partition(&self, availabilities: &[AvailabilityVector], group_size: usize) -> Vec<Vec<usize>>;
}

/// Groups the students behind `codes` into groups of `group_size`, suggesting
/// meeting times in `output_timezone`. Uses the global registry and the
/// [`GreedyOverlap`] strategy.
pub fn create_groups<S: AsRef<str>>(
    codes: &[S],
    group_size: usize,
    output_timezone: &str,
) -> Result<Vec<Group>, ConfigurationError> {
    create_groups_with(
        TimezoneRegistry::global(),
        codes,
        group_size,
        output_timezone,
        &GreedyOverlap,
    )
}

/// Same as [`create_groups`] with an explicit registry and strategy.
pub fn create_groups_with<S: AsRef<str>>(
    registry: &TimezoneRegistry,
    codes: &[S],
    group_size: usize,
    output_timezone: &str,
    strategy: &dyn GroupingStrategy,
) -> Result<Vec<Group>, ConfigurationError> {
    if group_size < 1 {
        return Err(ConfigurationError::InvalidGroupSize(group_size));
    }
    let output = registry
        .resolve(output_timezone)
        .map_err(|_| ConfigurationError::UnknownTimezone(output_timezone.to_string()))?;

    let students: Vec<Student> = codes
        .iter()
        .filter_map(|code| Student::from_encoded_with(code.as_ref(), registry))
        .collect();
    let dropped = codes.len() - students.len();

    if students.is_empty() {
        info!(dropped, "No valid schedule codes, no groups formed");
        return Ok(Vec::new());
    }

    let projected: Vec<AvailabilityVector> = students
        .iter()
        .map(|student| student.availability_in(output, registry))
        .collect();

    let groups: Vec<Group> = strategy
        .partition(&projected, group_size)
        .into_iter()
        .map(|members| build_group(&members, &students, &projected))
        .collect();

    info!(
        students = students.len(),
        dropped,
        groups = groups.len(),
        group_size,
        output_timezone,
        "Formed groups"
    );

    Ok(groups)
}

/// Converts groups into their external form: member codes and slot labels.
pub fn display_groups(groups: &[Group]) -> Vec<DisplayGroup> {
    groups.iter().map(DisplayGroup::from).collect()
}

fn build_group(members: &[usize], students: &[Student], projected: &[AvailabilityVector]) -> Group {
    let counts = slot_counts(members.iter().map(|&i| &projected[i]));
    let (suggested_slots, best_count) = suggest_slots(&counts);
    let coverage_fraction = best_count as f64 / members.len() as f64;

    debug!(
        members = members.len(),
        best_count,
        slots = ?suggested_slots,
        "Suggested meeting slots"
    );

    Group {
        members: members.iter().map(|&i| students[i].clone()).collect(),
        suggested_slots,
        coverage_fraction,
    }
}

/// Number of members available at each hour of the week.
pub(crate) fn slot_counts<'a>(
    availabilities: impl IntoIterator<Item = &'a AvailabilityVector>,
) -> [usize; NUM_HOURS_PER_WEEK] {
    let mut counts = [0; NUM_HOURS_PER_WEEK];
    for availability in availabilities {
        for slot in availability.slots() {
            counts[slot.index()] += 1;
        }
    }
    counts
}

/// Slots tied for the highest count, earliest first, capped at
/// [`MAX_SUGGESTED_SLOTS`]. Nothing is suggested when nobody is free.
fn suggest_slots(counts: &[usize; NUM_HOURS_PER_WEEK]) -> (Vec<WeeklyHourSlot>, usize) {
    let best_count = counts.iter().copied().max().unwrap_or(0);
    if best_count == 0 {
        return (Vec::new(), 0);
    }

    let slots = counts
        .iter()
        .enumerate()
        .filter(|&(_, &count)| count == best_count)
        .filter_map(|(index, _)| WeeklyHourSlot::new(index))
        .take(MAX_SUGGESTED_SLOTS)
        .collect();

    (slots, best_count)
}
