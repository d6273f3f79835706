use serde::{Deserialize, Serialize};

use crate::models::{Student, WeeklyHourSlot};

/// A group of students, along with suggested meeting times.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    /// Members in the order they joined the group.
    pub members: Vec<Student>,

    /// Hours of the week, in the output timezone, when the most members are available.
    /// Ordered from earliest in the week. Not every member is guaranteed to be free then.
    pub suggested_slots: Vec<WeeklyHourSlot>,

    /// Share of members available at the first suggested slot, in `[0, 1]`.
    pub coverage_fraction: f64,
}

impl Group {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Externally serialized form of a [`Group`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayGroup {
    /// Schedule codes of the members.
    pub students: Vec<String>,

    /// Labels such as `Tuesday at 3 PM`, in the output timezone.
    pub suggested_meet_times: Vec<String>,

    pub percent_at_suggested_times: f64,
}

impl From<&Group> for DisplayGroup {
    fn from(group: &Group) -> Self {
        Self {
            students: group.members.iter().map(Student::encode).collect(),
            suggested_meet_times: group.suggested_slots.iter().map(|slot| slot.label()).collect(),
            percent_at_suggested_times: group.coverage_fraction,
        }
    }
}
