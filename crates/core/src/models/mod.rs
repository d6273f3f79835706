pub mod availability;
pub mod group;
pub mod student;

pub use availability::{AvailabilityVector, WeeklyHourSlot, AVAILABILITY_BYTES};
pub use group::{DisplayGroup, Group};
pub use student::Student;
