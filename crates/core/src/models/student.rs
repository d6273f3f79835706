use crate::errors::ValidationError;
use crate::models::AvailabilityVector;
use crate::projection;
use crate::timezones::{TimezoneId, TimezoneRegistry};

/// A student and the hours they are available to meet in a typical week.
///
/// Immutable once built. Availability is always expressed in the student's
/// own timezone; use [`Student::availability_in`] to view it elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Student {
    name: String,
    timezone: TimezoneId,
    availability: AvailabilityVector,
}

impl Student {
    /// Creates a student from a name, a timezone name (one of [`crate::list_timezones`])
    /// and a string of 168 `'0'`/`'1'` characters starting Monday at 12 AM local time.
    pub fn new(name: &str, timezone: &str, availability: &str) -> Result<Self, ValidationError> {
        Self::with_registry(TimezoneRegistry::global(), name, timezone, availability)
    }

    /// Same as [`Student::new`], resolving the timezone against `registry`.
    pub fn with_registry(
        registry: &TimezoneRegistry,
        name: &str,
        timezone: &str,
        availability: &str,
    ) -> Result<Self, ValidationError> {
        let availability = AvailabilityVector::parse(availability)?;
        let timezone = registry.resolve(timezone)?;
        Self::from_parts(name, timezone, availability)
    }

    /// Builds a student from already typed parts.
    pub fn from_parts(
        name: &str,
        timezone: TimezoneId,
        availability: AvailabilityVector,
    ) -> Result<Self, ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }

        Ok(Self {
            name: name.to_string(),
            timezone,
            availability,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// IANA name of the timezone the availability was recorded in.
    pub fn timezone(&self) -> &'static str {
        TimezoneRegistry::global().name(self.timezone)
    }

    pub fn timezone_id(&self) -> TimezoneId {
        self.timezone
    }

    /// Availability in the student's own timezone.
    pub fn availability(&self) -> &AvailabilityVector {
        &self.availability
    }

    /// Availability as observed from `timezone`.
    pub fn availability_in(&self, timezone: TimezoneId, registry: &TimezoneRegistry) -> AvailabilityVector {
        projection::project(&self.availability, self.timezone, timezone, registry)
    }

    /// Availability in `timezone` as 168 `'0'`/`'1'` characters, or `None` if
    /// the timezone is unknown.
    pub fn availability_in_timezone(&self, timezone: &str) -> Option<String> {
        let registry = TimezoneRegistry::global();
        let timezone = registry.resolve(timezone).ok()?;
        Some(self.availability_in(timezone, registry).to_string())
    }
}
