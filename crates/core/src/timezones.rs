//! # Timezone Registry
//!
//! Catalogue of every IANA timezone known to `chrono-tz`, sorted by name so the
//! position of a timezone is stable and can be used as a compact index inside
//! schedule codes.
//!
//! The catalogue also has a fingerprint, a CRC-32 of every name in order.
//! Schedule codes mix it into their checksum, so a code written against a
//! different catalogue (for example after a `chrono-tz` upgrade shifted the
//! indices) is rejected instead of landing in the wrong timezone.
//!
//! Offsets are sampled once, at the registry's reference instant, and rounded
//! to whole hours. The global registry uses the instant of its first use, so
//! encoding, decoding and grouping agree with each other for the whole process.
//! Weeks that straddle a daylight-saving transition are therefore projected
//! with a single offset.

use chrono::{DateTime, Offset, TimeZone, Utc};
use chrono_tz::{TZ_VARIANTS, Tz};
use once_cell::sync::Lazy;

use crate::errors::ValidationError;

const SECONDS_PER_HOUR: i32 = 3600;

static GLOBAL_REGISTRY: Lazy<TimezoneRegistry> = Lazy::new(|| TimezoneRegistry::new(Utc::now()));

/// Index of a timezone in the registry catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimezoneId(u16);

impl TimezoneId {
    /// Position of this timezone in the sorted catalogue.
    pub fn index(self) -> u16 {
        self.0
    }
}

/// Read-only timezone catalogue with offsets fixed at a reference instant.
#[derive(Debug, Clone)]
pub struct TimezoneRegistry {
    zones: Vec<Tz>,
    offsets: Vec<i32>,
    fingerprint: u32,
    reference: DateTime<Utc>,
}

impl TimezoneRegistry {
    /// Builds the catalogue, sampling every offset at `reference`.
    pub fn new(reference: DateTime<Utc>) -> Self {
        let mut zones: Vec<Tz> = TZ_VARIANTS.to_vec();
        zones.sort_unstable_by(|a, b| a.name().cmp(b.name()));
        zones.dedup_by(|a, b| a.name() == b.name());

        let offsets = zones
            .iter()
            .map(|tz| {
                let offset = tz.offset_from_utc_datetime(&reference.naive_utc()).fix();
                whole_hours(offset.local_minus_utc())
            })
            .collect();

        let mut hasher = crc32fast::Hasher::new();
        for tz in &zones {
            hasher.update(tz.name().as_bytes());
            hasher.update(b"\n");
        }

        Self {
            zones,
            offsets,
            fingerprint: hasher.finalize(),
            reference,
        }
    }

    /// Process-wide registry, initialized on first use.
    pub fn global() -> &'static TimezoneRegistry {
        &GLOBAL_REGISTRY
    }

    pub fn reference_instant(&self) -> DateTime<Utc> {
        self.reference
    }

    /// CRC-32 of the catalogue names, in order.
    pub fn fingerprint(&self) -> u32 {
        self.fingerprint
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// All timezones, in catalogue order.
    pub fn list_timezones(&self) -> Vec<TimezoneId> {
        (0..self.zones.len()).map(|i| TimezoneId(i as u16)).collect()
    }

    /// All timezone names, in catalogue order. Suitable for selection controls.
    pub fn names(&self) -> Vec<&'static str> {
        self.zones.iter().map(|tz| tz.name()).collect()
    }

    /// Looks up a timezone by its IANA name (e.g. `America/Los_Angeles`).
    pub fn resolve(&self, name: &str) -> Result<TimezoneId, ValidationError> {
        self.zones
            .binary_search_by(|tz| tz.name().cmp(name))
            .map(|i| TimezoneId(i as u16))
            .map_err(|_| ValidationError::UnknownTimezone(name.to_string()))
    }

    /// Returns the timezone at `index`, if it is inside the catalogue.
    pub fn get(&self, index: u16) -> Option<TimezoneId> {
        ((index as usize) < self.zones.len()).then_some(TimezoneId(index))
    }

    pub fn name(&self, tz: TimezoneId) -> &'static str {
        self.zones[tz.0 as usize].name()
    }

    /// UTC offset of `tz` at the reference instant, in whole hours.
    pub fn offset_hours(&self, tz: TimezoneId) -> i32 {
        self.offsets[tz.0 as usize]
    }
}

/// Rounds an offset in seconds to the nearest hour. Half hours round up.
fn whole_hours(seconds: i32) -> i32 {
    (seconds + SECONDS_PER_HOUR / 2).div_euclid(SECONDS_PER_HOUR)
}

/// Names of every supported timezone in the global registry.
pub fn list_timezones() -> Vec<&'static str> {
    TimezoneRegistry::global().names()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_hour_offsets() {
        assert_eq!(whole_hours(0), 0);
        assert_eq!(whole_hours(-8 * 3600), -8);
        assert_eq!(whole_hours(5 * 3600 + 1800), 6);
        assert_eq!(whole_hours(5 * 3600 + 2700), 6);
        assert_eq!(whole_hours(-(9 * 3600 + 1800)), -9);
        assert_eq!(whole_hours(3 * 3600 + 600), 3);
    }
}
