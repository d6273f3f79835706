use std::fmt;

use bitvec::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::{NUM_DAYS_PER_WEEK, NUM_HOURS_PER_DAY, NUM_HOURS_PER_WEEK};

/// Number of bytes needed to pack one week of hourly availability.
pub const AVAILABILITY_BYTES: usize = NUM_HOURS_PER_WEEK / 8;

type AvailabilityBits = BitArr!(for NUM_HOURS_PER_WEEK, in u8, Lsb0);

const DAY_NAMES: [&str; NUM_DAYS_PER_WEEK] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// One bit per hour of the week, in the wall clock of a single timezone.
///
/// Index 0 is Monday 12 AM, index 167 is Sunday 11 PM. The week is circular:
/// the hour after index 167 is index 0.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct AvailabilityVector {
    bits: AvailabilityBits,
}

impl AvailabilityVector {
    /// A week with no available hours.
    pub fn empty() -> Self {
        Self {
            bits: BitArray::new([0; AVAILABILITY_BYTES]),
        }
    }

    /// A week where every hour is available.
    pub fn full() -> Self {
        Self {
            bits: BitArray::new([u8::MAX; AVAILABILITY_BYTES]),
        }
    }

    /// Builds a vector from the given available slots. Slots outside the week wrap around.
    pub fn from_slots(slots: impl IntoIterator<Item = usize>) -> Self {
        let mut availability = Self::empty();
        for slot in slots {
            availability.set(slot % NUM_HOURS_PER_WEEK, true);
        }
        availability
    }

    /// Parses a string of exactly 168 `'0'`/`'1'` characters.
    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        let actual = text.chars().count();
        if actual != NUM_HOURS_PER_WEEK {
            return Err(ValidationError::InvalidAvailabilityLength { actual });
        }

        let mut availability = Self::empty();
        for (index, character) in text.chars().enumerate() {
            match character {
                '1' => availability.set(index, true),
                '0' => {}
                _ => {
                    return Err(ValidationError::InvalidAvailabilityCharacter { index, character });
                }
            }
        }
        Ok(availability)
    }

    pub fn from_bytes(bytes: [u8; AVAILABILITY_BYTES]) -> Self {
        Self {
            bits: BitArray::new(bytes),
        }
    }

    pub fn to_bytes(&self) -> [u8; AVAILABILITY_BYTES] {
        self.bits.into_inner()
    }

    pub fn get(&self, slot: usize) -> bool {
        self.bits[slot]
    }

    pub fn set(&mut self, slot: usize, available: bool) {
        self.bits.set(slot, available);
    }

    /// Number of available hours.
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Hours available in both vectors.
    pub fn intersection(&self, other: &Self) -> Self {
        let mut bytes = self.to_bytes();
        for (byte, other) in bytes.iter_mut().zip(other.to_bytes()) {
            *byte &= other;
        }
        Self::from_bytes(bytes)
    }

    /// Number of hours available in both vectors.
    pub fn overlap(&self, other: &Self) -> usize {
        self.intersection(other).count()
    }

    /// Circular shift towards later hours: `output[i] = input[(i - delta) mod 168]`.
    ///
    /// Negative deltas shift towards earlier hours.
    pub fn rotated(&self, delta: i32) -> Self {
        let shift = (delta as i64).rem_euclid(NUM_HOURS_PER_WEEK as i64) as usize;
        let mut bits = self.bits;
        bits[..NUM_HOURS_PER_WEEK].rotate_right(shift);
        Self { bits }
    }

    /// Indices of available hours, in ascending order.
    pub fn slots(&self) -> impl Iterator<Item = WeeklyHourSlot> + '_ {
        self.bits.iter_ones().map(WeeklyHourSlot)
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().by_vals()
    }
}

impl Default for AvailabilityVector {
    fn default() -> Self {
        Self::empty()
    }
}

/// Renders as 168 `'0'`/`'1'` characters.
impl fmt::Display for AvailabilityVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for available in self.iter() {
            f.write_str(if available { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl fmt::Debug for AvailabilityVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AvailabilityVector")
            .field("slots", &self.slots().map(|s| s.index()).collect::<Vec<_>>())
            .finish()
    }
}

/// An hour of the week in some timezone's wall clock. 0 = Monday at 12 AM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklyHourSlot(usize);

impl WeeklyHourSlot {
    /// Returns `None` if `index` is not inside the week.
    pub fn new(index: usize) -> Option<Self> {
        (index < NUM_HOURS_PER_WEEK).then_some(Self(index))
    }

    pub fn index(self) -> usize {
        self.0
    }

    /// 0 = Monday.
    pub fn day(self) -> usize {
        self.0 / NUM_HOURS_PER_DAY
    }

    pub fn hour_of_day(self) -> usize {
        self.0 % NUM_HOURS_PER_DAY
    }

    /// Human readable label, e.g. `Monday at 12 AM` or `Friday at 3 PM`.
    pub fn label(self) -> String {
        let hour = self.hour_of_day();
        let hour_display = match hour {
            0 => "12 AM".to_string(),
            12 => "12 PM".to_string(),
            h if h > 12 => format!("{} PM", h - 12),
            h => format!("{h} AM"),
        };
        format!("{} at {hour_display}", DAY_NAMES[self.day()])
    }
}

impl fmt::Display for WeeklyHourSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}
