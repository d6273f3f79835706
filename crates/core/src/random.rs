//! Synthetic rosters for demos and load testing.
//!
//! Each generated student is free in a few four-hour blocks between 7 AM and
//! 11 PM local time on every day of the week, in a random timezone.

use fake::Fake;
use fake::faker::name::en::Name;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng, thread_rng};

use crate::models::{AvailabilityVector, Student};
use crate::timezones::TimezoneRegistry;
use crate::{NUM_DAYS_PER_WEEK, NUM_HOURS_PER_DAY};

const FIRST_BLOCK_HOUR: usize = 7;
const BLOCK_LEN: usize = 4;
const BLOCKS_PER_DAY: usize = 4;

/// Generates `count` random students, seeding the generator with `seed` when
/// given. Returns the students and the seed that reproduces them.
pub fn random_students(
    registry: &TimezoneRegistry,
    count: usize,
    seed: Option<u64>,
) -> (Vec<Student>, u64) {
    let seed = seed.unwrap_or_else(|| thread_rng().next_u64());
    let mut rng = StdRng::seed_from_u64(seed);
    let timezones = registry.list_timezones();

    let mut students = Vec::with_capacity(count);
    while students.len() < count {
        let name: String = Name().fake_with_rng(&mut rng);
        let Some(&timezone) = timezones.choose(&mut rng) else {
            break;
        };
        let availability = random_week_availability(&mut rng);

        if let Ok(student) = Student::from_parts(&name, timezone, availability) {
            students.push(student);
        }
    }

    (students, seed)
}

fn random_week_availability<R: Rng>(rng: &mut R) -> AvailabilityVector {
    let mut availability = AvailabilityVector::empty();
    for day in 0..NUM_DAYS_PER_WEEK {
        for block in 0..BLOCKS_PER_DAY {
            if rng.gen_bool(0.5) {
                let start = day * NUM_HOURS_PER_DAY + FIRST_BLOCK_HOUR + block * BLOCK_LEN;
                for slot in start..start + BLOCK_LEN {
                    availability.set(slot, true);
                }
            }
        }
    }
    availability
}
