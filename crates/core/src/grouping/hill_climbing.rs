//! Hill climbing over group assignments.
//!
//! Starts from the greedy partition and from a number of seeded random
//! partitions, then repeatedly swaps two students from different groups and
//! keeps the swap whenever the total score goes up. The best assignment found
//! wins. Runs are reproducible for a given seed.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::grouping::{slot_counts, GreedyOverlap, GroupingStrategy};
use crate::models::AvailabilityVector;

/// Runs of common hours longer than this are not rewarded further, so one
/// group cannot inflate the score at the expense of the others.
const MAX_REWARDED_CONSECUTIVE_SLOTS: usize = 4;

#[derive(Debug, Clone, Copy)]
pub struct HillClimbing {
    pub seed: u64,
    /// Random starting points tried in addition to the greedy partition.
    pub restarts: usize,
    /// Consecutive non-improving swaps before a climb gives up.
    pub patience: usize,
}

impl HillClimbing {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }
}

impl Default for HillClimbing {
    fn default() -> Self {
        Self {
            seed: 0,
            restarts: 16,
            patience: 1000,
        }
    }
}

struct Assignment {
    groups: Vec<Vec<usize>>,
    scores: Vec<usize>,
}

impl Assignment {
    fn new(groups: Vec<Vec<usize>>, availabilities: &[AvailabilityVector]) -> Self {
        let scores = groups
            .iter()
            .map(|members| score_group(members, availabilities))
            .collect();
        Self { groups, scores }
    }

    fn score(&self) -> usize {
        self.scores.iter().sum()
    }

    fn climb(&mut self, availabilities: &[AvailabilityVector], patience: usize, rng: &mut StdRng) {
        if self.groups.len() < 2 {
            return;
        }

        let mut stale = 0;
        while stale < patience {
            let first = rng.gen_range(0..self.groups.len());
            let mut second = rng.gen_range(0..self.groups.len() - 1);
            if second >= first {
                second += 1;
            }
            let a = rng.gen_range(0..self.groups[first].len());
            let b = rng.gen_range(0..self.groups[second].len());

            swap_members(&mut self.groups, (first, a), (second, b));
            let first_score = score_group(&self.groups[first], availabilities);
            let second_score = score_group(&self.groups[second], availabilities);

            if first_score + second_score > self.scores[first] + self.scores[second] {
                self.scores[first] = first_score;
                self.scores[second] = second_score;
                stale = 0;
            } else {
                swap_members(&mut self.groups, (first, a), (second, b));
                stale += 1;
            }
        }
    }
}

fn swap_members(groups: &mut [Vec<usize>], (g1, m1): (usize, usize), (g2, m2): (usize, usize)) {
    let student = groups[g1][m1];
    groups[g1][m1] = groups[g2][m2];
    groups[g2][m2] = student;
}

/// Score of a single group.
///
/// If no hour has every member free, the score is the largest number of
/// members free at once. Otherwise it is the member count times the longest
/// run of all-free hours, where runs shorter than
/// [`MAX_REWARDED_CONSECUTIVE_SLOTS`] count as one hour.
fn score_group(members: &[usize], availabilities: &[AvailabilityVector]) -> usize {
    let counts = slot_counts(members.iter().map(|&i| &availabilities[i]));
    let best = counts.iter().copied().max().unwrap_or(0);
    if best < members.len() {
        return best;
    }

    let mut longest = 0;
    let mut run = 0;
    for &count in &counts {
        run = if count == best { run + 1 } else { 0 };
        longest = longest.max(run);
    }

    let consecutive = if longest >= MAX_REWARDED_CONSECUTIVE_SLOTS {
        MAX_REWARDED_CONSECUTIVE_SLOTS
    } else {
        1
    };
    consecutive * best
}

/// Total score of a partition, as maximized by [`HillClimbing`].
pub fn score_partition(groups: &[Vec<usize>], availabilities: &[AvailabilityVector]) -> usize {
    groups
        .iter()
        .map(|members| score_group(members, availabilities))
        .sum()
}

impl GroupingStrategy for HillClimbing {
    fn partition(&self, availabilities: &[AvailabilityVector], group_size: usize) -> Vec<Vec<usize>> {
        let mut rng = StdRng::seed_from_u64(self.seed);

        let mut best = Assignment::new(GreedyOverlap.partition(availabilities, group_size), availabilities);
        best.climb(availabilities, self.patience, &mut rng);
        debug!(score = best.score(), "Climbed from greedy partition");

        for restart in 0..self.restarts {
            let mut order: Vec<usize> = (0..availabilities.len()).collect();
            order.shuffle(&mut rng);
            let groups = order.chunks(group_size).map(<[usize]>::to_vec).collect();

            let mut candidate = Assignment::new(groups, availabilities);
            candidate.climb(availabilities, self.patience, &mut rng);
            debug!(restart, score = candidate.score(), "Climbed from random partition");

            if candidate.score() > best.score() {
                best = candidate;
            }
        }

        best.groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewards_long_common_runs() {
        let availabilities = [
            AvailabilityVector::from_slots(10..16),
            AvailabilityVector::from_slots(10..16),
        ];
        assert_eq!(score_group(&[0, 1], &availabilities), 8);
    }

    #[test]
    fn short_common_runs_count_once() {
        let availabilities = [
            AvailabilityVector::from_slots([10, 11]),
            AvailabilityVector::from_slots([10, 11]),
        ];
        assert_eq!(score_group(&[0, 1], &availabilities), 2);
    }

    #[test]
    fn partial_overlap_scores_best_count() {
        let availabilities = [
            AvailabilityVector::from_slots([10]),
            AvailabilityVector::from_slots([10]),
            AvailabilityVector::from_slots([20]),
        ];
        assert_eq!(score_group(&[0, 1, 2], &availabilities), 2);
    }
}
