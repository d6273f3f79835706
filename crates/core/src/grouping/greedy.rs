use crate::grouping::GroupingStrategy;
use crate::models::AvailabilityVector;

/// Deterministic greedy partitioning.
///
/// Students are taken in input order. Each one joins the open group whose
/// shared hours overlap most with their own, lowest group index on ties. A new
/// group is started when nothing overlaps, as long as fewer than
/// `ceil(n / group_size)` groups exist; otherwise the student joins the first
/// group with room.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyOverlap;

struct OpenGroup {
    members: Vec<usize>,
    /// Hours every member is available.
    common: AvailabilityVector,
}

impl OpenGroup {
    fn new(student: usize, availability: &AvailabilityVector) -> Self {
        Self {
            members: vec![student],
            common: *availability,
        }
    }

    fn add(&mut self, student: usize, availability: &AvailabilityVector) {
        self.members.push(student);
        self.common = self.common.intersection(availability);
    }
}

impl GroupingStrategy for GreedyOverlap {
    fn partition(&self, availabilities: &[AvailabilityVector], group_size: usize) -> Vec<Vec<usize>> {
        let group_count = availabilities.len().div_ceil(group_size);
        let mut groups: Vec<OpenGroup> = Vec::with_capacity(group_count);

        for (student, availability) in availabilities.iter().enumerate() {
            let best = groups
                .iter()
                .enumerate()
                .filter(|(_, group)| group.members.len() < group_size)
                .map(|(index, group)| (index, group.common.overlap(availability)))
                .fold(None, |best, (index, overlap)| match best {
                    Some((_, best_overlap)) if best_overlap >= overlap => best,
                    _ => Some((index, overlap)),
                });

            match best {
                Some((index, overlap)) if overlap > 0 || groups.len() >= group_count => {
                    groups[index].add(student, availability);
                }
                _ => groups.push(OpenGroup::new(student, availability)),
            }
        }

        groups.into_iter().map(|group| group.members).collect()
    }
}
