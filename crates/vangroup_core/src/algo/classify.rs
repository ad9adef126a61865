use crate::group::{GroupSet, GroupSummary};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum GroupRole {
    Deficit,
    Surplus,
    Balanced,
}

pub(crate) fn ideal_size(n: usize, k: usize) -> usize {
    n / k
}

pub(crate) fn role(summary: &GroupSummary, ideal: usize) -> GroupRole {
    if summary.size < ideal {
        GroupRole::Deficit
    } else if summary.size > ideal {
        GroupRole::Surplus
    } else {
        GroupRole::Balanced
    }
}

/// Splits the current groups into the two working collections the
/// rebalancer drives: deficit group indices ordered closest-to-ideal first
/// (ties by lowest index) and surplus group indices in index order. A
/// zero-member group is just the largest possible deficit.
pub(crate) fn classify(set: &GroupSet, ideal: usize) -> (Vec<usize>, Vec<usize>) {
    let mut deficits = Vec::new();
    let mut surpluses = Vec::new();

    for summary in set.summaries() {
        match role(&summary, ideal) {
            GroupRole::Deficit => deficits.push(summary.index),
            GroupRole::Surplus => surpluses.push(summary.index),
            GroupRole::Balanced => {}
        }
    }

    deficits.sort_by_key(|&group| (ideal - set.size(group), group));
    (deficits, surpluses)
}

#[cfg(test)]
mod tests {
    use super::{GroupRole, classify, ideal_size, role};
    use crate::{group::GroupSet, point::JobPoint};

    fn set_with_sizes(sizes: &[usize]) -> GroupSet {
        let centroids: Vec<JobPoint> = (0..sizes.len())
            .map(|i| JobPoint::new(i as f64, 0.0))
            .collect();
        let mut assignment = Vec::new();
        for (group, &size) in sizes.iter().enumerate() {
            assignment.extend(std::iter::repeat(group).take(size));
        }
        GroupSet::from_assignment(&centroids, &assignment)
    }

    #[test]
    fn ideal_size_floors_the_quotient() {
        assert_eq!(ideal_size(7, 2), 3);
        assert_eq!(ideal_size(6, 2), 3);
        assert_eq!(ideal_size(5, 6), 0);
    }

    #[test]
    fn role_labels_groups_against_ideal() {
        let set = set_with_sizes(&[1, 3, 2]);
        let summaries = set.summaries();
        assert_eq!(role(&summaries[0], 2), GroupRole::Deficit);
        assert_eq!(role(&summaries[1], 2), GroupRole::Surplus);
        assert_eq!(role(&summaries[2], 2), GroupRole::Balanced);
    }

    #[test]
    fn classify_orders_deficits_closest_to_ideal_first() {
        // ideal 3: group 0 misses by 3, group 1 by 1, group 3 by 2
        let set = set_with_sizes(&[0, 2, 9, 1]);
        let (deficits, surpluses) = classify(&set, 3);
        assert_eq!(deficits, vec![1, 3, 0]);
        assert_eq!(surpluses, vec![2]);
    }

    #[test]
    fn classify_includes_zero_member_groups_as_deficits() {
        let set = set_with_sizes(&[0, 4]);
        let (deficits, surpluses) = classify(&set, 2);
        assert_eq!(deficits, vec![0]);
        assert_eq!(surpluses, vec![1]);
    }

    #[test]
    fn classify_breaks_magnitude_ties_by_lowest_group_index() {
        let set = set_with_sizes(&[1, 1, 4]);
        let (deficits, _) = classify(&set, 2);
        assert_eq!(deficits, vec![0, 1]);
    }

    #[test]
    fn classify_of_balanced_sets_is_empty() {
        let set = set_with_sizes(&[2, 2, 2]);
        let (deficits, surpluses) = classify(&set, 2);
        assert!(deficits.is_empty());
        assert!(surpluses.is_empty());
    }
}
