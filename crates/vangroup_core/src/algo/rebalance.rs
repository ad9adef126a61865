use std::collections::{HashSet, VecDeque};

use crate::{
    Result,
    algo::classify,
    geometry::GroupGeometry,
    group::GroupSet,
    point::JobPoint,
};

/// Outcome of a rebalancing run. Unresolved deficits are groups still below
/// ideal size at termination; a reportable condition, not a failure.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RebalanceReport {
    pub moves: usize,
    pub unresolved: Vec<usize>,
}

/// Returns the surplus group whose centroid lies closest to the deficit
/// group's centroid, ties to the lowest group index. `None` when the set is
/// empty. The surplus set itself is never mutated here; retention decisions
/// belong to the orchestrator.
pub(crate) fn nearest_surplus(
    set: &GroupSet,
    deficit: usize,
    surpluses: &[usize],
) -> Option<usize> {
    let target = set.centroid(deficit);
    let mut best: Option<(usize, f64)> = None;
    for &surplus in surpluses {
        let d = set.centroid(surplus).dist(&target);
        let better = match best {
            None => true,
            Some((best_group, best_d)) => d < best_d || (d == best_d && surplus < best_group),
        };
        if better {
            best = Some((surplus, d));
        }
    }
    best.map(|(group, _)| group)
}

/// Moves boundary points from `surplus` into `deficit` under the geometric
/// admission test. The pairing distance `D` between the two centroids is
/// fixed up front; a candidate is admitted only if it sits strictly closer
/// to the deficit centroid than `D`. Each candidate is inspected at most
/// once: moved points leave the surplus group, rejected points merely leave
/// the candidate set for the rest of this pairing.
///
/// `cap` bounds the number of candidate inspections; hitting it counts as
/// pairing exhaustion, not an error.
pub(crate) fn relocate(
    points: &[JobPoint],
    set: &mut GroupSet,
    deficit: usize,
    surplus: usize,
    ideal: usize,
    cap: usize,
) -> Result<usize> {
    let deficit_centroid = set.centroid(deficit);
    let surplus_centroid = set.centroid(surplus);
    let pairing_dist = surplus_centroid.dist(&deficit_centroid);

    let mut candidates: Vec<usize> = set.members(surplus).to_vec();
    let mut moves = 0usize;
    let mut inspected = 0usize;

    while set.size(deficit) < ideal && set.size(surplus) > ideal && !candidates.is_empty() {
        if inspected >= cap {
            log::debug!(
                "relocate: cap reached deficit={deficit} surplus={surplus} inspected={inspected}"
            );
            break;
        }
        inspected += 1;

        let pos = match GroupGeometry::farthest_of_indices(points, &candidates, surplus_centroid) {
            Some(pos) => pos,
            None => break,
        };
        let point = candidates.swap_remove(pos);

        if points[point].dist(&deficit_centroid) < pairing_dist {
            set.move_member(surplus, deficit, point)?;
            moves += 1;
        }
    }

    log::debug!(
        "relocate: done deficit={deficit} surplus={surplus} moves={moves} inspected={inspected}"
    );
    Ok(moves)
}

/// Drives the deficit/surplus pairing loop until no improvement is
/// possible. Deficits are serviced closest-to-ideal first; a deficit left
/// unfilled by one surplus is retried only against surpluses it has not
/// faced yet. Never fails on unresolvable deficits; those come back in the
/// report.
pub(crate) fn rebalance(
    points: &[JobPoint],
    set: &mut GroupSet,
    ideal: usize,
    cap: usize,
) -> Result<RebalanceReport> {
    let (deficits, mut surpluses) = classify::classify(set, ideal);
    let mut deficits: VecDeque<usize> = deficits.into();
    let mut attempted: HashSet<(usize, usize)> = HashSet::new();
    let mut report = RebalanceReport::default();

    while let Some(deficit) = deficits.pop_front() {
        if surpluses.is_empty() {
            // nothing left to take from; every remaining deficit stays short
            report.unresolved.push(deficit);
            report.unresolved.extend(deficits.drain(..));
            break;
        }

        let untried: Vec<usize> = surpluses
            .iter()
            .copied()
            .filter(|&surplus| !attempted.contains(&(deficit, surplus)))
            .collect();
        let Some(surplus) = nearest_surplus(set, deficit, &untried) else {
            report.unresolved.push(deficit);
            continue;
        };
        attempted.insert((deficit, surplus));

        report.moves += relocate(points, set, deficit, surplus, ideal, cap)?;

        if set.size(surplus) <= ideal {
            surpluses.retain(|&group| group != surplus);
        }
        if set.size(deficit) < ideal {
            // candidates ran out against this surplus; queue the deficit for
            // a different pairing if one is still available
            let retry = surpluses
                .iter()
                .any(|&group| !attempted.contains(&(deficit, group)));
            if retry {
                deficits.push_back(deficit);
            } else {
                report.unresolved.push(deficit);
            }
        }
    }

    Ok(report)
}
