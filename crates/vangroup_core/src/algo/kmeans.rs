use rand::{SeedableRng, rngs::StdRng, seq::index};
use rayon::prelude::*;

use crate::{geometry::GroupGeometry, point::JobPoint};

/// Iterative centroid-based clustering (Lloyd's algorithm) producing the
/// initial, usually unbalanced, grouping.
///
/// Deterministic for a given point slice, `k`, and `seed`: initial centroids
/// are a seeded sample of `k` distinct points, assignment ties go to the
/// lowest centroid index, and a cluster that loses all of its points keeps
/// its previous centroid. Stops once the assignment reaches a fixed point or
/// after `max_iterations` refinement rounds.
///
/// Requires `0 < k <= points.len()`; callers validate before clustering.
pub(crate) fn cluster(
    points: &[JobPoint],
    k: usize,
    max_iterations: usize,
    seed: u64,
) -> (Vec<JobPoint>, Vec<usize>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut centroids: Vec<JobPoint> = index::sample(&mut rng, points.len(), k)
        .iter()
        .map(|i| points[i])
        .collect();

    let mut assignment = assign(points, &centroids);

    for iteration in 0..max_iterations {
        recompute_centroids(points, &assignment, &mut centroids);

        let next = assign(points, &centroids);
        if next == assignment {
            log::debug!("cluster: converged k={k} iterations={}", iteration + 1);
            return (centroids, assignment);
        }
        assignment = next;
    }

    log::debug!("cluster: iteration cap reached k={k} max_iterations={max_iterations}");
    (centroids, assignment)
}

fn assign(points: &[JobPoint], centroids: &[JobPoint]) -> Vec<usize> {
    points
        .par_iter()
        .map(|point| nearest_centroid(*point, centroids))
        .collect()
}

fn nearest_centroid(point: JobPoint, centroids: &[JobPoint]) -> usize {
    let mut best = 0usize;
    let mut best_dist = point.dist(&centroids[0]);
    for (idx, centroid) in centroids.iter().enumerate().skip(1) {
        let d = point.dist(centroid);
        // strict `<` keeps the lowest index on exact ties
        if d < best_dist {
            best = idx;
            best_dist = d;
        }
    }
    best
}

fn recompute_centroids(points: &[JobPoint], assignment: &[usize], centroids: &mut [JobPoint]) {
    let mut buckets: Vec<Vec<usize>> = vec![Vec::new(); centroids.len()];
    for (point, &group) in assignment.iter().enumerate() {
        buckets[group].push(point);
    }
    for (group, bucket) in buckets.iter().enumerate() {
        if !bucket.is_empty() {
            centroids[group] = GroupGeometry::centroid_of_indices(points, bucket);
        }
    }
}
