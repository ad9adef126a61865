use crate::point::JobPoint;

pub(crate) struct GroupGeometry;

impl GroupGeometry {
    pub(crate) fn centroid_of_indices(points: &[JobPoint], idxs: &[usize]) -> JobPoint {
        let mut sx = 0.0;
        let mut sy = 0.0;
        for &i in idxs {
            sx += points[i].x;
            sy += points[i].y;
        }
        let n = idxs.len().max(1) as f64;
        JobPoint::new(sx / n, sy / n)
    }

    /// Position in `idxs` of the member farthest from `origin`.
    /// Distance ties resolve to the lowest point index.
    pub(crate) fn farthest_of_indices(
        points: &[JobPoint],
        idxs: &[usize],
        origin: JobPoint,
    ) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (pos, &i) in idxs.iter().enumerate() {
            let d = points[i].dist(&origin);
            let better = match best {
                None => true,
                Some((best_pos, best_d)) => d > best_d || (d == best_d && i < idxs[best_pos]),
            };
            if better {
                best = Some((pos, d));
            }
        }
        best.map(|(pos, _)| pos)
    }
}
