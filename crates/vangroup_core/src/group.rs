use crate::{Error, Result, point::JobPoint};

/// One van's worth of jobs. Members are indices into the run's point slice;
/// the centroid is the one produced by the clustering pass and stays fixed
/// while membership moves around.
#[derive(Clone, Debug)]
pub struct Group {
    pub(crate) centroid: JobPoint,
    pub(crate) members: Vec<usize>,
}

/// Transient classification view of a group. Recomputed whenever it is
/// needed, never patched in place.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroupSummary {
    pub index: usize,
    pub centroid: JobPoint,
    pub size: usize,
}

/// The full partition of points into `k` groups. All membership mutation
/// goes through [`GroupSet::move_member`], so a point can never be
/// duplicated or dropped by accident.
#[derive(Clone, Debug)]
pub struct GroupSet {
    groups: Vec<Group>,
    n_points: usize,
}

impl GroupSet {
    pub(crate) fn from_assignment(centroids: &[JobPoint], assignment: &[usize]) -> Self {
        let mut groups: Vec<Group> = centroids
            .iter()
            .map(|&centroid| Group {
                centroid,
                members: Vec::new(),
            })
            .collect();
        for (point, &group) in assignment.iter().enumerate() {
            groups[group].members.push(point);
        }
        Self {
            groups,
            n_points: assignment.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub(crate) fn size(&self, group: usize) -> usize {
        self.groups[group].members.len()
    }

    pub(crate) fn centroid(&self, group: usize) -> JobPoint {
        self.groups[group].centroid
    }

    pub(crate) fn members(&self, group: usize) -> &[usize] {
        &self.groups[group].members
    }

    pub(crate) fn summaries(&self) -> Vec<GroupSummary> {
        self.groups
            .iter()
            .enumerate()
            .map(|(index, group)| GroupSummary {
                index,
                centroid: group.centroid,
                size: group.members.len(),
            })
            .collect()
    }

    /// Moves `point` from one group to another as a single logical step:
    /// removed from `from` (preserving the remaining order) and appended to
    /// `to`. A point that is not where the caller believes it to be means
    /// the bookkeeping has drifted, which is fatal.
    pub(crate) fn move_member(&mut self, from: usize, to: usize, point: usize) -> Result<()> {
        let members = &mut self.groups[from].members;
        let Some(pos) = members.iter().position(|&m| m == point) else {
            return Err(Error::internal(format!(
                "point {point} not found in group {from}"
            )));
        };
        members.remove(pos);
        self.groups[to].members.push(point);
        Ok(())
    }

    /// Verifies the partition invariant: every point index appears in
    /// exactly one group. A violation is an implementation bug, never a
    /// runtime condition, so it stops the run.
    pub(crate) fn assert_partition(&self) -> Result<()> {
        let mut seen = vec![false; self.n_points];
        let mut total = 0usize;
        for group in &self.groups {
            for &point in &group.members {
                if point >= self.n_points {
                    return Err(Error::internal(format!(
                        "point index {point} out of range (n={})",
                        self.n_points
                    )));
                }
                if seen[point] {
                    return Err(Error::internal(format!(
                        "point {point} appears in more than one group"
                    )));
                }
                seen[point] = true;
                total += 1;
            }
        }
        if total != self.n_points {
            return Err(Error::internal(format!(
                "point count drifted: groups hold {total}, expected {}",
                self.n_points
            )));
        }
        Ok(())
    }

    pub(crate) fn into_memberships(self) -> Vec<Vec<usize>> {
        self.groups.into_iter().map(|group| group.members).collect()
    }
}
