use crate::{
    Error, Result,
    algo::{classify, kmeans, rebalance},
    group::GroupSet,
    io::input::{GrouperInput, JobId},
    io::options::GrouperOptions,
};

const ERR_INVALID_VANS: &str = "van count must be > 0";
const ERR_INVALID_POINT: &str = "input contains non-finite coordinates";

/// Final membership lists, one per van, in group-index order. Entry order
/// within a group follows the initial cluster assignment, with relocated
/// jobs appended at the position of their move.
#[derive(Clone, Debug, PartialEq)]
pub struct Grouping {
    pub groups: Vec<Vec<JobId>>,
}

/// Partitions the input jobs into `options.vans` groups: cluster, classify,
/// rebalance, verify. Configuration errors (no vans, more vans than jobs,
/// bad coordinates) surface before clustering runs; unresolved deficits at
/// termination are logged, not failed.
pub fn group_jobs(input: GrouperInput, options: &GrouperOptions) -> Result<Grouping> {
    let k = options.vans;
    if k == 0 {
        return Err(Error::invalid_input(ERR_INVALID_VANS));
    }

    let n = input.len();
    if n == 0 {
        log::info!("grouper: empty input k={k}");
        return Ok(Grouping {
            groups: vec![Vec::new(); k],
        });
    }
    if k > n {
        return Err(Error::invalid_input(format!(
            "cannot split {n} jobs across {k} vans"
        )));
    }

    let points = input.points();
    if points.iter().any(|p| !p.is_valid()) {
        return Err(Error::invalid_input(ERR_INVALID_POINT));
    }

    let ideal = classify::ideal_size(n, k);
    let (centroids, assignment) = kmeans::cluster(&points, k, options.max_iterations, options.seed);
    let mut set = GroupSet::from_assignment(&centroids, &assignment);
    set.assert_partition()?;
    log::info!("grouper: clustered n={n} k={k} ideal={ideal}");

    let report = rebalance::rebalance(&points, &mut set, ideal, options.relocation_cap)?;
    set.assert_partition()?;
    if report.unresolved.is_empty() {
        log::info!("grouper: rebalanced moves={}", report.moves);
    } else {
        log::warn!(
            "grouper: rebalanced moves={} unresolved_deficits={:?}",
            report.moves,
            report.unresolved
        );
    }

    Ok(resolve_ids(set, &input))
}

fn resolve_ids(set: GroupSet, input: &GrouperInput) -> Grouping {
    let groups = set
        .into_memberships()
        .into_iter()
        .map(|members| members.into_iter().map(|i| input.id(i).clone()).collect())
        .collect();
    Grouping { groups }
}

#[cfg(test)]
mod tests {
    use super::group_jobs;
    use crate::io::{
        input::{GrouperInput, JobId, JobSite},
        options::GrouperOptions,
    };

    fn site(id: i64, lon: f64, lat: f64) -> JobSite {
        JobSite {
            id: JobId::Int(id),
            lon,
            lat,
        }
    }

    fn options_for(vans: usize) -> GrouperOptions {
        GrouperOptions {
            vans,
            ..GrouperOptions::default()
        }
    }

    fn scenario_a_sites() -> Vec<JobSite> {
        vec![
            site(1, 0.0, 0.0),
            site(2, 0.1, 0.0),
            site(3, 10.0, 10.0),
            site(4, 10.1, 10.0),
            site(5, 0.0, 1.0),
            site(6, 20.0, 20.0),
        ]
    }

    #[test]
    fn two_vans_split_six_jobs_into_equal_groups() {
        let input = GrouperInput::new(scenario_a_sites());
        let grouping = group_jobs(input, &options_for(2)).expect("grouping");

        assert_eq!(grouping.groups.len(), 2);
        let mut sizes: Vec<usize> = grouping.groups.iter().map(|g| g.len()).collect();
        sizes.sort_unstable();
        assert_eq!(sizes, vec![3, 3]);

        // partition: every id present exactly once
        let mut ids: Vec<&JobId> = grouping.groups.iter().flatten().collect();
        ids.sort_by_key(|id| match id {
            JobId::Int(v) => *v,
            _ => i64::MAX,
        });
        ids.dedup();
        assert_eq!(ids.len(), 6);
    }

    #[test]
    fn one_van_takes_every_job() {
        let input = GrouperInput::new(scenario_a_sites());
        let grouping = group_jobs(input, &options_for(1)).expect("grouping");

        assert_eq!(grouping.groups.len(), 1);
        assert_eq!(grouping.groups[0].len(), 6);
    }

    #[test]
    fn empty_input_yields_empty_groups_without_error() {
        let input = GrouperInput::new(Vec::new());
        let grouping = group_jobs(input, &options_for(3)).expect("grouping");
        assert_eq!(grouping.groups, vec![Vec::new(), Vec::new(), Vec::new()]);
    }

    #[test]
    fn more_vans_than_jobs_is_a_configuration_error() {
        let input = GrouperInput::new(vec![site(1, 0.0, 0.0), site(2, 1.0, 1.0)]);
        let err = group_jobs(input, &options_for(3)).expect_err("must fail");
        assert!(err.to_string().contains("cannot split 2 jobs across 3 vans"));
    }

    #[test]
    fn zero_vans_is_a_configuration_error() {
        let input = GrouperInput::new(scenario_a_sites());
        let err = group_jobs(input, &options_for(0)).expect_err("must fail");
        assert!(err.to_string().contains("van count must be > 0"));
    }

    #[test]
    fn non_finite_coordinates_are_rejected() {
        let input = GrouperInput::new(vec![site(1, f64::NAN, 0.0), site(2, 1.0, 1.0)]);
        let err = group_jobs(input, &options_for(1)).expect_err("must fail");
        assert!(err.to_string().contains("non-finite coordinates"));
    }

    #[test]
    fn repeated_runs_produce_identical_groupings() {
        let options = options_for(2);
        let first =
            group_jobs(GrouperInput::new(scenario_a_sites()), &options).expect("first run");
        let second =
            group_jobs(GrouperInput::new(scenario_a_sites()), &options).expect("second run");
        assert_eq!(first, second);
    }

    #[test]
    fn string_ids_survive_the_round_trip() {
        let sites = vec![
            JobSite {
                id: JobId::Text("alpha".into()),
                lon: 0.0,
                lat: 0.0,
            },
            JobSite {
                id: JobId::Text("beta".into()),
                lon: 0.1,
                lat: 0.1,
            },
        ];
        let grouping = group_jobs(GrouperInput::new(sites), &options_for(1)).expect("grouping");
        assert_eq!(
            grouping.groups[0],
            vec![JobId::Text("alpha".into()), JobId::Text("beta".into())]
        );
    }
}
