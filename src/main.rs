use std::time::Instant;

use log::info;

use vangroup_core::{GrouperInput, GrouperOptions, Result, group_jobs, logging, write_grouping};

fn main() -> Result<()> {
    let now = Instant::now();
    let options = GrouperOptions::from_args()?;
    logging::init_logger(&options)?;
    let input = GrouperInput::from_options(&options)?;

    info!("input: n={}", input.len());
    info!("options: {options}");

    let grouping = group_jobs(input, &options)?;
    write_grouping(&grouping, &options)?;

    info!(
        "output: groups={} time={:.2}s",
        grouping.groups.len(),
        now.elapsed().as_secs_f32()
    );

    Ok(())
}
