//! Balanced geographic grouping of job locations for daily van routing.
//! Clusters jobs into `k` groups, then rebalances boundary points so group
//! sizes land as close as possible to `N / k` without losing coherence.

mod algo;
mod error;
mod geo;
mod group;
mod io;
pub mod logging;
mod point;

pub(crate) use geo::geometry;

pub use algo::grouper::{Grouping, group_jobs};
pub use algo::rebalance::RebalanceReport;
pub use error::{Error, Result};
pub use group::{Group, GroupSet, GroupSummary};
pub use io::input::{GrouperInput, JobId, JobSite};
pub use io::options::{GrouperOptions, LogFormat, LogLevel};
pub use io::output::write_grouping;
pub use point::JobPoint;
