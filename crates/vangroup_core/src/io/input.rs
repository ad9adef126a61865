use std::{fs, io::Read, path::Path};

use serde::{Deserialize, Serialize};

use crate::{Error, Result, io::options::GrouperOptions, point::JobPoint};

/// Opaque job identifier, round-tripped from input to output untouched.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum JobId {
    Int(i64),
    Text(String),
    Other(serde_json::Value),
}

/// One geotagged job as it appears in the input file.
#[derive(Clone, Debug, Deserialize)]
pub struct JobSite {
    pub id: JobId,
    pub lon: f64,
    pub lat: f64,
}

/// The validated point set for one grouping run.
#[derive(Clone, Debug)]
pub struct GrouperInput {
    sites: Vec<JobSite>,
}

impl GrouperInput {
    pub fn new(sites: Vec<JobSite>) -> Self {
        Self { sites }
    }

    /// Reads sites from the configured input file, or stdin when none is
    /// set. An empty array is a valid, empty run.
    pub fn from_options(options: &GrouperOptions) -> Result<Self> {
        let raw = match options.input_path() {
            Some(path) => read_input_file(path)?,
            None => {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                buf
            }
        };
        Ok(Self::new(parse_sites(&raw)?))
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    pub(crate) fn points(&self) -> Vec<JobPoint> {
        self.sites
            .iter()
            .map(|site| JobPoint::from_lon_lat(site.lon, site.lat))
            .collect()
    }

    pub(crate) fn id(&self, idx: usize) -> &JobId {
        &self.sites[idx].id
    }
}

fn read_input_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        Error::invalid_input(format!("couldn't read input file {}: {e}", path.display()))
    })
}

fn parse_sites(raw: &str) -> Result<Vec<JobSite>> {
    serde_json::from_str(raw).map_err(|e| Error::invalid_input(format!("couldn't parse JSON: {e}")))
}
