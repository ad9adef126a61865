use std::{env, fmt, path::Path};

use log::LevelFilter;

use crate::{Error, Result};

/// Runtime options for one grouping run.
#[derive(Clone, Debug)]
pub struct GrouperOptions {
    /// Number of vans running today. Required; zero means unset.
    pub vans: usize,
    /// Iteration cap for the initial clustering pass.
    pub max_iterations: usize,
    /// Seed for centroid initialization, fixed so runs are reproducible.
    pub seed: u64,
    /// Defensive cap on candidate inspections per deficit/surplus pairing.
    pub relocation_cap: usize,
    /// Structured logging level.
    pub log_level: LogLevel,
    /// Logging output format.
    pub log_format: LogFormat,
    /// Include timestamps in log lines.
    pub log_timestamp: bool,
    /// Optional output file path for logs. Empty means stderr.
    pub log_output: String,
    /// Optional input file path for jobs. Empty means stdin.
    pub input: String,
    /// Optional output file path for the groups. Empty means stdout.
    pub output: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
    Off,
}

impl LogLevel {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            "off" => Ok(Self::Off),
            _ => Err(Error::invalid_input(format!(
                "Invalid value for --log-level: {raw} (expected error|warn|info|debug|trace|off)"
            ))),
        }
    }

    pub fn to_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
            Self::Off => LevelFilter::Off,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
            Self::Off => "off",
        };
        write!(f, "{value}")
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LogFormat {
    Compact,
    Pretty,
}

impl LogFormat {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            _ => Err(Error::invalid_input(format!(
                "Invalid value for --log-format: {raw} (expected compact|pretty)"
            ))),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Self::Compact => "compact",
            Self::Pretty => "pretty",
        };
        write!(f, "{value}")
    }
}

impl Default for GrouperOptions {
    fn default() -> Self {
        Self {
            vans: 0,
            max_iterations: 2_000,
            seed: 999,
            relocation_cap: 100_000,
            log_level: LogLevel::Warn,
            log_format: LogFormat::Compact,
            log_timestamp: true,
            log_output: String::new(),
            input: String::new(),
            output: String::new(),
        }
    }
}

impl GrouperOptions {
    pub fn from_args() -> Result<Self> {
        Self::parse_from_iter(env::args().skip(1))
    }

    fn parse_from_iter<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Self::default();
        let mut args = args
            .into_iter()
            .map(|arg| arg.as_ref().to_owned())
            .peekable();

        while let Some(arg) = args.next() {
            if arg == "--help" || arg == "-h" {
                return Err(Error::invalid_input(Self::usage()));
            }

            let Some(raw_name) = arg.strip_prefix("--") else {
                return Err(Error::invalid_input(format!(
                    "Unexpected argument: {arg}\n\n{}",
                    Self::usage()
                )));
            };

            if raw_name.is_empty() {
                return Err(Error::invalid_input(format!(
                    "Invalid option name: {arg}\n\n{}",
                    Self::usage()
                )));
            }

            let (name, value) = split_arg(raw_name, &mut args);

            match name.as_str() {
                "vans" => {
                    options.vans = parse_value::<usize>(&name, value)?;
                }
                "max-iterations" => {
                    options.max_iterations = parse_value::<usize>(&name, value)?;
                }
                "seed" => {
                    options.seed = parse_value::<u64>(&name, value)?;
                }
                "relocation-cap" => {
                    options.relocation_cap = parse_value::<usize>(&name, value)?;
                }
                "log-level" => {
                    let raw = require_value(&name, value)?;
                    options.log_level = LogLevel::parse(&raw)?;
                }
                "log-format" => {
                    let raw = require_value(&name, value)?;
                    options.log_format = LogFormat::parse(&raw)?;
                }
                "log-timestamp" => {
                    options.log_timestamp = match value {
                        Some(v) => parse_bool(&name, &v)?,
                        None => true,
                    };
                }
                "no-log-timestamp" => {
                    if value.is_some() {
                        return Err(Error::invalid_input(format!(
                            "Flag --{name} does not take a value"
                        )));
                    }
                    options.log_timestamp = false;
                }
                "log-output" => {
                    options.log_output = require_value(&name, value)?;
                }
                "input" => {
                    options.input = require_value(&name, value)?;
                }
                "output" => {
                    options.output = require_value(&name, value)?;
                }
                _ => {
                    return Err(Error::invalid_input(format!(
                        "Unknown option: --{name}\n\n{}",
                        Self::usage()
                    )));
                }
            }
        }

        if options.vans == 0 {
            return Err(Error::invalid_input(format!(
                "Missing required option --vans\n\n{}",
                Self::usage()
            )));
        }

        Ok(options)
    }

    pub fn usage() -> &'static str {
        concat!(
            "Usage:\n",
            "  vangroup --vans <count> [options] < jobs.json\n",
            "  vangroup --vans <count> --input jobs.json --output groups.json\n\n",
            "Options:\n",
            "  --vans <usize>            Number of vans running today (required)\n",
            "  --max-iterations <usize>  Clustering iteration cap (default 2000)\n",
            "  --seed <u64>              Centroid initialization seed\n",
            "  --relocation-cap <usize>  Per-pairing relocation inspection cap\n",
            "  --log-level <error|warn|info|debug|trace|off>\n",
            "  --log-format <compact|pretty>\n",
            "  --log-timestamp[=<bool>]\n",
            "  --no-log-timestamp\n",
            "  --log-output <path>\n",
            "  --input <path>\n",
            "  --output <path>\n",
            "  --help\n",
            "\n",
            "Examples:\n",
            "  vangroup --vans 4 < jobs.json\n",
            "  vangroup --vans 4 --input jobs.json --output groups.json\n",
            "  vangroup --vans 8 --log-level=info --log-output run.log < jobs.json\n",
        )
    }

    pub fn log_output_path(&self) -> Option<&Path> {
        non_empty_path(&self.log_output)
    }

    pub fn input_path(&self) -> Option<&Path> {
        non_empty_path(&self.input)
    }

    pub fn output_path(&self) -> Option<&Path> {
        non_empty_path(&self.output)
    }
}

impl fmt::Display for GrouperOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            concat!(
                "\n\tvans           = {}",
                "\n\tmax_iterations = {}",
                "\n\tseed           = {}",
                "\n\trelocation_cap = {}",
                "\n\tlog_level      = {}",
                "\n\tlog_format     = {}",
                "\n\tlog_timestamp  = {}",
                "\n\tlog_output     = {}",
                "\n\tinput          = {}",
                "\n\toutput         = {}",
            ),
            self.vans,
            self.max_iterations,
            self.seed,
            self.relocation_cap,
            self.log_level,
            self.log_format,
            self.log_timestamp,
            self.log_output,
            self.input,
            self.output,
        )
    }
}

fn non_empty_path(raw: &str) -> Option<&Path> {
    let raw = raw.trim();
    if raw.is_empty() || raw == "-" {
        None
    } else {
        Some(Path::new(raw))
    }
}

fn require_value(name: &str, value: Option<String>) -> Result<String> {
    value.ok_or_else(|| Error::invalid_input(format!("Missing value for --{name}")))
}

fn parse_value<T>(name: &str, value: Option<String>) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    let raw = require_value(name, value)?;
    raw.parse::<T>()
        .map_err(|e| Error::invalid_input(format!("Invalid value for --{name}: {raw} ({e})")))
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value {
        "1" | "true" | "TRUE" | "True" | "yes" | "YES" | "on" | "ON" => Ok(true),
        "0" | "false" | "FALSE" | "False" | "no" | "NO" | "off" | "OFF" => Ok(false),
        _ => Err(Error::invalid_input(format!(
            "Invalid boolean for --{name}: {value} (expected true/false)"
        ))),
    }
}

fn split_arg(
    raw_name: &str,
    args: &mut std::iter::Peekable<impl Iterator<Item = String>>,
) -> (String, Option<String>) {
    if let Some((k, v)) = raw_name.split_once('=') {
        return (k.to_string(), Some(v.to_string()));
    }

    let value = match args.peek() {
        Some(next) if !next.starts_with("--") => args.next(),
        _ => None,
    };

    (raw_name.to_string(), value)
}
