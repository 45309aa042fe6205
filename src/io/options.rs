use std::env;
use std::path::{Path, PathBuf};

use log::LevelFilter;

use crate::{Error, Result};

/// Runtime options for tour construction and export.
#[derive(Clone, Debug)]
pub struct SolverOptions {
    /// Graph document path. Empty means stdin.
    pub graph: String,
    /// Number of nodes to sample from the reduced graph.
    pub nodes: usize,
    /// Seed for the sampling shuffle.
    pub seed: u64,
    /// Position in the sampled set to start the tour from.
    pub start_index: usize,
    /// Edge-weight attribute used for all shortest-path queries.
    pub weight: String,
    /// GeoJSON output path. Empty means no artifact is written.
    pub output: String,
    /// Structured logging level.
    pub log_level: LogLevel,
    /// Logging output format.
    pub log_format: LogFormat,
    /// Include timestamps in log lines.
    pub log_timestamp: bool,
    /// Optional output file path for logs. Empty means stderr.
    pub log_output: String,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            graph: String::new(),
            nodes: 12,
            seed: 42,
            start_index: 0,
            weight: "length".to_owned(),
            output: String::new(),
            log_level: LogLevel::Info,
            log_format: LogFormat::Compact,
            log_timestamp: false,
            log_output: String::new(),
        }
    }
}

impl SolverOptions {
    pub fn from_args() -> Result<Self> {
        Self::parse_cli_args(env::args().skip(1))
    }

    fn parse_cli_args<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Self::default();
        let mut args = args.into_iter().map(|arg| arg.as_ref().to_owned());

        while let Some(arg) = args.next() {
            if arg == "--help" || arg == "-h" {
                return Err(Error::invalid_input(Self::usage()));
            }
            if arg == "--log-timestamp" {
                options.log_timestamp = true;
                continue;
            }
            let Some(name) = arg.strip_prefix("--") else {
                return Err(Error::invalid_input(format!(
                    "Unexpected argument: {arg}\n\n{}",
                    Self::usage()
                )));
            };
            let value = args.next().ok_or_else(|| {
                Error::invalid_input(format!("Missing value for --{name}\n\n{}", Self::usage()))
            })?;

            match name {
                "graph" => options.graph = value,
                "nodes" => options.nodes = parse_value(name, &value)?,
                "seed" => options.seed = parse_value(name, &value)?,
                "start-index" => options.start_index = parse_value(name, &value)?,
                "weight" => options.weight = value,
                "output" => options.output = value,
                "log-level" => options.log_level = LogLevel::parse(&value)?,
                "log-format" => options.log_format = LogFormat::parse(&value)?,
                "log-output" => options.log_output = value,
                _ => {
                    return Err(Error::invalid_input(format!(
                        "Unknown option: --{name}\n\n{}",
                        Self::usage()
                    )));
                }
            }
        }

        Ok(options)
    }

    pub fn usage() -> &'static str {
        concat!(
            "Options:\n",
            "  --graph <path>        Graph document (JSON); stdin when omitted\n",
            "  --nodes <count>       Number of nodes to sample (default 12)\n",
            "  --seed <u64>          Sampling seed (default 42)\n",
            "  --start-index <idx>   Start position within the sample (default 0)\n",
            "  --weight <attr>       Edge-weight attribute (default length)\n",
            "  --output <path>       GeoJSON artifact path; none when omitted\n",
            "  --log-level <level>   error|warn|info|debug|trace|off\n",
            "  --log-format <fmt>    compact|pretty\n",
            "  --log-timestamp       Include timestamps in log lines\n",
            "  --log-output <path>   Write logs to a file instead of stderr\n",
        )
    }

    pub fn log_output_path(&self) -> Option<&Path> {
        if self.log_output.is_empty() {
            None
        } else {
            Some(Path::new(&self.log_output))
        }
    }

    pub fn output_path(&self) -> Option<PathBuf> {
        if self.output.is_empty() {
            None
        } else {
            Some(PathBuf::from(&self.output))
        }
    }
}

fn parse_value<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| Error::invalid_input(format!("Invalid value for --{name}: {value}")))
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
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            "off" => Ok(Self::Off),
            _ => Err(Error::invalid_input(format!(
                "Invalid value for --log-level: {value}"
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

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LogFormat {
    Compact,
    Pretty,
}

impl LogFormat {
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            _ => Err(Error::invalid_input(format!(
                "Invalid value for --log-format: {value}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{LogFormat, LogLevel, SolverOptions};

    #[test]
    fn defaults_match_the_documented_values() {
        let options = SolverOptions::default();
        assert_eq!(options.nodes, 12);
        assert_eq!(options.seed, 42);
        assert_eq!(options.weight, "length");
        assert!(options.output_path().is_none());
        assert!(options.log_output_path().is_none());
    }

    #[test]
    fn parses_core_flags() {
        let options = SolverOptions::parse_cli_args([
            "--graph",
            "ankara.json",
            "--nodes",
            "20",
            "--seed",
            "7",
            "--output",
            "tour.geojson",
            "--log-level",
            "debug",
            "--log-format",
            "pretty",
            "--log-timestamp",
        ])
        .expect("parse args");

        assert_eq!(options.graph, "ankara.json");
        assert_eq!(options.nodes, 20);
        assert_eq!(options.seed, 7);
        assert_eq!(options.output, "tour.geojson");
        assert_eq!(options.log_level, LogLevel::Debug);
        assert_eq!(options.log_format, LogFormat::Pretty);
        assert!(options.log_timestamp);
    }

    #[test]
    fn help_returns_usage_error() {
        assert!(SolverOptions::parse_cli_args(["--help"]).is_err());
    }

    #[test]
    fn unknown_option_is_rejected() {
        assert!(SolverOptions::parse_cli_args(["--no-such-flag", "1"]).is_err());
    }

    #[test]
    fn invalid_number_is_rejected() {
        assert!(SolverOptions::parse_cli_args(["--nodes", "many"]).is_err());
    }
}
