use std::fs::File;
use std::io::Write;

use env_logger::{Builder, Target, WriteStyle};

use crate::io::options::{LogFormat, SolverOptions};
use crate::{Error, Result};

/// Installs the process-wide logger for the tour pipeline. Records go to
/// stderr unless `--log-output` names a file; color is never used so the
/// output stays grep-friendly when piped into one.
pub fn init_logger(options: &SolverOptions) -> Result<()> {
    let format = options.log_format;
    let stamped = options.log_timestamp;

    Builder::new()
        .filter_level(options.log_level.to_filter())
        .write_style(WriteStyle::Never)
        .format(move |buf, record| {
            if stamped {
                write!(buf, "{} ", buf.timestamp_millis())?;
            }
            let level = record.level().as_str();
            match format {
                LogFormat::Compact => writeln!(buf, "{level:5} {}", record.args()),
                LogFormat::Pretty => {
                    writeln!(buf, "{level:5} [{}] {}", record.target(), record.args())
                }
            }
        })
        .target(log_target(options)?)
        .try_init()
        .map_err(|e| Error::invalid_input(format!("logger init failed: {e}")))
}

fn log_target(options: &SolverOptions) -> Result<Target> {
    let Some(path) = options.log_output_path() else {
        return Ok(Target::Stderr);
    };
    let file = File::create(path).map_err(|e| {
        Error::invalid_input(format!(
            "failed to create log output file {}: {e}",
            path.display()
        ))
    })?;
    Ok(Target::Pipe(Box::new(file)))
}

#[cfg(test)]
mod tests {
    use super::log_target;
    use crate::io::options::SolverOptions;

    #[test]
    fn default_target_is_stderr() {
        let options = SolverOptions::default();
        assert!(log_target(&options).is_ok());
    }

    #[test]
    fn unwritable_log_file_is_reported() {
        let options = SolverOptions {
            log_output: "/no-such-dir/road-tour/run.log".to_owned(),
            ..SolverOptions::default()
        };
        assert!(log_target(&options).is_err());
    }
}
