//! Log wiring
//!
//! The core emits `tracing` events; the binary decides where they go. The
//! destination is written the same way as a shell redirect: `>>path`
//! appends, `>path` or a bare `path` truncates.

use crate::error::{BasesError, BasesResult};
use std::convert::Infallible;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Mutex;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "warn";

/// Where log events are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Nowhere; used by the terminal UI when no file is configured.
    Off,
    Stderr,
    File { path: PathBuf, append: bool },
}

impl FromStr for LogTarget {
    type Err = Infallible;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let spec = spec.trim();
        let (path, append) = if let Some(rest) = spec.strip_prefix(">>") {
            (rest, true)
        } else if let Some(rest) = spec.strip_prefix('>') {
            (rest, false)
        } else {
            (spec, false)
        };

        let path = path.trim_start();
        if path.is_empty() {
            return Ok(LogTarget::Off);
        }
        Ok(LogTarget::File {
            path: PathBuf::from(path),
            append,
        })
    }
}

impl LogTarget {
    fn open(path: &Path, append: bool) -> BasesResult<File> {
        let mut options = OpenOptions::new();
        options.create(true);
        if append {
            options.append(true);
        } else {
            options.write(true).truncate(true);
        }
        options.open(path).map_err(|source| BasesError::LogFile {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber for `target`. Does nothing for `Off`.
pub fn init(target: &LogTarget) -> BasesResult<()> {
    let installed = match target {
        LogTarget::Off => return Ok(()),
        LogTarget::Stderr => fmt()
            .with_target(false)
            .with_level(true)
            .with_writer(std::io::stderr)
            .with_env_filter(filter())
            .try_init(),
        LogTarget::File { path, append } => {
            let file = LogTarget::open(path, *append)?;
            fmt()
                .with_target(true)
                .with_level(true)
                .with_thread_names(true)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .with_env_filter(filter())
                .try_init()
        }
    };
    installed.map_err(|err| BasesError::Logging(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(path: &str, append: bool) -> LogTarget {
        LogTarget::File {
            path: PathBuf::from(path),
            append,
        }
    }

    #[test]
    fn test_redirect_forms() {
        assert_eq!(">>/tmp/a.log".parse::<LogTarget>(), Ok(file("/tmp/a.log", true)));
        assert_eq!(">/tmp/a.log".parse::<LogTarget>(), Ok(file("/tmp/a.log", false)));
        assert_eq!("/tmp/a.log".parse::<LogTarget>(), Ok(file("/tmp/a.log", false)));
        assert_eq!(">> spaced.log".parse::<LogTarget>(), Ok(file("spaced.log", true)));
    }

    #[test]
    fn test_empty_spec_is_off() {
        assert_eq!("".parse::<LogTarget>(), Ok(LogTarget::Off));
        assert_eq!(">>".parse::<LogTarget>(), Ok(LogTarget::Off));
    }

    #[test]
    fn test_open_reports_path() {
        let missing = PathBuf::from("/nonexistent-dir/bases.log");
        let err = LogTarget::open(&missing, true).unwrap_err();
        assert!(err.to_string().contains("/nonexistent-dir/bases.log"));
    }
}
