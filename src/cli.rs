//! Command-line arguments

use crate::log::LogTarget;
use crate::num::Base;
use crate::parser::parse::DEFAULT_MAX_DEPTH;
use crate::parser::{ParseOptions, Scheduling};
use clap::Parser;

/// Read expressions and show their trees and integer literals in any base
#[derive(Debug, Parser)]
#[command(name = "bases", author, version, about)]
pub struct Args {
    /// Expressions to parse; with none (and no --print) the terminal UI starts
    #[arg(value_name = "EXPR")]
    pub exprs: Vec<String>,

    /// Print results instead of starting the UI; reads stdin lines if no EXPR
    #[arg(short, long)]
    pub print: bool,

    /// Stop at the first expression that does not parse cleanly
    #[arg(short, long)]
    pub check: bool,

    /// Scan symbols on a separate thread
    #[arg(long)]
    pub pipelined: bool,

    /// Bound on symbols scanned ahead when pipelined (unbounded if unset)
    #[arg(long, value_name = "N", requires = "pipelined")]
    pub capacity: Option<usize>,

    /// Base used to show integer literals
    #[arg(short, long, value_enum, env = "BASES_BASE", default_value_t = Base::Auto)]
    pub base: Base,

    /// Maximum expression nesting depth
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Log destination: `>>path` appends, `>path` or `path` truncates
    #[arg(long, value_name = "SPEC", env = "BASES_LOG_FILE")]
    pub log_file: Option<LogTarget>,
}

/// What the binary does with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Interactive,
    /// Print each expression given on the command line.
    Batch(Vec<String>),
    /// Print each line of standard input.
    Stdin,
}

impl Args {
    pub fn mode(&self) -> Mode {
        match (self.exprs.is_empty(), self.print) {
            (false, _) => Mode::Batch(self.exprs.clone()),
            (true, true) => Mode::Stdin,
            (true, false) => Mode::Interactive,
        }
    }

    pub fn parse_options(&self) -> ParseOptions {
        let scheduling = if self.pipelined {
            Scheduling::Pipelined {
                capacity: self.capacity,
            }
        } else {
            Scheduling::Inline
        };
        ParseOptions {
            scheduling,
            max_depth: self.max_depth,
        }
    }

    /// The configured log file, or else stderr for printing modes and
    /// nothing for the UI, which owns the terminal.
    pub fn log_target(&self) -> LogTarget {
        match (&self.log_file, self.mode()) {
            (Some(target), _) => target.clone(),
            (None, Mode::Interactive) => LogTarget::Off,
            (None, _) => LogTarget::Stderr,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn args(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("bases").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn test_command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_modes() {
        assert_eq!(args(&[]).mode(), Mode::Interactive);
        assert_eq!(args(&["-p"]).mode(), Mode::Stdin);
        assert_eq!(
            args(&["1 + 2", "x"]).mode(),
            Mode::Batch(vec!["1 + 2".to_string(), "x".to_string()])
        );
    }

    #[test]
    fn test_parse_options() {
        let options = args(&["--pipelined", "--capacity", "4", "--max-depth", "9"]).parse_options();
        assert_eq!(
            options.scheduling,
            Scheduling::Pipelined { capacity: Some(4) }
        );
        assert_eq!(options.max_depth, 9);
        assert_eq!(args(&[]).parse_options(), ParseOptions::default());
    }

    #[test]
    fn test_capacity_requires_pipelined() {
        assert!(Args::try_parse_from(["bases", "--capacity", "4"]).is_err());
    }

    #[test]
    fn test_base_and_log_target() {
        let a = args(&["--base", "hex", "--log-file", ">>out.log", "x"]);
        assert_eq!(a.base, Base::Hex);
        assert_eq!(
            a.log_target(),
            LogTarget::File {
                path: "out.log".into(),
                append: true
            }
        );
        assert_eq!(args(&["x"]).log_target(), LogTarget::Stderr);
    }
}
