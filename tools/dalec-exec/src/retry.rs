//! Retrying a command when its failure matches a known-transient error
//! signature, rather than treating every non-zero exit as fatal.
//!
//! `docker build` in particular can fail with a generic exit code for
//! reasons that are really just BuildKit flakiness; the only signal
//! available is the text of the error, so callers supply the regexes that
//! identify a worth-retrying failure.

use crate::cli::CommandLine;
use crate::error::{self, Result};
use regex::Regex;
use snafu::ensure;
use std::num::NonZeroU16;

pub struct RetryPolicy {
    max_attempts: NonZeroU16,
    transient_patterns: Vec<Regex>,
}

impl RetryPolicy {
    /// Fail immediately on any non-zero exit.
    pub fn none() -> Self {
        Self {
            max_attempts: NonZeroU16::new(1).expect("1 is nonzero"),
            transient_patterns: Vec::new(),
        }
    }

    /// Retry up to `max_attempts` times, but only when the command's
    /// combined stdout/stderr matches one of `transient_patterns`.
    pub fn transient(max_attempts: NonZeroU16, transient_patterns: Vec<Regex>) -> Self {
        Self {
            max_attempts,
            transient_patterns,
        }
    }

    fn is_transient(&self, output: &str) -> bool {
        self.transient_patterns.iter().any(|p| p.is_match(output))
    }
}

/// Run `cli` with `args`, retrying according to `policy` when a failure's
/// output matches a transient pattern. Returns the combined stdout/stderr of
/// the attempt that finally succeeded (or the last attempt, on exhaustion).
pub fn run_with_retry(cli: &CommandLine, args: &[String], policy: &RetryPolicy) -> Result<Vec<u8>> {
    let mut attempt: u16 = 1;
    loop {
        let expr = duct::cmd(cli.path(), args)
            .stderr_to_stdout()
            .stdout_capture()
            .unchecked();
        let output = expr
            .run()
            .map_err(|source| error::Error::CommandStart {
                program: cli.path().display().to_string(),
                source,
            })?;

        if output.status.success() {
            return Ok(output.stdout);
        }

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let attempts_left = attempt < u16::from(policy.max_attempts);
        let retryable = policy.is_transient(&stdout);

        ensure!(
            retryable && attempts_left,
            error::CommandFailedSnafu {
                program: cli.path().display().to_string(),
                args: args.join(" "),
                stdout,
            }
        );

        log::warn!(
            "'{}' failed with a transient error on attempt {attempt}, retrying",
            cli.path().display()
        );
        attempt += 1;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn none_policy_never_matches() {
        let policy = RetryPolicy::none();
        assert!(!policy.is_transient("anything at all"));
    }

    #[test]
    fn transient_policy_matches_configured_patterns() {
        let policy = RetryPolicy::transient(
            NonZeroU16::new(3).unwrap(),
            vec![Regex::new("frontend grpc server closed unexpectedly").unwrap()],
        );
        assert!(policy.is_transient("failed: frontend grpc server closed unexpectedly"));
        assert!(!policy.is_transient("permission denied"));
    }
}
