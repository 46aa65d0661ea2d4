//! A thin wrapper around an external binary resolved once from `$PATH`.

use crate::error::{self, Result};
use snafu::ResultExt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct CommandLine {
    pub(crate) path: PathBuf,
}

impl CommandLine {
    /// Resolve `name` against the search path once, so failures to find the
    /// binary surface immediately rather than on first use.
    pub fn resolve(name: &str) -> Result<Self> {
        let path = which::which(name).context(error::NotFoundSnafu {
            name: name.to_string(),
        })?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run the command, capturing and returning stdout. Stderr is merged
    /// into stdout so error output from either stream is included in the
    /// returned bytes and in any `CommandFailed` error.
    pub fn output(&self, args: &[String]) -> Result<Vec<u8>> {
        let expr = duct::cmd(&self.path, args)
            .stderr_to_stdout()
            .stdout_capture()
            .unchecked();
        let output = expr.run().context(error::CommandStartSnafu {
            program: self.display(),
        })?;
        snafu::ensure!(
            output.status.success(),
            error::CommandFailedSnafu {
                program: self.display(),
                args: args.join(" "),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            }
        );
        Ok(output.stdout)
    }

    /// Run the command with inherited stdio, for long-running build steps
    /// whose progress output should stream straight to the caller's
    /// terminal instead of being buffered.
    pub fn spawn(&self, args: &[String]) -> Result<()> {
        let expr = duct::cmd(&self.path, args).unchecked();
        let output = expr.run().context(error::CommandStartSnafu {
            program: self.display(),
        })?;
        snafu::ensure!(
            output.status.success(),
            error::CommandFailedSnafu {
                program: self.display(),
                args: args.join(" "),
                stdout: String::new(),
            }
        );
        Ok(())
    }

    fn display(&self) -> String {
        self.path.display().to_string()
    }
}
