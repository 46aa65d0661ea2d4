use crate::driver;
use crate::request::BuildRequest;
use anyhow::{Context, Result};
use clap::Parser;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Build a spec's target: resolve sources, synthesize the packaging layout,
/// build the package, assemble the container, and run its declared tests.
#[derive(Debug, Parser)]
pub struct Build {
    /// Path to the spec YAML file.
    #[clap(long, env = "DALEC_FILENAME")]
    pub filename: PathBuf,

    /// `"<subtarget>/<dalecTarget>"` or a registered alias. Empty selects
    /// the mux's default subtarget.
    #[clap(long, default_value = "")]
    pub target: String,

    /// `NAME=VALUE` pairs contributed to `${VAR}` substitution. Repeatable.
    #[clap(long = "build-arg", value_name = "NAME=VALUE")]
    pub build_args: Vec<String>,

    /// Key identifying which Dockerfile-shaped key the spec was read from,
    /// when the frontend multiplexes several file roles under one request.
    #[clap(long)]
    pub dockerfilekey: Option<String>,

    /// Per-spec target override used when the mux is nested inside another
    /// frontend's target string.
    #[clap(long = "dalec-target")]
    pub dalec_target: Option<String>,

    #[clap(long)]
    pub requestid: Option<String>,
}

impl Build {
    pub fn run(self) -> Result<()> {
        let mut build_args = BTreeMap::new();
        let mut disable_diff_merge = false;
        for pair in &self.build_args {
            let (name, value) = pair
                .split_once('=')
                .with_context(|| format!("build-arg '{pair}' is not in NAME=VALUE form"))?;
            if name == "DALEC_DISABLE_DIFF_MERGE" {
                disable_diff_merge = value == "1";
            }
            build_args.insert(name.to_string(), value.to_string());
        }

        let request = BuildRequest {
            target: self.target,
            build_args,
            disable_diff_merge,
            filename: Some(self.filename.display().to_string()),
            dockerfilekey: self.dockerfilekey,
            dalec_target: self.dalec_target,
            requestid: self.requestid,
        };

        let bytes = std::fs::read(&self.filename)
            .with_context(|| format!("failed to read spec file '{}'", self.filename.display()))?;

        driver::run_build(&bytes, &request)
    }
}
