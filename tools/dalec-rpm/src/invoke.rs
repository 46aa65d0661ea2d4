//! Driving `rpmbuild` against an assembled spec tree (spec §4.4).

use crate::error::{self, Result};
use dalec_exec::CommandLine;
use snafu::ResultExt;

/// The `_topdir`-relative output directories and the scratch buildroot an
/// rpmbuild invocation needs (spec §4.4).
pub struct BuildPaths<'a> {
    pub topdir: &'a str,
    pub srcrpmdir: &'a str,
    pub rpmdir: &'a str,
    pub buildroot: &'a str,
}

/// `rpmbuild --define "_topdir <topdir>" --define "_srcrpmdir <srcrpmdir>"
/// --define "_rpmdir <rpmdir>" --buildroot <buildroot> -ba <spec path>`: one
/// combined build producing both the source and binary packages.
pub fn build(rpmbuild: &CommandLine, paths: &BuildPaths, spec_path: &str) -> Result<Vec<u8>> {
    rpmbuild
        .output(&[
            "--define".into(),
            format!("_topdir {}", paths.topdir),
            "--define".into(),
            format!("_srcrpmdir {}", paths.srcrpmdir),
            "--define".into(),
            format!("_rpmdir {}", paths.rpmdir),
            "--buildroot".into(),
            paths.buildroot.into(),
            "-ba".into(),
            spec_path.into(),
        ])
        .context(error::InvokeSnafu)
}
