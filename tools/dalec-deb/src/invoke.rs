//! Driving `dpkg-buildpackage` against an assembled source tree (spec §4.3).

use crate::error::{self, Result};
use dalec_exec::CommandLine;
use snafu::ResultExt;

/// Build just the `.dsc`/`.tar.*` source package: `dpkg-buildpackage -S -us -uc`.
pub fn build_source_package(dpkg_buildpackage: &CommandLine) -> Result<Vec<u8>> {
    dpkg_buildpackage
        .output(&["-S".into(), "-us".into(), "-uc".into()])
        .context(error::InvokeSnafu)
}

/// Unpack a `.dsc` into a fresh tree, then build the binary packages:
/// `dpkg-source -x <dsc>` followed by `dpkg-buildpackage -b -uc -us`.
pub fn build_binary_package(
    dpkg_source: &CommandLine,
    dpkg_buildpackage: &CommandLine,
    dsc_path: &str,
) -> Result<Vec<u8>> {
    dpkg_source
        .output(&["-x".into(), dsc_path.into()])
        .context(error::InvokeSnafu)?;
    dpkg_buildpackage
        .output(&["-b".into(), "-uc".into(), "-us".into()])
        .context(error::InvokeSnafu)
}
